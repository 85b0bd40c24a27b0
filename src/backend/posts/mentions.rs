//! Mention Parser
//!
//! Extracts `@username` mentions from comment text.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// `@` followed by letters, digits or underscores
static MENTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([A-Za-z0-9_]+)").expect("Invalid mention regex"));

/// Usernames mentioned in `text`, without the `@`
///
/// Case is kept as written since usernames are matched exactly. Repeats are
/// dropped, keeping first-occurrence order.
///
/// ```
/// use socialgram::backend::posts::mentions::extract_mentions;
///
/// let mentions = extract_mentions("@alice look, @bob_2 and @alice again");
/// assert_eq!(mentions, vec!["alice", "bob_2"]);
/// ```
pub fn extract_mentions(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    MENTION_REGEX
        .captures_iter(text)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
        .filter(|username| seen.insert(username.clone()))
        .collect()
}
