//! Property-based tests for notification list paging

use proptest::prelude::*;
use socialgram::shared::social::notification::{NotificationQuery, MAX_PAGE_SIZE};

proptest! {
    #[test]
    fn test_page_is_always_positive(raw in proptest::option::of(".*")) {
        let query = NotificationQuery { page: raw, limit: None };
        prop_assert!(query.page() >= 1);
    }

    #[test]
    fn test_limit_is_within_bounds(raw in proptest::option::of(".*"), default in 1i64..=100) {
        let query = NotificationQuery { page: None, limit: raw };
        let limit = query.limit(default);
        prop_assert!(limit >= 1);
        prop_assert!(limit <= MAX_PAGE_SIZE);
    }

    #[test]
    fn test_numeric_limit_is_honored_up_to_the_cap(limit in 1i64..10_000) {
        let query = NotificationQuery { page: None, limit: Some(limit.to_string()) };
        prop_assert_eq!(query.limit(20), limit.min(MAX_PAGE_SIZE));
    }
}
