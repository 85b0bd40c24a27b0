//! Custom assertion macros
//!
//! Response assertions that print the JSON body on failure, which is usually
//! the quickest way to see why a request was rejected.

/// Assert the status of a [`TestResponse`](crate::common::app::TestResponse)
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "unexpected status, body: {}",
            $response.body
        );
    };
}

/// Assert that a response carries `success: false` and the given message
#[macro_export]
macro_rules! assert_api_error {
    ($response:expr, $status:expr, $message:expr) => {
        $crate::assert_status!($response, $status);
        assert_eq!($response.body["success"], false);
        assert_eq!($response.body["message"], $message);
    };
}

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}
