//! Panic helpers for test assertions.
//!
//! Test code wants the value or a loud failure, not error plumbing. These
//! take the success value out of a `Result` or `Option`, and on failure
//! panic with the offending value in the message; `#[track_caller]` keeps
//! the panic location on the test line rather than in here.

use std::fmt::Debug;

/// Take the `Ok` value of a result, panicking on `Err`.
///
/// ```
/// use flightdeck_test_helpers::must;
///
/// let parsed: Result<u32, std::num::ParseIntError> = "42".parse();
/// assert_eq!(must(parsed), 42);
/// ```
///
/// # Panics
///
/// Panics on `Err`, printing the error's `Debug` form.
#[track_caller]
pub fn must<T, E: Debug>(result: Result<T, E>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("must: unexpected Err: {e:?}"),
    }
}

/// Take the `Some` value of an option, panicking with `msg` on `None`.
///
/// ```
/// use flightdeck_test_helpers::must_some;
///
/// let shown = Some("2.50");
/// assert_eq!(must_some(shown, "field should have rendered"), "2.50");
/// ```
///
/// # Panics
///
/// Panics on `None` with the supplied message.
#[track_caller]
pub fn must_some<T>(option: Option<T>, msg: &str) -> T {
    match option {
        Some(v) => v,
        None => panic!("must_some: {msg}"),
    }
}
