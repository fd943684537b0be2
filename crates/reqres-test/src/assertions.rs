//! Scenario-level checks.
//!
//! Unlike the panicking `assert_*` helpers on [`ApiResponse`](crate::ApiResponse),
//! these return `TestError::Assertion` so a failure can be recorded as a
//! failed report step before the scenario ends.

use std::fmt::Debug;

use crate::error::TestError;

/// Checks `actual == expected`.
pub fn expect_eq<T>(description: &str, expected: T, actual: T) -> Result<(), TestError>
where
    T: PartialEq + Debug,
{
    if expected == actual {
        Ok(())
    } else {
        Err(TestError::assertion(
            description,
            format!("{expected:?}"),
            format!("{actual:?}"),
        ))
    }
}

/// Checks that `items` has exactly `expected` elements.
pub fn expect_len<T>(description: &str, items: &[T], expected: usize) -> Result<(), TestError> {
    if items.len() == expected {
        Ok(())
    } else {
        Err(TestError::assertion(
            description,
            format!("{expected} items"),
            format!("{} items", items.len()),
        ))
    }
}

/// Checks that every element of `expected` occurs in `actual`, in any order.
///
/// Extra elements in `actual` are fine.
pub fn expect_has_items<T>(description: &str, actual: &[T], expected: &[T]) -> Result<(), TestError>
where
    T: PartialEq + Debug,
{
    let missing: Vec<&T> = expected
        .iter()
        .filter(|item| !actual.contains(item))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(TestError::assertion(
            description,
            format!("a collection containing {expected:?}"),
            format!("{actual:?} (missing {missing:?})"),
        ))
    }
}

/// Checks `actual < limit`.
pub fn expect_less_than<T>(description: &str, actual: T, limit: T) -> Result<(), TestError>
where
    T: PartialOrd + Debug,
{
    if actual < limit {
        Ok(())
    } else {
        Err(TestError::assertion(
            description,
            format!("less than {limit:?}"),
            format!("{actual:?}"),
        ))
    }
}
