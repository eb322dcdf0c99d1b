//! Field validators for the intake form.
//!
//! Every check here is a pure function over the raw line the user typed.
//! None of them allocate or log; the session decides what a failure means.

/// Youngest age accepted for membership.
pub const MIN_AGE: i32 = 5;

/// Oldest age accepted for membership.
pub const MAX_AGE: i32 = 100;

/// Length of a phone or emergency contact number.
pub const PHONE_LENGTH: usize = 10;

/// Returns true if `s` is non-empty and made only of ASCII digits.
///
/// # Examples
///
/// ```
/// use gymintake::validate::is_numeric_string;
///
/// assert!(is_numeric_string("0123456789"));
/// assert!(!is_numeric_string("12a4"));
/// assert!(!is_numeric_string(""));
/// ```
#[must_use]
pub fn is_numeric_string(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Returns true if `s` has the `dd/mm/yyyy` layout: 10 bytes, `/` at 2 and 5.
///
/// Only the shape is checked. `99/13/2000` passes; the calendar check happens
/// when the age is calculated.
#[must_use]
pub fn validate_date_format(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10 && bytes[2] == b'/' && bytes[5] == b'/'
}

/// Returns true if `age` lies within `MIN_AGE..=MAX_AGE`.
#[must_use]
pub fn validate_age_range(age: i32) -> bool {
    (MIN_AGE..=MAX_AGE).contains(&age)
}

/// Returns true for exactly ten ASCII digits.
#[must_use]
pub fn validate_phone_like(s: &str) -> bool {
    s.len() == PHONE_LENGTH && is_numeric_string(s)
}

/// Returns true if `s` contains an `@`. No further structure is required.
#[must_use]
pub fn validate_email(s: &str) -> bool {
    s.contains('@')
}

/// Returns true if the two values differ, compared byte for byte.
#[must_use]
pub fn validate_distinct(a: &str, b: &str) -> bool {
    a != b
}
