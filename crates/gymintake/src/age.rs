//! Age derivation from a `dd/mm/yyyy` date of birth.

use chrono::{Datelike, NaiveDate};
use std::fmt;

use crate::validate::{is_numeric_string, validate_date_format};
use crate::FormatError;

/// Age at which the full price applies.
pub const ADULT_AGE: i32 = 18;

/// Parse a `dd/mm/yyyy` string into a calendar date.
///
/// The day, month and year parts must all be digits, and together they must
/// name a real date.
pub fn parse_dob(dob: &str) -> Result<NaiveDate, FormatError> {
    if !validate_date_format(dob) {
        return Err(FormatError::DateOfBirth);
    }

    let (day, month, year) = (&dob[0..2], &dob[3..5], &dob[6..10]);
    if ![day, month, year].iter().all(|part| is_numeric_string(part)) {
        return Err(FormatError::DateOfBirth);
    }

    // All-digit parts of at most four characters always fit
    let parse = |part: &str| part.parse::<u32>().map_err(|_| FormatError::DateOfBirth);
    let (day, month, year) = (parse(day)?, parse(month)?, parse(year)?);

    NaiveDate::from_ymd_opt(year as i32, month, day)
        .ok_or_else(|| FormatError::CalendarDate(dob.to_string()))
}

/// Calculate the age in whole years on `reference_date` for someone born on `dob`.
///
/// The age is one less than the year difference when the birthday has not yet
/// come around in the reference year. A birth date after the reference date
/// yields a negative age; range checks are left to the caller.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use gymintake::calculate_age;
///
/// let reference = NaiveDate::from_ymd_opt(2023, 12, 1).unwrap();
/// assert_eq!(calculate_age("01/12/2005", reference), Ok(18));
/// assert_eq!(calculate_age("02/12/2005", reference), Ok(17));
/// ```
pub fn calculate_age(dob: &str, reference_date: NaiveDate) -> Result<i32, FormatError> {
    let born = parse_dob(dob)?;

    let mut age = reference_date.year() - born.year();
    if (reference_date.month(), reference_date.day()) < (born.month(), born.day()) {
        age -= 1;
    }

    Ok(age)
}

/// Membership tier derived from age.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeGroup {
    Adult,
    Teenager,
}

impl AgeGroup {
    pub fn for_age(age: i32) -> Self {
        if age >= ADULT_AGE {
            AgeGroup::Adult
        } else {
            AgeGroup::Teenager
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgeGroup::Adult => write!(f, "Person is an adult"),
            AgeGroup::Teenager => write!(f, "Person is a teenager"),
        }
    }
}
