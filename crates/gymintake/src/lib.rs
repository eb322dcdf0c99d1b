//! gymintake: validation and derivation for a gym membership intake form
//!
//! This crate provides the building blocks of a single-session intake:
//! - Field validators (dates, phone-like numbers, email, distinctness)
//! - Derived values (age from date of birth, price tier from age)
//! - Plain value records for the collected membership data
//! - A sequential session that drives a `Prompter` and stops at the first failure

pub mod age;
pub mod config;
pub mod model;
pub mod pricing;
pub mod session;
pub mod validate;

// Re-export main types
pub use age::{calculate_age, AgeGroup};
pub use config::Config;
pub use model::{Agreement, Credentials, PaymentInfo, PaymentSchedule, PersonalInfo, User};
pub use pricing::compute_price;
pub use session::{Intake, Prompter, Stage};

/// A field failed a shape check (date layout, digits, `@`, menu choice).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("Date of birth must be in the format dd/mm/yyyy")]
    DateOfBirth,

    #[error("Date of birth {0:?} is not a real calendar date")]
    CalendarDate(String),

    #[error("Phone number must contain exactly 10 numeric characters")]
    PhoneNumber,

    #[error("Email address must contain '@'")]
    EmailAddress,

    #[error("Emergency contact number must contain exactly 10 numeric characters")]
    EmergencyContact,

    #[error("Invalid choice {0:?}, expected a number from 1 to 12")]
    PaymentSchedule(String),

    #[error("Terms and conditions answer must be 1 for Yes or 0 for No, got {0:?}")]
    TermsAnswer(String),
}

/// A well-formed value broke a rule relating it to a range or another field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstraintError {
    #[error("Invalid data: Age must be between {min} and {max}")]
    AgeOutOfRange { age: i32, min: i32, max: i32 },

    #[error("Error: Username and password cannot be the same")]
    CredentialsMatch,

    #[error("Error: Emergency contact and phone number cannot be the same")]
    ContactMatchesPhone,
}

/// Errors that end an intake session
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("Invalid data: {0}")]
    Format(#[from] FormatError),

    #[error("{0}")]
    Constraint(#[from] ConstraintError),

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Failed to read input: {0}")]
    Input(#[from] std::io::Error),

    #[error("Input ended before {field} was entered")]
    EndOfInput { field: &'static str },
}

impl IntakeError {
    /// Process exit code for this failure.
    ///
    /// A mismatched re-entry is a graceful ending, everything else is a failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            IntakeError::AuthenticationFailed => 0,
            _ => 1,
        }
    }

    /// Short machine-readable name for the failure category.
    pub fn kind(&self) -> &'static str {
        match self {
            IntakeError::Format(_) => "FormatError",
            IntakeError::Constraint(_) => "ConstraintError",
            IntakeError::AuthenticationFailed => "AuthenticationError",
            IntakeError::Input(_) | IntakeError::EndOfInput { .. } => "InputError",
        }
    }
}

pub type Result<T> = std::result::Result<T, IntakeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_keep_form_wording() {
        let err = IntakeError::from(FormatError::DateOfBirth);
        assert_eq!(
            err.to_string(),
            "Invalid data: Date of birth must be in the format dd/mm/yyyy"
        );

        let err = IntakeError::from(ConstraintError::CredentialsMatch);
        assert_eq!(
            err.to_string(),
            "Error: Username and password cannot be the same"
        );

        let err = IntakeError::from(ConstraintError::AgeOutOfRange {
            age: 3,
            min: 5,
            max: 100,
        });
        assert_eq!(err.to_string(), "Invalid data: Age must be between 5 and 100");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(IntakeError::AuthenticationFailed.exit_code(), 0);
        assert_eq!(IntakeError::from(FormatError::PhoneNumber).exit_code(), 1);
        assert_eq!(
            IntakeError::from(ConstraintError::ContactMatchesPhone).exit_code(),
            1
        );
        assert_eq!(
            IntakeError::EndOfInput { field: "password" }.exit_code(),
            1
        );
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(IntakeError::from(FormatError::EmailAddress).kind(), "FormatError");
        assert_eq!(
            IntakeError::from(ConstraintError::CredentialsMatch).kind(),
            "ConstraintError"
        );
        assert_eq!(IntakeError::AuthenticationFailed.kind(), "AuthenticationError");
        assert_eq!(
            IntakeError::EndOfInput { field: "address" }.kind(),
            "InputError"
        );
    }
}
