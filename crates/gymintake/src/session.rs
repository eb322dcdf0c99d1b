//! The intake session: a fixed sequence of prompts with validation after each.
//!
//! The session never touches the terminal directly. It asks a [`Prompter`]
//! for each answer and stops at the first failure, dropping whatever was
//! collected so far.
//!
//! ```text
//! Start -> CredentialsEntered -> Authenticated -> PersonalInfoEntered
//!       -> PaymentInfoEntered -> AgreementEntered -> Displayed -> End
//! ```
//!
//! Any rejected field moves the session to `Failed`. A mismatched credential
//! re-entry moves it straight to `End`.

use chrono::NaiveDate;
use std::io;

use crate::age::{calculate_age, AgeGroup};
use crate::config::Config;
use crate::model::{Agreement, Credentials, PaymentInfo, PaymentSchedule, PersonalInfo, User};
use crate::pricing::compute_price;
use crate::validate::{
    validate_age_range, validate_date_format, validate_distinct, validate_email,
    validate_phone_like, MAX_AGE, MIN_AGE,
};
use crate::{ConstraintError, FormatError, IntakeError, Result};

/// Source of answers and sink for informational lines.
///
/// Prompts are passed without a trailing `": "`; implementations add their own
/// decoration. `Ok(None)` means input ended before an answer was given.
pub trait Prompter {
    /// Ask for one line of free text.
    fn text(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Ask for a line that should not be echoed.
    fn secret(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Offer a numbered menu (1-based) and return the raw answer.
    fn menu(&mut self, title: &str, items: &[&str], prompt: &str) -> io::Result<Option<String>>;

    /// Print one informational line.
    fn say(&mut self, line: &str) -> io::Result<()>;
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn text(&mut self, prompt: &str) -> io::Result<Option<String>> {
        (**self).text(prompt)
    }

    fn secret(&mut self, prompt: &str) -> io::Result<Option<String>> {
        (**self).secret(prompt)
    }

    fn menu(&mut self, title: &str, items: &[&str], prompt: &str) -> io::Result<Option<String>> {
        (**self).menu(title, items, prompt)
    }

    fn say(&mut self, line: &str) -> io::Result<()> {
        (**self).say(line)
    }
}

/// Where a session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    CredentialsEntered,
    Authenticated,
    PersonalInfoEntered,
    PaymentInfoEntered,
    AgreementEntered,
    Displayed,
    End,
    Failed,
}

impl Stage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::End | Stage::Failed)
    }
}

/// One run of the intake form.
pub struct Intake<P> {
    prompter: P,
    stage: Stage,
    reference_date: NaiveDate,
    base_price: u32,
    currency: String,
}

impl<P: Prompter> Intake<P> {
    pub fn new(prompter: P, config: &Config) -> Self {
        Self {
            prompter,
            stage: Stage::Start,
            reference_date: config.reference_date(),
            base_price: config.base_price,
            currency: config.currency.clone(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Walk the whole form and return the completed application.
    ///
    /// On error nothing collected so far survives.
    pub fn run(&mut self) -> Result<User> {
        let result = self.collect();
        match &result {
            Ok(_) => {}
            Err(IntakeError::AuthenticationFailed) => {
                tracing::info!("authentication failed, ending session");
                self.advance(Stage::End);
            }
            Err(e) => {
                tracing::info!(error = %e, "intake aborted");
                self.advance(Stage::Failed);
            }
        }
        result
    }

    /// Show the rendered summary and close the session.
    pub fn present(&mut self, summary: &str) -> Result<()> {
        self.prompter.say(summary.trim_end_matches('\n'))?;
        self.advance(Stage::Displayed);
        self.advance(Stage::End);
        Ok(())
    }

    fn collect(&mut self) -> Result<User> {
        let credentials = self.enter_credentials()?;
        self.authenticate(&credentials)?;
        let personal_info = self.enter_personal_info()?;
        let payment_info = self.enter_payment_info(personal_info.age)?;
        let agreement = self.enter_agreement()?;

        Ok(User {
            credentials,
            personal_info,
            payment_info,
            agreement,
        })
    }

    fn enter_credentials(&mut self) -> Result<Credentials> {
        let username = self.ask_text("username", "Set up your username")?;
        let password = self.ask_secret("password", "Set up your password")?;

        if !validate_distinct(&username, &password) {
            return Err(ConstraintError::CredentialsMatch.into());
        }

        self.advance(Stage::CredentialsEntered);
        Ok(Credentials::new(username, password))
    }

    fn authenticate(&mut self, credentials: &Credentials) -> Result<()> {
        self.say("Welcome to the Gym Management System")?;
        let username = self.ask_text("re-entered username", "Enter your username")?;
        let password = self.ask_secret("re-entered password", "Enter your password")?;

        if !credentials.matches(&username, &password) {
            return Err(IntakeError::AuthenticationFailed);
        }

        self.say("Authentication successful")?;
        self.say("Please provide your information:")?;
        self.advance(Stage::Authenticated);
        Ok(())
    }

    fn enter_personal_info(&mut self) -> Result<PersonalInfo> {
        let full_name = self.ask_text("full name", "Enter your Full Name")?;

        let dob = self.ask_text(
            "date of birth",
            "Enter your Date of Birth (in the format dd/mm/yyyy)",
        )?;
        if !validate_date_format(&dob) {
            return Err(FormatError::DateOfBirth.into());
        }
        let age = calculate_age(&dob, self.reference_date)?;
        if !validate_age_range(age) {
            return Err(ConstraintError::AgeOutOfRange {
                age,
                min: MIN_AGE,
                max: MAX_AGE,
            }
            .into());
        }
        self.say(&format!("Age: {}", age))?;
        self.say(&AgeGroup::for_age(age).to_string())?;

        let address = self.ask_text("address", "Enter your Address")?;

        let phone_number = self.ask_text("phone number", "Enter your Phone Number")?;
        if !validate_phone_like(&phone_number) {
            return Err(FormatError::PhoneNumber.into());
        }

        let email_address = self.ask_text("email address", "Enter your Email Address")?;
        if !validate_email(&email_address) {
            return Err(FormatError::EmailAddress.into());
        }

        let identification = self.ask_text("identification", "Enter your Identification")?;
        let health_info = self.ask_text("health information", "Enter your Health Information")?;

        let emergency_contact = self.ask_text(
            "emergency contact",
            "Enter your Emergency Contact Information",
        )?;
        if !validate_phone_like(&emergency_contact) {
            return Err(FormatError::EmergencyContact.into());
        }
        if !validate_distinct(&emergency_contact, &phone_number) {
            return Err(ConstraintError::ContactMatchesPhone.into());
        }

        self.advance(Stage::PersonalInfoEntered);
        Ok(PersonalInfo {
            full_name,
            dob,
            age,
            address,
            phone_number,
            email_address,
            identification,
            health_info,
            emergency_contact,
        })
    }

    fn enter_payment_info(&mut self, age: i32) -> Result<PaymentInfo> {
        let payment_method = self.ask_text("payment method", "Enter your Payment Method")?;
        let payment_schedule = self.select_payment_schedule()?;

        self.advance(Stage::PaymentInfoEntered);
        Ok(PaymentInfo {
            payment_method,
            payment_schedule,
            price: compute_price(age, self.base_price),
            currency: self.currency.clone(),
        })
    }

    fn select_payment_schedule(&mut self) -> Result<PaymentSchedule> {
        let items: Vec<&str> = PaymentSchedule::ALL.iter().map(|m| m.name()).collect();
        let answer = self
            .prompter
            .menu("Select Payment Schedule:", &items, "Enter your choice (1-12)")?
            .ok_or(IntakeError::EndOfInput {
                field: "payment schedule",
            })?;

        answer
            .trim()
            .parse::<u32>()
            .ok()
            .and_then(PaymentSchedule::from_choice)
            .ok_or_else(|| IntakeError::from(FormatError::PaymentSchedule(answer.clone())))
    }

    fn enter_agreement(&mut self) -> Result<Agreement> {
        let answer = self.ask_text(
            "terms and conditions",
            "Do you agree to the gym's terms and conditions? (1 for Yes, 0 for No)",
        )?;
        let parsed = answer.trim().parse::<i64>();
        let terms_and_conditions = match parsed {
            Ok(value) => value != 0,
            Err(_) => return Err(FormatError::TermsAnswer(answer).into()),
        };

        let signature_file_name = self.ask_text(
            "signature file name",
            "Enter the filename/path of the picture for your signature",
        )?;

        self.advance(Stage::AgreementEntered);
        Ok(Agreement {
            terms_and_conditions,
            signature_file_name,
        })
    }

    fn ask_text(&mut self, field: &'static str, prompt: &str) -> Result<String> {
        self.prompter
            .text(prompt)?
            .ok_or(IntakeError::EndOfInput { field })
    }

    fn ask_secret(&mut self, field: &'static str, prompt: &str) -> Result<String> {
        self.prompter
            .secret(prompt)?
            .ok_or(IntakeError::EndOfInput { field })
    }

    fn say(&mut self, line: &str) -> Result<()> {
        Ok(self.prompter.say(line)?)
    }

    fn advance(&mut self, next: Stage) {
        tracing::debug!(from = ?self.stage, to = ?next, "intake stage");
        self.stage = next;
    }
}
