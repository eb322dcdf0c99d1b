//! Value records collected during an intake session.
//!
//! Records are built once, in form order, and never mutated afterwards.
//! `User` renders the closing summary both as plain text (`Display`) and
//! as JSON (`Serialize`); credentials are never part of either.

use serde::Serialize;
use std::fmt;

/// Login details chosen at the start of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }

    /// Returns true if the re-entered pair matches exactly.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonalInfo {
    pub full_name: String,
    /// Date of birth as entered, `dd/mm/yyyy`
    pub dob: String,
    /// Derived from `dob`
    pub age: i32,
    pub address: String,
    pub phone_number: String,
    pub email_address: String,
    pub identification: String,
    pub health_info: String,
    pub emergency_contact: String,
}

/// Month the membership package is billed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaymentSchedule {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl PaymentSchedule {
    /// All months in menu order.
    pub const ALL: [PaymentSchedule; 12] = [
        PaymentSchedule::January,
        PaymentSchedule::February,
        PaymentSchedule::March,
        PaymentSchedule::April,
        PaymentSchedule::May,
        PaymentSchedule::June,
        PaymentSchedule::July,
        PaymentSchedule::August,
        PaymentSchedule::September,
        PaymentSchedule::October,
        PaymentSchedule::November,
        PaymentSchedule::December,
    ];

    /// Map a 1-based menu choice to a month.
    pub fn from_choice(choice: u32) -> Option<Self> {
        let index = usize::try_from(choice).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            PaymentSchedule::January => "January",
            PaymentSchedule::February => "February",
            PaymentSchedule::March => "March",
            PaymentSchedule::April => "April",
            PaymentSchedule::May => "May",
            PaymentSchedule::June => "June",
            PaymentSchedule::July => "July",
            PaymentSchedule::August => "August",
            PaymentSchedule::September => "September",
            PaymentSchedule::October => "October",
            PaymentSchedule::November => "November",
            PaymentSchedule::December => "December",
        }
    }
}

impl fmt::Display for PaymentSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentInfo {
    pub payment_method: String,
    pub payment_schedule: PaymentSchedule,
    /// Derived from age, never entered
    pub price: u32,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Agreement {
    pub terms_and_conditions: bool,
    /// Path or file name only; the file is never opened
    pub signature_file_name: String,
}

/// A completed membership application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    #[serde(skip)]
    pub credentials: Credentials,
    pub personal_info: PersonalInfo,
    pub payment_info: PaymentInfo,
    pub agreement: Agreement,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.personal_info;
        writeln!(f, "\n\nPersonal Information:")?;
        writeln!(f, "Full Name: {}", p.full_name)?;
        writeln!(f, "Date of Birth: {}", p.dob)?;
        writeln!(f, "Age: {}", p.age)?;
        writeln!(f, "Address: {}", p.address)?;
        writeln!(f, "Phone Number: {}", p.phone_number)?;
        writeln!(f, "Email Address: {}", p.email_address)?;
        writeln!(f, "Identification: {}", p.identification)?;
        writeln!(f, "Health Information: {}", p.health_info)?;
        writeln!(f, "Emergency Contact: {}", p.emergency_contact)?;

        let pay = &self.payment_info;
        writeln!(f, "\n\nPayment Information:")?;
        writeln!(f, "Payment Method: {}", pay.payment_method)?;
        writeln!(f, "Monthly Package: {}", pay.payment_schedule)?;
        writeln!(f, "Price: {} {}", pay.price, pay.currency)?;

        let agreed = if self.agreement.terms_and_conditions {
            "Agreed"
        } else {
            "Not Agreed"
        };
        writeln!(f, "\n\nAgreement Information:")?;
        writeln!(f, "Terms and Conditions: {}", agreed)?;
        writeln!(f, "Signature: {}", self.agreement.signature_file_name)
    }
}
