use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// unique identifier for a loan contract
pub type LoanId = Uuid;

/// unique identifier for a persisted installment
pub type PaymentId = Uuid;

/// how often installments fall due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentFrequency {
    #[default]
    Monthly,
    Weekly,
    Daily,
}

impl PaymentFrequency {
    /// number of payment periods in one year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::Weekly => 52,
            PaymentFrequency::Daily => 365,
        }
    }

    /// parse a stored token; anything unrecognized falls back to monthly
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "weekly" => PaymentFrequency::Weekly,
            "daily" => PaymentFrequency::Daily,
            _ => PaymentFrequency::Monthly,
        }
    }

    pub fn as_token(&self) -> &'static str {
        match self {
            PaymentFrequency::Monthly => "monthly",
            PaymentFrequency::Weekly => "weekly",
            PaymentFrequency::Daily => "daily",
        }
    }
}

impl From<String> for PaymentFrequency {
    fn from(token: String) -> Self {
        PaymentFrequency::from_token(&token)
    }
}

impl From<PaymentFrequency> for String {
    fn from(frequency: PaymentFrequency) -> Self {
        frequency.as_token().to_string()
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// interest calculation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InterestMethod {
    /// interest on the outstanding balance, equal installments (EMI)
    #[default]
    Reducing,
    /// interest on the original principal for the whole term
    Flat,
}

impl InterestMethod {
    /// parse a stored token; unrecognized tokens count as unspecified
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "flat" => InterestMethod::Flat,
            _ => InterestMethod::Reducing,
        }
    }

    pub fn as_token(&self) -> &'static str {
        match self {
            InterestMethod::Reducing => "reducing",
            InterestMethod::Flat => "flat",
        }
    }
}

impl From<String> for InterestMethod {
    fn from(token: String) -> Self {
        InterestMethod::from_token(&token)
    }
}

impl From<InterestMethod> for String {
    fn from(method: InterestMethod) -> Self {
        method.as_token().to_string()
    }
}

impl fmt::Display for InterestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// installment status
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Partial,
    Overdue,
    Cancelled,
    /// token not known to this crate, kept verbatim
    Unknown(String),
}

impl PaymentStatus {
    pub fn from_token(token: &str) -> Self {
        match token {
            "pending" => PaymentStatus::Pending,
            "paid" => PaymentStatus::Paid,
            "partial" => PaymentStatus::Partial,
            "overdue" => PaymentStatus::Overdue,
            "cancelled" => PaymentStatus::Cancelled,
            other => PaymentStatus::Unknown(other.to_string()),
        }
    }

    pub fn as_token(&self) -> &str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Partial => "partial",
            PaymentStatus::Overdue => "overdue",
            PaymentStatus::Cancelled => "cancelled",
            PaymentStatus::Unknown(token) => token,
        }
    }

    /// still expecting money from the borrower
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            PaymentStatus::Pending | PaymentStatus::Partial | PaymentStatus::Overdue
        )
    }
}

impl From<String> for PaymentStatus {
    fn from(token: String) -> Self {
        PaymentStatus::from_token(&token)
    }
}

impl From<PaymentStatus> for String {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Unknown(token) => token,
            known => known.as_token().to_string(),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// loan contract status
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LoanStatus {
    /// installments still being paid
    #[default]
    Active,
    /// every installment paid
    Completed,
    /// soft-deleted
    Cancelled,
    Unknown(String),
}

impl LoanStatus {
    pub fn from_token(token: &str) -> Self {
        match token {
            "active" => LoanStatus::Active,
            "completed" => LoanStatus::Completed,
            "cancelled" => LoanStatus::Cancelled,
            other => LoanStatus::Unknown(other.to_string()),
        }
    }

    pub fn as_token(&self) -> &str {
        match self {
            LoanStatus::Active => "active",
            LoanStatus::Completed => "completed",
            LoanStatus::Cancelled => "cancelled",
            LoanStatus::Unknown(token) => token,
        }
    }
}

impl From<String> for LoanStatus {
    fn from(token: String) -> Self {
        LoanStatus::from_token(&token)
    }
}

impl From<LoanStatus> for String {
    fn from(status: LoanStatus) -> Self {
        match status {
            LoanStatus::Unknown(token) => token,
            known => known.as_token().to_string(),
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}
