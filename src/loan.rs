use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use rand::Rng;

use crate::decimal::{Money, PercentRate};
use crate::payments::{LoanSchedule, LoanTerms};
use crate::types::{InterestMethod, LoanId, LoanStatus, PaymentFrequency};

/// persisted loan contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub id: LoanId,
    pub contract_number: String,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub loan_amount: Money,
    pub interest_rate: PercentRate,
    pub interest_type: InterestMethod,
    pub installments: u32,
    pub payment_frequency: PaymentFrequency,
    pub start_date: NaiveDate,
    /// periodic payment, named after the monthly case
    pub monthly_payment: Money,
    pub total_interest: Money,
    pub total_amount: Money,
    pub status: LoanStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LoanRecord {
    /// terms the stored schedule was generated from
    pub fn terms(&self) -> LoanTerms {
        LoanTerms::new(
            self.loan_amount,
            self.interest_rate,
            self.installments,
            self.payment_frequency,
            self.interest_type,
        )
    }

    pub fn is_active(&self) -> bool {
        self.status == LoanStatus::Active
    }
}

/// insert shape for a loan contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLoan {
    pub contract_number: String,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub loan_amount: Money,
    pub interest_rate: PercentRate,
    pub interest_type: InterestMethod,
    pub installments: u32,
    pub payment_frequency: PaymentFrequency,
    pub start_date: NaiveDate,
    pub monthly_payment: Money,
    pub total_interest: Money,
    pub total_amount: Money,
    pub status: LoanStatus,
}

impl NewLoan {
    /// loan row carrying the headline figures of a generated schedule
    pub fn from_schedule(
        contract_number: String,
        customer_name: String,
        customer_phone: Option<String>,
        start_date: NaiveDate,
        schedule: &LoanSchedule,
    ) -> Self {
        Self {
            contract_number,
            customer_name,
            customer_phone,
            loan_amount: schedule.principal,
            interest_rate: schedule.annual_rate,
            interest_type: schedule.method,
            installments: schedule.installments,
            payment_frequency: schedule.frequency,
            start_date,
            monthly_payment: schedule.periodic_payment,
            total_interest: schedule.total_interest,
            total_amount: schedule.total_amount,
            status: LoanStatus::Active,
        }
    }
}

/// partial update of a loan; terms are immutable once scheduled
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoanPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LoanStatus>,
}

impl LoanPatch {
    pub fn status(status: LoanStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// reference number such as `LN-2568-48213`, used for contracts and receipts
pub fn generate_reference(prefix: &str, year: i32) -> String {
    let serial: u32 = rand::thread_rng().gen_range(10_000..100_000);
    format!("{}-{}-{}", prefix, year, serial)
}
