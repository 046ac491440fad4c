use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::types::{LoanId, PaymentId, PaymentStatus};

/// persisted installment of a loan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: PaymentId,
    pub loan_id: LoanId,
    pub installment_number: u32,
    pub due_date: NaiveDate,
    pub principal_amount: Money,
    pub interest_amount: Money,
    pub total_amount: Money,
    pub paid_amount: Option<Money>,
    pub status: PaymentStatus,
    pub paid_date: Option<NaiveDate>,
    pub payment_method: Option<String>,
    pub receipt_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// insert shape for one installment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPaymentRecord {
    pub loan_id: LoanId,
    pub installment_number: u32,
    pub due_date: NaiveDate,
    pub principal_amount: Money,
    pub interest_amount: Money,
    pub total_amount: Money,
    pub paid_amount: Option<Money>,
    pub status: PaymentStatus,
    pub paid_date: Option<NaiveDate>,
}

/// partial update of an installment; absent fields are left untouched
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaymentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_amount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_number: Option<String>,
}

impl PaymentPatch {
    pub fn status(status: PaymentStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// money received against one installment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub amount: Money,
    pub paid_date: NaiveDate,
    pub payment_method: Option<String>,
    pub receipt_number: Option<String>,
}

impl PaymentReceipt {
    pub fn new(amount: Money, paid_date: NaiveDate) -> Self {
        Self {
            amount,
            paid_date,
            payment_method: None,
            receipt_number: None,
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.payment_method = Some(method.into());
        self
    }

    pub fn receipt_number(mut self, number: impl Into<String>) -> Self {
        self.receipt_number = Some(number.into());
        self
    }
}

impl PaymentRecord {
    /// paid amount with absent treated as zero
    pub fn paid_or_zero(&self) -> Money {
        self.paid_amount.unwrap_or(Money::ZERO)
    }

    /// amount still owed on this installment, never below zero
    pub fn outstanding(&self) -> Money {
        (self.total_amount - self.paid_or_zero()).max(Money::ZERO)
    }

    /// pending installment whose due date has passed
    pub fn is_overdue_on(&self, date: NaiveDate) -> bool {
        self.status == PaymentStatus::Pending && self.due_date < date
    }

    /// patch that records `receipt` against this installment
    pub fn settle(&self, receipt: &PaymentReceipt) -> Result<PaymentPatch> {
        if !receipt.amount.is_positive() {
            return Err(LedgerError::InvalidPaymentAmount {
                amount: receipt.amount,
            });
        }

        if !self.status.is_open() {
            return Err(LedgerError::InvalidState {
                current: self.status.to_string(),
                expected: "pending, partial or overdue".to_string(),
            });
        }

        let paid_amount = self.paid_or_zero() + receipt.amount;
        let status = if paid_amount >= self.total_amount {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Partial
        };

        Ok(PaymentPatch {
            paid_amount: Some(paid_amount),
            status: Some(status),
            paid_date: Some(receipt.paid_date),
            payment_method: receipt.payment_method.clone(),
            receipt_number: receipt.receipt_number.clone(),
        })
    }

    /// apply a patch and stamp the modification time
    pub fn apply_patch(&mut self, patch: PaymentPatch, updated_at: DateTime<Utc>) {
        if let Some(paid_amount) = patch.paid_amount {
            self.paid_amount = Some(paid_amount);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(paid_date) = patch.paid_date {
            self.paid_date = Some(paid_date);
        }
        if let Some(method) = patch.payment_method {
            self.payment_method = Some(method);
        }
        if let Some(receipt) = patch.receipt_number {
            self.receipt_number = Some(receipt);
        }
        self.updated_at = updated_at;
    }
}
