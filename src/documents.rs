use serde::Serialize;

use crate::config::LedgerConfig;
use crate::errors::{LedgerError, Result};
use crate::format::{
    customer_view_url, format_currency, format_date, frequency_label, method_label, StatusStyle,
    StatusToken,
};
use crate::loan::LoanRecord;
use crate::payments::{generate_due_dates, LoanSchedule, PaymentRecord, PaymentSummary};

/// loan header shared by the printable documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoanHeader {
    pub contract_number: String,
    pub customer_name: String,
    pub loan_amount: String,
    pub interest_rate: String,
    pub interest_type: String,
    pub installments: u32,
    pub payment_frequency: String,
    pub start_date: String,
    pub periodic_payment: String,
    pub total_amount: String,
}

impl LoanHeader {
    pub fn from_loan(loan: &LoanRecord, config: &LedgerConfig) -> Self {
        Self {
            contract_number: loan.contract_number.clone(),
            customer_name: loan.customer_name.clone(),
            loan_amount: format_currency(loan.loan_amount, config),
            interest_rate: loan.interest_rate.to_string(),
            interest_type: method_label(loan.interest_type).to_string(),
            installments: loan.installments,
            payment_frequency: frequency_label(loan.payment_frequency).to_string(),
            start_date: format_date(loan.start_date, config),
            periodic_payment: format_currency(loan.monthly_payment, config),
            total_amount: format_currency(loan.total_amount, config),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleRow {
    pub installment: u32,
    pub due_date: String,
    pub principal: String,
    pub interest: String,
    pub payment: String,
    pub remaining: String,
}

/// repayment table for one loan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleDocument {
    pub file_name: String,
    pub header: LoanHeader,
    pub rows: Vec<ScheduleRow>,
}

impl ScheduleDocument {
    /// regenerate the schedule and due dates from the stored terms
    pub fn build(loan: &LoanRecord, config: &LedgerConfig) -> Result<Self> {
        let schedule = LoanSchedule::generate(&loan.terms())?;
        let due_dates = generate_due_dates(loan.start_date, loan.installments, loan.payment_frequency)?;

        let rows = schedule
            .entries
            .iter()
            .zip(&due_dates)
            .map(|(entry, due_date)| ScheduleRow {
                installment: entry.installment,
                due_date: format_date(*due_date, config),
                principal: format_currency(entry.principal_portion, config),
                interest: format_currency(entry.interest_portion, config),
                payment: format_currency(entry.payment, config),
                remaining: format_currency(entry.remaining_balance, config),
            })
            .collect();

        Ok(Self {
            file_name: format!("ตารางผ่อน_{}.pdf", loan.contract_number),
            header: LoanHeader::from_loan(loan, config),
            rows,
        })
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// receipt for money received against one installment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptDocument {
    pub file_name: String,
    pub receipt_number: String,
    pub paid_date: String,
    pub payer: String,
    pub contract_number: String,
    pub installment_number: u32,
    pub payment_method: String,
    pub paid_amount: String,
    pub principal: String,
    pub interest: String,
}

impl ReceiptDocument {
    /// only installments with money recorded against them get a receipt
    pub fn build(loan: &LoanRecord, payment: &PaymentRecord, config: &LedgerConfig) -> Result<Self> {
        let paid_date = payment.paid_date.ok_or_else(|| LedgerError::InvalidState {
            current: payment.status.to_string(),
            expected: "paid or partial".to_string(),
        })?;

        Ok(Self {
            file_name: format!(
                "ใบเสร็จ_{}_งวด{}.pdf",
                loan.contract_number, payment.installment_number
            ),
            receipt_number: payment
                .receipt_number
                .clone()
                .unwrap_or_else(|| "N/A".to_string()),
            paid_date: format_date(paid_date, config),
            payer: loan.customer_name.clone(),
            contract_number: loan.contract_number.clone(),
            installment_number: payment.installment_number,
            payment_method: payment
                .payment_method
                .clone()
                .unwrap_or_else(|| "-".to_string()),
            paid_amount: format_currency(payment.paid_or_zero(), config),
            principal: format_currency(payment.principal_amount, config),
            interest: format_currency(payment.interest_amount, config),
        })
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryBoxes {
    pub paid: String,
    pub total_paid: String,
    pub remaining: String,
    pub overdue: u32,
    pub progress_percent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub installment: u32,
    pub due_date: String,
    pub amount_due: String,
    pub amount_paid: String,
    pub paid_date: String,
    pub status: StatusStyle,
}

/// payment progress report for one loan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryDocument {
    pub file_name: String,
    pub contract_number: String,
    pub customer_name: String,
    pub boxes: SummaryBoxes,
    pub rows: Vec<SummaryRow>,
}

impl SummaryDocument {
    pub fn build(loan: &LoanRecord, payments: &[PaymentRecord], config: &LedgerConfig) -> Self {
        let summary = PaymentSummary::from_records(payments);

        let rows = payments
            .iter()
            .map(|p| SummaryRow {
                installment: p.installment_number,
                due_date: format_date(p.due_date, config),
                amount_due: format_currency(p.total_amount, config),
                amount_paid: format_currency(p.paid_or_zero(), config),
                paid_date: p
                    .paid_date
                    .map(|d| format_date(d, config))
                    .unwrap_or_else(|| "-".to_string()),
                status: StatusToken::from(&p.status).style(),
            })
            .collect();

        Self {
            file_name: format!("สรุปชำระ_{}.pdf", loan.contract_number),
            contract_number: loan.contract_number.clone(),
            customer_name: loan.customer_name.clone(),
            boxes: SummaryBoxes {
                paid: format!("{}/{}", summary.paid_count, summary.total_installments),
                total_paid: format_currency(summary.total_paid, config),
                remaining: format_currency(summary.remaining_amount, config),
                overdue: summary.overdue_count,
                progress_percent: summary.progress_percent,
            },
            rows,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// what a QR renderer needs for the customer-view code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QrPayload {
    pub url: String,
    pub file_name: String,
}

impl QrPayload {
    pub fn for_contract(contract_number: &str, config: &LedgerConfig) -> Self {
        Self {
            url: customer_view_url(contract_number, config),
            file_name: format!("QR_{}.png", contract_number),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
