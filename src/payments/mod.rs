pub mod amortization;
pub mod due_dates;
pub mod record;
pub mod summary;

use chrono::NaiveDate;
use tracing::debug;

use crate::errors::Result;
use crate::store::LoanStore;
use crate::types::{LoanId, PaymentStatus};

pub use amortization::{
    calculate_emi, AmortizationCalculator, LoanSchedule, LoanTerms, ScheduleEntry,
};
pub use due_dates::{due_date, generate_due_dates, iso_date};
pub use record::{NewPaymentRecord, PaymentPatch, PaymentReceipt, PaymentRecord};
pub use summary::PaymentSummary;

/// schedule entry paired with its calendar due date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatedEntry {
    pub entry: ScheduleEntry,
    pub due_date: NaiveDate,
}

/// generated schedule waiting to be written as installment records
///
/// `persist` consumes the plan, so a schedule is written at most once and
/// dropping a plan unpersisted is flagged by the compiler.
#[must_use = "a schedule plan does nothing until it is persisted"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulePlan {
    schedule: LoanSchedule,
    start_date: NaiveDate,
    due_dates: Vec<NaiveDate>,
}

impl SchedulePlan {
    /// validate terms, generate the schedule and sequence its due dates
    pub fn prepare(terms: &LoanTerms, start_date: NaiveDate) -> Result<Self> {
        let schedule = LoanSchedule::generate(terms)?;
        let due_dates = generate_due_dates(start_date, terms.installments, terms.frequency)?;

        Ok(Self {
            schedule,
            start_date,
            due_dates,
        })
    }

    pub fn schedule(&self) -> &LoanSchedule {
        &self.schedule
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn due_dates(&self) -> &[NaiveDate] {
        &self.due_dates
    }

    /// entries zipped 1:1 with their due dates by installment
    pub fn dated_entries(&self) -> Vec<DatedEntry> {
        self.schedule
            .entries
            .iter()
            .zip(&self.due_dates)
            .map(|(entry, due_date)| DatedEntry {
                entry: entry.clone(),
                due_date: *due_date,
            })
            .collect()
    }

    /// pending installment records for `loan_id`, in installment order
    pub fn payment_records(&self, loan_id: LoanId) -> Vec<NewPaymentRecord> {
        self.schedule
            .entries
            .iter()
            .zip(&self.due_dates)
            .map(|(entry, due_date)| NewPaymentRecord {
                loan_id,
                installment_number: entry.installment,
                due_date: *due_date,
                principal_amount: entry.principal_portion,
                interest_amount: entry.interest_portion,
                total_amount: entry.payment,
                paid_amount: None,
                status: PaymentStatus::Pending,
                paid_date: None,
            })
            .collect()
    }

    /// bulk-insert one pending record per entry and hand back the schedule
    pub fn persist<S: LoanStore + ?Sized>(
        self,
        store: &mut S,
        loan_id: LoanId,
    ) -> Result<(LoanSchedule, Vec<PaymentRecord>)> {
        let records = store.insert_payments(self.payment_records(loan_id))?;

        debug!(%loan_id, installments = records.len(), "payment schedule persisted");

        Ok((self.schedule, records))
    }
}
