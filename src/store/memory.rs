use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use hourglass_rs::{SafeTimeProvider, TimeSource};
use tracing::debug;
use uuid::Uuid;

use crate::errors::{LedgerError, Result};
use crate::loan::{LoanPatch, LoanRecord, NewLoan};
use crate::payments::{NewPaymentRecord, PaymentPatch, PaymentRecord};
use crate::store::LoanStore;
use crate::types::{LoanId, PaymentId};

enum Clock<'t> {
    Owned(SafeTimeProvider),
    Shared(&'t SafeTimeProvider),
}

impl Clock<'_> {
    fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Owned(time) => time.now(),
            Clock::Shared(time) => time.now(),
        }
    }
}

/// in-process store, used by tests and demos
pub struct InMemoryStore<'t> {
    loans: BTreeMap<LoanId, LoanRecord>,
    loan_order: Vec<LoanId>,
    payments: BTreeMap<PaymentId, PaymentRecord>,
    clock: Clock<'t>,
}

impl InMemoryStore<'static> {
    /// store stamping rows with its own clock
    pub fn new(time: SafeTimeProvider) -> Self {
        Self::with_clock(Clock::Owned(time))
    }

    /// store stamping rows with system time
    pub fn system() -> Self {
        Self::new(SafeTimeProvider::new(TimeSource::System))
    }
}

impl<'t> InMemoryStore<'t> {
    /// store stamping rows with a clock the caller keeps control of
    pub fn with_time(time: &'t SafeTimeProvider) -> Self {
        Self::with_clock(Clock::Shared(time))
    }

    fn with_clock(clock: Clock<'t>) -> Self {
        Self {
            loans: BTreeMap::new(),
            loan_order: Vec::new(),
            payments: BTreeMap::new(),
            clock,
        }
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn loan_count(&self) -> usize {
        self.loans.len()
    }

    pub fn payment_count(&self) -> usize {
        self.payments.len()
    }
}

impl Default for InMemoryStore<'static> {
    fn default() -> Self {
        Self::system()
    }
}

impl LoanStore for InMemoryStore<'_> {
    fn list_loans(&self) -> Result<Vec<LoanRecord>> {
        // newest inserts first, then a stable sort keeps that order on equal stamps
        let mut loans: Vec<LoanRecord> = self
            .loan_order
            .iter()
            .rev()
            .filter_map(|id| self.loans.get(id).cloned())
            .collect();
        loans.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(loans)
    }

    fn get_loan(&self, id: LoanId) -> Result<LoanRecord> {
        self.loans
            .get(&id)
            .cloned()
            .ok_or_else(|| LedgerError::not_found("loan", id))
    }

    fn get_loan_by_contract(&self, contract_number: &str) -> Result<LoanRecord> {
        self.loans
            .values()
            .find(|loan| loan.contract_number == contract_number)
            .cloned()
            .ok_or_else(|| LedgerError::not_found("loan", contract_number))
    }

    fn create_loan(&mut self, loan: NewLoan) -> Result<LoanRecord> {
        if self
            .loans
            .values()
            .any(|existing| existing.contract_number == loan.contract_number)
        {
            return Err(LedgerError::persistence(format!(
                "duplicate contract number {}",
                loan.contract_number
            )));
        }

        let now = self.now();
        let record = LoanRecord {
            id: Uuid::new_v4(),
            contract_number: loan.contract_number,
            customer_name: loan.customer_name,
            customer_phone: loan.customer_phone,
            loan_amount: loan.loan_amount,
            interest_rate: loan.interest_rate,
            interest_type: loan.interest_type,
            installments: loan.installments,
            payment_frequency: loan.payment_frequency,
            start_date: loan.start_date,
            monthly_payment: loan.monthly_payment,
            total_interest: loan.total_interest,
            total_amount: loan.total_amount,
            status: loan.status,
            created_at: now,
            updated_at: now,
        };

        debug!(loan_id = %record.id, contract = %record.contract_number, "loan row inserted");

        self.loan_order.push(record.id);
        self.loans.insert(record.id, record.clone());
        Ok(record)
    }

    fn update_loan(&mut self, id: LoanId, patch: LoanPatch) -> Result<LoanRecord> {
        let now = self.now();
        let loan = self
            .loans
            .get_mut(&id)
            .ok_or_else(|| LedgerError::not_found("loan", id))?;

        if let Some(name) = patch.customer_name {
            loan.customer_name = name;
        }
        if let Some(phone) = patch.customer_phone {
            loan.customer_phone = Some(phone);
        }
        if let Some(status) = patch.status {
            loan.status = status;
        }
        loan.updated_at = now;

        Ok(loan.clone())
    }

    fn list_payments(&self, loan_id: LoanId) -> Result<Vec<PaymentRecord>> {
        if !self.loans.contains_key(&loan_id) {
            return Err(LedgerError::not_found("loan", loan_id));
        }

        let mut payments: Vec<PaymentRecord> = self
            .payments
            .values()
            .filter(|p| p.loan_id == loan_id)
            .cloned()
            .collect();
        payments.sort_by_key(|p| p.installment_number);
        Ok(payments)
    }

    fn get_payment(&self, id: PaymentId) -> Result<PaymentRecord> {
        self.payments
            .get(&id)
            .cloned()
            .ok_or_else(|| LedgerError::not_found("payment", id))
    }

    fn insert_payments(&mut self, payments: Vec<NewPaymentRecord>) -> Result<Vec<PaymentRecord>> {
        // validate the whole batch before touching anything
        let mut taken: BTreeSet<(LoanId, u32)> = self
            .payments
            .values()
            .map(|p| (p.loan_id, p.installment_number))
            .collect();

        for payment in &payments {
            if !self.loans.contains_key(&payment.loan_id) {
                return Err(LedgerError::persistence(format!(
                    "installment {} references unknown loan {}",
                    payment.installment_number, payment.loan_id
                )));
            }
            if payment.installment_number == 0 {
                return Err(LedgerError::persistence("installment numbers start at 1"));
            }
            if !taken.insert((payment.loan_id, payment.installment_number)) {
                return Err(LedgerError::persistence(format!(
                    "duplicate installment {} for loan {}",
                    payment.installment_number, payment.loan_id
                )));
            }
        }

        let now = self.now();
        let mut inserted: Vec<PaymentRecord> = payments
            .into_iter()
            .map(|p| PaymentRecord {
                id: Uuid::new_v4(),
                loan_id: p.loan_id,
                installment_number: p.installment_number,
                due_date: p.due_date,
                principal_amount: p.principal_amount,
                interest_amount: p.interest_amount,
                total_amount: p.total_amount,
                paid_amount: p.paid_amount,
                status: p.status,
                paid_date: p.paid_date,
                payment_method: None,
                receipt_number: None,
                created_at: now,
                updated_at: now,
            })
            .collect();
        inserted.sort_by_key(|p| (p.loan_id, p.installment_number));

        for record in &inserted {
            self.payments.insert(record.id, record.clone());
        }

        debug!(count = inserted.len(), "payment rows inserted");

        Ok(inserted)
    }

    fn update_payment(&mut self, id: PaymentId, patch: PaymentPatch) -> Result<PaymentRecord> {
        let now = self.now();
        let payment = self
            .payments
            .get_mut(&id)
            .ok_or_else(|| LedgerError::not_found("payment", id))?;

        payment.apply_patch(patch, now);
        Ok(payment.clone())
    }
}
