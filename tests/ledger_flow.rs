use std::cell::Cell;
use std::rc::Rc;

use chrono::{NaiveDate, TimeZone, Utc};
use loan_ledger_rs::{
    Event, InMemoryStore, InterestMethod, LedgerConfig, LedgerError, LoanApplication, LoanId,
    LoanLedger, LoanPatch, LoanRecord, LoanStatus, LoanStore, Money, NewLoan, NewPaymentRecord,
    PaymentFrequency, PaymentId, PaymentPatch, PaymentReceipt, PaymentRecord, PaymentStatus,
    PercentRate, Result, SafeTimeProvider, TimeSource,
};
use pretty_assertions::assert_eq;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn clock() -> SafeTimeProvider {
    SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2025, 1, 31, 10, 0, 0).unwrap(),
    ))
}

fn application(method: InterestMethod) -> LoanApplication {
    LoanApplication::builder()
        .customer("Malee Srisuk")
        .amount(Money::from_major(100_000))
        .rate(PercentRate::from_percentage(12))
        .installments(12)
        .frequency(PaymentFrequency::Monthly)
        .method(method)
        .start_date(date(2025, 1, 31))
        .build()
        .unwrap()
}

/// store that can refuse installment inserts or loan updates
struct FlakyStore {
    inner: InMemoryStore<'static>,
    reject_inserts: bool,
    loan_updates_down: Rc<Cell<bool>>,
}

impl FlakyStore {
    fn new(reject_inserts: bool) -> Self {
        Self {
            inner: InMemoryStore::new(clock()),
            reject_inserts,
            loan_updates_down: Rc::new(Cell::new(false)),
        }
    }
}

fn connection_reset() -> LedgerError {
    LedgerError::PersistenceFailure {
        message: "connection reset".to_string(),
    }
}

impl LoanStore for FlakyStore {
    fn list_loans(&self) -> Result<Vec<LoanRecord>> {
        self.inner.list_loans()
    }

    fn get_loan(&self, id: LoanId) -> Result<LoanRecord> {
        self.inner.get_loan(id)
    }

    fn get_loan_by_contract(&self, contract_number: &str) -> Result<LoanRecord> {
        self.inner.get_loan_by_contract(contract_number)
    }

    fn create_loan(&mut self, loan: NewLoan) -> Result<LoanRecord> {
        self.inner.create_loan(loan)
    }

    fn update_loan(&mut self, id: LoanId, patch: LoanPatch) -> Result<LoanRecord> {
        if self.loan_updates_down.get() {
            return Err(connection_reset());
        }
        self.inner.update_loan(id, patch)
    }

    fn list_payments(&self, loan_id: LoanId) -> Result<Vec<PaymentRecord>> {
        self.inner.list_payments(loan_id)
    }

    fn get_payment(&self, id: PaymentId) -> Result<PaymentRecord> {
        self.inner.get_payment(id)
    }

    fn insert_payments(&mut self, payments: Vec<NewPaymentRecord>) -> Result<Vec<PaymentRecord>> {
        if self.reject_inserts {
            return Err(connection_reset());
        }
        self.inner.insert_payments(payments)
    }

    fn update_payment(&mut self, id: PaymentId, patch: PaymentPatch) -> Result<PaymentRecord> {
        self.inner.update_payment(id, patch)
    }
}

#[test]
fn test_reducing_loan_lifecycle() {
    let time = clock();
    let control = time.test_control().unwrap();
    let mut ledger = LoanLedger::new(InMemoryStore::with_time(&time), LedgerConfig::thai());

    let opened = ledger.open_loan(application(InterestMethod::Reducing)).unwrap();
    let payments = &opened.payments;

    assert_eq!(opened.schedule.total_interest, Money::from_str_exact("6618.55").unwrap());
    assert_eq!(opened.loan.total_amount, Money::from_str_exact("106618.55").unwrap());
    assert_eq!(payments[0].due_date, date(2025, 2, 28));
    assert_eq!(payments[1].due_date, date(2025, 3, 31));
    assert_eq!(payments[2].due_date, date(2025, 4, 30));
    assert_eq!(payments[11].principal_amount, Money::from_str_exact("8796.91").unwrap());
    assert_eq!(payments[11].interest_amount, Money::from_str_exact("87.97").unwrap());

    control.advance(chrono::Duration::days(40));

    // first installment paid in two parts, second falls overdue
    let first = ledger
        .record_payment(payments[0].id, PaymentReceipt::new(Money::from_major(4_000), date(2025, 2, 27)))
        .unwrap();
    assert_eq!(first.status, PaymentStatus::Partial);
    let first = ledger
        .record_payment(
            payments[0].id,
            PaymentReceipt::new(Money::from_str_exact("4884.88").unwrap(), date(2025, 2, 28)).method("cash"),
        )
        .unwrap();
    assert_eq!(first.status, PaymentStatus::Paid);
    assert!(first.updated_at > first.created_at);

    let flagged = ledger.mark_overdue(opened.loan.id, date(2025, 4, 1)).unwrap();
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].installment_number, 2);

    let summary = ledger.payment_summary(opened.loan.id).unwrap();
    assert_eq!(summary.total_installments, 12);
    assert_eq!(summary.paid_count, 1);
    assert_eq!(summary.overdue_count, 1);
    assert_eq!(summary.pending_count, 10);
    assert_eq!(summary.total_paid, Money::from_str_exact("8884.88").unwrap());
    assert_eq!(summary.progress_percent, 8);
    assert_eq!(summary.remaining_amount, summary.total_due - summary.total_paid);

    let events = ledger.take_events();
    let recorded = events
        .iter()
        .filter(|e| matches!(e, Event::PaymentRecorded { .. }))
        .count();
    assert_eq!(recorded, 2);
    assert!(events.iter().any(|e| matches!(e, Event::PaymentMarkedOverdue { installment_number: 2, .. })));
}

#[test]
fn test_flat_loan_paid_in_full_completes() {
    let mut ledger = LoanLedger::new(InMemoryStore::new(clock()), LedgerConfig::international());
    let opened = ledger.open_loan(application(InterestMethod::Flat)).unwrap();

    assert!(opened.loan.contract_number.starts_with("LN-2025-"));
    assert_eq!(opened.loan.monthly_payment, Money::from_str_exact("9333.33").unwrap());

    for payment in &opened.payments {
        ledger
            .record_payment(payment.id, PaymentReceipt::new(payment.total_amount, payment.due_date))
            .unwrap();
    }

    let loan = ledger.find_by_contract(&opened.loan.contract_number).unwrap();
    assert_eq!(loan.status, LoanStatus::Completed);

    let summary = ledger.payment_summary(loan.id).unwrap();
    assert_eq!(summary.progress_percent, 100);
    assert_eq!(summary.paid_count, 12);
}

#[test]
fn test_changing_terms_means_cancel_and_reopen() {
    let time = clock();
    let control = time.test_control().unwrap();
    let mut ledger = LoanLedger::new(InMemoryStore::with_time(&time), LedgerConfig::thai());

    let original = ledger.open_loan(application(InterestMethod::Reducing)).unwrap();
    control.advance(chrono::Duration::minutes(5));
    ledger.cancel_loan(original.loan.id, "rate renegotiated").unwrap();

    let mut revised = application(InterestMethod::Reducing);
    revised.annual_rate = PercentRate::from_percentage(9);
    let replacement = ledger.open_loan(revised).unwrap();

    let loans = ledger.list_loans().unwrap();
    assert_eq!(loans.len(), 2);
    assert_eq!(loans[0].id, replacement.loan.id);
    assert_eq!(loans[1].status, LoanStatus::Cancelled);

    // the superseded installments are untouched
    assert_eq!(ledger.payments(original.loan.id).unwrap(), original.payments);
    assert!(replacement.schedule.total_interest < original.schedule.total_interest);
}

#[test]
fn test_failed_installment_insert_cancels_loan() {
    let mut ledger = LoanLedger::new(FlakyStore::new(true), LedgerConfig::thai());

    let result = ledger.open_loan(application(InterestMethod::Reducing));
    assert_eq!(result.unwrap_err(), connection_reset());

    let loans = ledger.list_loans().unwrap();
    assert_eq!(loans.len(), 1);
    assert_eq!(loans[0].status, LoanStatus::Cancelled);
    assert!(ledger.payments(loans[0].id).unwrap().is_empty());
    assert!(ledger.take_events().is_empty());
}

#[test]
fn test_stored_payment_survives_failed_completion() {
    let store = FlakyStore::new(false);
    let outage = Rc::clone(&store.loan_updates_down);
    let mut ledger = LoanLedger::new(store, LedgerConfig::thai());

    let mut single = application(InterestMethod::Flat);
    single.installments = 1;
    let opened = ledger.open_loan(single).unwrap();
    let due = &opened.payments[0];
    ledger.take_events();

    outage.set(true);
    let paid = ledger
        .record_payment(due.id, PaymentReceipt::new(due.total_amount, due.due_date))
        .unwrap();
    assert_eq!(paid.status, PaymentStatus::Paid);

    // the installment is stored even though the loan could not be completed
    assert_eq!(ledger.payments(opened.loan.id).unwrap()[0].status, PaymentStatus::Paid);
    assert_eq!(ledger.loan(opened.loan.id).unwrap().status, LoanStatus::Active);
    assert_eq!(
        ledger.refresh_status(opened.loan.id).unwrap_err(),
        connection_reset()
    );

    let events = ledger.take_events();
    assert!(events.iter().any(|e| matches!(e, Event::PaymentRecorded { .. })));
    assert!(!events.iter().any(|e| matches!(e, Event::LoanCompleted { .. })));

    outage.set(false);
    let loan = ledger.refresh_status(opened.loan.id).unwrap();
    assert_eq!(loan.status, LoanStatus::Completed);
    assert!(ledger
        .take_events()
        .iter()
        .any(|e| matches!(e, Event::LoanCompleted { .. })));
}
