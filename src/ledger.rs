use chrono::{Datelike, NaiveDate};
use hourglass_rs::{SafeTimeProvider, TimeSource};
use tracing::{info, warn};

use crate::config::LedgerConfig;
use crate::documents::{QrPayload, ReceiptDocument, ScheduleDocument, SummaryDocument};
use crate::decimal::{Money, PercentRate};
use crate::errors::{LedgerError, Result};
use crate::events::{Event, EventStore};
use crate::loan::{generate_reference, LoanPatch, LoanRecord, NewLoan};
use crate::payments::{
    LoanSchedule, LoanTerms, PaymentPatch, PaymentReceipt, PaymentRecord, PaymentSummary,
    SchedulePlan,
};
use crate::store::LoanStore;
use crate::types::{InterestMethod, LoanId, LoanStatus, PaymentFrequency, PaymentId, PaymentStatus};

/// request to open a loan
#[derive(Debug, Clone, PartialEq)]
pub struct LoanApplication {
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub amount: Money,
    pub annual_rate: PercentRate,
    pub installments: u32,
    pub frequency: Option<PaymentFrequency>,
    pub method: Option<InterestMethod>,
    pub start_date: Option<NaiveDate>,
    pub contract_number: Option<String>,
}

impl LoanApplication {
    pub fn builder() -> LoanApplicationBuilder {
        LoanApplicationBuilder::new()
    }

    /// terms with unset tokens taken from the config defaults
    pub fn terms(&self, config: &LedgerConfig) -> LoanTerms {
        LoanTerms::new(
            self.amount,
            self.annual_rate,
            self.installments,
            self.frequency.unwrap_or(config.default_frequency),
            self.method.unwrap_or(config.default_method),
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoanApplicationBuilder {
    customer_name: Option<String>,
    customer_phone: Option<String>,
    amount: Option<Money>,
    annual_rate: Option<PercentRate>,
    installments: Option<u32>,
    frequency: Option<PaymentFrequency>,
    method: Option<InterestMethod>,
    start_date: Option<NaiveDate>,
    contract_number: Option<String>,
}

impl LoanApplicationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn customer(mut self, name: impl Into<String>) -> Self {
        self.customer_name = Some(name.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.customer_phone = Some(phone.into());
        self
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn rate(mut self, rate: PercentRate) -> Self {
        self.annual_rate = Some(rate);
        self
    }

    pub fn installments(mut self, installments: u32) -> Self {
        self.installments = Some(installments);
        self
    }

    pub fn frequency(mut self, frequency: PaymentFrequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    pub fn method(mut self, method: InterestMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// use a fixed contract number instead of generating one
    pub fn contract_number(mut self, contract_number: impl Into<String>) -> Self {
        self.contract_number = Some(contract_number.into());
        self
    }

    pub fn build(self) -> Result<LoanApplication> {
        let customer_name = self
            .customer_name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| LedgerError::invalid_terms("customer name required"))?;

        let amount = self
            .amount
            .ok_or_else(|| LedgerError::invalid_terms("amount required"))?;

        let annual_rate = self
            .annual_rate
            .ok_or_else(|| LedgerError::invalid_terms("rate required"))?;

        let installments = self
            .installments
            .ok_or_else(|| LedgerError::invalid_terms("installment count required"))?;

        Ok(LoanApplication {
            customer_name,
            customer_phone: self.customer_phone,
            amount,
            annual_rate,
            installments,
            frequency: self.frequency,
            method: self.method,
            start_date: self.start_date,
            contract_number: self.contract_number,
        })
    }
}

/// loan opened together with its persisted installments
#[derive(Debug, Clone, PartialEq)]
pub struct OpenedLoan {
    pub loan: LoanRecord,
    pub schedule: LoanSchedule,
    pub payments: Vec<PaymentRecord>,
}

/// loan book service over a record store
///
/// events accumulate until drained with [`LoanLedger::take_events`].
pub struct LoanLedger<S: LoanStore> {
    store: S,
    config: LedgerConfig,
    events: EventStore,
}

impl<S: LoanStore> LoanLedger<S> {
    pub fn new(store: S, config: LedgerConfig) -> Self {
        Self {
            store,
            config,
            events: EventStore::new(),
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn events(&self) -> &EventStore {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }

    /// open a loan and persist its installment schedule
    ///
    /// A loan without a start date starts today (system time). If writing the
    /// installments fails, the loan row is cancelled and the write error is
    /// returned.
    pub fn open_loan(&mut self, application: LoanApplication) -> Result<OpenedLoan> {
        let terms = application.terms(&self.config);
        let start_date = application.start_date.unwrap_or_else(today);

        let plan = SchedulePlan::prepare(&terms, start_date).inspect_err(|e| {
            warn!(customer = %application.customer_name, error = %e, "loan application rejected");
        })?;

        let contract_number = application.contract_number.clone().unwrap_or_else(|| {
            generate_reference(
                &self.config.contract_prefix,
                self.config.display_year(start_date.year()),
            )
        });

        let loan = self.store.create_loan(NewLoan::from_schedule(
            contract_number,
            application.customer_name,
            application.customer_phone,
            start_date,
            plan.schedule(),
        ))?;

        let first_due_date = plan.due_dates().first().copied();
        let last_due_date = plan.due_dates().last().copied();

        let (schedule, payments) = match plan.persist(&mut self.store, loan.id) {
            Ok(persisted) => persisted,
            Err(e) => {
                warn!(loan_id = %loan.id, error = %e, "installment insert failed, cancelling loan");
                if let Err(cancel_error) = self.store.cancel_loan(loan.id) {
                    warn!(loan_id = %loan.id, error = %cancel_error, "could not cancel orphaned loan");
                }
                return Err(e);
            }
        };

        self.events.emit(Event::LoanOpened {
            loan_id: loan.id,
            contract_number: loan.contract_number.clone(),
            customer_name: loan.customer_name.clone(),
            amount: loan.loan_amount,
            timestamp: loan.created_at,
        });
        self.events.emit(Event::ScheduleGenerated {
            loan_id: loan.id,
            method: schedule.method,
            frequency: schedule.frequency,
            annual_rate: schedule.annual_rate,
            installments: schedule.installments,
            periodic_payment: schedule.periodic_payment,
            total_interest: schedule.total_interest,
        });
        self.events.emit(Event::PaymentScheduleCreated {
            loan_id: loan.id,
            installments: payments.len() as u32,
            first_due_date,
            last_due_date,
        });

        info!(
            loan_id = %loan.id,
            contract = %loan.contract_number,
            amount = %loan.loan_amount,
            installments = loan.installments,
            "loan opened"
        );

        Ok(OpenedLoan {
            loan,
            schedule,
            payments,
        })
    }

    /// record money received against one installment
    pub fn record_payment(
        &mut self,
        payment_id: PaymentId,
        receipt: PaymentReceipt,
    ) -> Result<PaymentRecord> {
        let payment = self.store.get_payment(payment_id)?;
        let loan = self.store.get_loan(payment.loan_id)?;

        if loan.status == LoanStatus::Cancelled {
            warn!(loan_id = %loan.id, %payment_id, "payment against cancelled loan rejected");
            return Err(LedgerError::InvalidState {
                current: loan.status.to_string(),
                expected: "active".to_string(),
            });
        }

        let receipt = match receipt.receipt_number {
            Some(_) => receipt,
            None => {
                let number = generate_reference(
                    &self.config.receipt_prefix,
                    self.config.display_year(receipt.paid_date.year()),
                );
                receipt.receipt_number(number)
            }
        };

        let patch = payment.settle(&receipt).inspect_err(|e| {
            warn!(%payment_id, error = %e, "payment rejected");
        })?;
        let updated = self.store.update_payment(payment_id, patch)?;

        self.events.emit(Event::PaymentRecorded {
            loan_id: loan.id,
            payment_id,
            installment_number: updated.installment_number,
            amount: receipt.amount,
            paid_total: updated.paid_or_zero(),
            status: updated.status.clone(),
            paid_date: receipt.paid_date,
        });

        info!(
            loan_id = %loan.id,
            installment = updated.installment_number,
            amount = %receipt.amount,
            status = %updated.status,
            "payment recorded"
        );

        // the payment is already stored; a failed completion is retried by refresh_status
        if loan.is_active() {
            if let Err(e) = self.complete_if_settled(&loan) {
                warn!(loan_id = %loan.id, error = %e, "loan completion check failed");
            }
        }

        Ok(updated)
    }

    /// complete an active loan whose installments are all paid
    pub fn refresh_status(&mut self, loan_id: LoanId) -> Result<LoanRecord> {
        let loan = self.store.get_loan(loan_id)?;
        if loan.is_active() {
            self.complete_if_settled(&loan)?;
        }
        self.store.get_loan(loan_id)
    }

    /// record a payment dated today (system time)
    pub fn record_payment_now(
        &mut self,
        payment_id: PaymentId,
        amount: Money,
        method: Option<String>,
    ) -> Result<PaymentRecord> {
        let mut receipt = PaymentReceipt::new(amount, today());
        if let Some(method) = method {
            receipt = receipt.method(method);
        }
        self.record_payment(payment_id, receipt)
    }

    fn complete_if_settled(&mut self, loan: &LoanRecord) -> Result<()> {
        let payments = self.store.list_payments(loan.id)?;
        let mut live = payments
            .iter()
            .filter(|p| p.status != PaymentStatus::Cancelled)
            .peekable();

        if live.peek().is_none() || !live.all(|p| p.status == PaymentStatus::Paid) {
            return Ok(());
        }

        let completed = self
            .store
            .update_loan(loan.id, LoanPatch::status(LoanStatus::Completed))?;
        let total_paid: Money = payments.iter().map(PaymentRecord::paid_or_zero).sum();

        self.events.emit(Event::LoanCompleted {
            loan_id: loan.id,
            total_paid,
            timestamp: completed.updated_at,
        });

        info!(loan_id = %loan.id, total_paid = %total_paid, "loan completed");

        Ok(())
    }

    /// flag pending installments due before `as_of` as overdue
    pub fn mark_overdue(&mut self, loan_id: LoanId, as_of: NaiveDate) -> Result<Vec<PaymentRecord>> {
        let mut flagged = Vec::new();

        for payment in self.store.list_payments(loan_id)? {
            if !payment.is_overdue_on(as_of) {
                continue;
            }

            let updated = self
                .store
                .update_payment(payment.id, PaymentPatch::status(PaymentStatus::Overdue))?;

            self.events.emit(Event::PaymentMarkedOverdue {
                loan_id,
                payment_id: updated.id,
                installment_number: updated.installment_number,
                due_date: updated.due_date,
                as_of,
            });
            flagged.push(updated);
        }

        if !flagged.is_empty() {
            info!(%loan_id, %as_of, count = flagged.len(), "installments marked overdue");
        }

        Ok(flagged)
    }

    /// reconciliation totals from the current installment records
    pub fn payment_summary(&self, loan_id: LoanId) -> Result<PaymentSummary> {
        let payments = self.store.list_payments(loan_id)?;
        Ok(PaymentSummary::from_records(&payments))
    }

    /// theoretical schedule regenerated from the stored terms
    pub fn schedule(&self, loan_id: LoanId) -> Result<LoanSchedule> {
        let loan = self.store.get_loan(loan_id)?;
        LoanSchedule::generate(&loan.terms())
    }

    /// soft-cancel a loan; its installments are left as they are
    pub fn cancel_loan(&mut self, loan_id: LoanId, reason: impl Into<String>) -> Result<LoanRecord> {
        let reason = reason.into();
        let loan = self.store.cancel_loan(loan_id)?;

        self.events.emit(Event::LoanCancelled {
            loan_id,
            reason: reason.clone(),
            timestamp: loan.updated_at,
        });

        info!(%loan_id, reason = %reason, "loan cancelled");

        Ok(loan)
    }

    pub fn loan(&self, loan_id: LoanId) -> Result<LoanRecord> {
        self.store.get_loan(loan_id)
    }

    pub fn find_by_contract(&self, contract_number: &str) -> Result<LoanRecord> {
        self.store.get_loan_by_contract(contract_number)
    }

    /// all loans, newest first
    pub fn list_loans(&self) -> Result<Vec<LoanRecord>> {
        self.store.list_loans()
    }

    /// installments ordered by number
    pub fn payments(&self, loan_id: LoanId) -> Result<Vec<PaymentRecord>> {
        self.store.list_payments(loan_id)
    }

    pub fn schedule_document(&self, loan_id: LoanId) -> Result<ScheduleDocument> {
        let loan = self.store.get_loan(loan_id)?;
        ScheduleDocument::build(&loan, &self.config)
    }

    pub fn receipt_document(&self, payment_id: PaymentId) -> Result<ReceiptDocument> {
        let payment = self.store.get_payment(payment_id)?;
        let loan = self.store.get_loan(payment.loan_id)?;
        ReceiptDocument::build(&loan, &payment, &self.config)
    }

    pub fn summary_document(&self, loan_id: LoanId) -> Result<SummaryDocument> {
        let loan = self.store.get_loan(loan_id)?;
        let payments = self.store.list_payments(loan_id)?;
        Ok(SummaryDocument::build(&loan, &payments, &self.config))
    }

    pub fn qr_payload(&self, loan_id: LoanId) -> Result<QrPayload> {
        let loan = self.store.get_loan(loan_id)?;
        Ok(QrPayload::for_contract(&loan.contract_number, &self.config))
    }
}

fn today() -> NaiveDate {
    SafeTimeProvider::new(TimeSource::System).now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ledger() -> LoanLedger<InMemoryStore<'static>> {
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap(),
        ));
        LoanLedger::new(InMemoryStore::new(time), LedgerConfig::thai())
    }

    fn application(installments: u32) -> LoanApplication {
        LoanApplication::builder()
            .customer("Somchai Jaidee")
            .phone("0812345678")
            .amount(Money::from_major(100_000))
            .rate(PercentRate::from_percentage(12))
            .installments(installments)
            .start_date(date(2025, 1, 15))
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_requires_core_fields() {
        let missing_amount = LoanApplication::builder()
            .customer("A")
            .rate(PercentRate::from_percentage(5))
            .installments(3)
            .build();
        assert!(matches!(missing_amount, Err(LedgerError::InvalidTerms { .. })));

        let blank_name = LoanApplication::builder()
            .customer("  ")
            .amount(Money::from_major(1))
            .rate(PercentRate::ZERO)
            .installments(1)
            .build();
        assert!(matches!(blank_name, Err(LedgerError::InvalidTerms { .. })));
    }

    #[test]
    fn test_terms_fall_back_to_config_defaults() {
        let mut config = LedgerConfig::thai();
        config.default_method = InterestMethod::Flat;
        config.default_frequency = PaymentFrequency::Weekly;

        let terms = application(12).terms(&config);
        assert_eq!(terms.method, InterestMethod::Flat);
        assert_eq!(terms.frequency, PaymentFrequency::Weekly);
    }

    #[test]
    fn test_open_loan_persists_schedule() {
        let mut ledger = ledger();
        let opened = ledger.open_loan(application(12)).unwrap();

        assert!(opened.loan.contract_number.starts_with("LN-2568-"));
        assert_eq!(opened.loan.status, LoanStatus::Active);
        assert_eq!(opened.loan.monthly_payment, Money::from_str_exact("8884.88").unwrap());
        assert_eq!(opened.payments.len(), 12);
        assert_eq!(opened.payments[0].due_date, date(2025, 2, 15));
        assert_eq!(opened.payments[0].interest_amount, Money::from_major(1_000));

        let events = ledger.take_events();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], Event::LoanOpened { .. }));
        assert!(matches!(events[1], Event::ScheduleGenerated { .. }));
        assert!(matches!(
            events[2],
            Event::PaymentScheduleCreated { installments: 12, .. }
        ));
    }

    #[test]
    fn test_open_loan_rejects_invalid_terms_without_writes() {
        let mut ledger = ledger();
        let result = ledger.open_loan(application(0));

        assert!(matches!(result, Err(LedgerError::InvalidTerms { .. })));
        assert_eq!(ledger.store().loan_count(), 0);
        assert!(ledger.events().is_empty());
    }

    #[test]
    fn test_supplied_contract_number_is_kept() {
        let mut ledger = ledger();
        let mut app = application(3);
        app.contract_number = Some("LN-2568-55555".to_string());

        let opened = ledger.open_loan(app).unwrap();
        assert_eq!(
            ledger.find_by_contract("LN-2568-55555").unwrap().id,
            opened.loan.id
        );
    }

    #[test]
    fn test_paying_every_installment_completes_loan() {
        let mut ledger = ledger();
        let opened = ledger.open_loan(application(3)).unwrap();
        ledger.take_events();

        for payment in &opened.payments {
            let receipt = PaymentReceipt::new(payment.total_amount, payment.due_date).method("transfer");
            let updated = ledger.record_payment(payment.id, receipt).unwrap();
            assert_eq!(updated.status, PaymentStatus::Paid);
            assert!(updated.receipt_number.as_deref().unwrap_or("").starts_with("RC-2568-"));
        }

        let loan = ledger.loan(opened.loan.id).unwrap();
        assert_eq!(loan.status, LoanStatus::Completed);

        let summary = ledger.payment_summary(loan.id).unwrap();
        assert_eq!(summary.progress_percent, 100);
        assert!(summary.is_settled());

        let events = ledger.take_events();
        assert!(matches!(events.last(), Some(Event::LoanCompleted { .. })));
    }

    #[test]
    fn test_partial_payment_keeps_loan_active() {
        let mut ledger = ledger();
        let opened = ledger.open_loan(application(2)).unwrap();
        let first = &opened.payments[0];

        let updated = ledger
            .record_payment(first.id, PaymentReceipt::new(Money::from_major(100), first.due_date))
            .unwrap();

        assert_eq!(updated.status, PaymentStatus::Partial);
        assert_eq!(updated.paid_amount, Some(Money::from_major(100)));
        assert!(ledger.loan(opened.loan.id).unwrap().is_active());
    }

    #[test]
    fn test_mark_overdue_only_touches_past_due_pending() {
        let mut ledger = ledger();
        let opened = ledger.open_loan(application(4)).unwrap();
        let first = &opened.payments[0];
        ledger
            .record_payment(first.id, PaymentReceipt::new(first.total_amount, first.due_date))
            .unwrap();
        ledger.take_events();

        // installments 1..3 are due before April 16th; the first is paid
        let flagged = ledger.mark_overdue(opened.loan.id, date(2025, 4, 16)).unwrap();
        let numbers: Vec<u32> = flagged.iter().map(|p| p.installment_number).collect();
        assert_eq!(numbers, vec![2, 3]);

        let summary = ledger.payment_summary(opened.loan.id).unwrap();
        assert_eq!(summary.paid_count, 1);
        assert_eq!(summary.overdue_count, 2);
        assert_eq!(summary.pending_count, 1);
        assert_eq!(summary.progress_percent, 25);

        assert_eq!(ledger.take_events().len(), 2);
        assert!(ledger.mark_overdue(opened.loan.id, date(2025, 4, 16)).unwrap().is_empty());
    }

    #[test]
    fn test_record_payment_now_dates_today() {
        let mut ledger = ledger();
        let opened = ledger.open_loan(application(2)).unwrap();
        let first = &opened.payments[0];

        let updated = ledger
            .record_payment_now(first.id, first.total_amount, Some("cash".to_string()))
            .unwrap();

        assert_eq!(updated.status, PaymentStatus::Paid);
        assert_eq!(updated.paid_date, Some(today()));
        assert_eq!(updated.payment_method.as_deref(), Some("cash"));
    }

    #[test]
    fn test_overdue_installment_can_still_be_paid() {
        let mut ledger = ledger();
        let opened = ledger.open_loan(application(1)).unwrap();
        let only = &opened.payments[0];
        ledger.mark_overdue(opened.loan.id, only.due_date + Duration::days(3)).unwrap();

        let updated = ledger
            .record_payment(only.id, PaymentReceipt::new(only.total_amount, only.due_date + Duration::days(3)))
            .unwrap();

        assert_eq!(updated.status, PaymentStatus::Paid);
        assert_eq!(ledger.loan(opened.loan.id).unwrap().status, LoanStatus::Completed);
    }

    #[test]
    fn test_cancelled_loan_rejects_payments() {
        let mut ledger = ledger();
        let opened = ledger.open_loan(application(2)).unwrap();
        let cancelled = ledger.cancel_loan(opened.loan.id, "terms changed").unwrap();
        assert_eq!(cancelled.status, LoanStatus::Cancelled);

        let first = &opened.payments[0];
        let result = ledger.record_payment(first.id, PaymentReceipt::new(first.total_amount, first.due_date));
        assert!(matches!(result, Err(LedgerError::InvalidState { .. })));

        // the loan row stays readable after a soft delete
        assert_eq!(ledger.list_loans().unwrap().len(), 1);
        assert_eq!(ledger.payments(opened.loan.id).unwrap().len(), 2);
    }

    #[test]
    fn test_schedule_regenerates_from_stored_terms() {
        let mut ledger = ledger();
        let opened = ledger.open_loan(application(12)).unwrap();

        assert_eq!(ledger.schedule(opened.loan.id).unwrap(), opened.schedule);
    }

    #[test]
    fn test_documents_read_current_state() {
        let mut ledger = ledger();
        let opened = ledger.open_loan(application(3)).unwrap();
        let first = &opened.payments[0];
        ledger
            .record_payment(
                first.id,
                PaymentReceipt::new(first.total_amount, first.due_date).receipt_number("RC-2568-00042"),
            )
            .unwrap();
        ledger.take_events();

        let schedule = ledger.schedule_document(opened.loan.id).unwrap();
        assert_eq!(schedule.rows.len(), 3);
        assert_eq!(schedule.header.contract_number, opened.loan.contract_number);

        let receipt = ledger.receipt_document(first.id).unwrap();
        assert_eq!(receipt.receipt_number, "RC-2568-00042");
        assert_eq!(receipt.installment_number, 1);

        let summary = ledger.summary_document(opened.loan.id).unwrap();
        assert_eq!(summary.boxes.paid, "1/3");
        assert_eq!(summary.rows[0].status.label, "จ่ายแล้ว");

        let qr = ledger.qr_payload(opened.loan.id).unwrap();
        assert_eq!(qr.file_name, format!("QR_{}.png", opened.loan.contract_number));
        assert!(ledger.events().is_empty());
    }

    #[test]
    fn test_events_accumulate_until_taken() {
        let mut ledger = ledger();
        let opened = ledger.open_loan(application(2)).unwrap();
        let first = &opened.payments[0];
        let second = &opened.payments[1];

        let opening_events = ledger.events().len();
        assert!(opening_events > 0);

        ledger
            .record_payment(first.id, PaymentReceipt::new(first.total_amount, first.due_date))
            .unwrap();
        assert_eq!(ledger.events().len(), opening_events + 1);

        let drained = ledger.take_events();
        assert_eq!(drained.len(), opening_events + 1);
        assert!(ledger.events().is_empty());

        ledger
            .record_payment(second.id, PaymentReceipt::new(second.total_amount, second.due_date))
            .unwrap();
        let drained = ledger.take_events();
        assert_eq!(drained.len(), 2);
        assert!(matches!(drained[0], Event::PaymentRecorded { installment_number: 2, .. }));
        assert!(matches!(drained[1], Event::LoanCompleted { .. }));
    }

    #[test]
    fn test_unknown_ids_are_not_found() {
        let mut ledger = ledger();
        let missing = uuid::Uuid::new_v4();

        assert!(matches!(ledger.payment_summary(missing), Err(LedgerError::NotFound { .. })));
        assert!(matches!(ledger.schedule(missing), Err(LedgerError::NotFound { .. })));
        assert!(matches!(
            ledger.record_payment(missing, PaymentReceipt::new(Money::from_major(1), date(2025, 1, 1))),
            Err(LedgerError::NotFound { .. })
        ));
        assert!(matches!(ledger.find_by_contract("LN-0000-00000"), Err(LedgerError::NotFound { .. })));
    }
}
