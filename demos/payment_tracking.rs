/// payment tracking - record payments, flag overdue installments and reconcile
use loan_ledger_rs::chrono::{Duration, NaiveDate, TimeZone, Utc};
use loan_ledger_rs::{
    format_currency, InMemoryStore, InterestMethod, LedgerConfig, LoanApplication, LoanLedger,
    Money, PaymentFrequency, PaymentReceipt, PercentRate, SafeTimeProvider, TimeSource,
};
use tracing_subscriber::prelude::*;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let opened_at = Utc
        .with_ymd_and_hms(2025, 1, 31, 9, 0, 0)
        .single()
        .ok_or("bad timestamp")?;
    let time = SafeTimeProvider::new(TimeSource::Test(opened_at));

    let config = LedgerConfig::thai();
    let mut ledger = LoanLedger::new(InMemoryStore::with_time(&time), config.clone());

    // weekly flat-rate loan starting on a month end
    let application = LoanApplication::builder()
        .customer("Malee Srisuk")
        .phone("0891234567")
        .amount(Money::from_major(52_000))
        .rate(PercentRate::from_percentage(10))
        .installments(26)
        .frequency(PaymentFrequency::Weekly)
        .method(InterestMethod::Flat)
        .start_date(NaiveDate::from_ymd_opt(2025, 1, 31).ok_or("bad start date")?)
        .build()?;

    let opened = ledger.open_loan(application)?;
    let loan_id = opened.loan.id;

    // first three weeks: on time, partial, skipped
    let first = &opened.payments[0];
    ledger.record_payment(
        first.id,
        PaymentReceipt::new(first.total_amount, first.due_date).method("โอนเงิน"),
    )?;
    let second = &opened.payments[1];
    ledger.record_payment(
        second.id,
        PaymentReceipt::new(Money::from_major(1_000), second.due_date).method("เงินสด"),
    )?;

    let as_of = opened.payments[2].due_date + Duration::days(1);
    let flagged = ledger.mark_overdue(loan_id, as_of)?;
    println!("overdue installments: {}", flagged.len());

    let summary = ledger.payment_summary(loan_id)?;
    println!(
        "paid {}/{} ({}%), paid {}, remaining {}",
        summary.paid_count,
        summary.total_installments,
        summary.progress_percent,
        format_currency(summary.total_paid, &config),
        format_currency(summary.remaining_amount, &config),
    );

    println!("{}", ledger.receipt_document(first.id)?.to_json_pretty()?);
    println!("{}", ledger.summary_document(loan_id)?.to_json_pretty()?);
    println!("{}", ledger.qr_payload(loan_id)?.to_json_pretty()?);

    for event in ledger.take_events() {
        println!("{:?}", event);
    }

    Ok(())
}
