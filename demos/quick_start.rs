/// quick start - open a loan and print its repayment table
use loan_ledger_rs::chrono::NaiveDate;
use loan_ledger_rs::{
    format_currency, InMemoryStore, InterestMethod, LedgerConfig, LoanApplication, LoanLedger,
    Money, PercentRate,
};
use tracing_subscriber::prelude::*;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = LedgerConfig::thai();
    let mut ledger = LoanLedger::new(InMemoryStore::system(), config.clone());

    // 100,000 baht at 12% over 12 months, reducing balance
    let application = LoanApplication::builder()
        .customer("Somchai Jaidee")
        .amount(Money::from_major(100_000))
        .rate(PercentRate::from_percentage(12))
        .installments(12)
        .method(InterestMethod::Reducing)
        .start_date(NaiveDate::from_ymd_opt(2025, 1, 5).ok_or("bad start date")?)
        .build()?;

    let opened = ledger.open_loan(application)?;

    println!("contract   : {}", opened.loan.contract_number);
    println!("payment    : {}", format_currency(opened.schedule.periodic_payment, &config));
    println!("interest   : {}", format_currency(opened.schedule.total_interest, &config));
    println!("total      : {}", format_currency(opened.schedule.total_amount, &config));

    println!("{}", ledger.schedule_document(opened.loan.id)?.to_json_pretty()?);

    Ok(())
}
