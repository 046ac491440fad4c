use chrono::{Days, Months, NaiveDate};
use tracing::debug;

use crate::errors::{LedgerError, Result};
use crate::types::PaymentFrequency;

/// due date for installment `installment` (1-based) counted from `start`
///
/// Monthly steps are always taken from the start date, never chained, and a
/// day that does not exist in the target month is clamped to that month's
/// last day (Jan 31 + 1 month = Feb 28/29, + 2 months = Mar 31).
pub fn due_date(start: NaiveDate, installment: u32, frequency: PaymentFrequency) -> Result<NaiveDate> {
    let stepped = match frequency {
        PaymentFrequency::Monthly => start.checked_add_months(Months::new(installment)),
        PaymentFrequency::Weekly => start.checked_add_days(Days::new(7 * u64::from(installment))),
        PaymentFrequency::Daily => start.checked_add_days(Days::new(u64::from(installment))),
    };

    stepped.ok_or_else(|| LedgerError::CalculationError {
        message: format!(
            "due date for installment {} from {} is out of range",
            installment, start
        ),
    })
}

/// ordered due dates for installments 1..=installments
pub fn generate_due_dates(
    start: NaiveDate,
    installments: u32,
    frequency: PaymentFrequency,
) -> Result<Vec<NaiveDate>> {
    let dates = (1..=installments)
        .map(|i| due_date(start, i, frequency))
        .collect::<Result<Vec<_>>>()?;

    debug!(%start, installments, %frequency, "due dates sequenced");

    Ok(dates)
}

/// ISO 8601 calendar date (YYYY-MM-DD)
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
