use rust_decimal::Decimal;

use crate::decimal::PercentRate;
use crate::errors::{LedgerError, Result};
use crate::types::PaymentFrequency;

/// annual percentage rate converted to the rate for one payment period
pub fn periodic_rate(annual_rate: PercentRate, frequency: PaymentFrequency) -> Decimal {
    annual_rate.as_fraction() / Decimal::from(frequency.periods_per_year())
}

/// length of the term in years for a number of installments
pub fn periods_to_years(installments: u32, frequency: PaymentFrequency) -> Decimal {
    Decimal::from(installments) / Decimal::from(frequency.periods_per_year())
}

/// (1 + rate)^-k for every k in 0..=periods
///
/// each factor is the previous one divided by 1 + rate, so the sequence
/// shrinks toward zero and cannot overflow however large the rate or term.
pub fn discount_factors(rate: Decimal, periods: u32) -> Result<Vec<Decimal>> {
    let base = Decimal::ONE + rate;
    let mut factors = Vec::with_capacity(periods as usize + 1);
    let mut factor = Decimal::ONE;
    factors.push(factor);
    for _ in 0..periods {
        factor = factor
            .checked_div(base)
            .ok_or_else(|| LedgerError::CalculationError {
                message: format!("discount factor undefined at rate {} over {} periods", rate, periods),
            })?;
        factors.push(factor);
    }
    Ok(factors)
}
