use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decimal::{Money, PercentRate};
use crate::errors::{LedgerError, Result};
use crate::interest::{discount_factors, periodic_rate, periods_to_years};
use crate::types::{InterestMethod, PaymentFrequency};

/// loan terms a schedule is generated from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub annual_rate: PercentRate,
    pub installments: u32,
    pub frequency: PaymentFrequency,
    pub method: InterestMethod,
}

impl LoanTerms {
    pub fn new(
        principal: Money,
        annual_rate: PercentRate,
        installments: u32,
        frequency: PaymentFrequency,
        method: InterestMethod,
    ) -> Self {
        Self {
            principal,
            annual_rate,
            installments,
            frequency,
            method,
        }
    }

    /// reject terms no schedule can be computed for
    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(LedgerError::invalid_terms(format!(
                "principal must be positive, got {}",
                self.principal
            )));
        }
        if self.annual_rate.is_negative() {
            return Err(LedgerError::invalid_terms(format!(
                "annual rate must not be negative, got {}",
                self.annual_rate
            )));
        }
        if self.installments == 0 {
            return Err(LedgerError::invalid_terms("installment count must be at least 1"));
        }
        Ok(())
    }
}

/// one installment of a generated schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub installment: u32,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub payment: Money,
    pub remaining_balance: Money,
}

/// theoretical repayment schedule for a set of loan terms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanSchedule {
    pub method: InterestMethod,
    pub frequency: PaymentFrequency,
    pub principal: Money,
    pub annual_rate: PercentRate,
    pub installments: u32,
    pub periodic_payment: Money,
    pub total_interest: Money,
    pub total_amount: Money,
    pub entries: Vec<ScheduleEntry>,
}

impl LoanSchedule {
    /// validate terms and generate the schedule
    pub fn generate(terms: &LoanTerms) -> Result<Self> {
        terms.validate()?;

        let schedule = AmortizationCalculator::new(terms.method).calculate(
            terms.principal.as_decimal(),
            terms.annual_rate,
            terms.installments,
            terms.frequency,
        )?;

        debug!(
            method = %schedule.method,
            installments = schedule.installments,
            periodic_payment = %schedule.periodic_payment,
            total_interest = %schedule.total_interest,
            "schedule generated"
        );

        Ok(schedule)
    }

    /// get entry for a 1-based installment number
    pub fn get_entry(&self, installment: u32) -> Option<&ScheduleEntry> {
        installment
            .checked_sub(1)
            .and_then(|index| self.entries.get(index as usize))
    }

    /// sum of the rounded principal portions
    pub fn principal_repaid(&self) -> Money {
        self.entries.iter().map(|e| e.principal_portion).sum()
    }
}

/// schedule calculator for one interest method
pub struct AmortizationCalculator {
    method: InterestMethod,
}

impl AmortizationCalculator {
    pub fn new(method: InterestMethod) -> Self {
        Self { method }
    }

    /// calculate the schedule; terms are assumed validated
    pub fn calculate(
        &self,
        principal: Decimal,
        annual_rate: PercentRate,
        installments: u32,
        frequency: PaymentFrequency,
    ) -> Result<LoanSchedule> {
        if installments == 0 {
            return Err(LedgerError::invalid_terms("installment count must be at least 1"));
        }

        match self.method {
            InterestMethod::Reducing => {
                self.calculate_reducing(principal, annual_rate, installments, frequency)
            }
            InterestMethod::Flat => {
                self.calculate_flat(principal, annual_rate, installments, frequency)
            }
        }
    }

    /// reducing balance with equal installments (EMI)
    ///
    /// the balance after each installment is the present value of the
    /// installments still due, so rounding error never compounds and the
    /// last installment always closes the loan at zero.
    fn calculate_reducing(
        &self,
        principal: Decimal,
        annual_rate: PercentRate,
        installments: u32,
        frequency: PaymentFrequency,
    ) -> Result<LoanSchedule> {
        let rate = periodic_rate(annual_rate, frequency);
        let factors = if rate.is_zero() {
            Vec::new()
        } else {
            discount_factors(rate, installments)?
        };
        let emi = if rate.is_zero() {
            principal / Decimal::from(installments)
        } else {
            level_payment(principal, rate, &factors)?
        };

        let mut opening = principal;
        let mut total_interest = Decimal::ZERO;
        let mut entries = Vec::with_capacity(installments as usize);

        for installment in 1..=installments {
            let remaining = installments - installment;
            let closing = if rate.is_zero() {
                emi * Decimal::from(remaining)
            } else {
                emi.checked_mul(Decimal::ONE - factors[remaining as usize])
                    .and_then(|v| v.checked_div(rate))
                    .ok_or_else(|| LedgerError::calculation("outstanding balance overflow"))?
            };
            let interest = opening * rate;
            let principal_portion = opening - closing;
            total_interest = total_interest
                .checked_add(interest)
                .ok_or_else(|| LedgerError::calculation("total interest overflow"))?;

            entries.push(ScheduleEntry {
                installment,
                principal_portion: Money::from_decimal(principal_portion),
                interest_portion: Money::from_decimal(interest),
                payment: Money::from_decimal(emi),
                remaining_balance: Money::from_decimal(closing.max(Decimal::ZERO)),
            });
            opening = closing;
        }

        let total_amount = principal
            .checked_add(total_interest)
            .ok_or_else(|| LedgerError::calculation("total amount overflow"))?;

        Ok(LoanSchedule {
            method: InterestMethod::Reducing,
            frequency,
            principal: Money::from_decimal(principal),
            annual_rate,
            installments,
            periodic_payment: Money::from_decimal(emi),
            total_interest: Money::from_decimal(total_interest),
            total_amount: Money::from_decimal(total_amount),
            entries,
        })
    }

    /// flat rate: interest on the original principal spread evenly
    fn calculate_flat(
        &self,
        principal: Decimal,
        annual_rate: PercentRate,
        installments: u32,
        frequency: PaymentFrequency,
    ) -> Result<LoanSchedule> {
        let years = periods_to_years(installments, frequency);
        let n = Decimal::from(installments);

        let total_interest = principal
            .checked_mul(annual_rate.as_fraction())
            .and_then(|v| v.checked_mul(years))
            .ok_or_else(|| LedgerError::calculation("flat interest overflow"))?;
        let total_amount = principal
            .checked_add(total_interest)
            .ok_or_else(|| LedgerError::calculation("total amount overflow"))?;
        let periodic_payment = total_amount / n;
        let principal_per_period = principal / n;
        let interest_per_period = total_interest / n;

        let mut balance = principal;
        let mut entries = Vec::with_capacity(installments as usize);

        for installment in 1..=installments {
            balance -= principal_per_period;

            entries.push(ScheduleEntry {
                installment,
                principal_portion: Money::from_decimal(principal_per_period),
                interest_portion: Money::from_decimal(interest_per_period),
                payment: Money::from_decimal(periodic_payment),
                remaining_balance: Money::from_decimal(balance.max(Decimal::ZERO)),
            });
        }

        Ok(LoanSchedule {
            method: InterestMethod::Flat,
            frequency,
            principal: Money::from_decimal(principal),
            annual_rate,
            installments,
            periodic_payment: Money::from_decimal(periodic_payment),
            total_interest: Money::from_decimal(total_interest),
            total_amount: Money::from_decimal(total_amount),
            entries,
        })
    }
}

/// EMI = P * r / (1 - (1 + r)^-n), or P / n when r is zero
pub fn calculate_emi(principal: Decimal, rate: Decimal, installments: u32) -> Result<Decimal> {
    if installments == 0 {
        return Err(LedgerError::invalid_terms("installment count must be at least 1"));
    }
    if rate.is_zero() {
        return Ok(principal / Decimal::from(installments));
    }

    level_payment(principal, rate, &discount_factors(rate, installments)?)
}

/// level payment given the discount factors (1 + r)^-k for k in 0..=n
fn level_payment(principal: Decimal, rate: Decimal, factors: &[Decimal]) -> Result<Decimal> {
    let last = factors.last().copied().unwrap_or(Decimal::ONE);
    let annuity = Decimal::ONE - last;

    principal
        .checked_mul(rate)
        .and_then(|v| v.checked_div(annuity))
        .ok_or_else(|| {
            LedgerError::calculation(format!(
                "emi undefined for rate {} over {} periods",
                rate,
                factors.len().saturating_sub(1)
            ))
        })
}
