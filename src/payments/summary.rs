use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::payments::record::PaymentRecord;
use crate::types::PaymentStatus;

/// reconciliation totals for one loan's installments
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub total_installments: u32,
    pub paid_count: u32,
    pub overdue_count: u32,
    pub pending_count: u32,
    pub total_paid: Money,
    pub total_due: Money,
    /// may go negative when the borrower overpaid
    pub remaining_amount: Money,
    pub progress_percent: u32,
}

impl PaymentSummary {
    /// single pass over the current installment records
    pub fn from_records(records: &[PaymentRecord]) -> Self {
        let mut summary = PaymentSummary {
            total_installments: records.len() as u32,
            ..PaymentSummary::default()
        };

        for record in records {
            match record.status {
                PaymentStatus::Paid => summary.paid_count += 1,
                PaymentStatus::Overdue => summary.overdue_count += 1,
                PaymentStatus::Pending => summary.pending_count += 1,
                _ => {}
            }
            summary.total_paid += record.paid_or_zero();
            summary.total_due += record.total_amount;
        }

        summary.remaining_amount = summary.total_due - summary.total_paid;
        summary.progress_percent = progress_percent(summary.paid_count, summary.total_installments);
        summary
    }

    pub fn is_settled(&self) -> bool {
        self.total_installments > 0 && self.paid_count == self.total_installments
    }
}

/// paid share of installments as a whole percent, half rounded up
fn progress_percent(paid: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let percent = Decimal::from(paid) * Decimal::ONE_HUNDRED / Decimal::from(total);
    percent
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(100)
}
