use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, PercentRate};
use crate::types::{InterestMethod, LoanId, PaymentFrequency, PaymentId, PaymentStatus};

/// all events that can be emitted by the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // lifecycle events
    LoanOpened {
        loan_id: LoanId,
        contract_number: String,
        customer_name: String,
        amount: Money,
        timestamp: DateTime<Utc>,
    },
    LoanCompleted {
        loan_id: LoanId,
        total_paid: Money,
        timestamp: DateTime<Utc>,
    },
    LoanCancelled {
        loan_id: LoanId,
        reason: String,
        timestamp: DateTime<Utc>,
    },

    // schedule events
    ScheduleGenerated {
        loan_id: LoanId,
        method: InterestMethod,
        frequency: PaymentFrequency,
        annual_rate: PercentRate,
        installments: u32,
        periodic_payment: Money,
        total_interest: Money,
    },
    PaymentScheduleCreated {
        loan_id: LoanId,
        installments: u32,
        first_due_date: Option<NaiveDate>,
        last_due_date: Option<NaiveDate>,
    },

    // payment events
    PaymentRecorded {
        loan_id: LoanId,
        payment_id: PaymentId,
        installment_number: u32,
        amount: Money,
        paid_total: Money,
        status: PaymentStatus,
        paid_date: NaiveDate,
    },
    PaymentMarkedOverdue {
        loan_id: LoanId,
        payment_id: PaymentId,
        installment_number: u32,
        due_date: NaiveDate,
        as_of: NaiveDate,
    },
}

/// event store for collecting events during operations
///
/// nothing is discarded on its own; the owner drains with `take_events`.
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
