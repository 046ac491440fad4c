pub mod config;
pub mod decimal;
pub mod documents;
pub mod errors;
pub mod events;
pub mod format;
pub mod interest;
pub mod ledger;
pub mod loan;
pub mod payments;
pub mod store;
pub mod types;

// re-export key types
pub use config::LedgerConfig;
pub use decimal::{round_money, Money, PercentRate, MONEY_DP};
pub use documents::{QrPayload, ReceiptDocument, ScheduleDocument, SummaryDocument};
pub use errors::{LedgerError, Result};
pub use events::{Event, EventStore};
pub use format::{
    customer_view_url, format_currency, format_date, format_date_long, frequency_label,
    method_label, StatusStyle, StatusToken,
};
pub use interest::{periodic_rate, periods_to_years};
pub use ledger::{LoanApplication, LoanApplicationBuilder, LoanLedger, OpenedLoan};
pub use loan::{generate_reference, LoanPatch, LoanRecord, NewLoan};
pub use payments::{
    calculate_emi, generate_due_dates, AmortizationCalculator, LoanSchedule, LoanTerms,
    NewPaymentRecord, PaymentPatch, PaymentReceipt, PaymentRecord, PaymentSummary,
    ScheduleEntry, SchedulePlan,
};
pub use store::{InMemoryStore, LoanStore};
pub use types::{
    InterestMethod, LoanId, LoanStatus, PaymentFrequency, PaymentId, PaymentStatus,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
