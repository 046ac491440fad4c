pub mod memory;

use crate::errors::Result;
use crate::loan::{LoanPatch, LoanRecord, NewLoan};
use crate::payments::{NewPaymentRecord, PaymentPatch, PaymentRecord};
use crate::types::{LoanId, LoanStatus, PaymentId};

pub use memory::InMemoryStore;

/// record store holding loans and their installments
///
/// Implementations own id assignment and `created_at`/`updated_at` stamps.
/// Lookups of missing rows fail with `NotFound`; every other backend error
/// surfaces as `PersistenceFailure`.
pub trait LoanStore {
    /// all loans, newest first
    fn list_loans(&self) -> Result<Vec<LoanRecord>>;

    fn get_loan(&self, id: LoanId) -> Result<LoanRecord>;

    fn get_loan_by_contract(&self, contract_number: &str) -> Result<LoanRecord>;

    fn create_loan(&mut self, loan: NewLoan) -> Result<LoanRecord>;

    fn update_loan(&mut self, id: LoanId, patch: LoanPatch) -> Result<LoanRecord>;

    /// soft delete
    fn cancel_loan(&mut self, id: LoanId) -> Result<LoanRecord> {
        self.update_loan(id, LoanPatch::status(LoanStatus::Cancelled))
    }

    /// installments of a loan ordered by installment number
    fn list_payments(&self, loan_id: LoanId) -> Result<Vec<PaymentRecord>>;

    fn get_payment(&self, id: PaymentId) -> Result<PaymentRecord>;

    /// insert every record or none of them
    fn insert_payments(&mut self, payments: Vec<NewPaymentRecord>) -> Result<Vec<PaymentRecord>>;

    fn update_payment(&mut self, id: PaymentId, patch: PaymentPatch) -> Result<PaymentRecord>;
}
