use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::types::{InterestMethod, PaymentFrequency};

/// offset between Gregorian and Buddhist-era years
pub const BUDDHIST_ERA_OFFSET: i32 = 543;

/// ledger configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// appended after formatted amounts
    pub currency_suffix: String,
    /// show years in the Buddhist era
    pub buddhist_era: bool,
    /// page the customer QR code points at
    pub customer_view_base_url: String,
    pub contract_prefix: String,
    pub receipt_prefix: String,
    pub default_frequency: PaymentFrequency,
    pub default_method: InterestMethod,
}

impl LedgerConfig {
    /// thai lender defaults
    pub fn thai() -> Self {
        Self {
            currency_suffix: "บาท".to_string(),
            buddhist_era: true,
            customer_view_base_url: "https://example.com/customer-view.html".to_string(),
            contract_prefix: "LN".to_string(),
            receipt_prefix: "RC".to_string(),
            default_frequency: PaymentFrequency::Monthly,
            default_method: InterestMethod::Reducing,
        }
    }

    /// gregorian years and an ISO currency code
    pub fn international() -> Self {
        Self {
            currency_suffix: "THB".to_string(),
            buddhist_era: false,
            ..Self::thai()
        }
    }

    /// load from JSON; missing fields take the thai defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// calendar year as displayed to users
    pub fn display_year(&self, year: i32) -> i32 {
        if self.buddhist_era {
            year + BUDDHIST_ERA_OFFSET
        } else {
            year
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::thai()
    }
}
