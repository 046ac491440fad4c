pub mod conversion;

pub use conversion::{discount_factors, periodic_rate, periods_to_years};
