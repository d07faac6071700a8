pub mod amortization;
pub mod error;
pub mod types;

#[cfg(feature = "investment")]
pub mod investment;

#[cfg(feature = "rates")]
pub mod rates;

#[cfg(feature = "intent")]
pub mod intent;

pub use error::RealtyFinanceError;
pub use types::*;

/// Standard result type for all realty-finance operations
pub type RealtyFinanceResult<T> = Result<T, RealtyFinanceError>;
