pub mod error;
pub mod types;

#[cfg(feature = "loan")]
pub mod loan;

#[cfg(feature = "deposit")]
pub mod deposit;

#[cfg(feature = "investment")]
pub mod investment;

#[cfg(feature = "tax")]
pub mod tax;

#[cfg(feature = "salary")]
pub mod salary;

#[cfg(feature = "lifecycle")]
pub mod lifecycle;

pub use error::FinCalcError;
pub use types::*;

/// Standard result type for all fincalc operations
pub type FinCalcResult<T> = Result<T, FinCalcError>;
