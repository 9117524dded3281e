//! Loan engines: EMI and amortisation schedules.

pub mod amortization;
