//! Recurring-investment engines.

pub mod sip;
