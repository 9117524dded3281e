//! Life-cycle engines: multi-year savings projection.

pub mod cashflow;
