//! Salary engines: CTC decomposition into take-home pay and deductions.

pub mod breakdown;
