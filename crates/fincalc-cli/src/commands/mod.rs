pub mod deposit;
pub mod investment;
pub mod lifecycle;
pub mod loan;
pub mod salary;
pub mod tax;
