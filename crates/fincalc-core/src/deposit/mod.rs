//! Fixed-deposit engines.

pub mod compound;
