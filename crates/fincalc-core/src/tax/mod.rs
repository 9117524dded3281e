//! Income-tax engines: slab configuration and the progressive computation.

pub mod income_tax;
pub mod slabs;
