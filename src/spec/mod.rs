pub mod defs;
pub mod isa;
pub mod types;
