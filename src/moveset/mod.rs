//! Move set assembly module

pub mod assembler;


pub use assembler::*;
