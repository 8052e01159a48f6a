//! Weighted picker module

pub mod selector;


pub use selector::*;
