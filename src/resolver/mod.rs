//! Build resolver module

mod build;
mod engine;
mod options;
mod session;


pub use build::*;
pub use engine::*;
pub use options::*;
pub use session::*;
