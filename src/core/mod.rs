pub mod harness;
pub mod shutdown;
pub mod transport;

pub use crate::utils::error::Result;
