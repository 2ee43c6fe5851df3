pub mod config;
pub mod error;
pub mod value;

pub use config::{ClockKind, Config};
pub use error::*;
pub use value::*;
