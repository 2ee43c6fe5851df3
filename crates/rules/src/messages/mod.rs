//! Message rendering: template catalog and field labels.

mod catalog;
mod labels;

pub use catalog::*;
pub use labels::*;
