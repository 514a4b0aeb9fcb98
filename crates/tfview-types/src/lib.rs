pub mod addr;
pub mod diagnostic;
pub mod error;
pub mod hook;
pub mod output;
pub mod value;

pub use addr::*;
pub use diagnostic::*;
pub use error::{Error, Result};
pub use hook::*;
pub use output::*;
pub use value::*;
