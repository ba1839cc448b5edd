//!
//! Re-exports of the most commonly used types in this crate.
//!

pub use crate::error::Error;
pub use crate::keypair::*;
pub use crate::privatekey::*;
pub use crate::publickey::*;
