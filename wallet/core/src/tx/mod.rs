//!
//! Transaction construction, fee estimation and signing.
//!

pub mod builder;
pub mod fees;
pub mod observer;

pub use self::builder::*;
pub use self::fees::*;
pub use self::observer::*;
