//!
//! Transaction model, per-input signature hashing, signing and mass accounting.
//!

pub mod constants;
pub mod errors;
pub mod hashing;
pub mod mass;
pub mod network;
pub mod sign;
pub mod subnets;
pub mod tx;
