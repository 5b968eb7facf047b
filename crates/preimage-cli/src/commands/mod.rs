//! CLI command implementations.

pub mod attack;
pub mod common;
pub mod inspect;
pub mod version;
