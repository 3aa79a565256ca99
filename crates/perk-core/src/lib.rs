//! # perk-core
//!
//! Core types shared across the perk client crates:
//! - User identity and role normalization
//! - Derived session state

pub mod identity;
pub mod session;

pub use identity::{Role, User};
pub use session::SessionState;
