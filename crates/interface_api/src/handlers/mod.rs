//! Request handlers

pub mod claims;
pub mod policy;
pub mod health;
