//! Common types shared by all persisted entities

pub mod audit;
pub mod serde_helpers;

// Re-exports
pub use audit::{AuditField, AuditSlots, AutoFill};
