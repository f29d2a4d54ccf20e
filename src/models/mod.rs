//! Data models for Equipos

pub mod equipment;

// Re-export commonly used types
pub use equipment::{Equipment, EquipmentListing};
