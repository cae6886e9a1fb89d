//! Data models for properties served by the remote API

pub mod property;

pub use property::{Property, PropertyRecord, RecordError, UnitRecord};
