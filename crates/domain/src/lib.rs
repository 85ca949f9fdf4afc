//! Domain layer - Pure business logic with no external dependencies
//!
//! This crate contains:
//! - Entities (DeviceType)
//! - Value Objects (DeviceTypeId, ResourceRef, Attributes)
//! - Access control (Role, Operation, AccessPolicy)
//! - Repository interfaces (traits)
//!
//! Principles:
//! - No dependencies on infrastructure
//! - Identifier resolution and authorization are pure functions
//! - Testable in isolation

pub mod access;
pub mod device_type;
pub mod error;

// Re-export commonly used types
pub use access::{Access, AccessPolicy, Operation, Role};
pub use device_type::{
    AttributePatch, Attributes, DeviceType, DeviceTypeId, DeviceTypeRepository, ResourceRef,
};
pub use error::DomainError;
