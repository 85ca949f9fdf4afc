mod attributes;
mod entity;
mod id;
mod repository;
mod resource_ref;

pub use attributes::{AttributePatch, Attributes};
pub use entity::DeviceType;
pub use id::DeviceTypeId;
#[cfg(any(test, feature = "testing"))]
pub use repository::MockDeviceTypeRepository;
pub use repository::DeviceTypeRepository;
pub use resource_ref::ResourceRef;
