//! Application layer - Use cases and business workflows

pub mod device_type;

pub use device_type::DeviceTypeService;
