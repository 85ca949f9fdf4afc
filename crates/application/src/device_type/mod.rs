mod service;

pub use service::DeviceTypeService;
