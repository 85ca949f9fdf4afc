pub mod device_types;
pub mod sequences;
