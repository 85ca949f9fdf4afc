//! Role-based access control for device type operations

mod operation;
mod policy;
mod role;

pub use operation::Operation;
pub use policy::{Access, AccessPolicy};
pub use role::{Role, UnknownRole};
