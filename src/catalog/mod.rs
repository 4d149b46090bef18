pub mod attributes;
pub mod structs;

pub use structs::{RoleCatalog, RoleDefinition, RoleGroup};
