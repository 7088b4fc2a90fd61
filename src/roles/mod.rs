pub mod catalog;

pub use catalog::{
    load_catalog, AttributeWeight, Role, RoleCatalog, RoleCategory, MAX_ROLES, MAX_WEIGHT,
};
