// Service exports
pub mod directory;

pub use directory::{CatalogError, CoordinatorDirectory};
