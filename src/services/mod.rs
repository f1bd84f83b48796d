// Service exports
pub mod catalog;

pub use catalog::{CatalogError, DirectoryClient, FileCatalog, MentorCatalog};
