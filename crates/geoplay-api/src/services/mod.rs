//! Service layer for business logic.

pub mod catalog;

pub use catalog::VideoCatalog;
