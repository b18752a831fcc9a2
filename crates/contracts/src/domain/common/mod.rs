//! Справочники, общие для всех документов.
//!
//! Фронтенд только читает их для заполнения выпадающих списков в формах.

pub mod references;

pub use references::{Driver, Product, ProductPrice, Supplier, UserProfile, Warehouse};
