//! Configuración del proyecto
//!
//! Variables de entorno y configuración de los stores.

pub mod database;
pub mod environment;

pub use database::{DatabaseConfig, StorageConfig};
pub use environment::*;
