//! Utilidades del sistema
//!
//! Tipos de error y validación de campos.

pub mod errors;
pub mod validation;

pub use errors::{AppError, AppResult};
