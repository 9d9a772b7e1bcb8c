//! Utilidades de validación
//!
//! Validación de campos de leads y parámetros de ruta.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Los stock numbers se usan como segmentos de ruta en los stores
    static ref STOCK_NUMBER: Regex = Regex::new(r"^[A-Za-z0-9_-]{1,64}$").unwrap();
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Stock number válido como clave del store
pub fn validate_stock_number(value: &str) -> Result<(), ValidationError> {
    validate_not_empty(value)?;
    if !STOCK_NUMBER.is_match(value.trim()) {
        let mut error = ValidationError::new("stock_number");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Cualquier dirección con '@'
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    validate_not_empty(value)?;
    if !value.contains('@') {
        let mut error = ValidationError::new("email");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Nombre y apellido separados por un espacio
pub fn validate_full_name(value: &str) -> Result<(), ValidationError> {
    validate_not_empty(value)?;
    if !value.contains(' ') {
        let mut error = ValidationError::new("full_name");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("x").is_ok());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_stock_number() {
        assert!(validate_stock_number("A100").is_ok());
        assert!(validate_stock_number("3f2c9a1e-7b7d-4c2e-9d55-0f7c1a2b3c4d").is_ok());
        assert!(validate_stock_number("").is_err());
        assert!(validate_stock_number("../metadata").is_err());
        assert!(validate_stock_number("a/b").is_err());
        assert!(validate_stock_number(&"A".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("buyer@example.com").is_ok());
        assert!(validate_email("buyer@localhost").is_ok());
        assert!(validate_email("buyer.example.com").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_validate_full_name() {
        assert!(validate_full_name("Jane Doe").is_ok());
        assert!(validate_full_name("Jane").is_err());
        assert!(validate_full_name(" ").is_err());
    }
}
