//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos.

use chrono::{DateTime, Utc};
use validator::ValidationError;

/// Validar y convertir string a datetime
pub fn validate_datetime(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            let mut error = ValidationError::new("datetime");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"RFC3339".to_string());
            error
        })
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

/// Validar formato de email
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if !value.contains('@') || !value.contains('.') {
        let mut error = ValidationError::new("email");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_datetime() {
        let valid = "2030-01-15T10:00:00Z";
        assert!(validate_datetime(valid).is_ok());

        let with_offset = "2030-01-15T10:00:00+02:00";
        assert!(validate_datetime(with_offset).is_ok());

        let invalid = "2030-01-15 10:00";
        assert!(validate_datetime(invalid).is_err());
    }

    #[test]
    fn test_validate_datetime_preserves_order() {
        let earlier = validate_datetime("2030-01-15T10:00:00Z").unwrap();
        let later = validate_datetime("2030-01-15T12:00:00+01:00").unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("motivo").is_ok());
        assert!(validate_not_empty("").is_err());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("invalid-email").is_err());
        assert!(validate_email("test@").is_err());
    }
}
