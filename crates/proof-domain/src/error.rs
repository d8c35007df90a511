use thiserror::Error;

/// Errores del modelo de dominio (construcción/validación de tipos).
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validación fallida: {0}")]
    Validation(String),
    #[error("Clave inválida: {0}")]
    InvalidKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_variant_format() {
        let err = DomainError::Validation("campo vacío".into());
        assert_eq!(err.to_string(), "Validación fallida: campo vacío");
    }

    #[test]
    fn invalid_key_variant_format() {
        let err = DomainError::InvalidKey("hex corrupto".into());
        assert_eq!(err.to_string(), "Clave inválida: hex corrupto");
    }
}
