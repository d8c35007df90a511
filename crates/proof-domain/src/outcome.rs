//! Resultado individual de un check.

use serde::{Deserialize, Serialize};

/// Registro inmutable por check: nombre, pase/fallo, aporte numérico al
/// score y diagnóstico opcional. Se produce exactamente una vez por check
/// registrado y se colecciona preservando el orden de declaración (el
/// orden sólo afecta al diagnóstico, nunca al score agregado).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub check: String,
    pub passed: bool,
    pub contribution: f64,
    pub diagnostic: Option<String>,
}

impl ValidationOutcome {
    pub fn passing(check: &str, contribution: f64) -> Self {
        Self { check: check.to_string(),
               passed: true,
               contribution,
               diagnostic: None }
    }

    pub fn failing(check: &str, diagnostic: &str) -> Self {
        Self { check: check.to_string(),
               passed: false,
               contribution: 0.0,
               diagnostic: Some(diagnostic.to_string()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failing_outcome_carries_zero_contribution() {
        let o = ValidationOutcome::failing("duplicate", "fingerprint already seen");
        assert!(!o.passed);
        assert_eq!(o.contribution, 0.0);
        assert!(o.diagnostic.is_some());
    }

    #[test]
    fn serde_round_trip() {
        let o = ValidationOutcome::passing("structural", 1.0);
        let encoded = serde_json::to_string(&o).unwrap();
        let decoded: ValidationOutcome = serde_json::from_str(&encoded).unwrap();
        assert_eq!(o, decoded);
    }
}
