//! Agregación determinista de outcomes en un ProofResult.
//!
//! Regla de dos niveles, reproducida exactamente:
//! - score = media ponderada de los aportes por check, normalizada a
//!   [0,1] y redondeada a 5 decimales;
//! - valid = score >= umbral Y ningún check hard-fail falló. Un hard-fail
//!   que falla fuerza `valid = false` aunque el score pase el umbral.
//!
//! Independencia del orden: la suma recorre los outcomes ordenados por
//! nombre de check, así que permutar el orden de registro jamás cambia el
//! agregado (sólo el orden de diagnóstico en la secuencia publicada).

use chrono::Utc;
use proof_domain::{ProofMetadata, ProofResult, ValidationOutcome};

use crate::config::ScoringPolicy;
use crate::constants;

/// Redondeo half-up a `SCORE_DECIMALS` decimales. Público para que los
/// checks que publican fracciones usen exactamente la misma precisión
/// que el agregado.
pub fn round_score(value: f64) -> f64 {
    let factor = 10f64.powi(constants::SCORE_DECIMALS as i32);
    (value * factor).round() / factor
}

/// Score agregado puro sobre la secuencia de outcomes. Una secuencia
/// vacía vale 0.0: una corrida que no validó nada no avala nada.
pub fn aggregate_score(outcomes: &[ValidationOutcome], policy: &ScoringPolicy) -> f64 {
    if outcomes.is_empty() {
        return 0.0;
    }
    let mut sorted: Vec<&ValidationOutcome> = outcomes.iter().collect();
    sorted.sort_by(|a, b| a.check.cmp(&b.check));

    let mut weighted = 0.0;
    let mut total_weight = 0.0;
    for outcome in sorted {
        let weight = policy.weight_of(&outcome.check);
        total_weight += weight;
        weighted += weight * outcome.contribution.clamp(0.0, 1.0);
    }
    if total_weight == 0.0 {
        return 0.0;
    }
    round_score(weighted / total_weight)
}

/// Veredicto de validez: umbral + dominancia de hard-fail.
pub fn is_valid(outcomes: &[ValidationOutcome], policy: &ScoringPolicy, score: f64) -> bool {
    let hard_failed = outcomes.iter().any(|o| !o.passed && policy.is_hard_fail(&o.check));
    score >= policy.threshold && !hard_failed
}

/// Construye el ProofResult definitivo a partir de los outcomes. Función
/// pura salvo por el timestamp.
pub fn build_proof(outcomes: Vec<ValidationOutcome>,
                   policy: &ScoringPolicy,
                   schema_version: u32,
                   metadata: ProofMetadata)
                   -> ProofResult {
    let score = aggregate_score(&outcomes, policy);
    let valid = is_valid(&outcomes, policy, score);
    ProofResult { schema_version,
                  pipeline_version: constants::PIPELINE_VERSION.to_string(),
                  valid,
                  score,
                  outcomes,
                  metadata,
                  ts: Utc::now() }
}

/// ProofResult de diagnóstico para fallos desde Loading en adelante:
/// valid=false, outcomes vacíos, error en metadata.
pub fn diagnostic_proof(schema_version: u32, mut metadata: ProofMetadata, error: &str) -> ProofResult {
    metadata.error = Some(error.to_string());
    ProofResult { schema_version,
                  pipeline_version: constants::PIPELINE_VERSION.to_string(),
                  valid: false,
                  score: 0.0,
                  outcomes: Vec::new(),
                  metadata,
                  ts: Utc::now() }
}
