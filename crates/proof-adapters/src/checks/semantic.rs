//! Check de plausibilidad semántica.
//!
//! Heurística de endoso por witness: fracción de registros cuyo campo
//! witness termina con alguno de los sufijos de dominio permitidos. El
//! aporte al score es esa fracción (redondeada a 5 decimales) y el check
//! pasa si alcanza `min_ratio`. Una contribución sin registros no puede
//! sostener plausibilidad: fracción 0.

use proof_core::check::{CheckDefinition, CheckFinding};
use proof_core::errors::PipelineError;
use proof_core::scorer::round_score;
use proof_domain::Contribution;

pub struct SemanticCheck {
    records_field: String,
    witness_field: String,
    allowed_suffixes: Vec<String>,
    min_ratio: f64,
}

impl SemanticCheck {
    pub fn new(records_field: &str, witness_field: &str, allowed_suffixes: Vec<String>, min_ratio: f64) -> Self {
        Self { records_field: records_field.to_string(),
               witness_field: witness_field.to_string(),
               allowed_suffixes,
               min_ratio }
    }

    fn is_endorsed(&self, record: &serde_json::Value) -> bool {
        record.get(&self.witness_field)
              .and_then(|w| w.as_str())
              .map(|w| self.allowed_suffixes.iter().any(|suffix| w.ends_with(suffix)))
              .unwrap_or(false)
    }
}

impl CheckDefinition for SemanticCheck {
    fn name(&self) -> &'static str {
        "semantic"
    }

    fn evaluate(&self, contribution: &Contribution) -> Result<CheckFinding, PipelineError> {
        let records = contribution.records(&self.records_field);
        if records.is_empty() {
            return Ok(CheckFinding::fail("no records to assess"));
        }
        let endorsed = records.iter().filter(|r| self.is_endorsed(r)).count();
        let ratio = round_score(endorsed as f64 / records.len() as f64);
        let passed = ratio >= self.min_ratio;
        let diagnostic = if passed {
            None
        } else {
            Some(format!("only {}/{} records carry an endorsed witness", endorsed, records.len()))
        };
        Ok(CheckFinding::partial(ratio, passed, diagnostic))
    }
}
