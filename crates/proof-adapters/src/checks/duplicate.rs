//! Check de duplicados / near-duplicados.
//!
//! Consulta el índice externo de fingerprints por el content hash de la
//! contribución. Un hit significa que la misma contribución (mismo
//! plaintext) ya fue aceptada antes; un miss significa "no vista", no un
//! error.

use proof_core::check::{CheckDefinition, CheckFinding};
use proof_core::errors::PipelineError;
use proof_domain::Contribution;

use super::index::FingerprintIndex;

pub struct DuplicateCheck {
    index: Box<dyn FingerprintIndex>,
}

impl DuplicateCheck {
    pub fn new(index: Box<dyn FingerprintIndex>) -> Self {
        Self { index }
    }
}

impl CheckDefinition for DuplicateCheck {
    fn name(&self) -> &'static str {
        "duplicate"
    }

    fn evaluate(&self, contribution: &Contribution) -> Result<CheckFinding, PipelineError> {
        let seen = self.index.contains(contribution.content_hash())?;
        if seen {
            Ok(CheckFinding::fail(&format!("fingerprint {} already seen", contribution.content_hash())))
        } else {
            Ok(CheckFinding::pass())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::index::InMemoryFingerprintIndex;
    use serde_json::json;

    fn contribution() -> Contribution {
        Contribution::from_plaintext(br#"{"contribution":[]}"#, json!({ "contribution": [] }), "application/json", None).unwrap()
    }

    #[test]
    fn unseen_fingerprint_passes() {
        let check = DuplicateCheck::new(Box::new(InMemoryFingerprintIndex::default()));
        let finding = check.evaluate(&contribution()).unwrap();
        assert!(finding.passed);
    }

    #[test]
    fn seen_fingerprint_fails() {
        let c = contribution();
        let index = InMemoryFingerprintIndex::with_seen([c.content_hash().to_string()]);
        let check = DuplicateCheck::new(Box::new(index));
        let finding = check.evaluate(&c).unwrap();
        assert!(!finding.passed);
        assert!(finding.diagnostic.unwrap().contains("already seen"));
    }
}
