//! Set enumerado de checks.
//!
//! Nada de plugins en runtime: dentro de un entorno sellado el set de
//! validadores debe ser auditable, así que las variantes concretas se
//! eligen por configuración (`CheckSelection`) y se construyen todas al
//! arranque.

pub mod duplicate;
pub mod index;
pub mod semantic;
pub mod structural;

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use proof_core::check::CheckDefinition;
use proof_core::errors::PipelineError;

pub use duplicate::DuplicateCheck;
pub use index::{FileFingerprintIndex, FingerprintIndex, InMemoryFingerprintIndex};
pub use semantic::SemanticCheck;
pub use structural::StructuralCheck;

/// Selección declarativa de un check, tal como aparece en el archivo de
/// configuración de la corrida.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckSelection {
    Structural {
        #[serde(default = "default_records_field")]
        records_field: String,
        #[serde(default = "default_max_records")]
        max_records: usize,
    },
    Duplicate {
        #[serde(default)]
        index_path: Option<PathBuf>,
    },
    Semantic {
        #[serde(default = "default_records_field")]
        records_field: String,
        witness_field: String,
        allowed_witness_suffixes: Vec<String>,
        #[serde(default = "default_min_ratio")]
        min_ratio: f64,
    },
}

fn default_records_field() -> String {
    "contribution".to_string()
}

fn default_max_records() -> usize {
    10_000
}

fn default_min_ratio() -> f64 {
    1.0
}

/// Materializa las selecciones en instancias registrables, en el orden
/// declarado (que es el orden de los diagnósticos publicados).
pub fn build_checks(selections: &[CheckSelection]) -> Result<Vec<Arc<dyn CheckDefinition>>, PipelineError> {
    let mut checks: Vec<Arc<dyn CheckDefinition>> = Vec::with_capacity(selections.len());
    for selection in selections {
        match selection {
            CheckSelection::Structural { records_field, max_records } => {
                checks.push(Arc::new(StructuralCheck::new(records_field, *max_records)));
            }
            CheckSelection::Duplicate { index_path } => {
                let index: Box<dyn FingerprintIndex> = match index_path {
                    Some(path) => Box::new(FileFingerprintIndex::open(path)?),
                    None => Box::new(InMemoryFingerprintIndex::default()),
                };
                checks.push(Arc::new(DuplicateCheck::new(index)));
            }
            CheckSelection::Semantic { records_field,
                                       witness_field,
                                       allowed_witness_suffixes,
                                       min_ratio } => {
                checks.push(Arc::new(SemanticCheck::new(records_field,
                                                        witness_field,
                                                        allowed_witness_suffixes.clone(),
                                                        *min_ratio)));
            }
        }
    }
    Ok(checks)
}
