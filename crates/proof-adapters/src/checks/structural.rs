//! Check de integridad estructural.
//!
//! Verifica la forma gruesa de la contribución más allá del esquema de
//! campos: que exista el arreglo de registros, que no esté vacío ni
//! exceda el máximo, y que cada registro sea un objeto. Típicamente se
//! configura como hard-fail: una contribución estructuralmente corrupta
//! invalida el proof sin importar el score.

use proof_core::check::{CheckDefinition, CheckFinding};
use proof_core::errors::PipelineError;
use proof_domain::Contribution;

pub struct StructuralCheck {
    records_field: String,
    max_records: usize,
}

impl StructuralCheck {
    pub fn new(records_field: &str, max_records: usize) -> Self {
        Self { records_field: records_field.to_string(),
               max_records }
    }
}

impl CheckDefinition for StructuralCheck {
    fn name(&self) -> &'static str {
        "structural"
    }

    fn evaluate(&self, contribution: &Contribution) -> Result<CheckFinding, PipelineError> {
        let field = match contribution.field(&self.records_field) {
            Some(value) => value,
            None => return Ok(CheckFinding::fail(&format!("missing records field '{}'", self.records_field))),
        };
        let records = match field.as_array() {
            Some(array) => array,
            None => {
                return Ok(CheckFinding::fail(&format!("records field '{}' is not an array", self.records_field)))
            }
        };
        if records.is_empty() {
            return Ok(CheckFinding::fail("contribution has no records"));
        }
        if records.len() > self.max_records {
            return Ok(CheckFinding::fail(&format!("{} records exceed the maximum of {}",
                                                  records.len(),
                                                  self.max_records)));
        }
        if let Some(pos) = records.iter().position(|r| !r.is_object()) {
            return Ok(CheckFinding::fail(&format!("record {} is not an object", pos)));
        }
        Ok(CheckFinding::pass())
    }
}
