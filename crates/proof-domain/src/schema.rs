//! Descriptor de esquema de la contribución.
//!
//! Describe qué forma debe tener el payload descifrado antes de que los
//! checks puedan razonar sobre él: campos requeridos con su tipo JSON y
//! los content types aceptados. Mismo descriptor + mismos bytes producen
//! siempre el mismo veredicto (determinismo del Input Loader).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::DomainError;

/// Tipo JSON esperado para un campo del payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Number,
    Bool,
    Array,
    Object,
}

impl FieldKind {
    /// ¿El valor JSON coincide con el tipo declarado?
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Number => value.is_number(),
            FieldKind::Bool => value.is_boolean(),
            FieldKind::Array => value.is_array(),
            FieldKind::Object => value.is_object(),
        }
    }
}

/// Declaración de un campo del payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

/// Descriptor inmutable del esquema: se construye una vez al arranque y
/// viaja por referencia (nunca se muta durante la corrida).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDescriptor {
    pub name: String,
    pub version: u32,
    pub fields: Vec<FieldSpec>,
    pub allowed_content_types: Vec<String>,
}

impl SchemaDescriptor {
    pub fn new(name: &str,
               version: u32,
               fields: Vec<FieldSpec>,
               allowed_content_types: Vec<String>)
               -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::Validation("schema name must not be empty".into()));
        }
        if allowed_content_types.is_empty() {
            return Err(DomainError::Validation("schema must allow at least one content type".into()));
        }
        Ok(Self { name: name.to_string(),
                  version,
                  fields,
                  allowed_content_types })
    }

    pub fn accepts_content_type(&self, content_type: &str) -> bool {
        self.allowed_content_types.iter().any(|ct| ct == content_type)
    }

    /// Primer problema encontrado contra el payload, o `None` si cumple.
    /// Recorre los campos en orden de declaración para que el diagnóstico
    /// sea reproducible.
    pub fn first_violation(&self, payload: &Value) -> Option<String> {
        let object = match payload.as_object() {
            Some(map) => map,
            None => return Some("payload root must be a JSON object".into()),
        };
        for field in &self.fields {
            match object.get(&field.name) {
                None if field.required => {
                    return Some(format!("missing required field '{}'", field.name));
                }
                None => {}
                Some(value) => {
                    if !field.kind.matches(value) {
                        return Some(format!("field '{}' has wrong type (expected {:?})", field.name, field.kind));
                    }
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_schema() -> SchemaDescriptor {
        SchemaDescriptor::new("contribution.v1",
                              1,
                              vec![FieldSpec { name: "contribution".into(),
                                               kind: FieldKind::Array,
                                               required: true },
                                   FieldSpec { name: "walletAddress".into(),
                                               kind: FieldKind::String,
                                               required: false }],
                              vec!["application/json".into()]).unwrap()
    }

    #[test]
    fn accepts_conforming_payload() {
        let schema = sample_schema();
        let payload = json!({ "contribution": [], "walletAddress": "0x1" });
        assert_eq!(schema.first_violation(&payload), None);
    }

    #[test]
    fn reports_missing_required_field() {
        let schema = sample_schema();
        let violation = schema.first_violation(&json!({ "walletAddress": "0x1" }));
        assert_eq!(violation.as_deref(), Some("missing required field 'contribution'"));
    }

    #[test]
    fn reports_wrong_type() {
        let schema = sample_schema();
        let violation = schema.first_violation(&json!({ "contribution": "nope" }));
        assert!(violation.unwrap().contains("wrong type"));
    }

    #[test]
    fn optional_field_may_be_absent() {
        let schema = sample_schema();
        assert_eq!(schema.first_violation(&json!({ "contribution": [] })), None);
    }

    #[test]
    fn non_object_root_is_rejected() {
        let schema = sample_schema();
        assert!(schema.first_violation(&json!([1, 2])).is_some());
    }

    #[test]
    fn content_type_allowlist() {
        let schema = sample_schema();
        assert!(schema.accepts_content_type("application/json"));
        assert!(!schema.accepts_content_type("text/csv"));
    }
}
