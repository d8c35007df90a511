//! Constantes del motor.
//!
//! `PIPELINE_VERSION` participa en el cálculo de fingerprints: un cambio
//! de versión invalida determinísticamente los fingerprints aunque la
//! configuración y los datos no cambien. Mantener estable mientras no
//! haya cambios incompatibles.

/// Versión lógica del pipeline. Entra en cada fingerprint de etapa y se
/// copia al `ProofResult`.
pub const PIPELINE_VERSION: &str = "1.0";

/// Versión por defecto del layout de serialización del `ProofResult`.
pub const OUTPUT_SCHEMA_VERSION: u32 = 1;

/// Precisión decimal del score agregado (5 decimales, redondeo half-up).
pub const SCORE_DECIMALS: u32 = 5;
