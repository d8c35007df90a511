//! proof-adapters: implementaciones concretas de las costuras del motor.
//!
//! - `decrypt`: descifrado AEAD (AES-256-GCM) del artifact.
//! - `loader`: parseo JSON con guardas de tamaño y esquema.
//! - `checks`: el set enumerado de validadores (estructural, duplicado,
//!   semántico) y el índice de fingerprints.
//! - `writer`: escritura al directorio sellado con firma opcional.

pub mod checks;
pub mod decrypt;
pub mod loader;
pub mod writer;

pub use checks::{build_checks, CheckSelection, DuplicateCheck, FileFingerprintIndex, FingerprintIndex,
                 InMemoryFingerprintIndex, SemanticCheck, StructuralCheck};
pub use decrypt::{seal, AeadDecryptor};
pub use loader::JsonContributionLoader;
pub use writer::{signing_key_from_hex, SealedDirWriter};
