//! Result Writer: serialización al directorio sellado.
//!
//! Escribe `results.json` (layout fijo, versionado por `schema_version`)
//! y, si hay clave de firma configurada, una firma Ed25519 separada en
//! `results.sig` sobre exactamente los bytes serializados.
//!
//! Invariante de firma: `results.sig` se escribe ANTES que
//! `results.json`. Si la firma no puede materializarse, el archivo final
//! nunca aparece; un consumidor jamás observa un resultado sin firmar
//! como definitivo cuando la firma fue solicitada.

use std::fs;
use std::path::{Path, PathBuf};

use ed25519_dalek::{Signer, SigningKey};

use proof_core::errors::PipelineError;
use proof_core::ports::ResultSink;
use proof_domain::ProofResult;

pub const RESULT_FILE: &str = "results.json";
pub const SIGNATURE_FILE: &str = "results.sig";

/// Parsea una clave de firma Ed25519 desde hex (32 bytes de seed).
pub fn signing_key_from_hex(encoded: &str) -> Result<SigningKey, PipelineError> {
    let bytes = hex::decode(encoded.trim())
        .map_err(|e| PipelineError::Internal(format!("signing key: {}", e)))?;
    let seed: [u8; 32] = bytes.as_slice()
                              .try_into()
                              .map_err(|_| PipelineError::Internal("signing key must be 32 bytes".into()))?;
    Ok(SigningKey::from_bytes(&seed))
}

pub struct SealedDirWriter {
    dir: PathBuf,
    signing: Option<SigningKey>,
}

impl SealedDirWriter {
    pub fn new(dir: &Path, signing: Option<SigningKey>) -> Self {
        Self { dir: dir.to_path_buf(),
               signing }
    }

    pub fn result_path(&self) -> PathBuf {
        self.dir.join(RESULT_FILE)
    }
}

impl ResultSink for SealedDirWriter {
    fn write(&self, result: &ProofResult) -> Result<PathBuf, PipelineError> {
        fs::create_dir_all(&self.dir).map_err(|e| PipelineError::Write(e.to_string()))?;

        let bytes = serde_json::to_vec_pretty(result).map_err(|e| PipelineError::Write(e.to_string()))?;

        if let Some(key) = &self.signing {
            let signature = key.sign(&bytes);
            let sig_path = self.dir.join(SIGNATURE_FILE);
            fs::write(&sig_path, hex::encode(signature.to_bytes()))
                .map_err(|e| PipelineError::Write(format!("signature: {}", e)))?;
        }

        let path = self.result_path();
        fs::write(&path, &bytes).map_err(|e| PipelineError::Write(e.to_string()))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ed25519_dalek::{Signature, Verifier};
    use proof_domain::{ProofMetadata, ValidationOutcome};
    use uuid::Uuid;

    fn proof() -> ProofResult {
        ProofResult { schema_version: 1,
                      pipeline_version: "1.0".into(),
                      valid: true,
                      score: 1.0,
                      outcomes: vec![ValidationOutcome::passing("structural", 1.0)],
                      metadata: ProofMetadata { run_id: Uuid::new_v4(),
                                                submitter: None,
                                                content_hash: Some("cafe".into()),
                                                error: None },
                      ts: Utc::now() }
    }

    #[test]
    fn writes_parseable_result_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SealedDirWriter::new(dir.path(), None);
        let path = writer.write(&proof()).unwrap();
        assert_eq!(path.file_name().unwrap(), RESULT_FILE);
        let bytes = fs::read(&path).unwrap();
        let decoded: ProofResult = serde_json::from_slice(&bytes).unwrap();
        assert!(decoded.valid);
    }

    #[test]
    fn detached_signature_verifies_over_written_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let key = signing_key_from_hex(&hex::encode([7u8; 32])).unwrap();
        let verifying = key.verifying_key();
        let writer = SealedDirWriter::new(dir.path(), Some(key));
        let path = writer.write(&proof()).unwrap();

        let bytes = fs::read(&path).unwrap();
        let sig_hex = fs::read_to_string(dir.path().join(SIGNATURE_FILE)).unwrap();
        let sig_bytes: [u8; 64] = hex::decode(sig_hex.trim()).unwrap().try_into().unwrap();
        let signature = Signature::from_bytes(&sig_bytes);
        assert!(verifying.verify(&bytes, &signature).is_ok());
    }

    #[test]
    fn unwritable_destination_is_a_write_error() {
        let dir = tempfile::tempdir().unwrap();
        // Un archivo ocupando el lugar del directorio destino.
        let blocked = dir.path().join("occupied");
        fs::write(&blocked, b"x").unwrap();
        let writer = SealedDirWriter::new(&blocked, None);
        let err = writer.write(&proof()).unwrap_err();
        assert!(matches!(err, PipelineError::Write(_)));
    }

    #[test]
    fn signing_key_hex_must_be_32_bytes() {
        assert!(matches!(signing_key_from_hex("cafe"), Err(PipelineError::Internal(_))));
        assert!(matches!(signing_key_from_hex("zz"), Err(PipelineError::Internal(_))));
        assert!(signing_key_from_hex(&hex::encode([1u8; 32])).is_ok());
    }
}
