//! Frontera de invocación del binario `my_proof`.
//!
//! Traduce entorno y archivos de configuración a un `ProofEngine` listo
//! para correr una sola vez. Las funciones reciben sus entradas por
//! parámetro; la lectura de variables de entorno vive en `main.rs`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use proof_adapters::{build_checks, signing_key_from_hex, AeadDecryptor, CheckSelection, JsonContributionLoader,
                     SealedDirWriter};
use proof_core::{InMemoryEventStore, PipelineConfig, ProofEngine};
use proof_domain::EncryptedArtifact;

pub const DEFAULT_CONFIG_FILE: &str = "proof.config.json";
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Configuración inválida: {0}")]
    Config(String),
    #[error("Artifact no disponible: {0}")]
    Artifact(String),
    #[error(transparent)]
    Domain(#[from] proof_domain::DomainError),
    #[error(transparent)]
    Pipeline(#[from] proof_core::PipelineError),
}

/// Configuración completa de una corrida: sección del pipeline más la
/// lista declarativa de checks. Se construye una vez y no muta.
#[derive(Debug, Clone, Deserialize)]
pub struct RunnerConfig {
    pub pipeline: PipelineConfig,
    pub checks:   Vec<CheckSelection>,
}

impl RunnerConfig {
    pub fn load(path: &Path) -> Result<Self, RunnerError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| RunnerError::Config(format!("{}: {}", path.display(), e)))?;
        let config: Self =
            serde_json::from_str(&raw).map_err(|e| RunnerError::Config(format!("{}: {}", path.display(), e)))?;
        config.pipeline
              .validate()
              .map_err(|e| RunnerError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }
}

/// Directorios de entrada y salida según el entorno declarado.
/// Producción usa los puntos de montaje sellados; development redirige
/// a `./demo` para poder correr fuera del enclave.
pub fn input_and_sealed_dirs(environment: &str) -> (PathBuf, PathBuf) {
    if environment == "development" {
        (PathBuf::from("./demo/input"), PathBuf::from("./demo/sealed"))
    } else {
        (PathBuf::from("/input"), PathBuf::from("/sealed"))
    }
}

/// Resuelve el archivo de artifact a procesar. Un nombre explícito gana;
/// si es relativo se interpreta dentro del directorio de entrada. Sin
/// nombre, se toma el primer `*.enc` en orden lexicográfico.
pub fn locate_artifact(input_dir: &Path, named: Option<&Path>) -> Result<PathBuf, RunnerError> {
    if let Some(name) = named {
        let path = if name.is_absolute() { name.to_path_buf() } else { input_dir.join(name) };
        if !path.is_file() {
            return Err(RunnerError::Artifact(format!("{} no existe", path.display())));
        }
        return Ok(path);
    }

    let entries = fs::read_dir(input_dir)
        .map_err(|e| RunnerError::Artifact(format!("{}: {}", input_dir.display(), e)))?;
    let mut candidates: Vec<PathBuf> = entries.filter_map(|entry| entry.ok())
                                              .map(|entry| entry.path())
                                              .filter(|p| p.extension().is_some_and(|ext| ext == "enc"))
                                              .collect();
    candidates.sort();
    candidates.into_iter()
              .next()
              .ok_or_else(|| RunnerError::Artifact(format!("sin archivos *.enc en {}", input_dir.display())))
}

/// Lee el artifact cifrado del disco con los metadatos del invocador.
pub fn load_artifact(path: &Path, content_type: &str, submitter: Option<String>)
                     -> Result<EncryptedArtifact, RunnerError> {
    let bytes = fs::read(path).map_err(|e| RunnerError::Artifact(format!("{}: {}", path.display(), e)))?;
    Ok(EncryptedArtifact::new(bytes, content_type, submitter)?)
}

/// Cablea decryptor, loader, checks y writer sobre el motor. La clave de
/// firma es obligatoria si y solo si la configuración pide firmar.
pub fn build_engine(config: &RunnerConfig, sealed_dir: &Path, signing_key_hex: Option<&str>)
                    -> Result<ProofEngine<InMemoryEventStore>, RunnerError> {
    let signing = match (config.pipeline.sign_output, signing_key_hex) {
        (true, Some(encoded)) => Some(signing_key_from_hex(encoded)?),
        (true, None) => {
            return Err(RunnerError::Config("sign_output activo sin clave de firma".into()));
        }
        (false, _) => None,
    };

    let loader = JsonContributionLoader::new(config.pipeline.schema.clone(), config.pipeline.max_input_bytes);
    let mut builder = ProofEngine::builder(config.pipeline.clone())
        .decryptor(Box::new(AeadDecryptor))
        .loader(Box::new(loader))
        .sink(Box::new(SealedDirWriter::new(sealed_dir, signing)));
    for check in build_checks(&config.checks)? {
        builder = builder.check(check)?;
    }
    Ok(builder.build()?)
}
