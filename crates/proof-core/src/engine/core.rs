//! Implementación del `ProofEngine`.

use std::path::PathBuf;

use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::check::CheckSet;
use crate::config::PipelineConfig;
use crate::constants;
use crate::errors::PipelineError;
use crate::event::{EventStore, RunEvent, RunEventKind};
use crate::hashing::{hash_bytes, hash_str, hash_value};
use crate::ports::{ArtifactDecryptor, ContributionLoader, ResultSink};
use crate::scorer;
use crate::stage::Stage;
use proof_domain::{DecryptionKey, EncryptedArtifact, ProofMetadata, ProofResult};

use super::builder::ProofEngineBuilder;

/// Motor de una sola corrida.
///
/// Secuencia las etapas del pipeline, emite eventos append-only con
/// fingerprints por etapa y aplica la política de fallo: fail-fast antes
/// de Loading (sin output), fail-soft después (ProofResult de
/// diagnóstico). Un engine se consume con una invocación; reintentar es
/// re-lanzar el proceso.
pub struct ProofEngine<E: EventStore> {
    pub(super) event_store: E,
    pub(super) config: PipelineConfig,
    pub(super) decryptor: Box<dyn ArtifactDecryptor>,
    pub(super) loader: Box<dyn ContributionLoader>,
    pub(super) checks: CheckSet,
    pub(super) sink: Box<dyn ResultSink>,
    pub(super) run_id: Uuid,
    pub(super) stage: Stage,
    pub(super) config_hash: String,
}

impl<E: EventStore> std::fmt::Debug for ProofEngine<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProofEngine")
         .field("run_id", &self.run_id)
         .field("stage", &self.stage)
         .field("config_hash", &self.config_hash)
         .finish_non_exhaustive()
    }
}

/// Resultado entregado al invocador: el proof escrito y su ubicación.
/// `run_fingerprint` sólo existe en corridas que llegaron a Done; el
/// camino de diagnóstico escribe output pero no cierra la traza.
#[derive(Debug)]
pub struct RunReport {
    pub run_id: Uuid,
    pub proof: ProofResult,
    pub output_path: PathBuf,
    pub run_fingerprint: Option<String>,
}

impl ProofEngine<crate::event::InMemoryEventStore> {
    /// Crea un builder para armar el engine con sus colaboradores.
    pub fn builder(config: PipelineConfig) -> ProofEngineBuilder {
        ProofEngineBuilder::new(config)
    }
}

/// Identidad determinista de la corrida: uuid v5 sobre el hash de
/// configuración y el hash del blob cifrado. Misma configuración y mismo
/// artifact producen el mismo `run_id`, así que el ProofResult completo
/// es reproducible módulo timestamp.
fn derive_run_id(config_hash: &str, artifact_bytes: &[u8]) -> Uuid {
    let material = format!("{}:{}", config_hash, hash_bytes(artifact_bytes));
    Uuid::new_v5(&Uuid::NAMESPACE_OID, material.as_bytes())
}

impl<E: EventStore> ProofEngine<E> {
    /// Identidad de la corrida. Nil hasta que `run` fija la identidad
    /// derivada del artifact.
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Eventos de la corrida en orden de append.
    pub fn events(&self) -> Vec<RunEvent> {
        self.event_store.list(self.run_id)
    }

    /// Variante compacta de los eventos, útil para asserts de secuencia.
    pub fn event_variants(&self) -> Vec<&'static str> {
        self.events()
            .iter()
            .map(|e| match e.kind {
                RunEventKind::RunInitialized { .. } => "I",
                RunEventKind::StageStarted { .. } => "S",
                RunEventKind::StageFinished { .. } => "F",
                RunEventKind::StageFailed { .. } => "X",
                RunEventKind::CheckEvaluated { .. } => "K",
                RunEventKind::RunCompleted { .. } => "C",
            })
            .collect()
    }

    /// Fingerprint de cierre si la corrida llegó a Done.
    pub fn run_fingerprint(&self) -> Option<String> {
        self.events().iter().rev().find_map(|e| match &e.kind {
                                      RunEventKind::RunCompleted { run_fingerprint } => {
                                          Some(run_fingerprint.clone())
                                      }
                                      _ => None,
                                  })
    }

    /// Ejecuta la corrida completa. Devuelve `Err` únicamente cuando no
    /// se escribió ningún output (descifrado fallido, escritura fallida o
    /// mal uso del engine); todo lo demás se captura dentro del
    /// ProofResult.
    pub fn run(&mut self, artifact: EncryptedArtifact, key: &DecryptionKey) -> Result<RunReport, PipelineError> {
        if self.stage != Stage::Idle {
            return Err(PipelineError::Internal("engine already consumed by a previous run".into()));
        }

        self.run_id = derive_run_id(&self.config_hash, artifact.bytes());
        self.event_store.append_kind(self.run_id,
                                     RunEventKind::RunInitialized { config_hash: self.config_hash.clone(),
                                                                    check_count: self.checks.len() });

        // ── Decrypting ────────────────────────────────────────────────
        self.enter(Stage::Decrypting);
        let plaintext = match self.decryptor.decrypt(&artifact, key) {
            Ok(bytes) => bytes,
            Err(err) => return Err(self.fail(err)),
        };
        self.finish(Stage::Decrypting, json!(hash_bytes(&plaintext)));

        // ── Loading ───────────────────────────────────────────────────
        self.enter(Stage::Loading);
        let contribution = match self.loader.load(&plaintext, &artifact) {
            Ok(c) => c,
            Err(err) => return self.fail_with_diagnostic(&artifact, err),
        };
        self.finish(Stage::Loading, json!(contribution.content_hash()));

        // ── Validating ────────────────────────────────────────────────
        self.enter(Stage::Validating);
        let outcomes = self.checks.evaluate_all(&contribution, self.config.check_timeout());
        for outcome in &outcomes {
            self.event_store.append_kind(self.run_id,
                                         RunEventKind::CheckEvaluated { check: outcome.check.clone(),
                                                                        passed: outcome.passed,
                                                                        contribution: outcome.contribution });
        }
        let outcomes_detail = serde_json::to_value(&outcomes).expect("serialize outcomes");
        self.finish(Stage::Validating, outcomes_detail);

        // ── Scoring ───────────────────────────────────────────────────
        self.enter(Stage::Scoring);
        let metadata = ProofMetadata { run_id: self.run_id,
                                       submitter: artifact.submitter().map(|s| s.to_string()),
                                       content_hash: Some(contribution.content_hash().to_string()),
                                       error: None };
        let proof = scorer::build_proof(outcomes,
                                        &self.config.scoring,
                                        self.config.output_schema_version,
                                        metadata);
        let proof_detail =
            serde_json::to_value(proof.without_timestamp()).expect("serialize proof for fingerprint");
        self.finish(Stage::Scoring, proof_detail);

        // ── Writing ───────────────────────────────────────────────────
        self.enter(Stage::Writing);
        let output_path = match self.sink.write(&proof) {
            Ok(path) => path,
            Err(err) => return Err(self.fail(err)),
        };
        self.finish(Stage::Writing, json!(hash_str(&output_path.to_string_lossy())));

        // ── Done ──────────────────────────────────────────────────────
        let run_fingerprint = self.seal_run();
        self.stage = Stage::Done;
        info!(run_id = %self.run_id, valid = proof.valid, score = proof.score, "proof run completed");

        Ok(RunReport { run_id: self.run_id,
                       proof,
                       output_path,
                       run_fingerprint: Some(run_fingerprint) })
    }

    fn enter(&mut self, stage: Stage) {
        debug_assert_eq!(self.stage.successor(), Some(stage), "transición de etapa fuera de orden");
        self.stage = stage;
        self.event_store.append_kind(self.run_id, RunEventKind::StageStarted { stage });
        info!(run_id = %self.run_id, stage = stage.as_str(), "stage started");
    }

    fn finish(&mut self, stage: Stage, detail: serde_json::Value) {
        let fingerprint = self.stage_fingerprint(stage, &detail);
        self.event_store.append_kind(self.run_id, RunEventKind::StageFinished { stage, fingerprint });
    }

    /// Fallo terminal sin output: registra el evento y entrega el error
    /// al invocador (exit code distinto de cero).
    fn fail(&mut self, error: PipelineError) -> PipelineError {
        warn!(run_id = %self.run_id, stage = self.stage.as_str(), error = %error, "run failed");
        self.event_store.append_kind(self.run_id,
                                     RunEventKind::StageFailed { stage: self.stage, error: error.clone() });
        self.stage = Stage::Failed;
        error
    }

    /// Fallo desde Loading en adelante: todavía se intenta escribir un
    /// ProofResult mínimo de diagnóstico. Si esa escritura también falla,
    /// la corrida termina sin output y con error de escritura.
    fn fail_with_diagnostic(&mut self,
                            artifact: &EncryptedArtifact,
                            error: PipelineError)
                            -> Result<RunReport, PipelineError> {
        debug_assert!(self.stage.emits_diagnostic_on_failure());
        warn!(run_id = %self.run_id, stage = self.stage.as_str(), error = %error, "run failed; writing diagnostic proof");
        self.event_store.append_kind(self.run_id,
                                     RunEventKind::StageFailed { stage: self.stage, error: error.clone() });

        let metadata = ProofMetadata { run_id: self.run_id,
                                       submitter: artifact.submitter().map(|s| s.to_string()),
                                       content_hash: None,
                                       error: None };
        let proof = scorer::diagnostic_proof(self.config.output_schema_version, metadata, &error.to_string());
        let output_path = match self.sink.write(&proof) {
            Ok(path) => path,
            Err(write_err) => {
                self.event_store.append_kind(self.run_id,
                                             RunEventKind::StageFailed { stage: Stage::Writing,
                                                                         error: write_err.clone() });
                self.stage = Stage::Failed;
                return Err(write_err);
            }
        };
        self.stage = Stage::Failed;

        Ok(RunReport { run_id: self.run_id,
                       proof,
                       output_path,
                       run_fingerprint: None })
    }

    fn stage_fingerprint(&self, stage: Stage, detail: &serde_json::Value) -> String {
        hash_value(&json!({
            "pipeline_version": constants::PIPELINE_VERSION,
            "config_hash": self.config_hash,
            "stage": stage.as_str(),
            "detail": detail,
        }))
    }

    /// Cierra la traza: hash de los fingerprints de etapa en orden.
    fn seal_run(&mut self) -> String {
        let stage_fingerprints: Vec<String> = self.events()
                                                  .iter()
                                                  .filter_map(|e| match &e.kind {
                                                      RunEventKind::StageFinished { fingerprint, .. } => {
                                                          Some(fingerprint.clone())
                                                      }
                                                      _ => None,
                                                  })
                                                  .collect();
        let run_fingerprint = hash_value(&json!({
                                  "pipeline_version": constants::PIPELINE_VERSION,
                                  "config_hash": self.config_hash,
                                  "stage_fingerprints": stage_fingerprints,
                              }));
        self.event_store.append_kind(self.run_id,
                                     RunEventKind::RunCompleted { run_fingerprint: run_fingerprint.clone() });
        run_fingerprint
    }
}
