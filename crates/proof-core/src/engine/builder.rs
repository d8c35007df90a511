//! Builder para `ProofEngine`.
//!
//! A diferencia de un pipeline componible por el usuario, las costuras
//! del motor son fijas (decryptor, loader, checks, sink), así que el
//! builder valida en runtime que todas estén presentes en lugar de
//! codificarlas en el sistema de tipos.

use std::sync::Arc;

use uuid::Uuid;

use crate::check::{CheckDefinition, CheckSet};
use crate::config::PipelineConfig;
use crate::errors::PipelineError;
use crate::event::{EventStore, InMemoryEventStore};
use crate::ports::{ArtifactDecryptor, ContributionLoader, ResultSink};
use crate::stage::Stage;

use super::core::ProofEngine;

pub struct ProofEngineBuilder {
    config: PipelineConfig,
    decryptor: Option<Box<dyn ArtifactDecryptor>>,
    loader: Option<Box<dyn ContributionLoader>>,
    sink: Option<Box<dyn ResultSink>>,
    checks: CheckSet,
}

impl ProofEngineBuilder {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config,
               decryptor: None,
               loader: None,
               sink: None,
               checks: CheckSet::new() }
    }

    pub fn decryptor(mut self, decryptor: Box<dyn ArtifactDecryptor>) -> Self {
        self.decryptor = Some(decryptor);
        self
    }

    pub fn loader(mut self, loader: Box<dyn ContributionLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn sink(mut self, sink: Box<dyn ResultSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Registra un check; el orden de las llamadas fija el orden de los
    /// outcomes publicados.
    pub fn check(mut self, check: Arc<dyn CheckDefinition>) -> Result<Self, PipelineError> {
        self.checks.register(check)?;
        Ok(self)
    }

    /// Construye el engine con un event store en memoria.
    pub fn build(self) -> Result<ProofEngine<InMemoryEventStore>, PipelineError> {
        self.build_with_store(InMemoryEventStore::default())
    }

    /// Construye el engine con el event store provisto.
    pub fn build_with_store<E: EventStore>(self, event_store: E) -> Result<ProofEngine<E>, PipelineError> {
        self.config.validate()?;
        let decryptor = self.decryptor
                            .ok_or_else(|| PipelineError::Internal("no decryptor configured".into()))?;
        let loader = self.loader
                         .ok_or_else(|| PipelineError::Internal("no loader configured".into()))?;
        let sink = self.sink
                       .ok_or_else(|| PipelineError::Internal("no result sink configured".into()))?;
        if self.checks.is_empty() {
            return Err(PipelineError::Internal("no checks registered".into()));
        }

        let config_hash = self.config.config_hash();
        // El run_id definitivo se deriva del artifact al invocar `run`.
        Ok(ProofEngine { event_store,
                         config: self.config,
                         decryptor,
                         loader,
                         checks: self.checks,
                         sink,
                         run_id: Uuid::nil(),
                         stage: Stage::Idle,
                         config_hash })
    }
}
