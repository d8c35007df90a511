//! Validator Set: registro ordenado de checks y fan-out acotado.
//!
//! Cada check es una función pura sobre la `Contribution` ("polimórfico
//! sobre la capacidad {evaluate}"). Los checks se ejecutan de forma
//! independiente: el fallo de uno no impide que corran los demás
//! (fail-soft a granularidad de check). Un `Err`, un panic o un timeout
//! dentro de un check se convierte en un `ValidationOutcome` fallido con
//! diagnóstico, nunca en un aborto de la corrida.
//!
//! El orden de registro es parte del contrato porque fija el orden de los
//! diagnósticos; el score agregado es independiente del orden (ver
//! `scorer`).

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use indexmap::IndexMap;
use proof_domain::{Contribution, ValidationOutcome};
use rayon::prelude::*;

use crate::errors::PipelineError;

/// Hallazgo crudo de un check; el `CheckSet` lo etiqueta con el nombre.
#[derive(Debug, Clone)]
pub struct CheckFinding {
    pub passed: bool,
    pub contribution: f64,
    pub diagnostic: Option<String>,
}

impl CheckFinding {
    pub fn pass() -> Self {
        Self { passed: true, contribution: 1.0, diagnostic: None }
    }

    pub fn fail(diagnostic: &str) -> Self {
        Self { passed: false, contribution: 0.0, diagnostic: Some(diagnostic.to_string()) }
    }

    /// Pase parcial: aporta `contribution` en [0,1] y decide `passed`
    /// contra el umbral propio del check.
    pub fn partial(contribution: f64, passed: bool, diagnostic: Option<String>) -> Self {
        Self { passed, contribution, diagnostic }
    }
}

/// Contrato de un check registrable. Implementaciones deben ser puras
/// respecto a la contribución (sin estado mutable compartido) y `Send +
/// Sync` porque el fan-out puede evaluarlas en paralelo.
pub trait CheckDefinition: Send + Sync {
    /// Nombre estable y único dentro del set; llave de pesos y hard-fail.
    fn name(&self) -> &'static str;

    /// Evaluación pura. `Err` se degrada a outcome fallido.
    fn evaluate(&self, contribution: &Contribution) -> Result<CheckFinding, PipelineError>;
}

/// Colección ordenada de checks. El orden de inserción se preserva
/// (IndexMap) y es el orden de los outcomes.
#[derive(Default)]
pub struct CheckSet {
    checks: IndexMap<String, Arc<dyn CheckDefinition>>,
}

impl CheckSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra un check. Nombres duplicados son un error de armado.
    pub fn register(&mut self, check: Arc<dyn CheckDefinition>) -> Result<(), PipelineError> {
        let name = check.name().to_string();
        if self.checks.contains_key(&name) {
            return Err(PipelineError::Internal(format!("check '{}' already registered", name)));
        }
        self.checks.insert(name, check);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Nombres en orden de registro.
    pub fn names(&self) -> Vec<&str> {
        self.checks.keys().map(|k| k.as_str()).collect()
    }

    /// Evalúa todos los checks contra la contribución.
    ///
    /// Fan-out con rayon (optimización permitida, no requisito de
    /// correctitud): el `collect` preserva el orden de registro, así que
    /// la secuencia de outcomes es reproducible aunque la evaluación sea
    /// paralela. Cada check corre bajo `budget`; excederlo produce un
    /// outcome fallido tipado en lugar de colgar el proceso.
    pub fn evaluate_all(&self, contribution: &Contribution, budget: Duration) -> Vec<ValidationOutcome> {
        let shared = Arc::new(contribution.clone());
        let entries: Vec<(&str, &Arc<dyn CheckDefinition>)> =
            self.checks.iter().map(|(k, v)| (k.as_str(), v)).collect();

        entries.par_iter()
               .map(|(name, check)| run_bounded(name, check, &shared, budget))
               .collect()
    }
}

/// Corre un check en un hilo vigilado. El hilo queda detached si expira
/// el presupuesto; aceptable porque el proceso es efímero por contrato y
/// el host mata procesos fugados.
fn run_bounded(name: &str,
               check: &Arc<dyn CheckDefinition>,
               contribution: &Arc<Contribution>,
               budget: Duration)
               -> ValidationOutcome {
    let (tx, rx) = mpsc::channel();
    let worker_check = Arc::clone(check);
    let worker_contribution = Arc::clone(contribution);
    thread::spawn(move || {
        let finding = worker_check.evaluate(&worker_contribution);
        // El receptor puede haber abandonado por timeout; ignorar.
        let _ = tx.send(finding);
    });

    match rx.recv_timeout(budget) {
        Ok(Ok(finding)) => ValidationOutcome { check: name.to_string(),
                                               passed: finding.passed,
                                               contribution: finding.contribution,
                                               diagnostic: finding.diagnostic },
        Ok(Err(err)) => {
            let downgraded = PipelineError::CheckExecution { check: name.to_string(),
                                                             message: err.to_string() };
            ValidationOutcome::failing(name, &downgraded.to_string())
        }
        Err(RecvTimeoutError::Timeout) => {
            let err = PipelineError::CheckTimeout { check: name.to_string() };
            ValidationOutcome::failing(name, &err.to_string())
        }
        Err(RecvTimeoutError::Disconnected) => {
            // El hilo murió sin enviar: panic dentro del check.
            let err = PipelineError::CheckExecution { check: name.to_string(),
                                                      message: "check aborted (panic)".into() };
            ValidationOutcome::failing(name, &err.to_string())
        }
    }
}
