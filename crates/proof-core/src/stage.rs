//! Máquina de estados de la corrida.
//!
//! `Idle → Decrypting → Loading → Validating → Scoring → Writing → Done`
//! con `Failed` terminal alcanzable desde cualquier estado no terminal.
//! Las transiciones son unidireccionales: no hay retries dentro de una
//! invocación (reintentar es responsabilidad del colaborador externo que
//! vuelve a lanzar el proceso).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Idle,
    Decrypting,
    Loading,
    Validating,
    Scoring,
    Writing,
    Done,
    Failed,
}

impl Stage {
    /// Siguiente etapa del camino feliz; `None` para estados terminales.
    pub fn successor(self) -> Option<Stage> {
        match self {
            Stage::Idle => Some(Stage::Decrypting),
            Stage::Decrypting => Some(Stage::Loading),
            Stage::Loading => Some(Stage::Validating),
            Stage::Validating => Some(Stage::Scoring),
            Stage::Scoring => Some(Stage::Writing),
            Stage::Writing => Some(Stage::Done),
            Stage::Done | Stage::Failed => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Done | Stage::Failed)
    }

    /// ¿Un fallo en esta etapa todavía amerita escribir un ProofResult de
    /// diagnóstico? Antes de Loading no hay nada sobre lo que razonar.
    pub fn emits_diagnostic_on_failure(self) -> bool {
        matches!(self, Stage::Loading | Stage::Validating | Stage::Scoring | Stage::Writing)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Decrypting => "decrypting",
            Stage::Loading => "loading",
            Stage::Validating => "validating",
            Stage::Scoring => "scoring",
            Stage::Writing => "writing",
            Stage::Done => "done",
            Stage::Failed => "failed",
        }
    }
}
