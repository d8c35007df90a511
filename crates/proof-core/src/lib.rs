//! proof-core: motor single-shot de verificación de contribuciones.
//!
//! Secuencia lineal por invocación:
//! artifact cifrado → Decryptor → Input Loader → Validator Set →
//! Scorer → Result Writer → directorio sellado. Ningún componente corre
//! más de una vez por vida del proceso.
pub mod check;
pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod ports;
pub mod scorer;
pub mod stage;

pub use check::{CheckDefinition, CheckFinding, CheckSet};
pub use config::{PipelineConfig, ScoringPolicy};
pub use engine::{ProofEngine, ProofEngineBuilder, RunReport};
pub use errors::PipelineError;
pub use event::{EventStore, InMemoryEventStore, RunEvent, RunEventKind};
pub use ports::{ArtifactDecryptor, ContributionLoader, ResultSink};
pub use stage::Stage;
