// proof-domain library entry point
pub mod artifact;
pub mod contribution;
pub mod error;
pub mod key;
pub mod outcome;
pub mod proof;
pub mod schema;

pub use artifact::EncryptedArtifact;
pub use contribution::Contribution;
pub use error::DomainError;
pub use key::DecryptionKey;
pub use outcome::ValidationOutcome;
pub use proof::{ProofMetadata, ProofResult};
pub use schema::{FieldKind, FieldSpec, SchemaDescriptor};
