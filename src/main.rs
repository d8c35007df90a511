use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use proof_core::RunReport;
use proof_domain::DecryptionKey;
use proofflow_rust::runner::{self, RunnerConfig, RunnerError, DEFAULT_CONFIG_FILE, DEFAULT_CONTENT_TYPE};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Corrida completa: entorno → configuración → motor → directorio sellado.
/// La clave jamás se loggea; los errores se reportan por su Display.
fn run() -> Result<RunReport, RunnerError> {
    let environment = env::var("PROOF_ENV").unwrap_or_else(|_| "production".to_string());
    let (input_dir, sealed_dir) = runner::input_and_sealed_dirs(&environment);

    let config_path = env::var("PROOF_CONFIG").map(PathBuf::from)
                                              .unwrap_or_else(|_| input_dir.join(DEFAULT_CONFIG_FILE));
    let config = RunnerConfig::load(&config_path)?;

    let key_hex = env::var("PROOF_DECRYPTION_KEY")
        .map_err(|_| RunnerError::Config("PROOF_DECRYPTION_KEY no definida".into()))?;
    let key = DecryptionKey::from_hex(&key_hex)?;

    let named = env::var("PROOF_ARTIFACT").ok().map(PathBuf::from);
    let artifact_path = runner::locate_artifact(&input_dir, named.as_deref())?;
    let content_type = env::var("PROOF_CONTENT_TYPE").unwrap_or_else(|_| DEFAULT_CONTENT_TYPE.to_string());
    let submitter = env::var("PROOF_SUBMITTER").ok();
    let artifact = runner::load_artifact(&artifact_path, &content_type, submitter)?;

    info!(environment = %environment,
          artifact = %artifact_path.display(),
          config = %config_path.display(),
          "iniciando verificación");

    let signing_key_hex = env::var("PROOF_SIGNING_KEY").ok();
    let mut engine = runner::build_engine(&config, &sealed_dir, signing_key_hex.as_deref())?;
    Ok(engine.run(artifact, &key)?)
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    init_tracing();

    match run() {
        Ok(report) => {
            info!(run_id = %report.run_id,
                  valid = report.proof.valid,
                  score = report.proof.score,
                  output = %report.output_path.display(),
                  "resultado escrito");
            ExitCode::SUCCESS
        }
        Err(e) => {
            // Sin resultado escrito: el exit code lo dice; la validez de
            // una contribución nunca viaja por aquí.
            error!(error = %e, "corrida abortada sin resultado");
            ExitCode::FAILURE
        }
    }
}
