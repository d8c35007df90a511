//! ProofFlow Rust Library
//!
//! Este crate actúa como la capa de arranque del verificador:
//! - Expone `runner` con la resolución de entorno, configuración y
//!   cableado del motor.
//!
//! Puede usarse desde `main.rs` o desde los tests de integración.

pub mod runner;

#[cfg(test)]
mod tests {
	use super::runner::RunnerError;

	#[test]
	fn runner_error_messages() {
		let c = RunnerError::Config("x".into()).to_string();
		assert_eq!(c, "Configuración inválida: x");
		let a = RunnerError::Artifact("y".into()).to_string();
		assert_eq!(a, "Artifact no disponible: y");
	}
}
