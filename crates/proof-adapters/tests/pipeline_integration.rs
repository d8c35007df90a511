//! Tests de integración: pipeline completo con adapters reales
//! (AEAD → loader JSON → checks → scorer → writer sellado).

use std::collections::{BTreeMap, BTreeSet};

use proof_adapters::{build_checks, seal, AeadDecryptor, CheckSelection, JsonContributionLoader, SealedDirWriter};
use proof_core::{PipelineConfig, ProofEngine, ScoringPolicy};
use proof_domain::{DecryptionKey, EncryptedArtifact, FieldKind, FieldSpec, SchemaDescriptor};

fn schema() -> SchemaDescriptor {
    SchemaDescriptor::new("contribution.v1",
                          1,
                          vec![FieldSpec { name: "contribution".into(),
                                           kind: FieldKind::Array,
                                           required: true }],
                          vec!["application/json".into()]).unwrap()
}

fn config() -> PipelineConfig {
    PipelineConfig { schema: schema(),
                     max_input_bytes: 64 * 1024,
                     scoring: ScoringPolicy { weights: BTreeMap::new(),
                                              hard_fail: BTreeSet::from(["structural".into()]),
                                              threshold: 0.6 },
                     check_timeout_ms: 2_000,
                     output_schema_version: 1,
                     sign_output: false }
}

fn selections() -> Vec<CheckSelection> {
    vec![CheckSelection::Structural { records_field: "contribution".into(),
                                      max_records: 100 },
         CheckSelection::Duplicate { index_path: None },
         CheckSelection::Semantic { records_field: "contribution".into(),
                                    witness_field: "witnesses".into(),
                                    allowed_witness_suffixes: vec!["reclaimprotocol.org".into()],
                                    min_ratio: 1.0 }]
}

fn key() -> DecryptionKey {
    DecryptionKey::from_bytes(vec![0x42; 32]).unwrap()
}

fn engine(sealed_dir: &std::path::Path) -> ProofEngine<proof_core::InMemoryEventStore> {
    let mut builder = ProofEngine::builder(config()).decryptor(Box::new(AeadDecryptor))
                                                    .loader(Box::new(JsonContributionLoader::new(schema(),
                                                                                                 64 * 1024)))
                                                    .sink(Box::new(SealedDirWriter::new(sealed_dir, None)));
    for check in build_checks(&selections()).unwrap() {
        builder = builder.check(check).unwrap();
    }
    builder.build().unwrap()
}

fn sealed_artifact(payload: &str) -> EncryptedArtifact {
    let blob = seal(payload.as_bytes(), &key()).unwrap();
    EncryptedArtifact::new(blob, "application/json", Some("0xabc".into())).unwrap()
}

const VALID_PAYLOAD: &str = r#"{"contribution":[{"type":"A","witnesses":"wss://witness.reclaimprotocol.org/ws"}]}"#;

#[test]
fn valid_contribution_produces_full_score() {
    let dir = tempfile::tempdir().unwrap();
    let mut eng = engine(dir.path());
    let report = eng.run(sealed_artifact(VALID_PAYLOAD), &key()).expect("run ok");

    assert!(report.proof.valid);
    assert_eq!(report.proof.score, 1.0);
    assert_eq!(report.proof.outcomes.len(), 3);
    assert!(dir.path().join("results.json").exists());
}

#[test]
fn repeated_runs_are_deterministic_modulo_timestamp() {
    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();

    let mut first = engine(dir_a.path());
    let mut second = engine(dir_b.path());

    // Mismo blob cifrado en ambas corridas: mismo content hash y misma
    // identidad de corrida (el run_id se deriva de config + artifact).
    let blob = seal(VALID_PAYLOAD.as_bytes(), &key()).unwrap();
    let artifact = |b: &Vec<u8>| EncryptedArtifact::new(b.clone(), "application/json", Some("0xabc".into())).unwrap();

    let report_a = first.run(artifact(&blob), &key()).unwrap();
    let report_b = second.run(artifact(&blob), &key()).unwrap();

    assert_eq!(report_a.run_id, report_b.run_id);
    assert_eq!(report_a.proof.without_timestamp(), report_b.proof.without_timestamp());
}

#[test]
fn check_registration_order_does_not_change_the_verdict() {
    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();

    let forward = selections();
    let mut reversed = selections();
    reversed.reverse();

    let build = |dir: &std::path::Path, selections: &[CheckSelection]| {
        let mut builder = ProofEngine::builder(config()).decryptor(Box::new(AeadDecryptor))
                                                        .loader(Box::new(JsonContributionLoader::new(schema(),
                                                                                                     64 * 1024)))
                                                        .sink(Box::new(SealedDirWriter::new(dir, None)));
        for check in build_checks(selections).unwrap() {
            builder = builder.check(check).unwrap();
        }
        builder.build().unwrap()
    };

    let mut eng_a = build(dir_a.path(), &forward);
    let mut eng_b = build(dir_b.path(), &reversed);

    let report_a = eng_a.run(sealed_artifact(VALID_PAYLOAD), &key()).unwrap();
    let report_b = eng_b.run(sealed_artifact(VALID_PAYLOAD), &key()).unwrap();

    assert_eq!(report_a.proof.score, report_b.proof.score);
    assert_eq!(report_a.proof.valid, report_b.proof.valid);
    // El orden de diagnóstico sí difiere.
    let names_a: Vec<&str> = report_a.proof.outcomes.iter().map(|o| o.check.as_str()).collect();
    let names_b: Vec<&str> = report_b.proof.outcomes.iter().map(|o| o.check.as_str()).collect();
    assert_eq!(names_a, vec!["structural", "duplicate", "semantic"]);
    assert_eq!(names_b, vec!["semantic", "duplicate", "structural"]);
}
