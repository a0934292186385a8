//! End-to-end tests of the `asp` binary over small event files.

#![allow(missing_docs)]
#![allow(
    clippy::indexing_slicing,
    reason = "Test code should panic on invalid data"
)]

use std::path::{Path, PathBuf};

use asp_core::schema::config::{HashFunctionName, TreeConfig};
use asp_nmt::{LeafLayer, NamespaceGrouping, calc_root, event_record};
use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use tempfile::{TempDir, tempdir};
use test_utils::sample_event;

const SENDERS: [(u8, u8); 5] = [(5, 1), (1, 2), (3, 3), (1, 4), (5, 5)];

fn asp(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("asp");
    cmd.current_dir(dir);
    for var in [
        "ASP_EVENTS_FILE",
        "ASP_CONFIG_FILE",
        "ASP_HASH_FUNCTION",
        "ASP_ROOT_OUT",
        "ASP_NAMESPACE",
        "ASP_PROOF_OUT",
        "ASP_CONFIG_OUT",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn s(path: &Path) -> &str {
    path.to_str().expect("Failed to convert path to str")
}

fn write_events(dir: &TempDir) -> PathBuf {
    let events: Vec<_> = SENDERS
        .iter()
        .map(|&(sender, nonce)| sample_event(sender, nonce))
        .collect();
    let path = dir.path().join("events.json");
    std::fs::write(&path, serde_json::to_string(&events).expect("serialize"))
        .expect("Failed to write events");
    path
}

fn sender_hex(sender: u8) -> String {
    format!("0x{}{sender:02x}", "00".repeat(31))
}

fn load_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).expect("Failed to read report"))
        .expect("Report is JSON")
}

fn expected_root_hash(hash_function: HashFunctionName) -> String {
    let config = TreeConfig {
        hash_function,
        ..TreeConfig::default()
    };
    let mut grouping = NamespaceGrouping::new(config.namespace_size());
    for &(sender, nonce) in &SENDERS {
        let record = event_record(&sample_event(sender, nonce)).expect("canonical event");
        grouping.push(record).expect("event width");
    }
    let LeafLayer { layer, .. } = grouping.leaf_layer();
    let (root, _) = calc_root(
        config.namespace_size(),
        &config.hash_function,
        &layer,
        config.zero_element(),
    )
    .expect("root");
    root.hash().to_hex()
}

#[test]
fn config_init_writes_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let out = dir.path().join("tree_config.json");

    asp(dir.path())
        .args(["config", "init", "--out", s(&out)])
        .assert()
        .success();

    let config: TreeConfig =
        serde_json::from_str(&std::fs::read_to_string(&out).expect("config written"))
            .expect("config parses");
    assert_eq!(config, TreeConfig::default());
}

#[test]
fn root_report_matches_library_root() {
    let dir = tempdir().expect("Failed to create temp dir");
    let events = write_events(&dir);
    let out = dir.path().join("root.json");

    asp(dir.path())
        .args(["root", "--events", s(&events), "--out", s(&out)])
        .assert()
        .success();

    let report = load_json(&out);
    assert_eq!(report["hash_function"], "poseidon2");
    assert_eq!(report["namespace_size"], 32);
    assert_eq!(report["leaves"], 5);
    assert_eq!(report["levels"], 3);
    assert_eq!(
        report["root_hash"],
        expected_root_hash(HashFunctionName::Poseidon2)
    );
    assert_eq!(report["min_namespace"], &sender_hex(1)[2..]);
    assert_eq!(report["max_namespace"], &sender_hex(5)[2..]);
}

#[test]
fn config_file_and_override_select_the_hash_function() {
    let dir = tempdir().expect("Failed to create temp dir");
    let events = write_events(&dir);
    let config_path = dir.path().join("tree_config.json");
    let config = TreeConfig {
        hash_function: HashFunctionName::Mimc7,
        ..TreeConfig::default()
    };
    std::fs::write(
        &config_path,
        serde_json::to_string(&config).expect("serialize"),
    )
    .expect("Failed to write config");

    let from_file = dir.path().join("from_file.json");
    asp(dir.path())
        .args(["root", "--events", s(&events), "--config", s(&config_path)])
        .args(["--out", s(&from_file)])
        .assert()
        .success();
    let report = load_json(&from_file);
    assert_eq!(report["hash_function"], "mimc7");
    assert_eq!(
        report["root_hash"],
        expected_root_hash(HashFunctionName::Mimc7)
    );

    let overridden = dir.path().join("overridden.json");
    asp(dir.path())
        .args(["root", "--events", s(&events), "--config", s(&config_path)])
        .args(["--hash-function", "sha256", "--out", s(&overridden)])
        .assert()
        .success();
    let report = load_json(&overridden);
    assert_eq!(report["hash_function"], "sha256");
    assert_eq!(
        report["root_hash"],
        expected_root_hash(HashFunctionName::Sha256)
    );
}

#[test]
fn prove_reports_inclusion_absence_and_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let events = write_events(&dir);
    let root_hash = expected_root_hash(HashFunctionName::Poseidon2);

    // Leaves sorted by sender: 1, 1, 3, 5, 5.
    for (sender, kind, start, end) in [
        (1_u8, "inclusion", 0, 2),
        (3, "inclusion", 2, 3),
        (5, "inclusion", 3, 5),
        (2, "absence", 2, 3),
        (4, "absence", 3, 4),
        (9, "empty", 0, 0),
    ] {
        let out = dir.path().join(format!("proof_{sender}.json"));
        asp(dir.path())
            .args(["prove", "--events", s(&events)])
            .args(["--namespace", &sender_hex(sender), "--out", s(&out)])
            .assert()
            .success();

        let report = load_json(&out);
        assert_eq!(report["kind"], kind, "sender {sender}");
        assert_eq!(report["start"], start, "sender {sender}");
        assert_eq!(report["end"], end, "sender {sender}");
        assert_eq!(report["root_hash"], root_hash);
        assert_eq!(report["verified"], true);
        assert_eq!(report["leaf"].is_string(), kind == "absence");
    }
}

#[test]
fn arguments_fall_back_to_environment() {
    let dir = tempdir().expect("Failed to create temp dir");
    let events = write_events(&dir);
    let out = dir.path().join("proof.json");

    asp(dir.path())
        .arg("prove")
        .env("ASP_EVENTS_FILE", s(&events))
        .env("ASP_NAMESPACE", sender_hex(3))
        .env("ASP_PROOF_OUT", s(&out))
        .assert()
        .success();

    assert_eq!(load_json(&out)["kind"], "inclusion");
}

#[test]
fn invalid_inputs_fail_with_status_one() {
    let dir = tempdir().expect("Failed to create temp dir");
    let events = write_events(&dir);

    // Namespace narrower than the tree's.
    asp(dir.path())
        .args(["prove", "--events", s(&events), "--namespace", "0x01"])
        .assert()
        .code(1);

    let missing = dir.path().join("missing.json");
    asp(dir.path())
        .args(["root", "--events", s(&missing)])
        .assert()
        .code(1);

    let empty = dir.path().join("empty.json");
    std::fs::write(&empty, "[]").expect("Failed to write events");
    asp(dir.path())
        .args(["root", "--events", s(&empty)])
        .assert()
        .code(1);

    asp(dir.path())
        .args(["root", "--events", s(&events), "--hash-function", "keccak"])
        .assert()
        .failure();
}
