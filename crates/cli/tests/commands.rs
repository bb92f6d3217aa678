use assert_cmd::prelude::*;
use predicates::str::contains;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

fn resonance() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("resonance"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("command run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid json")
}

#[test]
fn ciphers_lists_the_catalogue() {
    resonance()
        .arg("ciphers")
        .assert()
        .success()
        .stdout(contains("gemini-resonance"))
        .stdout(contains("Simple Gematria"));

    let list = stdout_json(resonance().args(["ciphers", "--json"]));
    let list = list.as_array().expect("array");
    assert_eq!(list.len(), 41);
    assert!(list.iter().any(|c| c["id"] == "composite-ctgb"));
}

#[test]
fn compute_renders_the_report() {
    resonance()
        .args(["compute", "cat", "--cipher", "simple", "--seed", "1"])
        .assert()
        .success()
        .stdout(contains("# Resonance report: `cat`"))
        .stdout(contains("| Simple Gematria | `24` |"))
        .stdout(contains("- Concatenated: `22614424`"))
        .stdout(contains("## Final resonance sequence"));
}

#[test]
fn compute_without_phrases_fails() {
    resonance()
        .arg("compute")
        .assert()
        .failure()
        .stderr(contains("No phrases given"));
}

#[test]
fn compute_rejects_unknown_ciphers() {
    resonance()
        .args(["compute", "cat", "--cipher", "no-such-cipher"])
        .assert()
        .failure()
        .stderr(contains("Unknown cipher: no-such-cipher"));
}

#[test]
fn save_requires_an_additions_file() {
    resonance()
        .args(["compute", "cat", "--save"])
        .assert()
        .failure()
        .stderr(contains("--additions"));
}

#[test]
fn compute_json_reads_phrases_from_file() {
    let temp = tempdir().unwrap();
    let phrases = temp.path().join("phrases.txt");
    fs::write(&phrases, "cat\n\n  dog  \n").unwrap();

    let body = stdout_json(resonance().args([
        "compute",
        "bird",
        "--file",
        phrases.to_str().unwrap(),
        "--seed",
        "7",
        "--json",
    ]));
    let results = body.as_array().expect("array");
    let texts: Vec<&str> = results
        .iter()
        .map(|r| r["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["bird", "cat", "dog"]);
    assert_eq!(results[1]["initial"]["digits"], "22614424");
    assert_eq!(
        results[1]["numbers"].as_array().unwrap().len(),
        results[1]["matches"].as_array().unwrap().len()
    );
}

#[test]
fn save_then_compute_finds_the_phrase() {
    let temp = tempdir().unwrap();
    let additions = temp.path().join("db").join("additions.txt");
    let additions_arg = additions.to_str().unwrap();

    let first = stdout_json(resonance().args([
        "compute",
        "hello world",
        "--additions",
        additions_arg,
        "--save",
        "--seed",
        "3",
        "--json",
    ]));
    let numbers = first[0]["numbers"].as_array().unwrap().len();
    assert!(numbers > 0);

    let saved = fs::read_to_string(&additions).unwrap();
    assert_eq!(saved.lines().count(), numbers);
    assert!(saved.lines().all(|line| line.starts_with("hello world|")));

    let second = stdout_json(resonance().args([
        "compute",
        "hello world",
        "--additions",
        additions_arg,
        "--seed",
        "3",
        "--json",
    ]));
    let matches = second[0]["matches"].as_array().unwrap();
    assert!(matches.iter().all(|m| m["status"] == "found"));
}

#[test]
fn record_appends_associations() {
    let temp = tempdir().unwrap();
    let additions = temp.path().join("additions.txt");

    resonance()
        .args([
            "record",
            "good cat",
            "36",
            "12",
            "--additions",
            additions.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(contains("Recorded 2 association(s)"));

    assert_eq!(
        fs::read_to_string(&additions).unwrap(),
        "good cat|12\ngood cat|36\n"
    );
}

#[test]
fn config_file_enables_prime_only() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("resonance.toml");
    fs::write(&config, "prime_only = true\n").unwrap();

    let body = stdout_json(resonance().args([
        "--config",
        config.to_str().unwrap(),
        "compute",
        "hello world",
        "--seed",
        "1",
        "--json",
    ]));
    let result = &body[0];
    assert_eq!(result["prime_only"], true);
    assert!(result["numbers"]
        .as_array()
        .unwrap()
        .iter()
        .all(|n| n["prime"] == true));
}

#[test]
fn invalid_config_is_reported() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("resonance.toml");
    fs::write(&config, "base_conversion = 99\n").unwrap();

    resonance()
        .args(["--config", config.to_str().unwrap(), "ciphers"])
        .assert()
        .failure()
        .stderr(contains("base_conversion"));
}

fn additions_with_neighbours(dir: &Path) -> PathBuf {
    let additions = dir.join("additions.txt");
    fs::write(&additions, "bird|7\ncat|7\ndog|7\nfeline|226\nkitten|226\n").unwrap();
    additions
}

#[test]
fn connect_lists_phrases_under_each_score() {
    let temp = tempdir().unwrap();
    let additions = additions_with_neighbours(temp.path());
    let additions_arg = additions.to_str().unwrap();

    resonance()
        .args(["connect", "7", "--seed", "5"])
        .args(["--additions", additions_arg])
        .assert()
        .success()
        .stdout(contains("# Connections for `7`"))
        .stdout(contains("- cat: `226` -> feline, kitten"))
        .stdout(contains("- dog: `156` -> None"));

    let body = stdout_json(resonance().args([
        "connect",
        "7",
        "--additions",
        additions_arg,
        "--initial",
        "2",
        "--connected",
        "1",
        "--seed",
        "5",
        "--json",
    ]));
    assert_eq!(body["status"], "found");
    assert_eq!(body["cipher"], "gemini-resonance");
    let connections = body["connections"].as_array().unwrap();
    assert_eq!(connections.len(), 2);
    for connection in connections {
        let connected = connection["connected"].as_array().unwrap();
        assert!(connected.len() <= 1);
        if connection["phrase"] == "cat" {
            assert_eq!(connection["connected"][0], "feline");
        }
    }
}

#[test]
fn connect_reports_numbers_without_phrases() {
    let temp = tempdir().unwrap();
    let additions = additions_with_neighbours(temp.path());

    resonance()
        .args(["connect", "8", "--additions", additions.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("No phrases found."));
}

#[test]
fn lookup_prints_sorted_phrases() {
    let temp = tempdir().unwrap();
    let additions = additions_with_neighbours(temp.path());
    let additions_arg = additions.to_str().unwrap();

    resonance()
        .args(["lookup", "7", "--limit", "2"])
        .args(["--additions", additions_arg])
        .assert()
        .success()
        .stdout("- bird\n- cat\n");

    let args = ["lookup", "226", "--additions", additions_arg, "--json"];
    let body = stdout_json(resonance().args(args));
    assert_eq!(body["number"], 226);
    assert_eq!(body["phrases"], serde_json::json!(["feline", "kitten"]));

    resonance()
        .args(["lookup", "9", "--additions", additions_arg])
        .assert()
        .success()
        .stdout("No phrases found.\n");
}
