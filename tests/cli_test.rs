//! CLI end-to-end tests
//!
//! Learns a Czech model from a small sample with the real binary, then runs
//! detection on files written in each trained encoding.

use chared::charset::encode_sample;
use std::path::Path;
use std::process::{Command, Output};

const SAMPLE: &str = "\
Příliš žluťoučký kůň úpěl ďábelské ódy.
Čeština je západoslovanský jazyk, nejbližší slovenštině.
Používá diakritiku: háček (č, ř, š, ž, ě, ď, ť, ň) a čárku (á, é, í, ó, ú, ý).
Kroužek se píše pouze nad písmenem ů uprostřed nebo na konci slova.
";

const MANIFEST: &str = r#"
[model]
encodings = ["utf_8", "windows_1250", "iso8859_2"]
reduce = true
"#;

fn chared_bin() -> &'static str {
    env!("CARGO_BIN_EXE_chared")
}

fn chared(config_home: &Path, args: &[&str]) -> Output {
    Command::new(chared_bin())
        .args(args)
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("CHARED_MODEL")
        .env_remove("CHARED_MODELS_DIR")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run chared")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Learns `czech.edm` into `<dir>/models` and returns the models dir.
fn setup_model(dir: &Path) -> std::path::PathBuf {
    let sample = dir.join("sample.txt");
    let manifest = dir.join("czech.toml");
    let models = dir.join("models");
    std::fs::write(&sample, SAMPLE).unwrap();
    std::fs::write(&manifest, MANIFEST).unwrap();

    let output_path = models.join("czech.edm");
    let out = chared(
        dir,
        &[
            "learn",
            sample.to_str().unwrap(),
            "--manifest",
            manifest.to_str().unwrap(),
            "-o",
            output_path.to_str().unwrap(),
        ],
    );
    assert!(out.status.success(), "learn failed: {}", String::from_utf8_lossy(&out.stderr));
    assert!(output_path.is_file());
    models
}

#[test]
fn test_learn_then_detect_each_encoding() {
    let dir = tempfile::tempdir().unwrap();
    let models = setup_model(dir.path());

    let text = "Žluťoučký kůň pěl ďábelské ódy, příliš úžasné.";
    let mut files = Vec::new();
    for encoding in ["utf_8", "windows_1250", "iso8859_2"] {
        let path = dir.path().join(format!("{encoding}.txt"));
        std::fs::write(&path, encode_sample(text, encoding).unwrap()).unwrap();
        files.push((encoding, path));
    }

    let mut args = vec!["--models-dir", models.to_str().unwrap(), "detect", "-m", "czech"];
    args.extend(files.iter().map(|(_, p)| p.to_str().unwrap()));
    let out = chared(dir.path(), &args);
    assert!(out.status.success(), "detect failed: {}", String::from_utf8_lossy(&out.stderr));

    let stdout = stdout(&out);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    for ((encoding, path), line) in files.iter().zip(&lines) {
        assert_eq!(*line, format!("{}: {}", path.display(), encoding));
    }
}

#[test]
fn test_detect_json_with_all_candidates() {
    let dir = tempfile::tempdir().unwrap();
    let models = setup_model(dir.path());
    let model_file = models.join("czech.edm");

    let path = dir.path().join("input.txt");
    std::fs::write(&path, encode_sample("Příliš žluťoučký kůň.", "windows_1250").unwrap()).unwrap();

    let out = chared(
        dir.path(),
        &[
            "detect",
            "-m",
            model_file.to_str().unwrap(),
            "--all",
            "--format",
            "json",
            path.to_str().unwrap(),
        ],
    );
    assert!(out.status.success());

    let v: serde_json::Value = serde_json::from_str(&stdout(&out)).expect("Invalid JSON");
    let report = &v.as_array().unwrap()[0];
    assert_eq!(report["encodings"], serde_json::json!(["windows_1250"]));
    let candidates = report["candidates"].as_array().unwrap();
    assert_eq!(candidates.len(), 3);
    assert_eq!(candidates[0]["encoding"], "windows_1250");
    // invalid UTF-8 input: utf_8 is forced to zero
    let utf8 = candidates.iter().find(|c| c["encoding"] == "utf_8").unwrap();
    assert_eq!(utf8["score"].as_f64(), Some(0.0));
}

#[test]
fn test_unreadable_file_fails_after_others() {
    let dir = tempfile::tempdir().unwrap();
    let models = setup_model(dir.path());

    let good = dir.path().join("good.txt");
    std::fs::write(&good, "kůň".as_bytes()).unwrap();
    let missing = dir.path().join("missing.txt");

    let out = chared(
        dir.path(),
        &[
            "--models-dir",
            models.to_str().unwrap(),
            "detect",
            "-m",
            "czech",
            good.to_str().unwrap(),
            missing.to_str().unwrap(),
        ],
    );
    assert!(!out.status.success());
    assert!(stdout(&out).contains("good.txt: utf_8"));
    assert!(String::from_utf8_lossy(&out.stderr).contains("missing.txt"));
}

#[test]
fn test_models_lists_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let models = setup_model(dir.path());

    let out = chared(dir.path(), &["--models-dir", models.to_str().unwrap(), "models", "--format", "json"]);
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(v[0]["id"], "czech");
}

#[test]
fn test_unknown_model_fails() {
    let dir = tempfile::tempdir().unwrap();
    let models = setup_model(dir.path());
    let input = dir.path().join("x.txt");
    std::fs::write(&input, "x").unwrap();

    let out = chared(
        dir.path(),
        &["--models-dir", models.to_str().unwrap(), "detect", "-m", "klingon", input.to_str().unwrap()],
    );
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("klingon"));
}

#[test]
fn test_model_id_wins_over_same_named_file_in_cwd() {
    let dir = tempfile::tempdir().unwrap();
    let models = setup_model(dir.path());
    std::fs::write(dir.path().join("czech"), "not a model").unwrap();
    let input = dir.path().join("in.txt");
    std::fs::write(&input, "kůň".as_bytes()).unwrap();

    let out = Command::new(chared_bin())
        .current_dir(dir.path())
        .args(["--models-dir", models.to_str().unwrap(), "detect", "-m", "czech", input.to_str().unwrap()])
        .env("XDG_CONFIG_HOME", dir.path())
        .env_remove("CHARED_MODEL")
        .env_remove("CHARED_MODELS_DIR")
        .output()
        .expect("Failed to run chared");
    assert!(out.status.success(), "detect failed: {}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout(&out).contains("in.txt: utf_8"));
}

#[test]
fn test_scalar_encodings_manifest_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let sample = dir.path().join("sample.txt");
    let manifest = dir.path().join("bad.toml");
    std::fs::write(&sample, SAMPLE).unwrap();
    std::fs::write(&manifest, "[model]\nencodings = \"utf_8\"\n").unwrap();

    let out = chared(
        dir.path(),
        &[
            "learn",
            sample.to_str().unwrap(),
            "-e",
            manifest.to_str().unwrap(),
            "-o",
            dir.path().join("out.edm").to_str().unwrap(),
        ],
    );
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Invalid type"));
    assert!(!dir.path().join("out.edm").exists());
}
