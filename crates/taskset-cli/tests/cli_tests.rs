//! CLI integration tests using assert_cmd.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn taskset() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("taskset").unwrap()
}

fn assignment(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../assignments")
        .join(name)
}

/// Run `generate` in an isolated directory and return the output dir.
fn generate_into(dir: &TempDir, extra: &[&str]) -> PathBuf {
    let out = dir.path().join("out");
    taskset()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("TASKSET_SEED")
        .env_remove("TASKSET_OUTPUT_DIR")
        .arg("generate")
        .arg("--assignment")
        .arg(assignment("equations.toml"))
        .arg("--output")
        .arg(&out)
        .args(extra)
        .assert()
        .success();
    out
}

fn read_manifest(out: &Path) -> serde_json::Value {
    let content = std::fs::read_to_string(out.join("manifest.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
fn validate_valid_assignment() {
    taskset()
        .arg("validate")
        .arg("--assignment")
        .arg(assignment("equations.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("3 tasks, 5 questions"))
        .stdout(predicate::str::contains("Assignment valid."));
}

#[test]
fn validate_reports_bad_expressions() {
    taskset()
        .arg("validate")
        .arg("--assignment")
        .arg(assignment("broken.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[task 1, question 1] range -5..5 is not valid for natural numbers",
        ))
        .stdout(predicate::str::contains("[task 1, question 2] unterminated expression"))
        .stdout(predicate::str::contains("2 warning(s) found."));
}

#[test]
fn validate_nonexistent_file() {
    taskset()
        .arg("validate")
        .arg("--assignment")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn render_range_with_seed() {
    let output = taskset()
        .args(["render", "x = \\[1..10]\\", "--seed", "3", "--times", "20"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 20);
    for line in lines {
        let value: i64 = line.strip_prefix("x = ").unwrap().parse().unwrap();
        assert!((1..=10).contains(&value), "{value} out of range");
    }
}

#[test]
fn render_list_picks_member() {
    let output = taskset()
        .args(["render", "pick \\[7,8,9]\\!", "--seed", "1", "--times", "10"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output).unwrap();
    for line in text.lines() {
        assert!(
            ["pick 7!", "pick 8!", "pick 9!"].contains(&line),
            "unexpected line {line}"
        );
    }
}

#[test]
fn render_unterminated_fails() {
    taskset()
        .args(["render", "x = \\[1..10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unterminated expression"));
}

#[test]
fn generate_writes_copies_and_manifest() {
    let dir = TempDir::new().unwrap();
    let out = generate_into(
        &dir,
        &["--copies", "3", "--shuffle", "--seed", "42", "--format", "all"],
    );

    for n in 1..=3 {
        assert!(out.join(format!("opgavesæt-{n}.html")).exists());
        assert!(out.join(format!("opgavesæt-{n}.json")).exists());
    }

    let manifest = read_manifest(&out);
    assert_eq!(manifest["assignment_title"], "Opgavesæt");
    assert_eq!(manifest["seed"], 42);

    let copies = manifest["copies"].as_array().unwrap();
    assert_eq!(copies.len(), 3);
    for copy in copies {
        let mut order: Vec<u64> = copy["page_order"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_u64().unwrap())
            .collect();
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2]);

        let first = copy["tasks"][0]["questions"][0].as_str().unwrap();
        assert!(first.starts_with("A) Løs følgende: "));
        assert!(!first.contains("\\["));
    }

    let html = std::fs::read_to_string(out.join("opgavesæt-1.html")).unwrap();
    assert_eq!(html.matches("<section class=\"page\"").count(), 4);
}

#[test]
fn generate_is_reproducible_with_seed() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let args = ["--copies", "2", "--shuffle", "--seed", "7"];

    let a = read_manifest(&generate_into(&first, &args));
    let b = read_manifest(&generate_into(&second, &args));

    for (x, y) in a["copies"]
        .as_array()
        .unwrap()
        .iter()
        .zip(b["copies"].as_array().unwrap())
    {
        assert_eq!(x["page_order"], y["page_order"]);
        assert_eq!(x["tasks"], y["tasks"]);
    }
}

#[test]
fn generate_uses_local_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("taskset.toml"),
        "copies = 2\nseed = 11\nformat = \"json\"\n",
    )
    .unwrap();

    let out = generate_into(&dir, &[]);

    assert!(out.join("opgavesæt-2.json").exists());
    assert!(!out.join("opgavesæt-1.html").exists());
    assert_eq!(read_manifest(&out)["seed"], 11);
}

#[test]
fn no_shuffle_flag_overrides_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("taskset.toml"),
        "shuffle = true\nformat = \"json\"\n",
    )
    .unwrap();

    let out = generate_into(&dir, &["--copies", "6", "--seed", "3", "--no-shuffle"]);

    let manifest = read_manifest(&out);
    for copy in manifest["copies"].as_array().unwrap() {
        assert_eq!(copy["page_order"], serde_json::json!([0, 1, 2]));
    }
}

#[test]
fn generate_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    taskset()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .arg("generate")
        .arg("--assignment")
        .arg(assignment("equations.toml"))
        .arg("--format")
        .arg("pdf")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown export format"));
}

#[test]
fn generate_fails_on_bad_expression() {
    let dir = TempDir::new().unwrap();
    taskset()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .arg("generate")
        .arg("--assignment")
        .arg(assignment("broken.toml"))
        .arg("--output")
        .arg(dir.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid for natural numbers"));

    assert!(!dir.path().join("out").join("manifest.json").exists());
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    taskset()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created taskset.toml"))
        .stdout(predicate::str::contains("Created assignments/example.toml"));

    assert!(dir.path().join("taskset.toml").exists());
    assert!(dir.path().join("assignments/example.toml").exists());

    taskset()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("taskset.toml already exists, skipping."));

    taskset()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--assignment")
        .arg("assignments/example.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("Assignment valid."));
}
