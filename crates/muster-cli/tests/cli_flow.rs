use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rusqlite::Connection;
use tempfile::TempDir;

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_muster"))
}

/// Isolated config/data homes plus a database path inside them.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(dir.path().join("config")).expect("create config dir");
        std::fs::create_dir_all(dir.path().join("data")).expect("create data dir");
        Self { dir }
    }

    fn db_path(&self) -> PathBuf {
        self.dir.path().join("models.db")
    }

    fn config_path(&self) -> PathBuf {
        self.dir.path().join("config").join("muster").join("config.toml")
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(bin());
        cmd.env("XDG_CONFIG_HOME", self.dir.path().join("config"))
            .env("XDG_DATA_HOME", self.dir.path().join("data"))
            .env_remove("MUSTER_DB")
            .env_remove("MUSTER_CONFIG")
            .env_remove("MUSTER_LOG");
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        let mut cmd = self.command();
        cmd.args(args).arg("--db").arg(self.db_path());
        cmd.output().expect("run muster")
    }

    fn run_with_stdin(&self, args: &[&str], stdin: &str) -> Output {
        let mut cmd = self.command();
        cmd.args(args)
            .arg("--db")
            .arg(self.db_path())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        let mut child = cmd.spawn().expect("spawn muster");
        child
            .stdin
            .take()
            .expect("stdin")
            .write_all(stdin.as_bytes())
            .expect("write stdin");
        child.wait_with_output().expect("wait for muster")
    }
}

fn assert_success(output: &Output, what: &str) {
    assert!(
        output.status.success(),
        "{} failed: stdout={}, stderr={}",
        what,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

fn json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("parse json output")
}

fn add_boyz(sandbox: &Sandbox) -> i64 {
    let add = sandbox.run(&[
        "add",
        "--game",
        "Warhammer",
        "--faction",
        "Orks",
        "--unit-name",
        "Boyz",
        "--unit-size",
        "10",
        "--purchase-date",
        "2024-01-15",
        "--json",
    ]);
    assert_success(&add, "add");
    json(&add)["id"].as_i64().expect("model id")
}

#[test]
fn test_cli_init_writes_config() {
    let sandbox = Sandbox::new();
    let db_path = sandbox.db_path();

    let init = sandbox
        .command()
        .arg("init")
        .arg(&db_path)
        .arg("--busy-timeout-ms")
        .arg("1500")
        .output()
        .expect("run init");
    assert_success(&init, "init");
    assert!(db_path.exists());

    let config = std::fs::read_to_string(sandbox.config_path()).expect("read config");
    assert!(config.contains("[database]"));
    assert!(config.contains("busy_timeout_ms = 1500"));
    assert!(config.contains("mode = \"best_effort\""));

    // The config's database path is used when --db is absent.
    let list = sandbox
        .command()
        .args(["list", "--json"])
        .output()
        .expect("run list");
    assert_success(&list, "list");
    assert_eq!(json(&list), serde_json::json!([]));

    let again = sandbox.command().arg("init").arg(&db_path).output().expect("run init");
    assert_eq!(again.status.code(), Some(4));
    assert!(String::from_utf8_lossy(&again.stderr).contains("--force"));
}

#[test]
fn test_cli_add_list_show() {
    let sandbox = Sandbox::new();
    let id = add_boyz(&sandbox);
    assert_eq!(id, 1);

    let list = sandbox.run(&["list", "--json"]);
    assert_success(&list, "list");
    let value = json(&list);
    let array = value.as_array().expect("list output array");
    assert_eq!(array.len(), 1);
    assert_eq!(array[0]["unit_name"], "Boyz");
    assert_eq!(array[0]["points"], 0);
    assert_eq!(array[0]["build_date"], "");

    let plain = sandbox.run(&["list", "--format", "plain"]);
    assert_success(&plain, "list plain");
    let line = String::from_utf8_lossy(&plain.stdout);
    assert!(line.starts_with("1\tWarhammer\tOrks\tBoyz\t10\t0\t2024-01-15\t-\t-"));

    let show = sandbox.run(&["show", "1"]);
    assert_success(&show, "show");
    let output = String::from_utf8_lossy(&show.stdout);
    assert!(output.contains("Unit:      Boyz"));
    assert!(output.contains("Stage:     unbuilt"));
}

#[test]
fn test_cli_update_writes_only_changed_fields() {
    let sandbox = Sandbox::new();
    let id = add_boyz(&sandbox);

    let update = sandbox.run(&[
        "update",
        &id.to_string(),
        "--points",
        "90",
        "--faction",
        "Orks",
        "--build-date",
        "2024-02-01",
    ]);
    assert_success(&update, "update");
    let output = String::from_utf8_lossy(&update.stdout);
    assert!(output.contains("Updated model 1 (points, build_date)"));

    let noop = sandbox.run(&["update", &id.to_string(), "--points", "90"]);
    assert_success(&noop, "noop update");
    assert!(String::from_utf8_lossy(&noop.stdout).contains("No changes to model 1"));

    let show = sandbox.run(&["show", &id.to_string(), "--json"]);
    let value = json(&show);
    assert_eq!(value["points"], 90);
    assert_eq!(value["build_date"], "2024-02-01");
}

#[test]
fn test_cli_invalid_date_keeps_earlier_fields() {
    let sandbox = Sandbox::new();
    let id = add_boyz(&sandbox);

    let update = sandbox.run(&[
        "update",
        &id.to_string(),
        "--points",
        "35",
        "--painted-date",
        "2024-13-01",
    ]);
    assert_eq!(update.status.code(), Some(4));
    let stderr = String::from_utf8_lossy(&update.stderr);
    assert!(stderr.contains("painted_date"));
    assert!(stderr.contains("--painted-date"));

    let value = json(&sandbox.run(&["show", &id.to_string(), "--json"]));
    assert_eq!(value["points"], 35);
    assert_eq!(value["painted_date"], "");
}

#[test]
fn test_cli_atomic_rolls_back_failed_update() {
    let sandbox = Sandbox::new();
    let id = add_boyz(&sandbox);

    let update = sandbox.run(&[
        "--atomic",
        "update",
        &id.to_string(),
        "--points",
        "35",
        "--painted-date",
        "not-a-date",
    ]);
    assert_eq!(update.status.code(), Some(4));

    let value = json(&sandbox.run(&["show", &id.to_string(), "--json"]));
    assert_eq!(value["points"], 0);
}

#[test]
fn test_cli_apply_from_stdin() {
    let sandbox = Sandbox::new();

    let mut rangers = serde_json::json!({
        "game": "Bolt Action",
        "faction": "US",
        "unit_name": "Rangers",
        "unit_size": 5,
        "purchase_date": "2023-11-20",
        "points": 120,
        "image": "cG5n",
    });
    let create = sandbox.run_with_stdin(&["apply", "--json"], &rangers.to_string());
    assert_success(&create, "apply create");
    let value = json(&create);
    let id = value["id"].as_i64().expect("id");
    assert_eq!(value["points"], 120);
    assert_eq!(value["image"], "cG5n");

    let conn = Connection::open(sandbox.db_path()).expect("open db");
    let image: Vec<u8> = conn
        .query_row("SELECT image FROM models WHERE id = ?1", [id], |row| row.get(0))
        .expect("read image");
    assert_eq!(image, STANDARD.decode("cG5n").expect("decode"));
    drop(conn);

    rangers["id"] = id.into();
    rangers["unit_size"] = 6.into();
    rangers["image"] = serde_json::Value::Null;
    let update = sandbox.run_with_stdin(&["apply"], &rangers.to_string());
    assert_success(&update, "apply update");
    assert!(String::from_utf8_lossy(&update.stdout).contains("(unit_size)"));

    rangers["id"] = 9999.into();
    let missing = sandbox.run_with_stdin(&["apply"], &rangers.to_string());
    assert_eq!(missing.status.code(), Some(3));

    let garbage = sandbox.run_with_stdin(&["apply"], "{not json");
    assert_eq!(garbage.status.code(), Some(4));
}

#[test]
fn test_cli_apply_partial_record_leaves_model_untouched() {
    let sandbox = Sandbox::new();
    let id = add_boyz(&sandbox);
    let before = json(&sandbox.run(&["show", &id.to_string(), "--json"]));

    let partial = serde_json::json!({ "id": id, "points": 40 }).to_string();
    let apply = sandbox.run_with_stdin(&["apply"], &partial);
    assert_eq!(apply.status.code(), Some(4));
    assert!(String::from_utf8_lossy(&apply.stderr).contains("missing field"));

    let after = json(&sandbox.run(&["show", &id.to_string(), "--json"]));
    assert_eq!(after, before);
    assert_eq!(after["faction"], "Orks");
    assert_eq!(after["points"], 0);
}

#[test]
fn test_cli_read_commands_do_not_create_database() {
    let sandbox = Sandbox::new();

    for args in [vec!["list"], vec!["show", "1"], vec!["check"], vec!["delete", "1", "--yes"]] {
        let output = sandbox.run(&args);
        assert_eq!(output.status.code(), Some(3), "{:?}", args);
        assert!(String::from_utf8_lossy(&output.stderr).contains("No database found"));
    }
    assert!(!sandbox.db_path().exists());
}

#[test]
fn test_cli_unknown_list_format_is_invalid_input() {
    let sandbox = Sandbox::new();
    add_boyz(&sandbox);

    let list = sandbox.run(&["list", "--format", "csv"]);
    assert_eq!(list.status.code(), Some(4));
    assert!(String::from_utf8_lossy(&list.stderr).contains("Unsupported format: csv"));
}

#[test]
fn test_cli_show_missing_model() {
    let sandbox = Sandbox::new();
    add_boyz(&sandbox);
    let show = sandbox.run(&["show", "42"]);
    assert_eq!(show.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&show.stderr);
    assert!(stderr.contains("Model 42 not found"));
    assert!(stderr.contains("muster list"));
}

#[test]
fn test_cli_delete_requires_confirmation() {
    let sandbox = Sandbox::new();
    let id = add_boyz(&sandbox).to_string();

    let refused = sandbox.run(&["delete", &id]);
    assert_eq!(refused.status.code(), Some(4));

    let delete = sandbox.run(&["delete", &id, "--yes"]);
    assert_success(&delete, "delete");

    let show = sandbox.run(&["show", &id]);
    assert_eq!(show.status.code(), Some(3));
}

#[test]
fn test_cli_reassign_and_reset_sequence() {
    let sandbox = Sandbox::new();
    let id = add_boyz(&sandbox);

    let reassign = sandbox.run(&["reassign-id", &id.to_string(), "7"]);
    assert_success(&reassign, "reassign-id");
    assert_success(&sandbox.run(&["show", "7"]), "show reassigned");
    assert_eq!(sandbox.run(&["show", &id.to_string()]).status.code(), Some(3));

    let reset = sandbox.run(&["reset-sequence", "100"]);
    assert_success(&reset, "reset-sequence");
    assert!(String::from_utf8_lossy(&reset.stdout).contains("Sequence reset to 100"));
    assert_eq!(add_boyz(&sandbox), 101);
}

#[test]
fn test_cli_reset_sequence_accepts_largest_value() {
    let sandbox = Sandbox::new();
    add_boyz(&sandbox);

    let max = i64::MAX.to_string();
    let reset = sandbox.run(&["reset-sequence", &max]);
    assert_success(&reset, "reset-sequence max");
    assert!(String::from_utf8_lossy(&reset.stdout).contains(&format!("Sequence reset to {}", max)));
}

#[test]
fn test_cli_check_reports_ok() {
    let sandbox = Sandbox::new();
    add_boyz(&sandbox);

    let check = sandbox.run(&["check"]);
    assert_success(&check, "check");
    let output = String::from_utf8_lossy(&check.stdout);
    assert!(output.contains("Integrity check: OK"));
    assert!(output.contains("- models: 1"));
}

#[test]
fn test_cli_completions() {
    let sandbox = Sandbox::new();
    let output = sandbox.command().args(["completions", "bash"]).output().expect("run");
    assert_success(&output, "completions");
    assert!(String::from_utf8_lossy(&output.stdout).contains("muster"));
}
