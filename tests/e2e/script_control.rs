// End-to-end tests for script control mode, through the real binary and
// through the library entry point

use dreamscape::app::script_control::{ScriptControlMode, ScriptResponse};
use dreamscape::config::Config;
use dreamscape::model::SceneState;
use serde_json::Value;
use std::io::Write;
use std::process::{Command, Stdio};

/// Feed `commands` to `dreamscape --script-mode` and collect its JSON responses
fn run_script(commands: &[&str]) -> Vec<Value> {
    let dir = tempfile::tempdir().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_dreamscape"))
        .args(["--script-mode", "--script-width", "100", "--script-height", "30"])
        .current_dir(dir.path())
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    {
        let stdin = child.stdin.as_mut().unwrap();
        for command in commands {
            writeln!(stdin, "{}", command).unwrap();
        }
    }
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_binary_runs_scripted_session() {
    let responses = run_script(&[
        r#"{"type":"submit"}"#,
        r#"{"type":"add_object","kind":"cube"}"#,
        r#"{"type":"wait_for","condition":{"type":"log_contains","text":"Rendering complete!"}}"#,
        r#"{"type":"status"}"#,
        r#"{"type":"quit"}"#,
    ]);

    // Ready banner plus one response per command
    assert_eq!(responses.len(), 6);
    assert_eq!(responses[0]["type"], "ok");
    assert_eq!(responses[3]["type"], "ok");
    assert_eq!(responses[3]["message"], "Condition met after 1500ms");

    let status = &responses[4];
    assert_eq!(status["type"], "status");
    assert_eq!(status["scene"], "active");
    assert_eq!(status["pending"], Value::Null);
    assert_eq!(status["log_len"], 2 + 1 + 1 + 5);
}

#[test]
fn test_binary_reports_bad_commands_and_continues() {
    let responses = run_script(&[
        "not json",
        r#"{"type":"key","code":"NoSuchKey"}"#,
        r#"{"type":"get_log","tail":1}"#,
    ]);

    assert_eq!(responses[1]["type"], "error");
    assert_eq!(responses[2]["type"], "error");
    assert_eq!(responses[3]["type"], "log");
    assert_eq!(
        responses[3]["entries"][0]["text"],
        "> Ready to execute code..."
    );
}

#[test]
fn test_binary_prints_schemas() {
    let output = Command::new(env!("CARGO_BIN_EXE_dreamscape"))
        .arg("--script-schema")
        .output()
        .unwrap();
    let schema: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(schema["commands"].is_array());

    let output = Command::new(env!("CARGO_BIN_EXE_dreamscape"))
        .arg("--print-config-schema")
        .output()
        .unwrap();
    let schema: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(schema["properties"]["execution"].is_object());
}

#[test]
fn test_rerun_through_script_commands() {
    let mut control =
        ScriptControlMode::new(Config::default(), 100, 30, std::env::temp_dir()).unwrap();
    control.handle_line(r#"{"type":"submit","code":"a"}"#).unwrap();
    control.handle_line(r#"{"type":"advance","ms":700}"#).unwrap();
    control.handle_line(r#"{"type":"submit","code":"b"}"#).unwrap();

    let response = control
        .handle_line(r#"{"type":"advance","ms":1500}"#)
        .unwrap();
    assert!(matches!(
        response,
        ScriptResponse::Ok { message: Some(ref m) } if m == "Execution completed"
    ));
    assert_eq!(control.console().scene(), SceneState::Active);

    let cancellations = control
        .console()
        .orchestrator()
        .snapshot()
        .iter()
        .filter(|e| e.text.contains("cancelled"))
        .count();
    assert_eq!(cancellations, 1);
}

#[test]
fn test_exported_test_mentions_harness_calls() {
    let mut control =
        ScriptControlMode::new(Config::default(), 100, 30, std::env::temp_dir()).unwrap();
    control.handle_line(r#"{"type":"type_text","text":"x = \"1\""}"#).unwrap();
    control.handle_line(r#"{"type":"rotate"}"#).unwrap();
    control.handle_line(r#"{"type":"zoom","percent":120}"#).unwrap();

    let response = control
        .handle_line(r#"{"type":"export_test","test_name":"test_scripted"}"#)
        .unwrap();
    let ScriptResponse::TestCode { code } = response else {
        panic!("expected test code");
    };
    assert!(code.contains(r#"harness.type_text("x = \"1\"")?;"#));
    assert!(code.contains("harness.rotate_camera()?;"));
    assert!(code.contains("harness.set_zoom(120)?;"));
}
