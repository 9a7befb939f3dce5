use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const SPEC: &str = r#"
openapi: 3.0.3
info:
  title: User Service
  version: 2.1.0
paths:
  /user:
    get:
      operationId: getUser
      parameters:
        - name: id
          in: query
          required: true
          schema:
            type: string
      responses:
        "200":
          description: the user
  /sync:
    post:
      operationId: syncData
      requestBody:
        content:
          application/json:
            schema:
              type: object
      responses:
        "204":
          description: synced
components:
  schemas:
    User:
      type: object
"#;

const WORKFLOWS: &str = r#"
workflows:
  - workflowId: sync-user-data
    steps:
      - stepId: fetchUser
        operationId: getUser
        preHook: authCheck
      - stepId: pushData
        operationId: syncData
        postHook: auditLog
"#;

fn fixtures(workflows: &str) -> (TempDir, PathBuf, PathBuf) {
    let tmp_dir = TempDir::new().unwrap();
    let spec_path = tmp_dir.path().join("openapi.yaml");
    let wf_path = tmp_dir.path().join("flows.yaml");
    fs::write(&spec_path, SPEC).unwrap();
    fs::write(&wf_path, workflows).unwrap();
    (tmp_dir, spec_path, wf_path)
}

/// `{"error": ...}` lines from stderr, skipping log output.
fn json_errors(stderr: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stderr)
        .lines()
        .filter_map(|line| serde_json::from_str::<serde_json::Value>(line).ok())
        .filter_map(|v| v["error"].as_str().map(String::from))
        .collect()
}

#[test]
fn test_compile_prints_flow_json() {
    let (_tmp, spec, wf) = fixtures(WORKFLOWS);
    let out = Command::cargo_bin("mcpgen")
        .unwrap()
        .args(["compile", spec.to_str().unwrap(), wf.to_str().unwrap(), "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["flows"][0]["workflowId"], "sync-user-data");
    assert_eq!(v["flows"][0]["steps"][1]["endpoint"]["method"], "POST");
    assert_eq!(v["errors"].as_array().unwrap().len(), 0);
}

#[test]
fn test_compile_unresolved_reference_exits_2() {
    let broken = r#"
workflows:
  - workflowId: w
    steps:
      - stepId: s1
        operationId: deleteEverything
"#;
    let (_tmp, spec, wf) = fixtures(broken);
    let assert = Command::cargo_bin("mcpgen")
        .unwrap()
        .args(["compile", spec.to_str().unwrap(), wf.to_str().unwrap()])
        .assert()
        .code(2);

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(stderr.contains("deleteEverything"));
}

#[test]
fn test_compile_unknown_workflow_selection() {
    let (_tmp, spec, wf) = fixtures(WORKFLOWS);
    Command::cargo_bin("mcpgen")
        .unwrap()
        .args([
            "compile",
            spec.to_str().unwrap(),
            wf.to_str().unwrap(),
            "--workflow",
            "missing",
        ])
        .assert()
        .code(2);
}

#[test]
fn test_generate_with_template_backend_writes_artifact() {
    let (tmp, spec, wf) = fixtures(WORKFLOWS);
    let out_dir = tmp.path().join("gen");

    Command::cargo_bin("mcpgen")
        .unwrap()
        .args([
            "generate",
            spec.to_str().unwrap(),
            wf.to_str().unwrap(),
            "--out",
            out_dir.to_str().unwrap(),
            "--backend",
            "template",
        ])
        .assert()
        .success();

    let code = fs::read_to_string(out_dir.join("sync-user-data.go")).unwrap();
    assert!(code.starts_with("// Code generated by mcpgen"));
    assert!(code.contains("\"workflowId\": \"sync-user-data\""));
    assert!(code.contains("before step `fetchUser`: call `authCheck`"));
    let entries: Vec<_> = fs::read_dir(&out_dir).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_generate_language_controls_extension() {
    let (tmp, spec, wf) = fixtures(WORKFLOWS);
    let out_dir = tmp.path().join("gen");

    Command::cargo_bin("mcpgen")
        .unwrap()
        .args([
            "generate",
            spec.to_str().unwrap(),
            wf.to_str().unwrap(),
            "--out",
            out_dir.to_str().unwrap(),
            "--language",
            "Python",
        ])
        .assert()
        .success();

    let code = fs::read_to_string(out_dir.join("sync-user-data.py")).unwrap();
    assert!(code.starts_with("# Code generated by mcpgen"));
    assert!(code.contains("Generate idiomatic Python server code"));
}

#[test]
fn test_generate_chat_backend_without_key_exits_3() {
    let (tmp, spec, wf) = fixtures(WORKFLOWS);
    let out_dir = tmp.path().join("gen");

    Command::cargo_bin("mcpgen")
        .unwrap()
        .env_remove("MCPGEN_CREDENTIAL")
        .env_remove("MCPGEN_BACKEND_URL")
        .env_remove("MCPGEN_MODEL")
        .args([
            "generate",
            spec.to_str().unwrap(),
            wf.to_str().unwrap(),
            "--out",
            out_dir.to_str().unwrap(),
            "--backend",
            "chat",
            "--credential",
            "env:MCPGEN_TEST_UNSET_KEY",
        ])
        .env_remove("MCPGEN_TEST_UNSET_KEY")
        .assert()
        .code(3);

    assert!(!out_dir.join("sync-user-data.go").exists());
}

#[test]
fn test_generate_compile_error_writes_nothing() {
    let broken = r#"
workflows:
  - workflowId: w
    steps:
      - stepId: s1
        operationId: nope
"#;
    let (tmp, spec, wf) = fixtures(broken);
    let out_dir = tmp.path().join("gen");

    Command::cargo_bin("mcpgen")
        .unwrap()
        .args([
            "generate",
            spec.to_str().unwrap(),
            wf.to_str().unwrap(),
            "--out",
            out_dir.to_str().unwrap(),
        ])
        .assert()
        .code(2);

    assert!(!out_dir.exists());
}

#[test]
fn test_inspect_summarizes_spec() {
    let (_tmp, spec, _wf) = fixtures(WORKFLOWS);
    let out = Command::cargo_bin("mcpgen")
        .unwrap()
        .args(["inspect", spec.to_str().unwrap(), "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["flavor"], "openapi");
    assert_eq!(v["title"], "User Service");
    assert_eq!(v["path_count"], 2);
    assert_eq!(v["schema_count"], 1);
    assert_eq!(v["endpoints"].as_array().unwrap().len(), 2);
}

#[test]
fn test_inspect_missing_file_is_runtime_error() {
    Command::cargo_bin("mcpgen")
        .unwrap()
        .args(["inspect", "/definitely/not/here.yaml"])
        .assert()
        .code(4);
}

#[test]
fn test_generate_rejects_workflow_id_that_leaves_out_dir() {
    let escaping = r#"
workflows:
  - workflowId: "../escaped"
    steps:
      - stepId: fetchUser
        operationId: getUser
"#;
    let (tmp, spec, wf) = fixtures(escaping);
    let out_dir = tmp.path().join("gen");

    let assert = Command::cargo_bin("mcpgen")
        .unwrap()
        .args([
            "generate",
            spec.to_str().unwrap(),
            wf.to_str().unwrap(),
            "--out",
            out_dir.to_str().unwrap(),
        ])
        .assert()
        .code(2);

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(stderr.contains("workflows[0].workflowId"));
    assert!(!tmp.path().join("escaped.go").exists());
    assert!(!out_dir.exists());
}

#[test]
fn test_compile_json_mode_reports_errors_on_stderr() {
    let broken = r#"
workflows:
  - workflowId: w
    steps:
      - stepId: s1
        operationId: deleteUser
"#;
    let (_tmp, spec, wf) = fixtures(broken);
    let assert = Command::cargo_bin("mcpgen")
        .unwrap()
        .args(["compile", spec.to_str().unwrap(), wf.to_str().unwrap(), "--format", "json"])
        .assert()
        .code(2);
    let output = assert.get_output();

    let stdout: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stdout["errors"][0]["kind"], "unresolved_endpoint_reference");

    let errors = json_errors(&output.stderr);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("deleteUser"));
}

#[test]
fn test_generate_json_mode_reports_failures_on_stderr() {
    let (tmp, spec, wf) = fixtures(WORKFLOWS);
    let out_dir = tmp.path().join("gen");

    let assert = Command::cargo_bin("mcpgen")
        .unwrap()
        .env_remove("MCPGEN_CREDENTIAL")
        .env_remove("MCPGEN_TEST_UNSET_KEY")
        .args([
            "generate",
            spec.to_str().unwrap(),
            wf.to_str().unwrap(),
            "--out",
            out_dir.to_str().unwrap(),
            "--backend",
            "chat",
            "--credential",
            "env:MCPGEN_TEST_UNSET_KEY",
            "--format",
            "json",
        ])
        .assert()
        .code(3);
    let output = assert.get_output();

    let stdout: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stdout["failures"][0]["workflow_id"], "sync-user-data");

    let errors = json_errors(&output.stderr);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("sync-user-data: "));
}
