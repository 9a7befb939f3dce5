use mcpgen_core::{parse_workflow_str, validate_workflow_set, DocumentFormat, Validate};

fn minimal_valid_yaml() -> &'static str {
    r#"
arazzo: 1.0.1
info:
  title: Example
  version: 0.0.1
sourceDescriptions:
  - name: petStoreDescription
    url: https://example.com/openapi.yaml
    type: openapi
workflows:
  - workflowId: loginUser
    steps:
      - stepId: loginStep
        operationId: loginUser
"#
}

#[test]
fn parse_yaml_and_validate_ok() {
    let parsed = parse_workflow_str(minimal_valid_yaml(), DocumentFormat::Yaml).unwrap();
    validate_workflow_set(&parsed.workflows).unwrap();
}

#[test]
fn parse_auto_detects_yaml() {
    let parsed = parse_workflow_str(minimal_valid_yaml(), DocumentFormat::Auto).unwrap();
    assert_eq!(parsed.format, DocumentFormat::Yaml);
}

#[test]
fn parse_json_and_validate_ok() {
    let json = r#"
{
  "arazzo": "1.0.1",
  "info": { "title": "Example", "version": "0.0.1" },
  "workflows": [
    {
      "workflowId": "loginUser",
      "steps": [
        { "stepId": "loginStep", "operationId": "loginUser", "preHook": "audit" }
      ]
    }
  ]
}
"#;
    let parsed = parse_workflow_str(json, DocumentFormat::Json).unwrap();
    parsed.workflows.validate().unwrap();
    assert_eq!(
        parsed.workflows.workflows[0].steps[0].pre_hook.as_deref(),
        Some("audit")
    );
}

#[test]
fn parse_auto_detects_json() {
    let json = r#"{ "workflows": [ { "workflowId": "w1", "steps": [ { "stepId": "s1", "call": "op1" } ] } ] }"#;
    let parsed = parse_workflow_str(json, DocumentFormat::Auto).unwrap();
    assert_eq!(parsed.format, DocumentFormat::Json);
}

#[test]
fn parse_garbage_is_rejected() {
    let err = parse_workflow_str("not: [valid", DocumentFormat::Auto).unwrap_err();
    assert!(format!("{err}").contains("YAML"));
}

#[test]
fn missing_workflows_key_is_rejected() {
    let err = parse_workflow_str("info:\n  title: x\n", DocumentFormat::Auto).unwrap_err();
    assert!(format!("{err}").contains("workflows"));
}

#[test]
fn step_without_call_is_rejected_by_the_parser() {
    let doc = "workflows:\n  - workflowId: w\n    steps:\n      - stepId: s\n";
    assert!(parse_workflow_str(doc, DocumentFormat::Yaml).is_err());
}

#[test]
fn duplicate_ids_and_bad_syntax_are_violations() {
    let doc = r#"
workflows:
  - workflowId: w1
    steps:
      - stepId: s1
        call: a
      - stepId: s1
        call: b
  - workflowId: "bad id"
    steps: []
  - workflowId: w1
    steps: []
"#;
    let parsed = parse_workflow_str(doc, DocumentFormat::Yaml).unwrap();
    let err = validate_workflow_set(&parsed.workflows).unwrap_err();
    let paths: Vec<_> = err.violations.iter().map(|v| v.path.as_str()).collect();
    assert!(paths.contains(&"workflows[0].steps[1].stepId"));
    assert!(paths.contains(&"workflows[1].workflowId"));
    assert!(paths.contains(&"workflows[2].workflowId"));
}

#[test]
fn dangling_next_is_a_violation_but_cycles_are_not() {
    let doc = r#"
workflows:
  - workflowId: w1
    steps:
      - stepId: a
        call: x
        next: [a, b]
      - stepId: b
        call: y
        next: [missing]
"#;
    let parsed = parse_workflow_str(doc, DocumentFormat::Yaml).unwrap();
    let err = validate_workflow_set(&parsed.workflows).unwrap_err();
    assert_eq!(err.violations.len(), 1);
    assert_eq!(err.violations[0].path, "workflows[0].steps[1].next[0]");
}

#[test]
fn empty_workflow_is_structurally_valid() {
    let doc = "workflows:\n  - workflowId: w\n    steps: []\n";
    let parsed = parse_workflow_str(doc, DocumentFormat::Yaml).unwrap();
    validate_workflow_set(&parsed.workflows).unwrap();
}
