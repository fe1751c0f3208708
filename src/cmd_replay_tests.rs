use super::*;
use std::sync::Arc;

use pinpoint_config::SelectionPolicy;
use pinpoint_core::LogNotifier;
use pinpoint_protocols::Document;

const PAGE: &str = r#"{
  "tag": "body",
  "children": [
    { "tag": "div", "text": "Featured" },
    { "tag": "ul", "attributes": { "id": "list" }, "children": [
      { "tag": "li", "text": "Apples" },
      { "tag": "li", "text": "Pears" },
      { "tag": "li", "text": "Plums" }
    ] },
    { "tag": "input", "attributes": { "id": "search", "type": "text" } },
    { "tag": "select", "attributes": { "name": "size" } }
  ]
}"#;

fn engine(policy: SelectionPolicy) -> (AnnotationEngine<MemoryDocument>, Config) {
    let mut config = Config::default();
    config.overlay.policy = policy;
    let doc = MemoryDocument::from_json(PAGE).unwrap();
    (
        AnnotationEngine::new(doc, &config, Arc::new(LogNotifier)),
        config,
    )
}

fn steps(json: &str) -> Vec<Step> {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_step_parsing() {
    let parsed = steps(
        r#"[
          {"action": "set_mode", "enabled": 1},
          {"action": "key", "target": "/html/body/div[1]", "text": "a"},
          {"action": "change", "target": "/html/body/div[1]"},
          {"action": "unlock"}
        ]"#,
    );
    assert_eq!(parsed.len(), 4);
    assert_eq!(parsed[0].name(), "set_mode");
    assert!(matches!(&parsed[2], Step::Change { value: None, .. }));
    assert_eq!(parsed[3].name(), "unlock");
}

#[test]
fn test_unknown_action_rejected() {
    assert!(serde_json::from_str::<Vec<Step>>(r#"[{"action": "scroll"}]"#).is_err());
}

#[test]
fn test_replay_primary_and_secondary() {
    let (mut engine, config) = engine(SelectionPolicy::DualRole);
    let script = steps(
        r#"[
          {"action": "set_mode", "enabled": true},
          {"action": "enter", "target": "/html/body/div[1]"},
          {"action": "click", "target": "/html/body/div[1]"},
          {"action": "click", "target": "//*[@id=\"list\"]/li[3]"}
        ]"#,
    );

    let report = replay(&mut engine, &config, &script).unwrap();
    assert_eq!(report.policy, "dual-role");
    assert_eq!(report.steps.len(), 4);
    assert!(report.steps[2].suppressed);
    assert!(!report.steps[1].suppressed);

    let primary = report.session.current_selection.as_ref().unwrap();
    assert_eq!(primary.xpath.as_deref(), Some("/html/body/div[1]"));
    assert_eq!(report.session.secondary_selections.len(), 1);
    assert_eq!(report.round_trips.len(), 2);
    assert!(report.round_trips.iter().all(|r| r.resolves_to_selected));
}

#[test]
fn test_replay_typing_suppressed_only_while_active() {
    let (mut engine, config) = engine(SelectionPolicy::DualRole);
    let script = steps(
        r#"[
          {"action": "set_mode", "enabled": true},
          {"action": "key", "target": "//*[@id=\"search\"]", "text": "blocked"},
          {"action": "set_mode", "enabled": false},
          {"action": "key", "target": "//*[@id=\"search\"]", "text": "typed"}
        ]"#,
    );

    let report = replay(&mut engine, &config, &script).unwrap();
    assert!(report.steps[1].suppressed);
    assert!(!report.steps[3].suppressed);

    let input = engine.document().find_by_id("search").unwrap();
    assert_eq!(engine.document().value(&input).as_deref(), Some("typed"));
}

#[test]
fn test_replay_change_applies_value_when_inactive() {
    let (mut engine, config) = engine(SelectionPolicy::SingleLock);
    let script = steps(
        r#"[
          {"action": "change", "target": "/html/body/select[1]", "value": "L"},
          {"action": "set_mode", "enabled": "on"},
          {"action": "change", "target": "/html/body/select[1]", "value": "XL"},
          {"action": "pointer_down", "target": "/html/body/select[1]"}
        ]"#,
    );

    let report = replay(&mut engine, &config, &script).unwrap();
    assert!(!report.steps[0].suppressed);
    assert!(report.steps[2].suppressed);
    assert!(report.steps[3].suppressed);

    let select = engine.document().elements_by_tag("select")[0];
    assert_eq!(engine.document().value(&select).as_deref(), Some("L"));
}

#[test]
fn test_replay_unlock_clears_session() {
    let (mut engine, config) = engine(SelectionPolicy::DualRole);
    let script = steps(
        r#"[
          {"action": "set_mode", "enabled": true},
          {"action": "click", "target": "/html/body/div[1]"},
          {"action": "click", "target": "/html/body/ul[1]"},
          {"action": "unlock"}
        ]"#,
    );

    let report = replay(&mut engine, &config, &script).unwrap();
    assert!(!report.session.locked);
    assert!(report.session.current_selection.is_none());
    assert!(report.session.secondary_selections.is_empty());
    assert!(report.round_trips.is_empty());
}

#[test]
fn test_replay_bad_target() {
    let (mut engine, config) = engine(SelectionPolicy::DualRole);
    let script = steps(r#"[{"action": "click", "target": "/html/body/div[7]"}]"#);

    let err = replay(&mut engine, &config, &script).unwrap_err();
    assert!(matches!(err, ReplayError::Target { step: 1, .. }));
    assert!(err.to_string().starts_with("Step 1"));
}

#[test]
fn test_locate_prints_capture() {
    let doc = MemoryDocument::from_json(PAGE).unwrap();
    let capture = locate(&doc, r#"//*[@id="list"]/li[2]"#, 3).unwrap();
    assert_eq!(capture.tag_name, "LI");
    assert_eq!(capture.text_content, "Pea");
    assert_eq!(capture.xpath.as_deref(), Some(r#"//*[@id="list"]/li[2]"#));
}

#[test]
fn test_load_script_missing_file() {
    let err = load_script(Path::new("/nonexistent/steps.json")).unwrap_err();
    assert!(matches!(err, ReplayError::Io { .. }));
}
