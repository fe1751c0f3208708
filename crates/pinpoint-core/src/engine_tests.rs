use super::*;
use parking_lot::Mutex;
use pinpoint_dom_memory::{MemoryDocument, NodeId, PageFixture};
use pinpoint_protocols::SelectionEvent;
use serde_json::json;

#[derive(Default)]
struct RecordingNotifier {
    events: Mutex<Vec<SelectionEvent>>,
}

impl SelectionNotifier for RecordingNotifier {
    fn name(&self) -> &str {
        "recording"
    }

    fn notify(&self, event: SelectionEvent, _capture: &CapturedElement) {
        self.events.lock().push(event);
    }
}

fn engine(policy: SelectionPolicy) -> (AnnotationEngine<MemoryDocument>, Arc<RecordingNotifier>) {
    let doc = MemoryDocument::from_fixture(
        &PageFixture::new("body")
            .with_child(PageFixture::new("div").with_text("A"))
            .with_child(PageFixture::new("a").with_attr("href", "/next"))
            .with_child(PageFixture::new("input").with_attr("id", "q"))
            .with_child(PageFixture::new("select")),
    )
    .unwrap();

    let mut config = Config::default();
    config.overlay.policy = policy;
    let notifier = Arc::new(RecordingNotifier::default());
    (AnnotationEngine::new(doc, &config, notifier.clone()), notifier)
}

fn node(engine: &AnnotationEngine<MemoryDocument>, tag: &str) -> NodeId {
    engine.document().elements_by_tag(tag)[0]
}

#[test]
fn test_set_mode_sets_cursor() {
    let (mut engine, _) = engine(SelectionPolicy::DualRole);
    engine.set_mode(true);
    assert!(engine.is_active());
    assert_eq!(engine.document().viewport_cursor().as_deref(), Some("crosshair"));

    engine.set_mode(false);
    assert!(!engine.is_active());
    assert_eq!(engine.document().viewport_cursor(), None);
}

#[test]
fn test_set_mode_restores_page_cursor() {
    let (mut engine, _) = engine(SelectionPolicy::DualRole);
    engine.document().set_page_cursor(Some("wait"));

    engine.set_mode(true);
    assert_eq!(engine.document().viewport_cursor().as_deref(), Some("crosshair"));
    engine.set_mode(false);
    assert_eq!(engine.document().viewport_cursor().as_deref(), Some("wait"));
}

#[test]
fn test_inactive_engine_passes_everything() {
    let (mut engine, notifier) = engine(SelectionPolicy::DualRole);
    let div = node(&engine, "div");
    let input = node(&engine, "input");

    assert_eq!(engine.dispatch(ListenerKind::Click, &div), EventDisposition::PASS);
    assert_eq!(engine.dispatch(ListenerKind::KeyDown, &input), EventDisposition::PASS);
    assert_eq!(engine.dispatch(ListenerKind::Change, &input), EventDisposition::PASS);
    engine.dispatch(ListenerKind::PointerEnter, &div);

    assert!(engine.selected_element().is_none());
    assert!(engine.document().classes(div).is_empty());
    assert!(notifier.events.lock().is_empty());
}

#[test]
fn test_click_is_suppressed_while_active() {
    let (mut engine, _) = engine(SelectionPolicy::SingleLock);
    engine.set_mode(true);
    let link = node(&engine, "a");
    let div = node(&engine, "div");

    assert!(engine.dispatch(ListenerKind::Click, &link).is_suppressed());
    // Ignored by the single-lock policy, but the page still must not react.
    assert!(engine.dispatch(ListenerKind::Click, &div).is_suppressed());
    assert_eq!(engine.selected_element().unwrap().tag_name, "A");
}

#[test]
fn test_suppression_routes() {
    let (mut engine, _) = engine(SelectionPolicy::DualRole);
    engine.set_mode(true);
    let input = node(&engine, "input");
    let select = node(&engine, "select");
    let div = node(&engine, "div");

    assert!(engine.dispatch(ListenerKind::KeyDown, &input).is_suppressed());
    assert!(!engine.dispatch(ListenerKind::KeyDown, &div).is_suppressed());
    assert!(engine.dispatch(ListenerKind::PointerDown, &select).is_suppressed());
    assert!(!engine.dispatch(ListenerKind::PointerDown, &div).is_suppressed());
    assert!(engine.dispatch(ListenerKind::Change, &div).is_suppressed());
    assert!(!engine.dispatch(ListenerKind::PointerEnter, &div).is_suppressed());
}

#[test]
fn test_disable_mode_resets_session() {
    let (mut engine, _) = engine(SelectionPolicy::DualRole);
    engine.set_mode(true);
    let div = node(&engine, "div");
    let link = node(&engine, "a");
    let select = node(&engine, "select");

    engine.dispatch(ListenerKind::Click, &div);
    engine.dispatch(ListenerKind::Click, &link);
    engine.dispatch(ListenerKind::PointerEnter, &select);

    engine.set_mode(false);
    let session = engine.session();
    assert!(!session.is_locked());
    assert!(session.highlighted().is_none());
    assert_eq!(session.secondary_count(), 0);
    assert_eq!(session.secondary_elements().count(), 0);
    for tag in ["div", "a", "select"] {
        assert!(engine.document().classes(node(&engine, tag)).is_empty());
    }
}

#[test]
fn test_unlock_returns_true() {
    let (mut engine, _) = engine(SelectionPolicy::DualRole);
    assert!(engine.unlock());
    engine.set_mode(true);
    let div = node(&engine, "div");
    engine.dispatch(ListenerKind::Click, &div);
    assert!(engine.unlock());
    assert!(engine.unlock());
    assert!(engine.selected_element().is_none());
    assert!(engine.is_active());
}

#[test]
fn test_notification_per_qualifying_click() {
    let (mut engine, notifier) = engine(SelectionPolicy::DualRole);
    engine.set_mode(true);
    let div = node(&engine, "div");
    let link = node(&engine, "a");

    engine.dispatch(ListenerKind::Click, &div);
    engine.dispatch(ListenerKind::Click, &div);
    engine.dispatch(ListenerKind::Click, &link);

    assert_eq!(
        *notifier.events.lock(),
        vec![SelectionEvent::PrimarySelected, SelectionEvent::SecondarySelected]
    );
    assert_eq!(engine.secondary_selections().len(), 1);
}

#[test]
fn test_set_mode_value_coerces() {
    let (mut engine, _) = engine(SelectionPolicy::DualRole);
    engine.set_mode_value(&json!("yes"));
    assert!(engine.is_active());
    engine.set_mode_value(&json!(0));
    assert!(!engine.is_active());
    engine.set_mode_value(&json!({}));
    assert!(engine.is_active());
    engine.set_mode_value(&json!(null));
    assert!(!engine.is_active());
}

#[test]
fn test_truthy() {
    assert!(!truthy(&json!(false)));
    assert!(!truthy(&json!("")));
    assert!(!truthy(&json!(0.0)));
    assert!(truthy(&json!(-1)));
    assert!(truthy(&json!([])));
    assert!(truthy(&json!("false")));
}

#[test]
fn test_policy_accessor() {
    let (engine, _) = engine(SelectionPolicy::SingleLock);
    assert_eq!(engine.policy(), SelectionPolicy::SingleLock);
}
