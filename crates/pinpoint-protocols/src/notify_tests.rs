use super::*;

#[test]
fn test_endpoint_default_base() {
    assert_eq!(
        SelectionEvent::PrimarySelected.endpoint("http://127.0.0.1:8080/api"),
        "http://127.0.0.1:8080/api/notify-primary-selected"
    );
    assert_eq!(
        SelectionEvent::SecondarySelected.endpoint("http://127.0.0.1:8080/api"),
        "http://127.0.0.1:8080/api/notify-secondary-selected"
    );
    assert_eq!(
        SelectionEvent::ElementSelected.endpoint("http://127.0.0.1:8080/api"),
        "http://127.0.0.1:8080/api/notify-element-selected"
    );
}

#[test]
fn test_endpoint_trailing_slash() {
    assert_eq!(
        SelectionEvent::ElementSelected.endpoint("http://localhost:9000/api/"),
        "http://localhost:9000/api/notify-element-selected"
    );
}

#[test]
fn test_selection_event_serde() {
    let json = serde_json::to_string(&SelectionEvent::SecondarySelected).unwrap();
    assert_eq!(json, "\"secondary-selected\"");
    assert_eq!(SelectionEvent::PrimarySelected.to_string(), "primary-selected");
}
