use super::*;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn capture() -> CapturedElement {
    CapturedElement {
        tag_name: "DIV".to_string(),
        text_content: "Featured".to_string(),
        xpath: Some("/html/body/div[1]".to_string()),
        ..Default::default()
    }
}

async fn wait_for_requests(server: &MockServer, count: usize) -> Vec<Request> {
    for _ in 0..50 {
        let requests = server.received_requests().await.unwrap_or_default();
        if requests.len() >= count {
            return requests;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    server.received_requests().await.unwrap_or_default()
}

#[test]
fn test_new_rejects_invalid_endpoint() {
    assert!(matches!(
        HttpNotifier::new("not a url"),
        Err(NotifyError::InvalidEndpoint { .. })
    ));
    assert!(matches!(
        HttpNotifier::new("ftp://127.0.0.1/api"),
        Err(NotifyError::UnsupportedScheme(_))
    ));
}

#[test]
fn test_endpoint_for() {
    let notifier = HttpNotifier::new("http://127.0.0.1:8080/api/").unwrap();
    assert_eq!(notifier.base(), "http://127.0.0.1:8080/api");
    assert_eq!(
        notifier.endpoint_for(SelectionEvent::SecondarySelected),
        "http://127.0.0.1:8080/api/notify-secondary-selected"
    );
    assert_eq!(notifier.name(), "http");
}

#[test]
fn test_notify_without_runtime_is_dropped() {
    let notifier = HttpNotifier::new("http://127.0.0.1:8080/api").unwrap();
    notifier.notify(SelectionEvent::ElementSelected, &capture());
}

#[tokio::test]
async fn test_notify_sends_bodyless_get() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/notify-element-selected"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = HttpNotifier::new(&format!("{}/api", server.uri())).unwrap();
    notifier.notify(SelectionEvent::ElementSelected, &capture());

    let requests = wait_for_requests(&server, 1).await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method.as_str(), "GET");
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_notify_routes_by_role() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let notifier = HttpNotifier::new(&format!("{}/api", server.uri())).unwrap();
    notifier.notify(SelectionEvent::PrimarySelected, &capture());
    notifier.notify(SelectionEvent::SecondarySelected, &capture());
    notifier.notify(SelectionEvent::ElementSelected, &capture());

    let requests = wait_for_requests(&server, 3).await;
    let mut paths: Vec<_> = requests.iter().map(|r| r.url.path().to_string()).collect();
    paths.sort();
    assert_eq!(
        paths,
        vec![
            "/api/notify-element-selected",
            "/api/notify-primary-selected",
            "/api/notify-secondary-selected"
        ]
    );
}

#[tokio::test]
async fn test_server_error_is_ignored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let notifier = HttpNotifier::new(&server.uri()).unwrap();
    notifier.notify(SelectionEvent::PrimarySelected, &capture());
    assert_eq!(wait_for_requests(&server, 1).await.len(), 1);
}

#[tokio::test]
async fn test_unreachable_listener_is_ignored() {
    let notifier = HttpNotifier::new("http://127.0.0.1:9/api").unwrap();
    notifier.notify(SelectionEvent::PrimarySelected, &capture());
    tokio::time::sleep(Duration::from_millis(50)).await;
}
