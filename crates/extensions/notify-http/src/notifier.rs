//! HTTP notifier.

use reqwest::Client;
use tokio::runtime::Handle;
use tracing::{debug, trace};
use url::Url;

use pinpoint_protocols::{CapturedElement, SelectionEvent, SelectionNotifier};

use crate::error::NotifyError;

#[cfg(test)]
#[path = "notifier_tests.rs"]
mod tests;

/// Posts captures to the external listener.
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    client: Client,
    base: String,
}

impl HttpNotifier {
    /// Create a notifier for `endpoint`, the base URL event paths are
    /// appended to (e.g. `http://127.0.0.1:8080/api`).
    pub fn new(endpoint: &str) -> Result<Self, NotifyError> {
        let client = Client::builder().build()?;
        Self::with_client(client, endpoint)
    }

    pub fn with_client(client: Client, endpoint: &str) -> Result<Self, NotifyError> {
        let url = Url::parse(endpoint).map_err(|source| NotifyError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            source,
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(NotifyError::UnsupportedScheme(url.scheme().to_string()));
        }

        Ok(Self {
            client,
            base: endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Full URL for `event`.
    pub fn endpoint_for(&self, event: SelectionEvent) -> String {
        event.endpoint(&self.base)
    }
}

impl SelectionNotifier for HttpNotifier {
    fn name(&self) -> &str {
        "http"
    }

    fn notify(&self, event: SelectionEvent, capture: &CapturedElement) {
        let Ok(runtime) = Handle::try_current() else {
            debug!("No async runtime, dropping {} notification", event);
            return;
        };

        // The listener pulls the capture itself; the request only signals.
        let url = self.endpoint_for(event);
        let request = self.client.get(&url);

        trace!("Signalling {} for {} at {}", event, capture.summary(), url);
        runtime.spawn(async move {
            if let Err(e) = request.send().await {
                debug!("Notification to {} failed: {}", url, e);
            }
        });
    }
}
