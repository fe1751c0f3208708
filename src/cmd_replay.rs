//! Event script replay over an in-memory page.
//!
//! A script is a JSON array of steps. Targets are XPath locators resolved
//! against the page when the step runs:
//!
//! ```json
//! [
//!   { "action": "set_mode", "enabled": true },
//!   { "action": "enter", "target": "/html/body/div[1]" },
//!   { "action": "click", "target": "/html/body/div[1]" },
//!   { "action": "key", "target": "//*[@id=\"search\"]", "text": "shoes" },
//!   { "action": "unlock" }
//! ]
//! ```
//!
//! Host default actions (typing, committing a change) are applied only when
//! the engine did not cancel the event.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use pinpoint_config::Config;
use pinpoint_core::{AnnotationEngine, SessionSnapshot, SetupGuard};
use pinpoint_dom_memory::{LookupError, MemoryDocument, MemoryEventHost, NodeId};
use pinpoint_protocols::{CapturedElement, ListenerKind, OverlayError};

#[cfg(test)]
#[path = "cmd_replay_tests.rs"]
mod tests;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid script: {0}")]
    Script(#[from] serde_json::Error),

    #[error(transparent)]
    Overlay(#[from] OverlayError),

    #[error("Step {step}: {source}")]
    Target {
        step: usize,
        #[source]
        source: LookupError,
    },
}

/// One scripted interaction.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    SetMode { enabled: serde_json::Value },
    Enter { target: String },
    Leave { target: String },
    Click { target: String },
    Key { target: String, text: String },
    PointerDown { target: String },
    Change {
        target: String,
        #[serde(default)]
        value: Option<String>,
    },
    Unlock,
}

impl Step {
    fn name(&self) -> &'static str {
        match self {
            Step::SetMode { .. } => "set_mode",
            Step::Enter { .. } => "enter",
            Step::Leave { .. } => "leave",
            Step::Click { .. } => "click",
            Step::Key { .. } => "key",
            Step::PointerDown { .. } => "pointer_down",
            Step::Change { .. } => "change",
            Step::Unlock => "unlock",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub action: &'static str,
    pub suppressed: bool,
}

/// Whether a stored capture still resolves to the element it was taken from.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundTrip {
    pub xpath: Option<String>,
    pub resolves_to_selected: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    pub policy: &'static str,
    pub steps: Vec<StepReport>,
    pub session: SessionSnapshot,
    pub round_trips: Vec<RoundTrip>,
}

pub fn load_script(path: &Path) -> Result<Vec<Step>, ReplayError> {
    let content = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

/// Install the overlay on the engine's page and run every step.
pub fn replay(
    engine: &mut AnnotationEngine<MemoryDocument>,
    config: &Config,
    steps: &[Step],
) -> Result<ReplayReport, ReplayError> {
    let host = MemoryEventHost::new();
    let mut guard = SetupGuard::new(&config.styles, &config.overlay.cursor);
    guard.install(engine.document(), &host)?;

    let mut reports = Vec::with_capacity(steps.len());
    for (index, step) in steps.iter().enumerate() {
        let suppressed = run_step(engine, index + 1, step)?;
        debug!(step = index + 1, action = step.name(), suppressed, "Replayed step");
        reports.push(StepReport {
            step: index + 1,
            action: step.name(),
            suppressed,
        });
    }

    let report = ReplayReport {
        policy: engine.policy().as_str(),
        steps: reports,
        session: engine.snapshot(),
        round_trips: round_trips(engine),
    };
    info!(
        steps = report.steps.len(),
        locked = report.session.locked,
        secondaries = report.session.secondary_selections.len(),
        "Replay finished"
    );
    Ok(report)
}

fn run_step(
    engine: &mut AnnotationEngine<MemoryDocument>,
    step_no: usize,
    step: &Step,
) -> Result<bool, ReplayError> {
    let resolve = |engine: &AnnotationEngine<MemoryDocument>, target: &str| {
        engine
            .document()
            .locate(target)
            .map_err(|source| ReplayError::Target {
                step: step_no,
                source,
            })
    };

    let suppressed = match step {
        Step::SetMode { enabled } => {
            engine.set_mode_value(enabled);
            false
        }
        Step::Unlock => {
            engine.unlock();
            false
        }
        Step::Enter { target } => {
            let node = resolve(engine, target)?;
            engine.dispatch(ListenerKind::PointerEnter, &node).is_suppressed()
        }
        Step::Leave { target } => {
            let node = resolve(engine, target)?;
            engine.dispatch(ListenerKind::PointerLeave, &node).is_suppressed()
        }
        Step::Click { target } => {
            let node = resolve(engine, target)?;
            engine.dispatch(ListenerKind::Click, &node).is_suppressed()
        }
        Step::PointerDown { target } => {
            let node = resolve(engine, target)?;
            engine.dispatch(ListenerKind::PointerDown, &node).is_suppressed()
        }
        Step::Key { target, text } => {
            let node = resolve(engine, target)?;
            let disposition = engine.dispatch(ListenerKind::KeyDown, &node);
            if !disposition.prevent_default {
                engine.document().type_text(node, text);
            }
            disposition.is_suppressed()
        }
        Step::Change { target, value } => {
            let node = resolve(engine, target)?;
            let disposition = engine.dispatch(ListenerKind::Change, &node);
            if let (false, Some(value)) = (disposition.prevent_default, value) {
                engine.document().set_value(node, value);
            }
            disposition.is_suppressed()
        }
    };
    Ok(suppressed)
}

fn round_trips(engine: &AnnotationEngine<MemoryDocument>) -> Vec<RoundTrip> {
    let session = engine.session();
    let check = |capture: &CapturedElement, node: &NodeId| RoundTrip {
        xpath: capture.xpath.clone(),
        resolves_to_selected: engine.document().find_element(capture).ok() == Some(*node),
    };

    let primary = session
        .current_selection()
        .zip(session.locked_primary())
        .map(|(capture, node)| check(capture, node));

    primary
        .into_iter()
        .chain(
            session
                .secondary_selections()
                .zip(session.secondary_elements())
                .map(|(capture, node)| check(capture, node)),
        )
        .collect()
}

/// Capture of the element `xpath` resolves to.
pub fn locate(
    document: &MemoryDocument,
    xpath: &str,
    text_limit: usize,
) -> Result<CapturedElement, LookupError> {
    let node = document.locate(xpath)?;
    Ok(pinpoint_core::LocatorSynthesizer::new(text_limit).capture(document, &node))
}
