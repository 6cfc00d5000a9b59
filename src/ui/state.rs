//! Application state for the terminal UI
//!
//! One `App` owns everything the session knows:
//! - credential state (re-read from the store after every transition)
//! - the two input buffers and focus
//! - generation status and the last result
//! - the blocking notification and the copy-label deadline
//! - the session render workspace (removed when the app is dropped)
//!
//! Background tasks never touch `App`; they send `AppEvent`s that the UI
//! loop feeds back through `handle_event`.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tempfile::TempDir;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::credentials::{CredentialState, Credentials, StoreBackend};
use crate::diagram::{RenderedDiagram, Renderer};
use crate::export::ClipboardBackend;
use crate::llm::{CompletionClient, GenerationResult, ModelSettings};
use crate::transcribe::to_markdown;
use crate::ui::events::{self, AppEvent, EventReceiver, EventSender, GenerationOutcome};

/// How long the copy control shows its confirmation label
pub const COPY_FEEDBACK: Duration = Duration::from_secs(2);

pub const GENERATE_LABEL: &str = "Generate Diagram";
pub const GENERATING_LABEL: &str = "Generating...";
pub const DOWNLOAD_LABEL: &str = "Download PNG";
pub const COPY_LABEL: &str = "Copy Markdown";
pub const COPIED_LABEL: &str = "Copied!";

/// Input focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    ApiKey,
    Description,
    Preview,
}

/// Generate control state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStatus {
    Ready,
    /// One completion call in flight; the control is disabled
    Generating { request_id: Uuid },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Validation,
    Error,
    Info,
}

/// Blocking notification; must be dismissed before other input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// External collaborators used by the handlers
#[derive(Debug)]
pub struct Services {
    pub client: Arc<CompletionClient>,
    pub renderer: Arc<Renderer>,
    pub clipboard: ClipboardBackend,
    pub settings: ModelSettings,
    /// Directory receiving the downloaded PNG
    pub output_dir: PathBuf,
}

/// Main application state
pub struct App {
    credentials: Credentials<StoreBackend>,
    credential_state: CredentialState,
    /// API key form buffer
    pub key_input: String,
    /// Database description buffer
    pub description: String,
    pub focus: Focus,
    /// Result pane scroll offset
    pub preview_scroll: u16,
    status: GenerationStatus,
    result: Option<GenerationResult>,
    rendered: Option<RenderedDiagram>,
    notification: Option<Notification>,
    copy_feedback_until: Option<Instant>,
    workspace: TempDir,
    services: Services,
    events_tx: EventSender,
    events_rx: EventReceiver,
    should_quit: bool,
}

impl App {
    /// Create the app and its session render workspace
    pub fn new(credentials: Credentials<StoreBackend>, services: Services) -> crate::ui::Result<Self> {
        let workspace = tempfile::Builder::new()
            .prefix("schemascribe-")
            .tempdir()?;
        let credential_state = credentials.state()?;
        let (events_tx, events_rx) = events::channel();
        debug!(workspace = %workspace.path().display(), "render workspace created");

        Ok(App {
            credentials,
            credential_state,
            key_input: String::new(),
            description: String::new(),
            focus: initial_focus(credential_state),
            preview_scroll: 0,
            status: GenerationStatus::Ready,
            result: None,
            rendered: None,
            notification: None,
            copy_feedback_until: None,
            workspace,
            services,
            events_tx,
            events_rx,
            should_quit: false,
        })
    }

    pub fn credentials(&self) -> &Credentials<StoreBackend> {
        &self.credentials
    }

    pub fn credential_state(&self) -> CredentialState {
        self.credential_state
    }

    /// Record a credential transition and move focus to match the form
    pub fn set_credential_state(&mut self, state: CredentialState) {
        self.credential_state = state;
        self.key_input.clear();
        self.focus = initial_focus(state);
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn workspace(&self) -> &Path {
        self.workspace.path()
    }

    pub fn event_sender(&self) -> EventSender {
        self.events_tx.clone()
    }

    // Generation

    pub fn status(&self) -> GenerationStatus {
        self.status
    }

    pub fn is_generating(&self) -> bool {
        matches!(self.status, GenerationStatus::Generating { .. })
    }

    /// Disable the generate control for a new request
    pub fn begin_generation(&mut self) -> Uuid {
        let request_id = Uuid::new_v4();
        self.status = GenerationStatus::Generating { request_id };
        request_id
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        self.result.as_ref()
    }

    pub fn rendered(&self) -> Option<&RenderedDiagram> {
        self.rendered.as_ref()
    }

    /// Export controls are shown once a result exists
    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }

    pub fn generate_label(&self) -> &'static str {
        if self.is_generating() {
            GENERATING_LABEL
        } else {
            GENERATE_LABEL
        }
    }

    /// Description pane text: Markdown when the HTML transcribes, raw HTML otherwise
    pub fn description_preview(&self) -> Option<String> {
        let html = &self.result.as_ref()?.description_html;
        Some(to_markdown(html).unwrap_or_else(|_| html.clone()))
    }

    // Notifications

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        let message = message.into();
        debug!(?kind, %message, "notification");
        self.notification = Some(Notification { kind, message });
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    // Copy feedback

    pub fn mark_copied(&mut self, now: Instant) {
        self.copy_feedback_until = Some(now + COPY_FEEDBACK);
    }

    pub fn copy_label_at(&self, now: Instant) -> &'static str {
        match self.copy_feedback_until {
            Some(until) if now < until => COPIED_LABEL,
            _ => COPY_LABEL,
        }
    }

    pub fn copy_label(&self) -> &'static str {
        self.copy_label_at(Instant::now())
    }

    /// Drop an expired copy label
    pub fn tick(&mut self, now: Instant) {
        if matches!(self.copy_feedback_until, Some(until) if now >= until) {
            self.copy_feedback_until = None;
        }
    }

    // Text input

    pub fn handle_char(&mut self, c: char) {
        match self.focus {
            Focus::ApiKey => self.key_input.push(c),
            Focus::Description => self.description.push(c),
            Focus::Preview => {}
        }
    }

    pub fn handle_backspace(&mut self) {
        match self.focus {
            Focus::ApiKey => {
                self.key_input.pop();
            }
            Focus::Description => {
                self.description.pop();
            }
            Focus::Preview => {}
        }
    }

    /// Cycle focus; the key field only takes part while no key is saved
    pub fn cycle_focus(&mut self) {
        let absent = self.credential_state == CredentialState::Absent;
        self.focus = match self.focus {
            Focus::ApiKey => Focus::Description,
            Focus::Description if self.result.is_some() => Focus::Preview,
            Focus::Description | Focus::Preview if absent => Focus::ApiKey,
            Focus::Description | Focus::Preview => Focus::Description,
        };
    }

    pub fn scroll_preview(&mut self, delta: i32) {
        let next = i32::from(self.preview_scroll) + delta;
        self.preview_scroll = next.clamp(0, i32::from(u16::MAX)) as u16;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    // Background events

    /// Process all pending events without blocking; returns how many ran
    pub fn process_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Wait for the next event
    pub async fn next_event(&mut self) -> Option<AppEvent> {
        self.events_rx.recv().await
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        debug!(kind = event.kind(), "app event");
        match event {
            AppEvent::GenerationFinished {
                request_id,
                outcome,
            } => self.finish_generation(request_id, outcome),
            AppEvent::PngExported { result } => match result {
                Ok(Some(path)) => {
                    self.notify(NotificationKind::Info, format!("Saved {}", path.display()))
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(error = %e, "png export failed");
                    self.notify(NotificationKind::Error, e.to_string());
                }
            },
        }
    }

    fn finish_generation(&mut self, request_id: Uuid, outcome: GenerationOutcome) {
        if self.status != (GenerationStatus::Generating { request_id }) {
            debug!(%request_id, "ignoring stale generation event");
            return;
        }
        self.status = GenerationStatus::Ready;

        match outcome {
            GenerationOutcome::Failed(e) => {
                warn!(%request_id, error = %e, "generation failed");
                self.notify(
                    NotificationKind::Error,
                    format!("Failed to generate diagram: {}", e),
                );
            }
            GenerationOutcome::Completed { result, render } => {
                info!(%request_id, "generation finished");
                self.result = Some(result);
                self.preview_scroll = 0;
                self.copy_feedback_until = None;
                match render {
                    Ok(rendered) => self.rendered = Some(rendered),
                    Err(e) => {
                        warn!(%request_id, error = %e, "diagram render failed");
                        self.rendered = None;
                        self.notify(
                            NotificationKind::Error,
                            format!("Failed to render diagram: {}", e),
                        );
                    }
                }
            }
        }
    }
}

fn initial_focus(state: CredentialState) -> Focus {
    match state {
        CredentialState::Absent => Focus::ApiKey,
        CredentialState::Present => Focus::Description,
    }
}
