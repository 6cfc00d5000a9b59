//! TUI flow tests
//!
//! Drive `App` through the handlers the way the event loop does, with the
//! fake transport, fake renderer and in-memory clipboard. Background task
//! results are awaited with `App::next_event` instead of polling.

use std::path::Path;
use std::sync::Arc;

use schemascribe::credentials::{CredentialState, Credentials, MemoryStore, StoreBackend};
use schemascribe::diagram::{FakeRenderer, RenderError, Renderer, DIAGRAM_SVG_FILE};
use schemascribe::export::{ClipboardBackend, MemoryClipboard, PNG_FILE_NAME};
use schemascribe::llm::adapters::{CompletionClient, FakeTransport, Transport};
use schemascribe::llm::ModelSettings;
use schemascribe::ui::handlers::{self, MISSING_DESCRIPTION_MESSAGE, MISSING_KEY_MESSAGE};
use schemascribe::ui::state::{COPIED_LABEL, GENERATE_LABEL, GENERATING_LABEL};
use schemascribe::ui::{Action, App, GenerationStatus, NotificationKind, Services};

fn load_fixture(name: &str) -> String {
    let path = Path::new("tests/fixtures").join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", path.display()))
}

fn build_app(transport: FakeTransport, renderer: FakeRenderer, output_dir: &Path) -> App {
    let services = Services {
        client: Arc::new(CompletionClient::with_transport(
            "https://api.example.test/v1",
            Transport::Fake(transport),
        )),
        renderer: Arc::new(Renderer::Fake(renderer)),
        clipboard: ClipboardBackend::Memory(MemoryClipboard::new()),
        settings: ModelSettings::default(),
        output_dir: output_dir.to_path_buf(),
    };
    App::new(Credentials::new(StoreBackend::Memory(MemoryStore::new())), services).unwrap()
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        handlers::execute_action(app, Action::Char(c));
    }
}

/// Save a key, move to the description and type it
fn ready_app(app: &mut App, description: &str) {
    type_text(app, "sk-test");
    handlers::execute_action(app, Action::SaveKey);
    assert_eq!(app.credential_state(), CredentialState::Present);
    type_text(app, description);
}

async fn finish_next(app: &mut App) {
    let event = app.next_event().await.expect("event channel closed");
    app.handle_event(event);
}

fn clipboard_contents(app: &App) -> Option<String> {
    match &app.services().clipboard {
        ClipboardBackend::Memory(clipboard) => clipboard.contents(),
        ClipboardBackend::Osc52(_) => None,
    }
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn test_generate_requires_key() {
    let out = tempfile::tempdir().unwrap();
    let mut app = build_app(FakeTransport::new("{}"), FakeRenderer::new(), out.path());

    handlers::execute_action(&mut app, Action::FocusNext);
    type_text(&mut app, "users");
    handlers::execute_action(&mut app, Action::Generate);

    let note = app.notification().unwrap();
    assert_eq!(note.kind, NotificationKind::Validation);
    assert_eq!(note.message, MISSING_KEY_MESSAGE);
    assert_eq!(app.status(), GenerationStatus::Ready);
}

#[tokio::test]
async fn test_generate_requires_description() {
    let out = tempfile::tempdir().unwrap();
    let mut app = build_app(FakeTransport::new("{}"), FakeRenderer::new(), out.path());
    ready_app(&mut app, "");

    handlers::execute_action(&mut app, Action::Generate);
    assert_eq!(app.notification().unwrap().message, MISSING_DESCRIPTION_MESSAGE);

    handlers::execute_action(&mut app, Action::DismissNotification);
    assert!(app.notification().is_none());
}

// =============================================================================
// Generate → render → export
// =============================================================================

#[tokio::test]
async fn test_full_flow() {
    let out = tempfile::tempdir().unwrap();
    let transport = FakeTransport::new(&load_fixture("completion_ok.json"));
    let mut app = build_app(transport, FakeRenderer::new(), out.path());
    ready_app(&mut app, "A blog with users and posts");

    handlers::execute_action(&mut app, Action::Generate);
    assert!(app.is_generating());
    assert_eq!(app.generate_label(), GENERATING_LABEL);

    // second press while in flight is ignored
    let status = app.status();
    handlers::execute_action(&mut app, Action::Generate);
    assert_eq!(app.status(), status);

    finish_next(&mut app).await;
    assert_eq!(app.generate_label(), GENERATE_LABEL);
    assert!(app.notification().is_none(), "{:?}", app.notification());

    let rendered = app.rendered().expect("diagram rendered");
    assert!(rendered.source.starts_with("erDiagram"));
    assert!(!rendered.source.contains("```"));
    assert!(app.workspace().join(DIAGRAM_SVG_FILE).is_file());

    // copy markdown
    handlers::execute_action(&mut app, Action::CopyMarkdown);
    assert_eq!(app.copy_label(), COPIED_LABEL);
    let copied = clipboard_contents(&app).unwrap();
    assert!(copied.starts_with("## User\n\n### Attributes\n\n"));
    assert!(copied.contains("| id | int |  |\n"));

    // download png
    handlers::execute_action(&mut app, Action::DownloadPng);
    finish_next(&mut app).await;
    assert!(out.path().join(PNG_FILE_NAME).is_file());
    assert_eq!(app.notification().unwrap().kind, NotificationKind::Info);
}

#[tokio::test]
async fn test_api_failure_resets_control() {
    let out = tempfile::tempdir().unwrap();
    let transport = FakeTransport::with_status(401, r#"{"error":{"message":"Incorrect API key provided"}}"#);
    let mut app = build_app(transport, FakeRenderer::new(), out.path());
    ready_app(&mut app, "users");

    handlers::execute_action(&mut app, Action::Generate);
    finish_next(&mut app).await;

    assert_eq!(app.status(), GenerationStatus::Ready);
    assert!(!app.has_result());
    let note = app.notification().unwrap();
    assert_eq!(note.kind, NotificationKind::Error);
    assert_eq!(
        note.message,
        "Failed to generate diagram: API Error: Incorrect API key provided"
    );
}

#[tokio::test]
async fn test_render_failure_keeps_description() {
    let out = tempfile::tempdir().unwrap();
    let transport = FakeTransport::new(&load_fixture("completion_ok.json"));
    let renderer = FakeRenderer::failing(RenderError::Failed {
        program: "mmdc".to_string(),
        status: "exit status: 1".to_string(),
        stderr: "Parse error on line 3".to_string(),
    });
    let mut app = build_app(transport, renderer, out.path());
    ready_app(&mut app, "users");

    handlers::execute_action(&mut app, Action::Generate);
    finish_next(&mut app).await;

    assert!(app.has_result());
    assert!(app.rendered().is_none());
    assert!(app
        .notification()
        .unwrap()
        .message
        .contains("Parse error on line 3"));

    // nothing rendered: png download is a silent no-op
    handlers::execute_action(&mut app, Action::DismissNotification);
    handlers::execute_action(&mut app, Action::DownloadPng);
    finish_next(&mut app).await;
    assert!(app.notification().is_none());
    assert!(!out.path().join(PNG_FILE_NAME).exists());
}

#[tokio::test]
async fn test_change_key_returns_to_form() {
    let out = tempfile::tempdir().unwrap();
    let mut app = build_app(FakeTransport::new("{}"), FakeRenderer::new(), out.path());
    ready_app(&mut app, "");

    handlers::execute_action(&mut app, Action::ChangeKey);
    assert_eq!(app.credential_state(), CredentialState::Absent);
    assert_eq!(app.credentials().value().unwrap(), None);
}
