//! TUI action handlers
//!
//! Handlers validate, update `App`, and spawn the slow work (completion
//! call, rendering, rasterizing) onto tokio. They return immediately; the
//! results come back as `AppEvent`s.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::credentials::CredentialError;
use crate::diagram::{DiagramRenderer, Renderer};
use crate::export::{copy_markdown, export_png};
use crate::llm::{build_generation_request, ChatRequest, CompletionClient};
use crate::ui::events::{AppEvent, GenerationOutcome};
use crate::ui::input::Action;
use crate::ui::state::{App, NotificationKind};

pub const MISSING_KEY_MESSAGE: &str = "Please save your OpenAI API key first.";
pub const MISSING_DESCRIPTION_MESSAGE: &str = "Please enter a database description.";

/// Run one mapped action
pub fn execute_action(app: &mut App, action: Action) {
    match action {
        Action::None => {}
        Action::Quit => app.quit(),
        Action::DismissNotification => app.dismiss_notification(),
        Action::FocusNext => app.cycle_focus(),
        Action::Char(c) => app.handle_char(c),
        Action::Backspace => app.handle_backspace(),
        Action::Newline => app.handle_char('\n'),
        Action::SaveKey => save_api_key(app),
        Action::ChangeKey => change_api_key(app),
        Action::Generate => generate(app),
        Action::DownloadPng => {
            download_png(app);
        }
        Action::CopyMarkdown => copy_description(app),
        Action::ScrollUp => app.scroll_preview(-1),
        Action::ScrollDown => app.scroll_preview(1),
    }
}

/// Persist the typed key
pub fn save_api_key(app: &mut App) {
    match app.credentials().save(&app.key_input) {
        Ok(state) => app.set_credential_state(state),
        Err(e @ CredentialError::Empty) => app.notify(NotificationKind::Validation, e.to_string()),
        Err(e) => app.notify(NotificationKind::Error, e.to_string()),
    }
}

/// Forget the saved key and show the form again
pub fn change_api_key(app: &mut App) {
    match app.credentials().clear() {
        Ok(state) => app.set_credential_state(state),
        Err(e) => app.notify(NotificationKind::Error, e.to_string()),
    }
}

/// Validate, disable the control, and start the completion + render task
pub fn generate(app: &mut App) {
    if app.is_generating() {
        return;
    }

    let credential = match app.credentials().value() {
        Ok(Some(value)) => value,
        Ok(None) => {
            app.notify(NotificationKind::Validation, MISSING_KEY_MESSAGE);
            return;
        }
        Err(e) => {
            app.notify(NotificationKind::Error, e.to_string());
            return;
        }
    };
    if app.description.is_empty() {
        app.notify(NotificationKind::Validation, MISSING_DESCRIPTION_MESSAGE);
        return;
    }

    let request = build_generation_request(&app.description, &app.services().settings);
    let client = Arc::clone(&app.services().client);
    let renderer = Arc::clone(&app.services().renderer);
    let workspace = app.workspace().to_path_buf();
    let tx = app.event_sender();
    let request_id = app.begin_generation();
    info!(%request_id, "generation started");

    tokio::spawn(async move {
        let outcome = run_generation(&client, &renderer, &request, &credential, &workspace).await;
        if tx
            .send(AppEvent::GenerationFinished {
                request_id,
                outcome,
            })
            .is_err()
        {
            debug!(%request_id, "ui gone before generation finished");
        }
    });
}

/// Completion call followed by rendering into `workspace`
pub async fn run_generation(
    client: &CompletionClient,
    renderer: &Renderer,
    request: &ChatRequest,
    credential: &str,
    workspace: &Path,
) -> GenerationOutcome {
    match client.submit(request, credential).await {
        Err(e) => GenerationOutcome::Failed(e),
        Ok(result) => {
            let render = renderer.render(&result.diagram_source, workspace).await;
            GenerationOutcome::Completed { result, render }
        }
    }
}

/// Rasterize the rendered diagram into the output directory
///
/// Returns the export task, or `None` when there is no result yet.
pub fn download_png(app: &mut App) -> Option<JoinHandle<()>> {
    if !app.has_result() {
        return None;
    }
    let renderer = Arc::clone(&app.services().renderer);
    let workspace = app.workspace().to_path_buf();
    let output_dir = app.services().output_dir.clone();
    let tx = app.event_sender();

    Some(tokio::spawn(async move {
        let result = export_png(&*renderer, &workspace, &output_dir).await;
        if tx.send(AppEvent::PngExported { result }).is_err() {
            debug!("ui gone before png export finished");
        }
    }))
}

/// Copy the description as Markdown and flip the copy label
pub fn copy_description(app: &mut App) {
    let Some(html) = app.result().map(|r| r.description_html.clone()) else {
        return;
    };
    match copy_markdown(&app.services().clipboard, &html) {
        Ok(_) => app.mark_copied(Instant::now()),
        Err(e) => app.notify(NotificationKind::Error, e.to_string()),
    }
}
