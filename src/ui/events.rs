//! Background task events
//!
//! Tasks spawned by the handlers report back through an unbounded tokio
//! channel; the UI loop drains it between frames.

use std::path::PathBuf;

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::diagram::{RenderError, RenderedDiagram};
use crate::export::ExportError;
use crate::llm::{AdapterError, GenerationResult};

/// Channel sender for app events
pub type EventSender = mpsc::UnboundedSender<AppEvent>;
/// Channel receiver for app events
pub type EventReceiver = mpsc::UnboundedReceiver<AppEvent>;

/// Result of one generate action
#[derive(Debug, Clone)]
pub enum GenerationOutcome {
    /// The completion call failed; nothing was rendered
    Failed(AdapterError),
    /// The completion call succeeded; rendering may still have failed
    Completed {
        result: GenerationResult,
        render: Result<RenderedDiagram, RenderError>,
    },
}

/// Event sent from a background task to the UI loop
#[derive(Debug, Clone)]
pub enum AppEvent {
    GenerationFinished {
        request_id: Uuid,
        outcome: GenerationOutcome,
    },
    PngExported {
        result: Result<Option<PathBuf>, ExportError>,
    },
}

impl AppEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            AppEvent::GenerationFinished { .. } => "generation_finished",
            AppEvent::PngExported { .. } => "png_exported",
        }
    }
}

pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
