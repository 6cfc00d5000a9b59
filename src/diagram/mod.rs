//! Diagram source cleanup and rendering
//!
//! Rendering is delegated to the Mermaid CLI; only fence stripping is local.

pub mod fence;
pub mod renderer;

pub use fence::strip_fences;
pub use renderer::{
    DiagramRenderer, ErConfig, FakeRenderer, MermaidCli, MermaidConfig, RenderError,
    RenderedDiagram, Renderer, DEFAULT_MMDC, DIAGRAM_CONFIG_FILE, DIAGRAM_SOURCE_FILE,
    DIAGRAM_SVG_FILE,
};
