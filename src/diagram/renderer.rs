//! Diagram rendering through the Mermaid CLI
//!
//! The render workspace is a directory holding the cleaned source
//! (`diagram.mmd`) and the rendered vector output (`diagram.svg`). Diagram
//! syntax is never checked here; `mmdc` reports it.
//!
//! Every `mmdc` run also gets `mermaid-config.json` from the workspace, which
//! holds the ER layout settings (full width, wrapped labels, light attribute
//! rows).

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::diagram::fence::strip_fences;

/// Cleaned source file inside the render workspace
pub const DIAGRAM_SOURCE_FILE: &str = "diagram.mmd";
/// Rendered vector diagram inside the render workspace
pub const DIAGRAM_SVG_FILE: &str = "diagram.svg";
/// Mermaid configuration passed to every `mmdc` run
pub const DIAGRAM_CONFIG_FILE: &str = "mermaid-config.json";
/// Default Mermaid CLI executable
pub const DEFAULT_MMDC: &str = "mmdc";

/// Mermaid configuration file contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MermaidConfig {
    pub er: ErConfig,
}

/// ER diagram settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErConfig {
    pub use_max_width: bool,
    pub attribute_background: String,
    pub font_size: u32,
    pub padding: u32,
    pub wrap: bool,
}

impl Default for MermaidConfig {
    fn default() -> Self {
        Self {
            er: ErConfig {
                use_max_width: true,
                attribute_background: "#fafafa".to_string(),
                font_size: 14,
                padding: 8,
                wrap: true,
            },
        }
    }
}

impl MermaidConfig {
    pub fn to_json(&self) -> Result<String, RenderError> {
        serde_json::to_string_pretty(self).map_err(|e| RenderError::Config(e.to_string()))
    }
}

/// Render failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("failed to prepare render workspace {path}: {message}")]
    Workspace { path: String, message: String },

    #[error("failed to encode mermaid config: {0}")]
    Config(String),

    #[error("failed to run {program}: {message}")]
    Spawn { program: String, message: String },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
}

/// Output of a successful render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDiagram {
    /// Cleaned diagram source as handed to the renderer
    pub source: String,
    pub source_path: PathBuf,
    pub svg_path: PathBuf,
}

impl RenderedDiagram {
    fn in_workspace(source: String, workspace: &Path) -> Self {
        Self {
            source,
            source_path: workspace.join(DIAGRAM_SOURCE_FILE),
            svg_path: workspace.join(DIAGRAM_SVG_FILE),
        }
    }
}

/// External diagram renderer
#[async_trait]
pub trait DiagramRenderer: Send + Sync {
    /// Strip fences from `source` and render it into `workspace`
    async fn render(&self, source: &str, workspace: &Path)
        -> Result<RenderedDiagram, RenderError>;

    /// Rasterize the workspace's diagram to a PNG at its natural size
    async fn rasterize(&self, workspace: &Path, png_path: &Path) -> Result<(), RenderError>;
}

/// `mmdc` (Mermaid CLI) renderer
#[derive(Debug, Clone)]
pub struct MermaidCli {
    program: PathBuf,
}

impl MermaidCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    async fn run(&self, workspace: &Path, output: &Path) -> Result<(), RenderError> {
        let input = workspace.join(DIAGRAM_SOURCE_FILE);
        let config = write_config(workspace).await?;
        let program = self.program.display().to_string();
        debug!(%program, input = %input.display(), output = %output.display(), "running mermaid cli");

        let result = tokio::process::Command::new(&self.program)
            .arg("--quiet")
            .arg("-c")
            .arg(&config)
            .arg("-i")
            .arg(&input)
            .arg("-o")
            .arg(output)
            .output()
            .await
            .map_err(|e| RenderError::Spawn {
                program: program.clone(),
                message: e.to_string(),
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            warn!(%program, status = %result.status, "mermaid cli failed");
            return Err(RenderError::Failed {
                program,
                status: result.status.to_string(),
                stderr,
            });
        }
        Ok(())
    }
}

impl Default for MermaidCli {
    fn default() -> Self {
        Self::new(DEFAULT_MMDC)
    }
}

#[async_trait]
impl DiagramRenderer for MermaidCli {
    async fn render(
        &self,
        source: &str,
        workspace: &Path,
    ) -> Result<RenderedDiagram, RenderError> {
        let rendered = write_source(source, workspace).await?;
        self.run(workspace, &rendered.svg_path).await?;
        info!(svg = %rendered.svg_path.display(), "diagram rendered");
        Ok(rendered)
    }

    async fn rasterize(&self, workspace: &Path, png_path: &Path) -> Result<(), RenderError> {
        self.run(workspace, png_path).await
    }
}

/// In-process renderer for tests
///
/// Writes placeholder output files; optionally fails every call.
#[derive(Debug, Clone, Default)]
pub struct FakeRenderer {
    pub fail_with: Option<RenderError>,
}

impl FakeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: RenderError) -> Self {
        Self {
            fail_with: Some(error),
        }
    }
}

/// Placeholder SVG written by the fake renderer
pub const FAKE_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"></svg>"#;
/// PNG signature written by the fake rasterizer
pub const FAKE_PNG: &[u8] = b"\x89PNG\r\n\x1a\n";

#[async_trait]
impl DiagramRenderer for FakeRenderer {
    async fn render(
        &self,
        source: &str,
        workspace: &Path,
    ) -> Result<RenderedDiagram, RenderError> {
        if let Some(ref err) = self.fail_with {
            return Err(err.clone());
        }
        let rendered = write_source(source, workspace).await?;
        write_file(&rendered.svg_path, FAKE_SVG.as_bytes()).await?;
        Ok(rendered)
    }

    async fn rasterize(&self, _workspace: &Path, png_path: &Path) -> Result<(), RenderError> {
        if let Some(ref err) = self.fail_with {
            return Err(err.clone());
        }
        write_file(png_path, FAKE_PNG).await
    }
}

/// Concrete renderer enum
#[derive(Debug, Clone)]
pub enum Renderer {
    MermaidCli(MermaidCli),
    Fake(FakeRenderer),
}

#[async_trait]
impl DiagramRenderer for Renderer {
    async fn render(
        &self,
        source: &str,
        workspace: &Path,
    ) -> Result<RenderedDiagram, RenderError> {
        match self {
            Renderer::MermaidCli(r) => r.render(source, workspace).await,
            Renderer::Fake(r) => r.render(source, workspace).await,
        }
    }

    async fn rasterize(&self, workspace: &Path, png_path: &Path) -> Result<(), RenderError> {
        match self {
            Renderer::MermaidCli(r) => r.rasterize(workspace, png_path).await,
            Renderer::Fake(r) => r.rasterize(workspace, png_path).await,
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::MermaidCli(MermaidCli::default())
    }
}

async fn write_source(source: &str, workspace: &Path) -> Result<RenderedDiagram, RenderError> {
    let rendered = RenderedDiagram::in_workspace(strip_fences(source), workspace);
    tokio::fs::create_dir_all(workspace)
        .await
        .map_err(|e| RenderError::Workspace {
            path: workspace.display().to_string(),
            message: e.to_string(),
        })?;
    // A stale SVG must not survive a failed re-render
    let _ = tokio::fs::remove_file(&rendered.svg_path).await;
    write_file(&rendered.source_path, rendered.source.as_bytes()).await?;
    Ok(rendered)
}

async fn write_config(workspace: &Path) -> Result<PathBuf, RenderError> {
    let path = workspace.join(DIAGRAM_CONFIG_FILE);
    write_file(&path, MermaidConfig::default().to_json()?.as_bytes()).await?;
    Ok(path)
}

async fn write_file(path: &Path, contents: &[u8]) -> Result<(), RenderError> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| RenderError::Workspace {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}
