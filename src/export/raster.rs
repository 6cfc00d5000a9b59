//! PNG export of the rendered diagram

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::diagram::{DiagramRenderer, DIAGRAM_SVG_FILE};
use crate::export::ExportError;

/// Name of the downloaded image
pub const PNG_FILE_NAME: &str = "database-diagram.png";

/// Rasterize the workspace's rendered diagram into `out_dir`
///
/// Returns `Ok(None)` without doing anything when nothing has been rendered
/// yet. Otherwise waits for the rasterizer and returns the PNG path.
pub async fn export_png<R>(
    renderer: &R,
    workspace: &Path,
    out_dir: &Path,
) -> Result<Option<PathBuf>, ExportError>
where
    R: DiagramRenderer + ?Sized,
{
    let svg = workspace.join(DIAGRAM_SVG_FILE);
    if !svg.is_file() {
        debug!(svg = %svg.display(), "no rendered diagram, skipping png export");
        return Ok(None);
    }

    tokio::fs::create_dir_all(out_dir)
        .await
        .map_err(|e| ExportError::OutputDir {
            path: out_dir.display().to_string(),
            message: e.to_string(),
        })?;

    let png = out_dir.join(PNG_FILE_NAME);
    renderer.rasterize(workspace, &png).await?;
    info!(png = %png.display(), "diagram exported");
    Ok(Some(png))
}
