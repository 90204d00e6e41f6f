use tracing::debug;

use crate::core::ResultTable;
use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

use super::chart_config::ChartConfig;
use super::chart_scene::build_scene;
use super::render_frame_builder::build_render_frame;
use super::render_style::RenderStyle;

/// Builds the frame for `table` with the default style.
pub fn build_chart_frame(table: &ResultTable, config: &ChartConfig) -> ChartResult<RenderFrame> {
    build_chart_frame_with_style(table, config, &RenderStyle::default())
}

pub fn build_chart_frame_with_style(
    table: &ResultTable,
    config: &ChartConfig,
    style: &RenderStyle,
) -> ChartResult<RenderFrame> {
    let scene = build_scene(table, config, style)?;
    build_render_frame(&scene, style, config.viewport)
}

/// Builds the chart frame and hands it to `renderer`.
///
/// Returns the frame that was drawn so callers can inspect or re-export it.
pub fn render_with<R: Renderer>(
    renderer: &mut R,
    table: &ResultTable,
    config: &ChartConfig,
    style: &RenderStyle,
) -> ChartResult<RenderFrame> {
    let frame = build_chart_frame_with_style(table, config, style)?;
    renderer.render(&frame)?;
    debug!(row_count = table.len(), "rendered score chart");
    Ok(frame)
}

#[cfg(feature = "cairo-backend")]
pub use png_export::{RenderedChart, render_png, render_png_with_style};

#[cfg(feature = "cairo-backend")]
mod png_export {
    use std::fs;
    use std::path::{Path, PathBuf};

    use tracing::debug;

    use crate::core::ResultTable;
    use crate::error::{ChartError, ChartResult};
    use crate::render::{CairoRenderer, RenderFrame, Renderer};

    use crate::api::{ChartConfig, RenderStyle};

    use super::build_chart_frame_with_style;

    /// PNG chart image plus the frame it was drawn from.
    #[derive(Debug, Clone, PartialEq)]
    pub struct RenderedChart {
        png: Vec<u8>,
        frame: RenderFrame,
        file_name: String,
    }

    impl RenderedChart {
        #[must_use]
        pub fn png_bytes(&self) -> &[u8] {
            &self.png
        }

        #[must_use]
        pub fn frame(&self) -> &RenderFrame {
            &self.frame
        }

        /// Suggested export file name, derived from the table variant.
        #[must_use]
        pub fn file_name(&self) -> &str {
            &self.file_name
        }

        /// Writes the PNG into `dir` under `file_name()` and returns the path.
        pub fn write_to_dir(&self, dir: &Path) -> ChartResult<PathBuf> {
            let path = dir.join(&self.file_name);
            fs::write(&path, &self.png).map_err(|err| {
                ChartError::Backend(format!("failed to write {}: {err}", path.display()))
            })?;
            debug!(path = %path.display(), bytes = self.png.len(), "exported chart png");
            Ok(path)
        }
    }

    pub fn render_png(table: &ResultTable, config: &ChartConfig) -> ChartResult<RenderedChart> {
        render_png_with_style(table, config, &RenderStyle::default())
    }

    /// Renders `table` to PNG on a surface scoped to this call.
    ///
    /// The surface is released before returning, on success and on error.
    pub fn render_png_with_style(
        table: &ResultTable,
        config: &ChartConfig,
        style: &RenderStyle,
    ) -> ChartResult<RenderedChart> {
        let frame = build_chart_frame_with_style(table, config, style)?;
        let (png, stats) = {
            let mut renderer = CairoRenderer::for_viewport(frame.viewport)?;
            renderer.render(&frame)?;
            (renderer.encode_png()?, renderer.last_stats())
        };
        debug!(
            bytes = png.len(),
            width = frame.viewport.width,
            height = frame.viewport.height,
            rects = stats.rects_drawn,
            lines = stats.lines_drawn,
            texts = stats.texts_drawn,
            "encoded chart png"
        );
        Ok(RenderedChart {
            png,
            frame,
            file_name: table.export_file_name(),
        })
    }
}
