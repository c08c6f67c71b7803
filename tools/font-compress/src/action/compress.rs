//! Conversion of a single spritesheet.

use std::path::Path;

use anyhow::Context;
use glyph_codec::pipeline::{self, PipelineError, Verification};

use crate::{action::ProcessError, cli::Configuration, format, sheet, stats};

/// Converts the spritesheet at `image` as described by `config`, writing the result to
/// `output` or to standard output if `output` is `None`.
///
/// A stream that fails verification is never written.
///
/// # Errors
///
/// - [`ProcessError::Verification`]: Returned if verification was requested and failed.
/// - [`ProcessError::Failed`]: Returned if the image cannot be loaded or converted, or if
///     writing the preview or the output fails.
pub fn compress_image(
    image: &Path,
    config: &Configuration,
    output: Option<&Path>,
) -> Result<(), ProcessError> {
    let spritesheet = sheet::load(image)?;
    let gray = spritesheet
        .as_gray_image()
        .with_context(|| format!("error reading {}", image.display()))?;

    let result = match pipeline::run(&gray, &config.options) {
        Ok(result) => result,
        Err(PipelineError::Verification(error)) => return Err(error.into()),
        Err(error) => {
            return Err(anyhow::Error::new(error)
                .context(format!("error converting {}", image.display()))
                .into());
        }
    };

    if config.stats {
        stats::print_stats(&result, spritesheet.width(), spritesheet.height());
    }

    if config.list_fonts {
        stats::print_font_listing(&result, &config.options.charset);
    }

    if let Some(preview) = config.preview.as_deref() {
        sheet::save_preview(&result.pixels, spritesheet.width(), spritesheet.height(), preview)?;
    }

    if result.verification == Verification::Passed {
        log::info!("Compression verified successfully");
    }

    format::write_output(&result, config.format, &config.name, output)?;

    Ok(())
}
