//! Conversion of several independent spritesheets.

use std::path::{Path, PathBuf};

use crate::{
    action::{ProcessError, compress::compress_image},
    cli::Configuration,
    format::OutputFormat,
};

/// Converts every spritesheet in `images` as described by `config`.
///
/// Each result is written to the path returned by [`batch_output_path()`]. A failing
/// spritesheet is reported and the remaining spritesheets are still converted.
///
/// # Errors
///
/// - [`ProcessError::Batch`]: Returned if any spritesheet failed.
pub fn compress_batch(images: &[PathBuf], config: &Configuration) -> Result<(), ProcessError> {
    let rule = "=".repeat(60);

    let mut failed = 0;
    let mut verification = false;
    for image in images {
        eprintln!("\n{rule}");
        eprintln!("Processing: {}", image.display());
        eprintln!("{rule}");

        let output = batch_output_path(image, config.format, config.output.as_deref());
        if let Err(error) = compress_image(image, config, Some(&output)) {
            log::error!("{}: {error}", image.display());
            verification |= error.is_verification();
            failed += 1;
        }
    }

    if failed != 0 {
        return Err(ProcessError::Batch {
            failed,
            total: images.len(),
            verification,
        });
    }

    Ok(())
}

/// Returns the path at which the result of converting `image` is written: the file stem of
/// `image` with the extension of `format`, placed in `directory` if one is given.
pub fn batch_output_path(image: &Path, format: OutputFormat, directory: Option<&Path>) -> PathBuf {
    let stem = image.file_stem().unwrap_or(image.as_os_str());

    let mut path = directory.map(Path::to_path_buf).unwrap_or_default();
    path.push(stem);
    path.set_extension(format.file_extension());
    path
}
