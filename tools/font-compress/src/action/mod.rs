//! Implementations of the [`Action`]s.

pub mod batch;
pub mod compress;

use std::{error, fmt, process::ExitCode};

use glyph_codec::pipeline::VerificationError;

use crate::cli::Action;

/// The exit status reported when any failure other than verification occurs.
pub const EXIT_FAILURE: u8 = 1;
/// The exit status reported when a produced stream fails verification.
pub const EXIT_VERIFICATION_FAILURE: u8 = 2;

/// Carries out `action`.
///
/// # Errors
///
/// Returns the [`ProcessError`] describing why the [`Action`] failed.
pub fn run(action: Action) -> Result<(), ProcessError> {
    match action {
        Action::Compress {
            image,
            configuration,
        } => compress::compress_image(&image, &configuration, configuration.output.as_deref()),
        Action::Batch {
            images,
            configuration,
        } => batch::compress_batch(&images, &configuration),
    }
}

/// Various errors that can occur while carrying out an [`Action`].
#[derive(Debug)]
pub enum ProcessError {
    /// The produced stream does not decode back to the binarized spritesheet.
    Verification(VerificationError),
    /// Any other failure of a single spritesheet.
    Failed(anyhow::Error),
    /// Some spritesheets of a batch failed.
    Batch {
        /// The number of spritesheets that failed.
        failed: usize,
        /// The number of spritesheets in the batch.
        total: usize,
        /// Whether any of the failures was a verification failure.
        verification: bool,
    },
}

impl ProcessError {
    /// Returns `true` if the [`ProcessError`] is or includes a verification failure.
    pub fn is_verification(&self) -> bool {
        matches!(
            self,
            Self::Verification(_) | Self::Batch {
                verification: true,
                ..
            }
        )
    }

    /// Returns the exit status the process should terminate with.
    pub fn exit_status(&self) -> u8 {
        if self.is_verification() {
            EXIT_VERIFICATION_FAILURE
        } else {
            EXIT_FAILURE
        }
    }

    /// Returns the [`ExitCode`] the process should terminate with.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

impl From<anyhow::Error> for ProcessError {
    fn from(value: anyhow::Error) -> Self {
        Self::Failed(value)
    }
}

impl From<VerificationError> for ProcessError {
    fn from(value: VerificationError) -> Self {
        Self::Verification(value)
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verification(error) => write!(f, "{error}"),
            Self::Failed(error) => write!(f, "{error:#}"),
            Self::Batch { failed, total, .. } => {
                write!(f, "{failed} of {total} images failed")
            }
        }
    }
}

impl error::Error for ProcessError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Verification(error) => Some(error),
            Self::Failed(error) => Some(&**error),
            Self::Batch { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_has_distinct_exit_code() {
        let verification = ProcessError::Batch {
            failed: 2,
            total: 3,
            verification: true,
        };
        let other = ProcessError::Failed(anyhow::anyhow!("unreadable"));

        assert!(verification.is_verification());
        assert!(!other.is_verification());
        assert_eq!(verification.exit_status(), EXIT_VERIFICATION_FAILURE);
        assert_eq!(other.exit_status(), EXIT_FAILURE);
    }
}
