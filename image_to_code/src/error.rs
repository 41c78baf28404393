/*
    Copyright (C) 2025 bugo07
    Released under EUPL 1.2 License
*/

//! Error types for the image transcoder.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a transcoding pass.
///
/// Every variant is fatal: nothing is written to the output folder once one is raised.
#[derive(Error, Debug)]
pub enum TranscodeError {
    #[error("invalid module name {0:?}: expected [A-Za-z_][A-Za-z0-9_]*")]
    InvalidModuleName(String),

    #[error("cannot read input folder {}", path.display())]
    InputFolder {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot load image {}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(
        "duplicate resource name {stem}: {} and {} map to the same symbols",
        first.display(),
        second.display()
    )]
    DuplicateResourceName {
        stem: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("cannot write output {}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl TranscodeError {
    /// True for the failures that come from the filesystem rather than image content.
    pub fn is_file_system(&self) -> bool {
        matches!(self, Self::InputFolder { .. } | Self::OutputWrite { .. })
    }
}

pub type Result<T> = std::result::Result<T, TranscodeError>;
