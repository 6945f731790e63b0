// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for the export engine.

use std::path::PathBuf;

/// Failure to persist a serialized shader
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The output file could not be written
    #[error("Failed to write shader to {}: {source}", path.display())]
    Io {
        /// Output path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}
