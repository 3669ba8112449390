// SPDX-License-Identifier: GPL-3.0-only

//! Writing rendered documents to disk.

use crate::renderer::Document;
use snafu::prelude::*;
use std::path::{Path, PathBuf};

/// Error type for output failures.
#[derive(Debug, Snafu)]
pub enum WriteError {
    /// Failed to create the output directory.
    #[snafu(display("failed to create output directory {}: {source}", path.display()))]
    CreateDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to write a document.
    #[snafu(display("failed to write {}: {source}", path.display()))]
    WriteFile {
        /// The file that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Writes each document to `dir`, named after its category.
///
/// The directory is created if it does not exist. Existing files are
/// overwritten with exactly the rendered Markdown.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a file cannot be
/// written.
pub fn write_documents(dir: &Path, documents: &[Document]) -> Result<Vec<PathBuf>, WriteError> {
    std::fs::create_dir_all(dir).context(CreateDirSnafu { path: dir })?;

    documents
        .iter()
        .map(|doc| -> Result<PathBuf, WriteError> {
            let path = dir.join(doc.category.file_name());
            std::fs::write(&path, &doc.markdown).context(WriteFileSnafu { path: &path })?;
            Ok(path)
        })
        .collect()
}
