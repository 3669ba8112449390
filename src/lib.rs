// SPDX-License-Identifier: GPL-3.0-only

//! Convert VScript documentation dumps to Markdown.
//!
//! This crate provides parsing and rendering functionality for transforming
//! the plain text API dump printed by the game's script documentation command
//! into Markdown reference pages.
//!
//! # Overview
//!
//! A dump describes the server and client scripting APIs as flat records
//! (enums, constants, classes, functions, members and hooks). This crate:
//!
//! 1. Splits the dump into its version line and its two sections
//! 2. Parses each record block and nests constants under their enum and
//!    members, functions and hooks under their class
//! 3. Renders one Markdown document per category and context
//! 4. Writes the documents to a directory per context
//!
//! # Example
//!
//! ```
//! use vscript2md::{render_dump, renderer::RenderOptions};
//!
//! let dump = "7.1\nEnum: Color\n\nConstant: Color.RED\nValue: 0\n\nDOCUMENTATION_CLIENT\n";
//! let contexts = render_dump(dump, &RenderOptions::default()).unwrap();
//!
//! assert_eq!(contexts.len(), 2);
//! assert!(contexts[0].documents[0].markdown.contains("## Color"));
//! ```
//!
//! # Modules
//!
//! - [`parser`]: dump splitting, record parsing and classification
//! - [`renderer`]: Markdown generation per category
//! - [`writer`]: writing rendered documents to disk

#![deny(missing_docs)]

pub mod parser;
pub mod renderer;
pub mod writer;

use parser::{Context, ParseError};
use renderer::{Document, RenderOptions};

/// The rendered documents of one runtime context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextDocuments {
    /// The context the documents describe.
    pub context: Context,
    /// One document per category, in [`renderer::Category::ALL`] order.
    pub documents: Vec<Document>,
}

/// Parses a whole dump and renders every context.
///
/// Nothing is written to disk. Both sections are parsed before anything is
/// rendered, so callers can defer all writes until the whole dump is known
/// to be valid.
///
/// # Errors
///
/// Returns an error if the dump cannot be split or either section fails to
/// parse.
pub fn render_dump(text: &str, opts: &RenderOptions) -> Result<Vec<ContextDocuments>, ParseError> {
    let dump = parser::parse_dump(text)?;

    Ok(dump
        .surfaces
        .iter()
        .map(|(context, surface)| ContextDocuments {
            context: *context,
            documents: renderer::render_surface(surface, *context, dump.version, opts),
        })
        .collect())
}
