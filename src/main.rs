// SPDX-License-Identifier: GPL-3.0-only

//! Command-line interface for vscript2md.
//!
//! This binary reads the documentation dump from a fixed path in the working
//! directory and writes Markdown pages into `server/` and `client/` next to
//! it.

use lexopt::prelude::*;
use snafu::prelude::*;
use std::path::{Path, PathBuf};
use vscript2md::{parser, render_dump, renderer::RenderOptions, writer};

/// Dump read from the working directory.
const INPUT_PATH: &str = "mapbase_7.1.txt";

struct Cli {
    quiet: bool,
}

#[derive(Debug, Snafu)]
enum Error {
    #[snafu(display("failed to parse arguments: {source}"))]
    ParseArgs { source: lexopt::Error },

    #[snafu(display("failed to read {}: {source}", path.display()))]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("failed to parse {}: {source}", path.display()))]
    Parse {
        path: PathBuf,
        source: parser::ParseError,
    },

    #[snafu(display("failed to write documents to {}: {source}", dir.display()))]
    Write {
        dir: PathBuf,
        source: writer::WriteError,
    },
}

fn print_help() {
    println!(
        "\
{name} {version}
Convert a VScript documentation dump to Markdown

Usage: {name} [OPTIONS]

Reads {INPUT_PATH} from the current directory and writes
server/*.md and client/*.md.

Options:
  -q, --quiet    Suppress progress messages
  -h, --help     Print help
  -V, --version  Print version",
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
    );
}

fn parse_args() -> Result<Cli, lexopt::Error> {
    let mut quiet = false;

    let mut parser = lexopt::Parser::from_env();
    while let Some(arg) = parser.next()? {
        match arg {
            Short('q') | Long("quiet") => quiet = true,
            Short('h') | Long("help") => {
                print_help();
                std::process::exit(0);
            }
            Short('V') | Long("version") => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            _ => return Err(arg.unexpected()),
        }
    }

    Ok(Cli { quiet })
}

#[snafu::report]
fn main() -> Result<(), Error> {
    let cli = parse_args().context(ParseArgsSnafu)?;
    let input = Path::new(INPUT_PATH);

    let text = std::fs::read_to_string(input).context(ReadInputSnafu { path: input })?;
    // Render everything first so malformed input leaves no partial output.
    let contexts = render_dump(&text, &RenderOptions::default())
        .context(ParseSnafu { path: input })?;

    for rendered in &contexts {
        let dir = Path::new(rendered.context.dir_name());
        let written =
            writer::write_documents(dir, &rendered.documents).context(WriteSnafu { dir })?;
        if !cli.quiet {
            for path in written {
                eprintln!("Wrote {}", path.display());
            }
        }
    }

    Ok(())
}
