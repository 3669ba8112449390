// SPDX-License-Identifier: GPL-3.0-only

//! Parsing for VScript documentation dumps.
//!
//! A dump is a plain text file whose first line is the game version. The rest
//! holds two sections, server then client, separated by a line reading
//! `DOCUMENTATION_CLIENT`. Each section is a sequence of record blocks
//! separated by empty lines:
//!
//! ```text
//! =====================================
//! Function: CBaseEntity::GetName
//! Signature: string GetName()
//! Description: Returns the entity name.
//! =====================================
//! ```
//!
//! The first line of a block names the record kind and the record name. The
//! remaining lines set attributes. Records are then classified into an
//! [`ApiSurface`], nesting enum constants under their enum and class members,
//! functions and hooks under their class.
//!
//! # Example
//!
//! ```
//! use vscript2md::parser::parse_section;
//!
//! let section = "Enum: Color\n\nConstant: Color.RED\nValue: 0\n";
//! let surface = parse_section(section).unwrap();
//!
//! assert_eq!(surface.enums.len(), 1);
//! assert_eq!(surface.enums.get("Color").unwrap().values[0].value, "0");
//! assert!(surface.constants.is_empty());
//! ```

use indexmap::IndexMap;
use snafu::prelude::*;
use std::fmt;

/// Line separating the server section from the client section.
pub const CLIENT_MARKER: &str = "DOCUMENTATION_CLIENT";

/// Error raised while parsing a single record block.
#[derive(Debug, Snafu)]
pub enum RecordError {
    /// The block contained no lines.
    #[snafu(display("record is empty"))]
    Empty,

    /// A line did not have the `Key: Value` form.
    #[snafu(display("malformed line {line:?}: expected `Key: Value`"))]
    MalformedLine {
        /// The offending line.
        line: String,
    },

    /// The first line named an unknown record kind.
    #[snafu(display("unknown record kind {kind:?}"))]
    UnknownKind {
        /// The key found on the first line.
        kind: String,
    },

    /// An attribute is not recognized for this kind of record.
    #[snafu(display("unexpected attribute {key:?} on {kind} record"))]
    UnexpectedAttribute {
        /// The kind of record being parsed.
        kind: RecordKind,
        /// The unrecognized key.
        key: String,
    },

    /// A required attribute was never set.
    #[snafu(display("{kind} {name:?} has no {key}"))]
    MissingAttribute {
        /// The kind of record being parsed.
        kind: RecordKind,
        /// The record name.
        name: String,
        /// The required key.
        key: &'static str,
    },
}

/// Error raised while parsing a dump or one of its sections.
#[derive(Debug, Snafu)]
pub enum ParseError {
    /// The dump has no version line.
    #[snafu(display("dump is empty: expected a version line"))]
    MissingVersion,

    /// The dump has no client section marker.
    #[snafu(display("dump has no `DOCUMENTATION_CLIENT` line"))]
    MissingClientSection,

    /// A record block failed to parse.
    #[snafu(display("record {index}: {source}"))]
    Record {
        /// One-based position of the block within its section.
        index: usize,
        /// The record parsing failure.
        source: RecordError,
    },

    /// A member has no owning class to attach to.
    #[snafu(display("member {name:?} does not belong to a known class"))]
    OrphanMember {
        /// The member name.
        name: String,
    },

    /// A section failed to parse.
    #[snafu(display("{section} section: {source}"))]
    Section {
        /// The section that failed.
        section: Context,
        /// The underlying failure.
        #[snafu(source(from(ParseError, Box::new)))]
        source: Box<ParseError>,
    },
}

/// Runtime context a section of the dump documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    /// Server-side scripting API.
    Server,
    /// Client-side scripting API.
    Client,
}

impl Context {
    /// Both contexts, in dump order.
    pub const ALL: [Self; 2] = [Self::Server, Self::Client];

    /// Human-readable label used in document titles.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Server => "Server",
            Self::Client => "Client",
        }
    }

    /// Name of the output directory for this context.
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Server => "server",
            Self::Client => "client",
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The kind of a record, taken from the key of its first line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// An enumeration owning constants.
    Enum,
    /// A named constant value.
    Constant,
    /// A class owning members, functions and hooks.
    Class,
    /// A callable function.
    Function,
    /// A class data member.
    Member,
    /// A script hook called by the engine.
    Hook,
}

impl RecordKind {
    fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "Enum" => Self::Enum,
            "Constant" => Self::Constant,
            "Class" => Self::Class,
            "Function" => Self::Function,
            "Member" => Self::Member,
            "Hook" => Self::Hook,
            _ => return None,
        })
    }

    /// The key that introduces this kind of record.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enum => "Enum",
            Self::Constant => "Constant",
            Self::Class => "Class",
            Self::Function => "Function",
            Self::Member => "Member",
            Self::Hook => "Hook",
        }
    }

    const fn is_signed(self) -> bool {
        matches!(self, Self::Function | Self::Member | Self::Hook)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named constant, either standalone or owned by an [`Enum`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant {
    /// Fully qualified name (e.g., `Color.RED`).
    pub name: String,
    /// The constant's value, verbatim.
    pub value: String,
    /// Description, empty when absent.
    pub description: String,
}

/// A record carrying a declaration-style signature.
///
/// Used for functions, members and hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signed {
    /// Fully qualified name (e.g., `CBaseEntity::GetName`).
    pub name: String,
    /// The declaration, rendered verbatim in a code block.
    pub signature: String,
    /// Description, empty when absent.
    pub description: String,
}

/// An enumeration and the constants attributed to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enum {
    /// Enum name.
    pub name: String,
    /// Description, empty when absent.
    pub description: String,
    /// Constants whose name is prefixed with `{name}.`, in dump order.
    pub values: Vec<Constant>,
}

/// A class and the records attributed to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class {
    /// Class name.
    pub name: String,
    /// Description, empty when absent.
    pub description: String,
    /// Members named `{name}.member`.
    pub members: Vec<Signed>,
    /// Functions named `{name}::Function`.
    pub functions: Vec<Signed>,
    /// Hooks named `{name} -> Hook`.
    pub hooks: Vec<Signed>,
}

/// One parsed record block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// An `Enum:` block.
    Enum(Enum),
    /// A `Constant:` block.
    Constant(Constant),
    /// A `Class:` block.
    Class(Class),
    /// A `Function:` block.
    Function(Signed),
    /// A `Member:` block.
    Member(Signed),
    /// A `Hook:` block.
    Hook(Signed),
}

impl Record {
    /// The kind of this record.
    #[must_use]
    pub const fn kind(&self) -> RecordKind {
        match self {
            Self::Enum(_) => RecordKind::Enum,
            Self::Constant(_) => RecordKind::Constant,
            Self::Class(_) => RecordKind::Class,
            Self::Function(_) => RecordKind::Function,
            Self::Member(_) => RecordKind::Member,
            Self::Hook(_) => RecordKind::Hook,
        }
    }

    /// The record name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Enum(e) => &e.name,
            Self::Constant(c) => &c.name,
            Self::Class(c) => &c.name,
            Self::Function(s) | Self::Member(s) | Self::Hook(s) => &s.name,
        }
    }
}

/// Classified records of one runtime context.
///
/// Each map is keyed by record name and iterates in first-insertion order. A
/// later record with the same name replaces the earlier one in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiSurface {
    /// Enums, each owning its constants.
    pub enums: IndexMap<String, Enum>,
    /// Constants not owned by an enum.
    pub constants: IndexMap<String, Constant>,
    /// Classes, each owning its members, functions and hooks.
    pub classes: IndexMap<String, Class>,
    /// Functions not owned by a class.
    pub functions: IndexMap<String, Signed>,
    /// Hooks not owned by a class.
    pub hooks: IndexMap<String, Signed>,
}

/// A dump split into its version line and two sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dump<'a> {
    /// The version string from the first line.
    pub version: &'a str,
    /// Text of the server section.
    pub server: &'a str,
    /// Text of the client section.
    pub client: &'a str,
}

impl<'a> Dump<'a> {
    /// The sections paired with their context, server first.
    #[must_use]
    pub const fn sections(&self) -> [(Context, &'a str); 2] {
        [(Context::Server, self.server), (Context::Client, self.client)]
    }
}

/// Splits a dump into its version line and its server and client sections.
///
/// # Errors
///
/// Returns an error if the dump is empty or lacks the
/// [`CLIENT_MARKER`] line.
pub fn split_dump(text: &str) -> Result<Dump<'_>, ParseError> {
    ensure!(!text.is_empty(), MissingVersionSnafu);

    let (version, body) = text.split_once('\n').unwrap_or((text, ""));
    let version = version.trim_end_matches('\r');

    let mut offset = 0;
    for line in body.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == CLIENT_MARKER {
            return Ok(Dump {
                version,
                server: &body[..offset],
                client: &body[offset + line.len()..],
            });
        }
        offset += line.len();
    }

    MissingClientSectionSnafu.fail()
}

/// Returns `true` for decorative lines made only of `=` characters.
fn is_separator(line: &str) -> bool {
    !line.is_empty() && line.bytes().all(|b| b == b'=')
}

/// Splits a section into record blocks.
///
/// Blocks are separated by empty lines. Separator lines of `=` characters are
/// dropped, and blocks left with no lines are skipped. A line holding only
/// whitespace is not a separator and stays in its block.
#[must_use]
pub fn blocks(section: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for line in section.lines() {
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else if !is_separator(line) {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

/// Splits a `Key: Value` line on its first colon.
fn split_attribute(line: &str) -> Result<(&str, &str), RecordError> {
    match line.split_once(':') {
        Some((key, value)) if !key.is_empty() => Ok((key, value.trim_start())),
        _ => MalformedLineSnafu { line }.fail(),
    }
}

/// Parses one record block into a [`Record`].
///
/// The first line's key selects the record kind and its value is the record
/// name. Later lines set `Description`, `Value` (constants only) or
/// `Signature` (functions, members and hooks only).
///
/// # Errors
///
/// Returns an error if the block is empty, a line is not `Key: Value`, the
/// kind or an attribute is unrecognized, or a required attribute is missing.
///
/// # Example
///
/// ```
/// use vscript2md::parser::{parse_record, Record};
///
/// let record = parse_record(&[
///     "Function: CBaseEntity::GetName",
///     "Signature: string CBaseEntity::GetName()",
/// ]).unwrap();
///
/// let Record::Function(function) = record else { panic!() };
/// assert_eq!(function.signature, "string CBaseEntity::GetName()");
/// assert!(function.description.is_empty());
/// ```
pub fn parse_record(lines: &[&str]) -> Result<Record, RecordError> {
    let (first, rest) = lines.split_first().context(EmptySnafu)?;
    let (key, name) = split_attribute(first)?;
    let kind = RecordKind::from_key(key).context(UnknownKindSnafu { kind: key })?;

    let mut description = None;
    let mut value = None;
    let mut signature = None;

    for line in rest {
        let (key, text) = split_attribute(line)?;
        let slot = match key {
            "Description" => &mut description,
            "Value" if kind == RecordKind::Constant => &mut value,
            "Signature" if kind.is_signed() => &mut signature,
            _ => return UnexpectedAttributeSnafu { kind, key }.fail(),
        };
        *slot = Some(text.to_owned());
    }

    let description = description.unwrap_or_default();
    let require = |field: Option<String>, key: &'static str| -> Result<String, RecordError> {
        field.context(MissingAttributeSnafu { kind, name, key })
    };

    Ok(match kind {
        RecordKind::Enum => Record::Enum(Enum {
            name: name.to_owned(),
            description,
            values: Vec::new(),
        }),
        RecordKind::Constant => Record::Constant(Constant {
            name: name.to_owned(),
            value: require(value, "Value")?,
            description,
        }),
        RecordKind::Class => Record::Class(Class {
            name: name.to_owned(),
            description,
            members: Vec::new(),
            functions: Vec::new(),
            hooks: Vec::new(),
        }),
        RecordKind::Function => Record::Function(Signed {
            name: name.to_owned(),
            signature: require(signature, "Signature")?,
            description,
        }),
        RecordKind::Member => Record::Member(Signed {
            name: name.to_owned(),
            signature: require(signature, "Signature")?,
            description,
        }),
        RecordKind::Hook => Record::Hook(Signed {
            name: name.to_owned(),
            signature: require(signature, "Signature")?,
            description,
        }),
    })
}

/// The part of `name` before the first `separator`, or all of it.
fn owner<'a>(name: &'a str, separator: &str) -> &'a str {
    name.split_once(separator).map_or(name, |(prefix, _)| prefix)
}

/// Classifies records into an [`ApiSurface`].
///
/// Records are processed in order, so a child is only attached to a parent
/// that appeared before it. Children without a known parent are filed as
/// standalone records.
///
/// # Errors
///
/// Returns [`ParseError::OrphanMember`] for a member whose class is not
/// known, since members have no standalone category.
pub fn classify(records: impl IntoIterator<Item = Record>) -> Result<ApiSurface, ParseError> {
    let mut surface = ApiSurface::default();

    for record in records {
        match record {
            Record::Constant(constant) => {
                if let Some(parent) = surface.enums.get_mut(owner(&constant.name, ".")) {
                    parent.values.push(constant);
                } else {
                    surface.constants.insert(constant.name.clone(), constant);
                }
            }
            Record::Function(function) => {
                if let Some(parent) = surface.classes.get_mut(owner(&function.name, "::")) {
                    parent.functions.push(function);
                } else {
                    surface.functions.insert(function.name.clone(), function);
                }
            }
            Record::Member(member) => {
                let Some(parent) = surface.classes.get_mut(owner(&member.name, ".")) else {
                    return OrphanMemberSnafu { name: member.name }.fail();
                };
                parent.members.push(member);
            }
            Record::Hook(hook) => {
                if let Some(parent) = surface.classes.get_mut(owner(&hook.name, " -> ")) {
                    parent.hooks.push(hook);
                } else {
                    surface.hooks.insert(hook.name.clone(), hook);
                }
            }
            Record::Enum(e) => {
                surface.enums.insert(e.name.clone(), e);
            }
            Record::Class(class) => {
                surface.classes.insert(class.name.clone(), class);
            }
        }
    }

    Ok(surface)
}

/// Parses and classifies one section of a dump.
///
/// # Errors
///
/// Returns an error if a record block fails to parse or a member has no
/// owning class.
pub fn parse_section(section: &str) -> Result<ApiSurface, ParseError> {
    let records = blocks(section)
        .iter()
        .enumerate()
        .map(|(i, block)| parse_record(block).context(RecordSnafu { index: i + 1 }))
        .collect::<Result<Vec<_>, ParseError>>()?;

    classify(records)
}

/// A dump with both sections parsed and classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDump<'a> {
    /// The version string from the first line.
    pub version: &'a str,
    /// Classified records per context, server first.
    pub surfaces: Vec<(Context, ApiSurface)>,
}

/// Splits a dump and parses both of its sections.
///
/// Both sections are parsed before returning, so a malformed client section
/// fails the whole dump.
///
/// # Errors
///
/// Returns an error if the dump cannot be split or either section fails to
/// parse. Section failures are wrapped in [`ParseError::Section`].
pub fn parse_dump(text: &str) -> Result<ParsedDump<'_>, ParseError> {
    let dump = split_dump(text)?;
    let surfaces = dump
        .sections()
        .into_iter()
        .map(|(section, body)| -> Result<_, ParseError> {
            let surface = parse_section(body).context(SectionSnafu { section })?;
            Ok((section, surface))
        })
        .collect::<Result<Vec<_>, ParseError>>()?;

    Ok(ParsedDump {
        version: dump.version,
        surfaces,
    })
}
