// SPDX-License-Identifier: GPL-3.0-only

//! Markdown rendering for classified API surfaces.
//!
//! Each [`ApiSurface`] renders to five documents, one per [`Category`]. Every
//! document opens with a title naming the API, the runtime context, the
//! category and the dump version.
//!
//! # Output Format
//!
//! - Enums: a `##` section per enum with a table of its constants
//! - Constants: a single table of constants not owned by an enum
//! - Classes: a `##` section per class with `### Members`, `### Functions`
//!   and `### Hooks` lists
//! - Functions and hooks: a `##` section per record with its signature in a
//!   `cpp` code block
//!
//! # Example
//!
//! ```
//! use vscript2md::parser::{parse_section, Context};
//! use vscript2md::renderer::{render_surface, Category, RenderOptions};
//!
//! let surface = parse_section("Enum: Color\n\nConstant: Color.RED\nValue: 0").unwrap();
//! let docs = render_surface(&surface, Context::Server, "7.1", &RenderOptions::default());
//!
//! assert_eq!(docs[0].category, Category::Enums);
//! assert!(docs[0].markdown.starts_with("# VScript Server Enums, version 7.1"));
//! assert!(docs[0].markdown.contains("| Color.RED | 0 |"));
//! ```

use crate::parser::{ApiSurface, Class, Constant, Context, Enum, Signed};
use std::fmt::Write;

/// Configuration options for Markdown rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Name of the scripting API, used as the first word of every title.
    pub api_name: String,

    /// Line printed under every title.
    ///
    /// When `None`, the title is followed directly by the content.
    pub byline: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            api_name: "VScript".into(),
            byline: Some("Generated by Macosaro".into()),
        }
    }
}

/// A rendered document category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Enums and their constants.
    Enums,
    /// Constants not owned by an enum.
    Constants,
    /// Classes and their members, functions and hooks.
    Classes,
    /// Functions not owned by a class.
    Functions,
    /// Hooks not owned by a class.
    Hooks,
}

impl Category {
    /// Every category, in output order.
    pub const ALL: [Self; 5] = [
        Self::Enums,
        Self::Constants,
        Self::Classes,
        Self::Functions,
        Self::Hooks,
    ];

    /// Title used in the document heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Enums => "Enums",
            Self::Constants => "Constants",
            Self::Classes => "Classes",
            Self::Functions => "Global Functions",
            Self::Hooks => "Global Hooks",
        }
    }

    /// File name the document is written to.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Enums => "enums.md",
            Self::Constants => "constants.md",
            Self::Classes => "classes.md",
            Self::Functions => "functions.md",
            Self::Hooks => "hooks.md",
        }
    }
}

/// A rendered Markdown document for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// The category this document covers.
    pub category: Category,
    /// The complete Markdown text.
    pub markdown: String,
}

/// Returns a markdown heading prefix of the given level.
fn heading(level: usize) -> String {
    "#".repeat(level)
}

/// Renders every category of a surface.
///
/// Documents are returned in [`Category::ALL`] order.
#[must_use]
pub fn render_surface(
    surface: &ApiSurface,
    context: Context,
    version: &str,
    opts: &RenderOptions,
) -> Vec<Document> {
    Category::ALL
        .into_iter()
        .map(|category| Document {
            category,
            markdown: render_category(surface, category, context, version, opts),
        })
        .collect()
}

/// Renders one category of a surface as a Markdown document.
///
/// The final newline of the document is trimmed.
#[must_use]
pub fn render_category(
    surface: &ApiSurface,
    category: Category,
    context: Context,
    version: &str,
    opts: &RenderOptions,
) -> String {
    let mut out = String::new();
    writeln!(
        out,
        "# {} {context} {}, version {version}\n",
        opts.api_name,
        category.title()
    )
    .unwrap();
    if let Some(byline) = &opts.byline {
        writeln!(out, "{byline}\n").unwrap();
    }

    match category {
        Category::Enums => {
            for e in surface.enums.values() {
                render_enum(&mut out, e);
            }
        }
        Category::Constants => render_table(&mut out, surface.constants.values()),
        Category::Classes => {
            for class in surface.classes.values() {
                render_class(&mut out, class);
            }
        }
        Category::Functions => render_signed_list(&mut out, surface.functions.values(), 2),
        Category::Hooks => render_signed_list(&mut out, surface.hooks.values(), 2),
    }

    if out.ends_with('\n') {
        out.pop();
    }
    out
}

fn render_enum(out: &mut String, e: &Enum) {
    writeln!(out, "## {}\n", e.name).unwrap();
    if !e.description.is_empty() {
        writeln!(out, "{}", e.description).unwrap();
    }
    render_table(out, &e.values);
}

fn render_class(out: &mut String, class: &Class) {
    writeln!(out, "## {}\n", class.name).unwrap();
    if !class.description.is_empty() {
        writeln!(out, "{}\n", class.description).unwrap();
    }

    for (title, items) in [
        ("Members", &class.members),
        ("Functions", &class.functions),
        ("Hooks", &class.hooks),
    ] {
        if !items.is_empty() {
            writeln!(out, "### {title}\n").unwrap();
            render_signed_list(out, items, 4);
        }
    }
}

/// Renders constants as a `Name | Value | Description` table.
///
/// The description cell is left off rows whose description is empty.
fn render_table<'a>(out: &mut String, constants: impl IntoIterator<Item = &'a Constant>) {
    out.push_str("| Name | Value | Description |\n| --- | --- | --- |\n");
    for constant in constants {
        write!(out, "| {} | {} |", constant.name, constant.value).unwrap();
        if !constant.description.is_empty() {
            write!(out, " {} |", constant.description).unwrap();
        }
        out.push('\n');
    }
    out.push('\n');
}

/// Renders signed records separated by blank lines.
fn render_signed_list<'a>(
    out: &mut String,
    items: impl IntoIterator<Item = &'a Signed>,
    level: usize,
) {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        render_signed(out, item, level);
    }
    out.push('\n');
}

fn render_signed(out: &mut String, item: &Signed, level: usize) {
    writeln!(out, "{} {}", heading(level), item.name).unwrap();
    if !item.description.is_empty() {
        writeln!(out, "\n{}", item.description).unwrap();
    }
    writeln!(out, "\n```cpp\n{}\n```", item.signature).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{ApiSurface, Class, Constant, Enum, Signed};

    const BYLINE: &str = "Generated by Macosaro\n\n";

    fn constant(name: &str, value: &str, description: &str) -> Constant {
        Constant {
            name: name.into(),
            value: value.into(),
            description: description.into(),
        }
    }

    fn signed(name: &str, signature: &str, description: &str) -> Signed {
        Signed {
            name: name.into(),
            signature: signature.into(),
            description: description.into(),
        }
    }

    fn render(surface: &ApiSurface, category: Category) -> String {
        render_category(
            surface,
            category,
            Context::Server,
            "7.1",
            &RenderOptions::default(),
        )
    }

    #[test]
    fn renders_title_with_context_category_and_version() {
        let output = render_category(
            &ApiSurface::default(),
            Category::Functions,
            Context::Client,
            "7.1",
            &RenderOptions::default(),
        );

        assert!(output.starts_with("# VScript Client Global Functions, version 7.1\n\n"));
    }

    #[test]
    fn renders_without_byline() {
        let opts = RenderOptions {
            byline: None,
            ..Default::default()
        };
        let output = render_category(
            &ApiSurface::default(),
            Category::Hooks,
            Context::Server,
            "7.1",
            &opts,
        );

        assert_eq!(output, "# VScript Server Global Hooks, version 7.1\n\n");
    }

    #[test]
    fn renders_custom_api_name() {
        let opts = RenderOptions {
            api_name: "Squirrel".into(),
            ..Default::default()
        };
        let output = render_category(
            &ApiSurface::default(),
            Category::Enums,
            Context::Server,
            "1",
            &opts,
        );

        assert!(output.starts_with("# Squirrel Server Enums, version 1\n"));
    }

    #[test]
    fn trims_exactly_one_trailing_newline() {
        let output = render(&ApiSurface::default(), Category::Functions);

        assert_eq!(
            output,
            format!("# VScript Server Global Functions, version 7.1\n\n{BYLINE}")
        );
    }

    #[test]
    fn renders_enum_with_table() {
        let mut surface = ApiSurface::default();
        surface.enums.insert(
            "Color".into(),
            Enum {
                name: "Color".into(),
                description: "Colors".into(),
                values: vec![
                    constant("Color.RED", "0", "Red"),
                    constant("Color.BLUE", "1", ""),
                ],
            },
        );

        let output = render(&surface, Category::Enums);

        assert_eq!(
            output,
            format!(
                "# VScript Server Enums, version 7.1\n\n{BYLINE}\
## Color\n\n\
Colors\n\
| Name | Value | Description |\n\
| --- | --- | --- |\n\
| Color.RED | 0 | Red |\n\
| Color.BLUE | 1 |\n"
            )
        );
    }

    #[test]
    fn renders_empty_enum_with_header_only_table() {
        let mut surface = ApiSurface::default();
        surface.enums.insert(
            "Empty".into(),
            Enum {
                name: "Empty".into(),
                description: String::new(),
                values: vec![],
            },
        );

        let output = render(&surface, Category::Enums);

        assert!(output.ends_with(
            "## Empty\n\n| Name | Value | Description |\n| --- | --- | --- |\n"
        ));
    }

    #[test]
    fn renders_standalone_constants_as_one_table() {
        let mut surface = ApiSurface::default();
        surface
            .constants
            .insert("MAX".into(), constant("MAX", "64", "Max players"));
        surface
            .constants
            .insert("MIN".into(), constant("MIN", "1", ""));

        let output = render(&surface, Category::Constants);

        assert!(output.ends_with(
            "| Name | Value | Description |\n\
| --- | --- | --- |\n\
| MAX | 64 | Max players |\n\
| MIN | 1 |\n"
        ));
        assert_eq!(output.matches("| Name |").count(), 1);
    }

    #[test]
    fn renders_global_functions() {
        let mut surface = ApiSurface::default();
        surface
            .functions
            .insert("Msg".into(), signed("Msg", "void Msg(string)", "Prints"));
        surface
            .functions
            .insert("Other".into(), signed("Other", "int Other()", ""));

        let output = render(&surface, Category::Functions);

        assert_eq!(
            output,
            format!(
                "# VScript Server Global Functions, version 7.1\n\n{BYLINE}\
## Msg\n\nPrints\n\n```cpp\nvoid Msg(string)\n```\n\n\
## Other\n\n```cpp\nint Other()\n```\n"
            )
        );
    }

    #[test]
    fn renders_class_sections_in_order() {
        let mut surface = ApiSurface::default();
        surface.classes.insert(
            "C".into(),
            Class {
                name: "C".into(),
                description: "A class".into(),
                members: vec![signed("C.x", "int x", "")],
                functions: vec![signed("C::F", "void F()", "Does F")],
                hooks: vec![],
            },
        );

        let output = render(&surface, Category::Classes);

        assert_eq!(
            output,
            format!(
                "# VScript Server Classes, version 7.1\n\n{BYLINE}\
## C\n\nA class\n\n\
### Members\n\n#### C.x\n\n```cpp\nint x\n```\n\n\
### Functions\n\n#### C::F\n\nDoes F\n\n```cpp\nvoid F()\n```\n"
            )
        );
        assert!(!output.contains("### Hooks"));
    }

    #[test]
    fn renders_class_without_children() {
        let mut surface = ApiSurface::default();
        surface.classes.insert(
            "C".into(),
            Class {
                name: "C".into(),
                description: String::new(),
                members: vec![],
                functions: vec![],
                hooks: vec![],
            },
        );

        let output = render(&surface, Category::Classes);

        assert!(output.ends_with(&format!("{BYLINE}## C\n")));
    }

    #[test]
    fn renders_class_hooks() {
        let mut surface = ApiSurface::default();
        surface.classes.insert(
            "C".into(),
            Class {
                name: "C".into(),
                description: String::new(),
                members: vec![],
                functions: vec![],
                hooks: vec![
                    signed("C -> OnA", "void OnA()", ""),
                    signed("C -> OnB", "void OnB()", ""),
                ],
            },
        );

        let output = render(&surface, Category::Classes);

        assert!(output.contains(
            "### Hooks\n\n#### C -> OnA\n\n```cpp\nvoid OnA()\n```\n\n#### C -> OnB\n"
        ));
    }

    #[test]
    fn renders_all_categories_in_order() {
        let docs = render_surface(
            &ApiSurface::default(),
            Context::Server,
            "7.1",
            &RenderOptions::default(),
        );

        let categories: Vec<Category> = docs.iter().map(|d| d.category).collect();
        assert_eq!(categories, Category::ALL);
        assert!(docs[4].markdown.contains("Global Hooks"));
    }

    #[test]
    fn category_file_names() {
        let names: Vec<&str> = Category::ALL.iter().map(|c| c.file_name()).collect();

        assert_eq!(
            names,
            [
                "enums.md",
                "constants.md",
                "classes.md",
                "functions.md",
                "hooks.md"
            ]
        );
    }
}
