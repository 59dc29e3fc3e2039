//! Text renderings of a menu tree for the terminal.

use std::fmt::Write as _;

use oystr_menu::{MenuItem, MenuNode};

use crate::error::{Result, ShellError};

const INDENT: &str = "  ";
const SEPARATOR: &str = "----";

/// Render `tree` as an indented outline.
///
/// Checkable items get `[x]`/`[ ]`, disabled items a `(disabled)` marker,
/// and with `show_ids` every line ends with the id to pass to `activate`.
#[must_use]
pub fn outline(tree: &[MenuNode], show_ids: bool) -> String {
    let mut out = String::new();
    write_nodes(&mut out, tree, 0, show_ids);
    out
}

/// Render `tree` as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn json(tree: &[MenuNode]) -> Result<String> {
    serde_json::to_string_pretty(tree).map_err(|e| ShellError::Serialize(e.to_string()))
}

fn write_nodes(out: &mut String, nodes: &[MenuNode], depth: usize, show_ids: bool) {
    let indent = INDENT.repeat(depth);
    for node in nodes {
        match node {
            MenuNode::Separator => {
                let _ = writeln!(out, "{indent}{SEPARATOR}");
            }
            MenuNode::Submenu(submenu) => {
                let _ = write!(out, "{indent}{}", submenu.label);
                if show_ids {
                    let _ = write!(out, "  #{}", submenu.id);
                }
                out.push('\n');
                write_nodes(out, &submenu.children, depth + 1, show_ids);
            }
            MenuNode::Item(item) => {
                out.push_str(&indent);
                write_item(out, item, show_ids);
                out.push('\n');
            }
        }
    }
}

fn write_item(out: &mut String, item: &MenuItem, show_ids: bool) {
    match item.checked {
        Some(true) => out.push_str("[x] "),
        Some(false) => out.push_str("[ ] "),
        None => {}
    }
    out.push_str(&item.label);
    if let Some(accelerator) = &item.accelerator {
        let _ = write!(out, "  <{}>", accelerator.as_str());
    }
    if !item.enabled {
        out.push_str("  (disabled)");
    }
    if show_ids {
        let _ = write!(out, "  #{}", item.id);
    }
}
