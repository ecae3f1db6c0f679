//! Human-readable renderings of TLV node trees.
//!
//! Provides the hex-row helpers used by the command-line front end, the annotated byte-table
//! rendering of [`Node::print_details`], and the indented pretty representation behind
//! [`Node`]'s [`std::fmt::Display`] implementation.

use crate::node::{Node, Scalar, Serializable};
use crate::types::{DataId, Wiretype};
use crate::{wire, Result};


/// Indentation added per nesting level.
const INDENT_INCREMENT: usize = 4;

/// Bytes shown per row in byte-table renderings.
const BYTES_PER_ROW: usize = 4;

/// Column width of the annotation labels in the default renderings.
pub const DEFAULT_COLUMN_WIDTH: usize = 15;

/// Formats bytes as rows of space-separated upper-case hex pairs.
#[must_use]
pub fn hex_rows(bytes: &[u8], bytes_per_row: usize) -> Vec<String> {
    bytes
        .chunks(bytes_per_row)
        .map(|chunk| {
            chunk
                .iter()
                .map(|byte| format!("{byte:02X}"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Formats a byte group next to its annotation, one table row per `bytes_per_row` bytes.
pub(crate) fn byte_table_row(bytes: &[u8], text: &str, bytes_per_row: usize) -> String {
    let rows = hex_rows(bytes, bytes_per_row);
    let width = 3 * bytes_per_row - 1;
    match rows.split_first() {
        None => format!("{:<width$} | {text}", ""),
        Some((first, rest)) => {
            let mut out = format!("{first:<width$} | {text}");
            for row in rest {
                out.push_str(&format!("\n{row} |"));
            }
            out
        }
    }
}

fn pad(width: usize) -> String {
    " ".repeat(width)
}

fn title(node: &Node) -> String {
    match node.name() {
        Some(name) => format!("{name}({})", node.node_type()),
        None => node.node_type().to_string(),
    }
}

fn data_id_label(data_id: Option<DataId>) -> String {
    data_id.map_or_else(|| "-".to_owned(), |id| id.get().to_string())
}

fn header_line(node: &Node, indent: usize) -> String {
    format!(
        "{:>width$} | {}{}:",
        "",
        pad(indent),
        title(node),
        width = 3 * BYTES_PER_ROW - 1
    )
}

fn tag_line(wiretype: Wiretype, data_id: Option<DataId>, indent: usize) -> String {
    let tag = wire::generate_tag(wiretype, data_id);
    byte_table_row(
        &tag,
        &format!(
            "{}Tag (Wire Type: {}; Data ID: {})",
            pad(indent + INDENT_INCREMENT),
            wiretype.get(),
            data_id_label(data_id)
        ),
        BYTES_PER_ROW,
    )
}

fn length_line(
    lengthfield: &[u8],
    length: usize,
    lengthfield_len: usize,
    indent: usize,
    cwidth: usize,
) -> String {
    let note = if lengthfield_len == 0 {
        " omitted / fixed length type"
    } else {
        ""
    };
    byte_table_row(
        lengthfield,
        &format!(
            "{}{:<cwidth$}: {length} (length field: {lengthfield_len} byte(s){note})",
            pad(indent + INDENT_INCREMENT),
            "Length",
        ),
        BYTES_PER_ROW,
    )
}

fn value_line(bytes: &[u8], value: &Scalar, indent: usize, cwidth: usize) -> String {
    byte_table_row(
        bytes,
        &format!(
            "{}{:<cwidth$}: {value}",
            pad(indent + INDENT_INCREMENT),
            "Value",
        ),
        BYTES_PER_ROW,
    )
}

impl Node {
    /// Renders an annotated byte table of this node's serialization.
    ///
    /// The table shows the tag, length field and value byte groups with one annotation per
    /// group, recursing over children. `indent` shifts the annotations right, `cwidth` sets
    /// the annotation label column, and `hide_tag` suppresses the tag row, as used for
    /// untagged array elements.
    ///
    /// # Errors
    ///
    /// Returns an error if a length field cannot be serialized.
    pub fn print_details(&self, indent: usize, cwidth: usize, hide_tag: bool) -> Result<String> {
        let data_indent = indent + INDENT_INCREMENT;
        let value_indent = data_indent + INDENT_INCREMENT;
        let mut lines = vec![header_line(self, indent)];
        match self {
            Self::Scalar(node) => {
                if !hide_tag {
                    lines.push(tag_line(node.wiretype(), node.data_id(), indent));
                }
                lines.push(value_line(
                    &node.value().to_be_bytes(),
                    &node.value(),
                    indent,
                    cwidth,
                ));
            }
            Self::Array(node) => {
                if !hide_tag {
                    lines.push(tag_line(node.wiretype(), node.data_id(), indent));
                }
                lines.push(length_line(
                    &node.lengthfield()?,
                    node.length(),
                    node.lengthfield_len(),
                    indent,
                    cwidth,
                ));
                for item in node.items() {
                    lines.push(item.print_details(value_indent, cwidth, true)?);
                }
            }
            Self::String(node) => {
                if !hide_tag {
                    lines.push(tag_line(node.wiretype(), node.data_id(), indent));
                }
                lines.push(length_line(
                    &node.lengthfield()?,
                    node.length(),
                    node.lengthfield_len(),
                    indent,
                    cwidth,
                ));
                for item in node.items() {
                    let detail = item.print_details(value_indent, cwidth, true)?;
                    let annotation = code_unit_annotation(item);
                    lines.push(format!("{detail}{annotation}"));
                }
            }
            Self::Struct(node) => {
                if !hide_tag {
                    lines.push(tag_line(node.wiretype(), node.data_id(), indent));
                }
                lines.push(length_line(
                    &node.lengthfield()?,
                    node.length(),
                    node.lengthfield_len(),
                    indent,
                    cwidth,
                ));
                for item in node.items() {
                    lines.push(item.print_details(value_indent, cwidth, false)?);
                }
            }
            Self::Preserialized(node) => {
                lines.push(byte_table_row(
                    node.data(),
                    &format!("{}Data", pad(data_indent)),
                    BYTES_PER_ROW,
                ));
            }
        }
        Ok(lines.join("\n"))
    }

    fn pretty(&self, indent: usize, cwidth: usize) -> String {
        let data_indent = indent + INDENT_INCREMENT;
        let value_indent = data_indent + INDENT_INCREMENT;
        match self {
            Self::Scalar(node) => format!(
                "{}\n{}{:<cwidth$}: {}",
                self.pretty_header(indent, cwidth),
                pad(data_indent),
                "Value",
                node.value()
            ),
            Self::String(node) => format!(
                "{}\n{}{:<cwidth$}: {:?}",
                self.pretty_header(indent, cwidth),
                pad(data_indent),
                "Value",
                node.text()
            ),
            Self::Array(node) => {
                self.pretty_items(node.items(), ('[', ']'), indent, value_indent, cwidth)
            }
            Self::Struct(node) => {
                self.pretty_items(node.items(), ('{', '}'), indent, value_indent, cwidth)
            }
            Self::Preserialized(node) => {
                let mut out = format!(
                    "{}{}:\n{}{:<cwidth$}: {}",
                    pad(indent),
                    title(self),
                    pad(data_indent),
                    "Length",
                    node.length()
                );
                let rows = hex_rows(node.data(), BYTES_PER_ROW);
                match rows.split_first() {
                    None => out.push_str(&format!(
                        "\n{}{:<cwidth$}: []",
                        pad(data_indent),
                        "Value"
                    )),
                    Some((first, rest)) => {
                        out.push_str(&format!(
                            "\n{}{:<cwidth$}: {first}",
                            pad(data_indent),
                            "Value"
                        ));
                        for row in rest {
                            out.push_str(&format!(
                                "\n{}{:<cwidth$}  {row}",
                                pad(data_indent),
                                ""
                            ));
                        }
                    }
                }
                out
            }
        }
    }

    /// The common part of the pretty representation: title, wiretype, data ID and length.
    fn pretty_header(&self, indent: usize, cwidth: usize) -> String {
        let data_indent = indent + INDENT_INCREMENT;
        let wiretype = self
            .wiretype()
            .map_or_else(|| "-".to_owned(), |wt| wt.get().to_string());
        format!(
            "{}{}:\n{}{:<cwidth$}: {}\n{}{:<cwidth$}: {}\n{}{:<cwidth$}: {}",
            pad(indent),
            title(self),
            pad(data_indent),
            "Wire Type",
            wiretype,
            pad(data_indent),
            "Data ID",
            data_id_label(self.data_id()),
            pad(data_indent),
            "Length",
            self.length()
        )
    }

    fn pretty_items(
        &self,
        items: &[Node],
        brackets: (char, char),
        indent: usize,
        value_indent: usize,
        cwidth: usize,
    ) -> String {
        let data_indent = indent + INDENT_INCREMENT;
        let mut out = format!(
            "{}\n{}{:<cwidth$}: {}",
            self.pretty_header(indent, cwidth),
            pad(data_indent),
            "Value",
            brackets.0
        );
        for item in items {
            out.push('\n');
            out.push_str(&item.pretty(value_indent, cwidth));
        }
        out.push_str(&format!("\n{}{}", pad(data_indent), brackets.1));
        out
    }
}

fn code_unit_annotation(item: &Node) -> String {
    match item {
        Node::Scalar(unit) => match unit.value() {
            Scalar::Uint8(byte) => {
                format!(" ({}, {byte:#x})", char::from(byte).escape_debug())
            }
            _ => String::new(),
        },
        _ => String::new(),
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.pretty(0, DEFAULT_COLUMN_WIDTH))
    }
}
