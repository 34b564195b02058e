//! LSP-side conversions: settings payloads, positions, and document spans.
//!
//! LSP positions count UTF-16 code units per line, while the formatter
//! takes byte offsets into the UTF-8 document. The conversion here walks
//! the actual text, so multi-byte characters contribute their encoded byte
//! length rather than their character count.

use tower_lsp::lsp_types::{Position, Range};

use crate::config::Settings;

/// Extract [`Settings`] from an LSP settings payload.
///
/// Clients send either the bare section or an object with the `stylua`
/// section nested inside; both shapes are accepted.
pub fn settings_from_value(value: serde_json::Value) -> Option<Settings> {
    let section = match value.get("stylua") {
        Some(section) => section.clone(),
        None => value,
    };
    match serde_json::from_value(section) {
        Ok(settings) => Some(settings),
        Err(e) => {
            log::warn!("ignoring malformed stylua settings: {e}");
            None
        }
    }
}

/// Byte offset of an LSP position within `text`.
///
/// Positions beyond the end of a line clamp to the end of that line, and
/// lines beyond the end of the document clamp to the document end.
pub fn position_to_byte_offset(text: &str, position: Position) -> usize {
    let mut offset = 0usize;
    let mut remaining_lines = position.line;
    while remaining_lines > 0 {
        match text[offset..].find('\n') {
            Some(newline) => {
                offset += newline + 1;
                remaining_lines -= 1;
            }
            None => return text.len(),
        }
    }

    let rest = &text[offset..];
    let line = match rest.find('\n') {
        Some(newline) => &rest[..newline],
        None => rest,
    };

    let mut utf16_units = 0u32;
    for ch in line.chars() {
        if utf16_units >= position.character {
            break;
        }
        utf16_units += ch.len_utf16() as u32;
        offset += ch.len_utf8();
    }
    offset
}

/// The span covering an entire document: line 0 column 0 through the end
/// of the last line.
pub fn full_document_range(text: &str) -> Range {
    let mut line_count: u32 = 0;
    let mut last_line = text;
    for line in text.split('\n') {
        line_count += 1;
        last_line = line;
    }
    let end_character = last_line.encode_utf16().count() as u32;
    Range {
        start: Position::new(0, 0),
        end: Position::new(line_count.saturating_sub(1), end_character),
    }
}
