//! Shared helpers for in-crate render tests.

use ratatui::buffer::Buffer;

/// Convert a ratatui buffer to a string representation for assertions.
///
/// Captures the visual output character by character, preserving layout.
/// Empty lines are dropped and trailing spaces trimmed.
pub(crate) fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    #[test]
    fn blank_rows_are_dropped() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 5, 3));
        buffer.set_string(0, 1, "ab", ratatui::style::Style::default());
        assert_eq!(buffer_to_string(&buffer), "ab");
    }
}
