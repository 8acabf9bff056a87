//! Line splitting on the platform separator.

/// Platform line separator used to split documents and rejoin them.
pub const LINE_SEPARATOR: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Split raw content into an ordered sequence of lines.
///
/// Keeps a trailing empty line when the content ends with a separator, so
/// rejoining with [`LINE_SEPARATOR`] reproduces the input. Any string is
/// valid input.
pub fn split_lines(content: &str) -> Vec<String> {
    content.split(LINE_SEPARATOR).map(str::to_owned).collect()
}
