//! Display width of a source line.

/// Measures `line` in display columns, expanding each tab to the next stop.
///
/// Columns are counted in Unicode scalar values, so multi-byte characters
/// count once. A `tab_width` of 0 makes a tab one column wide.
#[must_use]
pub fn line_length(line: &str, tab_width: usize) -> usize {
    let mut extra = 0;
    let mut chars = 0;

    for (offset, ch) in line.chars().enumerate() {
        chars += 1;
        if ch != '\t' || tab_width == 0 {
            continue;
        }
        let column = offset + extra;
        let stop = tab_width - column % tab_width;
        extra += stop - 1;
    }

    chars + extra
}
