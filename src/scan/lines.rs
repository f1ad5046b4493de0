use crate::types::metrics::LineCounts;

/// Comment syntax recognised by the line counter.
///
/// A block delimiter anywhere on a line toggles the "inside block" state; the
/// counter does not track which delimiter opened the block.
#[derive(Debug, Clone, Copy)]
pub struct CommentStyle {
    pub line_prefixes: &'static [&'static str],
    pub block_delimiters: &'static [&'static str],
}

impl Default for CommentStyle {
    fn default() -> Self {
        Self {
            line_prefixes: &["#", "//", "/*", "*", "\"\"\"", "'''"],
            block_delimiters: &["\"\"\"", "'''"],
        }
    }
}

impl CommentStyle {
    fn toggles_block(&self, stripped: &str) -> bool {
        self.block_delimiters
            .iter()
            .any(|delimiter| stripped.contains(delimiter))
    }

    fn is_line_comment(&self, line: &str) -> bool {
        let leading = line.trim_start();
        self.line_prefixes
            .iter()
            .any(|prefix| leading.starts_with(prefix))
    }
}

/// Classify every line of `content` as code, comment or blank.
///
/// Blank and comment are counted independently, so a blank line inside a
/// block comment counts as both and `code` is floored at zero.
pub fn count_lines(content: &str, style: &CommentStyle) -> LineCounts {
    let mut total = 0usize;
    let mut blank = 0usize;
    let mut comment = 0usize;
    let mut in_block = false;

    for line in content.lines() {
        total += 1;
        let stripped = line.trim();
        if stripped.is_empty() {
            blank += 1;
        }

        if style.toggles_block(stripped) {
            in_block = !in_block;
            comment += 1;
            continue;
        }
        if in_block || style.is_line_comment(line) {
            comment += 1;
        }
    }

    LineCounts {
        total,
        code: total.saturating_sub(blank + comment),
        comment,
        blank,
    }
}
