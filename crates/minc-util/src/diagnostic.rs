//! Diagnostic rendering.
//!
//! All fatal errors are reported in the same two-line shape: the full source
//! line containing the offending byte, then a caret under the offending
//! column followed by the message:
//!
//! ```text
//! int main() { return x; }
//!                     ^ undefined variable
//! ```

/// Render a caret diagnostic for `offset` into `source`.
///
/// The offset is clamped to the source length, so a diagnostic at
/// end-of-input points one past the last character of the final line.
///
/// # Examples
///
/// ```
/// use minc_util::diagnostic::render_snippet;
///
/// let out = render_snippet("int x = $;", 8, "expected an expression");
/// assert_eq!(out, "int x = $;\n        ^ expected an expression");
/// ```
pub fn render_snippet(source: &str, offset: usize, message: &str) -> String {
    let offset = offset.min(source.len());

    let line_start = source[..offset]
        .rfind('\n')
        .map(|pos| pos + 1)
        .unwrap_or(0);
    let line_end = source[offset..]
        .find('\n')
        .map(|pos| offset + pos)
        .unwrap_or(source.len());

    let line = &source[line_start..line_end];
    let column = offset - line_start;

    let mut out = String::with_capacity(line.len() * 2 + message.len() + 8);
    out.push_str(line);
    out.push('\n');
    for _ in 0..column {
        out.push(' ');
    }
    out.push('^');
    out.push(' ');
    out.push_str(message);
    out
}
