use super::types::{AnnotatedLine, AssertionMatch, FrameLine, RenderOptions};

const BRIGHT_RED: &str = "\x1b[91m";
const BRIGHT_GREEN: &str = "\x1b[92m";
const RESET: &str = "\x1b[0m";

/// Render a source location as `file:line`.
///
/// Without a line number the location is empty, even if the file is known.
/// A missing file with a known line renders as `:line`.
pub fn format_location(file_name: Option<&str>, line: Option<u32>) -> String {
    match line {
        Some(line) => format!("{}:{}", file_name.unwrap_or(""), line),
        None => String::new(),
    }
}

impl FrameLine {
    pub fn render(&self, opts: &RenderOptions) -> String {
        format!(
            "[{:<iw$}] {:<nw$} {:<lw$}",
            self.index,
            self.name,
            self.location,
            iw = opts.index_width,
            nw = opts.name_width,
            lw = opts.location_width,
        )
    }
}

impl AssertionMatch {
    pub fn render(&self, opts: &RenderOptions) -> String {
        let text = format!(" -> {} {} ({})", self.verb(), self.category, self.scope);
        if !opts.color {
            return text;
        }
        let color = if self.allowed { BRIGHT_GREEN } else { BRIGHT_RED };
        format!("{}{}{}", color, text, RESET)
    }
}

impl AnnotatedLine {
    pub fn render(&self, opts: &RenderOptions) -> String {
        match self {
            AnnotatedLine::Frame(frame) => frame.render(opts),
            AnnotatedLine::Assertion(assertion) => assertion.render(opts),
        }
    }
}

pub fn render_lines(lines: &[AnnotatedLine], opts: &RenderOptions) -> Vec<String> {
    lines.iter().map(|line| line.render(opts)).collect()
}
