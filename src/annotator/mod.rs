//! Stack annotation: turn a thread's frames into `bta` output lines.

mod assertion;
mod names;
mod render;
mod types;

pub use assertion::match_assertion;
pub use names::short_function_name;
pub use render::{format_location, render_lines};
pub use types::{AnnotatedLine, AssertionMatch, FrameLine, RenderOptions};

use crate::host::{FrameInfo, FrameSource};

/// Annotate every frame of `source`, innermost first.
pub fn annotate<S: FrameSource + ?Sized>(source: &S) -> Vec<AnnotatedLine> {
    annotate_frames(&source.frames())
}

/// Frames without a signature produce no lines. A frame whose raw signature
/// names an assertion scope is followed by an [`AnnotatedLine::Assertion`].
pub fn annotate_frames(frames: &[FrameInfo]) -> Vec<AnnotatedLine> {
    let mut lines = Vec::with_capacity(frames.len());

    for frame in frames {
        let signature = match frame.signature.as_deref() {
            Some(sig) if !sig.trim().is_empty() => sig,
            _ => {
                log::debug!("Skipping frame {} without a signature", frame.index);
                continue;
            }
        };

        lines.push(AnnotatedLine::Frame(FrameLine {
            index: frame.index,
            name: short_function_name(signature).to_string(),
            location: format_location(frame.file_name.as_deref(), frame.line),
        }));

        if let Some(assertion) = match_assertion(signature) {
            lines.push(AnnotatedLine::Assertion(assertion));
        }
    }

    lines
}
