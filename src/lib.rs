pub mod annotator;
pub mod host;
pub mod interp;

pub use annotator::{annotate, annotate_frames, render_lines, AnnotatedLine, RenderOptions};
pub use host::{DebugHost, FrameInfo, FrameSource, HostError, SnapshotHost};
pub use interp::{init_module, CommandError, CommandInterpreter, CommandReturn};
