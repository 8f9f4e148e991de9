//! Debugger host abstraction.
//!
//! The annotator only needs a read-only view of a thread's frames
//! ([`FrameSource`]). Commands reach the selected thread through a
//! [`DebugHost`]. [`SnapshotHost`] is the binding over captured DAP data.

mod protocol;
mod snapshot;

pub use protocol::{DapMessage, DapMessageContent, Source, StackFrame, StackTraceBody};
pub use snapshot::{SnapshotHost, Thread};

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Read-only view of one stack frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInfo {
    /// Position in the stack, innermost frame is 0.
    pub index: usize,
    /// Display signature, e.g. `v8::internal::Heap::CollectGarbage(...)`.
    pub signature: Option<String>,
    pub line: Option<u32>,
    /// Base name of the source file.
    pub file_name: Option<String>,
}

impl FrameInfo {
    pub fn new(index: usize, signature: Option<&str>, line: Option<u32>, file_name: Option<&str>) -> Self {
        Self {
            index,
            signature: signature.map(str::to_string),
            line,
            file_name: file_name.map(str::to_string),
        }
    }
}

/// Anything that can list a bounded sequence of frames, innermost first.
pub trait FrameSource {
    fn frames(&self) -> Vec<FrameInfo>;
}

impl FrameSource for [FrameInfo] {
    fn frames(&self) -> Vec<FrameInfo> {
        self.to_vec()
    }
}

impl FrameSource for Vec<FrameInfo> {
    fn frames(&self) -> Vec<FrameInfo> {
        self.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadSummary {
    pub id: u64,
    pub name: Option<String>,
    pub frame_count: usize,
    pub selected: bool,
}

/// The parts of a debugger session that commands are allowed to touch.
pub trait DebugHost {
    fn threads(&self) -> Vec<ThreadSummary>;

    fn selected_thread(&self) -> Result<&dyn FrameSource, HostError>;

    fn select_thread(&mut self, id: u64) -> Result<(), HostError>;
}

#[derive(Error, Debug)]
pub enum HostError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid session JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported session format: {0}")]
    UnsupportedFormat(String),

    #[error("'{command}' request failed: {}", message.as_deref().unwrap_or("no message"))]
    FailedResponse {
        command: String,
        message: Option<String>,
    },

    #[error("expected a stackTrace response, got '{0}'")]
    UnexpectedCommand(String),

    #[error("no thread is selected")]
    NoSelectedThread,

    #[error("no thread with id {0}")]
    UnknownThread(u64),
}
