use super::protocol::{DapMessage, DapMessageContent, StackFrame, StackTraceBody};
use super::{DebugHost, FrameInfo, FrameSource, HostError, ThreadSummary};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Thread id given to the only thread of a bare `stackTrace` response.
const DEFAULT_THREAD_ID: u64 = 1;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionSnapshot {
    #[serde(default)]
    selected_thread: Option<u64>,
    threads: Vec<ThreadSnapshot>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreadSnapshot {
    id: u64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    stack_frames: Vec<StackFrame>,
}

/// A captured thread and its frames, innermost first.
#[derive(Debug, Clone)]
pub struct Thread {
    pub id: u64,
    pub name: Option<String>,
    frames: Vec<FrameInfo>,
}

impl Thread {
    pub fn new(id: u64, name: Option<String>, frames: Vec<FrameInfo>) -> Self {
        Self { id, name, frames }
    }

    fn from_stack_frames(id: u64, name: Option<String>, stack_frames: &[StackFrame]) -> Self {
        let frames = stack_frames
            .iter()
            .enumerate()
            .map(|(index, frame)| frame.to_frame_info(index))
            .collect();
        Self::new(id, name, frames)
    }
}

impl FrameSource for Thread {
    fn frames(&self) -> Vec<FrameInfo> {
        self.frames.clone()
    }
}

/// Debugger host backed by a JSON capture of a DAP session.
#[derive(Debug, Clone, Default)]
pub struct SnapshotHost {
    threads: Vec<Thread>,
    selected: Option<u64>,
}

impl SnapshotHost {
    /// Build a host from threads. Without an explicit selection the first
    /// thread is selected.
    pub fn new(threads: Vec<Thread>, selected: Option<u64>) -> Result<Self, HostError> {
        let selected = match selected {
            Some(id) if !threads.iter().any(|t| t.id == id) => {
                return Err(HostError::UnknownThread(id));
            }
            Some(id) => Some(id),
            None => threads.first().map(|t| t.id),
        };
        Ok(Self { threads, selected })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, HostError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| HostError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let host = Self::from_json_str(&contents)?;
        log::info!(
            "Loaded {} thread(s) from {}",
            host.threads.len(),
            path.display()
        );
        Ok(host)
    }

    /// Accepts either a session snapshot (`{"threads": [...]}`) or a raw DAP
    /// `stackTrace` response message.
    pub fn from_json_str(contents: &str) -> Result<Self, HostError> {
        let value: Value = serde_json::from_str(contents)?;

        if value.get("threads").is_some() {
            let snapshot: SessionSnapshot = serde_json::from_value(value)?;
            let threads = snapshot
                .threads
                .iter()
                .map(|t| Thread::from_stack_frames(t.id, t.name.clone(), &t.stack_frames))
                .collect();
            return Self::new(threads, snapshot.selected_thread);
        }

        if value.get("type").and_then(Value::as_str) == Some("response") {
            let msg: DapMessage = serde_json::from_value(value)?;
            return Self::from_dap_message(msg);
        }

        Err(HostError::UnsupportedFormat(
            "expected a session snapshot or a DAP stackTrace response".to_string(),
        ))
    }

    fn from_dap_message(msg: DapMessage) -> Result<Self, HostError> {
        match msg.content {
            DapMessageContent::Response {
                success,
                command,
                message,
                body,
                ..
            } => {
                if !success {
                    return Err(HostError::FailedResponse { command, message });
                }
                if command != "stackTrace" {
                    return Err(HostError::UnexpectedCommand(command));
                }
                let body: StackTraceBody = match body {
                    Some(body) => serde_json::from_value(body)?,
                    None => StackTraceBody::default(),
                };
                let thread =
                    Thread::from_stack_frames(DEFAULT_THREAD_ID, None, &body.stack_frames);
                Self::new(vec![thread], Some(DEFAULT_THREAD_ID))
            }
            _ => Err(HostError::UnsupportedFormat(format!(
                "message seq {} is not a response",
                msg.seq
            ))),
        }
    }

    pub fn selected_id(&self) -> Option<u64> {
        self.selected
    }
}

impl DebugHost for SnapshotHost {
    fn threads(&self) -> Vec<ThreadSummary> {
        self.threads
            .iter()
            .map(|t| ThreadSummary {
                id: t.id,
                name: t.name.clone(),
                frame_count: t.frames.len(),
                selected: self.selected == Some(t.id),
            })
            .collect()
    }

    fn selected_thread(&self) -> Result<&dyn FrameSource, HostError> {
        let id = self.selected.ok_or(HostError::NoSelectedThread)?;
        self.threads
            .iter()
            .find(|t| t.id == id)
            .map(|t| t as &dyn FrameSource)
            .ok_or(HostError::UnknownThread(id))
    }

    fn select_thread(&mut self, id: u64) -> Result<(), HostError> {
        if !self.threads.iter().any(|t| t.id == id) {
            return Err(HostError::UnknownThread(id));
        }
        log::debug!("Selected thread {}", id);
        self.selected = Some(id);
        Ok(())
    }
}
