use crate::host::FrameInfo;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize)]
pub struct DapMessage {
    pub seq: u64,
    #[serde(rename = "type")]
    pub msg_type: String,
    #[serde(flatten)]
    pub content: DapMessageContent,
}

// Untagged variants are tried in order; responses also carry `command`, so
// they must come before requests.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DapMessageContent {
    Response {
        request_seq: u64,
        success: bool,
        command: String,
        message: Option<String>,
        body: Option<Value>,
    },
    Event {
        event: String,
        body: Option<Value>,
    },
    Request {
        command: String,
        arguments: Option<Value>,
    },
}

/// Body of a `stackTrace` response.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackTraceBody {
    #[serde(default)]
    pub stack_frames: Vec<StackFrame>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_frames: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StackFrame {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(default)]
    pub line: i64,
    #[serde(default)]
    pub column: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

impl Source {
    /// `name` if the adapter sent one, otherwise the last component of `path`.
    /// Both `/` and `\` separate components, whatever the local platform.
    pub fn file_name(&self) -> Option<String> {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return Some(name.to_string());
        }
        self.path
            .as_deref()
            .and_then(|p| p.rsplit(['/', '\\']).next())
            .filter(|n| !n.is_empty())
            .map(str::to_string)
    }
}

impl StackFrame {
    /// DAP uses line 0 for "unknown".
    pub fn to_frame_info(&self, index: usize) -> FrameInfo {
        FrameInfo {
            index,
            signature: self.name.clone(),
            line: u32::try_from(self.line).ok().filter(|&l| l > 0),
            file_name: self.source.as_ref().and_then(Source::file_name),
        }
    }
}
