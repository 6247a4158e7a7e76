//! Outbound message bridge to the host process.
//!
//! A save posts one JSON message per call:
//! `{"event":"polygonCreated","coordinates":[[lat,lng],...]}`.

use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, BridgeResult};
use crate::geo::LatLng;

/// Event name posted on save
pub const POLYGON_CREATED: &str = "polygonCreated";

/// Alert shown when a save can't reach the host
pub fn save_failed_alert(error: &BridgeError) -> String {
    format!("Could not save the shape: {error}")
}

/// Message posted to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostMessage {
    pub event: String,
    pub coordinates: Vec<LatLng>,
}

impl HostMessage {
    pub fn polygon_created(coordinates: &[LatLng]) -> Self {
        Self {
            event: POLYGON_CREATED.to_string(),
            coordinates: coordinates.to_vec(),
        }
    }

    pub fn to_json(&self) -> BridgeResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A host-provided message channel
pub trait HostChannel {
    /// Deliver one serialized message
    fn post_message(&mut self, payload: &str) -> BridgeResult<()>;

    /// Short label for the status bar
    fn describe(&self) -> String;
}

/// Appends one message per line to a file
#[derive(Debug, Clone)]
pub struct FileChannel {
    path: PathBuf,
}

impl FileChannel {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HostChannel for FileChannel {
    fn post_message(&mut self, payload: &str) -> BridgeResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{payload}")?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Keeps messages in a shared buffer.
///
/// The terminal binary uses it for `stdout` delivery: messages are printed
/// once the alternate screen is gone.
#[derive(Debug, Clone, Default)]
pub struct BufferedChannel {
    messages: Rc<RefCell<Vec<String>>>,
}

impl BufferedChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the posted messages
    pub fn messages(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.messages)
    }
}

impl HostChannel for BufferedChannel {
    fn post_message(&mut self, payload: &str) -> BridgeResult<()> {
        self.messages.borrow_mut().push(payload.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "stdout".to_string()
    }
}

/// Where saved coordinates go, as written in config or on the command line:
/// `none`, `stdout` or `file:<path>`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ChannelSpec {
    #[default]
    None,
    Stdout,
    File(PathBuf),
}

impl FromStr for ChannelSpec {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" => Ok(ChannelSpec::None),
            "stdout" => Ok(ChannelSpec::Stdout),
            other => match other.strip_prefix("file:") {
                Some(path) if !path.is_empty() => Ok(ChannelSpec::File(PathBuf::from(path))),
                _ => Err(BridgeError::InvalidChannel(other.to_string())),
            },
        }
    }
}

impl TryFrom<String> for ChannelSpec {
    type Error = BridgeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ChannelSpec> for String {
    fn from(spec: ChannelSpec) -> Self {
        spec.to_string()
    }
}

impl std::fmt::Display for ChannelSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelSpec::None => f.write_str("none"),
            ChannelSpec::Stdout => f.write_str("stdout"),
            ChannelSpec::File(path) => write!(f, "file:{}", path.display()),
        }
    }
}
