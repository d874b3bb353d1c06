use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::model::WidgetId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestReason {
    Boot,
    Configured,
    NoData,
    Manual,
}

/// "A widget wants fresh data": the host application answers by pushing a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_id: Option<WidgetId>,
    pub reason: RequestReason,
    pub requested_at: String,
}

impl DataRequest {
    pub fn new(widget_id: Option<WidgetId>, reason: RequestReason) -> Self {
        Self {
            widget_id,
            reason,
            requested_at: now_ts(),
        }
    }
}

pub(crate) fn now_ts() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string())
}

pub trait DataRequestSink: Send + Sync {
    fn request_data(&self, req: DataRequest) -> Result<()>;
}

/// Appends requests as JSON lines for the host application to drain.
#[derive(Clone, Debug)]
pub struct RequestLog {
    path: PathBuf,
}

impl RequestLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn read_all(&self) -> Result<Vec<DataRequest>> {
        read_requests(&self.path)
    }

    /// Returns the pending requests and clears the log.
    ///
    /// The log is renamed aside before it is read; requests appended meanwhile
    /// start a fresh log.
    pub fn drain(&self) -> Result<Vec<DataRequest>> {
        let Some(claimed) = self.claim()? else {
            return Ok(Vec::new());
        };
        let reqs = read_requests(&claimed)?;
        fs::remove_file(&claimed).with_context(|| format!("remove {}", claimed.display()))?;
        Ok(reqs)
    }

    pub(crate) fn claim(&self) -> Result<Option<PathBuf>> {
        let seq = DRAIN_SEQ.fetch_add(1, Ordering::Relaxed);
        let claimed = self
            .path
            .with_extension(format!("draining.{}.{}", std::process::id(), seq));
        match fs::rename(&self.path, &claimed) {
            Ok(()) => Ok(Some(claimed)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| {
                format!("rename {} -> {}", self.path.display(), claimed.display())
            }),
        }
    }
}

static DRAIN_SEQ: AtomicU64 = AtomicU64::new(0);

pub(crate) fn read_requests(path: &Path) -> Result<Vec<DataRequest>> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => {
            return Err(err).with_context(|| format!("read {}", path.display()));
        }
    };
    let mut out = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let req: DataRequest = serde_json::from_str(line)
            .with_context(|| format!("parse data request on line {}", lineno + 1))?;
        out.push(req);
    }
    Ok(out)
}

impl DataRequestSink for RequestLog {
    fn request_data(&self, req: DataRequest) -> Result<()> {
        let mut line = serde_json::to_string(&req).context("serialize data request")?;
        line.push('\n');
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("open {}", self.path.display()))?;
        file.write_all(line.as_bytes())
            .with_context(|| format!("append to {}", self.path.display()))?;
        Ok(())
    }
}

/// Collects requests in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    requests: Mutex<Vec<DataRequest>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<DataRequest> {
        match self.requests.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(_) => Vec::new(),
        }
    }
}

impl DataRequestSink for MemorySink {
    fn request_data(&self, req: DataRequest) -> Result<()> {
        self.requests
            .lock()
            .map_err(|_| anyhow!("request sink lock poisoned"))?
            .push(req);
        Ok(())
    }
}
