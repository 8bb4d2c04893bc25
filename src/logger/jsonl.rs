//! JSONL activity log: one self-contained JSON object per interaction event.
//!
//! Lines are assembled in memory and written with a single `write_all` so a
//! concurrent `tail -f` never sees a partial line.
//!
//! Four-level fallback chain:
//! 1. Primary file path
//! 2. Fallback path, when configured
//! 3. stderr with `[LM-JSONL]` prefix
//! 4. Silent discard (the dashboard never fails because of logging)

#![allow(missing_docs)]

use std::fs::{self, File, OpenOptions, rename};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::core::config::LoggingConfig;
use crate::core::errors::{LmError, Result};

/// Severity level for log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Interaction and lifecycle events recorded by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    SessionStart,
    SessionStop,
    ScenarioSelected,
    ThresholdChanged,
    ToggleChanged,
    TimeframeChanged,
    ViewModeChanged,
    ConfigLoaded,
    Error,
}

/// A single JSONL log entry. Only `ts`, `event` and `severity` are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// RFC 3339 UTC timestamp.
    pub ts: String,
    pub event: EventType,
    pub severity: Severity,
    /// Scenario active after the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    /// Scenario active before a navigation event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u8>,
    /// Number of dependencies flagged at `threshold`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flagged: Option<usize>,
    /// Toggle name, timeframe, or view mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setting: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// LM error code if something failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl LogEntry {
    /// Create a new entry stamped with the current UTC time.
    pub fn new(event: EventType, severity: Severity) -> Self {
        Self {
            ts: format_utc_now(),
            event,
            severity,
            scenario: None,
            previous: None,
            threshold: None,
            flagged: None,
            setting: None,
            enabled: None,
            config_hash: None,
            duration_ms: None,
            error_code: None,
            error_message: None,
            details: None,
        }
    }

    /// Info-level entry.
    pub fn info(event: EventType) -> Self {
        Self::new(event, Severity::Info)
    }

    #[must_use]
    pub fn with_scenario(mut self, scenario: impl Into<String>) -> Self {
        self.scenario = Some(scenario.into());
        self
    }

    #[must_use]
    pub fn with_previous(mut self, scenario: impl Into<String>) -> Self {
        self.previous = Some(scenario.into());
        self
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: u8, flagged: usize) -> Self {
        self.threshold = Some(threshold);
        self.flagged = Some(flagged);
        self
    }

    #[must_use]
    pub fn with_setting(mut self, setting: impl Into<String>, enabled: Option<bool>) -> Self {
        self.setting = Some(setting.into());
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}


// ──────────────────────── writer ────────────────────────

/// Where the writer is currently sending lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriterState {
    Primary,
    Fallback,
    Stderr,
    Discard,
}

impl WriterState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Fallback => "fallback",
            Self::Stderr => "stderr",
            Self::Discard => "discard",
        }
    }

    /// Next level down the chain.
    const fn degraded(self, has_fallback: bool) -> Self {
        match self {
            Self::Primary if has_fallback => Self::Fallback,
            Self::Primary | Self::Fallback => Self::Stderr,
            Self::Stderr | Self::Discard => Self::Discard,
        }
    }
}

/// Configuration for the JSONL writer.
#[derive(Debug, Clone)]
pub struct JsonlConfig {
    pub path: PathBuf,
    /// Tried when `path` cannot be opened or written.
    pub fallback_path: Option<PathBuf>,
    /// Rotate before a write would grow the file past this size.
    pub max_size_bytes: u64,
    /// Rotated generations kept (`activity.jsonl.1` … `.N`).
    pub max_rotated_files: u32,
    pub fsync_interval: Duration,
}

impl From<&LoggingConfig> for JsonlConfig {
    fn from(cfg: &LoggingConfig) -> Self {
        Self {
            path: cfg.jsonl_path.clone(),
            fallback_path: cfg.fallback_path.clone(),
            max_size_bytes: cfg.max_size_bytes,
            max_rotated_files: cfg.max_rotated_files.max(1),
            fsync_interval: Duration::from_secs(10),
        }
    }
}

/// Append-only JSONL writer with rotation and multi-level fallback.
pub struct JsonlWriter {
    config: JsonlConfig,
    file: Option<BufWriter<File>>,
    state: WriterState,
    bytes_written: u64,
    last_fsync: SystemTime,
}

impl JsonlWriter {
    /// Open the log, walking down the fallback chain until something works.
    pub fn open(config: JsonlConfig) -> Self {
        let mut w = Self {
            config,
            file: None,
            state: WriterState::Primary,
            bytes_written: 0,
            last_fsync: SystemTime::now(),
        };
        w.open_current();
        w
    }

    /// Write one entry as a single line.
    pub fn write_entry(&mut self, entry: &LogEntry) {
        match serde_json::to_string(entry) {
            Ok(json) => self.write_line(&format!("{json}\n")),
            Err(e) => {
                let _ = writeln!(io::stderr(), "[LM-JSONL] serialize error: {e}");
            }
        }
    }

    pub fn flush(&mut self) {
        if let Some(f) = self.file.as_mut() {
            let _ = f.flush();
        }
    }

    /// Flush and `fdatasync` the current file.
    pub fn fsync(&mut self) {
        if let Some(f) = self.file.as_mut() {
            let _ = f.flush();
            let _ = f.get_ref().sync_data();
        }
        self.last_fsync = SystemTime::now();
    }

    #[must_use]
    pub const fn state(&self) -> WriterState {
        self.state
    }

    /// Bytes in the current file, including what was there before opening.
    #[must_use]
    pub const fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Return to the primary path if it has become writable again.
    pub fn try_recover(&mut self) {
        if self.state == WriterState::Primary {
            return;
        }
        if let Ok((file, size)) = open_append(&self.config.path) {
            self.flush();
            self.file = Some(BufWriter::new(file));
            self.state = WriterState::Primary;
            self.bytes_written = size;
            let _ = writeln!(
                io::stderr(),
                "[LM-JSONL] recovered to primary path: {}",
                self.config.path.display()
            );
        }
    }

    // ──────────────────────── internals ────────────────────────

    fn current_path(&self) -> Option<&Path> {
        match self.state {
            WriterState::Primary => Some(&self.config.path),
            WriterState::Fallback => self.config.fallback_path.as_deref(),
            WriterState::Stderr | WriterState::Discard => None,
        }
    }

    /// Open the file for the current state, degrading until one opens.
    fn open_current(&mut self) {
        loop {
            let Some(path) = self.current_path().map(Path::to_path_buf) else {
                self.file = None;
                return;
            };
            match open_append(&path) {
                Ok((file, size)) => {
                    if self.state == WriterState::Fallback {
                        let _ = writeln!(
                            io::stderr(),
                            "[LM-JSONL] primary path failed, using fallback: {}",
                            path.display()
                        );
                    }
                    self.file = Some(BufWriter::new(file));
                    self.bytes_written = size;
                    return;
                }
                Err(_) => self.degrade(),
            }
        }
    }

    fn degrade(&mut self) {
        self.file = None;
        let next = self
            .state
            .degraded(self.config.fallback_path.is_some());
        if next == WriterState::Stderr {
            let _ = writeln!(io::stderr(), "[LM-JSONL] log files unwritable, using stderr");
        }
        self.state = next;
    }

    fn write_line(&mut self, line: &str) {
        let len = line.len() as u64;
        if self.file.is_some() && self.bytes_written + len > self.config.max_size_bytes {
            self.rotate();
        }

        loop {
            match self.state {
                WriterState::Primary | WriterState::Fallback => {
                    let Some(f) = self.file.as_mut() else {
                        self.degrade();
                        self.open_current();
                        continue;
                    };
                    if f.write_all(line.as_bytes()).is_ok() {
                        self.bytes_written += len;
                        self.maybe_fsync();
                        return;
                    }
                    self.degrade();
                    self.open_current();
                }
                WriterState::Stderr => {
                    if write!(io::stderr(), "[LM-JSONL] {line}").is_err() {
                        self.state = WriterState::Discard;
                    }
                    return;
                }
                WriterState::Discard => return,
            }
        }
    }

    fn maybe_fsync(&mut self) {
        let elapsed = SystemTime::now()
            .duration_since(self.last_fsync)
            .unwrap_or(Duration::ZERO);
        if elapsed >= self.config.fsync_interval {
            self.fsync();
        }
    }

    /// `.N-1 → .N`, …, `current → .1`, then reopen an empty current file.
    fn rotate(&mut self) {
        self.flush();
        self.file = None;
        let Some(base) = self.current_path().map(Path::to_path_buf) else {
            return;
        };
        let keep = self.config.max_rotated_files;
        let _ = fs::remove_file(rotated_name(&base, keep));
        for i in (1..keep).rev() {
            let _ = rename(rotated_name(&base, i), rotated_name(&base, i + 1));
        }
        let _ = rename(&base, rotated_name(&base, 1));
        self.open_current();
    }
}

impl Drop for JsonlWriter {
    fn drop(&mut self) {
        self.flush();
    }
}

// ──────────────────────── helpers ────────────────────────

/// Open or create `path` for appending, creating parent directories.
/// Returns the file and its current size.
fn open_append(path: &Path) -> Result<(File, u64)> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| LmError::io(parent, source))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LmError::io(path, source))?;
    let size = file.metadata().map(|m| m.len()).unwrap_or(0);
    Ok((file, size))
}

/// `activity.jsonl` → `activity.jsonl.3`.
fn rotated_name(base: &Path, index: u32) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(format!(".{index}"));
    PathBuf::from(name)
}

/// Current UTC time as RFC 3339 with millisecond precision.
fn format_utc_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(path: PathBuf) -> JsonlConfig {
        JsonlConfig {
            path,
            fallback_path: None,
            max_size_bytes: 1024 * 1024,
            max_rotated_files: 3,
            fsync_interval: Duration::from_secs(60),
        }
    }

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn entries_are_single_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("activity.jsonl");
        let mut writer = JsonlWriter::open(config(path.clone()));

        writer.write_entry(&LogEntry::info(EventType::SessionStart).with_scenario("overview"));
        writer.write_entry(
            &LogEntry::info(EventType::ScenarioSelected)
                .with_scenario("integration")
                .with_previous("overview"),
        );
        writer.flush();

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event"], "session_start");
        assert_eq!(lines[0]["severity"], "info");
        assert_eq!(lines[1]["scenario"], "integration");
        assert_eq!(lines[1]["previous"], "overview");
    }

    #[test]
    fn unset_fields_are_omitted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sparse.jsonl");
        let mut writer = JsonlWriter::open(config(path.clone()));
        writer.write_entry(&LogEntry::info(EventType::SessionStop));
        writer.flush();

        let line = fs::read_to_string(&path).unwrap();
        assert!(!line.contains("\"threshold\""));
        assert!(!line.contains("\"scenario\""));
        assert!(line.contains("\"ts\""));
    }

    #[test]
    fn threshold_entry_carries_flag_count() {
        let entry = LogEntry::info(EventType::ThresholdChanged).with_threshold(75, 2);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["threshold"], 75);
        assert_eq!(json["flagged"], 2);
    }

    #[test]
    fn rotation_keeps_bounded_generations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rot.jsonl");
        let mut cfg = config(path.clone());
        cfg.max_size_bytes = 100;
        cfg.max_rotated_files = 2;
        let mut writer = JsonlWriter::open(cfg);

        for _ in 0..10 {
            writer.write_entry(&LogEntry::info(EventType::ToggleChanged).with_setting("alerts", Some(false)));
        }
        writer.flush();

        assert!(path.exists());
        assert!(rotated_name(&path, 1).exists());
        assert!(rotated_name(&path, 2).exists());
        assert!(!rotated_name(&path, 3).exists());
    }

    #[test]
    fn fallback_when_primary_unwritable() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "file").unwrap();
        let fallback = dir.path().join("fallback.jsonl");
        let mut cfg = config(blocker.join("primary.jsonl"));
        cfg.fallback_path = Some(fallback.clone());
        let mut writer = JsonlWriter::open(cfg);

        assert_eq!(writer.state(), WriterState::Fallback);
        writer.write_entry(&LogEntry::info(EventType::ConfigLoaded));
        writer.flush();
        assert_eq!(read_lines(&fallback).len(), 1);
    }

    #[test]
    fn stderr_when_nothing_is_writable() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "file").unwrap();
        let writer = JsonlWriter::open(config(blocker.join("primary.jsonl")));
        assert_eq!(writer.state(), WriterState::Stderr);
        assert_eq!(writer.state().as_str(), "stderr");
    }

    #[test]
    fn reopening_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("append.jsonl");
        {
            let mut writer = JsonlWriter::open(config(path.clone()));
            writer.write_entry(&LogEntry::info(EventType::SessionStart));
        }
        let mut writer = JsonlWriter::open(config(path.clone()));
        assert!(writer.bytes_written() > 0);
        writer.write_entry(&LogEntry::info(EventType::SessionStop));
        writer.flush();
        assert_eq!(read_lines(&path).len(), 2);
    }
}
