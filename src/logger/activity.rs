//! Typed activity events and the session log that records them.
//!
//! The dashboard is single-threaded, so the log owns its [`JsonlWriter`]
//! directly. A disabled log drops every event.

#![allow(missing_docs)]

use crate::assessment::behavior::Flag;
use crate::assessment::navigation::Scenario;
use crate::assessment::scale::ViewMode;
use crate::assessment::timeline::Timeframe;
use crate::core::config::LoggingConfig;
use crate::core::errors::LmError;
use crate::logger::jsonl::{EventType, JsonlConfig, JsonlWriter, LogEntry, Severity, WriterState};

/// Events the dashboard records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityEvent {
    SessionStarted {
        version: String,
        scenario: Scenario,
        config_hash: String,
    },
    SessionStopped {
        scenario: Scenario,
        duration_ms: u64,
    },
    ScenarioSelected {
        from: Scenario,
        to: Scenario,
    },
    ThresholdChanged {
        threshold: u8,
        flagged: usize,
    },
    ToggleChanged {
        flag: Flag,
        enabled: bool,
    },
    TimeframeChanged {
        timeframe: Timeframe,
    },
    ViewModeChanged {
        mode: ViewMode,
    },
    ConfigLoaded {
        path: String,
        config_hash: String,
    },
    Error {
        code: String,
        message: String,
    },
}

impl ActivityEvent {
    /// Error event for an [`LmError`].
    #[must_use]
    pub fn from_error(err: &LmError) -> Self {
        Self::Error {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }

    /// Flatten into a log line.
    #[must_use]
    pub fn to_entry(&self) -> LogEntry {
        match self {
            Self::SessionStarted {
                version,
                scenario,
                config_hash,
            } => LogEntry {
                config_hash: Some(config_hash.clone()),
                ..LogEntry::info(EventType::SessionStart)
                    .with_scenario(scenario.id())
                    .with_details(format!("version={version}"))
            },
            Self::SessionStopped {
                scenario,
                duration_ms,
            } => LogEntry {
                duration_ms: Some(*duration_ms),
                ..LogEntry::info(EventType::SessionStop).with_scenario(scenario.id())
            },
            Self::ScenarioSelected { from, to } => LogEntry::info(EventType::ScenarioSelected)
                .with_scenario(to.id())
                .with_previous(from.id()),
            Self::ThresholdChanged { threshold, flagged } => {
                LogEntry::info(EventType::ThresholdChanged)
                    .with_scenario(Scenario::Integration.id())
                    .with_threshold(*threshold, *flagged)
            }
            Self::ToggleChanged { flag, enabled } => LogEntry::info(EventType::ToggleChanged)
                .with_scenario(Scenario::Behavior.id())
                .with_setting(flag.label(), Some(*enabled)),
            Self::TimeframeChanged { timeframe } => LogEntry::info(EventType::TimeframeChanged)
                .with_scenario(Scenario::Time.id())
                .with_setting(timeframe.label(), None),
            Self::ViewModeChanged { mode } => LogEntry::info(EventType::ViewModeChanged)
                .with_scenario(Scenario::Scale.id())
                .with_setting(mode.label(), None),
            Self::ConfigLoaded { path, config_hash } => LogEntry {
                config_hash: Some(config_hash.clone()),
                ..LogEntry::info(EventType::ConfigLoaded).with_details(path.clone())
            },
            Self::Error { code, message } => LogEntry {
                error_code: Some(code.clone()),
                error_message: Some(message.clone()),
                ..LogEntry::new(EventType::Error, Severity::Error)
            },
        }
    }
}

/// Session activity log.
pub struct ActivityLog {
    writer: Option<JsonlWriter>,
    recorded: u64,
}

impl ActivityLog {
    /// Open according to config; a disabled config yields a no-op log.
    #[must_use]
    pub fn from_config(cfg: &LoggingConfig) -> Self {
        if cfg.enabled {
            Self::open(JsonlConfig::from(cfg))
        } else {
            Self::disabled()
        }
    }

    #[must_use]
    pub fn open(config: JsonlConfig) -> Self {
        Self {
            writer: Some(JsonlWriter::open(config)),
            recorded: 0,
        }
    }

    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            writer: None,
            recorded: 0,
        }
    }

    pub fn record(&mut self, event: &ActivityEvent) {
        if let Some(w) = self.writer.as_mut() {
            w.write_entry(&event.to_entry());
            self.recorded += 1;
        }
    }

    pub fn flush(&mut self) {
        if let Some(w) = self.writer.as_mut() {
            w.flush();
        }
    }

    /// Events handed to the writer this session.
    #[must_use]
    pub const fn recorded(&self) -> u64 {
        self.recorded
    }

    /// `None` when logging is disabled.
    #[must_use]
    pub fn state(&self) -> Option<WriterState> {
        self.writer.as_ref().map(JsonlWriter::state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn disabled_log_records_nothing() {
        let mut log = ActivityLog::from_config(&LoggingConfig {
            enabled: false,
            ..LoggingConfig::default()
        });
        log.record(&ActivityEvent::ScenarioSelected {
            from: Scenario::Overview,
            to: Scenario::Time,
        });
        assert_eq!(log.recorded(), 0);
        assert!(log.state().is_none());
    }

    #[test]
    fn enabled_log_writes_typed_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("activity.jsonl");
        let mut log = ActivityLog::from_config(&LoggingConfig {
            jsonl_path: path.clone(),
            ..LoggingConfig::default()
        });
        log.record(&ActivityEvent::ToggleChanged {
            flag: Flag::AutoDetect,
            enabled: false,
        });
        log.record(&ActivityEvent::ThresholdChanged {
            threshold: 65,
            flagged: 4,
        });
        log.flush();

        let raw = fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = raw
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event"], "toggle_changed");
        assert_eq!(lines[0]["setting"], "Auto-detect");
        assert_eq!(lines[0]["enabled"], false);
        assert_eq!(lines[1]["flagged"], 4);
        assert_eq!(log.recorded(), 2);
    }

    #[test]
    fn error_event_maps_code() {
        let event = ActivityEvent::from_error(&LmError::InvalidConfig {
            details: "bad".to_string(),
        });
        let entry = event.to_entry();
        assert_eq!(entry.event, EventType::Error);
        assert_eq!(entry.error_code.as_deref(), Some("LM-1001"));
    }

    #[test]
    fn session_start_carries_hash_and_scenario() {
        let entry = ActivityEvent::SessionStarted {
            version: "0.1.0".to_string(),
            scenario: Scenario::Scale,
            config_hash: "abc".to_string(),
        }
        .to_entry();
        assert_eq!(entry.scenario.as_deref(), Some("scale"));
        assert_eq!(entry.config_hash.as_deref(), Some("abc"));
    }
}
