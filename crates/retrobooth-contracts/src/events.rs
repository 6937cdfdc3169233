//! Booth event log.
//!
//! Every session transition is appended to `events.jsonl` as one compact JSON object.
//! The writer owns the envelope (`type`, `booth_id`, `ts`, `epoch`, `phase`); callers
//! supply only the kind-specific fields.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, bail};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys stamped by the writer. Caller fields with these names are dropped.
const ENVELOPE_KEYS: [&str; 5] = ["type", "booth_id", "ts", "epoch", "phase"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    SessionStarted,
    PhaseChanged,
    StyleSwitched,
    RemixStarted,
    RemixApplied,
    RemixFailed,
    VideoStarted,
    VideoReady,
    VideoFailed,
    VideoReleased,
    StaleResultDiscarded,
    NormalizationFallback,
    SessionReset,
}

impl EventKind {
    pub const ALL: [EventKind; 13] = [
        Self::SessionStarted,
        Self::PhaseChanged,
        Self::StyleSwitched,
        Self::RemixStarted,
        Self::RemixApplied,
        Self::RemixFailed,
        Self::VideoStarted,
        Self::VideoReady,
        Self::VideoFailed,
        Self::VideoReleased,
        Self::StaleResultDiscarded,
        Self::NormalizationFallback,
        Self::SessionReset,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SessionStarted => "session_started",
            Self::PhaseChanged => "phase_changed",
            Self::StyleSwitched => "style_switched",
            Self::RemixStarted => "remix_started",
            Self::RemixApplied => "remix_applied",
            Self::RemixFailed => "remix_failed",
            Self::VideoStarted => "video_started",
            Self::VideoReady => "video_ready",
            Self::VideoFailed => "video_failed",
            Self::VideoReleased => "video_released",
            Self::StaleResultDiscarded => "stale_result_discarded",
            Self::NormalizationFallback => "normalization_fallback",
            Self::SessionReset => "session_reset",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the session stood when an event was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventStamp<'a> {
    pub epoch: u64,
    pub phase: &'a str,
}

/// One line of `events.jsonl`, read back.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggedEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub booth_id: String,
    pub ts: String,
    pub epoch: u64,
    pub phase: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Append-only writer shared by everything that logs for one booth process.
/// The file is opened on first write and kept open.
#[derive(Debug, Clone)]
pub struct EventWriter {
    log: Arc<EventLog>,
}

#[derive(Debug)]
struct EventLog {
    path: PathBuf,
    booth_id: String,
    file: Mutex<Option<File>>,
}

impl EventWriter {
    pub fn new(path: impl Into<PathBuf>, booth_id: impl Into<String>) -> Self {
        Self {
            log: Arc::new(EventLog {
                path: path.into(),
                booth_id: booth_id.into(),
                file: Mutex::new(None),
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.log.path
    }

    pub fn booth_id(&self) -> &str {
        &self.log.booth_id
    }

    /// Writes one event. `fields` must be a JSON object (or null for none).
    pub fn emit(
        &self,
        kind: EventKind,
        stamp: EventStamp<'_>,
        fields: Value,
    ) -> anyhow::Result<Value> {
        let fields = match fields {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => bail!("{kind} fields must be a JSON object, got {other}"),
        };

        let mut record = Map::new();
        record.insert("type".to_string(), Value::from(kind.as_str()));
        record.insert("booth_id".to_string(), Value::from(self.log.booth_id.as_str()));
        record.insert("ts".to_string(), Value::from(now_utc_iso()));
        record.insert("epoch".to_string(), Value::from(stamp.epoch));
        record.insert("phase".to_string(), Value::from(stamp.phase));
        for (key, value) in fields {
            if !ENVELOPE_KEYS.contains(&key.as_str()) {
                record.insert(key, value);
            }
        }

        let mut line = serde_json::to_string(&record)?;
        line.push('\n');
        self.append(&line)?;
        Ok(Value::Object(record))
    }

    fn append(&self, line: &str) -> anyhow::Result<()> {
        let mut slot = self
            .log
            .file
            .lock()
            .map_err(|_| anyhow!("event log lock poisoned"))?;
        if slot.is_none() {
            *slot = Some(open_log(&self.log.path)?);
        }
        let Some(file) = slot.as_mut() else {
            bail!("event log {} is not open", self.log.path.display());
        };
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

fn open_log(path: &Path) -> anyhow::Result<File> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Reads a log back in write order. Lines that are not booth events are skipped.
pub fn read_events(path: &Path) -> anyhow::Result<Vec<LoggedEvent>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(raw
        .lines()
        .filter_map(|line| serde_json::from_str::<LoggedEvent>(line).ok())
        .collect())
}

pub fn read_event_types(path: &Path) -> anyhow::Result<Vec<EventKind>> {
    Ok(read_events(path)?.into_iter().map(|event| event.kind).collect())
}

fn now_utc_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::DateTime;
    use serde_json::json;

    use super::*;

    fn stamp(epoch: u64, phase: &str) -> EventStamp<'_> {
        EventStamp { epoch, phase }
    }

    #[test]
    fn event_line_carries_envelope_and_fields() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("events.jsonl");
        let writer = EventWriter::new(&path, "booth-123");

        let emitted = writer.emit(
            EventKind::SessionStarted,
            stamp(3, "idle"),
            json!({ "style_id": "80s", "source_len": 12 }),
        )?;

        let content = fs::read_to_string(&path)?;
        let line = content.lines().next().unwrap_or("");
        let parsed: Value = serde_json::from_str(line)?;
        assert_eq!(parsed, emitted);
        assert_eq!(parsed["type"], "session_started");
        assert_eq!(parsed["booth_id"], "booth-123");
        assert_eq!(parsed["epoch"], 3);
        assert_eq!(parsed["phase"], "idle");
        assert_eq!(parsed["style_id"], "80s");
        DateTime::parse_from_rfc3339(parsed["ts"].as_str().unwrap_or(""))?;
        Ok(())
    }

    #[test]
    fn fields_cannot_rewrite_the_envelope() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let writer = EventWriter::new(temp.path().join("events.jsonl"), "booth-123");

        let emitted = writer.emit(
            EventKind::PhaseChanged,
            stamp(1, "processing"),
            json!({ "type": "forged", "epoch": 99, "phase": "result", "to": "processing" }),
        )?;

        assert_eq!(emitted["type"], "phase_changed");
        assert_eq!(emitted["epoch"], 1);
        assert_eq!(emitted["phase"], "processing");
        assert_eq!(emitted["to"], "processing");
        Ok(())
    }

    #[test]
    fn non_object_fields_are_rejected_without_writing() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("events.jsonl");
        let writer = EventWriter::new(&path, "booth-123");

        assert!(writer
            .emit(EventKind::RemixFailed, stamp(0, "result"), json!("oops"))
            .is_err());
        assert!(!path.exists());

        writer.emit(EventKind::SessionReset, stamp(0, "idle"), Value::Null)?;
        assert_eq!(read_event_types(&path)?, vec![EventKind::SessionReset]);
        Ok(())
    }

    #[test]
    fn clones_append_to_one_log_in_order() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("nested").join("events.jsonl");
        let writer = EventWriter::new(&path, "booth-123");
        let other = writer.clone();

        writer.emit(EventKind::VideoStarted, stamp(2, "result"), json!({ "prompt": "wave" }))?;
        other.emit(EventKind::VideoReady, stamp(2, "result"), json!({ "byte_len": 4 }))?;
        fs::OpenOptions::new()
            .append(true)
            .open(&path)?
            .write_all(b"{\"type\":\"not_a_booth_event\"}\nnot json\n")?;
        writer.emit(EventKind::SessionReset, stamp(3, "idle"), json!({}))?;

        let events = read_events(&path)?;
        let kinds: Vec<EventKind> = events.iter().map(|event| event.kind).collect();
        assert_eq!(
            kinds,
            vec![EventKind::VideoStarted, EventKind::VideoReady, EventKind::SessionReset]
        );
        assert_eq!(events[1].fields.get("byte_len"), Some(&json!(4)));
        assert_eq!(events[2].epoch, 3);
        assert_eq!(events[2].phase, "idle");
        assert!(events.iter().all(|event| event.booth_id == "booth-123"));
        Ok(())
    }

    #[test]
    fn kind_names_round_trip_through_serde() -> anyhow::Result<()> {
        for kind in EventKind::ALL {
            assert_eq!(serde_json::to_value(kind)?, json!(kind.as_str()));
            assert_eq!(serde_json::from_value::<EventKind>(json!(kind.as_str()))?, kind);
        }
        assert_eq!(EventKind::StaleResultDiscarded.to_string(), "stale_result_discarded");
        Ok(())
    }
}
