//! Machine-readable output
//!
//! stdout carries only channel responses (and decoded intents for `parse`).
//! Side-channel events such as notices go to stderr as NDJSON so scripts can
//! read either stream line by line.
//!
//! ```json
//! {"event":"notice","message":"대상 앱이 설치되어 있지 않습니다.","duration":"long","timestamp":1704700001000}
//! ```

use std::io::Write;

use bridge_core::prelude::*;
use bridge_host::{Notice, NoticeDuration};
use chrono::Utc;
use serde::Serialize;

/// Events written to stderr
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum OutputEvent {
    /// A transient notice the host would have shown
    Notice {
        message: String,
        duration: NoticeDuration,
        timestamp: i64,
    },

    /// A line on stdin could not be handled
    InputError {
        line: usize,
        message: String,
        timestamp: i64,
    },
}

impl OutputEvent {
    pub fn notice(notice: Notice) -> Self {
        Self::Notice {
            message: notice.message,
            duration: notice.duration,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn input_error(line: usize, message: impl Into<String>) -> Self {
        Self::InputError {
            line,
            message: message.into(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

/// Write one value as a JSON line and flush
pub fn write_json_line<W: Write, T: Serialize>(writer: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_event_shape() {
        let mut buf = Vec::new();
        write_json_line(&mut buf, &OutputEvent::notice(Notice::long("hi"))).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(value["event"], "notice");
        assert_eq!(value["message"], "hi");
        assert_eq!(value["duration"], "long");
        assert!(value["timestamp"].as_i64().unwrap() > 0);
    }

    #[test]
    fn test_input_error_event_shape() {
        let mut buf = Vec::new();
        write_json_line(&mut buf, &OutputEvent::input_error(3, "bad json")).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["event"], "input_error");
        assert_eq!(value["line"], 3);
    }
}
