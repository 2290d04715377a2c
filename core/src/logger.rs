use chrono::{Local, Utc};
use serde_json::json;

/// Structured JSONL logger. Info lines go to stdout, errors to stderr,
/// so logs stay machine-parseable per stream.
#[derive(Clone, Debug)]
pub struct Logger {
    rid: u64,
}

impl Logger {
    /// Creates a new `Logger`.
    ///
    /// # Panics
    ///
    /// Panics if `rid` is zero.
    #[must_use]
    pub fn new(rid: u64) -> Self {
        assert!(rid > 0, "Logger rid must be non-zero");
        Self { rid }
    }

    pub fn info(&self, subsystem: &str, action: &str, message: &str) {
        self.emit("info", subsystem, action, message);
    }

    pub fn error(&self, subsystem: &str, action: &str, message: &str) {
        self.emit("error", subsystem, action, message);
    }

    fn emit(&self, level: &str, subsystem: &str, action: &str, message: &str) {
        let log_entry = json!({
            "ts": Utc::now().to_rfc3339(),
            "level": level,
            "rid": self.rid,
            "subsystem": subsystem,
            "action": action,
            "msg": message,
        });

        if level == "error" {
            eprintln!("{log_entry}");
        } else {
            println!("{log_entry}");
        }
    }
}

/// A per-invocation rid: launch time xor pid, clamped away from zero.
#[must_use]
pub fn session_rid() -> u64 {
    let rid = (Local::now().timestamp_millis() as u64) ^ u64::from(std::process::id());
    rid.max(1)
}
