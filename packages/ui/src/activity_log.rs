use crate::inactivity::Millis;

const MAX_ENTRIES: usize = 200;

#[derive(Clone, Debug, PartialEq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
}

/// User-visible log of what the client did this session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActivityLog {
    pub entries: Vec<LogEntry>,
    pub visible: bool,
}

impl ActivityLog {
    pub fn push(&mut self, now: Millis, level: LogLevel, message: impl Into<String>) {
        if self.entries.len() == MAX_ENTRIES {
            self.entries.remove(0);
        }
        self.entries.push(LogEntry {
            timestamp: clock_time(now),
            level,
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|e| e.level == LogLevel::Error)
    }
}

/// `HH:MM:SS` in the user's local time zone for a millisecond timestamp.
fn clock_time(now: Millis) -> String {
    i64::try_from(now)
        .ok()
        .and_then(chrono::DateTime::from_timestamp_millis)
        .map(|t| t.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_push_stamps_entries() {
        let mut log = ActivityLog::default();
        log.push(3_723_000, LogLevel::Info, "Loaded 2 clients");

        let entry = log.entries.last().unwrap();
        assert_eq!(entry.timestamp, local_clock(3_723_000));
        assert_eq!(entry.message, "Loaded 2 clients");
        assert!(!log.has_errors());

        log.push(0, LogLevel::Error, "Failed to load clients");
        assert!(log.has_errors());
    }

    fn local_clock(ms: i64) -> String {
        chrono::Local
            .timestamp_millis_opt(ms)
            .unwrap()
            .format("%H:%M:%S")
            .to_string()
    }

    #[test]
    fn test_timestamps_follow_local_offset() {
        let utc = chrono::DateTime::from_timestamp_millis(3_723_000).unwrap();
        let offset = chrono::Local
            .offset_from_utc_datetime(&utc.naive_utc())
            .local_minus_utc();
        let shifted = utc + chrono::Duration::seconds(i64::from(offset));

        assert_eq!(clock_time(3_723_000), shifted.format("%H:%M:%S").to_string());
        assert_eq!(clock_time(u64::MAX), "--:--:--");
    }

    #[test]
    fn test_log_is_bounded() {
        let mut log = ActivityLog::default();
        for i in 0..(MAX_ENTRIES + 5) {
            log.push(0, LogLevel::Info, format!("entry {i}"));
        }
        assert_eq!(log.entries.len(), MAX_ENTRIES);
        assert_eq!(log.entries[0].message, "entry 5");
    }
}
