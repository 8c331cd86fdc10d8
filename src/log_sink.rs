use chrono::{DateTime, Local};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
}

impl LogEntry {
    pub fn line(&self) -> String {
        format!("[{}] {}", self.timestamp.format(TIMESTAMP_FORMAT), self.message)
    }
}

// One entry is one rendered line: control chars are written as escapes.
fn single_line(message: &str) -> String {
    let mut out = String::with_capacity(message.len());
    for c in message.chars() {
        if c.is_control() {
            out.extend(c.escape_default());
        } else {
            out.push(c);
        }
    }
    out
}

/// Append-only operational log shown on the Logs tab.
///
/// The view is pinned to the newest entry: `scroll_back` lets the reader look
/// at older lines, but every append drops it back to zero.
#[derive(Debug, Default)]
pub struct LogSink {
    entries: Vec<LogEntry>,
    scroll_back: usize,
}

impl LogSink {
    pub fn append(&mut self, message: impl Into<String>) -> String {
        self.push(LogEntry {
            timestamp: Local::now(),
            message: message.into(),
        })
    }

    pub fn push(&mut self, mut entry: LogEntry) -> String {
        entry.message = single_line(&entry.message);
        let line = entry.line();
        self.entries.push(entry);
        self.scroll_back = 0;
        line
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Full log text, one line per entry, each terminated by a newline.
    pub fn rendered(&self) -> String {
        self.entries
            .iter()
            .map(|entry| entry.line() + "\n")
            .collect()
    }

    pub fn status_line(&self) -> Option<String> {
        self.entries.last().map(LogEntry::line)
    }

    pub fn scroll_up(&mut self, lines: usize) {
        let max = self.entries.len().saturating_sub(1);
        self.scroll_back = (self.scroll_back + lines).min(max);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_back = self.scroll_back.saturating_sub(lines);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_back = 0;
    }

    /// First visible line for a view `visible_height` rows tall.
    pub fn scroll_offset(&self, visible_height: usize) -> usize {
        self.entries
            .len()
            .saturating_sub(visible_height)
            .saturating_sub(self.scroll_back)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: u32, message: &str) -> LogEntry {
        LogEntry {
            timestamp: Local.with_ymd_and_hms(2024, 5, 1, 12, 0, secs).unwrap(),
            message: message.to_string(),
        }
    }

    #[test]
    fn rendered_is_newline_join_in_append_order() {
        let mut sink = LogSink::default();
        sink.push(at(1, "Started."));
        sink.push(at(2, "Task accepted."));

        assert_eq!(
            sink.rendered(),
            "[2024-05-01 12:00:01] Started.\n[2024-05-01 12:00:02] Task accepted.\n"
        );
    }

    #[test]
    fn append_returns_status_line() {
        let mut sink = LogSink::default();
        assert!(sink.status_line().is_none());

        let first = sink.append("one");
        let second = sink.append("two");
        assert!(first.ends_with("] one"));
        assert_eq!(sink.status_line(), Some(second.clone()));
        assert_eq!(sink.rendered(), format!("{first}\n{second}\n"));
    }

    #[test]
    fn control_chars_stay_on_one_line() {
        let mut sink = LogSink::default();
        let line = sink.push(at(3, "Task aborted: multi\nline\ttab"));

        assert_eq!(line, "[2024-05-01 12:00:03] Task aborted: multi\\nline\\ttab");
        assert_eq!(sink.status_line(), Some(line.clone()));
        assert_eq!(sink.rendered(), format!("{line}\n"));
        assert_eq!(sink.rendered().lines().count(), sink.entries().len());
    }

    #[test]
    fn last_entry_stays_visible() {
        let mut sink = LogSink::default();
        for n in 1..=50 {
            sink.append(format!("message {n}"));
            let height = 7;
            let offset = sink.scroll_offset(height);
            assert!(offset <= n - 1 && n - 1 < offset + height);
        }
        assert_eq!(sink.scroll_offset(7), 43);
        assert_eq!(sink.scroll_offset(100), 0);
    }

    #[test]
    fn append_snaps_back_to_bottom() {
        let mut sink = LogSink::default();
        for n in 0..20 {
            sink.append(format!("m{n}"));
        }
        sink.scroll_up(5);
        assert_eq!(sink.scroll_offset(10), 5);

        sink.append("new");
        assert_eq!(sink.scroll_offset(10), 11);
    }

    #[test]
    fn scrolling_is_bounded() {
        let mut sink = LogSink::default();
        sink.append("a");
        sink.append("b");
        sink.scroll_up(99);
        assert_eq!(sink.scroll_offset(1), 0);
        sink.scroll_down(99);
        assert_eq!(sink.scroll_offset(1), 1);
    }
}
