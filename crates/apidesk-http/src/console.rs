use chrono::{DateTime, Local};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Timestamped request log shown alongside the result.
///
/// Every line is mirrored to the `log` facade at info level.
#[derive(Debug, Default)]
pub struct Console {
    lines: Vec<String>,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&mut self, message: impl AsRef<str>) {
        self.write_at(Local::now(), message.as_ref());
    }

    fn write_at(&mut self, at: DateTime<Local>, message: &str) {
        let line = format!("{} {}", at.format(TIMESTAMP_FORMAT), message);
        log::info!("{line}");
        self.lines.push(line);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Drain the buffered lines, oldest first.
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}
