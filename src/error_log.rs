use chrono::{DateTime, Local};
use std::fmt::Debug;
use std::io::Write;
use std::sync::Mutex;

/// Best-effort destination for lenient-mode line errors. Whatever a sink returns, the parse
/// outcome is never affected by it.
pub trait ErrorLogSink: Debug + Send + Sync {
    fn log(
        &self,
        timestamp: DateTime<Local>,
        line_number: usize,
        message: &str,
    ) -> std::io::Result<()>;
}

/// Writes one human readable line per error into any `Write`, e.g. a file opened in append mode.
#[derive(Debug)]
pub struct WriterErrorLog<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterErrorLog<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send + Debug> ErrorLogSink for WriterErrorLog<W> {
    fn log(
        &self,
        timestamp: DateTime<Local>,
        line_number: usize,
        message: &str,
    ) -> std::io::Result<()> {
        let mut w = self
            .writer
            .lock()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
        writeln!(
            w,
            "[{}] Line {}: {}",
            timestamp.to_rfc3339(),
            line_number,
            message
        )?;
        w.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_line_per_error() {
        let sink = WriterErrorLog::new(Vec::<u8>::new());
        sink.log(Local::now(), 3, "Empty line").unwrap();
        sink.log(Local::now(), 7, "boom").unwrap();

        let written = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(2, lines.len());
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("] Line 3: Empty line"));
        assert!(lines[1].ends_with("] Line 7: boom"));
    }
}
