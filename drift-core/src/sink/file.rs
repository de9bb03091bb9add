use super::{stamp, LogSink};
use crate::core::SinkError;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Append-only file sink, optionally mirrored to stdout
///
/// Opening the file is the only fallible step; a failure there is fatal to
/// startup. Write errors afterwards are reported through `tracing` and never
/// reach the calling worker.
pub struct FileSink {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
    echo_stdout: bool,
}

impl FileSink {
    /// Open (or create) `path` in append mode
    pub fn open<P: AsRef<Path>>(path: P, echo_stdout: bool) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| SinkError::Open {
                path: path.clone(),
                source,
            })?;

        tracing::info!("Log sink opened at {:?}", path);

        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
            echo_stdout,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self.writer.lock();
        writeln!(writer, "{}", line)?;
        writer.flush()?;

        if self.echo_stdout {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            writeln!(out, "{}", line)?;
        }

        Ok(())
    }
}

impl LogSink for FileSink {
    fn log(&self, message: &str) {
        let line = stamp(message);
        if let Err(e) = self.write_line(&line) {
            tracing::error!("Failed to write to log sink {:?}: {}", self.path, e);
        }
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        if let Err(e) = self.writer.get_mut().flush() {
            tracing::error!("Failed to flush log sink {:?}: {}", self.path, e);
        }
    }
}
