//! Output destinations.
//!
//! # Responsibilities
//! - Resolve path-like strings into writable sinks
//! - Fan each encoded record out to every output sink
//! - Report write failures to the error sinks
//!
//! # Design Decisions
//! - `"stderr"` and `"stdout"` are reserved; everything else is a file
//!   opened in create+append mode
//! - A record is written with one `write_all` per sink under that sink's
//!   lock, so concurrent records never interleave

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::sync::Mutex;

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;

use crate::error::Error;
use crate::logger::encoder::timer;

pub const STDERR: &str = "stderr";
pub const STDOUT: &str = "stdout";

/// A single writable destination.
#[derive(Debug)]
pub enum Sink {
    Stderr,
    Stdout,
    File { path: String, file: Mutex<File> },
}

impl Sink {
    /// Open the sink named by `path`.
    pub fn open(path: &str) -> Result<Self, Error> {
        match path.trim() {
            "" => Err(Error::EmptyPath),
            STDERR => Ok(Sink::Stderr),
            STDOUT => Ok(Sink::Stdout),
            _ => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|source| Error::OpenSink {
                        path: path.to_string(),
                        source,
                    })?;
                Ok(Sink::File {
                    path: path.to_string(),
                    file: Mutex::new(file),
                })
            }
        }
    }

    /// The path this sink was opened from.
    pub fn path(&self) -> &str {
        match self {
            Sink::Stderr => STDERR,
            Sink::Stdout => STDOUT,
            Sink::File { path, .. } => path,
        }
    }

    fn write_record(&self, buf: &[u8]) -> io::Result<()> {
        match self {
            Sink::Stderr => io::stderr().lock().write_all(buf),
            Sink::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(buf)?;
                out.flush()
            }
            Sink::File { file, .. } => {
                let mut file = file.lock().unwrap_or_else(|e| e.into_inner());
                file.write_all(buf)
            }
        }
    }
}

/// Open every path, failing on the first one that cannot be opened.
pub fn open_all(paths: &[String]) -> Result<Vec<Sink>, Error> {
    paths.iter().map(|p| Sink::open(p)).collect()
}

/// The output and error-output sinks of one logger.
#[derive(Debug)]
pub struct Sinks {
    outputs: Vec<Sink>,
    error_outputs: Vec<Sink>,
}

impl Sinks {
    pub fn new(outputs: Vec<Sink>, error_outputs: Vec<Sink>) -> Self {
        Self {
            outputs,
            error_outputs,
        }
    }

    /// Write one encoded record to all outputs. Failures are reported to the
    /// error outputs and never returned.
    pub fn write_record(&self, buf: &[u8]) {
        for sink in &self.outputs {
            if let Err(e) = sink.write_record(buf) {
                self.report_write_error(sink.path(), &e);
            }
        }
    }

    fn report_write_error(&self, path: &str, err: &io::Error) {
        let mut now = String::new();
        let _ = timer().format_time(&mut Writer::new(&mut now));
        let line = format!("{now} write error: {path}: {err}\n");
        for sink in &self.error_outputs {
            let _ = sink.write_record(line.as_bytes());
        }
    }
}

/// Writer handed out to the `fmt` layer for each event.
pub struct SinkWriter<'a> {
    sinks: &'a Sinks,
}

impl Write for SinkWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sinks.write_record(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Sinks {
    type Writer = SinkWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SinkWriter { sinks: self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_tokens() {
        assert!(matches!(Sink::open("stderr").unwrap(), Sink::Stderr));
        assert!(matches!(Sink::open(" stdout ").unwrap(), Sink::Stdout));
    }

    #[test]
    fn test_empty_path_rejected() {
        assert!(matches!(Sink::open(""), Err(Error::EmptyPath)));
        assert!(matches!(Sink::open("  "), Err(Error::EmptyPath)));
    }

    #[test]
    fn test_unopenable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("app.log");
        let err = Sink::open(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, Error::OpenSink { .. }));
    }

    #[test]
    fn test_fan_out_to_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.log").to_string_lossy().into_owned();
        let b = dir.path().join("b.log").to_string_lossy().into_owned();
        let sinks = Sinks::new(open_all(&[a.clone(), b.clone()]).unwrap(), Vec::new());

        sinks.make_writer().write_all(b"{\"n\":1}\n").unwrap();
        sinks.make_writer().write_all(b"{\"n\":2}\n").unwrap();

        for path in [a, b] {
            let content = std::fs::read_to_string(path).unwrap();
            assert_eq!(content, "{\"n\":1}\n{\"n\":2}\n");
        }
    }

    #[test]
    fn test_write_failure_goes_to_error_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("readonly.log");
        std::fs::write(&out, "").unwrap();
        let errors = dir.path().join("errors.log").to_string_lossy().into_owned();

        // A handle opened for reading only rejects writes.
        let readonly = Sink::File {
            path: out.to_string_lossy().into_owned(),
            file: Mutex::new(File::open(&out).unwrap()),
        };
        let sinks = Sinks::new(vec![readonly], open_all(&[errors.clone()]).unwrap());

        sinks.make_writer().write_all(b"{}\n").unwrap();

        let reported = std::fs::read_to_string(&errors).unwrap();
        assert!(reported.contains("write error: "), "got {reported:?}");
        assert!(reported.contains("readonly.log"));
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "");
    }

    #[test]
    fn test_append_keeps_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        std::fs::write(&path, "old\n").unwrap();

        let sinks = Sinks::new(
            open_all(&[path.to_string_lossy().into_owned()]).unwrap(),
            Vec::new(),
        );
        sinks.write_record(b"new\n");

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "old\nnew\n");
    }
}
