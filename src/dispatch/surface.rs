use std::io::Write;

use crate::error::{Error, Result};

/// Where committed frames go.
///
/// A commit replaces whatever the surface showed before; there is no
/// partial update.
pub trait Surface {
    fn commit(&mut self, frame: &str) -> Result<()>;
}

/// Keeps every committed frame in memory.
#[derive(Debug, Default)]
pub struct MemorySurface {
    frames: Vec<String>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The frame currently on display.
    pub fn current(&self) -> Option<&str> {
        self.frames.last().map(String::as_str)
    }

    pub fn commits(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }
}

impl Surface for MemorySurface {
    fn commit(&mut self, frame: &str) -> Result<()> {
        self.frames.push(frame.to_string());
        Ok(())
    }
}

/// Writes each frame to an [`std::io::Write`] sink, optionally clearing an
/// ANSI terminal first.
pub struct WriterSurface<W: Write> {
    writer: W,
    clear: bool,
}

impl<W: Write> WriterSurface<W> {
    pub fn new(writer: W, clear: bool) -> Self {
        Self { writer, clear }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSurface<std::io::Stdout> {
    pub fn stdout(clear: bool) -> Self {
        Self::new(std::io::stdout(), clear)
    }
}

impl<W: Write> Surface for WriterSurface<W> {
    fn commit(&mut self, frame: &str) -> Result<()> {
        if self.clear {
            self.writer
                .write_all(b"\x1b[2J\x1b[H")
                .map_err(Error::Surface)?;
        }
        self.writer
            .write_all(frame.as_bytes())
            .and_then(|()| self.writer.flush())
            .map_err(Error::Surface)
    }
}
