//! Streamed stdin feeding
//!
//! When a run supplies stdin as a list of lines, each hook gets its own
//! [`StreamCursor`]. Every poll writes at most one line, so the work per poll
//! stays bounded no matter how long the input is.

use std::io::{self, Write};

/// Result of one feed poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    /// A line was written; poll again
    More,
    /// All lines have been written; close the pipe
    Done,
}

/// Per-hook position in the streamed input
#[derive(Debug)]
pub struct StreamCursor<'a> {
    lines: &'a [String],
    next: usize,
}

impl<'a> StreamCursor<'a> {
    /// Start a cursor at the first line
    #[must_use]
    pub fn new(lines: &'a [String]) -> Self {
        Self { lines, next: 0 }
    }

    /// Write the next line (plus a newline) to `pipe`
    pub fn poll<W: Write + ?Sized>(&mut self, pipe: &mut W) -> io::Result<Feed> {
        let Some(line) = self.lines.get(self.next) else {
            return Ok(Feed::Done);
        };
        pipe.write_all(line.as_bytes())?;
        pipe.write_all(b"\n")?;
        self.next += 1;
        Ok(Feed::More)
    }

    /// Number of lines written so far
    #[must_use]
    pub fn written(&self) -> usize {
        self.next
    }
}

/// Poll `cursor` until done, then close `pipe` by dropping it
///
/// A hook that exits without reading all of its input closes the read end;
/// the resulting broken pipe ends the feed quietly. Returns the number of
/// lines delivered.
pub fn drive<W: Write>(mut cursor: StreamCursor<'_>, mut pipe: W) -> io::Result<usize> {
    loop {
        match cursor.poll(&mut pipe) {
            Ok(Feed::More) => {}
            Ok(Feed::Done) => break,
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                tracing::debug!(written = cursor.written(), "Hook closed its stdin early");
                break;
            }
            Err(e) => return Err(e),
        }
    }
    pipe.flush().or_else(|e| {
        if e.kind() == io::ErrorKind::BrokenPipe {
            Ok(())
        } else {
            Err(e)
        }
    })?;
    Ok(cursor.written())
}
