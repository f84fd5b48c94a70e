//! Line-oriented console IO: prompt, read one line, trim, sentinel handling.
//!
//! Generic over reader and writer so the session tests can drive the whole
//! loop from a scripted byte buffer.

use std::io::{self, BufRead, Write};

/// The literal input that cancels a multi-step operation.
pub const CANCEL_SENTINEL: &str = "*";

/// Result of reading one line from the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
  /// A trimmed line. May be empty — an empty line is not end-of-input.
  Line(String),
  /// The input stream is exhausted.
  Eof,
}

/// Result of a prompt inside a cancellable flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
  Value(String),
  Cancelled,
  Eof,
}

pub struct Console<R, W> {
  reader: R,
  writer: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
  pub fn new(reader: R, writer: W) -> Self {
    Self { reader, writer }
  }

  /// Write one line of output.
  pub fn say(&mut self, msg: &str) -> io::Result<()> {
    writeln!(self.writer, "{msg}")
  }

  /// Read one line, trimmed of surrounding whitespace.
  pub fn read_line(&mut self) -> io::Result<Input> {
    let mut line = String::new();
    if self.reader.read_line(&mut line)? == 0 {
      return Ok(Input::Eof);
    }
    Ok(Input::Line(line.trim().to_string()))
  }

  /// Print `label` followed by `": "` and read one trimmed line.
  pub fn prompt(&mut self, label: &str) -> io::Result<Input> {
    write!(self.writer, "{label}: ")?;
    self.writer.flush()?;
    self.read_line()
  }

  /// Prompt where the `*` sentinel cancels the surrounding flow.
  pub fn prompt_cancellable(&mut self, label: &str) -> io::Result<Answer> {
    Ok(match self.prompt(label)? {
      Input::Eof => Answer::Eof,
      Input::Line(line) if line == CANCEL_SENTINEL => Answer::Cancelled,
      Input::Line(line) => Answer::Value(line),
    })
  }
}
