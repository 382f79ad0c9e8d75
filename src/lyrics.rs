//! Parsing of line-timed `.lrc` lyric files.
//!
//! Each record looks like `[<minutes>:<seconds.fraction>]<text>`. Anything else
//! (metadata tags, blank lines, prose) is skipped without complaint.

use std::{
  fs::File,
  io::{BufRead, BufReader},
  path::Path,
  time::Duration,
};

use lazy_static::lazy_static;
use regex::bytes::Regex;

use crate::error::LyricsError;

lazy_static! {
  static ref TIMESTAMP: Regex = Regex::new(r"^\[([0-9]+):([0-9]+\.[0-9]+)\]").unwrap();
}

/// One timestamped record from a lyric file.
#[derive(Debug, Clone, PartialEq)]
pub struct LyricLine {
  timestamp: Duration,
  text: Vec<u8>,
}

impl LyricLine {
  /// Offset from the start of the track.
  pub fn timestamp(&self) -> Duration {
    self.timestamp
  }

  /// The raw bytes following the timestamp token, untrimmed.
  pub fn text(&self) -> &[u8] {
    &self.text
  }
}

/// Parses a single line, without its line terminator.
///
/// Returns `Ok(None)` for lines that aren't lyric records. A line that matches the
/// timestamp pattern but whose numbers can't be represented is an error.
pub fn parse_line(line: &[u8]) -> Result<Option<LyricLine>, LyricsError> {
  if !line.starts_with(b"[") {
    return Ok(None);
  }
  let caps = match TIMESTAMP.captures(line) {
    Some(caps) => caps,
    None => return Ok(None),
  };

  // the pattern only admits ASCII digits and '.', so these are always valid UTF-8
  let minutes_str = String::from_utf8_lossy(&caps[1]);
  let seconds_str = String::from_utf8_lossy(&caps[2]);

  let minutes: i64 = minutes_str.parse().map_err(|source| LyricsError::Minutes {
    raw: minutes_str.to_string(),
    source,
  })?;
  let out_of_range = || LyricsError::Timestamp {
    raw: format!("{}:{}", minutes_str, seconds_str),
  };
  let seconds: f64 = seconds_str.parse().map_err(|_| out_of_range())?;

  let total = minutes as f64 * 60.0 + seconds;
  let timestamp = Duration::try_from_secs_f64(total).map_err(|_| out_of_range())?;

  Ok(Some(LyricLine {
    timestamp,
    text: line[caps[0].len()..].to_vec(),
  }))
}

/// Lazily yields the lyric records of a reader, in file order.
pub struct LyricLines<R> {
  reader: R,
  buf: Vec<u8>,
}

impl<R: BufRead> LyricLines<R> {
  pub fn new(reader: R) -> Self {
    LyricLines {
      reader,
      buf: Vec::new(),
    }
  }

  /// Reads the next raw line into `buf`, stripping `\n` and one trailing `\r`,
  /// even on an unterminated last line. Returns `false` at end of input.
  fn read_record(&mut self) -> std::io::Result<bool> {
    self.buf.clear();
    if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
      return Ok(false);
    }
    if self.buf.last() == Some(&b'\n') {
      self.buf.pop();
    }
    if self.buf.last() == Some(&b'\r') {
      self.buf.pop();
    }
    Ok(true)
  }
}

impl<R: BufRead> Iterator for LyricLines<R> {
  type Item = Result<LyricLine, LyricsError>;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      match self.read_record() {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => return Some(Err(LyricsError::Scan(e))),
      }
      match parse_line(&self.buf) {
        Ok(Some(line)) => return Some(Ok(line)),
        Ok(None) => {
          tracing::trace!(line = %String::from_utf8_lossy(&self.buf), "skipping non-lyric line");
          continue;
        }
        Err(e) => return Some(Err(e)),
      }
    }
  }
}

/// Opens a lyric file for lazy, line-by-line reading.
pub fn open<P: AsRef<Path>>(path: P) -> Result<LyricLines<BufReader<File>>, LyricsError> {
  let path = path.as_ref();
  let file = File::open(path).map_err(|source| LyricsError::Open {
    path: path.to_path_buf(),
    source,
  })?;
  tracing::info!(path = %path.display(), "opened lyrics file");
  Ok(LyricLines::new(BufReader::new(file)))
}
