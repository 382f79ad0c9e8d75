//! Real-time pacing of lyric lines.

use std::{
  io::Write,
  thread,
  time::{Duration, Instant},
};

use crate::{error::LyricsError, lyrics::LyricLine};

/// Turns track timestamps into wall-clock waits.
///
/// The anchor is taken the first time a wait is requested and never moves afterwards,
/// so a late emission shortens the waits that follow it.
#[derive(Debug, Default)]
pub struct PacerClock {
  start: Option<Instant>,
  offset: Duration,
}

impl PacerClock {
  pub fn new(offset: Duration) -> Self {
    PacerClock {
      start: None,
      offset,
    }
  }

  /// The anchor instant, if any line has been paced yet.
  pub fn start(&self) -> Option<Instant> {
    self.start
  }

  /// How long to wait, from now, until `timestamp` is due. Never negative.
  pub fn wait_for(&mut self, timestamp: Duration) -> Duration {
    let start = *self.start.get_or_insert_with(|| {
      tracing::debug!("anchoring lyric clock");
      Instant::now()
    });
    timestamp
      .saturating_add(self.offset)
      .saturating_sub(start.elapsed())
  }
}

/// Prints lyric lines to `out`, each at its timestamp.
pub struct Pacer<W> {
  clock: PacerClock,
  out: W,
}

impl<W: Write> Pacer<W> {
  pub fn new(out: W) -> Self {
    Pacer {
      clock: PacerClock::default(),
      out,
    }
  }

  /// Delays every line by a fixed amount on top of its timestamp.
  pub fn with_offset(mut self, offset: Duration) -> Self {
    self.clock = PacerClock::new(offset);
    self
  }

  pub fn clock(&self) -> &PacerClock {
    &self.clock
  }

  pub fn into_inner(self) -> W {
    self.out
  }

  /// Emits a single line once it is due.
  pub fn emit(&mut self, line: &LyricLine) -> Result<(), LyricsError> {
    let wait = self.clock.wait_for(line.timestamp());
    if !wait.is_zero() {
      thread::sleep(wait);
    }
    self.out.write_all(line.text()).map_err(LyricsError::Emit)?;
    self.out.write_all(b"\n").map_err(LyricsError::Emit)?;
    self.out.flush().map_err(LyricsError::Emit)?;

    if let Some(start) = self.clock.start() {
      let late = start.elapsed().saturating_sub(line.timestamp());
      tracing::debug!(
        timestamp = ?line.timestamp(),
        waited = ?wait,
        late = ?late,
        "emitted lyric"
      );
    }
    Ok(())
  }

  /// Paces every line from `lines` until the input runs out.
  /// Returns how many lines were emitted.
  pub fn run<I>(&mut self, lines: I) -> Result<usize, LyricsError>
  where
    I: IntoIterator<Item = Result<LyricLine, LyricsError>>,
  {
    let mut emitted = 0;
    for line in lines {
      self.emit(&line?)?;
      emitted += 1;
    }
    Ok(emitted)
  }
}
