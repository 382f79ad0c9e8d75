use std::{num::ParseIntError, path::PathBuf};

use thiserror::Error;

/// Failures while reading or parsing a `.lrc` file.
///
/// A line that doesn't look like `[mm:ss.xx]text` is never an error, it is skipped.
/// Only a line that matched the timestamp shape but carries unusable numbers ends up here.
#[derive(Debug, Error)]
pub enum LyricsError {
  #[error("failed to open lyrics file {path:?}: {source}")]
  Open {
    path: PathBuf,
    source: std::io::Error,
  },

  #[error("failed to parse minutes {raw:?}: {source}")]
  Minutes { raw: String, source: ParseIntError },

  /// `minutes * 60 + seconds` doesn't fit in a `Duration`.
  #[error("timestamp {raw:?} is out of range")]
  Timestamp { raw: String },

  #[error("scanner error: {0}")]
  Scan(#[source] std::io::Error),

  #[error("failed to print lyric: {0}")]
  Emit(#[source] std::io::Error),
}

/// Failures while starting audio playback.
#[derive(Debug, Error)]
pub enum PlaybackError {
  #[error("file {0:?} is not a supported format")]
  Unsupported(PathBuf),

  #[error("failed to open audio file {path:?}: {source}")]
  Open {
    path: PathBuf,
    source: std::io::Error,
  },

  #[error("failed to decode audio file {path:?}: {source}")]
  Decode {
    path: PathBuf,
    source: rodio::decoder::DecoderError,
  },

  #[error("failed to initialize output device: {0}")]
  Device(#[source] rodio::StreamError),
}
