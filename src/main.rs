use anyhow::Context;
use clap::Parser;
use std::{io, path::PathBuf, time::Duration};
use tracing_subscriber::EnvFilter;

use lrcplay::{lyrics, pacer::Pacer, playback};

#[derive(Debug, Parser)]
struct Args {
  /// Base name of the song; `<song>.<audio-ext>` and `<song>.lrc` are loaded.
  #[clap(default_value = lrcplay::DEFAULT_SONG)]
  song: String,
  /// Directory holding the audio and lyrics files.
  #[clap(short, long, default_value = ".")]
  dir: PathBuf,
  /// Extension of the audio file.
  #[clap(short, long, default_value = "mp3")]
  audio_ext: String,
  /// Delay every lyric by this many milliseconds.
  #[clap(short, long, default_value_t = 0)]
  offset_ms: u64,
}

impl Args {
  fn audio_path(&self) -> PathBuf {
    self.dir.join(format!("{}.{}", self.song, self.audio_ext))
  }

  fn lyrics_path(&self) -> PathBuf {
    self
      .dir
      .join(format!("{}.{}", self.song, lrcplay::LYRICS_EXTENSION))
  }
}

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(io::stderr)
    .init();

  let args = Args::parse();

  let playback = playback::launch(args.audio_path()).context("failed to start playback")?;

  // if this fails, returning drops `playback` and the song stops with the process
  let lines = lyrics::open(args.lyrics_path()).context("failed to display lyrics")?;
  let emitted = Pacer::new(io::stdout())
    .with_offset(Duration::from_millis(args.offset_ms))
    .run(lines)
    .context("failed to display lyrics")?;
  tracing::info!(emitted, "lyrics finished, waiting for playback");

  playback.wait_until_done();
  Ok(())
}
