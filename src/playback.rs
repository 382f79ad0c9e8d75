use std::{
  fs::File,
  io::BufReader,
  path::Path,
};

use rodio::{cpal::BufferSize, Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use crate::error::PlaybackError;

/// A song that is currently playing on the default output device.
///
/// Dropping the handle stops playback and closes the decoder along with its file.
pub struct PlaybackHandle {
  // the sink goes silent once the stream is dropped, so keep it alive alongside
  _stream: OutputStream,
  sink: Sink,
}

impl PlaybackHandle {
  /// Blocks until every sample has been rendered.
  pub fn wait_until_done(self) {
    self.sink.sleep_until_end();
    tracing::info!("playback finished");
  }
}

/// Decodes `song` and starts playing it in the background.
pub fn launch<P: AsRef<Path>>(song: P) -> Result<PlaybackHandle, PlaybackError> {
  let song = song.as_ref();
  if !has_supported_extension(song) {
    return Err(PlaybackError::Unsupported(song.to_path_buf()));
  }
  let source = open_source(song)?;

  let sample_rate = source.sample_rate();
  let channels = source.channels();
  let buffer_frames = sample_rate * crate::BUFFER_MS / 1000;
  tracing::info!(
    path = %song.display(),
    sample_rate,
    channels,
    duration = ?source.total_duration(),
    buffer_frames,
    "decoded audio file"
  );

  let mut stream = OutputStreamBuilder::from_default_device()
    .map_err(PlaybackError::Device)?
    .with_sample_rate(sample_rate)
    .with_channels(channels)
    .with_buffer_size(BufferSize::Fixed(buffer_frames))
    .open_stream()
    .map_err(PlaybackError::Device)?;
  stream.log_on_drop(false);

  let sink = Sink::connect_new(stream.mixer());
  sink.append(source);

  Ok(PlaybackHandle {
    _stream: stream,
    sink,
  })
}

fn open_source(song: &Path) -> Result<Decoder<BufReader<File>>, PlaybackError> {
  let file = File::open(song).map_err(|source| PlaybackError::Open {
    path: song.to_path_buf(),
    source,
  })?;
  Decoder::new(BufReader::new(file)).map_err(|source| PlaybackError::Decode {
    path: song.to_path_buf(),
    source,
  })
}

fn has_supported_extension(path: &Path) -> bool {
  crate::SUPPORTED_FORMATS
    .iter()
    .any(|ext| path.extension().and_then(|e| e.to_str()) == Some(*ext))
}
