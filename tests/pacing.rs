use std::{
  fs,
  io::Write,
  sync::{Arc, Mutex},
  time::{Duration, Instant},
};

use lrcplay::{error::LyricsError, lyrics, pacer::Pacer};

/// Records the instant each line was written.
#[derive(Clone, Default)]
struct Timeline(Arc<Mutex<Vec<(Instant, Vec<u8>)>>>);

impl Write for Timeline {
  fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
    let mut lines = self.0.lock().unwrap();
    match lines.last_mut() {
      Some((_, line)) if !line.ends_with(b"\n") => line.extend_from_slice(buf),
      _ => lines.push((Instant::now(), buf.to_vec())),
    }
    Ok(buf.len())
  }

  fn flush(&mut self) -> std::io::Result<()> {
    Ok(())
  }
}

fn write_lrc(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("song.lrc");
  fs::write(&path, contents).unwrap();
  (dir, path)
}

#[test]
fn lines_are_emitted_at_their_timestamps() {
  let (_dir, path) = write_lrc("[00:00.00]A\nnot a lyric\n[00:00.30]B\n[00:00.60]C\n");
  let timeline = Timeline::default();

  let mut pacer = Pacer::new(timeline.clone());
  let emitted = pacer.run(lyrics::open(&path).unwrap()).unwrap();
  assert_eq!(emitted, 3);

  let lines = timeline.0.lock().unwrap();
  let texts = lines.iter().map(|(_, l)| l.as_slice()).collect::<Vec<_>>();
  assert_eq!(texts, vec![&b"A\n"[..], b"B\n", b"C\n"]);

  let first = lines[0].0;
  for ((at, _), due_ms) in lines.iter().zip([0u64, 300, 600]) {
    let since = at.duration_since(first);
    let due = Duration::from_millis(due_ms);
    assert!(since >= due.saturating_sub(Duration::from_millis(5)), "{:?}", since);
    assert!(since < Duration::from_millis(due_ms + 250), "{:?}", since);
  }
}

#[test]
fn late_lines_are_emitted_immediately() {
  let (_dir, path) = write_lrc("[00:00.20]first\n[00:00.00]rewound\n[00:00.10]also past\n");
  let timeline = Timeline::default();

  let started = Instant::now();
  Pacer::new(timeline.clone())
    .run(lyrics::open(&path).unwrap())
    .unwrap();
  let total = started.elapsed();

  assert!(total >= Duration::from_millis(200));
  assert!(total < Duration::from_millis(450), "{:?}", total);
  assert_eq!(timeline.0.lock().unwrap().len(), 3);
}

#[test]
fn offset_delays_every_line() {
  let (_dir, path) = write_lrc("[00:00.00]A\n[00:00.10]B\n");
  let started = Instant::now();
  Pacer::new(Vec::new())
    .with_offset(Duration::from_millis(150))
    .run(lyrics::open(&path).unwrap())
    .unwrap();
  assert!(started.elapsed() >= Duration::from_millis(250));
}

#[test]
fn empty_file_is_a_quiet_success() {
  let (_dir, path) = write_lrc("");
  let mut pacer = Pacer::new(Vec::new());
  assert_eq!(pacer.run(lyrics::open(&path).unwrap()).unwrap(), 0);
  assert!(pacer.clock().start().is_none());
  assert!(pacer.into_inner().is_empty());
}

#[test]
fn missing_lyrics_file_is_fatal() {
  let dir = tempfile::tempdir().unwrap();
  let err = lyrics::open(dir.path().join("Billie_Eilish-Party_Favor.lrc"))
    .err()
    .unwrap();
  assert!(matches!(err, LyricsError::Open { .. }));
  assert!(err.to_string().starts_with("failed to open lyrics file"));
}
