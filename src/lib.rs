pub mod error;
pub mod lyrics;
pub mod pacer;
pub mod playback;

pub const DEFAULT_SONG: &str = "Billie_Eilish-Party_Favor";
pub const LYRICS_EXTENSION: &str = "lrc";

/// Target size of the output device buffer.
pub const BUFFER_MS: u32 = 100;

pub const SUPPORTED_FORMATS: [&str; 5] = ["mp3", "flac", "ogg", "wav", "aac"];
