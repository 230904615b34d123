//! Sound cues.
//!
//! The game only ever asks for one of four fixed cues and never waits on
//! playback. [`Silent`] is always available; with the `sound` feature,
//! [`SoundManager`] plays wav files on a background thread.

use std::fmt;

/// Logical sound identifiers.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Cue {
    Laser,
    Explosion,
    Death,
    GameOver,
}

impl Cue {
    pub const ALL: [Cue; 4] = [Cue::Laser, Cue::Explosion, Cue::Death, Cue::GameOver];

    /// File name of the cue inside the sounds directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Cue::Laser => "laser.wav",
            Cue::Explosion => "explosion.wav",
            Cue::Death => "player_dead.wav",
            Cue::GameOver => "game_over.wav",
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Cue::Laser => "laser",
            Cue::Explosion => "explosion",
            Cue::Death => "death",
            Cue::GameOver => "game over",
        };
        f.write_str(name)
    }
}

/// Fire-and-forget cue player.
pub trait Audio {
    fn play(&mut self, cue: Cue);
}

/// Plays nothing.
#[derive(Debug, Default)]
pub struct Silent;

impl Audio for Silent {
    fn play(&mut self, cue: Cue) {
        log::trace!("sound muted: {cue}");
    }
}

#[cfg(feature = "sound")]
pub use self::rodio_backend::SoundManager;

#[cfg(feature = "sound")]
mod rodio_backend {
    use std::collections::HashMap;
    use std::fs;
    use std::io::{BufReader, Cursor};
    use std::path::Path;
    use std::sync::mpsc::{self, Receiver, Sender};
    use std::thread;

    use log::{error, warn};
    use rodio::{Decoder, OutputStream, Source};

    use super::{Audio, Cue};

    struct SoundThread {
        receiver: Receiver<Cue>,
        sound_files: HashMap<Cue, Vec<u8>>,
    }

    impl SoundThread {
        fn new(receiver: Receiver<Cue>, dir: &Path) -> Option<Self> {
            let mut sound_files = HashMap::new();

            for cue in Cue::ALL {
                let path = dir.join(cue.file_name());
                match fs::read(&path) {
                    Ok(bytes) => {
                        sound_files.insert(cue, bytes);
                    }
                    Err(e) => {
                        warn!("Failed to load {cue} sound from {}: {e}", path.display());
                    }
                }
            }

            if sound_files.is_empty() {
                warn!("No sound files could be loaded from {}, disabling audio", dir.display());
                return None;
            }

            Some(Self {
                receiver,
                sound_files,
            })
        }

        fn run(self) {
            // The stream must outlive every sound played through its handle.
            let Ok((_stream, stream_handle)) = OutputStream::try_default() else {
                error!("Failed to open default audio output stream, disabling audio");
                return;
            };

            while let Ok(cue) = self.receiver.recv() {
                let Some(bytes) = self.sound_files.get(&cue) else {
                    continue;
                };
                let reader = BufReader::new(Cursor::new(bytes.clone()));
                match Decoder::new(reader) {
                    Ok(source) => {
                        // Mixed into the stream; overlapping cues are fine.
                        if let Err(e) = stream_handle.play_raw(source.convert_samples()) {
                            error!("Failed to play {cue} sound: {e}");
                        }
                    }
                    Err(e) => error!("Failed to decode {cue} sound: {e}"),
                }
            }
        }
    }

    /// Handle living on the game thread; sends cues to the audio thread.
    pub struct SoundManager {
        sender: Sender<Cue>,
    }

    impl SoundManager {
        /// Load the cues from `dir` and start the audio thread.
        ///
        /// Returns `None` when nothing could be loaded or the thread could not
        /// be spawned; the caller falls back to silence.
        pub fn new(dir: &Path) -> Option<Self> {
            let (sender, receiver) = mpsc::channel::<Cue>();
            let sound_thread = SoundThread::new(receiver, dir)?;

            if let Err(e) = thread::Builder::new()
                .name("alien_invasion_sound".into())
                .spawn(move || sound_thread.run())
            {
                error!("Failed to spawn audio thread: {e}");
                return None;
            }

            Some(Self { sender })
        }
    }

    impl Audio for SoundManager {
        fn play(&mut self, cue: Cue) {
            // If the audio thread has gone away we simply stop playing.
            let _ = self.sender.send(cue);
        }
    }
}
