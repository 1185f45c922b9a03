/// Terminal stand-in for the sound chip: cues are logged, and the ones in
/// `BELL_CUES` ring the terminal bell.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use crate::error::AssetError;
use crate::platform::{Audio, SoundHandle};

const KNOWN_CUES: [&str; 4] = ["explode", "hit_hurt", "laser", "music"];
const BELL_CUES: [&str; 1] = ["hit_hurt"];

#[derive(Debug, Default)]
pub struct TerminalAudio {
    sounds: HashMap<SoundHandle, &'static str>,
    next: u32,
}

impl TerminalAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cue names currently loaded, in no particular order.
    pub fn loaded(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sounds.values().copied()
    }
}

impl Audio for TerminalAudio {
    fn load_sound(&mut self, path: &str) -> Result<SoundHandle, AssetError> {
        let p = Path::new(path);
        if p.extension().and_then(|e| e.to_str()) != Some("wav") {
            return Err(AssetError::Unsupported {
                name: path.to_string(),
                reason: "only .wav cues are supported",
            });
        }
        let stem = p.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        let cue = KNOWN_CUES
            .iter()
            .copied()
            .find(|&c| c == stem)
            .ok_or_else(|| AssetError::NotFound {
                name: path.to_string(),
            })?;

        let handle = SoundHandle(self.next);
        self.next += 1;
        self.sounds.insert(handle, cue);
        log::debug!("sound {path} -> {handle:?}");
        Ok(handle)
    }

    fn free_sound(&mut self, sound: SoundHandle) {
        self.sounds.remove(&sound);
    }

    fn play(&mut self, sound: SoundHandle) {
        let Some(cue) = self.sounds.get(&sound).copied() else {
            log::warn!("play of unknown sound {sound:?}");
            return;
        };
        log::debug!("play {cue}");
        if BELL_CUES.contains(&cue) {
            let mut out = std::io::stdout();
            let _ = out.write_all(b"\x07").and_then(|_| out.flush());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_known_cues_by_file_stem() {
        let mut audio = TerminalAudio::new();
        let laser = audio.load_sound("assets/laser.wav").unwrap();
        let music = audio.load_sound("assets/music.wav").unwrap();
        assert_ne!(laser, music);
        assert_eq!(audio.loaded().count(), 2);

        audio.free_sound(laser);
        assert_eq!(audio.loaded().collect::<Vec<_>>(), vec!["music"]);
    }

    #[test]
    fn rejects_unknown_and_non_wav() {
        let mut audio = TerminalAudio::new();
        assert!(matches!(
            audio.load_sound("assets/boom.wav"),
            Err(AssetError::NotFound { .. })
        ));
        assert!(matches!(
            audio.load_sound("assets/laser.ogg"),
            Err(AssetError::Unsupported { .. })
        ));
    }
}
