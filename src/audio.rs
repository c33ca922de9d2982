//! Fire-and-forget sound cues.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use macroquad::audio::{load_sound, play_sound, PlaySoundParams, Sound};

/// A sound the game can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Player jumped.
    Jump,
    /// Player was hit by an arrow.
    Hit,
    /// A goblin fired.
    Shoot,
    /// Looping forest background.
    Ambience,
    /// Player cast a fireball.
    Fireball,
    /// A fireball burst.
    Explosion,
    /// Player touched down after a long fall.
    Landing,
    /// Looping soundtrack.
    Music,
}

impl Cue {
    /// Every cue, in load order.
    pub const ALL: [Cue; 8] = [
        Cue::Jump,
        Cue::Hit,
        Cue::Shoot,
        Cue::Ambience,
        Cue::Fireball,
        Cue::Explosion,
        Cue::Landing,
        Cue::Music,
    ];

    /// Playback volume in `0.0..=1.0`.
    pub fn volume(self) -> f32 {
        match self {
            Cue::Jump => 0.3,
            Cue::Hit => 0.7,
            Cue::Shoot => 0.2,
            Cue::Ambience => 0.2,
            Cue::Fireball => 0.4,
            Cue::Explosion => 0.9,
            Cue::Landing => 0.4,
            Cue::Music => 0.4,
        }
    }

    /// Background tracks that repeat forever.
    pub fn looped(self) -> bool {
        matches!(self, Cue::Ambience | Cue::Music)
    }

    /// Path relative to the data directory.
    pub fn file(self) -> &'static str {
        match self {
            Cue::Jump => "sfx/jump2.wav",
            Cue::Hit => "sfx/hit.wav",
            Cue::Shoot => "sfx/shoot.wav",
            Cue::Ambience => "sfx/ambience.wav",
            Cue::Fireball => "sfx/wind.wav",
            Cue::Explosion => "sfx/fire.wav",
            Cue::Landing => "sfx/landing.wav",
            Cue::Music => "goblino_music.wav",
        }
    }
}

/// Anything that can be asked to play a cue. Playback is never awaited.
pub trait AudioSink {
    /// Start playing `cue`.
    fn play(&mut self, cue: Cue);
}

/// Discards every cue.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silence;

impl AudioSink for Silence {
    fn play(&mut self, _cue: Cue) {}
}

/// Remembers cues in the order they were played.
#[derive(Debug, Default, Clone)]
pub struct CueRecorder {
    /// Every cue so far, oldest first.
    pub played: Vec<Cue>,
}

impl CueRecorder {
    /// How many times `cue` was played.
    pub fn count(&self, cue: Cue) -> usize {
        self.played.iter().filter(|&&c| c == cue).count()
    }
}

impl AudioSink for CueRecorder {
    fn play(&mut self, cue: Cue) {
        self.played.push(cue);
    }
}

/// Sounds loaded through macroquad's audio backend.
pub struct SoundBank {
    sounds: HashMap<Cue, Sound>,
    music_volume: f32,
}

impl SoundBank {
    /// Load every cue from `data_dir`. `music_volume` replaces the soundtrack volume.
    pub async fn load(data_dir: &Path, music_volume: f32) -> anyhow::Result<Self> {
        let mut sounds = HashMap::new();
        for cue in Cue::ALL {
            let path = data_dir.join(cue.file());
            let path_str = path
                .to_str()
                .with_context(|| format!("Non UTF-8 sound path {}", path.display()))?;
            let sound = load_sound(path_str)
                .await
                .with_context(|| format!("Loading sound {}", path.display()))?;
            sounds.insert(cue, sound);
        }
        tracing::info!(sounds = sounds.len(), "loaded audio from {}", data_dir.display());
        Ok(SoundBank {
            sounds,
            music_volume,
        })
    }
}

impl AudioSink for SoundBank {
    fn play(&mut self, cue: Cue) {
        let Some(sound) = self.sounds.get(&cue) else {
            return;
        };
        let volume = match cue {
            Cue::Music => self.music_volume,
            _ => cue.volume(),
        };
        play_sound(
            sound,
            PlaySoundParams {
                looped: cue.looped(),
                volume,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_background_cues_loop() {
        let looped: Vec<_> = Cue::ALL.into_iter().filter(|c| c.looped()).collect();
        assert_eq!(looped, vec![Cue::Ambience, Cue::Music]);
    }

    #[test]
    fn recorder_keeps_order() {
        let mut rec = CueRecorder::default();
        rec.play(Cue::Shoot);
        rec.play(Cue::Hit);
        rec.play(Cue::Shoot);
        assert_eq!(rec.played, vec![Cue::Shoot, Cue::Hit, Cue::Shoot]);
        assert_eq!(rec.count(Cue::Shoot), 2);
        assert_eq!(rec.count(Cue::Landing), 0);
    }
}
