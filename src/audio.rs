//! Audio cues
//!
//! The game only ever fires cues and forgets about them. `AudioManager`
//! applies the volume settings and hands the cue to a backend.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Player hit by a fireball
    Death,
    /// A fireball was launched
    FireballShoot,
    /// Treasure picked up
    TreasureCollect,
    /// Background music, looped for the whole session
    MusicLoop,
    /// Fade the background music out
    MusicFadeOut,
}

impl Cue {
    pub fn asset_name(&self) -> &'static str {
        match self {
            Cue::Death => "soundEffects/death.ogg",
            Cue::FireballShoot => "soundEffects/fireball.ogg",
            Cue::TreasureCollect => "soundEffects/ding.ogg",
            Cue::MusicLoop | Cue::MusicFadeOut => "soundEffects/backgroundMusic.ogg",
        }
    }

    pub fn is_music(&self) -> bool {
        matches!(self, Cue::MusicLoop | Cue::MusicFadeOut)
    }

    /// Cue triggered by a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Cue> {
        match event {
            GameEvent::FireballShot => Some(Cue::FireballShoot),
            GameEvent::PlayerKilled { .. } => Some(Cue::Death),
            GameEvent::TreasureCollected { .. } => Some(Cue::TreasureCollect),
            _ => None,
        }
    }
}

/// Something that can actually make noise
pub trait AudioBackend {
    /// Play `cue` at `volume` (0.0 - 1.0, never zero)
    fn play(&mut self, cue: Cue, volume: f32);
}

/// Backend that only logs the cues it receives
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&mut self, cue: Cue, volume: f32) {
        log::debug!("Audio cue {:?} ({}) at volume {:.2}", cue, cue.asset_name(), volume);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(LogBackend))
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }

    pub fn from_settings(settings: &Settings, backend: Box<dyn AudioBackend>) -> Self {
        let mut audio = Self::new(backend);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_music_volume(settings.music_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume for a cue
    fn effective_volume(&self, cue: Cue) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = if cue.is_music() {
            self.music_volume
        } else {
            self.sfx_volume
        };
        self.master_volume * channel
    }

    /// Play a cue; silent cues never reach the backend
    pub fn play(&mut self, cue: Cue) {
        let vol = self.effective_volume(cue);
        if vol <= 0.0 {
            return;
        }
        self.backend.play(cue, vol);
    }

    /// Play whatever cues a batch of simulation events calls for
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for cue in events.iter().filter_map(Cue::for_event) {
            self.play(cue);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingBackend;
    use super::*;

    #[test]
    fn test_volume_channels() {
        let backend = RecordingBackend::default();
        let mut audio = AudioManager::new(Box::new(backend.clone()));
        audio.set_master_volume(0.5);
        audio.set_sfx_volume(0.5);
        audio.set_music_volume(1.0);
        audio.play(Cue::Death);
        audio.play(Cue::MusicLoop);

        let played = backend.played.borrow();
        assert_eq!(played[0], (Cue::Death, 0.25));
        assert_eq!(played[1], (Cue::MusicLoop, 0.5));
    }

    #[test]
    fn test_muted_cues_are_dropped() {
        let backend = RecordingBackend::default();
        let mut audio = AudioManager::new(Box::new(backend.clone()));
        audio.set_muted(true);
        audio.play(Cue::FireballShoot);
        assert!(backend.cues().is_empty());
    }

    #[test]
    fn test_events_map_to_cues() {
        let backend = RecordingBackend::default();
        let mut audio = AudioManager::new(Box::new(backend.clone()));
        audio.play_events(&[
            GameEvent::FireballShot,
            GameEvent::PlayerHidden,
            GameEvent::PlayerKilled { lives_remaining: 3 },
            GameEvent::TreasureCollected { value: 20 },
        ]);
        assert_eq!(
            backend.cues(),
            vec![Cue::FireballShoot, Cue::Death, Cue::TreasureCollect]
        );
    }

    #[test]
    fn test_volumes_clamp() {
        let settings = Settings {
            master_volume: 2.0,
            sfx_volume: -1.0,
            ..Settings::default()
        };
        let backend = RecordingBackend::default();
        let mut audio = AudioManager::from_settings(&settings, Box::new(backend.clone()));
        audio.play(Cue::Death);
        audio.play(Cue::MusicFadeOut);
        assert_eq!(backend.cues(), vec![Cue::MusicFadeOut]);
    }
}
