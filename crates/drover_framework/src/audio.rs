//! Song and effect playback with deterministic volume cross-fades.
//!
//! The manager owns *what* is playing and at which volume; the `AudioOutput`
//! collaborator does the actual mixing. One song is active at a time: asking
//! for another song fades the current one out linearly and starts the next
//! from silence once the old one reaches zero. All envelope movement is a
//! pure function of the dt fed to `update`, so sessions replay identically.
//!
//! Key misuse — registering a name twice or playing an unregistered name —
//! is a wiring bug and panics.

use std::collections::HashSet;

use drover_platform::audio_out::AudioOutput;

/// Seconds for a full-scale fade in or out.
const FADE_SECONDS: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FadePhase {
    In,
    Out,
}

struct SongState {
    name: String,
    volume: f32,
    phase: FadePhase,
}

pub struct AudioManager {
    output: Box<dyn AudioOutput>,
    effects: HashSet<String>,
    songs: HashSet<String>,
    active: Option<SongState>,
    next: Option<String>,
    effect_volume: f32,
    song_volume: f32,
}

impl AudioManager {
    pub fn new(output: Box<dyn AudioOutput>) -> Self {
        Self {
            output,
            effects: HashSet::new(),
            songs: HashSet::new(),
            active: None,
            next: None,
            effect_volume: 1.0,
            song_volume: 1.0,
        }
    }

    pub fn register_effect(&mut self, name: &str) {
        assert!(
            self.effects.insert(name.to_string()),
            "audio effect name already in use: '{name}'"
        );
    }

    pub fn register_song(&mut self, name: &str) {
        assert!(
            self.songs.insert(name.to_string()),
            "audio song name already in use: '{name}'"
        );
    }

    /// Play a registered effect at the configured effect volume.
    pub fn play_effect(&mut self, name: &str) {
        let volume = self.effect_volume;
        self.play_effect_with_volume(name, volume);
    }

    pub fn play_effect_with_volume(&mut self, name: &str, volume: f32) {
        assert!(
            self.effects.contains(name),
            "no audio effect registered for '{name}'"
        );
        self.output.play_effect(name, volume);
    }

    /// Cross-fade to a registered song. With no song active it fades in from
    /// silence; otherwise the active song fades out first and the requested
    /// one starts at the swap. Re-requesting the active song just fades it
    /// back in.
    pub fn play_song(&mut self, name: &str) {
        assert!(
            self.songs.contains(name),
            "no audio song registered for '{name}'"
        );
        match &mut self.active {
            None => {
                self.output.begin_song(name);
                self.active = Some(SongState {
                    name: name.to_string(),
                    volume: 0.0,
                    phase: FadePhase::In,
                });
            }
            Some(active) if active.name == name => {
                active.phase = FadePhase::In;
                self.next = None;
            }
            Some(active) => {
                active.phase = FadePhase::Out;
                self.next = Some(name.to_string());
            }
        }
    }

    /// Advance the volume envelopes.
    pub fn update(&mut self, dt: f32) {
        let Some(active) = &mut self.active else {
            return;
        };
        let step = dt / FADE_SECONDS;
        match active.phase {
            FadePhase::In => {
                active.volume = (active.volume + step).min(self.song_volume);
                self.output.set_song_volume(&active.name, active.volume);
            }
            FadePhase::Out => {
                active.volume = (active.volume - step).max(0.0);
                self.output.set_song_volume(&active.name, active.volume);
                if active.volume <= 0.0 {
                    self.output.end_song(&active.name);
                    self.active = self.next.take().map(|name| {
                        self.output.begin_song(&name);
                        SongState {
                            name,
                            volume: 0.0,
                            phase: FadePhase::In,
                        }
                    });
                }
            }
        }
    }

    /// Fade the active song out with nothing queued after it.
    pub fn stop_song(&mut self) {
        if let Some(active) = &mut self.active {
            active.phase = FadePhase::Out;
        }
        self.next = None;
    }

    pub fn active_song(&self) -> Option<&str> {
        self.active.as_ref().map(|s| s.name.as_str())
    }

    pub fn active_song_volume(&self) -> f32 {
        self.active.as_ref().map(|s| s.volume).unwrap_or(0.0)
    }

    pub fn effect_volume(&self) -> f32 {
        self.effect_volume
    }

    pub fn set_effect_volume(&mut self, volume: f32) {
        self.effect_volume = volume.clamp(0.0, 1.0);
    }

    pub fn song_volume(&self) -> f32 {
        self.song_volume
    }

    pub fn set_song_volume(&mut self, volume: f32) {
        self.song_volume = volume.clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drover_platform::audio_out::AudioEvent;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct SharedOutput(Rc<RefCell<Vec<AudioEvent>>>);

    impl AudioOutput for SharedOutput {
        fn play_effect(&mut self, name: &str, volume: f32) {
            self.0.borrow_mut().push(AudioEvent::Effect {
                name: name.to_string(),
                volume,
            });
        }

        fn begin_song(&mut self, name: &str) {
            self.0
                .borrow_mut()
                .push(AudioEvent::SongStarted(name.to_string()));
        }

        fn end_song(&mut self, name: &str) {
            self.0
                .borrow_mut()
                .push(AudioEvent::SongStopped(name.to_string()));
        }

        fn set_song_volume(&mut self, _name: &str, _volume: f32) {}
    }

    fn manager_with_log() -> (AudioManager, Rc<RefCell<Vec<AudioEvent>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let manager = AudioManager::new(Box::new(SharedOutput(log.clone())));
        (manager, log)
    }

    fn song_events(log: &Rc<RefCell<Vec<AudioEvent>>>) -> Vec<AudioEvent> {
        log.borrow()
            .iter()
            .filter(|e| !matches!(e, AudioEvent::SongVolume { .. }))
            .cloned()
            .collect()
    }

    #[test]
    fn first_song_fades_in_to_configured_volume() {
        let (mut audio, _log) = manager_with_log();
        audio.register_song("theme");
        audio.set_song_volume(0.8);
        audio.play_song("theme");

        assert_eq!(audio.active_song(), Some("theme"));
        assert_eq!(audio.active_song_volume(), 0.0);

        for _ in 0..100 {
            audio.update(0.1);
        }
        assert!((audio.active_song_volume() - 0.8).abs() < 1e-5);
    }

    #[test]
    fn crossfade_swaps_songs_at_silence() {
        let (mut audio, log) = manager_with_log();
        audio.register_song("menu");
        audio.register_song("game");
        audio.play_song("menu");
        for _ in 0..30 {
            audio.update(0.1);
        }

        audio.play_song("game");
        for _ in 0..30 {
            audio.update(0.1);
        }

        assert_eq!(audio.active_song(), Some("game"));
        assert_eq!(
            song_events(&log),
            vec![
                AudioEvent::SongStarted("menu".to_string()),
                AudioEvent::SongStopped("menu".to_string()),
                AudioEvent::SongStarted("game".to_string()),
            ]
        );
    }

    #[test]
    fn replaying_active_song_does_not_restart_it() {
        let (mut audio, log) = manager_with_log();
        audio.register_song("theme");
        audio.play_song("theme");
        for _ in 0..30 {
            audio.update(0.1);
        }
        audio.play_song("theme");
        for _ in 0..10 {
            audio.update(0.1);
        }

        assert_eq!(
            song_events(&log),
            vec![AudioEvent::SongStarted("theme".to_string())]
        );
        assert!(audio.active_song_volume() > 0.0);
    }

    #[test]
    fn fade_is_deterministic_for_equal_dt_sequences() {
        let run = || {
            let (mut audio, _log) = manager_with_log();
            audio.register_song("a");
            audio.register_song("b");
            audio.play_song("a");
            for _ in 0..17 {
                audio.update(1.0 / 60.0);
            }
            audio.play_song("b");
            for _ in 0..23 {
                audio.update(1.0 / 60.0);
            }
            (audio.active_song().map(str::to_string), audio.active_song_volume())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn stop_song_fades_out_without_successor() {
        let (mut audio, log) = manager_with_log();
        audio.register_song("theme");
        audio.play_song("theme");
        for _ in 0..30 {
            audio.update(0.1);
        }
        audio.stop_song();
        for _ in 0..30 {
            audio.update(0.1);
        }
        assert_eq!(audio.active_song(), None);
        assert!(song_events(&log).contains(&AudioEvent::SongStopped("theme".to_string())));
    }

    #[test]
    fn effects_play_at_the_configured_volume() {
        let (mut audio, log) = manager_with_log();
        audio.register_effect("moo");
        audio.set_effect_volume(0.25);
        audio.play_effect("moo");

        assert_eq!(
            log.borrow().as_slice(),
            &[AudioEvent::Effect {
                name: "moo".to_string(),
                volume: 0.25
            }]
        );
    }

    #[test]
    #[should_panic(expected = "already in use")]
    fn duplicate_effect_registration_panics() {
        let (mut audio, _log) = manager_with_log();
        audio.register_effect("moo");
        audio.register_effect("moo");
    }

    #[test]
    #[should_panic(expected = "no audio song registered")]
    fn playing_unregistered_song_panics() {
        let (mut audio, _log) = manager_with_log();
        audio.play_song("ghost");
    }

    #[test]
    fn volume_settings_clamp_to_unit_range() {
        let (mut audio, _log) = manager_with_log();
        audio.set_effect_volume(1.7);
        audio.set_song_volume(-0.3);
        assert_eq!(audio.effect_volume(), 1.0);
        assert_eq!(audio.song_volume(), 0.0);
    }
}
