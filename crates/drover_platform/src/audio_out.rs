//! Audio output collaborator contract.
//!
//! The framework's audio manager decides *what* plays and at what volume;
//! an `AudioOutput` is the device that actually makes noise. Mixing belongs
//! to the platform, never to the framework.

/// Device-side audio sink.
pub trait AudioOutput {
    /// Fire-and-forget playback of a short effect at the given volume.
    fn play_effect(&mut self, name: &str, volume: f32);
    /// Begin looping a song at volume zero; the caller drives the fade.
    fn begin_song(&mut self, name: &str);
    /// Stop a song entirely.
    fn end_song(&mut self, name: &str);
    /// Adjust the volume of a playing song.
    fn set_song_volume(&mut self, name: &str, volume: f32);
}

/// Output that discards everything. Used headless and in tests that do not
/// care about audio.
#[derive(Default)]
pub struct NullAudioOutput;

impl AudioOutput for NullAudioOutput {
    fn play_effect(&mut self, name: &str, volume: f32) {
        log::debug!("audio effect '{name}' at volume {volume:.2}");
    }

    fn begin_song(&mut self, name: &str) {
        log::debug!("audio song '{name}' started");
    }

    fn end_song(&mut self, name: &str) {
        log::debug!("audio song '{name}' stopped");
    }

    fn set_song_volume(&mut self, _name: &str, _volume: f32) {}
}

/// One event observed by `RecordingAudioOutput`.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioEvent {
    Effect { name: String, volume: f32 },
    SongStarted(String),
    SongStopped(String),
    SongVolume { name: String, volume: f32 },
}

/// Output that records every call, for asserting on playback behavior.
#[derive(Default)]
pub struct RecordingAudioOutput {
    events: Vec<AudioEvent>,
}

impl RecordingAudioOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[AudioEvent] {
        &self.events
    }
}

impl AudioOutput for RecordingAudioOutput {
    fn play_effect(&mut self, name: &str, volume: f32) {
        self.events.push(AudioEvent::Effect {
            name: name.to_string(),
            volume,
        });
    }

    fn begin_song(&mut self, name: &str) {
        self.events.push(AudioEvent::SongStarted(name.to_string()));
    }

    fn end_song(&mut self, name: &str) {
        self.events.push(AudioEvent::SongStopped(name.to_string()));
    }

    fn set_song_volume(&mut self, name: &str, volume: f32) {
        self.events.push(AudioEvent::SongVolume {
            name: name.to_string(),
            volume,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_output_captures_calls_in_order() {
        let mut output = RecordingAudioOutput::new();
        output.begin_song("theme");
        output.set_song_volume("theme", 0.5);
        output.play_effect("moo", 0.8);
        output.end_song("theme");

        assert_eq!(
            output.events(),
            &[
                AudioEvent::SongStarted("theme".to_string()),
                AudioEvent::SongVolume {
                    name: "theme".to_string(),
                    volume: 0.5
                },
                AudioEvent::Effect {
                    name: "moo".to_string(),
                    volume: 0.8
                },
                AudioEvent::SongStopped("theme".to_string()),
            ]
        );
    }
}
