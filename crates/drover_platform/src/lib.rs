pub mod audio_out;
pub mod content;
pub mod replay;

pub use audio_out::{AudioEvent, AudioOutput, NullAudioOutput, RecordingAudioOutput};
pub use content::{load_manifest, parse_manifest, ContentCatalog, ContentScope, ManifestCatalog};
pub use replay::{load_trace, parse_trace, InputTrace, NullInputSource, ScriptedInputSource};
