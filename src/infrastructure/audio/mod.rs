pub mod audio_probe;
mod google_speech_engine;
mod mock_transcription_engine;
mod openai_whisper_engine;
mod transcription_engine_factory;

pub use google_speech_engine::{GOOGLE_SPEECH_BASE_URL, GoogleSpeechEngine, join_segments};
pub use mock_transcription_engine::MockTranscriptionEngine;
pub use openai_whisper_engine::OpenAiWhisperEngine;
pub use transcription_engine_factory::TranscriptionEngineFactory;
