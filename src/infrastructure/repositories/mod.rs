pub mod artifact_repository;
pub mod caching_speech_repository;
pub mod dialogue_repository;
pub mod elevenlabs_speech_repository;
pub mod fs_artifact_repository;
pub mod openai_dialogue_repository;
pub mod openai_speech_repository;
pub mod polly_speech_repository;
pub mod retrying_speech_repository;
pub mod speech_repository;

pub use artifact_repository::ArtifactRepository;
pub use caching_speech_repository::CachingSpeechRepository;
pub use dialogue_repository::{DialogueRepository, DialogueRepositoryError};
pub use elevenlabs_speech_repository::ElevenLabsSpeechRepository;
pub use fs_artifact_repository::FsArtifactRepository;
pub use openai_dialogue_repository::OpenAiDialogueRepository;
pub use openai_speech_repository::OpenAiSpeechRepository;
pub use polly_speech_repository::PollySpeechRepository;
pub use retrying_speech_repository::RetryingSpeechRepository;
pub use speech_repository::{SpeechError, SpeechRepository};
