pub mod error;
pub mod generation;
pub mod model;
pub mod source_text;
pub mod validator;
pub mod voice_roster;

pub use error::{GenerationError, ValidationError};
pub use generation::generate_validated_script;
pub use model::{DialogueLine, DialogueScript, RawDialogueLine, RawDialogueScript, Speaker};
pub use source_text::clean_source_text;
pub use validator::DialogueValidator;
pub use voice_roster::{default_voice_ids, VoiceProfile, VoiceRoster};
