use super::model::Speaker;
use serde::{Deserialize, Serialize};

/// How a speaker is voiced and how it is named in the transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceProfile {
    pub label: String,
    pub voice_id: String,
}

impl VoiceProfile {
    pub fn new(label: impl Into<String>, voice_id: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            voice_id: voice_id.into(),
        }
    }
}

/// Speaker to voice mapping. Every `Speaker` has exactly one profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceRoster {
    host: VoiceProfile,
    guest: VoiceProfile,
}

impl VoiceRoster {
    pub fn new(host: VoiceProfile, guest: VoiceProfile) -> Self {
        Self { host, guest }
    }

    pub fn profile(&self, speaker: Speaker) -> &VoiceProfile {
        match speaker {
            Speaker::Host => &self.host,
            Speaker::Guest => &self.guest,
        }
    }

    pub fn label(&self, speaker: Speaker) -> &str {
        &self.profile(speaker).label
    }

    pub fn voice_id(&self, speaker: Speaker) -> &str {
        &self.profile(speaker).voice_id
    }
}

/// Default voice ids per provider, as (host, guest)
pub fn default_voice_ids(provider: &str) -> (&'static str, &'static str) {
    match provider {
        "openai" => ("nova", "onyx"),
        "polly" => ("Joanna", "Matthew"),
        _ => ("nDJIICjR9zfJExIFeSCN", "1m3E2x7boso3AU9J3woJ"),
    }
}
