use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The two conversational roles a podcast script can use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Host,
    Guest,
}

impl Speaker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::Host => "host",
            Speaker::Guest => "guest",
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returned when a role string is outside the closed speaker set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSpeaker(pub String);

impl FromStr for Speaker {
    type Err = UnknownSpeaker;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "host" | "a" | "female" | "speaker1" => Ok(Speaker::Host),
            "guest" | "b" | "male" | "speaker2" => Ok(Speaker::Guest),
            _ => Err(UnknownSpeaker(s.to_string())),
        }
    }
}

/// One line as it arrives from a caller or from the dialogue generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDialogueLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    pub speaker: String,
    pub text: String,
}

/// Unvalidated script candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDialogueScript {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scratchpad: Option<String>,
    pub dialogue: Vec<RawDialogueLine>,
}

/// A validated utterance. `position` is the line's final place in the audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueLine {
    pub position: usize,
    pub speaker: Speaker,
    pub voice_id: String,
    pub text: String,
}

/// Validated, immutable script. Positions are exactly `0..len`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueScript {
    lines: Vec<DialogueLine>,
    scratchpad: Option<String>,
}

impl DialogueScript {
    /// Only the validator builds scripts, so the position invariant holds.
    pub(crate) fn new(lines: Vec<DialogueLine>, scratchpad: Option<String>) -> Self {
        Self { lines, scratchpad }
    }

    pub fn lines(&self) -> &[DialogueLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Planning notes from the generator, kept for diagnostics only
    pub fn scratchpad(&self) -> Option<&str> {
        self.scratchpad.as_deref()
    }

    pub fn char_count(&self) -> usize {
        self.lines.iter().map(|line| line.text.len()).sum()
    }
}
