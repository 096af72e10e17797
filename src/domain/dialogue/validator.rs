use super::error::ValidationError;
use super::model::{DialogueLine, DialogueScript, RawDialogueLine, RawDialogueScript, Speaker};
use super::voice_roster::VoiceRoster;
use std::sync::Arc;

/// Turns raw script candidates into `DialogueScript`s or rejects them.
///
/// Pure: no I/O, safe to call on every regenerated candidate.
#[derive(Debug, Clone)]
pub struct DialogueValidator {
    roster: Arc<VoiceRoster>,
}

impl DialogueValidator {
    pub fn new(roster: Arc<VoiceRoster>) -> Self {
        Self { roster }
    }

    pub fn roster(&self) -> &VoiceRoster {
        &self.roster
    }

    pub fn validate(&self, raw: RawDialogueScript) -> Result<DialogueScript, ValidationError> {
        if raw.dialogue.is_empty() {
            return Err(ValidationError::EmptyScript);
        }

        let ordered = order_by_position(raw.dialogue)?;

        let mut lines = Vec::with_capacity(ordered.len());
        for (position, raw_line) in ordered.into_iter().enumerate() {
            let speaker: Speaker =
                raw_line
                    .speaker
                    .parse()
                    .map_err(|_| ValidationError::UnknownSpeaker {
                        position,
                        speaker: raw_line.speaker.clone(),
                    })?;

            let text = raw_line.text.trim();
            if text.is_empty() {
                return Err(ValidationError::EmptyText { position });
            }

            lines.push(DialogueLine {
                position,
                speaker,
                voice_id: self.roster.voice_id(speaker).to_string(),
                text: text.to_string(),
            });
        }

        Ok(DialogueScript::new(lines, raw.scratchpad))
    }
}

/// Either every line carries a position or none does. Given positions must
/// cover `0..len` exactly once.
fn order_by_position(lines: Vec<RawDialogueLine>) -> Result<Vec<RawDialogueLine>, ValidationError> {
    if lines.iter().all(|line| line.position.is_none()) {
        return Ok(lines);
    }

    let len = lines.len();
    let mut slots: Vec<Option<RawDialogueLine>> = vec![None; len];

    for (index, line) in lines.into_iter().enumerate() {
        let position = line
            .position
            .ok_or(ValidationError::MissingPosition { index })?;

        if position >= len {
            return Err(ValidationError::PositionOutOfRange { position, len });
        }
        if slots[position].is_some() {
            return Err(ValidationError::DuplicatePosition { position });
        }
        slots[position] = Some(line);
    }

    // n distinct positions below n leave no empty slot
    Ok(slots.into_iter().flatten().collect())
}
