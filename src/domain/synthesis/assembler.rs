use super::coordinator::SynthesisResult;
use super::error::AssemblyError;
use crate::domain::dialogue::{DialogueScript, VoiceRoster};

const TRANSCRIPT_SEPARATOR: &str = "\n\n";
const ID3V2_HEADER_LEN: usize = 10;
const ID3V2_FOOTER_FLAG: u8 = 0x10;

/// Concatenated audio and transcript of one script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledPodcast {
    pub audio: Vec<u8>,
    pub transcript: String,
}

/// Join per-line audio and text in position order.
///
/// Segments are constant-bitrate MP3, whose frames carry no cross-segment
/// state, so they are concatenated byte for byte. Only a leading ID3v2 tag
/// on a later segment is dropped.
///
/// Requires exactly one successful result per line of `script`.
pub fn assemble(
    script: &DialogueScript,
    results: &[SynthesisResult],
    roster: &VoiceRoster,
) -> Result<AssembledPodcast, AssemblyError> {
    let mut segments: Vec<Option<&[u8]>> = vec![None; script.len()];

    for result in results {
        let position = result.position;
        let slot = segments
            .get_mut(position)
            .ok_or(AssemblyError::UnexpectedSegment { position })?;
        if slot.is_some() {
            return Err(AssemblyError::UnexpectedSegment { position });
        }
        let audio = result
            .outcome
            .as_ref()
            .map_err(|_| AssemblyError::FailedSegment { position })?;
        *slot = Some(audio.as_slice());
    }

    let mut audio = Vec::with_capacity(
        segments
            .iter()
            .map(|segment| segment.map_or(0, <[u8]>::len))
            .sum(),
    );
    for (position, segment) in segments.into_iter().enumerate() {
        let segment = segment.ok_or(AssemblyError::MissingSegment { position })?;
        if position == 0 {
            audio.extend_from_slice(segment);
        } else {
            audio.extend_from_slice(strip_id3v2(segment));
        }
    }

    let transcript = script
        .lines()
        .iter()
        .map(|line| format!("{}: {}", roster.label(line.speaker), line.text))
        .collect::<Vec<_>>()
        .join(TRANSCRIPT_SEPARATOR);

    Ok(AssembledPodcast { audio, transcript })
}

/// Skip an ID3v2 tag at the start of `segment`, if there is a well-formed one
fn strip_id3v2(segment: &[u8]) -> &[u8] {
    if segment.len() < ID3V2_HEADER_LEN || !segment.starts_with(b"ID3") {
        return segment;
    }

    let size_bytes = &segment[6..10];
    if size_bytes.iter().any(|b| b & 0x80 != 0) {
        return segment;
    }

    // Syncsafe integer: 7 bits per byte
    let tag_size = size_bytes
        .iter()
        .fold(0usize, |acc, b| (acc << 7) | usize::from(*b));
    let footer = if segment[5] & ID3V2_FOOTER_FLAG != 0 {
        ID3V2_HEADER_LEN
    } else {
        0
    };
    let end = ID3V2_HEADER_LEN + tag_size + footer;

    segment.get(end..).unwrap_or(segment)
}
