use serde_json::Value;

pub fn assert_podcast_summary(summary: &Value, expected_lines: u64, expected_transcript: &str) {
    assert!(summary.get("id").and_then(|v| v.as_str()).is_some());
    assert!(summary.get("created_at").is_some());
    assert!(summary.get("expires_at").is_some());
    assert_eq!(
        summary.get("line_count").and_then(|v| v.as_u64()),
        Some(expected_lines)
    );
    assert_eq!(
        summary.get("transcript").and_then(|v| v.as_str()),
        Some(expected_transcript)
    );
    assert!(summary.get("audio_size_bytes").and_then(|v| v.as_u64()).is_some());
}

pub fn podcast_id(summary: &Value) -> String {
    summary
        .get("id")
        .and_then(|v| v.as_str())
        .expect("Missing podcast id")
        .to_string()
}
