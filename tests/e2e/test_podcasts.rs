use crate::e2e::helpers;

use helpers::assertions::{assert_podcast_summary, podcast_id};
use helpers::fakes::FAIL_MARKER;
use helpers::TestContext;
use hyper::StatusCode;
use serde_json::json;
use test_context::test_context;

fn script_body(lines: &[(&str, &str)]) -> serde_json::Value {
    let dialogue: Vec<_> = lines
        .iter()
        .enumerate()
        .map(|(position, (speaker, text))| {
            json!({ "position": position, "speaker": speaker, "text": text })
        })
        .collect();
    json!({ "script": { "dialogue": dialogue } })
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_create_podcast_from_script(ctx: &TestContext) {
    let body = script_body(&[("host", "Hi"), ("guest", "Hello")]);

    let response = ctx.client.post("/api/podcasts", &body).await.unwrap();

    response.assert_status(StatusCode::CREATED);
    let summary = response.body.as_ref().unwrap();
    assert_podcast_summary(summary, 2, "Host: Hi\n\nGuest: Hello");
    assert_eq!(ctx.speech.calls(), 2);
    assert_eq!(ctx.artifact_repo.count().await.unwrap(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_audio_in_script_order(ctx: &TestContext) {
    // Earlier lines finish last with the fake provider
    let body = script_body(&[
        ("host", "one"),
        ("guest", "two"),
        ("host", "three"),
        ("guest", "four"),
    ]);
    let created = ctx.client.post("/api/podcasts", &body).await.unwrap();
    created.assert_status(StatusCode::CREATED);
    let id = podcast_id(created.body.as_ref().unwrap());

    let response = ctx
        .client
        .get(&format!("/api/podcasts/{}/audio", id))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/mpeg")
        .assert_header_exists("x-expires-at");
    assert_eq!(response.body_bytes, b"<one><two><three><four>".to_vec());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_transcript_and_metadata(ctx: &TestContext) {
    let body = script_body(&[("a", "Hi"), ("b", "Hello")]);
    let created = ctx.client.post("/api/podcasts", &body).await.unwrap();
    let id = podcast_id(created.body.as_ref().unwrap());

    let transcript = ctx
        .client
        .get(&format!("/api/podcasts/{}/transcript", id))
        .await
        .unwrap();
    transcript.assert_status(StatusCode::OK);
    assert_eq!(transcript.text(), "Host: Hi\n\nGuest: Hello");

    let metadata = ctx
        .client
        .get(&format!("/api/podcasts/{}", id))
        .await
        .unwrap();
    metadata.assert_status(StatusCode::OK);
    let metadata = metadata.body.as_ref().unwrap();
    assert_eq!(
        metadata.get("audio_url").and_then(|v| v.as_str()),
        Some(format!("/api/podcasts/{}/audio", id).as_str())
    );
    assert_eq!(
        metadata.get("content_type").and_then(|v| v.as_str()),
        Some("audio/mpeg")
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_create_podcast_from_text(ctx: &TestContext) {
    let body = json!({ "text": "<p>Rust ownership explained.</p>" });

    let response = ctx.client.post("/api/podcasts", &body).await.unwrap();

    response.assert_status(StatusCode::CREATED);
    assert_podcast_summary(
        response.body.as_ref().unwrap(),
        2,
        "Host: Welcome to the show\n\nGuest: Glad to be here",
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_invalid_script_without_synthesis(ctx: &TestContext) {
    let body = script_body(&[("host", "Hi"), ("narrator", "Hello")]);

    let response = ctx.client.post("/api/podcasts", &body).await.unwrap();

    response
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY)
        .assert_error_message("narrator");
    assert_eq!(ctx.speech.calls(), 0);
    assert_eq!(ctx.artifact_repo.count().await.unwrap(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_empty_script(ctx: &TestContext) {
    let body = json!({ "script": { "dialogue": [] } });

    let response = ctx.client.post("/api/podcasts", &body).await.unwrap();

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(ctx.speech.calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_require_exactly_one_input(ctx: &TestContext) {
    let neither = ctx.client.post("/api/podcasts", &json!({})).await.unwrap();
    neither.assert_status(StatusCode::BAD_REQUEST);

    let mut both = script_body(&[("host", "Hi")]);
    both["text"] = json!("some text");
    let both = ctx.client.post("/api/podcasts", &both).await.unwrap();
    both.assert_status(StatusCode::BAD_REQUEST);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_oversized_text(ctx: &TestContext) {
    let body = json!({ "text": "a".repeat(100_001) });

    let response = ctx.client.post("/api/podcasts", &body).await.unwrap();

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_count_text_limit_in_characters(ctx: &TestContext) {
    // 100,000 characters but 300,000 bytes
    let at_limit = json!({ "text": "語".repeat(100_000) });
    let response = ctx.client.post("/api/podcasts", &at_limit).await.unwrap();
    response.assert_status(StatusCode::CREATED);

    let over_limit = json!({ "text": "語".repeat(100_001) });
    let response = ctx.client.post("/api/podcasts", &over_limit).await.unwrap();
    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_store_nothing_when_one_line_fails(ctx: &TestContext) {
    let failing = format!("{} here", FAIL_MARKER);
    let body = script_body(&[
        ("host", "one"),
        ("guest", failing.as_str()),
        ("host", "three"),
    ]);

    let response = ctx.client.post("/api/podcasts", &body).await.unwrap();

    response
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error_message("line 1");
    // Every call settles before the request is rejected
    assert_eq!(ctx.speech.calls(), 3);
    assert_eq!(ctx.artifact_repo.count().await.unwrap(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_unknown_or_malformed_ids(ctx: &TestContext) {
    let unknown = uuid::Uuid::new_v4();
    let response = ctx
        .client
        .get(&format!("/api/podcasts/{}", unknown))
        .await
        .unwrap();
    response.assert_status(StatusCode::NOT_FOUND);

    let response = ctx.client.get("/api/podcasts/not-an-id/audio").await.unwrap();
    response.assert_status(StatusCode::NOT_FOUND);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_expire_podcasts_after_retention_window(ctx: &TestContext) {
    let body = script_body(&[("host", "Hi")]);
    let created = ctx.client.post("/api/podcasts", &body).await.unwrap();
    let id = podcast_id(created.body.as_ref().unwrap());

    ctx.clock.advance(chrono::Duration::hours(23));
    let response = ctx
        .client
        .get(&format!("/api/podcasts/{}/audio", id))
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    ctx.clock.advance(chrono::Duration::hours(2));
    let response = ctx
        .client
        .get(&format!("/api/podcasts/{}/audio", id))
        .await
        .unwrap();
    response.assert_status(StatusCode::NOT_FOUND);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_echo_request_id(ctx: &TestContext) {
    let response = ctx
        .client
        .get_with_headers("/api/podcasts/missing", &[("x-request-id", "trace-42")])
        .await
        .unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_header("x-request-id", "trace-42");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_issue_request_id_when_none_is_sent(ctx: &TestContext) {
    let response = ctx.client.get("/api/podcasts/missing").await.unwrap();

    let issued = response.header("x-request-id").expect("missing x-request-id");
    assert!(uuid::Uuid::parse_str(issued).is_ok());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_render_malformed_body_as_json_error(ctx: &TestContext) {
    let response = ctx
        .client
        .post_raw("/api/podcasts", r#"{"script":{"dialogue":[{"speaker":"host"}]}}"#)
        .await
        .unwrap();

    response
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY)
        .assert_error_message("text");
    assert!(response
        .header("content-type")
        .is_some_and(|value| value.starts_with("application/json")));
    assert_eq!(ctx.speech.calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_render_invalid_json_as_bad_request(ctx: &TestContext) {
    let response = ctx
        .client
        .post_raw("/api/podcasts", r#"{"script": "#)
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.body.as_ref().and_then(|b| b.get("message")).is_some());
}
