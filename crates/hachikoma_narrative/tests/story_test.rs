//! Tests for the story requester: request shape, parsing, failure modes.

mod test_utils;

use hachikoma_core::{Input, Output, SalonInfo, ThinkingLevel};
use hachikoma_core::GenerateResponse;
use hachikoma_error::{GeminiErrorKind, HachikomaErrorKind};
use hachikoma_narrative::MangaPipeline;
use test_utils::{MockDriver, MockResponse, make_story};

fn salon() -> SalonInfo {
    SalonInfo::builder()
        .name("Salon A".to_string())
        .strengths(vec!["髪質改善".to_string()])
        .build()
        .unwrap()
}

fn story_json() -> String {
    serde_json::to_string(&make_story()).unwrap()
}

#[tokio::test]
async fn parses_story_from_json_response() -> anyhow::Result<()> {
    let driver = MockDriver::new_success_text(&story_json());
    let pipeline = MangaPipeline::new(driver);

    let story = pipeline.request_story(&salon()).await?;

    assert_eq!(story.slides.len(), 8);
    assert_eq!(story.protagonist.name, "美咲");
    assert_eq!(story.slides[0].id, 1);
    assert_eq!(pipeline.driver().call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn accepts_code_fenced_json() -> anyhow::Result<()> {
    let fenced = format!("```json\n{}\n```", story_json());
    let driver = MockDriver::new_success_text(&fenced);
    let pipeline = MangaPipeline::new(driver);

    let story = pipeline.request_story(&salon()).await?;
    assert_eq!(story.slides.len(), 8);
    Ok(())
}

#[tokio::test]
async fn request_carries_json_mode_and_low_thinking() -> anyhow::Result<()> {
    let pipeline = MangaPipeline::new(MockDriver::new_success_text(&story_json()))
        .with_models("story-model", "image-model");

    pipeline.request_story(&salon()).await?;

    let requests = pipeline.driver().requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];

    assert_eq!(request.model().as_deref(), Some("story-model"));
    assert_eq!(*request.thinking_level(), Some(ThinkingLevel::Low));
    assert_eq!(
        request.response_mime_type().as_deref(),
        Some("application/json")
    );
    assert!(request.response_modalities().is_none());

    // Single user message whose text embeds the salon facts
    assert_eq!(request.messages().len(), 1);
    match &request.messages()[0].content[0] {
        Input::Text(text) => {
            assert!(text.contains("Salon A"));
            assert!(text.contains("髪質改善"));
        }
        other => panic!("expected text input, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn missing_text_output_is_empty_response() {
    // An image-only response carries no story text
    let driver = MockDriver::new_sequence(vec![MockResponse::Success(GenerateResponse {
        outputs: vec![Output::Image {
            mime: Some("image/png".to_string()),
            data: vec![1],
        }],
    })]);
    let pipeline = MangaPipeline::new(driver);

    let err = pipeline.request_story(&salon()).await.unwrap_err();
    match err.kind() {
        HachikomaErrorKind::Gemini(e) => assert_eq!(e.kind, GeminiErrorKind::EmptyResponse),
        other => panic!("expected Gemini error, got {other:?}"),
    }
}

#[tokio::test]
async fn unparseable_text_is_malformed_response() {
    let driver = MockDriver::new_success_text("ご希望のストーリーはこちらです");
    let pipeline = MangaPipeline::new(driver);

    let err = pipeline.request_story(&salon()).await.unwrap_err();
    match err.kind() {
        HachikomaErrorKind::Gemini(e) => {
            assert!(matches!(e.kind, GeminiErrorKind::MalformedResponse(_)))
        }
        other => panic!("expected Gemini error, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_error_propagates() {
    let driver = MockDriver::new_error(GeminiErrorKind::HttpError {
        status_code: 400,
        message: "bad request".to_string(),
    });
    let pipeline = MangaPipeline::new(driver);

    let err = pipeline.request_story(&salon()).await.unwrap_err();
    match err.kind() {
        HachikomaErrorKind::Gemini(e) => {
            assert!(matches!(e.kind, GeminiErrorKind::HttpError { status_code: 400, .. }))
        }
        other => panic!("expected Gemini error, got {other:?}"),
    }
}
