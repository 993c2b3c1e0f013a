//! Command handlers: wire the pipeline end to end.
//!
//! This is the orchestration boundary: pipeline errors are caught here and
//! rendered as Japanese user-facing messages, matching the audience of the
//! generated advertisements.

use hachikoma_core::{ImageSet, SalonInfo, StoryData};
use hachikoma_error::{
    GeminiErrorKind, HachikomaError, HachikomaErrorKind, HachikomaResult, StoryErrorKind,
};
use hachikoma_models::{GeminiClient, HachikomaConfig};
use hachikoma_narrative::{MangaPipeline, validate_salon, validate_story};
use hachikoma_storage::ImageExporter;
use std::path::PathBuf;
use tracing::info;

/// Build the pipeline from configuration and environment.
fn build_pipeline() -> HachikomaResult<MangaPipeline<GeminiClient>> {
    let config = HachikomaConfig::load()?;
    let client = GeminiClient::new()?.with_retry_policy(config.retry.clone().into());
    let pipeline =
        MangaPipeline::new(client).with_models(&config.story_model, &config.image_model);
    Ok(pipeline)
}

/// Request and validate the story for the given salon facts.
async fn generate_story(
    pipeline: &MangaPipeline<GeminiClient>,
    salon: &SalonInfo,
) -> HachikomaResult<StoryData> {
    validate_salon(salon)?;
    info!(salon = %salon.name, "Requesting story");
    let story = pipeline.request_story(salon).await?;
    validate_story(&story)?;
    Ok(story)
}

/// `hachikoma generate` - full pipeline: story, chained images, export.
pub async fn run_generate(
    name: String,
    strengths: Vec<String>,
    features: Vec<String>,
    out_dir: PathBuf,
) -> HachikomaResult<()> {
    let salon = SalonInfo {
        name,
        strengths,
        features,
        staff_image: None,
        salon_image: None,
    };

    let pipeline = build_pipeline()?;
    let story = generate_story(&pipeline, &salon).await?;

    for slide in &story.slides {
        info!(slide = slide.id, title = %slide.title, "Story beat");
    }

    let mut images = ImageSet::new();
    pipeline.generate_all(&story, &mut images).await?;

    let exporter = ImageExporter::new(&out_dir)?;
    let paths = exporter.export_all(&images).await?;

    for path in &paths {
        println!("{}", path.display());
    }
    Ok(())
}

/// `hachikoma story` - story stage only, printed as JSON.
pub async fn run_story(
    name: String,
    strengths: Vec<String>,
    features: Vec<String>,
) -> HachikomaResult<()> {
    let salon = SalonInfo {
        name,
        strengths,
        features,
        staff_image: None,
        salon_image: None,
    };

    let pipeline = build_pipeline()?;
    let story = generate_story(&pipeline, &salon).await?;

    // Validation guarantees the story serializes; fall back to Debug just in case
    match serde_json::to_string_pretty(&story) {
        Ok(json) => println!("{json}"),
        Err(_) => println!("{story:?}"),
    }
    Ok(())
}

/// Render an error as the Japanese message shown to the user.
pub fn user_message(err: &HachikomaError) -> String {
    match err.kind() {
        HachikomaErrorKind::Story(e) => match &e.kind {
            StoryErrorKind::SlideCount { .. } => {
                "生成されたストーリーが8枚構成ではありませんでした。もう一度お試しください。".to_string()
            }
            StoryErrorKind::SlideNumbering { .. } => {
                "生成されたストーリーのスライド番号が不正でした。もう一度お試しください。".to_string()
            }
            StoryErrorKind::SlideGeneration { slide, message } => {
                format!("スライド {slide} の画像生成に失敗しました: {message}")
            }
            StoryErrorKind::UnknownSlide(slide) => {
                format!("スライド {slide} は存在しません。")
            }
            StoryErrorKind::EmptySalonName => "サロン名を入力してください。".to_string(),
            StoryErrorKind::EmptyStrengths => {
                "サロンの強みを1つ以上入力してください。".to_string()
            }
            StoryErrorKind::RequestAssembly(message) => {
                format!("リクエストの作成に失敗しました: {message}")
            }
        },
        HachikomaErrorKind::Gemini(e) => match &e.kind {
            GeminiErrorKind::MissingApiKey => {
                "APIキーが設定されていません。GEMINI_API_KEY を設定してください。".to_string()
            }
            GeminiErrorKind::NoImageReturned { slide } => {
                format!("スライド {slide} の画像が返されませんでした。再生成をお試しください。")
            }
            _ => format!("生成リクエストに失敗しました: {e}"),
        },
        HachikomaErrorKind::Config(e) => format!("設定の読み込みに失敗しました: {e}"),
        HachikomaErrorKind::Storage(e) => format!("画像の保存に失敗しました: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hachikoma_error::StoryError;

    #[test]
    fn slide_count_violation_gets_the_original_wording() {
        let err: HachikomaError = StoryError::new(StoryErrorKind::SlideCount {
            expected: 8,
            actual: 6,
        })
        .into();
        assert_eq!(
            user_message(&err),
            "生成されたストーリーが8枚構成ではありませんでした。もう一度お試しください。"
        );
    }

    #[test]
    fn slide_generation_failure_names_the_slide() {
        let err: HachikomaError = StoryError::new(StoryErrorKind::SlideGeneration {
            slide: 5,
            message: "HTTP 503".to_string(),
        })
        .into();
        assert!(user_message(&err).contains("スライド 5"));
    }
}
