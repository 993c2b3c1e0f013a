//! Tests for the chained batch sequencer: ordering, gap-fill, halting.

mod test_utils;

use hachikoma_core::{GenerateRequest, GenerateResponse, ImageData, ImageSet, Input, MediaSource, Output};
use hachikoma_error::{GeminiErrorKind, HachikomaErrorKind, StoryErrorKind};
use hachikoma_narrative::MangaPipeline;
use test_utils::{MockDriver, MockResponse, make_story};

/// The inline reference image attached to a request, if any.
fn reference_bytes(req: &GenerateRequest) -> Option<Vec<u8>> {
    req.messages()
        .iter()
        .flat_map(|msg| &msg.content)
        .find_map(|input| match input {
            Input::Image {
                source: MediaSource::Binary(bytes),
                ..
            } => Some(bytes.clone()),
            _ => None,
        })
}

fn image_success(payload: u8) -> MockResponse {
    MockResponse::Success(GenerateResponse {
        outputs: vec![Output::Image {
            mime: Some("image/png".to_string()),
            data: vec![payload],
        }],
    })
}

#[tokio::test]
async fn full_chain_generates_eight_images_in_order() -> anyhow::Result<()> {
    let story = make_story();
    let pipeline = MangaPipeline::new(MockDriver::new_unique_images());
    let mut images = ImageSet::new();

    pipeline.generate_all(&story, &mut images).await?;

    assert_eq!(images.len(), 8);
    for slide_id in 1..=8 {
        // Call n answered payload [n], so slide n holds [n]
        assert_eq!(images.get(slide_id).unwrap().data, vec![slide_id]);
    }
    assert_eq!(pipeline.driver().call_count(), 8);
    Ok(())
}

#[tokio::test]
async fn each_request_references_the_previous_slides_image() -> anyhow::Result<()> {
    let story = make_story();
    let pipeline = MangaPipeline::new(MockDriver::new_unique_images());
    let mut images = ImageSet::new();

    pipeline.generate_all(&story, &mut images).await?;

    let requests = pipeline.driver().requests();
    assert_eq!(reference_bytes(&requests[0]), None, "slide 1 has no reference");
    for (index, request) in requests.iter().enumerate().skip(1) {
        assert_eq!(
            reference_bytes(request),
            Some(vec![index as u8]),
            "slide {} must reference slide {}'s image",
            index + 1,
            index
        );
    }
    Ok(())
}

#[tokio::test]
async fn reference_requests_carry_the_consistency_instruction() -> anyhow::Result<()> {
    let story = make_story();
    let pipeline = MangaPipeline::new(MockDriver::new_unique_images());
    let mut images = ImageSet::new();

    pipeline.generate_all(&story, &mut images).await?;

    let requests = pipeline.driver().requests();
    let text_of = |req: &GenerateRequest| -> String {
        req.messages()
            .iter()
            .flat_map(|msg| &msg.content)
            .find_map(|input| match input {
                Input::Text(text) => Some(text.clone()),
                _ => None,
            })
            .unwrap()
    };

    assert!(!text_of(&requests[0]).contains("reference image"));
    assert!(text_of(&requests[1]).contains("reference image"));
    Ok(())
}

#[tokio::test]
async fn second_run_performs_zero_requests() -> anyhow::Result<()> {
    let story = make_story();
    let pipeline = MangaPipeline::new(MockDriver::new_unique_images());
    let mut images = ImageSet::new();

    pipeline.generate_all(&story, &mut images).await?;
    assert_eq!(pipeline.driver().call_count(), 8);

    let before = images.clone();
    pipeline.generate_all(&story, &mut images).await?;

    assert_eq!(pipeline.driver().call_count(), 8, "gap-fill issues no requests");
    assert_eq!(images, before);
    Ok(())
}

#[tokio::test]
async fn gap_fill_skips_existing_and_chains_off_them() -> anyhow::Result<()> {
    let story = make_story();
    let pipeline = MangaPipeline::new(MockDriver::new_unique_images());

    let mut images = ImageSet::new();
    for slide_id in 1..=3 {
        images.insert(slide_id, ImageData::new("image/png", vec![100 + slide_id]));
    }

    pipeline.generate_all(&story, &mut images).await?;

    // Slides 4..=8 only
    assert_eq!(pipeline.driver().call_count(), 5);
    assert_eq!(images.len(), 8);

    // Preexisting entries were not regenerated
    for slide_id in 1..=3 {
        assert_eq!(images.get(slide_id).unwrap().data, vec![100 + slide_id]);
    }

    // Slide 4's request chains off slide 3's preexisting image
    let requests = pipeline.driver().requests();
    assert_eq!(reference_bytes(&requests[0]), Some(vec![103]));
    Ok(())
}

#[tokio::test]
async fn failure_halts_the_chain_and_keeps_prior_results() {
    let story = make_story();
    let responses = vec![
        image_success(1),
        image_success(2),
        image_success(3),
        image_success(4),
        MockResponse::Error(GeminiErrorKind::HttpError {
            status_code: 400,
            message: "bad request".to_string(),
        }),
    ];
    let pipeline = MangaPipeline::new(MockDriver::new_sequence(responses));
    let mut images = ImageSet::new();

    let err = pipeline.generate_all(&story, &mut images).await.unwrap_err();

    match err.kind() {
        HachikomaErrorKind::Story(e) => {
            assert!(matches!(e.kind, StoryErrorKind::SlideGeneration { slide: 5, .. }))
        }
        other => panic!("expected story error, got {other:?}"),
    }

    // Slides 1-4 intact, 5-8 never attempted
    assert_eq!(images.len(), 4);
    for slide_id in 1..=4 {
        assert!(images.contains(slide_id));
    }
    assert_eq!(pipeline.driver().call_count(), 5);
}

#[tokio::test]
async fn missing_image_part_halts_with_slide_context() {
    let story = make_story();
    // Text came back, but no inline image part
    let responses = vec![MockResponse::Success(GenerateResponse {
        outputs: vec![Output::Text("sorry, no can do".to_string())],
    })];
    let pipeline = MangaPipeline::new(MockDriver::new_sequence(responses));
    let mut images = ImageSet::new();

    let err = pipeline.generate_all(&story, &mut images).await.unwrap_err();
    match err.kind() {
        HachikomaErrorKind::Story(e) => {
            assert!(matches!(e.kind, StoryErrorKind::SlideGeneration { slide: 1, .. }))
        }
        other => panic!("expected story error, got {other:?}"),
    }
    assert!(images.is_empty());
}

#[tokio::test]
async fn first_inline_image_part_wins() -> anyhow::Result<()> {
    let story = make_story();
    let responses = vec![MockResponse::Success(GenerateResponse {
        outputs: vec![
            Output::Text("commentary".to_string()),
            Output::Image {
                mime: None,
                data: vec![7],
            },
            Output::Image {
                mime: Some("image/webp".to_string()),
                data: vec![8],
            },
        ],
    })];
    let pipeline = MangaPipeline::new(MockDriver::new_sequence(responses));

    let image = pipeline
        .generate_slide(&story.slides[0], &story.protagonist, None)
        .await?;

    assert_eq!(image.data, vec![7]);
    // Unspecified MIME defaults to PNG
    assert_eq!(image.mime, "image/png");
    Ok(())
}

#[tokio::test]
async fn regenerate_overwrites_existing_image() -> anyhow::Result<()> {
    let story = make_story();
    let pipeline = MangaPipeline::new(MockDriver::new_unique_images());
    let mut images = ImageSet::new();
    images.insert(3, ImageData::new("image/png", vec![103]));

    let image = pipeline
        .regenerate_slide(&story, 3, None, &mut images)
        .await?;

    assert_eq!(pipeline.driver().call_count(), 1, "gap-fill does not apply");
    assert_eq!(images.get(3).unwrap(), &image);
    assert_ne!(images.get(3).unwrap().data, vec![103]);
    Ok(())
}

#[tokio::test]
async fn regenerate_uses_explicit_reference_over_sequencer_state() -> anyhow::Result<()> {
    let story = make_story();
    let pipeline = MangaPipeline::new(MockDriver::new_unique_images());
    let mut images = ImageSet::new();
    images.insert(2, ImageData::new("image/png", vec![102]));

    let explicit = ImageData::new("image/png", vec![42]);
    pipeline
        .regenerate_slide(&story, 3, Some(&explicit), &mut images)
        .await?;

    let requests = pipeline.driver().requests();
    assert_eq!(reference_bytes(&requests[0]), Some(vec![42]));
    Ok(())
}

#[tokio::test]
async fn regenerate_falls_back_to_adjacent_slide() -> anyhow::Result<()> {
    let story = make_story();
    let pipeline = MangaPipeline::new(MockDriver::new_unique_images());
    let mut images = ImageSet::new();
    images.insert(2, ImageData::new("image/png", vec![102]));

    pipeline.regenerate_slide(&story, 3, None, &mut images).await?;

    let requests = pipeline.driver().requests();
    assert_eq!(reference_bytes(&requests[0]), Some(vec![102]));
    Ok(())
}

#[tokio::test]
async fn regenerate_unknown_slide_is_rejected() {
    let story = make_story();
    let pipeline = MangaPipeline::new(MockDriver::new_unique_images());
    let mut images = ImageSet::new();

    let err = pipeline
        .regenerate_slide(&story, 9, None, &mut images)
        .await
        .unwrap_err();

    match err.kind() {
        HachikomaErrorKind::Story(e) => assert_eq!(e.kind, StoryErrorKind::UnknownSlide(9)),
        other => panic!("expected story error, got {other:?}"),
    }
    assert_eq!(pipeline.driver().call_count(), 0);
}
