//! The two-stage generation pipeline.

use crate::prompts::{CONSISTENCY_SUFFIX, render_image_prompt, render_story_prompt};
use crate::story::extract_json;
use hachikoma_core::{
    GenerateRequest, ImageData, ImageSet, Input, MediaSource, Message, Modality, ProtagonistInfo,
    SalonInfo, SlideData, StoryData, ThinkingLevel,
};
use hachikoma_error::{
    GeminiError, GeminiErrorKind, HachikomaResult, StoryError, StoryErrorKind,
};
use hachikoma_interface::HachikomaDriver;
use tracing::{debug, error, info, instrument};

/// Drives story and image generation against a model backend.
///
/// The pipeline owns no session state. The accumulated image set is passed
/// in by the caller and mutated one slide at a time, so batch generation
/// and manual single-slide regeneration can share it without clobbering
/// each other's entries.
///
/// # Example
///
/// ```rust,ignore
/// use hachikoma_models::GeminiClient;
/// use hachikoma_narrative::{MangaPipeline, validate_story};
/// use hachikoma_core::ImageSet;
///
/// let pipeline = MangaPipeline::new(GeminiClient::new()?)
///     .with_models("gemini-3-flash-preview", "gemini-3-pro-image-preview");
///
/// let story = pipeline.request_story(&salon).await?;
/// validate_story(&story)?;
///
/// let mut images = ImageSet::new();
/// pipeline.generate_all(&story, &mut images).await?;
/// ```
pub struct MangaPipeline<D: HachikomaDriver> {
    driver: D,
    story_model: Option<String>,
    image_model: Option<String>,
}

impl<D: HachikomaDriver> MangaPipeline<D> {
    /// Create a pipeline using the driver's default model for both stages.
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            story_model: None,
            image_model: None,
        }
    }

    /// Select the models used for the story and image stages.
    pub fn with_models(mut self, story_model: impl Into<String>, image_model: impl Into<String>) -> Self {
        self.story_model = Some(story_model.into());
        self.image_model = Some(image_model.into());
        self
    }

    /// The underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Request the eight-beat story for the given salon facts.
    ///
    /// Issues one text-generation call with a low thinking-effort hint and
    /// JSON output mode, then parses the response into a [`StoryData`].
    /// This is a pure transport + parse boundary: salon facts are assumed
    /// already checked ([`crate::validate_salon`]) and the slide-count
    /// invariant is the caller's to enforce ([`crate::validate_story`]).
    ///
    /// # Errors
    ///
    /// `EmptyResponse` when no text output came back, `MalformedResponse`
    /// when the text does not parse as a story, and any transport error
    /// surviving the driver's retry handling.
    #[instrument(skip(self, salon), fields(salon = %salon.name))]
    pub async fn request_story(&self, salon: &SalonInfo) -> HachikomaResult<StoryData> {
        let prompt = render_story_prompt(salon);
        let request = GenerateRequest::builder()
            .messages(vec![Message::user_text(prompt)])
            .model(self.story_model.clone())
            .thinking_level(Some(ThinkingLevel::Low))
            .response_mime_type(Some("application/json".to_string()))
            .build()
            .map_err(|e| StoryError::new(StoryErrorKind::RequestAssembly(e.to_string())))?;

        let response = self.driver.generate(&request).await?;

        let text = response
            .first_text()
            .ok_or_else(|| GeminiError::new(GeminiErrorKind::EmptyResponse))?;

        let story: StoryData = serde_json::from_str(extract_json(text))
            .map_err(|e| GeminiError::new(GeminiErrorKind::MalformedResponse(e.to_string())))?;

        info!(slides = story.slides.len(), "Story generated");
        Ok(story)
    }

    /// Generate the image for one slide.
    ///
    /// When a reference image is supplied it is attached as an inline data
    /// part and the prompt gains the consistency instruction; otherwise the
    /// request is text-only. The first response part carrying inline image
    /// data wins; interleaved text parts are ignored.
    ///
    /// # Errors
    ///
    /// `NoImageReturned` when the response contains no inline image part.
    /// That condition is not retried here; the caller may re-invoke.
    #[instrument(skip(self, slide, protagonist, reference), fields(slide = slide.id, with_reference = reference.is_some()))]
    pub async fn generate_slide(
        &self,
        slide: &SlideData,
        protagonist: &ProtagonistInfo,
        reference: Option<&ImageData>,
    ) -> HachikomaResult<ImageData> {
        let mut prompt = render_image_prompt(slide, protagonist);
        if reference.is_some() {
            prompt.push_str(CONSISTENCY_SUFFIX);
        }

        let mut content = vec![Input::Text(prompt)];
        if let Some(image) = reference {
            content.push(Input::Image {
                mime: Some(image.mime.clone()),
                source: MediaSource::Binary(image.data.clone()),
            });
        }

        let request = GenerateRequest::builder()
            .messages(vec![Message {
                role: hachikoma_core::Role::User,
                content,
            }])
            .model(self.image_model.clone())
            .response_modalities(Some(vec![Modality::Text, Modality::Image]))
            .build()
            .map_err(|e| StoryError::new(StoryErrorKind::RequestAssembly(e.to_string())))?;

        let response = self.driver.generate(&request).await?;

        let (mime, data) = response
            .first_image()
            .ok_or_else(|| GeminiError::new(GeminiErrorKind::NoImageReturned { slide: slide.id }))?;

        debug!(slide = slide.id, bytes = data.len(), "Slide image generated");
        Ok(ImageData::with_default_mime(mime, data.to_vec()))
    }

    /// Generate images for every slide that lacks one, in slide order.
    ///
    /// Each successful image becomes the reference for the next slide, so
    /// panel N's look derives from panel N-1's rendered output rather than
    /// from text alone. Slides that already have an image are skipped but
    /// still anchor the chain (gap-fill policy: re-running this after a
    /// partial run completes the set without regenerating anything).
    ///
    /// # Errors
    ///
    /// The first failure stops the chain; no further slides are attempted
    /// and already-stored images remain intact. The error carries the id
    /// of the slide that failed.
    #[instrument(skip(self, story, images), fields(existing = images.len()))]
    pub async fn generate_all(
        &self,
        story: &StoryData,
        images: &mut ImageSet,
    ) -> HachikomaResult<()> {
        let mut last_image: Option<ImageData> = None;

        for slide in &story.slides {
            if let Some(existing) = images.get(slide.id) {
                last_image = Some(existing.clone());
                continue;
            }

            match self
                .generate_slide(slide, &story.protagonist, last_image.as_ref())
                .await
            {
                Ok(image) => {
                    images.insert(slide.id, image.clone());
                    last_image = Some(image);
                }
                Err(e) => {
                    error!(slide = slide.id, error = %e, "Chain halted");
                    return Err(StoryError::new(StoryErrorKind::SlideGeneration {
                        slide: slide.id,
                        message: e.to_string(),
                    })
                    .into());
                }
            }
        }

        info!(total = images.len(), "Image set complete");
        Ok(())
    }

    /// Regenerate one slide's image, bypassing the gap-fill rule.
    ///
    /// Always generates, replacing any existing entry for that slide only.
    /// An explicitly supplied reference wins; otherwise the previous
    /// slide's current image (if any) is used.
    ///
    /// # Errors
    ///
    /// `UnknownSlide` when the id is not part of the story, plus anything
    /// [`Self::generate_slide`] can return.
    #[instrument(skip(self, story, reference, images), fields(slide = slide_id))]
    pub async fn regenerate_slide(
        &self,
        story: &StoryData,
        slide_id: u8,
        reference: Option<&ImageData>,
        images: &mut ImageSet,
    ) -> HachikomaResult<ImageData> {
        let slide = story
            .slide(slide_id)
            .ok_or_else(|| StoryError::new(StoryErrorKind::UnknownSlide(slide_id)))?;

        let reference: Option<ImageData> = reference.cloned().or_else(|| {
            if slide_id > 1 {
                images.get(slide_id - 1).cloned()
            } else {
                None
            }
        });

        let image = self
            .generate_slide(slide, &story.protagonist, reference.as_ref())
            .await?;
        images.insert(slide_id, image.clone());
        Ok(image)
    }
}
