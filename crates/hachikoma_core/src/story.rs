//! Generated story types.
//!
//! Field names are renamed to camelCase on the wire to match the JSON shape
//! the story model is instructed to produce.

use serde::{Deserialize, Serialize};

/// The persona the advertisement targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetInfo {
    /// Age range, free text (e.g. "30代前半")
    pub age: String,
    /// Persona label (e.g. "忙しいワーキングマザー")
    pub persona: String,
    /// Primary hair concern
    #[serde(rename = "mainConcern")]
    pub main_concern: String,
}

/// The story's protagonist.
///
/// The appearance text is repeated into every image prompt to anchor
/// character consistency across panels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtagonistInfo {
    /// Name
    pub name: String,
    /// Age, free text
    pub age: String,
    /// Occupation
    pub job: String,
    /// Appearance description (hair style, color, clothing)
    pub appearance: String,
    /// The hair problem driving the story
    #[serde(rename = "hairProblem")]
    pub hair_problem: String,
}

/// One narrative beat of the eight-panel story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideData {
    /// Slide id, 1 through 8, unique and dense
    pub id: u8,
    /// Panel title
    pub title: String,
    /// Camera angle and background description
    pub composition: String,
    /// Character pose and expression
    pub characters: String,
    /// Speech-bubble dialogue (short)
    pub dialogue: String,
    /// Optional narration text
    #[serde(default)]
    pub narration: Option<String>,
    /// Emotion tag (e.g. 悲しみ, 喜び)
    pub emotion: String,
    /// English image-generation prompt fragment
    #[serde(rename = "imagePrompt")]
    pub image_prompt: String,
}

/// The complete generated narrative.
///
/// Produced by the story requester from the model's JSON output and never
/// mutated afterward. The "exactly 8 slides, ids 1..=8 in order" invariant
/// is enforced by the caller after parsing, not here.
///
/// # Examples
///
/// ```
/// use hachikoma_core::StoryData;
///
/// let json = r#"{
///     "target": {"age": "30代", "persona": "会社員", "mainConcern": "くせ毛"},
///     "protagonist": {"name": "美咲", "age": "32", "job": "事務職",
///                     "appearance": "黒髪ロング", "hairProblem": "広がるくせ毛"},
///     "slides": []
/// }"#;
///
/// let story: StoryData = serde_json::from_str(json).unwrap();
/// assert_eq!(story.protagonist.name, "美咲");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryData {
    /// Target persona
    pub target: TargetInfo,
    /// Protagonist description
    pub protagonist: ProtagonistInfo,
    /// The eight narrative beats, ordered 1..=8
    pub slides: Vec<SlideData>,
}

impl StoryData {
    /// Slide with the given id, if present.
    pub fn slide(&self, slide_id: u8) -> Option<&SlideData> {
        self.slides.iter().find(|slide| slide.id == slide_id)
    }
}
