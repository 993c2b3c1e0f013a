//! Prompt templates.
//!
//! The story prompt is derived from the salon facts by plain text
//! substitution; each placeholder occurs exactly once in the template, so
//! every user-supplied value lands in the prompt verbatim exactly once.
//! The image prompt composes the per-slide English fragments with the
//! protagonist description that keeps the character consistent across
//! panels.

use hachikoma_core::{ProtagonistInfo, SalonInfo, SlideData};

/// Template for the story generation request.
///
/// Instructs the model to act as an Instagram manga-ad creator for salons
/// and to answer with a single JSON object in the documented shape.
const STORY_PROMPT: &str = r#"
あなたは美容室集客専門の凄腕Instagram漫画広告クリエイターです。
ターゲット層の共感を呼び、サロンへの来店を強く促す「8枚構成の漫画ストーリー」を作成してください。

# 入力データ
サロン名: {salonName}
サロンの強み: {strengths}
その他の特徴: {features}

# 指示
1. サロンの強みに基づいて、ターゲットとなる詳細なペルソナ（年齢、職業、悩み）を定義してください。
2. そのターゲットに合致する「髪の悩みを抱える主人公」を設定してください。
3. 以下の「共感型ストーリー構成」に従って、必ず【8枚】のスライドを作成してください。
   - 1-2枚目: 共感・問題提起 (読者に「これは私のことだ！」と思わせる)
   - 3-4枚目: 問題の深掘り (悩みの深刻さ、感情的なつらさ)
   - 5枚目: 解決策の提示 (サロン・スタイリストとの出会い)
   - 6枚目: 変化・施術 (施術プロセス、感動体験)
   - 7枚目: ビフォーアフター・喜び (劇的な変化、自信の回復)
   - 8枚目: 行動喚起 (予約への誘導)

# 出力フォーマット
以下のスキーマに適合する有効なJSONオブジェクトのみを出力してください。Markdownのコードブロックは不要です。

{
  "target": { "age": string, "persona": string, "mainConcern": string },          // 全て日本語
  "protagonist": { "name": string, "age": string, "job": string,
                   "appearance": string, "hairProblem": string },                 // 全て日本語
  "slides": [
    {
      "id": number,          // 1 to 8
      "title": string,       // 日本語
      "composition": string, // カメラアングルや背景（シンプル・パステル調）
      "characters": string,  // キャラクターのポーズ・表情。主人公の外見特徴と一致させること。
      "dialogue": string,    // 日本語のセリフ。吹き出し用。20文字以内。
      "narration": string,   // 日本語のナレーション。
      "emotion": string,     // 感情タグ (例: 悲しみ, 喜び, 期待)
      "imagePrompt": string  // 画像生成用プロンプト (英語)。
    }
  ]
}

# Image Prompt (imagePrompt) の重要制約
- 必ず【英語】で記述すること。
- スタイル指定を含めること: "Japanese Shoujo Manga style, pastel colors, soft lighting, 1:1 aspect ratio, high quality illustration".
- キャラクターの一貫性を保つため、全スライドのプロンプトに主人公の具体的な外見特徴（髪型、髪色、服装）を含めること。
"#;

/// Render the story prompt from the salon facts.
///
/// # Examples
///
/// ```
/// use hachikoma_core::SalonInfo;
/// use hachikoma_narrative::render_story_prompt;
///
/// let salon = SalonInfo::builder()
///     .name("Salon A".to_string())
///     .strengths(vec!["髪質改善".to_string()])
///     .build()
///     .unwrap();
///
/// let prompt = render_story_prompt(&salon);
/// assert!(prompt.contains("サロン名: Salon A"));
/// ```
pub fn render_story_prompt(salon: &SalonInfo) -> String {
    STORY_PROMPT
        .replace("{salonName}", &salon.name)
        .replace("{strengths}", &salon.strengths.join(", "))
        .replace("{features}", &salon.features.join(", "))
}

/// Render the composite image prompt for one slide.
///
/// Four blocks: base style, protagonist description (identical across all
/// slides to anchor character consistency), scene, and the speech-bubble
/// text-rendering instruction carrying the dialogue verbatim.
pub fn render_image_prompt(slide: &SlideData, protagonist: &ProtagonistInfo) -> String {
    let base_style =
        "Japanese Shoujo Manga style, pastel colors, soft watercolor touch, high quality, 1:1 square ratio.";
    let character = format!(
        "Character: {}, {} years old female, {} style.",
        protagonist.appearance, protagonist.age, protagonist.job
    );
    let scene = format!(
        "Scene: {}. Composition: {}. Emotion: {}.",
        slide.image_prompt, slide.composition, slide.emotion
    );
    let text_instruction = format!(
        "Integrate a speech bubble with the following Japanese text exactly: \"{}\".\nEnsure the text is legible, dark color on white bubble.",
        slide.dialogue
    );

    format!("{base_style}\n{character}\n{scene}\n{text_instruction}")
}

/// Appended to the image prompt when a reference image rides along.
pub(crate) const CONSISTENCY_SUFFIX: &str =
    " \n(IMPORTANT: Maintain consistency with the character and style in the provided reference image.)";
