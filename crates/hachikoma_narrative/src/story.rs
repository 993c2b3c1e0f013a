//! Story parsing and validation.
//!
//! Parsing and validation are deliberately separate: the requester (in
//! [`crate::MangaPipeline`]) is a pure transport + parse boundary, and the
//! caller enforces the eight-slide invariant on the parsed result before
//! anything downstream sees it.

use hachikoma_core::{SLIDE_COUNT, SalonInfo, StoryData};
use hachikoma_error::{StoryError, StoryErrorKind};

/// Extract the JSON document from a model response.
///
/// The story model is asked for raw JSON, but responses occasionally arrive
/// wrapped in a markdown code block or with stray prose around the object.
/// Strategies, in order: fenced ```json block, balanced top-level object,
/// the trimmed response as-is.
///
/// # Examples
///
/// ```
/// use hachikoma_narrative::extract_json;
///
/// let response = "Here you go:\n```json\n{\"slides\": []}\n```\n";
/// assert_eq!(extract_json(response), "{\"slides\": []}");
///
/// let response = "{\"slides\": []}";
/// assert_eq!(extract_json(response), "{\"slides\": []}");
/// ```
pub fn extract_json(response: &str) -> &str {
    if let Some(inner) = extract_from_code_block(response) {
        return inner;
    }
    if let Some(object) = extract_balanced(response, '{', '}') {
        return object;
    }
    response.trim()
}

fn extract_from_code_block(text: &str) -> Option<&str> {
    let start = text
        .find("```json")
        .map(|idx| idx + "```json".len())
        .or_else(|| text.find("```").map(|idx| idx + 3))?;
    let rest = &text[start..];
    let end = rest.find("```")?;
    Some(rest[..end].trim())
}

/// Slice out the first balanced `open`..`close` region.
///
/// Does not account for brackets inside JSON strings; good enough for the
/// shapes the story model produces.
fn extract_balanced(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let mut depth = 0usize;
    for (idx, ch) in text[start..].char_indices() {
        if ch == open {
            depth += 1;
        } else if ch == close {
            depth -= 1;
            if depth == 0 {
                return Some(&text[start..start + idx + ch.len_utf8()]);
            }
        }
    }
    None
}

/// Check the salon facts required before any request is issued.
///
/// # Errors
///
/// Returns error if the name is blank or no strengths were supplied.
pub fn validate_salon(salon: &SalonInfo) -> Result<(), StoryError> {
    if salon.name.trim().is_empty() {
        return Err(StoryError::new(StoryErrorKind::EmptySalonName));
    }
    if salon.strengths.is_empty() {
        return Err(StoryError::new(StoryErrorKind::EmptyStrengths));
    }
    Ok(())
}

/// Enforce the story shape invariant: exactly 8 slides, ids 1..=8 in order.
///
/// A violation is a hard failure; the story never reaches the image stage.
///
/// # Errors
///
/// Returns error on a wrong slide count or on any id out of sequence
/// (which also covers duplicates and gaps).
pub fn validate_story(story: &StoryData) -> Result<(), StoryError> {
    if story.slides.len() != SLIDE_COUNT {
        return Err(StoryError::new(StoryErrorKind::SlideCount {
            expected: SLIDE_COUNT,
            actual: story.slides.len(),
        }));
    }
    for (position, slide) in story.slides.iter().enumerate() {
        let expected = position as u8 + 1;
        if slide.id != expected {
            return Err(StoryError::new(StoryErrorKind::SlideNumbering {
                expected_max: SLIDE_COUNT as u8,
                found: slide.id,
                position,
            }));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_extraction_stops_at_matching_brace() {
        let text = "prefix {\"a\": {\"b\": 1}} suffix";
        assert_eq!(extract_balanced(text, '{', '}'), Some("{\"a\": {\"b\": 1}}"));
    }

    #[test]
    fn unterminated_object_yields_none() {
        assert_eq!(extract_balanced("{\"a\": 1", '{', '}'), None);
    }

    #[test]
    fn plain_fence_without_language_tag() {
        let text = "```\n{\"a\": 1}\n```";
        assert_eq!(extract_from_code_block(text), Some("{\"a\": 1}"));
    }
}
