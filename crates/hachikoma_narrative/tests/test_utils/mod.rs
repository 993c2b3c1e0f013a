//! Test utilities: a scripted mock driver and story fixtures.

// Not every test binary exercises every helper.
#![allow(dead_code)]

use async_trait::async_trait;
use hachikoma_core::{
    GenerateRequest, GenerateResponse, Output, ProtagonistInfo, SlideData, StoryData, TargetInfo,
};
use hachikoma_error::{GeminiError, GeminiErrorKind, HachikomaResult};
use hachikoma_interface::HachikomaDriver;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// One scripted response.
pub enum MockResponse {
    /// Return this response
    Success(GenerateResponse),
    /// Fail with this error kind
    Error(GeminiErrorKind),
}

enum MockBehavior {
    /// Pop scripted responses in order; panics when exhausted (test bug).
    Sequence(Mutex<VecDeque<MockResponse>>),
    /// Answer every request with a text part followed by an image part
    /// whose payload is the 1-based call number. Lets tests trace which
    /// generated image a later request carries as its reference.
    UniqueImages(AtomicUsize),
}

/// Mock driver recording every request it receives.
pub struct MockDriver {
    behavior: MockBehavior,
    calls: Mutex<Vec<GenerateRequest>>,
}

impl MockDriver {
    pub fn new_sequence(responses: Vec<MockResponse>) -> Self {
        Self {
            behavior: MockBehavior::Sequence(Mutex::new(responses.into())),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn new_success_text(text: &str) -> Self {
        Self::new_sequence(vec![MockResponse::Success(GenerateResponse {
            outputs: vec![Output::Text(text.to_string())],
        })])
    }

    pub fn new_error(kind: GeminiErrorKind) -> Self {
        Self::new_sequence(vec![MockResponse::Error(kind)])
    }

    pub fn new_unique_images() -> Self {
        Self {
            behavior: MockBehavior::UniqueImages(AtomicUsize::new(0)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HachikomaDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> HachikomaResult<GenerateResponse> {
        self.calls.lock().unwrap().push(req.clone());

        match &self.behavior {
            MockBehavior::Sequence(responses) => {
                let next = responses
                    .lock()
                    .unwrap()
                    .pop_front()
                    .expect("mock driver ran out of scripted responses");
                match next {
                    MockResponse::Success(response) => Ok(response),
                    MockResponse::Error(kind) => Err(GeminiError::new(kind).into()),
                }
            }
            MockBehavior::UniqueImages(counter) => {
                let call = counter.fetch_add(1, Ordering::SeqCst) + 1;
                Ok(GenerateResponse {
                    outputs: vec![
                        Output::Text(format!("panel {call}")),
                        Output::Image {
                            mime: Some("image/png".to_string()),
                            data: vec![call as u8],
                        },
                    ],
                })
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// A valid eight-slide story fixture.
pub fn make_story() -> StoryData {
    StoryData {
        target: TargetInfo {
            age: "30代前半".to_string(),
            persona: "忙しいワーキングマザー".to_string(),
            main_concern: "広がるくせ毛".to_string(),
        },
        protagonist: ProtagonistInfo {
            name: "美咲".to_string(),
            age: "32".to_string(),
            job: "事務職".to_string(),
            appearance: "黒髪セミロング、ナチュラルメイク".to_string(),
            hair_problem: "湿気で広がるくせ毛".to_string(),
        },
        slides: (1..=8).map(make_slide).collect(),
    }
}

/// One slide fixture with distinguishable field values.
pub fn make_slide(id: u8) -> SlideData {
    SlideData {
        id,
        title: format!("第{id}話"),
        composition: format!("composition {id}"),
        characters: format!("characters {id}"),
        dialogue: format!("セリフ{id}"),
        narration: Some(format!("ナレーション{id}")),
        emotion: "期待".to_string(),
        image_prompt: format!("panel prompt {id}"),
    }
}
