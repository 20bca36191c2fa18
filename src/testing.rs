//! In-process stand-ins for the provider, shared by the unit tests.

use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::VendorError;
use crate::image::ImageRef;
use crate::vendor::requests::assistant::{Run, RunStatus, ThreadMessage};
use crate::vendor::requests::images::ImageRequest;
use crate::vendor::{Assistant, ImageGenerator};

/// Answers every poll from a status script; once the script runs out the run stays
/// `in_progress`.
pub struct ScriptedAssistant {
    statuses: Mutex<VecDeque<RunStatus>>,
    messages: Vec<ThreadMessage>,
    fail_submit: bool,
    fail_poll: bool,
    fail_listing: bool,
    submitted: Mutex<Vec<String>>,
    polls: Mutex<u32>,
}

impl ScriptedAssistant {
    /// A run that completes on the first poll with `reply` as the assistant message.
    pub fn new(reply: &str) -> Self {
        ScriptedAssistant {
            statuses: Mutex::new(VecDeque::from(vec![RunStatus::Completed])),
            messages: vec![assistant_message(reply)],
            fail_submit: false,
            fail_poll: false,
            fail_listing: false,
            submitted: Mutex::new(Vec::new()),
            polls: Mutex::new(0),
        }
    }

    pub fn with_statuses(self, statuses: Vec<RunStatus>) -> Self {
        *self.statuses.lock().unwrap() = statuses.into();
        self
    }

    pub fn with_messages(mut self, messages: Vec<ThreadMessage>) -> Self {
        self.messages = messages;
        self
    }

    pub fn failing_submit(mut self) -> Self {
        self.fail_submit = true;
        self
    }

    pub fn failing_poll(mut self) -> Self {
        self.fail_poll = true;
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub fn submitted(&self) -> Vec<String> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn polls(&self) -> u32 {
        *self.polls.lock().unwrap()
    }
}

pub fn assistant_message(text: &str) -> ThreadMessage {
    ThreadMessage {
        id: "msg_assistant".to_string(),
        role: "assistant".to_string(),
        content: json!([{"type": "text", "text": {"value": text, "annotations": []}}]),
    }
}

fn refused(endpoint: &'static str) -> VendorError {
    VendorError::Status {
        endpoint,
        status: 503,
        body: "unavailable".to_string(),
    }
}

#[async_trait]
impl Assistant for ScriptedAssistant {
    async fn create_thread(&self) -> Result<String, VendorError> {
        Ok("thread_1".to_string())
    }

    async fn add_message(&self, _thread_id: &str, content: &str) -> Result<(), VendorError> {
        if self.fail_submit {
            return Err(refused("messages.create"));
        }
        self.submitted.lock().unwrap().push(content.to_string());
        Ok(())
    }

    async fn create_run(&self, _thread_id: &str) -> Result<Run, VendorError> {
        Ok(Run {
            id: "run_1".to_string(),
            status: RunStatus::Queued,
        })
    }

    async fn retrieve_run(&self, _thread_id: &str, run_id: &str) -> Result<Run, VendorError> {
        *self.polls.lock().unwrap() += 1;
        if self.fail_poll {
            return Err(refused("runs.retrieve"));
        }
        let status = self
            .statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(RunStatus::InProgress);
        Ok(Run {
            id: run_id.to_string(),
            status,
        })
    }

    async fn list_messages(&self, _thread_id: &str) -> Result<Vec<ThreadMessage>, VendorError> {
        if self.fail_listing {
            return Err(refused("messages.list"));
        }
        Ok(self.messages.clone())
    }
}

/// Returns `https://img.test/<prompt>` (or, when inline, the prompt bytes as png) for
/// every request unless the prompt contains one of the failure markers.
#[derive(Default)]
pub struct RecordingImages {
    fail_on: Vec<String>,
    inline: bool,
    requests: Mutex<Vec<ImageRequest>>,
}

impl RecordingImages {
    pub fn failing_on(marker: &str) -> Self {
        RecordingImages {
            fail_on: vec![marker.to_string()],
            ..Default::default()
        }
    }

    pub fn inline() -> Self {
        RecordingImages {
            inline: true,
            ..Default::default()
        }
    }

    pub fn bytes_for(prompt: &str) -> ImageRef {
        ImageRef::inline("image/png", prompt.as_bytes().to_vec())
    }

    pub fn url_for(prompt: &str) -> ImageRef {
        ImageRef::remote(format!("https://img.test/{}", prompt.replace(' ', "-")))
    }

    pub fn requests(&self) -> Vec<ImageRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for RecordingImages {
    async fn generate(&self, request: &ImageRequest) -> Result<ImageRef, VendorError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.fail_on.iter().any(|m| request.prompt.contains(m.as_str())) {
            return Err(refused("images.generate"));
        }
        if self.inline {
            return Ok(Self::bytes_for(&request.prompt));
        }
        Ok(Self::url_for(&request.prompt))
    }
}
