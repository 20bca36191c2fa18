//! Drives one chat turn: submit the message as an assistant run, wait for the run,
//! read the reply, turn its `@image:` directives into generated images.

pub mod classify;
pub mod directive;
pub mod dispatch;
pub mod poll;
pub mod reply;

use std::convert::Infallible;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use warp::Filter;

use crate::emitter::image_cache::ImageCache;
use crate::error::{TurnError, VendorError};
use crate::vendor::requests::assistant::JobOutcome;
use crate::vendor::{Assistant, ImageGenerator};
use classify::ImageSettings;
use directive::{extract_prompts, strip_directives};
use dispatch::{dispatch_images, DispatchedImage};
use poll::{wait_for_run, PollPolicy};
use reply::latest_assistant_reply;

pub type Relay = Arc<Orchestrator>;

#[derive(Debug, Clone, PartialEq)]
pub struct TurnResult {
    /// Reply with directive lines removed; empty when the turn only asked for images.
    pub reply: String,
    pub images: Vec<DispatchedImage>,
}

impl TurnResult {
    pub fn primary_image(&self) -> Option<&DispatchedImage> {
        self.images.first()
    }
}

pub struct Orchestrator {
    assistant: Arc<dyn Assistant>,
    generator: Arc<dyn ImageGenerator>,
    cache: ImageCache,
    images: ImageSettings,
    poll: PollPolicy,
}

impl Orchestrator {
    pub fn new(
        assistant: Arc<dyn Assistant>,
        generator: Arc<dyn ImageGenerator>,
        cache: ImageCache,
        images: ImageSettings,
        poll: PollPolicy,
    ) -> Self {
        Orchestrator {
            assistant,
            generator,
            cache,
            images,
            poll,
        }
    }

    #[instrument(skip_all, fields(turn_id = %Uuid::new_v4()))]
    pub async fn handle_turn(&self, message: &str) -> Result<TurnResult, TurnError> {
        let (thread_id, run_id) = self.submit(message).await?;

        let status = wait_for_run(self.assistant.as_ref(), &thread_id, &run_id, self.poll).await?;
        if status.outcome() != Some(JobOutcome::Succeeded) {
            warn!(%thread_id, %run_id, %status, "run did not succeed");
            return Err(TurnError::JobEnded(status));
        }

        let messages = self.assistant.list_messages(&thread_id).await?;
        let raw = latest_assistant_reply(&messages);

        // the assistant does not always follow the directive convention on a first
        // message, so the user's own directives are honoured as well
        let mut prompts = extract_prompts(&raw);
        if prompts.is_empty() {
            prompts = extract_prompts(message);
        }
        let reply = strip_directives(&raw);

        let images = dispatch_images(
            self.generator.as_ref(),
            &self.cache,
            &self.images,
            prompts,
        )
        .await;

        info!(%thread_id, images = images.len(), "turn complete");
        Ok(TurnResult { reply, images })
    }

    /// Thread, message and run; any failure fails the turn.
    async fn submit(&self, message: &str) -> Result<(String, String), VendorError> {
        let thread_id = self.assistant.create_thread().await?;
        self.assistant.add_message(&thread_id, message).await?;
        let run = self.assistant.create_run(&thread_id).await?;
        Ok((thread_id, run.id))
    }
}

pub fn with_relay(relay: Relay) -> impl Filter<Extract = (Relay,), Error = Infallible> + Clone {
    warp::any().map(move || relay.clone())
}
