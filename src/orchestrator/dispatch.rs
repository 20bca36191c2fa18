use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use super::classify::{route, ImageSettings};
use crate::emitter::image_cache::ImageCacheEmitter;
use crate::image::ImageRef;
use crate::vendor::ImageGenerator;

/// An image together with the prompt it was made for; the prompt doubles as its
/// cache key.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchedImage {
    pub prompt: String,
    pub image: ImageRef,
}

/// Generates one image per prompt, one request at a time and in prompt order.
/// Cached inline images are reused; hosted urls are always regenerated. Failed
/// prompts are logged and left out.
pub async fn dispatch_images(
    generator: &dyn ImageGenerator,
    cache: &ImageCacheEmitter,
    settings: &ImageSettings,
    prompts: Vec<String>,
) -> Vec<DispatchedImage> {
    stream::iter(prompts)
        .filter_map(|prompt| render(generator, cache, settings, prompt))
        .collect()
        .await
}

async fn render(
    generator: &dyn ImageGenerator,
    cache: &ImageCacheEmitter,
    settings: &ImageSettings,
    prompt: String,
) -> Option<DispatchedImage> {
    if let Some(image) = cache.reusable(&prompt) {
        debug!(%prompt, "inline image reused from cache");
        return Some(DispatchedImage { prompt, image });
    }

    let request = route(&prompt, settings);
    match generator.generate(&request).await {
        Ok(image) => {
            debug!(%prompt, model = %request.model, "image generated");
            cache.insert(prompt.clone(), image.clone());
            Some(DispatchedImage { prompt, image })
        }
        Err(err) => {
            warn!(%prompt, model = %request.model, error = %err, "image generation failed, skipping");
            None
        }
    }
}
