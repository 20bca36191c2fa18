use serde::{Deserialize, Serialize};

use crate::image::ImageDelivery;
use crate::orchestrator::dispatch::DispatchedImage;
use crate::orchestrator::TurnResult;

pub const SERVER_ERROR_REPLY: &str = "Произошла ошибка на сервере.";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// `imageUrl` is the first of `imageUrls`, kept for clients that show one image.
/// The failure shape has no `imageUrl` at all.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ChatResponse {
    #[serde(rename_all = "camelCase")]
    Reply {
        reply: String,
        image_urls: Vec<String>,
        image_url: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Failure {
        reply: &'static str,
        image_urls: Vec<String>,
    },
}

impl ChatResponse {
    pub fn from_turn(turn: &TurnResult, delivery: ImageDelivery) -> Self {
        let render = |d: &DispatchedImage| delivery.render(&d.prompt, &d.image);

        ChatResponse::Reply {
            reply: turn.reply.clone(),
            image_urls: turn.images.iter().map(render).collect(),
            image_url: turn.primary_image().map(render),
        }
    }

    pub fn failure() -> Self {
        ChatResponse::Failure {
            reply: SERVER_ERROR_REPLY,
            image_urls: Vec::new(),
        }
    }
}

#[macro_export]
macro_rules! chat {
    ($relay:expr, $delivery:expr) => {
        $crate::routes::chat_route::chat()
            .and($crate::orchestrator::with_relay($relay))
            .and($crate::image::with_delivery($delivery))
            .and_then($crate::handlers::chat_handler::chat)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{proxy_id, ImageRef};
    use serde_json::json;

    #[test]
    fn missing_message_reads_as_empty() {
        let request: ChatRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(request.message, "");
    }

    #[test]
    fn replies_carry_all_images_and_the_first() {
        let turn = TurnResult {
            reply: "Plan.".to_string(),
            images: vec![
                DispatchedImage {
                    prompt: "one".to_string(),
                    image: ImageRef::remote("https://cdn.test/1.png"),
                },
                DispatchedImage {
                    prompt: "two".to_string(),
                    image: ImageRef::inline("image/png", &b"abc"[..]),
                },
            ],
        };

        let body = serde_json::to_value(ChatResponse::from_turn(&turn, ImageDelivery::Direct))
            .unwrap();

        assert_eq!(
            body,
            json!({
                "reply": "Plan.",
                "imageUrls": ["https://cdn.test/1.png", "data:image/png;base64,YWJj"],
                "imageUrl": "https://cdn.test/1.png"
            })
        );
    }

    #[test]
    fn proxied_replies_link_the_first_prompt() {
        let turn = TurnResult {
            reply: String::new(),
            images: vec![
                DispatchedImage {
                    prompt: "zone press".to_string(),
                    image: ImageRef::inline("image/png", &b"abc"[..]),
                },
                DispatchedImage {
                    prompt: "fast break".to_string(),
                    image: ImageRef::remote("https://cdn.test/2.png"),
                },
            ],
        };

        let body = serde_json::to_value(ChatResponse::from_turn(&turn, ImageDelivery::Proxy))
            .unwrap();

        assert_eq!(body["imageUrl"], format!("/image?id={}", proxy_id("zone press")));
        assert_eq!(body["imageUrls"][0], body["imageUrl"]);
        assert_eq!(body["imageUrls"][1], format!("/image?id={}", proxy_id("fast break")));
    }

    #[test]
    fn empty_image_list_serialises_a_null_image_url() {
        let turn = TurnResult {
            reply: String::new(),
            images: Vec::new(),
        };

        let body = serde_json::to_value(ChatResponse::from_turn(&turn, ImageDelivery::Proxy))
            .unwrap();

        assert_eq!(body, json!({"reply": "", "imageUrls": [], "imageUrl": null}));
    }

    #[test]
    fn failures_have_the_fixed_shape() {
        let body = serde_json::to_value(ChatResponse::failure()).unwrap();
        assert_eq!(body, json!({"reply": SERVER_ERROR_REPLY, "imageUrls": []}));
    }
}
