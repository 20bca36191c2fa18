use tracing::error;
use warp::http::StatusCode;
use warp::reply::{json, with_status};

use crate::api::chat::{ChatRequest, ChatResponse};
use crate::image::ImageDelivery;
use crate::orchestrator::Relay;

pub async fn chat(
    request: ChatRequest,
    relay: Relay,
    delivery: ImageDelivery,
) -> Result<impl warp::Reply, warp::Rejection> {
    match relay.handle_turn(&request.message).await {
        Ok(turn) => {
            let body = ChatResponse::from_turn(&turn, delivery);
            Ok(with_status(json(&body), StatusCode::OK))
        }
        Err(err) => {
            error!(error = %err, "chat turn failed");
            Ok(with_status(
                json(&ChatResponse::failure()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}
