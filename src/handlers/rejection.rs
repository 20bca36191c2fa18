use tracing::warn;
use warp::filters::body::BodyDeserializeError;
use warp::http::StatusCode;
use warp::reject::{LengthRequired, PayloadTooLarge, UnsupportedMediaType};
use warp::reply::{json, with_status, Response};
use warp::{Rejection, Reply};

use super::not_found;
use crate::api::chat::ChatResponse;

pub async fn recover(rejection: Rejection) -> Result<Response, Rejection> {
    if rejection.is_not_found() {
        return Ok(not_found());
    }

    match unreadable_body(&rejection) {
        Some(status) => {
            warn!(?rejection, %status, "unreadable chat body");
            let body = json(&ChatResponse::failure());
            Ok(with_status(body, status).into_response())
        }
        None => Err(rejection),
    }
}

/// Body rejections from `POST /chat`; these still answer with the chat error shape.
fn unreadable_body(rejection: &Rejection) -> Option<StatusCode> {
    if rejection.find::<BodyDeserializeError>().is_some() {
        Some(StatusCode::BAD_REQUEST)
    } else if rejection.find::<PayloadTooLarge>().is_some() {
        Some(StatusCode::PAYLOAD_TOO_LARGE)
    } else if rejection.find::<UnsupportedMediaType>().is_some() {
        Some(StatusCode::UNSUPPORTED_MEDIA_TYPE)
    } else if rejection.find::<LengthRequired>().is_some() {
        Some(StatusCode::LENGTH_REQUIRED)
    } else {
        None
    }
}
