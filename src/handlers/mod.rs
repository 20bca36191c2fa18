pub mod chat_handler;
pub mod image_handler;
pub mod rejection;

use warp::http::StatusCode;
use warp::reply::{with_status, Response};
use warp::Reply;

pub fn not_found() -> Response {
    with_status("not found", StatusCode::NOT_FOUND).into_response()
}
