use tracing::warn;
use warp::http::header::{HeaderValue, CONTENT_TYPE};
use warp::http::StatusCode;
use warp::hyper::Body;
use warp::reply::{with_status, Response};
use warp::Reply;

use super::not_found;
use crate::api::image::ImageQuery;
use crate::emitter::image_cache::ImageCache;
use crate::image::{key_from_id, ImageRef};

const OCTET_STREAM: &str = "application/octet-stream";

pub async fn serve(
    query: ImageQuery,
    cache: ImageCache,
    http: reqwest::Client,
) -> Result<Response, warp::Rejection> {
    let Some(image) = key_from_id(&query.id).and_then(|key| cache.peek(&key)) else {
        return Ok(not_found());
    };

    match image {
        ImageRef::Inline { content_type, data } => {
            Ok(binary(Body::from(data), content_type.as_bytes()))
        }
        ImageRef::Remote { url } => Ok(proxy(&http, &url).await),
    }
}

async fn proxy(http: &reqwest::Client, url: &str) -> Response {
    let upstream = match http.get(url).send().await.and_then(|r| r.error_for_status()) {
        Ok(upstream) => upstream,
        Err(err) => {
            warn!(%url, error = %err, "image fetch failed");
            return with_status("image unavailable", StatusCode::BAD_GATEWAY).into_response();
        }
    };

    let content_type = upstream
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .map(|value| value.as_bytes().to_vec())
        .unwrap_or_else(|| OCTET_STREAM.as_bytes().to_vec());

    binary(Body::wrap_stream(upstream.bytes_stream()), &content_type)
}

fn binary(body: Body, content_type: &[u8]) -> Response {
    let content_type = HeaderValue::from_bytes(content_type)
        .unwrap_or_else(|_| HeaderValue::from_static(OCTET_STREAM));

    let mut response = Response::new(body);
    response.headers_mut().insert(CONTENT_TYPE, content_type);
    response
}
