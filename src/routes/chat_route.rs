use warp::filters::BoxedFilter;
use warp::{path, Filter};

use crate::api::chat::ChatRequest;

const BODY_LIMIT: u64 = 1024 * 100;

fn path_prefix() -> BoxedFilter<()> {
    path!("chat" / ..).boxed()
}

pub fn chat() -> BoxedFilter<(ChatRequest,)> {
    let body = warp::body::content_length_limit(BODY_LIMIT).and(warp::body::json());

    warp::post()
        .and(path_prefix())
        .and(warp::path::end())
        .and(body)
        .boxed()
}
