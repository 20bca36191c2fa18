use serde::Deserialize;
use std::convert::Infallible;
use warp::Filter;

#[derive(Debug, Deserialize)]
pub struct ImageQuery {
    #[serde(default)]
    pub id: String,
}

/// Client used to stream remote images through `GET /image`.
pub fn with_http(
    client: reqwest::Client,
) -> impl Filter<Extract = (reqwest::Client,), Error = Infallible> + Clone {
    warp::any().map(move || client.clone())
}

#[macro_export]
macro_rules! image {
    ($cache:expr, $http:expr) => {
        $crate::routes::image_route::image()
            .and($crate::emitter::image_cache::with_cache($cache))
            .and($crate::api::image::with_http($http))
            .and_then($crate::handlers::image_handler::serve)
    };
}
