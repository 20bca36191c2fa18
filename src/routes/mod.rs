pub mod chat_route;
pub mod image_route;

use warp::{Filter, Rejection, Reply};

use crate::emitter::image_cache::ImageCache;
use crate::handlers::rejection::recover;
use crate::image::ImageDelivery;
use crate::orchestrator::Relay;

/// `POST /chat` and `GET /image`, open to any origin.
pub fn api(
    relay: Relay,
    delivery: ImageDelivery,
    cache: ImageCache,
    http: reqwest::Client,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "POST"])
        .allow_headers(vec!["content-type"]);

    crate::chat!(relay, delivery)
        .or(crate::image!(cache, http))
        .recover(recover)
        .with(cors)
        .with(warp::trace::request())
}
