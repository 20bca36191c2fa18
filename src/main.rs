use std::sync::Arc;
use tracing::info;

use assistant_relay::config::Config;
use assistant_relay::emitter::image_cache::create_image_cache;
use assistant_relay::orchestrator::Orchestrator;
use assistant_relay::routes;
use assistant_relay::vendor::openai::OpenAI;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;

    let openai = Arc::new(OpenAI::new(&config.openai)?);
    let cache = create_image_cache(config.cache_capacity);
    let relay = Arc::new(Orchestrator::new(
        openai.clone(),
        openai,
        cache.clone(),
        config.images.clone(),
        config.poll,
    ));
    let http = reqwest::Client::builder()
        .timeout(config.openai.timeout)
        .build()?;

    let routes = routes::api(relay, config.delivery, cache, http);

    info!(addr = %config.bind_addr, delivery = ?config.delivery, "assistant relay listening");
    warp::serve(routes).run(config.bind_addr).await;
    Ok(())
}
