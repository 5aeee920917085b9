use std::sync::Arc;

use log::LevelFilter;

use mangadom::config::app_config::AppConfig;
use mangadom::server;

#[tokio::main]
async fn main() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = AppConfig::new().expect("invalid configuration");
    server::start(Arc::new(config)).await
}
