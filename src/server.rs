use std::net::SocketAddr;
use std::sync::Arc;

use log::info;

use crate::app_state::AppState;
use crate::clients::kitsu_client::KitsuClient;
use crate::clients::mangadex_client::MangadexClient;
use crate::clients::proxy_client::ProxyClient;
use crate::config::app_config::AppConfig;
use crate::routes;

pub async fn start(config: Arc<AppConfig>) {
    let http = reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        .build()
        .expect("can't build http client");

    let state = AppState {
        kitsu: Arc::new(KitsuClient::new(http.clone(), config.kitsu_url.clone())),
        mangadex: Arc::new(MangadexClient::new(
            http.clone(),
            config.mangadex_url.clone(),
            config.uploads_url.clone(),
        )),
        proxy_client: Arc::new(ProxyClient::new(http, config.proxy_allowed_hosts.clone())),
        config: config.clone(),
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = routes::router(state);

    info!("listening on http://{}", addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.expect("can't listen for shutdown signal");
        })
        .await
        .expect("server error");
}
