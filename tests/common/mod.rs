use std::sync::Arc;

use mangadom::app_state::AppState;
use mangadom::clients::kitsu_client::KitsuClient;
use mangadom::clients::mangadex_client::MangadexClient;
use mangadom::clients::proxy_client::ProxyClient;
use mangadom::config::app_config::AppConfig;

pub fn test_state(
    kitsu_url: String,
    mangadex_url: String,
    proxy_allowed_hosts: Vec<String>,
) -> AppState {
    let config = Arc::new(AppConfig {
        port: 0,
        kitsu_url: kitsu_url.clone(),
        mangadex_url: mangadex_url.clone(),
        uploads_url: "https://uploads.mangadex.org".to_string(),
        user_agent: "Mangadom/1.0".to_string(),
        page_size: 20,
        proxy_allowed_hosts: proxy_allowed_hosts.clone(),
    });

    let http = reqwest::Client::new();
    AppState {
        kitsu: Arc::new(KitsuClient::new(http.clone(), kitsu_url)),
        mangadex: Arc::new(MangadexClient::new(
            http.clone(),
            mangadex_url,
            config.uploads_url.clone(),
        )),
        proxy_client: Arc::new(ProxyClient::new(http, proxy_allowed_hosts)),
        config,
    }
}
