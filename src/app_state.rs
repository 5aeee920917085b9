use std::sync::Arc;

use crate::clients::kitsu_client::KitsuClient;
use crate::clients::mangadex_client::MangadexClient;
use crate::clients::proxy_client::ProxyClient;
use crate::config::app_config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub kitsu: Arc<KitsuClient>,
    pub mangadex: Arc<MangadexClient>,
    pub proxy_client: Arc<ProxyClient>,
}
