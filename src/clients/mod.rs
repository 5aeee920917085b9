pub mod kitsu_client;
pub mod mangadex_client;
pub mod proxy_client;
