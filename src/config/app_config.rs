use std::env;
use std::fs;
use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde_derive::Deserialize;

#[derive(Deserialize, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub kitsu_url: String,
    pub mangadex_url: String,
    pub uploads_url: String,
    pub user_agent: String,
    pub page_size: u32,
    pub proxy_allowed_hosts: Vec<String>,
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = AppConfig::get_config_directory();

        let mut config = Config::builder();
        if config_dir.join("config.yml").exists() {
            config = config.add_source(File::from(config_dir.join("config.yml")))
        }

        config = config.add_source(
            Environment::with_prefix("mangadom")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("proxy_allowed_hosts"),
        )
            .set_default("port", "8230")?
            .set_default("kitsu_url", "https://kitsu.io/api/edge")?
            .set_default("mangadex_url", "https://api.mangadex.org")?
            .set_default("uploads_url", "https://uploads.mangadex.org")?
            .set_default("user_agent", "Mangadom/1.0")?
            .set_default("page_size", "20")?
            .set_default(
                "proxy_allowed_hosts",
                vec!["kitsu.io", "api.mangadex.org", "uploads.mangadex.org"],
            )?;

        config.build()?.try_deserialize()
    }

    fn get_config_directory() -> PathBuf {
        let current_dir = env::current_dir().expect("can't read current dir");
        let dir_env = env::var("MANGADOM_CONF_DIR");
        let config_dir: PathBuf = dir_env.map(PathBuf::from)
            .unwrap_or(current_dir);

        fs::create_dir_all(&config_dir).expect("can't create config directory");

        config_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // one test body: the env var is process-global
    #[test]
    fn proxy_allowed_hosts_default_and_parse_from_a_comma_separated_env_var() {
        let config = AppConfig::new().unwrap();
        assert_eq!(config.port, 8230);
        assert_eq!(
            config.proxy_allowed_hosts,
            vec!["kitsu.io", "api.mangadex.org", "uploads.mangadex.org"]
        );

        env::set_var("MANGADOM_PROXY_ALLOWED_HOSTS", "kitsu.io,uploads.mangadex.org");
        let config = AppConfig::new().unwrap();
        env::remove_var("MANGADOM_PROXY_ALLOWED_HOSTS");

        assert_eq!(
            config.proxy_allowed_hosts,
            vec!["kitsu.io", "uploads.mangadex.org"]
        );
    }
}
