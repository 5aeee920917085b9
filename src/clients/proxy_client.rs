use axum::http::{HeaderMap, HeaderValue};
use axum::response::Response;
use hyper::Body;
use log::info;
use once_cell::sync::Lazy;
use unicase::Ascii;

use crate::models::errors::ProxyError;

/// Forwards GET requests to allow-listed upstream hosts and relays the
/// response with permissive CORS headers, so browser pages can reach the
/// upstream APIs without tripping over their CORS policies.
pub struct ProxyClient {
    client: reqwest::Client,
    allowed_hosts: Vec<String>,
}

impl ProxyClient {
    pub fn new(client: reqwest::Client, allowed_hosts: Vec<String>) -> Self {
        Self { client, allowed_hosts }
    }

    pub fn is_allowed(&self, url: &reqwest::Url) -> bool {
        match url.host_str() {
            Some(host) => self.allowed_hosts.iter()
                .any(|allowed| Ascii::new(allowed.as_str()) == Ascii::new(host)),
            None => false,
        }
    }

    pub async fn forward(&self, url: reqwest::Url) -> Result<Response<Body>, ProxyError> {
        let response = self.client.get(url)
            .header("Accept", "application/json")
            .send().await
            .map_err(|err| ProxyError { message: err.to_string() })?;

        info!("GET {} {}", response.url(), response.status());
        self.response_to_reply(response)
    }

    fn response_to_reply(&self, response: reqwest::Response) -> Result<Response<Body>, ProxyError> {
        let mut builder = Response::builder();
        for (k, v) in self.remove_hop_headers(response.headers()).iter() {
            builder = builder.header(k, v);
        }
        let status = response.status();
        let body = Body::wrap_stream(response.bytes_stream());
        builder
            .status(status)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "GET, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(body)
            .map_err(|err| ProxyError { message: err.to_string() })
    }

    fn is_hop_header(&self, header_name: &str) -> bool {
        static HOP_HEADERS: Lazy<Vec<Ascii<&'static str>>> = Lazy::new(|| {
            vec![
                Ascii::new("Connection"),
                Ascii::new("Keep-Alive"),
                Ascii::new("Proxy-Authenticate"),
                Ascii::new("Proxy-Authorization"),
                Ascii::new("Te"),
                Ascii::new("Trailers"),
                Ascii::new("Transfer-Encoding"),
                Ascii::new("Upgrade"),
            ]
        });

        HOP_HEADERS.iter().any(|h| h == &header_name)
    }

    fn remove_hop_headers(&self, headers: &HeaderMap<HeaderValue>) -> HeaderMap<HeaderValue> {
        headers
            .iter()
            .filter_map(|(k, v)| {
                if self.is_hop_header(k.as_str()) {
                    None
                } else {
                    Some((k.clone(), v.clone()))
                }
            })
            .collect()
    }
}
