use hyper::{Body as HyperBody, Client, Method, Request, StatusCode, Uri};
use hyper::header::CONTENT_TYPE;
use hyper_tls::HttpsConnector;
use url::Url;

use crate::models::scenario::{HttpMethod, ScenarioConfig};

pub type HttpsClient = Client<HttpsConnector<hyper::client::HttpConnector>>;

pub fn build_client() -> HttpsClient {
    let https = HttpsConnector::new();
    Client::builder().build::<_, HyperBody>(https)
}

/// Send one request described by the scenario and read the full response
/// body. The caller owns timing and timeout; this only classifies errors.
pub async fn send_request(
    client: &HttpsClient,
    config: &ScenarioConfig,
) -> Result<(StatusCode, Vec<u8>), String> {
    let url = Url::parse(&config.target).map_err(|e| e.to_string())?;
    let uri: Uri = url.as_str().parse::<Uri>().map_err(|e| e.to_string())?;

    let method = match config.method {
        HttpMethod::GET => Method::GET,
        HttpMethod::POST => Method::POST,
        HttpMethod::PUT => Method::PUT,
        HttpMethod::DELETE => Method::DELETE,
        HttpMethod::PATCH => Method::PATCH,
        HttpMethod::HEAD => Method::HEAD,
        HttpMethod::OPTIONS => Method::OPTIONS,
    };

    let mut req_builder = Request::builder().method(method).uri(uri);

    let body = match &config.body {
        Some(json) => {
            req_builder = req_builder.header(CONTENT_TYPE, "application/json");
            let json_string = serde_json::to_string(json).map_err(|e| e.to_string())?;
            HyperBody::from(json_string)
        }
        None => HyperBody::empty(),
    };

    if let Some(headers) = &config.headers {
        for (key, value) in headers.iter() {
            req_builder = req_builder.header(key.as_str(), value.as_str());
        }
    }

    let request = req_builder.body(body).map_err(|e| e.to_string())?;

    match client.request(request).await {
        Ok(resp) => {
            let status = resp.status();
            // Latency is measured to the last body byte, so drain it here.
            let bytes = hyper::body::to_bytes(resp.into_body())
                .await
                .map_err(|e| e.to_string())?;
            Ok((status, bytes.to_vec()))
        }
        Err(e) => {
            let msg = if e.is_connect() {
                "Connection refused or host unreachable"
            } else if e.is_timeout() {
                "Timeout"
            } else if e.is_closed() {
                "Connection closed unexpectedly"
            } else {
                "Unknown network error"
            };
            Err(msg.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::scenario::HttpMethod;

    fn scenario(target: &str) -> ScenarioConfig {
        serde_json::from_value(serde_json::json!({
            "name": "t",
            "target": target,
            "method": "POST",
            "vus": 1,
            "duration": 1
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn rejects_unparseable_target() {
        let client = build_client();
        let config = scenario("not a url");
        let err = send_request(&client, &config).await.unwrap_err();
        assert!(!err.is_empty());
    }

    #[tokio::test]
    async fn connection_refused_maps_to_readable_error() {
        let client = build_client();
        // Reserved port on localhost with nothing listening.
        let config = scenario("http://127.0.0.1:1/");
        let err = send_request(&client, &config).await.unwrap_err();
        assert_eq!(err, "Connection refused or host unreachable");
    }

    #[test]
    fn method_is_carried_from_config() {
        let config = scenario("http://localhost:8000/");
        assert_eq!(config.method, HttpMethod::POST);
    }
}
