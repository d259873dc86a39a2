use crate::config::PubMedConfig;
use paper_types::{NetworkError, PaperSource};
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use std::time::Duration;

const SEARCH_ENDPOINT: &str = "esearch.fcgi";
const FETCH_ENDPOINT: &str = "efetch.fcgi";
const DATABASE: &str = "pubmed";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    esearchresult: SearchResult,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    idlist: Vec<String>,
}

/// Parse the identifier list out of an `esearch` JSON body
pub fn parse_search_response(body: &str) -> Result<Vec<String>, serde_json::Error> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response.esearchresult.idlist)
}

/// Blocking client for the NCBI E-utilities `esearch` and `efetch` endpoints
pub struct PubMedClient {
    client: Client,
    config: PubMedConfig,
}

impl PubMedClient {
    pub fn new(config: PubMedConfig) -> Result<Self, NetworkError> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder.build().map_err(|e| NetworkError::Request {
            endpoint: config.base_url.clone(),
            message: format!("failed to build HTTP client: {}", e),
        })?;

        Ok(Self { client, config })
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), endpoint)
    }

    pub fn search_params(&self, query: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("db", DATABASE.to_string()),
            ("term", query.to_string()),
            ("retmax", self.config.retmax.to_string()),
            ("retmode", "json".to_string()),
        ];
        self.append_identity(&mut params);
        params
    }

    pub fn fetch_params(&self, ids: &[String]) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("db", DATABASE.to_string()),
            ("id", ids.join(",")),
            ("retmode", "xml".to_string()),
        ];
        self.append_identity(&mut params);
        params
    }

    fn append_identity(&self, params: &mut Vec<(&'static str, String)>) {
        let identity = [
            ("api_key", &self.config.api_key),
            ("tool", &self.config.tool),
            ("email", &self.config.email),
        ];
        for (name, value) in identity {
            if let Some(value) = value.as_ref().filter(|v| !v.is_empty()) {
                params.push((name, value.clone()));
            }
        }
    }

    fn get(
        &self,
        endpoint: &str,
        params: &[(&'static str, String)],
    ) -> Result<Response, NetworkError> {
        let url = self.endpoint_url(endpoint);
        tracing::debug!(%url, "Requesting E-utilities endpoint");

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .map_err(|e| NetworkError::Request {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    fn read_body(endpoint: &str, response: Response) -> Result<String, NetworkError> {
        response.text().map_err(|e| NetworkError::Request {
            endpoint: endpoint.to_string(),
            message: format!("failed to read response body: {}", e),
        })
    }
}

impl PaperSource for PubMedClient {
    fn search(&self, query: &str) -> Result<Vec<String>, NetworkError> {
        let response = self.get(SEARCH_ENDPOINT, &self.search_params(query))?;
        let body = Self::read_body(SEARCH_ENDPOINT, response)?;

        let ids = parse_search_response(&body).map_err(|e| NetworkError::InvalidResponse {
            endpoint: SEARCH_ENDPOINT.to_string(),
            message: e.to_string(),
        })?;

        tracing::debug!(%query, count = ids.len(), "Search completed");
        Ok(ids)
    }

    fn fetch_details(&self, ids: &[String]) -> Result<String, NetworkError> {
        let response = self.get(FETCH_ENDPOINT, &self.fetch_params(ids))?;
        let body = Self::read_body(FETCH_ENDPOINT, response)?;

        tracing::debug!(ids = ids.len(), bytes = body.len(), "Fetched article details");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BASE_URL;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    /// Serve exactly one canned HTTP response on a local port and return its base URL
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 8192];
                let _ = stream.read(&mut buf);
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        format!("http://{}", addr)
    }

    fn client_for(base_url: String) -> PubMedClient {
        PubMedClient::new(PubMedConfig {
            base_url,
            timeout_secs: Some(5),
            ..PubMedConfig::default()
        })
        .unwrap()
    }

    fn param<'p>(params: &'p [(&'static str, String)], name: &str) -> Option<&'p str> {
        params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    #[test]
    fn test_new_reports_failures_as_network_error() {
        let built: Result<PubMedClient, NetworkError> = PubMedClient::new(PubMedConfig::default());
        assert!(built.is_ok());
    }

    #[test]
    fn test_parse_search_response() {
        let body = r#"{"header":{"type":"esearch","version":"0.3"},"esearchresult":{"count":"2","retmax":"2","retstart":"0","idlist":["39000001","39000002"]}}"#;
        assert_eq!(
            parse_search_response(body).unwrap(),
            vec!["39000001".to_string(), "39000002".to_string()]
        );
    }

    #[test]
    fn test_parse_empty_search_response() {
        let body = r#"{"esearchresult":{"count":"0","idlist":[]}}"#;
        assert!(parse_search_response(body).unwrap().is_empty());
    }

    #[test]
    fn test_parse_search_response_missing_idlist() {
        assert!(parse_search_response(r#"{"esearchresult":{"ERROR":"bad"}}"#).is_err());
        assert!(parse_search_response("<html>").is_err());
    }

    #[test]
    fn test_search_params() {
        let client = client_for(DEFAULT_BASE_URL.to_string());
        let params = client.search_params("cancer treatment");

        assert_eq!(param(&params, "db"), Some("pubmed"));
        assert_eq!(param(&params, "term"), Some("cancer treatment"));
        assert_eq!(param(&params, "retmax"), Some("100"));
        assert_eq!(param(&params, "retmode"), Some("json"));
        assert_eq!(param(&params, "api_key"), None);
    }

    #[test]
    fn test_fetch_params_join_ids() {
        let client = client_for(DEFAULT_BASE_URL.to_string());
        let params = client.fetch_params(&["1".to_string(), "2".to_string(), "3".to_string()]);

        assert_eq!(param(&params, "id"), Some("1,2,3"));
        assert_eq!(param(&params, "retmode"), Some("xml"));
    }

    #[test]
    fn test_identity_params_are_appended_when_set() {
        let client = PubMedClient::new(PubMedConfig {
            api_key: Some("key".to_string()),
            tool: Some("get-papers".to_string()),
            email: Some(String::new()),
            ..PubMedConfig::default()
        })
        .unwrap();
        let params = client.fetch_params(&["1".to_string()]);

        assert_eq!(param(&params, "api_key"), Some("key"));
        assert_eq!(param(&params, "tool"), Some("get-papers"));
        assert_eq!(param(&params, "email"), None);
    }

    #[test]
    fn test_endpoint_url_trims_trailing_slash() {
        let client = client_for("https://example.org/eutils/".to_string());
        assert_eq!(
            client.endpoint_url(SEARCH_ENDPOINT),
            "https://example.org/eutils/esearch.fcgi"
        );
    }

    #[test]
    fn test_search_against_local_server() {
        let base = serve_once("200 OK", r#"{"esearchresult":{"idlist":["42"]}}"#);
        let ids = client_for(base).search("anything").unwrap();
        assert_eq!(ids, vec!["42".to_string()]);
    }

    #[test]
    fn test_non_success_status_is_network_error() {
        let base = serve_once("500 Internal Server Error", "oops");
        match client_for(base).fetch_details(&["1".to_string()]) {
            Err(NetworkError::Status { endpoint, status }) => {
                assert_eq!(endpoint, FETCH_ENDPOINT);
                assert_eq!(status, 500);
            }
            other => panic!("Expected status error, got {:?}", other),
        }
    }

    #[test]
    fn test_unexpected_search_body_is_invalid_response() {
        let base = serve_once("200 OK", "not json");
        assert!(matches!(
            client_for(base).search("anything"),
            Err(NetworkError::InvalidResponse { .. })
        ));
    }
}
