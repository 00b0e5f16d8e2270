//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port. The underlying client keeps
//! a cookie store so cookies set by one response are sent with later
//! requests, and it is built without a request timeout.

use std::error::Error as StdError;

use courier_application::ports::{HttpClient, HttpClientError, TransportResponse};
use courier_domain::{HttpMethod, ResolvedRequest};
use indexmap::IndexMap;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Client, Method};

/// User-Agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("courier/", env!("CARGO_PKG_VERSION"));

/// Redirect limit used when none is configured.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    max_redirects: usize,
}

impl ReqwestHttpClient {
    /// Creates a client with the default user agent and redirect limit.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        Self::with_options(DEFAULT_USER_AGENT, DEFAULT_MAX_REDIRECTS)
    }

    /// Creates a client with the given user agent and redirect limit.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn with_options(user_agent: &str, max_redirects: usize) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(max_redirects))
            .cookie_store(true)
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self {
            client,
            max_redirects,
        })
    }

    /// Wraps an already configured reqwest client.
    #[must_use]
    pub const fn with_client(client: Client, max_redirects: usize) -> Self {
        Self {
            client,
            max_redirects,
        }
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    /// Maps reqwest errors to the port's `HttpClientError`.
    fn map_error(&self, error: &reqwest::Error) -> HttpClientError {
        if error.is_redirect() {
            return HttpClientError::TooManyRedirects {
                max: self.max_redirects,
            };
        }

        let message = error_chain(error);
        let lower = message.to_lowercase();
        let host = error
            .url()
            .and_then(|u| u.host_str())
            .unwrap_or("unknown")
            .to_string();

        if is_connection_refused(error) || lower.contains("connection refused") {
            return HttpClientError::ConnectionRefused {
                host,
                port: error
                    .url()
                    .and_then(reqwest::Url::port_or_known_default)
                    .unwrap_or(80),
            };
        }

        if lower.contains("dns") || lower.contains("lookup") || lower.contains("resolve") {
            return HttpClientError::DnsError { host, message };
        }

        if lower.contains("certificate") || lower.contains("tls") || lower.contains("handshake") {
            return HttpClientError::TlsError(message);
        }

        if error.is_connect() || error.is_request() {
            return HttpClientError::ConnectionFailed(message);
        }

        HttpClientError::Other(message)
    }
}

/// Joins the error and every source beneath it.
fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn is_connection_refused(error: &reqwest::Error) -> bool {
    let mut source = error.source();
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<std::io::Error>()
            && io.kind() == std::io::ErrorKind::ConnectionRefused
        {
            return true;
        }
        source = cause.source();
    }
    false
}

/// The reason phrase the server sent, or the standard one for the code.
///
/// hyper only attaches the phrase when it differs from the canonical text.
fn status_text(response: &reqwest::Response) -> String {
    response
        .extensions()
        .get::<hyper::ext::ReasonPhrase>()
        .map_or_else(
            || {
                response
                    .status()
                    .canonical_reason()
                    .unwrap_or_default()
                    .to_string()
            },
            |reason| String::from_utf8_lossy(reason.as_bytes()).into_owned(),
        )
}

fn header_pair(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), HttpClientError> {
    let name = HeaderName::from_bytes(name.trim().as_bytes())
        .map_err(|e| HttpClientError::InvalidHeader(format!("{name}: {e}")))?;
    let value = HeaderValue::from_str(value.trim())
        .map_err(|e| HttpClientError::InvalidHeader(format!("{name}: {e}")))?;
    Ok((name, value))
}

impl HttpClient for ReqwestHttpClient {
    async fn send(&self, request: &ResolvedRequest) -> Result<TransportResponse, HttpClientError> {
        let url = request
            .parse_url()
            .map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {}", request.url)))?;

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url);

        for (name, value) in &request.headers {
            let (name, value) = header_pair(name, value)?;
            builder = builder.header(name, value);
        }

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(|e| self.map_error(&e))?;

        let status = response.status();
        let status_text = status_text(&response);
        let mut headers: IndexMap<String, String> = IndexMap::new();
        for (name, value) in response.headers() {
            let value = String::from_utf8_lossy(value.as_bytes());
            headers
                .entry(name.as_str().to_ascii_lowercase())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(&value);
                })
                .or_insert_with(|| value.into_owned());
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| HttpClientError::ConnectionFailed(format!("Failed to read body: {e}")))?
            .to_vec();

        Ok(TransportResponse {
            status: status.as_u16(),
            status_text,
            headers,
            body,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::sync::{Arc, Mutex};
    use std::thread;

    /// Serves canned responses, one per connection, and keeps the raw
    /// request heads it received.
    fn serve(responses: Vec<&'static str>) -> (String, Arc<Mutex<Vec<String>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let received = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&received);

        thread::spawn(move || {
            for response in responses {
                let (mut stream, _) = listener.accept().unwrap();
                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut head = String::new();
                let mut content_length = 0;
                loop {
                    let mut line = String::new();
                    reader.read_line(&mut line).unwrap();
                    if let Some(len) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                        content_length = len.trim().parse().unwrap();
                    }
                    if line == "\r\n" || line.is_empty() {
                        break;
                    }
                    head.push_str(&line);
                }
                let mut body = vec![0; content_length];
                reader.read_exact(&mut body).unwrap();
                head.push_str(&String::from_utf8_lossy(&body));
                log.lock().unwrap().push(head);
                stream.write_all(response.as_bytes()).unwrap();
            }
        });

        (format!("http://{addr}"), received)
    }

    fn request(method: HttpMethod, url: &str) -> ResolvedRequest {
        ResolvedRequest {
            method,
            url: url.to_string(),
            headers: IndexMap::new(),
            body: None,
        }
    }

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Get),
            Method::GET
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Patch),
            Method::PATCH
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Options),
            Method::OPTIONS
        );
    }

    #[test]
    fn test_client_creation() {
        assert!(ReqwestHttpClient::new().is_ok());
    }

    #[test]
    fn test_header_pair_rejects_invalid_name() {
        assert!(matches!(
            header_pair("Bad Header", "v"),
            Err(HttpClientError::InvalidHeader(_))
        ));
        assert!(header_pair(" X-Ok ", " v ").is_ok());
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let client = ReqwestHttpClient::new().unwrap();
        let error = client
            .send(&request(HttpMethod::Get, "{{BASE_URL}}/users"))
            .await
            .unwrap_err();
        assert!(matches!(error, HttpClientError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = ReqwestHttpClient::new().unwrap();
        let error = client
            .send(&request(HttpMethod::Get, &format!("http://127.0.0.1:{port}/")))
            .await
            .unwrap_err();
        assert_eq!(
            error,
            HttpClientError::ConnectionRefused {
                host: "127.0.0.1".to_string(),
                port
            }
        );
    }

    #[tokio::test]
    async fn test_sends_headers_and_body() {
        let (base, received) = serve(vec![
            "HTTP/1.1 404 Not Found\r\nContent-Type: application/json\r\nX-A: 1\r\nx-a: 2\r\nContent-Length: 2\r\nConnection: close\r\n\r\n{}",
        ]);
        let client = ReqwestHttpClient::new().unwrap();
        let mut req = request(HttpMethod::Post, &format!("{base}/items"));
        req.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        req.headers.insert("X-Trace".to_string(), "abc".to_string());
        req.body = Some(r#"{"a":1}"#.to_string());

        let response = client.send(&req).await.unwrap();

        assert_eq!(response.status, 404);
        assert_eq!(response.status_text, "Not Found");
        assert_eq!(response.content_type(), Some("application/json"));
        assert_eq!(response.headers.get("x-a").map(String::as_str), Some("1, 2"));
        assert_eq!(response.body, b"{}");

        let head = received.lock().unwrap()[0].to_lowercase();
        assert!(head.starts_with("post /items http/1.1"));
        assert!(head.contains("x-trace: abc"));
        assert!(head.contains(&format!("user-agent: {DEFAULT_USER_AGENT}")));
        assert!(head.ends_with(r#"{"a":1}"#));
    }

    #[tokio::test]
    async fn test_status_text_keeps_server_reason_phrase() {
        let (base, _) = serve(vec![
            "HTTP/1.1 599 Network Connect Timeout\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            "HTTP/1.1 200 All Good\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            "HTTP/1.1 201 Created\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        ]);
        let client = ReqwestHttpClient::new().unwrap();
        let mut texts = Vec::new();
        for path in ["a", "b", "c"] {
            let response = client
                .send(&request(HttpMethod::Get, &format!("{base}/{path}")))
                .await
                .unwrap();
            texts.push((response.status, response.status_text));
        }

        assert_eq!(
            texts,
            vec![
                (599, "Network Connect Timeout".to_string()),
                (200, "All Good".to_string()),
                (201, "Created".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_cookies_are_forwarded() {
        let (base, received) = serve(vec![
            "HTTP/1.1 200 OK\r\nSet-Cookie: session=s1; Path=/\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            "HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        ]);
        let client = ReqwestHttpClient::new().unwrap();
        client
            .send(&request(HttpMethod::Get, &format!("{base}/login")))
            .await
            .unwrap();
        client
            .send(&request(HttpMethod::Get, &format!("{base}/me")))
            .await
            .unwrap();

        let heads = received.lock().unwrap();
        assert!(heads[1].to_lowercase().contains("cookie: session=s1"));
    }
}
