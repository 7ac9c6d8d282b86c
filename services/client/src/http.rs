//! HTTP client for the portal backend
//!
//! Every call goes through [`ApiClient::execute`], which attaches the bearer
//! token, logs the exchange and maps the answer onto [`ClientError`].

use common::ContractViolation;
use common::models::{ApiResponse, envelope};
use common::routes;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::Session;

/// Whether the stored token is attached to a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    Bearer,
    Anonymous,
}

/// Client for the portal backend
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    upload_timeout: Duration,
    session: Session,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: Session) -> ClientResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            upload_timeout: config.upload_timeout(),
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request builder for `path` under the base URL
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, routes::url(&self.base_url, path))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.call(Method::GET, path, self.request(Method::GET, path)).await
    }

    pub async fn get_with<T, Q>(&self, path: &str, query: &Q) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.request(Method::GET, path).query(query);
        self.call(Method::GET, path, builder).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::POST, path).json(body);
        self.call(Method::POST, path, builder).await
    }

    /// POST without the bearer token (sign-in)
    pub async fn post_anonymous<T, B>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::POST, path).json(body);
        let body = self
            .execute(Method::POST, path, builder, Auth::Anonymous)
            .await?;
        decode(path, &body)
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.call(Method::POST, path, self.request(Method::POST, path)).await
    }

    pub async fn post_with<T, Q>(&self, path: &str, query: &Q) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.request(Method::POST, path).query(query);
        self.call(Method::POST, path, builder).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::PUT, path).json(body);
        self.call(Method::PUT, path, builder).await
    }

    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.call(Method::PUT, path, self.request(Method::PUT, path)).await
    }

    pub async fn put_with<T, Q>(&self, path: &str, query: &Q) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.request(Method::PUT, path).query(query);
        self.call(Method::PUT, path, builder).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.call(Method::DELETE, path, self.request(Method::DELETE, path)).await
    }

    pub async fn delete_with<T, Q>(&self, path: &str, query: &Q) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.request(Method::DELETE, path).query(query);
        self.call(Method::DELETE, path, builder).await
    }

    /// Multipart POST with the upload timeout; returns the raw body
    pub async fn post_multipart(&self, path: &str, form: Form) -> ClientResult<Vec<u8>> {
        let builder = self
            .request(Method::POST, path)
            .multipart(form)
            .timeout(self.upload_timeout);
        self.execute(Method::POST, path, builder, Auth::Bearer).await
    }

    /// JSON POST whose raw body is returned undecoded
    pub async fn post_raw<B>(&self, path: &str, body: &B) -> ClientResult<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::POST, path).json(body);
        self.execute(Method::POST, path, builder, Auth::Bearer).await
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> ClientResult<T> {
        let body = self.execute(method, path, builder, Auth::Bearer).await?;
        decode(path, &body)
    }

    /// Send a request and return the body of a 2xx answer
    ///
    /// A 401 on a request that carried a token means the backend no longer
    /// accepts the session: it is cleared and [`ClientError::SessionExpired`]
    /// returned. Any other non-2xx answer becomes an application failure when
    /// the body is an envelope, a status error otherwise.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
        auth: Auth,
    ) -> ClientResult<Vec<u8>> {
        debug!("API Request: {} {}", method, path);

        let token = match auth {
            Auth::Bearer => self.session.token().await?,
            Auth::Anonymous => None,
        };
        let bearer_sent = token.is_some();
        let builder = match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| {
            error!("API Error for {}: {}", path, e);
            ClientError::Transport(e)
        })?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        if status == StatusCode::UNAUTHORIZED && bearer_sent {
            warn!("API Error for {}: session rejected, clearing it", path);
            self.session.clear().await?;
            return Err(ClientError::SessionExpired);
        }

        if !status.is_success() {
            let err = failure_from_status(status, &body);
            error!("API Error for {}: {}", path, err);
            return Err(err);
        }

        debug!("API Response success: {}", path);
        Ok(body)
    }
}

/// Decode the body of a 2xx answer, logging contract problems
///
/// An empty body (`204 No Content`) stands for an envelope with `data: null`,
/// so it only satisfies payload types that accept `null`.
pub fn decode<T: DeserializeOwned>(path: &str, body: &[u8]) -> ClientResult<T> {
    let decoded = if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_value(serde_json::Value::Null)
            .map_err(|e| ClientError::from(ContractViolation::new(path, e)))
    } else {
        envelope::decode(path, body).map_err(ClientError::from)
    };

    decoded.map_err(|err| {
        error!("API Error for {}: {}", path, err);
        err
    })
}

fn failure_from_status(status: StatusCode, body: &[u8]) -> ClientError {
    if let Ok(envelope) = serde_json::from_slice::<ApiResponse<Option<serde_json::Value>>>(body) {
        if let Err(failure) = envelope.into_result() {
            return ClientError::Application(failure);
        }
    }

    let message = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "error"]
                .iter()
                .find_map(|field| value.get(*field)?.as_str().map(str::to_string))
        })
        .or_else(|| {
            let text = String::from_utf8_lossy(body).trim().to_string();
            (!text.is_empty() && text.len() <= 200).then_some(text)
        })
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());

    ClientError::Status {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_envelope_on_error_status_is_an_application_failure() {
        let body = json!({
            "success": false,
            "message": "Publication not found",
            "data": null,
            "timestamp": "2024-01-01T00:00:00"
        })
        .to_string();

        let err = failure_from_status(StatusCode::NOT_FOUND, body.as_bytes());
        assert_eq!(err.kind(), Some(ErrorKind::Application));
        assert_eq!(err.application_message(), Some("Publication not found"));
    }

    #[test]
    fn test_spring_error_body_is_a_status_error() {
        let body = json!({
            "timestamp": "2024-01-01T00:00:00.000+00:00",
            "status": 500,
            "error": "Internal Server Error",
            "path": "/api/publications"
        })
        .to_string();

        match failure_from_status(StatusCode::INTERNAL_SERVER_ERROR, body.as_bytes()) {
            ClientError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[test]
    fn test_plain_and_empty_bodies() {
        match failure_from_status(StatusCode::BAD_GATEWAY, b"upstream down") {
            ClientError::Status { message, .. } => assert_eq!(message, "upstream down"),
            other => panic!("unexpected {:?}", other),
        }
        match failure_from_status(StatusCode::SERVICE_UNAVAILABLE, b"") {
            ClientError::Status { message, .. } => assert_eq!(message, "Service Unavailable"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_empty_success_body_is_null_data() {
        decode::<()>("/publications/43/reject", b"").unwrap();
        decode::<()>("/users/u1", b" \n").unwrap();
        assert_eq!(decode::<Option<String>>("/x", b"").unwrap(), None);

        let err = decode::<common::Post>("/publications/1", b"").unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::ContractViolation));
    }

    #[test]
    fn test_request_urls_join_the_base() {
        let config = ClientConfig {
            base_url: "http://backend:8090/api/".to_string(),
            ..Default::default()
        };
        let client = ApiClient::new(&config, Session::in_memory()).unwrap();
        let request = client
            .request(Method::GET, "/publications/pending")
            .build()
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "http://backend:8090/api/publications/pending"
        );
    }
}
