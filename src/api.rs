/// Client for the remote go-link management API
use crate::error::ApiError;
use crate::link::LinkPayload;
use gloo_net::http::{Request, RequestBuilder, Response};
use log::debug;
use serde_json::Value;
use web_sys::RequestCredentials;

/// CRUD surface of the link service.
///
/// `list` returns the raw body so the caller decides how to treat shapes
/// other than an array.
#[allow(async_fn_in_trait)]
pub trait LinkApi {
    async fn list(&self, search: &str) -> Result<Value, ApiError>;
    async fn create(&self, payload: &LinkPayload) -> Result<(), ApiError>;
    async fn update(&self, key: &str, payload: &LinkPayload) -> Result<(), ApiError>;
    async fn delete(&self, key: &str) -> Result<(), ApiError>;
}

/// Collection endpoint, filtered by `search` when the term is non-empty
pub fn list_url(api_base: &str, search: &str) -> String {
    if search.is_empty() {
        api_base.to_string()
    } else {
        format!("{}?search={}", api_base, urlencoding::encode(search))
    }
}

/// Record endpoint for one key; the trailing slash is required by the server
pub fn record_url(api_base: &str, key: &str) -> String {
    format!("{}{}/", api_base, urlencoding::encode(key))
}

/// Any 2xx counts, including 204 No Content
pub fn check_status(status: u16) -> Result<(), ApiError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(ApiError::Status(status))
    }
}

/// `fetch`-backed implementation; the browser session cookie authenticates
#[derive(Debug, Clone, PartialEq)]
pub struct HttpLinkApi {
    api_base: String,
}

impl HttpLinkApi {
    pub fn new(api_base: &str) -> HttpLinkApi {
        HttpLinkApi {
            api_base: api_base.to_string(),
        }
    }

    fn with_defaults(builder: RequestBuilder) -> RequestBuilder {
        builder
            .credentials(RequestCredentials::Include)
            .header("Accept", "application/json")
    }

    fn with_body(builder: RequestBuilder, payload: &LinkPayload) -> Result<Request, ApiError> {
        Self::with_defaults(builder)
            .header("Content-Type", "application/json")
            .json(payload)
            .map_err(|e| ApiError::Encode(e.to_string()))
    }
}

async fn send(request: Request) -> Result<Response, ApiError> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    check_status(response.status())?;
    Ok(response)
}

impl LinkApi for HttpLinkApi {
    async fn list(&self, search: &str) -> Result<Value, ApiError> {
        let url = list_url(&self.api_base, search);
        debug!("GET {}", url);

        let request = Self::with_defaults(Request::get(&url))
            .build()
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        let response = send(request).await?;

        response
            .json::<Value>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn create(&self, payload: &LinkPayload) -> Result<(), ApiError> {
        debug!("POST {}", self.api_base);
        send(Self::with_body(Request::post(&self.api_base), payload)?).await?;
        Ok(())
    }

    async fn update(&self, key: &str, payload: &LinkPayload) -> Result<(), ApiError> {
        let url = record_url(&self.api_base, key);
        debug!("PUT {}", url);
        send(Self::with_body(Request::put(&url), payload)?).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), ApiError> {
        let url = record_url(&self.api_base, key);
        debug!("DELETE {}", url);

        let request = Request::delete(&url)
            .credentials(RequestCredentials::Include)
            .build()
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        send(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://app.tawhid.in/go/api/";

    #[test]
    fn test_list_url_without_search() {
        assert_eq!(list_url(BASE, ""), "https://app.tawhid.in/go/api/");
    }

    #[test]
    fn test_list_url_encodes_search() {
        assert_eq!(
            list_url(BASE, "team docs&x=1"),
            "https://app.tawhid.in/go/api/?search=team%20docs%26x%3D1"
        );
    }

    #[test]
    fn test_record_url() {
        assert_eq!(record_url(BASE, "cal"), "https://app.tawhid.in/go/api/cal/");
        assert_eq!(
            record_url(BASE, "a/b c"),
            "https://app.tawhid.in/go/api/a%2Fb%20c/"
        );
    }

    #[test]
    fn test_check_status() {
        assert_eq!(check_status(200), Ok(()));
        assert_eq!(check_status(201), Ok(()));
        assert_eq!(check_status(204), Ok(()));
        assert_eq!(check_status(302), Err(ApiError::Status(302)));
        assert_eq!(check_status(403), Err(ApiError::Status(403)));
        assert_eq!(check_status(500), Err(ApiError::Status(500)));
    }
}
