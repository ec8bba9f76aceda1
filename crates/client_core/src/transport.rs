//! Low-level HTTP transport: request building, bearer attachment, and the
//! mapping from wire failures to [`ClientError`].

use reqwest::{header::CONTENT_DISPOSITION, Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    error::ErrorBody,
    protocol::{DataEnvelope, LoginData, LoginRequest, SessionUser},
};
use tracing::warn;

use crate::{error::ClientError, session::SessionContext};

pub const DEFAULT_BASE_URL: &str = "https://wedding-organizer-backend.vercel.app/api/v1";

/// One configured connection to the backend. Cheap to clone; all clones share
/// the same [`SessionContext`].
#[derive(Clone)]
pub struct ApiTransport {
    http: Client,
    base_url: String,
    session: SessionContext,
}

impl ApiTransport {
    pub fn new(base_url: impl Into<String>, session: SessionContext) -> Self {
        let base_url = base_url.into();
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, format!("{}{path}", self.base_url));
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Turns a non-2xx response into `ClientError::Server`, carrying the
    /// body's `message` verbatim. A 401 additionally clears the session,
    /// the same way the web client drops its cookies.
    async fn check(&self, response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            warn!("unauthorized response, clearing session");
            self.session.logout();
        }
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_default();
        Err(ClientError::Server {
            status: status.as_u16(),
            message,
        })
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, ClientError> {
        let response = self.request(Method::GET, path).query(query).send().await?;
        let response = self.check(response).await?;
        Ok(response.json().await?)
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self.request(Method::POST, path).json(body).send().await?;
        let response = self.check(response).await?;
        Ok(response.json().await?)
    }

    pub async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self.request(Method::PUT, path).json(body).send().await?;
        let response = self.check(response).await?;
        Ok(response.json().await?)
    }

    /// PATCH whose response body the caller does not need.
    pub async fn patch_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ClientError> {
        let response = self.request(Method::PATCH, path).json(body).send().await?;
        self.check(response).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let response = self.request(Method::DELETE, path).send().await?;
        self.check(response).await?;
        Ok(())
    }

    /// `POST /auth/login`; on success the token and user are stored in the
    /// session context, which notifies its subscribers.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionUser, ClientError> {
        let envelope: DataEnvelope<LoginData> = self
            .post_json(
                "/auth/login",
                &LoginRequest {
                    email: email.trim().to_string(),
                    password: password.to_string(),
                },
            )
            .await?;
        let LoginData { access_token, user } = envelope.data;
        self.session.login(access_token, user.clone());
        Ok(user)
    }

    pub fn logout(&self) {
        self.session.logout();
    }

    /// One-shot file download outside the list state machine. The filename
    /// comes from `Content-Disposition` when the server provides one.
    pub async fn download(
        &self,
        path: &str,
        fallback_name: &str,
    ) -> Result<CsvDownload, ClientError> {
        let response = self.request(Method::GET, path).send().await?;
        let response = self.check(response).await?;
        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(content_disposition_filename)
            .unwrap_or_else(|| fallback_name.to_string());
        let bytes = response.bytes().await?.to_vec();
        Ok(CsvDownload { filename, bytes })
    }
}

#[derive(Debug, Clone)]
pub struct CsvDownload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

fn content_disposition_filename(value: &str) -> Option<String> {
    for part in value.split(';') {
        let part = part.trim();
        if let Some(encoded) = part.strip_prefix("filename*=UTF-8''") {
            if !encoded.is_empty() {
                return Some(encoded.to_string());
            }
        }
        if let Some(plain) = part.strip_prefix("filename=") {
            let plain = plain.trim_matches('"');
            if !plain.is_empty() {
                return Some(plain.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quoted_and_extended_filenames() {
        assert_eq!(
            content_disposition_filename(r#"attachment; filename="orders.csv""#),
            Some("orders.csv".to_string())
        );
        assert_eq!(
            content_disposition_filename("attachment; filename*=UTF-8''laporan-2025.csv"),
            Some("laporan-2025.csv".to_string())
        );
        assert_eq!(content_disposition_filename("inline"), None);
    }
}
