//! reqwest-backed [`UploadApi`] implementation.
//!
//! Async HTTP client with Bearer token authentication. The token is
//! injected through [`ApiConfig`]; it is never read from the
//! environment or any ambient store.

use std::future::Future;
use std::pin::Pin;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use astroshare_protocol::constants::{
    CHUNK_UPLOAD_CHUNK_PATH, CHUNK_UPLOAD_COMPLETE_PATH, CHUNK_UPLOAD_INIT_PATH,
    FINALIZE_UPLOAD_PATH,
};
use astroshare_protocol::messages::{
    ApiErrorBody, CompleteChunkUploadRequest, CompleteChunkUploadResponse, FinalizeResponse,
    InitChunkUploadRequest, InitChunkUploadResponse,
};

use crate::api::{FinalizePart, UploadApi};
use crate::error::SubmitError;

/// Connection settings for the platform API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the platform, e.g. `https://astroshare.example`.
    pub base_url: String,
    /// Bearer token for the authenticated session.
    pub token: String,
}

/// HTTP client for the chunk-upload and finalize endpoints.
#[derive(Debug)]
pub struct HttpUploadApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpUploadApi {
    /// Creates a client from explicit credentials.
    ///
    /// Fails with [`SubmitError::MissingCredentials`] when the token is
    /// empty or not a valid header value.
    pub fn new(config: ApiConfig) -> Result<Self, SubmitError> {
        let token = config.token.trim();
        if token.is_empty() {
            return Err(SubmitError::MissingCredentials);
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| SubmitError::MissingCredentials)?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Performs an authenticated JSON POST and decodes the response.
    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, SubmitError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let resp = self.http.post(self.url(path)).json(body).send().await?;
        Self::decode(resp).await
    }

    /// Performs an authenticated multipart POST and decodes the response.
    async fn post_multipart<T>(&self, path: &str, form: Form) -> Result<T, SubmitError>
    where
        T: DeserializeOwned,
    {
        let resp = self
            .http
            .post(self.url(path))
            .multipart(form)
            .send()
            .await?;
        Self::decode(resp).await
    }

    /// Maps non-success statuses to [`SubmitError::Server`], extracting
    /// whichever error field the backend populated.
    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, SubmitError> {
        let status = resp.status();
        let bytes = resp.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ApiErrorBody>(&bytes)
                .map(ApiErrorBody::into_message)
                .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).into_owned());
            return Err(SubmitError::Server {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Checks the status of a bodyless endpoint.
    async fn check(resp: reqwest::Response) -> Result<(), SubmitError> {
        let status = resp.status();
        if !status.is_success() {
            let bytes = resp.bytes().await?;
            let message = serde_json::from_slice::<ApiErrorBody>(&bytes)
                .map(ApiErrorBody::into_message)
                .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).into_owned());
            return Err(SubmitError::Server {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}

fn build_form(parts: Vec<FinalizePart>) -> Result<Form, SubmitError> {
    let mut form = Form::new();
    for part in parts {
        form = match part {
            FinalizePart::Text { name, value } => form.text(name, value),
            FinalizePart::File {
                name,
                file_name,
                content_type,
                data,
            } => {
                let file = Part::bytes(data)
                    .file_name(file_name)
                    .mime_str(&content_type)?;
                form.part(name, file)
            }
        };
    }
    Ok(form)
}

impl UploadApi for HttpUploadApi {
    fn init<'a>(
        &'a self,
        req: InitChunkUploadRequest,
    ) -> Pin<Box<dyn Future<Output = Result<InitChunkUploadResponse, SubmitError>> + Send + 'a>>
    {
        Box::pin(async move {
            debug!(file_id = %req.file_id, total_chunks = req.total_chunks, "init chunk session");
            self.post_json(CHUNK_UPLOAD_INIT_PATH, &req).await
        })
    }

    fn send_chunk<'a>(
        &'a self,
        upload_id: &'a str,
        chunk_index: u32,
        data: &'a [u8],
    ) -> Pin<Box<dyn Future<Output = Result<(), SubmitError>> + Send + 'a>> {
        Box::pin(async move {
            let chunk = Part::bytes(data.to_vec())
                .file_name("blob")
                .mime_str("application/octet-stream")?;
            let form = Form::new()
                .text("uploadId", upload_id.to_string())
                .text("chunkIndex", chunk_index.to_string())
                .part("chunk", chunk);
            let resp = self
                .http
                .post(self.url(CHUNK_UPLOAD_CHUNK_PATH))
                .multipart(form)
                .send()
                .await?;
            Self::check(resp).await
        })
    }

    fn complete<'a>(
        &'a self,
        req: CompleteChunkUploadRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CompleteChunkUploadResponse, SubmitError>> + Send + 'a>>
    {
        Box::pin(async move {
            debug!(upload_id = %req.upload_id, "complete chunk session");
            self.post_json(CHUNK_UPLOAD_COMPLETE_PATH, &req).await
        })
    }

    fn finalize<'a>(
        &'a self,
        parts: Vec<FinalizePart>,
    ) -> Pin<Box<dyn Future<Output = Result<FinalizeResponse, SubmitError>> + Send + 'a>> {
        Box::pin(async move {
            debug!(parts = parts.len(), "finalize observation");
            let form = build_form(parts)?;
            self.post_multipart(FINALIZE_UPLOAD_PATH, form).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astroshare_protocol::types::FileKind;
    use serde_json::json;
    use wiremock::matchers::{body_json, body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(server: &MockServer) -> ApiConfig {
        ApiConfig {
            base_url: server.uri(),
            token: "test-token".to_string(),
        }
    }

    #[test]
    fn empty_token_is_rejected_before_any_request() {
        let err = HttpUploadApi::new(ApiConfig {
            base_url: "http://localhost".to_string(),
            token: "   ".to_string(),
        })
        .unwrap_err();
        assert!(matches!(err, SubmitError::MissingCredentials));
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let api = HttpUploadApi::new(ApiConfig {
            base_url: "http://localhost:9999/".to_string(),
            token: "t".to_string(),
        })
        .unwrap();
        assert_eq!(api.url("/api/x"), "http://localhost:9999/api/x");
    }

    #[tokio::test]
    async fn init_sends_bearer_token_and_wire_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chunk-upload/init"))
            .and(header("authorization", "Bearer test-token"))
            .and(body_json(json!({
                "fileName": "m31.tif",
                "fileSize": 6_291_456,
                "fileType": "image/tiff",
                "totalChunks": 6,
                "uploadType": "mainImage",
                "fileId": "mainImage-1724800000000",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "uploadId": "u-42",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = HttpUploadApi::new(config(&server)).unwrap();
        let resp = api
            .init(InitChunkUploadRequest {
                file_name: "m31.tif".to_string(),
                file_size: 6_291_456,
                file_type: "image/tiff".to_string(),
                total_chunks: 6,
                upload_type: FileKind::MainImage,
                file_id: "mainImage-1724800000000".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(resp.upload_id, "u-42");
    }

    #[tokio::test]
    async fn send_chunk_posts_multipart_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chunk-upload/chunk"))
            .and(body_string_contains("uploadId"))
            .and(body_string_contains("chunkIndex"))
            .and(body_string_contains("name=\"chunk\""))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let api = HttpUploadApi::new(config(&server)).unwrap();
        api.send_chunk("u-42", 3, b"chunk bytes").await.unwrap();
    }

    #[tokio::test]
    async fn complete_returns_server_side_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chunk-upload/complete"))
            .and(body_json(json!({
                "uploadId": "u-42",
                "fileName": "m31.tif",
                "fileType": "image/tiff",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "filePath": "/uploads/chunked/m31.tif",
            })))
            .mount(&server)
            .await;

        let api = HttpUploadApi::new(config(&server)).unwrap();
        let resp = api
            .complete(CompleteChunkUploadRequest {
                upload_id: "u-42".to_string(),
                file_name: "m31.tif".to_string(),
                file_type: "image/tiff".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(resp.file_path, "/uploads/chunked/m31.tif");
    }

    #[tokio::test]
    async fn finalize_uploads_text_and_file_parts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/finalize-upload"))
            .and(body_string_contains("chunkedFiles[mainImage-1]"))
            .and(body_string_contains("name=\"additionalImages\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Observation published",
                "image_id": "img-7",
            })))
            .mount(&server)
            .await;

        let api = HttpUploadApi::new(config(&server)).unwrap();
        let resp = api
            .finalize(vec![
                FinalizePart::Text {
                    name: "chunkedFiles[mainImage-1]".to_string(),
                    value: "/uploads/m31.tif".to_string(),
                },
                // UTF-8 payload so the string matchers see the whole body.
                FinalizePart::File {
                    name: "additionalImages".to_string(),
                    file_name: "wide.jpg".to_string(),
                    content_type: "image/jpeg".to_string(),
                    data: b"jpeg payload".to_vec(),
                },
            ])
            .await
            .unwrap();
        assert_eq!(resp.message, "Observation published");
        assert_eq!(resp.image_id.as_deref(), Some("img-7"));
    }

    #[tokio::test]
    async fn error_key_in_body_becomes_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chunk-upload/init"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "Missing required fields",
            })))
            .mount(&server)
            .await;

        let api = HttpUploadApi::new(config(&server)).unwrap();
        let err = api
            .init(InitChunkUploadRequest {
                file_name: "x".to_string(),
                file_size: 1,
                file_type: "image/png".to_string(),
                total_chunks: 1,
                upload_type: FileKind::MainImage,
                file_id: "mainImage-1".to_string(),
            })
            .await
            .unwrap_err();
        match err {
            SubmitError::Server { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Missing required fields");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_body_is_passed_through() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chunk-upload/chunk"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let api = HttpUploadApi::new(config(&server)).unwrap();
        let err = api.send_chunk("u-1", 0, b"x").await.unwrap_err();
        match err {
            SubmitError::Server { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
