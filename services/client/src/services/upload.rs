use common::models::{ApiResponse, DriveUploadRequest, UploadResponse};
use common::routes::upload;
use common::{ContractViolation, ValidationError, validation};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::info;

use crate::error::ClientResult;
use crate::http::ApiClient;

/// Multipart field carrying the file
pub const FILE_FIELD: &str = "file";

/// Upload endpoints answer with the bare location or with an envelope
#[derive(Deserialize)]
#[serde(untagged)]
enum UploadBody {
    Bare(UploadResponse),
    Wrapped(ApiResponse<Option<UploadResponse>>),
}

fn decode_upload(path: &str, body: &[u8]) -> ClientResult<UploadResponse> {
    let body: UploadBody =
        serde_json::from_slice(body).map_err(|e| ContractViolation::new(path, e))?;
    match body {
        UploadBody::Bare(response) => Ok(response),
        UploadBody::Wrapped(envelope) => envelope
            .into_result()?
            .ok_or_else(|| ContractViolation::new(path, "missing upload location").into()),
    }
}

/// Image uploads for publication covers
pub struct UploadService<'a> {
    client: &'a ApiClient,
}

impl<'a> UploadService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Upload an image file; only `image/*` content types are accepted
    pub async fn upload_image(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> ClientResult<UploadResponse> {
        if !content_type.starts_with("image/") {
            return Err(ValidationError::new("file", "Only image files are allowed").into());
        }

        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|_| ValidationError::new("file", "Invalid content type"))?;
        let form = Form::new().part(FILE_FIELD, part);

        let body = self.client.post_multipart(upload::IMAGE, form).await?;
        let response = decode_upload(upload::IMAGE, &body)?;
        info!("Uploaded {} to {}", file_name, response.file_url);
        Ok(response)
    }

    /// Link an image shared on Google Drive
    pub async fn from_drive(&self, drive_url: &str) -> ClientResult<UploadResponse> {
        validation::validate_drive_url(drive_url)?;

        let request = DriveUploadRequest {
            drive_url: drive_url.to_string(),
        };
        let body = self.client.post_raw(upload::DRIVE, &request).await?;
        decode_upload(upload::DRIVE, &body)
    }
}
