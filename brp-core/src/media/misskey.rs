//! [`MediaStore`] implementation for Misskey instances
//!
//! Every call is a `POST` to `<api root>/<endpoint>` with a JSON body carrying the access
//! token in the `i` field. Errors come back as `{"error": {"message": ..., "code": ...}}`.
use brp_common::{
    client,
    log::debug,
    reqwest::{Client, Response, StatusCode},
    serde::{self, Deserialize, Serialize},
    serde_json,
};

use crate::error::PublishError;

use super::{MediaStore, UploadedFile};

const FIND_FILE: &str = "drive/files/find";
const UPLOAD_FROM_URL: &str = "drive/files/upload-from-url";
const CREATE_NOTE: &str = "notes/create";

#[derive(Serialize)]
#[serde(crate = "self::serde")]
struct FindRequest<'a> {
    name: &'a str,
    i: &'a str,
}

#[derive(Serialize)]
#[serde(crate = "self::serde", rename_all = "camelCase")]
struct UploadFromUrlRequest<'a> {
    url: &'a str,
    is_sensitive: bool,
    i: &'a str,
}

#[derive(Serialize)]
#[serde(crate = "self::serde", rename_all = "camelCase")]
struct CreateNoteRequest<'a> {
    file_ids: &'a [String],
    text: &'a str,
    i: &'a str,
}

#[derive(Deserialize)]
#[serde(crate = "self::serde")]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
#[serde(crate = "self::serde")]
struct ErrorDetail {
    message: String,
}

pub struct MisskeyApi {
    client: Client,
    base_url: String,
    token: String,
}

impl MisskeyApi {
    /// `base_url` is the API root of the instance, like `https://misskey.example/api/`.
    pub fn new(base_url: &str, token: &str) -> Result<Self, PublishError> {
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        Ok(Self {
            client: client!()?,
            base_url,
            token: token.to_string(),
        })
    }

    async fn call<B: Serialize>(
        &self,
        endpoint: &'static str,
        body: &B,
    ) -> Result<Response, PublishError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("POST {url}");

        let response = self.client.post(url).json(body).send().await?;
        debug!("{endpoint} answered {}", response.status());

        Ok(response)
    }
}

/// Turns a rejected response into [`PublishError::Api`], keeping the server supplied message
/// when there is one.
async fn api_error(endpoint: &'static str, response: Response) -> PublishError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    PublishError::Api {
        endpoint,
        status: status.as_u16(),
        message: error_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        }),
    }
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.error.message)
}

impl MediaStore for MisskeyApi {
    async fn find_by_name(&self, name: &str) -> Result<Vec<UploadedFile>, PublishError> {
        let body = FindRequest {
            name,
            i: &self.token,
        };
        let response = self.call(FIND_FILE, &body).await?;

        if response.status() != StatusCode::OK {
            return Err(api_error(FIND_FILE, response).await);
        }

        let text = response.text().await?;
        Ok(serde_json::from_str::<Vec<UploadedFile>>(&text)?)
    }

    async fn upload_from_url(&self, url: &str, is_sensitive: bool) -> Result<(), PublishError> {
        let body = UploadFromUrlRequest {
            url,
            is_sensitive,
            i: &self.token,
        };
        let response = self.call(UPLOAD_FROM_URL, &body).await?;

        match response.status() {
            StatusCode::OK | StatusCode::NO_CONTENT => Ok(()),
            _ => Err(api_error(UPLOAD_FROM_URL, response).await),
        }
    }

    async fn create_post(&self, file_ids: &[String], text: &str) -> Result<(), PublishError> {
        let body = CreateNoteRequest {
            file_ids,
            text,
            i: &self.token,
        };
        let response = self.call(CREATE_NOTE, &body).await?;

        if response.status() != StatusCode::OK {
            return Err(api_error(CREATE_NOTE, response).await);
        }

        Ok(())
    }
}
