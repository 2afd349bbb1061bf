//! Remote data client for the REST backend.
//!
//! One HTTP call per operation, one documented success status each: 200 for
//! reads and deletes, 201 for creates. Any other status becomes a
//! [`ClientError::RemoteCall`] carrying that operation's fixed display
//! message; transport failures propagate with the transport's message. No
//! retries, no backoff, a single attempt per call.

use crate::error::{ClientError, Result};
use reqwest::{Response, StatusCode, Url};
use serde::Serialize;
use shutter_core::{Album, EntityId, NewAlbum, NewPhoto, Photo, User};

/// Body for `PUT /albums/{id}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateAlbumBody<'a> {
    title: &'a str,
}

/// Body for `PUT /photos/{id}`. The backend expects the fields wrapped
/// under a `photo` key.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdatePhotoBody<'a> {
    photo: PhotoFields<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PhotoFields<'a> {
    album_id: EntityId,
    title: &'a str,
    url: &'a str,
    thumbnail_url: &'a str,
}

/// Issues HTTP requests against the configured base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// `GET /users`
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let url = self.endpoint("users");
        tracing::debug!(%url, "listing users");

        let response = self.http.get(url).send().await?;
        let response = expect_status(response, StatusCode::OK, "Failed to fetch users")?;

        Ok(response.json().await?)
    }

    /// `GET /users/{userId}/albums`
    pub async fn list_albums(&self, user_id: EntityId) -> Result<Vec<Album>> {
        let url = self.endpoint(&format!("users/{user_id}/albums"));
        tracing::debug!(%url, user_id, "listing albums");

        let response = self.http.get(url).send().await?;
        let response = expect_status(response, StatusCode::OK, "Failed to fetch albums")?;

        Ok(response.json().await?)
    }

    /// `POST /albums`
    pub async fn create_album(&self, draft: &NewAlbum) -> Result<Album> {
        let url = self.endpoint("albums");
        tracing::debug!(%url, user_id = draft.user_id, "creating album");

        let response = self.http.post(url).json(draft).send().await?;
        let response = expect_status(response, StatusCode::CREATED, "Failed to create album")?;

        Ok(response.json().await?)
    }

    /// `PUT /albums/{id}`
    pub async fn update_album(&self, id: EntityId, title: &str) -> Result<Album> {
        let url = self.endpoint(&format!("albums/{id}"));
        tracing::debug!(%url, id, "updating album");

        let body = UpdateAlbumBody { title };
        let response = self.http.put(url).json(&body).send().await?;
        let response = expect_status(response, StatusCode::OK, "Failed to update album")?;

        Ok(response.json().await?)
    }

    /// `DELETE /albums/{id}`
    pub async fn delete_album(&self, id: EntityId) -> Result<()> {
        let url = self.endpoint(&format!("albums/{id}"));
        tracing::debug!(%url, id, "deleting album");

        let response = self.http.delete(url).send().await?;
        expect_status(response, StatusCode::OK, "Failed to delete album")?;

        Ok(())
    }

    /// `GET /albums/{albumId}/photos`
    pub async fn list_photos(&self, album_id: EntityId) -> Result<Vec<Photo>> {
        let url = self.endpoint(&format!("albums/{album_id}/photos"));
        tracing::debug!(%url, album_id, "listing photos");

        let response = self.http.get(url).send().await?;
        let response = expect_status(response, StatusCode::OK, "Failed to fetch photos")?;

        Ok(response.json().await?)
    }

    /// `POST /photos`
    pub async fn create_photo(&self, draft: &NewPhoto) -> Result<Photo> {
        let url = self.endpoint("photos");
        tracing::debug!(%url, album_id = draft.album_id, "creating photo");

        let response = self.http.post(url).json(draft).send().await?;
        let response = expect_status(response, StatusCode::CREATED, "Failed to create photo")?;

        Ok(response.json().await?)
    }

    /// `PUT /photos/{id}`
    pub async fn update_photo(&self, photo: &Photo) -> Result<Photo> {
        let url = self.endpoint(&format!("photos/{}", photo.id));
        tracing::debug!(%url, id = photo.id, "updating photo");

        let body = UpdatePhotoBody {
            photo: PhotoFields {
                album_id: photo.album_id,
                title: &photo.title,
                url: &photo.url,
                thumbnail_url: &photo.thumbnail_url,
            },
        };
        let response = self.http.put(url).json(&body).send().await?;
        let response = expect_status(response, StatusCode::OK, "Failed to update photo")?;

        Ok(response.json().await?)
    }

    /// `DELETE /photos/{id}`
    pub async fn delete_photo(&self, id: EntityId) -> Result<()> {
        let url = self.endpoint(&format!("photos/{id}"));
        tracing::debug!(%url, id, "deleting photo");

        let response = self.http.delete(url).send().await?;
        expect_status(response, StatusCode::OK, "Failed to delete photo")?;

        Ok(())
    }
}

/// Treat exactly `expected` as success; anything else is a remote-call
/// failure with the operation's fixed message.
fn expect_status(response: Response, expected: StatusCode, message: &'static str) -> Result<Response> {
    let status = response.status();
    if status != expected {
        tracing::warn!(%status, message, "remote call failed");
        return Err(ClientError::RemoteCall {
            message,
            status: status.as_u16(),
        });
    }
    Ok(response)
}
