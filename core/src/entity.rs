//! Entity types mirroring the REST API's wire shapes.

use crate::{
    error::{Error, Result},
    EntityId,
};
use serde::{Deserialize, Serialize};

/// Anything keyed by an [`EntityId`].
///
/// The merge and tombstone-filter utilities are generic over this trait, so
/// albums and photos share one reconciliation path.
pub trait Identified {
    fn id(&self) -> EntityId;
}

/// A user, fetched only. Users are never created or deleted by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: EntityId,
    pub name: String,
    pub username: String,
    pub email: String,
}

/// An album belonging to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: EntityId,
    pub user_id: EntityId,
    pub title: String,
}

/// A photo belonging to an album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: EntityId,
    pub album_id: EntityId,
    pub title: String,
    pub url: String,
    pub thumbnail_url: String,
}

impl Identified for User {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Identified for Album {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Identified for Photo {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// Draft for an album creation, validated before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAlbum {
    pub user_id: EntityId,
    pub title: String,
}

impl NewAlbum {
    pub fn new(user_id: EntityId, title: impl Into<String>) -> Self {
        Self {
            user_id,
            title: title.into(),
        }
    }

    /// Check required fields. Runs client-side; a draft that fails here
    /// never reaches the network.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::MissingRequiredField("title".into()));
        }
        Ok(())
    }

    /// Materialize the draft into an [`Album`] under a given id.
    pub fn into_album(self, id: EntityId) -> Album {
        Album {
            id,
            user_id: self.user_id,
            title: self.title,
        }
    }
}

/// Draft for a photo creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPhoto {
    pub album_id: EntityId,
    pub title: String,
    pub url: String,
    pub thumbnail_url: String,
}

impl NewPhoto {
    pub fn new(
        album_id: EntityId,
        title: impl Into<String>,
        url: impl Into<String>,
        thumbnail_url: impl Into<String>,
    ) -> Self {
        Self {
            album_id,
            title: title.into(),
            url: url.into(),
            thumbnail_url: thumbnail_url.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::MissingRequiredField("title".into()));
        }
        if self.url.trim().is_empty() {
            return Err(Error::MissingRequiredField("url".into()));
        }
        if self.thumbnail_url.trim().is_empty() {
            return Err(Error::MissingRequiredField("thumbnailUrl".into()));
        }
        Ok(())
    }

    pub fn into_photo(self, id: EntityId) -> Photo {
        Photo {
            id,
            album_id: self.album_id,
            title: self.title,
            url: self.url,
            thumbnail_url: self.thumbnail_url,
        }
    }
}
