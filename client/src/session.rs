//! Session - the client state container wired to the remote data client.
//!
//! A session owns one [`CollectionState`] per entity kind, the tombstone
//! store, and the capability of the visiting user. View code drives the
//! `load_*` operations and renders the `visible_*` read paths; fetch
//! failures land in the collection's error slot as a display message rather
//! than propagating.
//!
//! Fetch policies, fixed per call site:
//! - users: `Replace` - the user list has no local additions
//! - albums: `MergeById` - locally created albums survive a refetch
//! - photos: `Replace` - the photo page refetches whole albums at a time

use crate::api::ApiClient;
use crate::auth::Capability;
use crate::error::{ClientError, Result};
use crate::storage::TombstoneStore;
use shutter_core::{
    filter_deleted, Album, CollectionState, EntityId, EntityKind, FetchPolicy, LocalIdAllocator,
    NewAlbum, NewPhoto, Photo, User,
};

/// One browsing session against the REST backend.
pub struct Session {
    api: ApiClient,
    capability: Capability,
    tombstones: TombstoneStore,
    local_ids: LocalIdAllocator,
    users: CollectionState<User>,
    albums: CollectionState<Album>,
    photos: CollectionState<Photo>,
}

impl Session {
    pub fn new(api: ApiClient, capability: Capability, tombstones: TombstoneStore) -> Self {
        Self {
            api,
            capability,
            tombstones,
            local_ids: LocalIdAllocator::new(),
            users: CollectionState::new(),
            albums: CollectionState::new(),
            photos: CollectionState::new(),
        }
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    fn require_manage(&self) -> Result<()> {
        if self.capability.can_manage() {
            Ok(())
        } else {
            Err(ClientError::Forbidden)
        }
    }

    // ------------------------------------------------------------------
    // Fetch operations
    // ------------------------------------------------------------------

    /// Fetch the user list. Users are never created locally, so the fetched
    /// sequence replaces the held one.
    pub async fn load_users(&mut self) {
        let token = self.users.begin_fetch();
        match self.api.list_users().await {
            Ok(users) => {
                self.users.resolve_ok(token, users, FetchPolicy::Replace);
            }
            Err(e) => {
                self.users.resolve_err(token, e.display_message());
            }
        }
    }

    /// Fetch one user's albums, merged into existing state so locally
    /// created albums are not dropped by the refetch.
    pub async fn load_albums(&mut self, user_id: EntityId) {
        let token = self.albums.begin_fetch();
        match self.api.list_albums(user_id).await {
            Ok(albums) => {
                self.albums.resolve_ok(token, albums, FetchPolicy::MergeById);
            }
            Err(e) => {
                self.albums.resolve_err(token, e.display_message());
            }
        }
    }

    /// Fetch one album's photos, replacing the held sequence.
    pub async fn load_photos(&mut self, album_id: EntityId) {
        let token = self.photos.begin_fetch();
        match self.api.list_photos(album_id).await {
            Ok(photos) => {
                self.photos.resolve_ok(token, photos, FetchPolicy::Replace);
            }
            Err(e) => {
                self.photos.resolve_err(token, e.display_message());
            }
        }
    }

    // ------------------------------------------------------------------
    // Management operations
    // ------------------------------------------------------------------

    /// Create an album on the server and append it to local state. On any
    /// failure the collection is left unchanged and the error returns to
    /// the caller.
    pub async fn create_album(&mut self, draft: NewAlbum) -> Result<Album> {
        self.require_manage()?;
        draft.validate()?;

        let created = self.api.create_album(&draft).await?;
        self.albums.add_local(created.clone());
        Ok(created)
    }

    /// Create an album locally only, under a client-allocated id.
    pub fn add_local_album(&mut self, draft: NewAlbum) -> Result<Album> {
        self.require_manage()?;
        draft.validate()?;

        let album = draft.into_album(self.local_ids.allocate());
        self.albums.add_local(album.clone());
        Ok(album)
    }

    /// Rename an album on the server and swap the held instance.
    pub async fn update_album(&mut self, id: EntityId, title: &str) -> Result<Album> {
        self.require_manage()?;

        let updated = self.api.update_album(id, title).await?;
        self.albums.replace(updated.clone());
        Ok(updated)
    }

    /// Delete an album. The backend forgets the delete on reload, so the id
    /// is also recorded as a tombstone and filtered from every listing.
    pub async fn delete_album(&mut self, id: EntityId) -> Result<()> {
        self.require_manage()?;

        self.api.delete_album(id).await?;
        self.tombstones.record(EntityKind::Album, id)?;
        Ok(())
    }

    pub async fn create_photo(&mut self, draft: NewPhoto) -> Result<Photo> {
        self.require_manage()?;
        draft.validate()?;

        let created = self.api.create_photo(&draft).await?;
        self.photos.add_local(created.clone());
        Ok(created)
    }

    /// Create a photo locally only, under a client-allocated id.
    pub fn add_local_photo(&mut self, draft: NewPhoto) -> Result<Photo> {
        self.require_manage()?;
        draft.validate()?;

        let photo = draft.into_photo(self.local_ids.allocate());
        self.photos.add_local(photo.clone());
        Ok(photo)
    }

    pub async fn update_photo(&mut self, photo: &Photo) -> Result<Photo> {
        self.require_manage()?;

        let updated = self.api.update_photo(photo).await?;
        self.photos.replace(updated.clone());
        Ok(updated)
    }

    pub async fn delete_photo(&mut self, id: EntityId) -> Result<()> {
        self.require_manage()?;

        self.api.delete_photo(id).await?;
        self.tombstones.record(EntityKind::Photo, id)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Read paths
    // ------------------------------------------------------------------

    pub fn users(&self) -> &CollectionState<User> {
        &self.users
    }

    pub fn albums(&self) -> &CollectionState<Album> {
        &self.albums
    }

    pub fn photos(&self) -> &CollectionState<Photo> {
        &self.photos
    }

    /// Held albums minus tombstoned ids. The only album read path views use.
    pub fn visible_albums(&self) -> Vec<Album> {
        filter_deleted(self.albums.items(), self.tombstones.list(EntityKind::Album))
    }

    /// Held photos minus tombstoned ids.
    pub fn visible_photos(&self) -> Vec<Photo> {
        filter_deleted(self.photos.items(), self.tombstones.list(EntityKind::Photo))
    }

    pub fn tombstones(&self) -> &TombstoneStore {
        &self.tombstones
    }
}
