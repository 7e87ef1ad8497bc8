//! What the current session knows about the logged-in user.
//!
//! [`UserDataCache`] sits between the durable [`SessionStore`] and the
//! [`Gateway`]. It holds the profile plus two mirrors (favorites, bookmarks)
//! that are refreshed on demand and updated optimistically on mutation.
//!
//! The cache is built once by the application root and shared as
//! `Arc<UserDataCache>`. All locks are released before any `.await`.
//!
//! [`Gateway`]: crate::api::Gateway

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::mirror::IdMirror;
use super::store::SessionStore;
use crate::api::{Gateway, RecipeRef, UserApi, UserProfile};
use crate::error::ApiError;
use crate::traits::StorageError;

/// Lifecycle of the cache within one app run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheState {
    /// `initialize()` has not run, or `clear()` reset the cache.
    #[default]
    Uninitialized,
    /// A profile is available (possibly a stale cached one).
    Loaded,
    /// Initialization could not obtain a profile.
    Empty,
}

/// The two server-owned sets mirrored locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Collection {
    Favorites,
    Bookmarks,
}

impl Collection {
    fn label(self) -> &'static str {
        match self {
            Collection::Favorites => "favorites",
            Collection::Bookmarks => "bookmarks",
        }
    }
}

#[derive(Debug, Default)]
struct CacheInner {
    state: CacheState,
    profile: Option<UserProfile>,
    favorites: IdMirror,
    bookmarks: IdMirror,
}

impl CacheInner {
    fn mirror(&self, collection: Collection) -> &IdMirror {
        match collection {
            Collection::Favorites => &self.favorites,
            Collection::Bookmarks => &self.bookmarks,
        }
    }

    fn mirror_mut(&mut self, collection: Collection) -> &mut IdMirror {
        match collection {
            Collection::Favorites => &mut self.favorites,
            Collection::Bookmarks => &mut self.bookmarks,
        }
    }
}

/// Profile and favorites/bookmarks mirrors for the current session.
///
/// # Example
///
/// ```ignore
/// use recipebox::session::{SessionStore, UserDataCache};
///
/// let cache = Arc::new(UserDataCache::new(gateway, session, true));
/// cache.initialize().await;
/// cache.add_favorite("r1").await?;
/// assert!(cache.is_favorite("r1"));
/// ```
#[derive(Debug)]
pub struct UserDataCache {
    users: UserApi,
    session: SessionStore,
    rollback_on_failure: bool,
    inner: RwLock<CacheInner>,
}

impl UserDataCache {
    /// Create an uninitialized cache.
    ///
    /// With `rollback_on_failure`, a mutation whose backend call fails undoes
    /// its own optimistic change. Without it the change is kept.
    pub fn new(gateway: Arc<Gateway>, session: SessionStore, rollback_on_failure: bool) -> Self {
        Self {
            users: UserApi::new(gateway),
            session,
            rollback_on_failure,
            inner: RwLock::new(CacheInner::default()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, CacheInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CacheInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> CacheState {
        self.read().state
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.read().profile.clone()
    }

    /// Snapshot of the favorites mirror.
    pub fn favorites(&self) -> Vec<String> {
        self.read().favorites.ids().to_vec()
    }

    /// Snapshot of the bookmarks mirror.
    pub fn bookmarks(&self) -> Vec<String> {
        self.read().bookmarks.ids().to_vec()
    }

    /// Local membership check; never touches the network.
    pub fn is_favorite(&self, recipe_id: &str) -> bool {
        self.read().favorites.contains(recipe_id)
    }

    /// Local membership check; never touches the network.
    pub fn is_bookmarked(&self, recipe_id: &str) -> bool {
        self.read().bookmarks.contains(recipe_id)
    }

    /// Bring the cache to a usable state at app start.
    ///
    /// A cached profile is used as-is (the mirrors are not refreshed).
    /// Otherwise the profile is fetched, and on success both mirrors too.
    /// Never fails: the outcome is reported through the returned state.
    pub async fn initialize(&self) -> CacheState {
        match self.session.load_profile().await {
            Ok(Some(profile)) => {
                tracing::info!("Using cached profile for {}", profile.username);
                let mut inner = self.write();
                inner.profile = Some(profile);
                inner.state = CacheState::Loaded;
                return CacheState::Loaded;
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Could not read cached profile: {}", e),
        }

        if self.fetch_user().await.is_none() {
            let mut inner = self.write();
            inner.profile = None;
            inner.state = CacheState::Empty;
            return CacheState::Empty;
        }

        let (favorites, bookmarks) = tokio::join!(self.fetch_favorites(), self.fetch_bookmarks());
        if let Err(e) = favorites {
            tracing::warn!("Favorites not loaded during initialize: {}", e);
        }
        if let Err(e) = bookmarks {
            tracing::warn!("Bookmarks not loaded during initialize: {}", e);
        }

        CacheState::Loaded
    }

    /// Fetch the profile, keep it in memory and persist it.
    ///
    /// Returns `None` on failure, leaving the previous profile in place.
    pub async fn fetch_user(&self) -> Option<UserProfile> {
        let profile = match self.users.profile().await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!("Profile fetch failed: {}", e);
                return None;
            }
        };

        {
            let mut inner = self.write();
            inner.profile = Some(profile.clone());
            inner.state = CacheState::Loaded;
        }

        if let Err(e) = self.session.save_profile(&profile).await {
            tracing::warn!("Could not persist profile: {}", e);
        }
        Some(profile)
    }

    /// Replace the favorites mirror with the server's list.
    ///
    /// Returns the entries the server sent. If a newer fetch was issued
    /// meanwhile, the mirror is left alone. Local changes still in flight are
    /// kept on top of the server's list.
    pub async fn fetch_favorites(&self) -> Result<Vec<RecipeRef>, ApiError> {
        self.refresh(Collection::Favorites).await
    }

    /// Replace the bookmarks mirror with the server's list.
    pub async fn fetch_bookmarks(&self) -> Result<Vec<RecipeRef>, ApiError> {
        self.refresh(Collection::Bookmarks).await
    }

    pub async fn add_favorite(&self, recipe_id: &str) -> Result<(), ApiError> {
        self.add(Collection::Favorites, recipe_id).await
    }

    pub async fn remove_favorite(&self, recipe_id: &str) -> Result<(), ApiError> {
        self.remove(Collection::Favorites, recipe_id).await
    }

    pub async fn add_bookmark(&self, recipe_id: &str) -> Result<(), ApiError> {
        self.add(Collection::Bookmarks, recipe_id).await
    }

    pub async fn remove_bookmark(&self, recipe_id: &str) -> Result<(), ApiError> {
        self.remove(Collection::Bookmarks, recipe_id).await
    }

    /// Forget the profile in memory and on disk. Mirrors are kept.
    pub async fn clear(&self) -> Result<(), StorageError> {
        {
            let mut inner = self.write();
            inner.profile = None;
            inner.state = CacheState::Uninitialized;
        }
        self.session.clear_profile().await
    }

    async fn refresh(&self, collection: Collection) -> Result<Vec<RecipeRef>, ApiError> {
        let ticket = self.write().mirror_mut(collection).begin_fetch();

        let entries = match collection {
            Collection::Favorites => self.users.favorites().await,
            Collection::Bookmarks => self.users.bookmarks().await,
        }?;

        let applied = self
            .write()
            .mirror_mut(collection)
            .complete_fetch(ticket, entries.iter().map(|e| e.id().to_string()));

        if applied {
            tracing::debug!(
                "Loaded {} {}",
                self.read().mirror(collection).len(),
                collection.label()
            );
        } else {
            tracing::debug!("Discarding superseded {} response", collection.label());
        }
        Ok(entries)
    }

    async fn add(&self, collection: Collection, recipe_id: &str) -> Result<(), ApiError> {
        let (change, inserted) = self.write().mirror_mut(collection).stage_insert(recipe_id);

        let result = match collection {
            Collection::Favorites => self.users.add_favorite(recipe_id).await,
            Collection::Bookmarks => self.users.add_bookmark(recipe_id).await,
        };

        let mut inner = self.write();
        let mirror = inner.mirror_mut(collection);
        match result {
            Err(e) if self.rollback_on_failure => {
                mirror.discard(change);
                if inserted {
                    mirror.remove(recipe_id);
                }
                tracing::warn!(
                    "Reverted {} add of {}: {}",
                    collection.label(),
                    recipe_id,
                    e
                );
                Err(e)
            }
            result => {
                mirror.settle(change);
                result.map(|_| ())
            }
        }
    }

    async fn remove(&self, collection: Collection, recipe_id: &str) -> Result<(), ApiError> {
        let (change, position) = self.write().mirror_mut(collection).stage_remove(recipe_id);

        let result = match collection {
            Collection::Favorites => self.users.remove_favorite(recipe_id).await,
            Collection::Bookmarks => self.users.remove_bookmark(recipe_id).await,
        };

        let mut inner = self.write();
        let mirror = inner.mirror_mut(collection);
        match result {
            Err(e) if self.rollback_on_failure => {
                mirror.discard(change);
                if let Some(position) = position {
                    mirror.restore(position, recipe_id);
                }
                tracing::warn!(
                    "Reverted {} removal of {}: {}",
                    collection.label(),
                    recipe_id,
                    e
                );
                Err(e)
            }
            result => {
                mirror.settle(change);
                result.map(|_| ())
            }
        }
    }
}
