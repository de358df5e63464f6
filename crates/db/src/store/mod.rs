//! Content Store abstraction.
//!
//! The hosted database is an external collaborator offering row-level CRUD
//! over a handful of named tables. [`Table`] is that contract for the four
//! content tables; [`AdminUserStore`], [`SessionStore`] and
//! [`SubmissionStore`] cover the tables with bespoke lookups.
//!
//! Two backends implement every trait:
//! - [`postgres::PgStore`] -- production, delegating to [`crate::repositories`].
//! - [`memory::MemoryTable`] / [`memory::MemoryStore`] -- tests and local demos.
//!
//! [`ContentStore`] bundles one trait object per table so handlers can be
//! written once against the traits.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use teamunited_core::listing::ListQuery;
use teamunited_core::types::{DbId, Timestamp};
use teamunited_core::validation::Validate;

use crate::models::admin_user::{AdminUserRow, CreateAdminUser, UpdateAdminUser};
use crate::models::gallery::GalleryItem;
use crate::models::leader::Leader;
use crate::models::project::Project;
use crate::models::session::{AdminSession, CreateSession};
use crate::models::story::Story;
use crate::models::submission::{CreateSubmission, Submission};

pub mod memory;
pub mod postgres;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure talking to the Content Store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached (pool exhausted, connection refused,
    /// timeout, or an HTTP transport failure on the client side).
    #[error("Content store unavailable: {0}")]
    Unavailable(String),

    /// A unique constraint rejected the write. Carries the constraint name.
    #[error("Duplicate value violates unique constraint: {0}")]
    UniqueViolation(String),

    /// The store refused the input (remote validation failure).
    #[error("Rejected by content store: {0}")]
    Rejected(String),

    /// The store refused the caller's credentials.
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    /// Any other database error.
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

/// PostgreSQL unique-violation SQLSTATE.
const PG_UNIQUE_VIOLATION: &str = "23505";

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(PG_UNIQUE_VIOLATION) => {
                StoreError::UniqueViolation(db_err.constraint().unwrap_or("unknown").to_string())
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            _ => StoreError::Database(err),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A row type stored in one of the Content Store's tables.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Insert payload; also the authoring form's draft.
    type Create: Clone + Default + Serialize + DeserializeOwned + Validate + Send + Sync + 'static;
    /// Partial-overwrite payload.
    type Update: Clone
        + Default
        + Serialize
        + DeserializeOwned
        + Validate
        + From<Self::Create>
        + Send
        + Sync
        + 'static;

    /// Table name in the store.
    const TABLE: &'static str;
    /// Human-readable entity name used in not-found errors.
    const ENTITY: &'static str;
    /// Path segment under `/api/v1`.
    const ROUTE: &'static str;
    /// Column that a list call's `category` filter matches, if any.
    const CATEGORY_COLUMN: Option<&'static str> = None;

    fn id(&self) -> DbId;
    fn created_at(&self) -> Timestamp;
    fn updated_at(&self) -> Timestamp;

    /// A list filter in the form the category column stores it. `None`
    /// means no filter.
    fn category_key(filter: &str) -> Option<String> {
        Some(filter.to_string())
    }

    /// Load this record into an editable draft.
    fn to_draft(&self) -> Self::Create;
}

/// Records the in-memory backend can build and patch without SQL.
pub trait MemoryRecord: Record {
    fn materialize(id: DbId, now: Timestamp, input: &Self::Create) -> Self;
    fn apply(&mut self, input: &Self::Update, now: Timestamp);

    /// Value of [`Record::CATEGORY_COLUMN`] for this row.
    fn category(&self) -> Option<&str> {
        None
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// Uniform CRUD over one content table.
///
/// Lists are ordered newest first (`created_at DESC, id DESC`).
#[async_trait]
pub trait Table<E: Record>: Send + Sync {
    async fn list(&self, query: &ListQuery) -> StoreResult<Vec<E>>;

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<E>>;

    async fn create(&self, input: &E::Create) -> StoreResult<E>;

    /// Apply a partial overwrite. Returns `None` if no row has `id`.
    async fn update(&self, id: DbId, input: &E::Update) -> StoreResult<Option<E>>;

    /// Returns `true` if a row was removed.
    async fn delete(&self, id: DbId) -> StoreResult<bool>;
}

/// Persistence for `admin_users`.
#[async_trait]
pub trait AdminUserStore: Send + Sync {
    async fn list(&self) -> StoreResult<Vec<AdminUserRow>>;

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<AdminUserRow>>;

    /// Exact (case-sensitive) email match.
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<AdminUserRow>>;

    async fn create(&self, input: &CreateAdminUser) -> StoreResult<AdminUserRow>;

    async fn update(&self, id: DbId, input: &UpdateAdminUser)
        -> StoreResult<Option<AdminUserRow>>;

    /// Removing a user also ends their sessions.
    async fn delete(&self, id: DbId) -> StoreResult<bool>;
}

/// Persistence for `admin_sessions`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(&self, input: &CreateSession) -> StoreResult<AdminSession>;

    /// Only returns sessions that are neither revoked nor expired.
    async fn find_active(&self, token_id: &str) -> StoreResult<Option<AdminSession>>;

    /// Returns `true` if an active session was revoked.
    async fn revoke(&self, token_id: &str) -> StoreResult<bool>;

    /// Revoke every live session of one admin user. Returns the count revoked.
    async fn revoke_for_user(&self, admin_user_id: DbId) -> StoreResult<u64>;

    /// Delete expired or revoked sessions. Returns the count removed.
    async fn cleanup_expired(&self) -> StoreResult<u64>;
}

/// Persistence for `submissions`.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn create(&self, input: &CreateSubmission) -> StoreResult<Submission>;

    /// Newest first, optionally restricted to one kind.
    async fn list(&self, kind: Option<&str>, query: &ListQuery) -> StoreResult<Vec<Submission>>;

    async fn delete(&self, id: DbId) -> StoreResult<bool>;
}

/// Reachability probe for `/health`.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// Backend name reported by health checks.
    fn backend(&self) -> &'static str;

    async fn ping(&self) -> StoreResult<()>;
}

// ---------------------------------------------------------------------------
// Bundle
// ---------------------------------------------------------------------------

/// One handle per table, cheaply cloneable.
#[derive(Clone)]
pub struct ContentStore {
    pub projects: Arc<dyn Table<Project>>,
    pub gallery: Arc<dyn Table<GalleryItem>>,
    pub stories: Arc<dyn Table<Story>>,
    pub leaders: Arc<dyn Table<Leader>>,
    pub admin_users: Arc<dyn AdminUserStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub submissions: Arc<dyn SubmissionStore>,
    pub health: Arc<dyn StoreHealth>,
}

impl ContentStore {
    /// Back every table with PostgreSQL.
    pub fn postgres(pool: crate::DbPool) -> Self {
        let store = Arc::new(postgres::PgStore::new(pool));
        Self {
            projects: store.clone(),
            gallery: store.clone(),
            stories: store.clone(),
            leaders: store.clone(),
            admin_users: store.clone(),
            sessions: store.clone(),
            submissions: store.clone(),
            health: store,
        }
    }

    /// Back every table with process memory. Nothing survives a restart.
    pub fn in_memory() -> Self {
        Self::from_memory(memory::MemoryBackend::default())
    }

    /// Build from an existing in-memory backend, keeping its handles so
    /// callers (tests) can inspect or take tables offline.
    pub fn from_memory(backend: memory::MemoryBackend) -> Self {
        Self {
            projects: backend.projects,
            gallery: backend.gallery,
            stories: backend.stories,
            leaders: backend.leaders,
            admin_users: backend.store.clone(),
            sessions: backend.store.clone(),
            submissions: backend.store.clone(),
            health: backend.store,
        }
    }
}

/// Select the table handle for a record type.
pub trait HasTable<E: Record> {
    fn table(&self) -> Arc<dyn Table<E>>;
}

impl HasTable<Project> for ContentStore {
    fn table(&self) -> Arc<dyn Table<Project>> {
        Arc::clone(&self.projects)
    }
}

impl HasTable<GalleryItem> for ContentStore {
    fn table(&self) -> Arc<dyn Table<GalleryItem>> {
        Arc::clone(&self.gallery)
    }
}

impl HasTable<Story> for ContentStore {
    fn table(&self) -> Arc<dyn Table<Story>> {
        Arc::clone(&self.stories)
    }
}

impl HasTable<Leader> for ContentStore {
    fn table(&self) -> Arc<dyn Table<Leader>> {
        Arc::clone(&self.leaders)
    }
}
