//! In-process store backend.
//!
//! Mirrors the PostgreSQL backend's observable behavior closely enough for
//! the API and editor test suites: newest-first ordering, partial updates
//! that bump `updated_at`, the unique email constraint on `admin_users`,
//! and session cascade on admin user deletion. Any table can be switched
//! offline to simulate an unreachable store.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use teamunited_core::listing::ListQuery;
use teamunited_core::types::DbId;
use tokio::sync::RwLock;

use super::{
    AdminUserStore, MemoryRecord, Record, SessionStore, StoreError, StoreHealth, StoreResult,
    SubmissionStore, Table,
};
use crate::models::admin_user::{
    AdminUserRow, CreateAdminUser, UpdateAdminUser, UQ_ADMIN_USERS_EMAIL,
};
use crate::models::gallery::GalleryItem;
use crate::models::leader::Leader;
use crate::models::project::Project;
use crate::models::session::{AdminSession, CreateSession};
use crate::models::story::Story;
use crate::models::submission::{CreateSubmission, Submission};

const UQ_ADMIN_SESSIONS_TOKEN_ID: &str = "uq_admin_sessions_token_id";

fn offline_error(table: &str) -> StoreError {
    StoreError::Unavailable(format!("table '{table}' is offline"))
}

// ---------------------------------------------------------------------------
// Content tables
// ---------------------------------------------------------------------------

/// One content table held in memory.
pub struct MemoryTable<E> {
    rows: RwLock<Vec<E>>,
    next_id: AtomicI64,
    offline: AtomicBool,
}

impl<E> Default for MemoryTable<E> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
            offline: AtomicBool::new(false),
        }
    }
}

impl<E: MemoryRecord> MemoryTable<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// While offline, every call fails with [`StoreError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of stored rows, ignoring the offline switch.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn ensure_online(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(offline_error(E::TABLE));
        }
        Ok(())
    }
}

#[async_trait]
impl<E: MemoryRecord> Table<E> for MemoryTable<E> {
    async fn list(&self, query: &ListQuery) -> StoreResult<Vec<E>> {
        self.ensure_online()?;
        query
            .ensure_filterable(E::TABLE, E::CATEGORY_COLUMN)
            .map_err(|e| StoreError::Rejected(e.to_string()))?;

        let rows = self.rows.read().await;
        let category = query.category_filter().and_then(E::category_key);
        let mut matching: Vec<E> = rows
            .iter()
            .filter(|row| category.is_none() || row.category() == category.as_deref())
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(query.paginate(matching))
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<E>> {
        self.ensure_online()?;
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|row| row.id() == id).cloned())
    }

    async fn create(&self, input: &E::Create) -> StoreResult<E> {
        self.ensure_online()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let row = E::materialize(id, Utc::now(), input);
        self.rows.write().await.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: DbId, input: &E::Update) -> StoreResult<Option<E>> {
        self.ensure_online()?;
        let mut rows = self.rows.write().await;
        Ok(rows.iter_mut().find(|row| row.id() == id).map(|row| {
            row.apply(input, Utc::now());
            row.clone()
        }))
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        self.ensure_online()?;
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.id() != id);
        Ok(rows.len() < before)
    }
}

// ---------------------------------------------------------------------------
// Admin users, sessions and submissions
// ---------------------------------------------------------------------------

/// The non-content tables held in memory.
pub struct MemoryStore {
    admin_users: RwLock<Vec<AdminUserRow>>,
    sessions: RwLock<Vec<AdminSession>>,
    submissions: RwLock<Vec<Submission>>,
    next_id: AtomicI64,
    offline: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            admin_users: RwLock::new(Vec::new()),
            sessions: RwLock::new(Vec::new()),
            submissions: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
            offline: AtomicBool::new(false),
        }
    }
}

impl MemoryStore {
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub async fn admin_user_count(&self) -> usize {
        self.admin_users.read().await.len()
    }

    pub async fn submission_count(&self) -> usize {
        self.submissions.read().await.len()
    }

    fn ensure_online(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(offline_error("admin_users"));
        }
        Ok(())
    }

    fn allocate_id(&self) -> DbId {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

fn email_taken(users: &[AdminUserRow], email: &str, except: Option<DbId>) -> bool {
    users
        .iter()
        .any(|u| u.email == email && Some(u.id) != except)
}

#[async_trait]
impl AdminUserStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<AdminUserRow>> {
        self.ensure_online()?;
        let mut users = self.admin_users.read().await.clone();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(users)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<AdminUserRow>> {
        self.ensure_online()?;
        let users = self.admin_users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<AdminUserRow>> {
        self.ensure_online()?;
        let users = self.admin_users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, input: &CreateAdminUser) -> StoreResult<AdminUserRow> {
        self.ensure_online()?;
        let mut users = self.admin_users.write().await;
        if email_taken(&users, &input.email, None) {
            return Err(StoreError::UniqueViolation(UQ_ADMIN_USERS_EMAIL.to_string()));
        }
        let now = Utc::now();
        let row = AdminUserRow {
            id: self.allocate_id(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            is_admin: input.is_admin,
            created_at: now,
            updated_at: now,
        };
        users.push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        id: DbId,
        input: &UpdateAdminUser,
    ) -> StoreResult<Option<AdminUserRow>> {
        self.ensure_online()?;
        let mut users = self.admin_users.write().await;
        if let Some(email) = &input.email {
            if email_taken(&users, email, Some(id)) {
                return Err(StoreError::UniqueViolation(UQ_ADMIN_USERS_EMAIL.to_string()));
            }
        }
        let Some(row) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(email) = &input.email {
            row.email = email.clone();
        }
        if let Some(hash) = &input.password_hash {
            row.password_hash = hash.clone();
        }
        if let Some(is_admin) = input.is_admin {
            row.is_admin = is_admin;
        }
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        self.ensure_online()?;
        let mut users = self.admin_users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);
        let removed = users.len() < before;
        if removed {
            self.sessions
                .write()
                .await
                .retain(|s| s.admin_user_id != Some(id));
        }
        Ok(removed)
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn create(&self, input: &CreateSession) -> StoreResult<AdminSession> {
        self.ensure_online()?;
        let mut sessions = self.sessions.write().await;
        if sessions.iter().any(|s| s.token_id == input.token_id) {
            return Err(StoreError::UniqueViolation(
                UQ_ADMIN_SESSIONS_TOKEN_ID.to_string(),
            ));
        }
        let session = AdminSession {
            id: self.allocate_id(),
            token_id: input.token_id.clone(),
            subject: input.subject.clone(),
            admin_user_id: input.admin_user_id,
            is_admin: input.is_admin,
            expires_at: input.expires_at,
            revoked_at: None,
            created_at: Utc::now(),
        };
        sessions.push(session.clone());
        Ok(session)
    }

    async fn find_active(&self, token_id: &str) -> StoreResult<Option<AdminSession>> {
        self.ensure_online()?;
        let now = Utc::now();
        let sessions = self.sessions.read().await;
        Ok(sessions
            .iter()
            .find(|s| s.token_id == token_id && s.is_active(now))
            .cloned())
    }

    async fn revoke(&self, token_id: &str) -> StoreResult<bool> {
        self.ensure_online()?;
        let mut sessions = self.sessions.write().await;
        match sessions
            .iter_mut()
            .find(|s| s.token_id == token_id && s.revoked_at.is_none())
        {
            Some(session) => {
                session.revoked_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn revoke_for_user(&self, admin_user_id: DbId) -> StoreResult<u64> {
        self.ensure_online()?;
        let now = Utc::now();
        let mut revoked = 0;
        for session in self.sessions.write().await.iter_mut() {
            if session.admin_user_id == Some(admin_user_id) && session.revoked_at.is_none() {
                session.revoked_at = Some(now);
                revoked += 1;
            }
        }
        Ok(revoked)
    }

    async fn cleanup_expired(&self) -> StoreResult<u64> {
        self.ensure_online()?;
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|s| s.is_active(now));
        Ok((before - sessions.len()) as u64)
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn create(&self, input: &CreateSubmission) -> StoreResult<Submission> {
        self.ensure_online()?;
        let submission = Submission {
            id: self.allocate_id(),
            kind: input.kind.clone(),
            name: input.name.clone(),
            email: input.email.clone(),
            payload: input.payload.clone(),
            created_at: Utc::now(),
        };
        self.submissions.write().await.push(submission.clone());
        Ok(submission)
    }

    async fn list(&self, kind: Option<&str>, query: &ListQuery) -> StoreResult<Vec<Submission>> {
        self.ensure_online()?;
        let mut rows: Vec<Submission> = self
            .submissions
            .read()
            .await
            .iter()
            .filter(|s| kind.map_or(true, |k| s.kind == k))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(query.paginate(rows))
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        self.ensure_online()?;
        let mut rows = self.submissions.write().await;
        let before = rows.len();
        rows.retain(|s| s.id != id);
        Ok(rows.len() < before)
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> StoreResult<()> {
        self.ensure_online()
    }
}

// ---------------------------------------------------------------------------
// Bundle
// ---------------------------------------------------------------------------

/// Concrete handles behind an in-memory [`super::ContentStore`].
///
/// Keep a clone to inspect tables or take them offline from a test.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    pub projects: Arc<MemoryTable<Project>>,
    pub gallery: Arc<MemoryTable<GalleryItem>>,
    pub stories: Arc<MemoryTable<Story>>,
    pub leaders: Arc<MemoryTable<Leader>>,
    pub store: Arc<MemoryStore>,
}

impl MemoryBackend {
    /// Switch every table on or off at once.
    pub fn set_offline(&self, offline: bool) {
        self.projects.set_offline(offline);
        self.gallery.set_offline(offline);
        self.stories.set_offline(offline);
        self.leaders.set_offline(offline);
        self.store.set_offline(offline);
    }
}
