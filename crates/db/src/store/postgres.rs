//! PostgreSQL-backed store. Every call delegates to a repository.

use async_trait::async_trait;
use teamunited_core::listing::ListQuery;
use teamunited_core::types::DbId;

use super::{
    AdminUserStore, Record, SessionStore, StoreError, StoreHealth, StoreResult, SubmissionStore,
    Table,
};
use crate::models::admin_user::{AdminUserRow, CreateAdminUser, UpdateAdminUser};
use crate::models::gallery::GalleryItem;
use crate::models::leader::Leader;
use crate::models::project::Project;
use crate::models::session::{AdminSession, CreateSession};
use crate::models::story::Story;
use crate::models::submission::{CreateSubmission, Submission};
use crate::repositories::{
    AdminUserRepo, GalleryRepo, LeaderRepo, ProjectRepo, SessionRepo, StoryRepo, SubmissionRepo,
};
use crate::DbPool;

/// Store handle over a PostgreSQL pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn check_filter<E: Record>(query: &ListQuery) -> StoreResult<()> {
    query
        .ensure_filterable(E::TABLE, E::CATEGORY_COLUMN)
        .map_err(|e| StoreError::Rejected(e.to_string()))
}

/// Implement [`Table`] for a content record by forwarding to its repository.
macro_rules! pg_table {
    ($record:ty, $repo:ty) => {
        #[async_trait]
        impl Table<$record> for PgStore {
            async fn list(&self, query: &ListQuery) -> StoreResult<Vec<$record>> {
                check_filter::<$record>(query)?;
                Ok(<$repo>::list(&self.pool, query).await?)
            }

            async fn find_by_id(&self, id: DbId) -> StoreResult<Option<$record>> {
                Ok(<$repo>::find_by_id(&self.pool, id).await?)
            }

            async fn create(
                &self,
                input: &<$record as Record>::Create,
            ) -> StoreResult<$record> {
                Ok(<$repo>::create(&self.pool, input).await?)
            }

            async fn update(
                &self,
                id: DbId,
                input: &<$record as Record>::Update,
            ) -> StoreResult<Option<$record>> {
                Ok(<$repo>::update(&self.pool, id, input).await?)
            }

            async fn delete(&self, id: DbId) -> StoreResult<bool> {
                Ok(<$repo>::delete(&self.pool, id).await?)
            }
        }
    };
}

pg_table!(Project, ProjectRepo);
pg_table!(GalleryItem, GalleryRepo);
pg_table!(Story, StoryRepo);
pg_table!(Leader, LeaderRepo);

#[async_trait]
impl AdminUserStore for PgStore {
    async fn list(&self) -> StoreResult<Vec<AdminUserRow>> {
        Ok(AdminUserRepo::list(&self.pool).await?)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<AdminUserRow>> {
        Ok(AdminUserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<AdminUserRow>> {
        Ok(AdminUserRepo::find_by_email(&self.pool, email).await?)
    }

    async fn create(&self, input: &CreateAdminUser) -> StoreResult<AdminUserRow> {
        Ok(AdminUserRepo::create(&self.pool, input).await?)
    }

    async fn update(
        &self,
        id: DbId,
        input: &UpdateAdminUser,
    ) -> StoreResult<Option<AdminUserRow>> {
        Ok(AdminUserRepo::update(&self.pool, id, input).await?)
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        Ok(AdminUserRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl SessionStore for PgStore {
    async fn create(&self, input: &CreateSession) -> StoreResult<AdminSession> {
        Ok(SessionRepo::create(&self.pool, input).await?)
    }

    async fn find_active(&self, token_id: &str) -> StoreResult<Option<AdminSession>> {
        Ok(SessionRepo::find_active(&self.pool, token_id).await?)
    }

    async fn revoke(&self, token_id: &str) -> StoreResult<bool> {
        Ok(SessionRepo::revoke(&self.pool, token_id).await?)
    }

    async fn revoke_for_user(&self, admin_user_id: DbId) -> StoreResult<u64> {
        Ok(SessionRepo::revoke_for_user(&self.pool, admin_user_id).await?)
    }

    async fn cleanup_expired(&self) -> StoreResult<u64> {
        Ok(SessionRepo::cleanup_expired(&self.pool).await?)
    }
}

#[async_trait]
impl SubmissionStore for PgStore {
    async fn create(&self, input: &CreateSubmission) -> StoreResult<Submission> {
        Ok(SubmissionRepo::create(&self.pool, input).await?)
    }

    async fn list(&self, kind: Option<&str>, query: &ListQuery) -> StoreResult<Vec<Submission>> {
        Ok(SubmissionRepo::list(&self.pool, kind, query).await?)
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        Ok(SubmissionRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl StoreHealth for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
