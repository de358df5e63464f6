//! Repository layer for database operations.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept a `&PgPool` and return `Result<T, sqlx::Error>`.
//!
//! Content-table lists share one shape: an optional category filter, then
//! `ORDER BY created_at DESC, id DESC`, then `LIMIT`/`OFFSET`. Binding a
//! NULL limit returns every row.

pub mod admin_user_repo;
pub mod gallery_repo;
pub mod leader_repo;
pub mod project_repo;
pub mod session_repo;
pub mod story_repo;
pub mod submission_repo;

pub use admin_user_repo::AdminUserRepo;
pub use gallery_repo::GalleryRepo;
pub use leader_repo::LeaderRepo;
pub use project_repo::ProjectRepo;
pub use session_repo::SessionRepo;
pub use story_repo::StoryRepo;
pub use submission_repo::SubmissionRepo;
