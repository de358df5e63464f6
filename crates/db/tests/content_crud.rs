//! Content table CRUD against PostgreSQL.
//!
//! These need a live database (`DATABASE_URL`); run with `--ignored`.

use sqlx::PgPool;
use teamunited_core::listing::ListQuery;
use teamunited_db::models::leader::CreateLeader;
use teamunited_db::models::project::{CreateProject, Project, UpdateProject};
use teamunited_db::models::story::{CreateStory, Story};
use teamunited_db::repositories::{LeaderRepo, ProjectRepo, StoryRepo};
use teamunited_db::store::{ContentStore, HasTable, StoreError, Table};

fn project(title: &str, category: &str) -> CreateProject {
    CreateProject {
        title: title.into(),
        location: "Abuja".into(),
        category: category.into(),
        ..CreateProject::default()
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn test_bootstrap(pool: PgPool) {
    teamunited_db::health_check(&pool).await.unwrap();

    for table in ["projects", "gallery", "stories", "leaders", "admin_users", "admin_sessions", "submissions"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn test_newest_project_listed_first(pool: PgPool) {
    ProjectRepo::create(&pool, &project("Reading Club", "Education"))
        .await
        .unwrap();
    ProjectRepo::create(&pool, &project("Clean Water", "Environment"))
        .await
        .unwrap();

    let latest = ProjectRepo::list(&pool, &ListQuery::latest(1)).await.unwrap();
    assert_eq!(latest.len(), 1);
    assert_eq!(latest[0].title, "Clean Water");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn test_category_filter(pool: PgPool) {
    ProjectRepo::create(&pool, &project("A", "Charity")).await.unwrap();
    ProjectRepo::create(&pool, &project("B", "Technology")).await.unwrap();

    let charity = ProjectRepo::list(&pool, &ListQuery::all().with_category("Charity"))
        .await
        .unwrap();
    assert_eq!(charity.len(), 1);
    assert_eq!(charity[0].title, "A");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn test_partial_update(pool: PgPool) {
    let created = ProjectRepo::create(&pool, &project("Clean Water", "Environment"))
        .await
        .unwrap();

    let changes = UpdateProject {
        status: Some("Completed".into()),
        ..UpdateProject::default()
    };
    let updated = ProjectRepo::update(&pool, created.id, &changes)
        .await
        .unwrap()
        .expect("row should exist");

    assert_eq!(updated.status, "Completed");
    assert_eq!(updated.title, "Clean Water");
    assert!(updated.updated_at >= created.updated_at);

    assert!(ProjectRepo::update(&pool, 999_999, &changes).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn test_delete_removes_row(pool: PgPool) {
    let story = StoryRepo::create(
        &pool,
        &CreateStory {
            name: "Amina".into(),
            location: "Kaduna".into(),
            project: "Clean Water".into(),
            profile_image_url: "https://example.org/amina.jpg".into(),
            quote: "Water changed everything.".into(),
            story: "Long story".into(),
            impact: "300 families".into(),
        },
    )
    .await
    .unwrap();

    assert!(StoryRepo::delete(&pool, story.id).await.unwrap());
    assert!(!StoryRepo::delete(&pool, story.id).await.unwrap());
    assert!(StoryRepo::find_by_id(&pool, story.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn test_leader_limit_and_offset(pool: PgPool) {
    for name in ["One", "Two", "Three"] {
        LeaderRepo::create(
            &pool,
            &CreateLeader {
                name: name.into(),
                role: "Director".into(),
                image_url: "https://example.org/l.jpg".into(),
            },
        )
        .await
        .unwrap();
    }

    let page = LeaderRepo::list(
        &pool,
        &ListQuery {
            limit: Some(1),
            offset: Some(1),
            category: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].name, "Two");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn test_store_rejects_filter_on_uncategorized_table(pool: PgPool) {
    let store = ContentStore::postgres(pool);
    let stories = <ContentStore as HasTable<Story>>::table(&store);
    let err = stories
        .list(&ListQuery::all().with_category("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Rejected(_)));

    let projects = <ContentStore as HasTable<Project>>::table(&store);
    assert!(projects.list(&ListQuery::all()).await.unwrap().is_empty());
}
