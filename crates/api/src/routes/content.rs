//! Route definitions for the content tables.

use axum::routing::get;
use axum::Router;
use teamunited_db::models::gallery::GalleryItem;
use teamunited_db::models::leader::Leader;
use teamunited_db::models::project::Project;
use teamunited_db::models::story::Story;
use teamunited_db::store::{ContentStore, HasTable, Record};

use crate::handlers::{content, projects};
use crate::state::AppState;

/// `/{E::ROUTE}` and `/{E::ROUTE}/{id}` for one record type.
fn table_routes<E>() -> Router<AppState>
where
    E: Record,
    ContentStore: HasTable<E>,
{
    let base = format!("/{}", E::ROUTE);
    let item = format!("/{}/{{id}}", E::ROUTE);

    Router::new()
        .route(&base, get(content::list::<E>).post(content::create::<E>))
        .route(
            &item,
            get(content::get_by_id::<E>)
                .put(content::update::<E>)
                .delete(content::delete::<E>),
        )
}

/// Routes for projects, gallery, stories and leaders.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects/categories", get(projects::categories))
        .merge(table_routes::<Project>())
        .merge(table_routes::<GalleryItem>())
        .merge(table_routes::<Story>())
        .merge(table_routes::<Leader>())
}
