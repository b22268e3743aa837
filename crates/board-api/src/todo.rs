use std::sync::Arc;

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{Html, Redirect},
};
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::{error, info, warn};

use board_db::Database;
use board_db::models::TodoRow;
use board_types::api::ChangeTodoForm;

use crate::error::ApiError;
use crate::templates::{Template, escape_html};

pub type TodoState = Arc<TodoStateInner>;

pub struct TodoStateInner {
    pub db: Arc<Database>,
    pub page: Template,
}

/// GET / — the page with the most recent todo as its only list item.
pub async fn index(State(state): State<TodoState>) -> Result<Html<String>, ApiError> {
    let db = state.db.clone();
    let latest = tokio::task::spawn_blocking(move || db.latest_todo())
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            anyhow::anyhow!("spawn_blocking join error: {}", e)
        })??;

    Ok(Html(render_page(&state.page, latest.as_ref())))
}

/// POST /change — store the submitted title and send the browser back to `/`.
pub async fn change(
    State(state): State<TodoState>,
    Form(form): Form<ChangeTodoForm>,
) -> Result<Redirect, ApiError> {
    let db = state.db.clone();
    let title = form.title;
    let id = tokio::task::spawn_blocking(move || db.insert_todo(&title))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            anyhow::anyhow!("spawn_blocking join error: {}", e)
        })??;

    info!("Stored todo {}", id);
    Ok(Redirect::to("/"))
}

/// Any other method on /change gets an empty reply.
pub async fn ignore() -> StatusCode {
    StatusCode::OK
}

pub fn render_page(page: &Template, latest: Option<&TodoRow>) -> String {
    let items = latest
        .map(|row| format!("<li>{}</li>", escape_html(&row.title)))
        .unwrap_or_default();
    let updated = latest
        .map(|row| format_timestamp(&row.created_at))
        .unwrap_or_else(|| "never".to_string());

    page.render(&[("items", &items), ("updated", &updated)])
}

fn format_timestamp(raw: &str) -> String {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            // SQLite's datetime('now') is "YYYY-MM-DD HH:MM:SS" without a zone; it is UTC.
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .map(|ts| ts.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|e| {
            warn!("Corrupt created_at '{}': {}", raw, e);
            raw.to_string()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::todo_router;
    use axum::{
        Router,
        body::Body,
        http::{Request, header},
    };
    use board_db::Schema;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> (Router, Arc<Database>) {
        let db = Arc::new(Database::open_in_memory(Schema::Todo).unwrap());
        let state = Arc::new(TodoStateInner {
            db: db.clone(),
            page: Template::from_source("<ul>{{items}}</ul>"),
        });
        (todo_router(state), db)
    }

    async fn body_string(app: &Router, req: Request<Body>) -> (StatusCode, String) {
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn change_req(title: &str) -> Request<Body> {
        Request::post("/change")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!("title={title}")))
            .unwrap()
    }

    #[tokio::test]
    async fn empty_board_renders_empty_list() {
        let (app, _) = app();
        let (status, body) = body_string(&app, Request::get("/").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<ul></ul>");
    }

    #[tokio::test]
    async fn change_redirects_and_shows_latest() {
        let (app, db) = app();

        let resp = app.clone().oneshot(change_req("first")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[header::LOCATION], "/");

        app.clone().oneshot(change_req("second")).await.unwrap();

        let (_, body) = body_string(&app, Request::get("/").body(Body::empty()).unwrap()).await;
        assert_eq!(body, "<ul><li>second</li></ul>");
        assert_eq!(db.latest_todo().unwrap().unwrap().title, "second");
    }

    #[tokio::test]
    async fn titles_are_escaped() {
        let (app, _) = app();
        app.clone().oneshot(change_req("%3Cb%3Ehi%3C%2Fb%3E")).await.unwrap();

        let (_, body) = body_string(&app, Request::get("/").body(Body::empty()).unwrap()).await;
        assert_eq!(body, "<ul><li>&lt;b&gt;hi&lt;/b&gt;</li></ul>");
    }

    #[tokio::test]
    async fn non_post_change_is_ignored() {
        let (app, db) = app();
        let (status, body) =
            body_string(&app, Request::get("/change").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
        assert!(db.latest_todo().unwrap().is_none());
    }

    #[test]
    fn page_shows_update_time() {
        let page = Template::from_source("{{items}}|{{updated}}");
        let row = TodoRow {
            id: 1,
            title: "a".to_string(),
            created_at: "2026-10-19 08:30:00".to_string(),
        };
        assert_eq!(render_page(&page, Some(&row)), "<li>a</li>|2026-10-19 08:30 UTC");
        assert_eq!(render_page(&page, None), "|never");
    }

    #[test]
    fn title_with_placeholder_text_is_kept() {
        let page = Template::from_source("<ul>{{items}}</ul><p>{{updated}}</p>");
        let row = TodoRow {
            id: 1,
            title: "remember {{updated}}".to_string(),
            created_at: "2026-10-19 08:30:00".to_string(),
        };
        assert_eq!(
            render_page(&page, Some(&row)),
            "<ul><li>remember {{updated}}</li></ul><p>2026-10-19 08:30 UTC</p>"
        );
    }
}
