use axum::response::Html;

const DASHBOARD_HTML: &str = include_str!("../../../static/dashboard.html");

/// GET /: the dashboard page. It polls `/api/dashboard` and listens on `/ws`.
pub async fn index() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}
