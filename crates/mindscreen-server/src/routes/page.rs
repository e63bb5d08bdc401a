use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// The single-page client.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
