use axum::response::Html;

const HOME_PAGE: &str = r#"<!DOCTYPE html>
<html>
    <head><title>MediCare AI API</title></head>
    <body style="font-family: Arial; padding: 40px; background: #f5f5f5;">
        <h1 style="color: #0066FF;">MediCare AI - Backend API</h1>
        <p style="font-size: 18px;">Backend is running successfully!</p>
        <h3>Available Endpoints:</h3>
        <ul style="font-size: 16px;">
            <li><code>POST /predict</code> - Disease prediction</li>
            <li><code>GET /health</code> - Health check</li>
            <li><code>GET /models</code> - List loaded models</li>
            <li><code>GET /api-docs/openapi.json</code> - OpenAPI document</li>
        </ul>
        <p>Frontend URL: Open <code>index.html</code> in browser</p>
    </body>
</html>
"#;

/// Landing page listing the endpoints
#[utoipa::path(
    get,
    path = "/",
    tag = "info",
    responses(
        (status = 200, description = "Informational HTML page", content_type = "text/html", body = String)
    )
)]
pub async fn home() -> Html<&'static str> {
    Html(HOME_PAGE)
}
