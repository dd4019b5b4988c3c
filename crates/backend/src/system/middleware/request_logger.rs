use axum::body::Body;
use axum::http::{header, Request};
use axum::middleware::Next;
use axum::response::Response;

/// Middleware для логирования HTTP запросов
///
/// Пишет в лог:
/// - Метод и путь
/// - Статус код
/// - Размер ответа (если известен)
/// - Длительность (ms)
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let size = response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let status = response.status().as_u16();
    let elapsed_ms = start.elapsed().as_millis() as u64;

    if response.status().is_server_error() {
        tracing::error!(%method, %path, status, %size, elapsed_ms, "request failed");
    } else if response.status().is_client_error() {
        tracing::warn!(%method, %path, status, %size, elapsed_ms, "request rejected");
    } else {
        tracing::info!(%method, %path, status, %size, elapsed_ms, "request served");
    }

    response
}
