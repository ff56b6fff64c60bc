use axum::body::Body;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Простой middleware для логирования запросов: метод, путь, статус,
/// длительность
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let millis = start.elapsed().as_millis();
    if response.status().is_success() {
        tracing::info!("{:>5}ms | {} {} {}", millis, status, method, path);
    } else {
        tracing::warn!("{:>5}ms | {} {} {}", millis, status, method, path);
    }

    response
}
