use axum::{
    body::{Body, to_bytes},
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use tracing::error;

/// 日志中最多记录的响应体字节数
const MAX_LOGGED_BODY: usize = 4096;

/// 记录所有 5xx 响应的方法、路径和响应体，响应体原样返回给客户端
pub async fn log_errors(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let response = next.run(req).await;

    if !response.status().is_server_error() {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            error!(%method, %path, "failed to read error response body: {}", e);
            return Response::from_parts(parts, Body::empty());
        }
    };

    let logged = &bytes[..bytes.len().min(MAX_LOGGED_BODY)];
    error!(
        %method,
        %path,
        status = %parts.status,
        body = %String::from_utf8_lossy(logged),
        truncated = bytes.len() > MAX_LOGGED_BODY,
        "server error"
    );

    // 重置body以便重新构建响应
    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(bytes))
}

#[cfg(test)]
mod tests {
    use axum::{Router, http::StatusCode, routing::get};
    use tower::ServiceExt;

    use super::*;

    fn app(body: String) -> Router {
        Router::new()
            .route(
                "/boom",
                get(move || {
                    let body = body.clone();
                    async move { (StatusCode::INTERNAL_SERVER_ERROR, body) }
                }),
            )
            .layer(axum::middleware::from_fn(log_errors))
    }

    #[tokio::test]
    async fn large_error_body_reaches_the_client_intact() {
        let body = "x".repeat(MAX_LOGGED_BODY * 3);
        let request = Request::builder().uri("/boom").body(Body::empty()).unwrap();

        let response = app(body.clone()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(bytes.len(), body.len());
    }

    #[tokio::test]
    async fn small_error_body_is_kept() {
        let request = Request::builder().uri("/boom").body(Body::empty()).unwrap();

        let response = app("storage down".into()).oneshot(request).await.unwrap();

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"storage down");
    }
}
