/// HTTP middleware for the API server
///
/// # Modules
///
/// Currently only the security-header middleware lives here; request
/// tracing and CORS come from tower-http layers in the router builder.

use axum::{extract::Request, middleware::Next, response::Response};

/// Adds baseline security headers to every response
///
/// The API serves JSON only, so the set is small: no sniffing, no framing,
/// and a conservative referrer policy.
pub async fn security_headers(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;

    let headers = response.headers_mut();
    headers.insert("X-Content-Type-Options", "nosniff".parse().unwrap());
    headers.insert("X-Frame-Options", "DENY".parse().unwrap());
    headers.insert(
        "Referrer-Policy",
        "strict-origin-when-cross-origin".parse().unwrap(),
    );

    response
}
