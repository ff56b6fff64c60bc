use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};

/// Middleware that requires valid JWT authentication
pub async fn require_auth(mut req: Request, next: Next) -> Result<Response, StatusCode> {
    let token = bearer_token(&req)?;
    let claims = validate_claims(&token).await?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Middleware that requires admin privileges
pub async fn require_admin(mut req: Request, next: Next) -> Result<Response, StatusCode> {
    let token = bearer_token(&req)?;
    let claims = validate_claims(&token).await?;
    if !claims.is_admin {
        return Err(StatusCode::FORBIDDEN);
    }
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Extract the bearer token from the `Authorization` header.
fn bearer_token(req: &Request) -> Result<String, StatusCode> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|auth_header| auth_header.strip_prefix("Bearer "))
        .map(|token| token.to_string())
        .ok_or(StatusCode::UNAUTHORIZED)
}

async fn validate_claims(
    token: &str,
) -> Result<contracts::system::auth::TokenClaims, StatusCode> {
    super::jwt::validate_token(token)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)
}
