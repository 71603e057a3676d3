//! Actor identity boundary
//!
//! The identity collaborator authenticates callers upstream and forwards
//! the result in headers; this module turns those headers into a
//! [`CurrentActor`] extension and enforces role requirements per route
//! group. Credentials are never validated here: the core trusts the
//! supplied identity and authorizes by role only (ownership checks live in
//! the engine).

use crate::utils::AppError;
use axum::{
    extract::{FromRequestParts, Request},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use shared::actor::{Actor, Role};

/// Header carrying the authenticated actor ID
pub const ACTOR_ID_HEADER: &str = "x-actor-id";
/// Header carrying the actor display name (resolved by the identity service)
pub const ACTOR_NAME_HEADER: &str = "x-actor-name";
/// Header carrying the actor role
pub const ACTOR_ROLE_HEADER: &str = "x-actor-role";

/// Authenticated actor for the current request
#[derive(Debug, Clone)]
pub struct CurrentActor(pub Actor);

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Extract the actor identity from headers
///
/// Returns `None` when the identity headers are missing or malformed.
fn actor_from_headers(headers: &HeaderMap) -> Option<Actor> {
    let id = header_str(headers, ACTOR_ID_HEADER)?.trim();
    if id.is_empty() {
        return None;
    }
    let role: Role = header_str(headers, ACTOR_ROLE_HEADER)?.parse().ok()?;
    // The display name is advisory; fall back to the ID when absent
    let name = header_str(headers, ACTOR_NAME_HEADER)
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(id);
    Some(Actor::new(id, name, role))
}

/// Middleware: require an authenticated actor and inject [`CurrentActor`]
pub async fn require_actor(mut req: Request, next: Next) -> Result<Response, AppError> {
    let Some(actor) = actor_from_headers(req.headers()) else {
        return Err(AppError::Unauthorized);
    };
    req.extensions_mut().insert(CurrentActor(actor));
    Ok(next.run(req).await)
}

/// Middleware: kitchen staff or admin only
pub async fn require_staff(req: Request, next: Next) -> Result<Response, AppError> {
    match req.extensions().get::<CurrentActor>() {
        Some(CurrentActor(actor)) if actor.is_staff() => Ok(next.run(req).await),
        Some(_) => Err(AppError::Forbidden(
            "kitchen staff role required".to_string(),
        )),
        None => Err(AppError::Unauthorized),
    }
}

/// Middleware: admin only
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    match req.extensions().get::<CurrentActor>() {
        Some(CurrentActor(actor)) if actor.is_admin() => Ok(next.run(req).await),
        Some(_) => Err(AppError::Forbidden("admin role required".to_string())),
        None => Err(AppError::Unauthorized),
    }
}

impl<S> FromRequestParts<S> for CurrentActor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentActor>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(id: &str, name: Option<&str>, role: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACTOR_ID_HEADER, HeaderValue::from_str(id).unwrap());
        if let Some(name) = name {
            headers.insert(ACTOR_NAME_HEADER, HeaderValue::from_str(name).unwrap());
        }
        headers.insert(ACTOR_ROLE_HEADER, HeaderValue::from_str(role).unwrap());
        headers
    }

    #[test]
    fn test_actor_from_headers() {
        let actor = actor_from_headers(&headers("staff-1", Some("Ben"), "kitchen_staff")).unwrap();
        assert_eq!(actor.id, "staff-1");
        assert_eq!(actor.name, "Ben");
        assert_eq!(actor.role, Role::KitchenStaff);
    }

    #[test]
    fn test_missing_name_falls_back_to_id() {
        let actor = actor_from_headers(&headers("user-9", None, "customer")).unwrap();
        assert_eq!(actor.name, "user-9");
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!(actor_from_headers(&headers("u1", None, "root")).is_none());
    }

    #[test]
    fn test_missing_id_rejected() {
        let mut h = headers("u1", None, "customer");
        h.remove(ACTOR_ID_HEADER);
        assert!(actor_from_headers(&h).is_none());
    }
}
