use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use tracing::debug;

use crate::server::error::Error;

/// the single `{id}` path segment of a route, rejected with a 404 when it's missing or blank.
/// routes with a trailing slash and no id are sent through this too, so they fail before any
/// upstream gets touched
pub struct RequiredId(pub String);

impl<S> FromRequestParts<S> for RequiredId
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let id = match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(id)) => id,
            Err(rejection) => {
                debug!("no usable id on {}: {}", parts.uri.path(), rejection);
                String::new()
            }
        };

        if id.trim().is_empty() {
            return Err(Error::InvalidId(format!("Invalid id: {}", id)));
        }

        Ok(RequiredId(id))
    }
}
