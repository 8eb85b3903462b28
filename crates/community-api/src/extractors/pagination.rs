//! Pagination extractor
//!
//! Reads `?page=&limit=` into a [`Page`]. Out-of-range values are rejected
//! rather than clamped.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use community_core::Page;
use community_service::dto::PageQuery;
use validator::Validate;

use crate::response::ApiError;

#[derive(Debug, Clone, Copy, Default)]
pub struct Pagination(pub Page);

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<PageQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        query.validate()?;

        Ok(Pagination(query.page()))
    }
}
