//! Request pieces shared by the handlers: path ids, paging and validated bodies.

use std::str::FromStr;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query},
    Json,
};
use doc_store::{Order, Page};
use serde::Deserialize;
use validator::Validate;

use super::error::ApiError;

/// Parses an id taken from the path. Anything that is not a UUID is rejected with the
/// "correct ID" message rather than a 404.
pub fn parse_id<I: FromStr>(raw: &str) -> Result<I, ApiError> {
    raw.parse().map_err(|_| ApiError::InvalidId(raw.to_string()))
}

/// Unwraps a JSON body and runs its validation rules.
pub fn validated<T: Validate>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    let Json(body) = payload?;
    body.validate()?;
    Ok(body)
}

/// `?offset=&limit=&sort=` on list endpoints. `sort` is `createdAt` (oldest first, the
/// default) or `-createdAt`.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub offset: Option<usize>,
    pub limit: Option<usize>,
    pub sort: Option<String>,
}

impl PageQuery {
    pub fn from_request(query: Result<Query<PageQuery>, QueryRejection>) -> Result<Page, ApiError> {
        let Query(query) = query?;
        let order = match query.sort.as_deref() {
            None | Some("createdAt") => Order::Oldest,
            Some("-createdAt") => Order::Newest,
            Some(other) => {
                return Err(ApiError::validation(format!(
                    "Cannot sort by {other:?}, use createdAt or -createdAt"
                )))
            }
        };
        Ok(Page::new(
            query.offset.unwrap_or(0),
            query.limit.unwrap_or(Page::DEFAULT_LIMIT),
        )
        .with_order(order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserId;

    #[test]
    fn malformed_id_is_rejected() {
        assert!(matches!(
            parse_id::<UserId>("not-an-id"),
            Err(ApiError::InvalidId(raw)) if raw == "not-an-id"
        ));
    }

    #[test]
    fn uuid_parses() {
        let id = UserId::new();
        assert_eq!(parse_id::<UserId>(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn page_defaults() {
        let page = PageQuery::from_request(Ok(Query(PageQuery::default()))).unwrap();
        assert_eq!(page, Page::default());
    }

    #[test]
    fn sort_on_creation_time() {
        let newest = PageQuery {
            sort: Some("-createdAt".into()),
            ..Default::default()
        };
        let page = PageQuery::from_request(Ok(Query(newest))).unwrap();
        assert_eq!(page.order, Order::Newest);

        let oldest = PageQuery {
            sort: Some("createdAt".into()),
            ..Default::default()
        };
        let page = PageQuery::from_request(Ok(Query(oldest))).unwrap();
        assert_eq!(page.order, Order::Oldest);
    }

    #[test]
    fn unknown_sort_key_is_rejected() {
        let query = PageQuery {
            sort: Some("email".into()),
            ..Default::default()
        };
        assert!(matches!(
            PageQuery::from_request(Ok(Query(query))),
            Err(ApiError::Validation { .. })
        ));
    }
}
