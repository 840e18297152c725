use crate::api::handlers::words::types::WordResponse;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Body for add/remove. The id arrives as a string so a malformed value
/// can be reported as 400 instead of a generic deserialize failure.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    pub word_id: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedFavorites {
    pub favorites: Vec<WordResponse>,
    pub page: i64,
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_favorite_request_field_name() {
        let req: FavoriteRequest =
            serde_json::from_value(json!({"wordId": "not-checked-here"})).unwrap();
        assert_eq!(req.word_id, "not-checked-here");
    }

    #[test]
    fn test_paginated_response_shape() {
        let body = serde_json::to_value(PaginatedFavorites {
            favorites: vec![],
            page: 3,
            has_more: false,
        })
        .unwrap();
        assert_eq!(body, json!({"favorites": [], "page": 3, "hasMore": false}));
    }
}
