use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// A dictionary entry across the three languages.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WordResponse {
    pub id: Uuid,
    pub sub_term: String,
    pub japanese: String,
    pub myanmar: String,
    pub english: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for create and update. All terms are required, the image is not.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WordRequest {
    pub sub_term: String,
    pub japanese: String,
    pub myanmar: String,
    pub english: String,
    pub image_url: Option<String>,
}

impl WordRequest {
    /// Terms must be non-empty after trimming.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.sub_term.trim().is_empty()
            || self.japanese.trim().is_empty()
            || self.myanmar.trim().is_empty()
            || self.english.trim().is_empty()
        {
            return Err("All word terms are required");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// `q` is the short form older clients send.
    #[serde(alias = "q")]
    pub query: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_word_request_field_names() {
        let req: WordRequest = serde_json::from_value(json!({
            "subTerm": "挨拶",
            "japanese": "こんにちは",
            "myanmar": "မင်္ဂလာပါ",
            "english": "hello",
            "imageUrl": "https://cdn.example.com/hello.png"
        }))
        .unwrap();
        assert_eq!(req.sub_term, "挨拶");
        assert_eq!(req.image_url.as_deref(), Some("https://cdn.example.com/hello.png"));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_image_url_is_optional() {
        let req: WordRequest = serde_json::from_value(json!({
            "subTerm": "s", "japanese": "j", "myanmar": "m", "english": "e"
        }))
        .unwrap();
        assert_eq!(req.image_url, None);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_blank_terms_rejected() {
        let req: WordRequest = serde_json::from_value(json!({
            "subTerm": "  ", "japanese": "j", "myanmar": "m", "english": "e"
        }))
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_search_query_accepts_both_keys() {
        let short: SearchQuery = serde_json::from_value(json!({"q": "cat"})).unwrap();
        assert_eq!(short.query, "cat");
        let long: SearchQuery = serde_json::from_value(json!({"query": "dog"})).unwrap();
        assert_eq!(long.query, "dog");
    }

    #[test]
    fn test_word_response_is_camel_case() {
        let now = Utc::now();
        let body = serde_json::to_value(WordResponse {
            id: Uuid::nil(),
            sub_term: "挨拶".into(),
            japanese: "こんにちは".into(),
            myanmar: "မင်္ဂလာပါ".into(),
            english: "hello".into(),
            image_url: None,
            created_at: now,
            updated_at: now,
        })
        .unwrap();
        assert!(body.get("subTerm").is_some());
        assert!(body.get("createdAt").is_some());
        // imageUrl omitted when absent
        assert!(body.get("imageUrl").is_none());
    }
}
