use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One pricing entry as shown to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingResponse {
    pub id: Uuid,
    pub header: String,
    pub searches_left: i64,
    pub discount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequest {
    pub header: String,
    pub searches_left: i64,
    pub discount: f64,
}

impl PricingRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.header.trim().is_empty() {
            return Err("Header is required");
        }
        if self.searches_left < 0 {
            return Err("Searches left cannot be negative");
        }
        if !(0.0..=100.0).contains(&self.discount) {
            return Err("Discount must be between 0 and 100");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_field_names() {
        let req: PricingRequest = serde_json::from_value(json!({
            "header": "Premium",
            "searchesLeft": 500,
            "discount": 12.5
        }))
        .unwrap();
        assert_eq!(req.header, "Premium");
        assert_eq!(req.searches_left, 500);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_validation_bounds() {
        let base = |header: &str, searches: i64, discount: f64| PricingRequest {
            header: header.into(),
            searches_left: searches,
            discount,
        };
        assert!(base(" ", 1, 0.0).validate().is_err());
        assert!(base("h", -1, 0.0).validate().is_err());
        assert!(base("h", 1, -0.5).validate().is_err());
        assert!(base("h", 1, 100.5).validate().is_err());
        assert!(base("h", 0, 100.0).validate().is_ok());
    }

    #[test]
    fn test_response_is_camel_case() {
        let now = Utc::now();
        let body = serde_json::to_value(PricingResponse {
            id: Uuid::nil(),
            header: "Premium".into(),
            searches_left: 500,
            discount: 12.5,
            created_at: now,
            updated_at: now,
        })
        .unwrap();
        assert!(body.get("searchesLeft").is_some());
        assert!(body.get("createdAt").is_some());
    }
}
