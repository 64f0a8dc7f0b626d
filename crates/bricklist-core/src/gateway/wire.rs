//! Wire payloads and response parsing for the catalogue API
//!
//! Parsing is pure (JSON string in, domain types out) so it can be tested
//! without a server. All accepted server field-name variants collapse to
//! the canonical shape here; nothing downstream sees an alias or a gapped
//! position sequence.

use serde::{Deserialize, Serialize};

use super::GatewayError;
use bricklist_domain::{CatalogSet, ListDetail, ListSummary, SetNum};

/// Body of the add-to-collection and add-item-to-list calls.
#[derive(Debug, Serialize)]
pub(crate) struct SetIdPayload<'a> {
    pub set_id: &'a SetNum,
}

/// Body of the persist-order calls: a full replacement ordering.
#[derive(Debug, Serialize)]
pub(crate) struct OrderPayload<'a> {
    pub ordered_set_ids: &'a [SetNum],
}

/// Error detail shape used by the API (`{"detail": "..."}`).
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Best-effort human-readable message from an error response body.
pub(crate) fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: Some(detail),
        }) => detail,
        _ => body.trim().to_string(),
    }
}

/// Parse a collection membership response into catalog summaries.
pub(crate) fn parse_set_rows(json: &str) -> Result<Vec<CatalogSet>, GatewayError> {
    serde_json::from_str(json).map_err(|e| GatewayError::Parse(format!("set rows: {}", e)))
}

/// Parse the list index response into summaries.
pub(crate) fn parse_list_summaries(json: &str) -> Result<Vec<ListSummary>, GatewayError> {
    serde_json::from_str(json).map_err(|e| GatewayError::Parse(format!("list summaries: {}", e)))
}

/// Parse a list detail response. Items come back sorted by the server's
/// position values, renumbered dense from zero.
pub(crate) fn parse_list_detail(json: &str) -> Result<ListDetail, GatewayError> {
    let mut detail: ListDetail =
        serde_json::from_str(json).map_err(|e| GatewayError::Parse(format!("list detail: {}", e)))?;
    detail.normalize();
    Ok(detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detail_prefers_detail_field() {
        assert_eq!(error_detail(r#"{"detail": "List not found"}"#), "List not found");
        assert_eq!(error_detail("plain text error"), "plain text error");
        assert_eq!(error_detail(r#"{"other": 1}"#), r#"{"other": 1}"#);
    }

    #[test]
    fn test_parse_set_rows() {
        let json = r#"[
            {"set_num": "10305-1", "name": "Lion Knights' Castle", "year": 2022,
             "theme": "Icons", "pieces": 4514, "image_url": "https://img.example/10305.jpg"},
            {"set_num": "21318-1", "name": "Tree House", "setImageUrl": "https://img.example/21318.jpg"}
        ]"#;
        let rows = parse_set_rows(json).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].set_id.as_str(), "10305-1");
        assert_eq!(rows[0].pieces, Some(4514));
        assert_eq!(
            rows[1].image_url.as_deref(),
            Some("https://img.example/21318.jpg")
        );
    }

    #[test]
    fn test_parse_set_rows_rejects_garbage() {
        assert!(matches!(
            parse_set_rows("{not json"),
            Err(GatewayError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_list_summaries() {
        let json = r#"[
            {"id": 3, "title": "Modulars", "is_public": true, "items_count": 5,
             "created_at": "2024-03-01T10:00:00Z", "updated_at": "2024-04-01T10:00:00Z"},
            {"id": 9, "title": "Someday", "is_public": false, "items_count": 0}
        ]"#;
        let lists = parse_list_summaries(json).unwrap();
        assert_eq!(lists.len(), 2);
        assert_eq!(lists[0].title, "Modulars");
        assert!(!lists[1].is_public);
        assert!(lists[1].created_at.is_none());
    }

    #[test]
    fn test_parse_list_detail_renumbers_dense() {
        let json = r#"{
            "id": 3, "title": "Modulars", "is_public": true,
            "items": [
                {"set_num": "10270-1", "position": 4},
                {"set_num": "10255-1", "position": 1}
            ]
        }"#;
        let detail = parse_list_detail(json).unwrap();
        let ids: Vec<&str> = detail.items.iter().map(|it| it.set_id.as_str()).collect();
        assert_eq!(ids, ["10255-1", "10270-1"]);
        let positions: Vec<u32> = detail.items.iter().map(|it| it.position).collect();
        assert_eq!(positions, [0, 1]);
    }

    #[test]
    fn test_payload_shapes() {
        let set = SetNum::new("10305-1");
        let body = serde_json::to_string(&SetIdPayload { set_id: &set }).unwrap();
        assert_eq!(body, r#"{"set_id":"10305-1"}"#);

        let order = vec![SetNum::new("B"), SetNum::new("A")];
        let body = serde_json::to_string(&OrderPayload {
            ordered_set_ids: &order,
        })
        .unwrap();
        assert_eq!(body, r#"{"ordered_set_ids":["B","A"]}"#);
    }
}
