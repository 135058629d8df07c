use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

// region: Procedure Service Types

/// A titled, typed step of the parcel search/claim workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Procedure {
    pub id: i32,
    pub title: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub procedure_type: String,
    pub content: String,
    pub sort_order: i32,
    pub is_expanded: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-supplied fields of a procedure, used for both create and full update.
///
/// Every field falls back to its zero value when absent or `null` so that a
/// partial body reaches domain validation instead of failing deserialization.
/// Server-owned fields (`id`, timestamps) present in the body are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ProcedurePayload {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub procedure_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sort_order: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub is_expanded: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// endregion: Procedure Service Types

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_defaults_missing_fields() {
        let payload: ProcedurePayload = serde_json::from_str(r#"{"title":""}"#).unwrap();
        assert_eq!(payload, ProcedurePayload::default());
    }

    #[test]
    fn payload_reads_type_and_ignores_server_fields() {
        let payload: ProcedurePayload = serde_json::from_str(
            r#"{"id":42,"title":"Check status","type":"manual","sort_order":3,"created_at":"2025-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(payload.procedure_type, "manual");
        assert_eq!(payload.sort_order, 3);
        assert!(payload.content.is_empty());
    }

    #[test]
    fn payload_treats_null_as_zero_value() {
        let payload: ProcedurePayload = serde_json::from_str(
            r#"{"title":"Check status","type":"manual","content":null,"sort_order":null,"is_expanded":null}"#,
        )
        .unwrap();
        assert_eq!(payload.title, "Check status");
        assert_eq!(payload.content, "");
        assert_eq!(payload.sort_order, 0);
        assert!(!payload.is_expanded);
    }

    #[test]
    fn procedure_serializes_type_key() {
        let now = Utc::now();
        let procedure = Procedure {
            id: 1,
            title: "Check status".into(),
            procedure_type: "manual".into(),
            content: String::new(),
            sort_order: 1,
            is_expanded: false,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&procedure).unwrap();
        assert_eq!(json["type"], "manual");
        assert!(json.get("procedure_type").is_none());
    }
}
