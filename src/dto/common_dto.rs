//! Response envelopes shared by every resource
//!
//! Lists: `{ success, data, total }`. Single reads: `{ success, data }`.
//! Mutations: `{ message, <entity>: {...} }`. Deletes: `{ message, success }`.

use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub total: usize,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            total: data.len(),
            data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// `{ "message": ..., "<key>": entity }`
pub fn mutation_response<T: Serialize>(message: &str, key: &str, entity: T) -> Json<Value> {
    let mut body = Map::new();
    body.insert("message".to_string(), Value::String(message.to_string()));
    body.insert(
        key.to_string(),
        serde_json::to_value(entity).unwrap_or(Value::Null),
    );
    Json(Value::Object(body))
}

pub fn delete_response(message: &str) -> Json<Value> {
    Json(json!({
        "message": message,
        "success": true,
    }))
}

/// `?id=` selector accepted next to the path form `/:id`
#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_response_counts_items() {
        let body = serde_json::to_value(ListResponse::new(vec![1, 2, 3])).unwrap();
        assert_eq!(body["total"], 3);
        assert_eq!(body["success"], true);
    }

    #[test]
    fn test_mutation_response_uses_entity_key() {
        let Json(body) = mutation_response("Job created", "job", json!({ "jobNumber": "AAL-AI-25-001" }));
        assert_eq!(body["message"], "Job created");
        assert_eq!(body["job"]["jobNumber"], "AAL-AI-25-001");
    }
}
