//! Loading Ingress manifests.
//!
//! Accepts the JSON printed by `kubectl get ingress -o json`: either a single
//! Ingress or a `List` of them.

use k8s_openapi::api::networking::v1::Ingress;
use serde_json::Value;

use crate::error::{Error, Result};

/// Parse one Ingress or a list of Ingresses from a JSON document
pub fn parse_ingresses(input: &str) -> Result<Vec<Ingress>> {
    let document: Value = serde_json::from_str(input)?;

    match document.get("kind").and_then(Value::as_str) {
        Some("Ingress") => Ok(vec![serde_json::from_value(document)?]),
        Some(kind) if kind.ends_with("List") => {
            let items = match document.get("items") {
                Some(Value::Array(items)) => items.clone(),
                Some(Value::Null) | None => Vec::new(),
                Some(_) => return Err(Error::Manifest(format!("{} items must be an array", kind))),
            };
            items
                .into_iter()
                .map(|item| serde_json::from_value(item).map_err(Error::from))
                .collect()
        }
        Some(kind) => Err(Error::Manifest(format!("expected Ingress or List, got {}", kind))),
        None => Err(Error::Manifest("document has no kind".to_string())),
    }
}
