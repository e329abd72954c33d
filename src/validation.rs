//! Top-level Ingress validation.
//!
//! Composes the annotation and spec validators into the single decision
//! function a controller or admission webhook calls.

use std::collections::BTreeMap;

use k8s_openapi::api::networking::v1::{Ingress, IngressSpec};
use tracing::debug;

use crate::annotations::validate_annotations;
use crate::config::Tier;
use crate::error::{Error, Result};
use crate::field::{ErrorList, Path};
use crate::spec::IngressShape;

/// Validate an Ingress for the given tier.
///
/// Annotation errors always precede spec errors. An empty list means the
/// Ingress is valid.
pub fn validate_ingress(ingress: &Ingress, tier: Tier) -> ErrorList {
    let annotations = ingress.metadata.annotations.as_ref();
    let shape = IngressShape::from_annotations(annotations);

    let empty_annotations = BTreeMap::new();
    let mut errors = validate_annotations(
        annotations.unwrap_or(&empty_annotations),
        tier,
        &Path::new("annotations"),
    );

    let empty_spec = IngressSpec::default();
    let spec = ingress.spec.as_ref().unwrap_or(&empty_spec);
    errors.append(shape.validate(spec, &Path::new("spec")));

    debug!(
        name = %display_name(ingress),
        tier = %tier,
        shape = ?shape,
        errors = errors.len(),
        "Validated ingress"
    );

    errors
}

/// Validate an Ingress and turn a non-empty error list into [`Error::Invalid`]
pub fn ensure_valid(ingress: &Ingress, tier: Tier) -> Result<()> {
    let errors = validate_ingress(ingress, tier);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::Invalid {
            name: display_name(ingress),
            errors,
        })
    }
}

/// `namespace/name` of the Ingress, or just the name for cluster-less input
pub fn display_name(ingress: &Ingress) -> String {
    let name = ingress.metadata.name.as_deref().unwrap_or("<unnamed>");
    match ingress.metadata.namespace.as_deref() {
        Some(ns) => format!("{}/{}", ns, name),
        None => name.to_string(),
    }
}
