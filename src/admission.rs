//! Admission verdicts for Ingress resources.
//!
//! Maps the result of [`validate_ingress`] onto a kube-rs
//! [`AdmissionResponse`]. Serving the response (HTTP, TLS, the
//! `ValidatingWebhookConfiguration`) is up to the caller.

use k8s_openapi::api::networking::v1::Ingress;
use kube::core::admission::{AdmissionRequest, AdmissionResponse, Operation};
use tracing::{debug, error, info, warn};

use crate::config::Tier;
use crate::field::ErrorList;
use crate::validation::validate_ingress;

/// Denial reason for Ingresses that fail validation
pub const REASON_INVALID_INGRESS: &str = "InvalidIngress";
/// Denial reason for malformed admission requests
pub const REASON_INVALID_REQUEST: &str = "InvalidRequest";

/// Result of a validation check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// The validation passed
    Allowed,
    /// The validation failed
    Denied {
        /// Machine-readable reason for denial
        reason: String,
        /// Detailed message
        message: String,
    },
}

impl ValidationResult {
    /// Create a denied result
    pub fn denied(reason: &str, message: &str) -> Self {
        Self::Denied {
            reason: reason.to_string(),
            message: message.to_string(),
        }
    }

    /// Allowed when there are no field errors, otherwise denied with all of them
    pub fn from_errors(errors: &ErrorList) -> Self {
        if errors.is_empty() {
            Self::Allowed
        } else {
            Self::denied(REASON_INVALID_INGRESS, &errors.to_string())
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Create a denial response with reason embedded in message.
/// kube-rs deny() only sets status.message, so we format as "[reason] message"
fn deny_with_reason(
    request: &AdmissionRequest<Ingress>,
    message: &str,
    reason: &str,
) -> AdmissionResponse {
    AdmissionResponse::from(request).deny(format!("[{}] {}", reason, message))
}

/// Decide an admission request for an Ingress
pub fn review(request: &AdmissionRequest<Ingress>, tier: Tier) -> AdmissionResponse {
    let uid = &request.uid;
    debug!(
        uid = %uid,
        operation = ?request.operation,
        namespace = ?request.namespace,
        name = %request.name,
        "Processing admission request"
    );

    // DELETE operations are always allowed
    if request.operation == Operation::Delete {
        info!(uid = %uid, "Admission request allowed (DELETE)");
        return AdmissionResponse::from(request);
    }

    let Some(ingress) = request.object.as_ref() else {
        error!(uid = %uid, "Missing object in request");
        return deny_with_reason(request, "Missing object in request", REASON_INVALID_REQUEST);
    };

    match ValidationResult::from_errors(&validate_ingress(ingress, tier)) {
        ValidationResult::Allowed => {
            info!(uid = %uid, "Admission request allowed");
            AdmissionResponse::from(request)
        }
        ValidationResult::Denied { reason, message } => {
            warn!(uid = %uid, reason = %reason, message = %message, "Admission request denied");
            deny_with_reason(request, &message, &reason)
        }
    }
}
