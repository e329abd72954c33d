//! ingress-validator library crate
//!
//! Admission-time validation of Kubernetes Ingress resources for the NGINX
//! Ingress Controller. The entry point is [`validate_ingress`], a pure
//! function of an Ingress and the feature [`Tier`] that returns an ordered
//! [`ErrorList`]: annotation errors sorted by key, then spec errors.
//!
//! This module exports the validators, the error model, and the adapters
//! used by the controller and admission webhook.

pub mod admission;
pub mod annotations;
pub mod config;
pub mod error;
pub mod field;
pub mod manifest;
pub mod spec;
pub mod validation;

pub use admission::{ValidationResult, review};
pub use annotations::validate_annotations;
pub use config::{Config, Tier};
pub use error::{Error, Result};
pub use field::{ErrorKind, ErrorList, FieldError, Path};
pub use spec::IngressShape;
pub use validation::{ensure_valid, validate_ingress};
