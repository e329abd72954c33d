//! Validation of NGINX Ingress annotations.
//!
//! Every recognized annotation key has exactly one [`AnnotationRule`] in the
//! static [`RULES`] table. A rule is evaluated in three steps, stopping at the
//! first failure:
//!
//! 1. Tier gate: NGINX Plus annotations are forbidden on the base tier
//! 2. Value check: the raw value must match the rule's [`ValueKind`]
//! 3. Dependency: the annotation it depends on must be set to `true`
//!
//! Dependencies only read the raw annotation map, so rules never observe each
//! other's results and can be evaluated in any order.

pub mod values;

use std::collections::BTreeMap;

use crate::config::Tier;
use crate::field::{ErrorList, FieldError, Path};

pub const LB_METHOD: &str = "nginx.org/lb-method";
pub const MERGEABLE_INGRESS_TYPE: &str = "nginx.org/mergeable-ingress-type";
pub const HEALTH_CHECKS: &str = "nginx.com/health-checks";
pub const HEALTH_CHECKS_MANDATORY: &str = "nginx.com/health-checks-mandatory";
pub const HEALTH_CHECKS_MANDATORY_QUEUE: &str = "nginx.com/health-checks-mandatory-queue";
pub const SLOW_START: &str = "nginx.com/slow-start";
pub const SERVER_TOKENS: &str = "nginx.org/server-tokens";
pub const SERVER_SNIPPETS: &str = "nginx.org/server-snippets";
pub const LOCATION_SNIPPETS: &str = "nginx.org/location-snippets";

/// Which tiers may use an annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierGate {
    Any,
    PlusOnly,
}

/// Shape a value must have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// A load-balancing method for the active tier
    LbMethod,
    /// `master` or `minion`, never empty
    MergeableType,
    Boolean,
    NonNegativeInteger,
    /// NGINX time literal
    Time,
    /// Boolean on the base tier, any string with NGINX Plus
    ServerTokens,
    /// Free-form configuration text
    Snippets,
}

/// Validation rule for one annotation key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationRule {
    pub key: &'static str,
    pub tier: TierGate,
    pub value: ValueKind,
    /// Annotation that must be present and `true` for this one to be allowed
    pub depends_on: Option<&'static str>,
}

/// All recognized annotations
pub static RULES: &[AnnotationRule] = &[
    AnnotationRule {
        key: LB_METHOD,
        tier: TierGate::Any,
        value: ValueKind::LbMethod,
        depends_on: None,
    },
    AnnotationRule {
        key: MERGEABLE_INGRESS_TYPE,
        tier: TierGate::Any,
        value: ValueKind::MergeableType,
        depends_on: None,
    },
    AnnotationRule {
        key: HEALTH_CHECKS,
        tier: TierGate::PlusOnly,
        value: ValueKind::Boolean,
        depends_on: None,
    },
    AnnotationRule {
        key: HEALTH_CHECKS_MANDATORY,
        tier: TierGate::PlusOnly,
        value: ValueKind::Boolean,
        depends_on: Some(HEALTH_CHECKS),
    },
    AnnotationRule {
        key: HEALTH_CHECKS_MANDATORY_QUEUE,
        tier: TierGate::PlusOnly,
        value: ValueKind::NonNegativeInteger,
        depends_on: Some(HEALTH_CHECKS_MANDATORY),
    },
    AnnotationRule {
        key: SLOW_START,
        tier: TierGate::PlusOnly,
        value: ValueKind::Time,
        depends_on: None,
    },
    AnnotationRule {
        key: SERVER_TOKENS,
        tier: TierGate::Any,
        value: ValueKind::ServerTokens,
        depends_on: None,
    },
    AnnotationRule {
        key: SERVER_SNIPPETS,
        tier: TierGate::Any,
        value: ValueKind::Snippets,
        depends_on: None,
    },
    AnnotationRule {
        key: LOCATION_SNIPPETS,
        tier: TierGate::Any,
        value: ValueKind::Snippets,
        depends_on: None,
    },
];

/// Look up the rule for an annotation key
pub fn rule_for(key: &str) -> Option<&'static AnnotationRule> {
    RULES.iter().find(|rule| rule.key == key)
}

impl AnnotationRule {
    /// Validate `value` for this rule. `annotations` is the full raw map,
    /// used to resolve the dependency.
    pub fn validate(
        &self,
        value: &str,
        annotations: &BTreeMap<String, String>,
        tier: Tier,
        path: &Path,
    ) -> Option<FieldError> {
        if self.tier == TierGate::PlusOnly && !tier.is_plus() {
            return Some(FieldError::forbidden(
                path.clone(),
                "annotation requires NGINX Plus",
            ));
        }

        if let Some(err) = self.validate_value(value, tier, path) {
            return Some(err);
        }

        self.depends_on
            .and_then(|related| validate_related(related, annotations, path))
    }

    fn validate_value(&self, value: &str, tier: Tier, path: &Path) -> Option<FieldError> {
        match self.value {
            ValueKind::LbMethod => values::validate_lb_method(value, tier)
                .err()
                .map(|detail| FieldError::invalid(path.clone(), value, detail)),
            ValueKind::MergeableType => match value {
                "" => Some(FieldError::required(path.clone(), "")),
                "master" | "minion" => None,
                _ => Some(FieldError::invalid(
                    path.clone(),
                    value,
                    "must be one of: 'master' or 'minion'",
                )),
            },
            ValueKind::Boolean => invalid_boolean(value, path),
            ValueKind::NonNegativeInteger => (!values::is_non_negative_integer(value)).then(|| {
                FieldError::invalid(path.clone(), value, "must be a non-negative integer")
            }),
            ValueKind::Time => (!values::is_valid_time(value))
                .then(|| FieldError::invalid(path.clone(), value, "must be a valid time")),
            ValueKind::ServerTokens if tier.is_plus() => None,
            ValueKind::ServerTokens => invalid_boolean(value, path),
            ValueKind::Snippets => None,
        }
    }
}

fn invalid_boolean(value: &str, path: &Path) -> Option<FieldError> {
    values::parse_bool(value)
        .is_none()
        .then(|| FieldError::invalid(path.clone(), value, "must be a valid boolean"))
}

/// The related annotation must be present and literally `true`
fn validate_related(
    related: &str,
    annotations: &BTreeMap<String, String>,
    path: &Path,
) -> Option<FieldError> {
    match annotations.get(related).map(String::as_str) {
        None => Some(FieldError::forbidden(
            path.clone(),
            format!("related annotation {}: must be set", related),
        )),
        Some("true") => None,
        Some(_) => Some(FieldError::forbidden(
            path.clone(),
            format!("related annotation {}: must be true", related),
        )),
    }
}

/// Validate all recognized annotations in `annotations`.
///
/// Unknown keys are ignored. At most one error is reported per key, and the
/// result is sorted by annotation key.
pub fn validate_annotations(
    annotations: &BTreeMap<String, String>,
    tier: Tier,
    path: &Path,
) -> ErrorList {
    let mut errors: Vec<(&str, FieldError)> = RULES
        .iter()
        .filter_map(|rule| {
            let value = annotations.get(rule.key)?;
            rule.validate(value, annotations, tier, &path.child(rule.key))
                .map(|err| (rule.key, err))
        })
        .collect();

    errors.sort_by(|a, b| a.0.cmp(b.0));
    errors.into_iter().map(|(_, err)| err).collect()
}
