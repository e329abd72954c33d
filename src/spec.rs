//! Structural validation of the Ingress spec.
//!
//! The shape an Ingress must have depends on the mergeable-ingress-type
//! annotation:
//!
//! - Standalone: at least one rule, every host set and unique
//! - Master: exactly one rule carrying no paths; minions supply them
//! - Minion: exactly one rule with at least one path and no TLS
//!
//! Errors are reported rule count first, then per-rule errors in rule order,
//! then whole-spec errors.

use std::collections::{BTreeMap, HashSet};

use k8s_openapi::api::networking::v1::{IngressRule, IngressSpec};

use crate::annotations::MERGEABLE_INGRESS_TYPE;
use crate::field::{ErrorList, FieldError, Path};

/// Spec shape selected by the mergeable-ingress-type annotation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum IngressShape {
    #[default]
    Standalone,
    Master,
    Minion,
}

impl IngressShape {
    /// Select the shape from the raw annotation value.
    ///
    /// Anything other than `master` or `minion`, including a missing
    /// annotation, selects [`IngressShape::Standalone`].
    pub fn from_annotations(annotations: Option<&BTreeMap<String, String>>) -> Self {
        match annotations
            .and_then(|a| a.get(MERGEABLE_INGRESS_TYPE))
            .map(String::as_str)
        {
            Some("master") => IngressShape::Master,
            Some("minion") => IngressShape::Minion,
            _ => IngressShape::Standalone,
        }
    }

    /// Validate `spec` against this shape
    pub fn validate(self, spec: &IngressSpec, path: &Path) -> ErrorList {
        match self {
            IngressShape::Standalone => validate_ingress_spec(spec, path),
            IngressShape::Master => validate_master_spec(spec, path),
            IngressShape::Minion => validate_minion_spec(spec, path),
        }
    }
}

fn rules(spec: &IngressSpec) -> &[IngressRule] {
    spec.rules.as_deref().unwrap_or_default()
}

fn host(rule: &IngressRule) -> &str {
    rule.host.as_deref().unwrap_or_default()
}

fn path_count(rule: &IngressRule) -> usize {
    rule.http.as_ref().map_or(0, |http| http.paths.len())
}

fn paths_path(rules_path: &Path, index: usize) -> Path {
    rules_path.index(index).child("http").child("paths")
}

/// Validate a standalone Ingress spec
pub fn validate_ingress_spec(spec: &IngressSpec, path: &Path) -> ErrorList {
    let mut errors = ErrorList::new();
    let rules_path = path.child("rules");
    let rules = rules(spec);

    if rules.is_empty() {
        errors.push(FieldError::required(rules_path.clone(), ""));
    }

    let mut seen = HashSet::new();
    for (i, rule) in rules.iter().enumerate() {
        let host = host(rule);
        let host_path = rules_path.index(i).child("host");
        if host.is_empty() {
            errors.push(FieldError::required(host_path, ""));
        } else if !seen.insert(host) {
            errors.push(FieldError::duplicate(host_path, host));
        }
    }

    errors
}

/// Check the single-rule bound shared by masters and minions.
///
/// Returns the rule to inspect further when the bound holds. When there are
/// too many rules only the host of rule 0 is still checked.
fn validate_single_rule<'a>(
    rules: &'a [IngressRule],
    rules_path: &Path,
    errors: &mut ErrorList,
) -> Option<&'a IngressRule> {
    match rules {
        [] => {
            errors.push(FieldError::required(rules_path.clone(), ""));
            None
        }
        [rule] => {
            validate_rule_host(rule, rules_path, errors);
            Some(rule)
        }
        [first, ..] => {
            errors.push(FieldError::too_many(rules_path.clone(), rules.len(), 1));
            validate_rule_host(first, rules_path, errors);
            None
        }
    }
}

fn validate_rule_host(rule: &IngressRule, rules_path: &Path, errors: &mut ErrorList) {
    if host(rule).is_empty() {
        errors.push(FieldError::required(rules_path.index(0).child("host"), ""));
    }
}

/// Validate the spec of a master Ingress
pub fn validate_master_spec(spec: &IngressSpec, path: &Path) -> ErrorList {
    let mut errors = ErrorList::new();
    let rules_path = path.child("rules");

    if let Some(rule) = validate_single_rule(rules(spec), &rules_path, &mut errors) {
        let paths = path_count(rule);
        if paths > 0 {
            errors.push(FieldError::too_many(paths_path(&rules_path, 0), paths, 0));
        }
    }

    errors
}

/// Validate the spec of a minion Ingress
pub fn validate_minion_spec(spec: &IngressSpec, path: &Path) -> ErrorList {
    let mut errors = ErrorList::new();
    let rules_path = path.child("rules");

    if let Some(rule) = validate_single_rule(rules(spec), &rules_path, &mut errors)
        && path_count(rule) == 0
    {
        errors.push(FieldError::required(
            paths_path(&rules_path, 0),
            "must include at least one path",
        ));
    }

    let tls = spec.tls.as_deref().unwrap_or_default();
    if !tls.is_empty() {
        errors.push(FieldError::too_many(path.child("tls"), tls.len(), 0));
    }

    errors
}
