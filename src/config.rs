//! Runtime configuration.
//!
//! The only knob the engine needs is the feature tier, taken from the
//! `NGINX_PLUS` environment variable or the matching command-line flag.

use std::fmt;

use crate::annotations::values::parse_bool;
use crate::error::{Error, Result};

/// Environment variable that enables the NGINX Plus feature tier
pub const PLUS_ENV: &str = "NGINX_PLUS";

/// Feature tier the controller runs with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Open source NGINX
    #[default]
    Base,
    /// NGINX Plus, which unlocks additional annotations and LB methods
    Plus,
}

impl Tier {
    pub fn is_plus(self) -> bool {
        self == Tier::Plus
    }
}

impl From<bool> for Tier {
    fn from(is_plus: bool) -> Self {
        if is_plus { Tier::Plus } else { Tier::Base }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Base => write!(f, "nginx"),
            Tier::Plus => write!(f, "nginx-plus"),
        }
    }
}

/// Validator configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub tier: Tier,
}

/// Parse a tier flag value. Blank means the base tier.
pub fn parse_tier(raw: &str) -> Result<Tier> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(Tier::Base);
    }
    parse_bool(value)
        .map(Tier::from)
        .ok_or_else(|| Error::Config(format!("{} must be a valid boolean (got {:?})", PLUS_ENV, raw)))
}

impl Config {
    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tier = match lookup(PLUS_ENV) {
            None => Tier::Base,
            Some(raw) => parse_tier(&raw)?,
        };
        Ok(Self { tier })
    }
}
