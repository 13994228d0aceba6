//! Qualified-key parsing.
//!
//! Every entity in the wire format is identified by a flattened key of the
//! form `{scope_type}_{scope_name}__{local_name}`, e.g. `package_p__Bit1`
//! or `streamlet_comp__std_in`. The local-name segment may carry leading
//! underscores (stripped) or be missing entirely, in which case the entity
//! is an anonymous placeholder that never joins the canonical namespace.
//! Keys whose scope token is not one the source language emits (front-end
//! temporaries such as `generated_0__stream`) keep their full key as name.

use std::fmt;

/// Separator between the scope segment and the local name.
pub const SCOPE_SEPARATOR: &str = "__";

/// Prefix applied upstream to port names that collide with reserved words
/// of the target language (`in`, `out`, ...).
pub const RESERVED_ESCAPE_PREFIX: &str = "std_";

/// The kind of scope an entity was declared in.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScopeType {
    Package,
    Streamlet,
    Impl,
    Group,
    Union,
    Instance,
    /// Any other token; the entity is undefined in the source namespace.
    Unknown(String),
}

impl ScopeType {
    /// Classify a scope token.
    pub fn from_token(token: &str) -> Self {
        match token {
            "package" => ScopeType::Package,
            "streamlet" => ScopeType::Streamlet,
            "impl" => ScopeType::Impl,
            "group" => ScopeType::Group,
            "union" => ScopeType::Union,
            "instance" => ScopeType::Instance,
            other => ScopeType::Unknown(other.to_owned()),
        }
    }

    /// The token as it appears in a qualified key.
    pub fn as_str(&self) -> &str {
        match self {
            ScopeType::Package => "package",
            ScopeType::Streamlet => "streamlet",
            ScopeType::Impl => "impl",
            ScopeType::Group => "group",
            ScopeType::Union => "union",
            ScopeType::Instance => "instance",
            ScopeType::Unknown(token) => token,
        }
    }

    /// Whether this is one of the scope tokens the source language emits.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, ScopeType::Unknown(_))
    }
}

impl fmt::Display for ScopeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scope metadata parsed from a qualified key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScopeInfo {
    pub scope_type: ScopeType,
    pub scope_name: String,
    /// Local name with leading underscores stripped; `None` for anonymous
    /// entities.
    pub local_name: Option<String>,
}

impl ScopeInfo {
    /// Any recognized scope token places the entity in the source namespace.
    pub fn defined(&self) -> bool {
        self.scope_type.is_recognized()
    }

    /// Anonymous entities carry no local name and are never canonical.
    pub fn is_anonymous(&self) -> bool {
        self.local_name.is_none()
    }

    /// The display name: the local name of a defined entity, otherwise the
    /// full key.
    pub fn name_or<'a>(&'a self, key: &'a str) -> &'a str {
        match &self.local_name {
            Some(local) if self.defined() => local,
            _ => key,
        }
    }
}

/// A qualified key that is missing a segment its scope type requires.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyError {
    pub key: String,
    pub reason: &'static str,
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed qualified key `{}`: {}", self.key, self.reason)
    }
}

impl std::error::Error for KeyError {}

/// Parse a qualified key into its scope metadata and local name.
pub fn parse(key: &str) -> Result<ScopeInfo, KeyError> {
    if key.is_empty() {
        return Err(KeyError {
            key: String::new(),
            reason: "key is empty",
        });
    }

    let mut segments = key.split(SCOPE_SEPARATOR);
    let scope = segments.next().unwrap_or_default();
    let local_name = segments
        .next()
        .map(|local| local.trim_start_matches('_'))
        .filter(|local| !local.is_empty())
        .map(str::to_owned);

    let (token, scope_name) = scope.split_once('_').unwrap_or((scope, ""));
    let scope_type = ScopeType::from_token(token);
    if scope_type.is_recognized() && scope_name.is_empty() {
        return Err(KeyError {
            key: key.to_owned(),
            reason: "scope segment has no scope name",
        });
    }

    Ok(ScopeInfo {
        scope_type,
        scope_name: scope_name.to_owned(),
        local_name,
    })
}

/// The local segment of a member key (port, instance, net), or the whole key
/// when it carries no scope separator.
pub fn member_name(key: &str) -> &str {
    key.split(SCOPE_SEPARATOR).nth(1).unwrap_or(key)
}

/// Strip the reserved-word escape from a port name.
pub fn unescape_port(name: &str) -> &str {
    name.strip_prefix(RESERVED_ESCAPE_PREFIX).unwrap_or(name)
}

/// Normalize a port key to the port name the target language sees.
pub fn port_name(key: &str) -> &str {
    unescape_port(member_name(key))
}
