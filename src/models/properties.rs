//! Feature property access with ordered key fallback.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;

/// Free-form feature attributes.
pub type Properties = serde_json::Map<String, Value>;

/// Display name used when no canton key yields a value.
pub const UNNAMED: &str = "unnamed";

/// Ordered list of candidate property keys; the first present, non-empty value wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyKeys(Vec<String>);

impl PropertyKeys {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keys.into_iter().map(Into::into).collect())
    }

    /// Province (ADM1) attribute chain: `NAME_1`, then `province`
    pub fn province() -> Self {
        Self::new(["NAME_1", "province"])
    }

    /// Canton (ADM2) display-name chain: `NAME_2`, then `name`
    pub fn canton() -> Self {
        Self::new(["NAME_2", "name"])
    }

    pub fn keys(&self) -> &[String] {
        &self.0
    }

    /// First non-empty textual value among the candidate keys.
    pub fn first_text<'a>(&self, properties: &'a Properties) -> Option<Cow<'a, str>> {
        first_text(properties, &self.0)
    }
}

/// Resolve the first key whose value is a non-empty string.
///
/// Numbers and booleans are rendered as text; `null`, arrays and objects are
/// treated as absent.
pub fn first_text<'a, K>(properties: &'a Properties, keys: &[K]) -> Option<Cow<'a, str>>
where
    K: AsRef<str>,
{
    keys.iter().find_map(|key| match properties.get(key.as_ref())? {
        Value::String(s) if !s.is_empty() => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        _ => None,
    })
}

/// Property key chains used by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(default = "PropertyKeys::province")]
    pub province: PropertyKeys,

    #[serde(default = "PropertyKeys::canton")]
    pub canton: PropertyKeys,
}

impl Default for PropertySchema {
    fn default() -> Self {
        Self {
            province: PropertyKeys::province(),
            canton: PropertyKeys::canton(),
        }
    }
}
