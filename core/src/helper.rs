//! Helper function table: resolves call targets to names.

use std::collections::HashMap;
use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

use crate::error::ConfigError;

/// Name printed for call targets that have no known name.
pub const UNKNOWN_HELPER: &str = "unknown_helper";

/// A helper function the translated code may call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HelperInfo {
    #[serde(rename = "address", deserialize_with = "de_address")]
    pub func: u64,
    #[serde(default)]
    pub name: Option<String>,
}

/// Parse a helper address written as `0x...` hex or decimal.
pub fn parse_address(s: &str) -> Option<u64> {
    let s = s.trim();
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16).ok(),
        None => s.replace('_', "").parse().ok(),
    }
}

// TOML integers stop at i64::MAX; upper-half addresses come in as strings.
fn de_address<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    struct AddressVisitor;

    impl Visitor<'_> for AddressVisitor {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a non-negative integer or a hex/decimal address string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
            u64::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
            parse_address(v).ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }

    d.deserialize_any(AddressVisitor)
}

/// Read-only lookup of helpers by address.
pub trait HelperLookup {
    fn find_helper(&self, func: u64) -> Option<&HelperInfo>;

    /// Display name for a call target, falling back to
    /// [`UNKNOWN_HELPER`] when the address is unknown or unnamed.
    fn helper_name(&self, func: u64) -> &str {
        self.find_helper(func)
            .and_then(|h| h.name.as_deref())
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_HELPER)
    }
}

/// In-memory helper table keyed by function address.
#[derive(Debug, Clone, Default)]
pub struct HelperTable {
    map: HashMap<u64, HelperInfo>,
}

#[derive(Deserialize)]
struct HelperFile {
    #[serde(default)]
    helper: Vec<HelperInfo>,
}

impl HelperTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `[[helper]]` entries (`address`, optional `name`) from TOML.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let file: HelperFile = toml::from_str(s)?;
        Ok(file.helper.into_iter().collect())
    }

    pub fn insert(&mut self, func: u64, name: &str) {
        self.register(HelperInfo {
            func,
            name: Some(name.to_string()),
        });
    }

    /// Add or replace a helper entry.
    pub fn register(&mut self, info: HelperInfo) {
        self.map.insert(info.func, info);
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl HelperLookup for HelperTable {
    fn find_helper(&self, func: u64) -> Option<&HelperInfo> {
        self.map.get(&func)
    }
}

impl FromIterator<HelperInfo> for HelperTable {
    fn from_iter<I: IntoIterator<Item = HelperInfo>>(iter: I) -> Self {
        let mut table = Self::new();
        for info in iter {
            table.register(info);
        }
        table
    }
}

impl<'a> FromIterator<(u64, &'a str)> for HelperTable {
    fn from_iter<I: IntoIterator<Item = (u64, &'a str)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (func, name) in iter {
            table.insert(func, name);
        }
        table
    }
}
