use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a listing, numeric or textual depending on the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl RecordId {
    /// Compare against user-typed input, e.g. `show 42`
    pub fn matches_str(&self, raw: &str) -> bool {
        match self {
            RecordId::Number(n) => raw.trim().parse::<i64>().map_or(false, |r| r == *n),
            RecordId::Text(s) => s == raw.trim(),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

/// Asking price as delivered by the backend: a JSON number or numeric-like text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Price {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
                (Some(i), _, _) => write!(f, "{}", i),
                (_, Some(u), _) => write!(f, "{}", u),
                // f64's Display drops the fraction of whole values: 1e2 -> "100"
                (_, _, Some(v)) => write!(f, "{}", v),
                _ => write!(f, "{}", n),
            },
            Price::Text(s) => f.write_str(s),
        }
    }
}

impl Price {
    pub fn is_zero(&self) -> bool {
        matches!(self, Price::Number(n) if n.as_f64() == Some(0.0))
    }
}

/// Location information for a listing
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Location {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Core listing data model.
///
/// Everything except `id` is optional on the wire; accessors read a missing
/// text field as `""`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub id: RecordId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default, rename = "img")]
    pub image: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub features: Vec<String>,
}

impl Record {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn image(&self) -> &str {
        self.image.as_deref().unwrap_or("")
    }

    /// Price text the price filter matches against: empty when absent or
    /// numerically zero
    pub fn price_text(&self) -> String {
        match &self.price {
            Some(price) if !price.is_zero() => price.to_string(),
            _ => String::new(),
        }
    }

    /// Price as shown to the user, `0` included
    pub fn price_label(&self) -> String {
        self.price.as_ref().map(Price::to_string).unwrap_or_default()
    }

    pub fn country(&self) -> &str {
        self.location
            .as_ref()
            .and_then(|l| l.country.as_deref())
            .unwrap_or("")
    }

    pub fn city(&self) -> &str {
        self.location
            .as_ref()
            .and_then(|l| l.city.as_deref())
            .unwrap_or("")
    }

    pub fn address(&self) -> &str {
        self.location
            .as_ref()
            .and_then(|l| l.address.as_deref())
            .unwrap_or("")
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
