use crate::models::Record;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the per-field client-side filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterField {
    Name,
    Description,
    Price,
    Country,
    City,
    Address,
}

impl FilterField {
    pub const ALL: [FilterField; 6] = [
        FilterField::Name,
        FilterField::Description,
        FilterField::Price,
        FilterField::Country,
        FilterField::City,
        FilterField::Address,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterField::Name => "name",
            FilterField::Description => "description",
            FilterField::Price => "price",
            FilterField::Country => "country",
            FilterField::City => "city",
            FilterField::Address => "address",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterField::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown filter field {s:?}"))
    }
}

/// Per-field text constraints applied to the loaded record set.
/// An empty value means no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    pub name: String,
    pub description: String,
    /// Matched as a raw substring of the price text
    pub price: String,
    pub country: String,
    pub city: String,
    pub address: String,
}

impl Filters {
    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Name => &self.name,
            FilterField::Description => &self.description,
            FilterField::Price => &self.price,
            FilterField::Country => &self.country,
            FilterField::City => &self.city,
            FilterField::Address => &self.address,
        }
    }

    /// Replace one field's value. Returns whether the value changed.
    pub fn set(&mut self, field: FilterField, value: impl Into<String>) -> bool {
        let value = value.into();
        let slot = match field {
            FilterField::Name => &mut self.name,
            FilterField::Description => &mut self.description,
            FilterField::Price => &mut self.price,
            FilterField::Country => &mut self.country,
            FilterField::City => &mut self.city,
            FilterField::Address => &mut self.address,
        };
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }

    pub fn is_empty(&self) -> bool {
        FilterField::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// Whether `record` satisfies every field at once
    pub fn matches(&self, record: &Record) -> bool {
        contains_folded(record.name(), &self.name)
            && contains_folded(record.description(), &self.description)
            && record.price_text().contains(self.price.as_str())
            && contains_folded(record.country(), &self.country)
            && contains_folded(record.city(), &self.city)
            && contains_folded(record.address(), &self.address)
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}
