//! Canned listing sources for unit tests.

use crate::loader::traits::ListingSource;
use crate::loader::LoadError;
use crate::models::{Location, Price, Record, RecordId};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Answers each fetch with the next scripted result and remembers the query
pub struct ScriptedSource {
    responses: Mutex<VecDeque<Result<Vec<Record>, LoadError>>>,
    queries: Mutex<Vec<Option<String>>>,
}

impl ScriptedSource {
    pub fn new(responses: Vec<Result<Vec<Record>, LoadError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<Option<String>> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ListingSource for ScriptedSource {
    async fn fetch(&self, query: Option<&str>) -> Result<Vec<Record>, LoadError> {
        self.queries.lock().unwrap().push(query.map(str::to_string));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LoadError::Transport("no scripted response left".into())))
    }

    fn source_name(&self) -> &'static str {
        "scripted"
    }
}

pub fn record(id: i64, name: &str) -> Record {
    Record {
        id: RecordId::Number(id),
        name: Some(name.to_string()),
        description: None,
        price: None,
        image: None,
        location: None,
        features: Vec::new(),
    }
}

pub fn listing(id: i64, name: &str, price: i64, country: &str, city: &str, address: &str) -> Record {
    Record {
        id: RecordId::Number(id),
        name: Some(name.to_string()),
        description: Some(format!("{name} in {city}")),
        price: Some(Price::Number(price.into())),
        image: Some(format!("https://img.example/{id}.jpg")),
        location: Some(Location {
            country: Some(country.to_string()),
            city: Some(city.to_string()),
            address: Some(address.to_string()),
        }),
        features: Vec::new(),
    }
}

/// `count` listings named `Listing 1..=count`
pub fn numbered(count: i64) -> Vec<Record> {
    (1..=count).map(|i| record(i, &format!("Listing {i}"))).collect()
}
