//! In-Memory Backend
//!
//! Stands in for a real purchases API. Serves read-only collections out of
//! memory, shaped like an HTTP JSON API.

use std::cell::Cell;
use std::collections::BTreeMap;

use async_trait::async_trait;
use percent_encoding::percent_decode_str;
use regex::RegexBuilder;
use serde_json::{json, Value};

use crate::config::AppConfig;
use crate::fetch::{HttpBackend, HttpResponse, PURCHASES_COLLECTION};
use crate::model::PurchaseRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
        }
    }
}

/// Named collections of JSON records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryDb {
    collections: BTreeMap<String, Vec<Value>>,
}

impl InMemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// The demo data: two unfinished purchases
    pub fn seed() -> Self {
        let purchases = [
            PurchaseRecord::new("Bread", false),
            PurchaseRecord::new("Milk", false),
        ];
        let mut db = Self::new();
        db.insert_collection(
            PURCHASES_COLLECTION,
            purchases
                .iter()
                .map(|p| json!({ "name": p.name, "completed": p.completed }))
                .collect(),
        );
        db
    }

    pub fn insert_collection(&mut self, name: &str, records: Vec<Value>) {
        self.collections.insert(name.to_string(), records);
    }

    pub fn collection(&self, name: &str) -> Option<&[Value]> {
        self.collections.get(name).map(Vec::as_slice)
    }
}

pub struct InMemoryBackend {
    db: InMemoryDb,
    api_base: String,
    data_encapsulation: bool,
    requests: Cell<u32>,
}

impl InMemoryBackend {
    pub fn new(db: InMemoryDb, config: &AppConfig) -> Self {
        Self {
            db,
            api_base: config.api_base.trim_matches('/').to_string(),
            data_encapsulation: config.data_encapsulation,
            requests: Cell::new(0),
        }
    }

    pub fn request_count(&self) -> u32 {
        self.requests.get()
    }

    pub fn handle(&self, request: &HttpRequest) -> HttpResponse {
        self.requests.set(self.requests.get() + 1);

        if request.method != Method::Get {
            log::warn!("{:?} {} rejected: collections are read-only", request.method, request.url);
            return error_response(405, format!("{:?} is not supported", request.method));
        }

        let (path, query) = match request.url.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (request.url.as_str(), None),
        };

        let Some(name) = self.collection_name(path) else {
            return error_response(404, format!("no collection at `{}`", path));
        };
        let Some(records) = self.db.collection(name) else {
            return error_response(404, format!("collection `{}` not found", name));
        };

        let filtered = match query {
            Some(query) => match filter_records(records, query) {
                Ok(filtered) => filtered,
                Err(message) => return error_response(400, message),
            },
            None => records.to_vec(),
        };

        let body = if self.data_encapsulation {
            json!({ "data": filtered })
        } else {
            Value::Array(filtered)
        };
        HttpResponse::new(200, body.to_string())
    }

    fn collection_name<'a>(&self, path: &'a str) -> Option<&'a str> {
        let path = path.trim_matches('/');
        let rest = if self.api_base.is_empty() {
            path
        } else {
            path.strip_prefix(self.api_base.as_str())?.strip_prefix('/')?
        };
        if rest.is_empty() || rest.contains('/') {
            None
        } else {
            Some(rest)
        }
    }
}

#[async_trait(?Send)]
impl HttpBackend for InMemoryBackend {
    async fn get(&self, url: &str) -> HttpResponse {
        self.handle(&HttpRequest::get(url))
    }
}

fn error_response(status: u16, message: String) -> HttpResponse {
    HttpResponse::new(status, json!({ "error": message }).to_string())
}

/// Keep records whose fields match every `field=pattern` pair, where the
/// pattern is a case-insensitive regular expression.
fn filter_records(records: &[Value], query: &str) -> Result<Vec<Value>, String> {
    let mut conditions = Vec::new();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (raw_field, raw_pattern) = pair.split_once('=').unwrap_or((pair, ""));
        let field = decode_component(raw_field)?;
        let pattern = decode_component(raw_pattern)?;
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| format!("invalid filter for `{}`: {}", field, e))?;
        conditions.push((field, regex));
    }

    Ok(records
        .iter()
        .filter(|record| {
            conditions.iter().all(|(field, regex)| match record.get(field.as_str()) {
                Some(Value::String(s)) => regex.is_match(s),
                Some(Value::Null) | None => false,
                Some(other) => regex.is_match(&other.to_string()),
            })
        })
        .cloned()
        .collect())
}

/// Form-style decoding of one query component: `+` is a space, then `%XX`
fn decode_component(raw: &str) -> Result<String, String> {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| format!("query component `{}` is not UTF-8: {}", raw, e))
}
