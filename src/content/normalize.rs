//! Resource normalization: wrapper unwrapping, entry mapping, ordering

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::cmp::Ordering;

use super::entry::{ContentEntry, RawEntry};
use super::LoadError;
use crate::helpers::parse_date;

/// Slug to raw entry fields, in source order
pub type EntryMap = IndexMap<String, Value>;

/// Top-level shapes a content resource comes in.
///
/// Older exports wrap the mapping as `[{ "data": { ... } }]`; newer ones
/// are the plain mapping. Anything else holds no entries.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawResource {
    Mapping(EntryMap),
    Wrapped(Vec<Value>),
    Other(Value),
}

impl RawResource {
    fn into_mapping(self) -> EntryMap {
        match self {
            RawResource::Mapping(map) => map,
            RawResource::Wrapped(items) => items
                .into_iter()
                .next()
                .and_then(|first| match first {
                    Value::Object(mut wrapper) => wrapper.remove("data"),
                    _ => None,
                })
                .and_then(|data| match data {
                    Value::Object(map) => Some(map.into_iter().collect()),
                    _ => None,
                })
                .unwrap_or_default(),
            RawResource::Other(_) => EntryMap::new(),
        }
    }
}

/// Parse a resource body into its slug mapping.
///
/// Malformed JSON is an error; a well-formed body of an unexpected shape
/// yields an empty mapping.
pub fn parse_resource(body: &str) -> Result<EntryMap, LoadError> {
    let resource: RawResource = serde_json::from_str(body)?;
    Ok(resource.into_mapping())
}

/// Turn a slug mapping into entries, skipping values that are not entries
pub fn normalize_entries(map: EntryMap) -> Vec<ContentEntry> {
    map.into_iter()
        .filter_map(|(slug, value)| match into_entry(slug.clone(), value) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping malformed entry {:?}: {}", slug, e);
                None
            }
        })
        .collect()
}

/// Look up one entry by slug.
///
/// `NotFound` only when the slug is absent; a present value that is not an
/// entry is a parse error.
pub fn find_entry(mut map: EntryMap, slug: &str) -> Result<ContentEntry, LoadError> {
    let value = map.swap_remove(slug).ok_or_else(|| LoadError::NotFound {
        slug: slug.to_string(),
    })?;

    into_entry(slug.to_string(), value).map_err(|e| {
        tracing::warn!("Entry {:?} is malformed: {}", slug, e);
        LoadError::Parse(e)
    })
}

/// Sort entries newest first.
///
/// Entries whose date does not parse go after all dated entries and keep
/// their relative order.
pub fn sort_by_recency(entries: &mut [ContentEntry]) {
    entries.sort_by_cached_key(|entry| std::cmp::Reverse(DateKey(parse_date(&entry.date))));
}

fn into_entry(slug: String, value: Value) -> Result<ContentEntry, serde_json::Error> {
    let raw: RawEntry = serde_json::from_value(value)?;
    Ok(raw.into_entry(slug))
}

/// Orders dated keys by date and undated keys below every dated one
#[derive(Debug, PartialEq, Eq)]
struct DateKey(Option<chrono::DateTime<chrono::Utc>>);

impl Ord for DateKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => a.cmp(b),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => Ordering::Equal,
        }
    }
}

impl PartialOrd for DateKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
