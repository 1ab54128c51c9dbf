//! Content entry and collection models

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::ContentConfig;
use crate::helpers::excerpt;

/// Number of plain-text characters kept in a derived description
pub const EXCERPT_LENGTH: usize = 150;

/// One blog post or template
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentEntry {
    /// Unique key, also the URL path segment
    pub slug: String,

    pub title: String,

    /// HTML markup, rendered verbatim
    pub content: String,

    /// Card excerpt; derived from `content` when the source has none
    pub description: String,

    /// Display date, also the sort key
    pub date: String,

    /// Free-text label such as "8 min read"
    pub read_time: String,

    pub category: String,

    /// Thumbnail (templates)
    pub image: Option<String>,

    /// External link opened from the detail page (templates)
    pub link: Option<String>,

    /// Fields the site does not know about
    #[serde(skip)]
    pub extra: IndexMap<String, serde_json::Value>,
}

/// Entry fields as stored in the resource, keyed by slug.
///
/// Field values are read leniently: numbers and booleans become their text,
/// `null` and nested values read as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct RawEntry {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_option")]
    pub content: Option<String>,
    #[serde(deserialize_with = "lenient_option")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(deserialize_with = "lenient_string")]
    pub read_time: String,
    #[serde(deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(deserialize_with = "lenient_option")]
    pub image: Option<String>,
    #[serde(deserialize_with = "lenient_option")]
    pub link: Option<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

fn lenient_option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_option(deserializer)?.unwrap_or_default())
}

impl RawEntry {
    /// Attach the slug and fill in the derived description
    pub fn into_entry(self, slug: String) -> ContentEntry {
        let description = match self.description {
            Some(description) if !description.is_empty() => description,
            _ => excerpt(self.content.as_deref(), EXCERPT_LENGTH),
        };

        ContentEntry {
            slug,
            title: self.title,
            content: self.content.unwrap_or_default(),
            description,
            date: self.date,
            read_time: self.read_time,
            category: self.category,
            image: self.image.filter(|s| !s.is_empty()),
            link: self.link.filter(|s| !s.is_empty()),
            extra: self.extra,
        }
    }
}

/// The two content flows of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Blog,
    Templates,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::Blog, Collection::Templates];

    /// Route segment of the list view
    pub fn name(self) -> &'static str {
        match self {
            Collection::Blog => "blog",
            Collection::Templates => "templates",
        }
    }

    /// Path of the JSON resource holding the collection
    pub fn resource_path(self, config: &ContentConfig) -> &str {
        match self {
            Collection::Blog => &config.blog_path,
            Collection::Templates => &config.templates_path,
        }
    }

    /// Route of the list view
    pub fn list_path(self) -> String {
        format!("/{}", self.name())
    }

    /// Route of the detail view for `slug`
    pub fn detail_path(self, slug: &str) -> String {
        format!("/{}/{}", self.name(), crate::helpers::encode_segment(slug))
    }

    /// Singular noun used in messages and event names
    pub fn noun(self) -> &'static str {
        match self {
            Collection::Blog => "post",
            Collection::Templates => "template",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Collection::Blog => "Blog",
            Collection::Templates => "Templates",
        }
    }

    pub fn loading_message(self) -> &'static str {
        match self {
            Collection::Blog => "Loading blog posts...",
            Collection::Templates => "Loading templates...",
        }
    }

    pub fn list_error_message(self) -> &'static str {
        match self {
            Collection::Blog => "Failed to load blog posts",
            Collection::Templates => "Failed to load templates",
        }
    }

    pub fn detail_error_message(self) -> &'static str {
        match self {
            Collection::Blog => "Failed to load post",
            Collection::Templates => "Failed to load template",
        }
    }

    pub fn not_found_title(self) -> &'static str {
        match self {
            Collection::Blog => "Post Not Found",
            Collection::Templates => "Template Not Found",
        }
    }

    /// Prefix of the analytics events emitted for this collection
    pub fn event_prefix(self) -> &'static str {
        match self {
            Collection::Blog => "blog",
            Collection::Templates => "template",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Collection {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blog" | "post" | "posts" => Ok(Collection::Blog),
            "templates" | "template" => Ok(Collection::Templates),
            _ => anyhow::bail!("Unknown collection: {}. Available: blog, templates", s),
        }
    }
}
