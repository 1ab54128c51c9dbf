//! Built-in site templates using the Tera template engine
//!
//! All pages are embedded in the binary. Autoescaping is off so URLs and
//! entry `content` (trusted markup from the internal content feed) render
//! verbatim; text fields are passed through `escape` in the templates.

use anyhow::Result;
use chrono::Datelike;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::contact::{ContactForm, Toast};
use crate::content::{Collection, ContentEntry};
use crate::helpers::{full_url_for, html_escape, url_for};
use crate::view::ViewState;

/// Number of entries shown in the landing page blog preview
pub const PREVIEW_COUNT: usize = 3;

/// Template renderer with the embedded site theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all site templates loaded
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let mut tera = Tera::default();

        // Paths and entry markup must not be escaped
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("index.html", include_str!("site/index.html")),
            ("list.html", include_str!("site/list.html")),
            ("detail.html", include_str!("site/detail.html")),
            ("not_found.html", include_str!("site/not_found.html")),
            // Partials
            ("partials/header.html", include_str!("site/partials/header.html")),
            ("partials/footer.html", include_str!("site/partials/footer.html")),
            ("partials/card.html", include_str!("site/partials/card.html")),
            ("partials/analytics.html", include_str!("site/partials/analytics.html")),
        ])?;

        tera.register_function("url_for", url_for_function(config.clone()));
        tera.register_function("detail_url", detail_url_function(config.clone()));
        tera.register_filter("escape_attr", escape_attr_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Landing page: hero, services, blog preview and contact form
    pub fn render_home(
        &self,
        site: &SiteData,
        preview: &[ContentEntry],
        form: &ContactForm,
        toast: Option<&Toast>,
    ) -> Result<String> {
        let mut context = page_context(site, site.title.clone(), "/");
        context.insert("services", &services());
        context.insert(
            "preview",
            &preview.iter().take(PREVIEW_COUNT).collect::<Vec<_>>(),
        );
        context.insert("form", form);
        context.insert("toast", &toast);
        self.render("index.html", &context)
    }

    /// List view of a collection in any of its states
    pub fn render_list(
        &self,
        site: &SiteData,
        collection: Collection,
        state: &ViewState<Vec<ContentEntry>>,
    ) -> Result<String> {
        let title = format!("{} | {}", collection.label(), site.title);
        let mut context = page_context(site, title, &collection.list_path());
        context.insert("collection", &CollectionData::from(collection));
        context.insert("state", state.name());
        context.insert("entries", state.entries());
        context.insert("error", &state.error());
        self.render("list.html", &context)
    }

    /// Detail view of one entry in any of its states
    pub fn render_detail(
        &self,
        site: &SiteData,
        collection: Collection,
        slug: &str,
        state: &ViewState<ContentEntry>,
    ) -> Result<String> {
        let title = match state {
            ViewState::Success(entry) => format!("{} | {}", entry.title, site.title),
            ViewState::NotFound => format!("{} | {}", collection.not_found_title(), site.title),
            _ => format!("{} | {}", collection.label(), site.title),
        };
        let mut context = page_context(site, title, &collection.detail_path(slug));
        context.insert("collection", &CollectionData::from(collection));
        context.insert("slug", slug);
        context.insert("state", state.name());
        context.insert("entry", &state.success());
        context.insert("error", &state.error());
        let scoped_css = match state {
            ViewState::Success(_) => content_css(collection),
            _ => "",
        };
        context.insert("scoped_css", scoped_css);
        self.render("detail.html", &context)
    }

    /// Catch-all page for unknown routes
    pub fn render_not_found(&self, site: &SiteData, path: &str) -> Result<String> {
        let title = format!("Page Not Found | {}", site.title);
        let mut context = page_context(site, title, path);
        context.insert("path", path);
        self.render("not_found.html", &context)
    }
}

/// Site-wide values every page needs
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub measurement_id: Option<String>,
    pub year: i32,
    #[serde(skip)]
    config: SiteConfig,
}

impl SiteData {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            language: config.language.clone(),
            measurement_id: config
                .analytics
                .measurement_id
                .clone()
                .filter(|id| !id.is_empty()),
            year: chrono::Utc::now().year(),
            config: config.clone(),
        }
    }
}

/// Collection labels as seen by the templates
#[derive(Debug, Clone, Serialize)]
struct CollectionData {
    name: &'static str,
    label: &'static str,
    noun: &'static str,
    list_path: String,
    loading_message: &'static str,
    not_found_title: &'static str,
    event_prefix: &'static str,
    has_images: bool,
}

impl From<Collection> for CollectionData {
    fn from(collection: Collection) -> Self {
        Self {
            name: collection.name(),
            label: collection.label(),
            noun: collection.noun(),
            list_path: collection.list_path(),
            loading_message: collection.loading_message(),
            not_found_title: collection.not_found_title(),
            event_prefix: collection.event_prefix(),
            has_images: collection == Collection::Templates,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct Service {
    icon: &'static str,
    title: &'static str,
    description: &'static str,
    features: [&'static str; 4],
}

fn services() -> [Service; 3] {
    [
        Service {
            icon: "&lt;/&gt;",
            title: "Business Process Automation",
            description: "Streamline your operations with intelligent workflows that handle repetitive tasks, data processing, and cross-platform integrations.",
            features: ["CRM Integration", "Data Synchronization", "Task Management", "Reporting Automation"],
        },
        Service {
            icon: "&#128197;",
            title: "Finance & Accounting Automation",
            description: "Automate invoice processing, expense tracking, financial reporting, and payment workflows with precision and compliance.",
            features: ["Invoice Processing", "Expense Management", "Financial Reports", "Payment Workflows"],
        },
        Service {
            icon: "&#10148;",
            title: "Marketing Automation",
            description: "Create sophisticated marketing campaigns with AI-powered personalization, lead nurturing, and multi-channel communication.",
            features: ["Email Campaigns", "Lead Scoring", "Social Media", "Analytics Integration"],
        },
    ]
}

fn page_context(site: &SiteData, page_title: String, path: &str) -> Context {
    let mut context = Context::new();
    context.insert("site", site);
    context.insert("page_title", &page_title);
    context.insert("current_path", &url_for(&site.config, path));
    context.insert("canonical_url", &full_url_for(&site.config, path));
    context
}

/// Styles scoped to the rendered content of a detail page
pub fn content_css(collection: Collection) -> &'static str {
    match collection {
        Collection::Blog => BLOG_CONTENT_CSS,
        Collection::Templates => TEMPLATE_CONTENT_CSS,
    }
}

const BLOG_CONTENT_CSS: &str = r#"
.blog-content h1, .blog-content h2, .blog-content h3, .blog-content h4 {
  color: #ffffff;
  margin-top: 1.5em;
  margin-bottom: 0.5em;
  font-weight: bold;
}
.blog-content p, .blog-content li {
  color: #e2e8f0;
  line-height: 1.7;
}
.blog-content p { margin-bottom: 1.25em; }
.blog-content ul, .blog-content ol { padding-left: 1.5em; margin-bottom: 1.25em; }
.blog-content a { color: #60a5fa; text-decoration: underline; }
"#;

const TEMPLATE_CONTENT_CSS: &str = r#"
.template-content h1, .template-content h2, .template-content h3, .template-content h4 {
  color: #e0f2fe !important;
  margin-top: 1.5em;
  margin-bottom: 0.5em;
  font-weight: bold;
}
.template-content p {
  color: #bae6fd !important;
  margin-bottom: 1.25em;
  line-height: 1.7;
}
.template-content ul, .template-content ol {
  color: #bae6fd !important;
  padding-left: 1.5em;
  margin-bottom: 1.25em;
}
.template-content li {
  color: #bae6fd !important;
  margin-bottom: 0.5em;
}
.template-content strong, .template-content b {
  color: #22d3ee !important;
  font-weight: bold;
}
.template-content a {
  color: #38bdf8 !important;
  text-decoration: underline;
}
.template-content a:hover {
  color: #0ea5e9 !important;
}
"#;

/// Tera function: `url_for(path="/blog")` below the configured root
fn url_for_function(
    config: SiteConfig,
) -> impl Fn(&HashMap<String, tera::Value>) -> tera::Result<tera::Value> + Send + Sync {
    move |args| {
        let path = match args.get("path") {
            Some(val) => tera::try_get_value!("url_for", "path", String, val),
            None => String::new(),
        };
        Ok(tera::Value::String(url_for(&config, &path)))
    }
}

/// Tera function: `detail_url(collection="blog", slug=entry.slug)`
fn detail_url_function(
    config: SiteConfig,
) -> impl Fn(&HashMap<String, tera::Value>) -> tera::Result<tera::Value> + Send + Sync {
    move |args| {
        let name = match args.get("collection") {
            Some(val) => tera::try_get_value!("detail_url", "collection", String, val),
            None => return Err("detail_url: missing `collection` argument".into()),
        };
        let slug = match args.get("slug") {
            Some(val) => tera::try_get_value!("detail_url", "slug", String, val),
            None => return Err("detail_url: missing `slug` argument".into()),
        };
        let collection: Collection = name
            .parse()
            .map_err(|e: anyhow::Error| tera::Error::msg(e.to_string()))?;
        Ok(tera::Value::String(url_for(
            &config,
            &collection.detail_path(&slug),
        )))
    }
}

/// Tera filter: markup escaping for attribute values that hold URLs.
///
/// Unlike the built-in `escape`, `/` stays as is.
fn escape_attr_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("escape_attr", "value", String, value);
    Ok(tera::Value::String(html_escape(&s)))
}
