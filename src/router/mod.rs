//! Route resolution
//!
//! Maps request paths onto the site's pages. Besides the plain paths, every
//! page is reachable through the `/?/...` form that static hosts redirect
//! unknown paths to (for example `/?/blog/my-post`, with `&` in the
//! original query escaped as `~and~`).

use crate::content::Collection;
use crate::helpers::decode_segment;

/// A page of the site
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    List(Collection),
    Detail(Collection, String),
    NotFound,
}

impl Route {
    /// Resolve a request path and query below the site root
    pub fn resolve(root: &str, path: &str, query: Option<&str>) -> Self {
        let Some(rest) = strip_root(root, path) else {
            return Route::NotFound;
        };

        match query.and_then(aliased_path) {
            Some(alias) if rest.trim_matches('/').is_empty() => Self::from_path(alias),
            _ => Self::from_path(rest),
        }
    }

    /// Resolve a path relative to the site root
    pub fn from_path(path: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            [name] => match collection(name) {
                Some(c) => Route::List(c),
                None => Route::NotFound,
            },
            [name, slug] => match collection(name) {
                Some(c) => Route::Detail(c, decode_segment(slug)),
                None => Route::NotFound,
            },
            _ => Route::NotFound,
        }
    }

    /// Canonical path of the route, relative to the site root
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::List(c) => c.list_path(),
            Route::Detail(c, slug) => c.detail_path(slug),
            Route::NotFound => "/404".to_string(),
        }
    }
}

fn collection(name: &str) -> Option<Collection> {
    Collection::ALL.into_iter().find(|c| c.name() == name)
}

/// Remove the site root from `path`; `None` when the path is outside it
pub fn strip_root<'a>(root: &str, path: &'a str) -> Option<&'a str> {
    let root = root.trim_end_matches('/');
    if root.is_empty() {
        return Some(path);
    }

    let rest = path.strip_prefix(root)?;
    if rest.is_empty() || rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

/// The path carried by a `?/...` query, if any
fn aliased_path(query: &str) -> Option<&str> {
    let path = query.strip_prefix('/')?;
    Some(path.split('&').next().unwrap_or(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(path: &str) -> Route {
        Route::resolve("/", path, None)
    }

    #[test]
    fn test_plain_routes() {
        assert_eq!(resolve("/"), Route::Home);
        assert_eq!(resolve("/blog"), Route::List(Collection::Blog));
        assert_eq!(resolve("/blog/"), Route::List(Collection::Blog));
        assert_eq!(resolve("/templates"), Route::List(Collection::Templates));
        assert_eq!(
            resolve("/blog/financial-data-processing"),
            Route::Detail(Collection::Blog, "financial-data-processing".to_string())
        );
        assert_eq!(
            resolve("/templates/lead-scoring/"),
            Route::Detail(Collection::Templates, "lead-scoring".to_string())
        );
    }

    #[test]
    fn test_unknown_routes() {
        assert_eq!(resolve("/about"), Route::NotFound);
        assert_eq!(resolve("/blog/a/b"), Route::NotFound);
        assert_eq!(resolve("/blogPosts.json"), Route::NotFound);
    }

    #[test]
    fn test_query_aliases() {
        assert_eq!(
            Route::resolve("/", "/", Some("/blog")),
            Route::List(Collection::Blog)
        );
        assert_eq!(
            Route::resolve("/", "/", Some("/templates/lead-scoring&utm=x~and~y=z")),
            Route::Detail(Collection::Templates, "lead-scoring".to_string())
        );
        // Ordinary query strings do not change the route
        assert_eq!(Route::resolve("/", "/", Some("contact=sent")), Route::Home);
        assert_eq!(
            Route::resolve("/", "/blog", Some("/templates")),
            Route::List(Collection::Blog)
        );
    }

    #[test]
    fn test_site_root() {
        assert_eq!(Route::resolve("/site/", "/site", None), Route::Home);
        assert_eq!(
            Route::resolve("/site/", "/site/blog", None),
            Route::List(Collection::Blog)
        );
        assert_eq!(
            Route::resolve("/site/", "/site/", Some("/blog/x")),
            Route::Detail(Collection::Blog, "x".to_string())
        );
        assert_eq!(Route::resolve("/site/", "/blog", None), Route::NotFound);
        assert_eq!(Route::resolve("/site/", "/sitemap", None), Route::NotFound);
    }

    #[test]
    fn test_percent_encoded_slug() {
        assert_eq!(
            resolve("/blog/crm%20automation"),
            Route::Detail(Collection::Blog, "crm automation".to_string())
        );
        let route = Route::Detail(Collection::Blog, "crm automation".to_string());
        assert_eq!(route.path(), "/blog/crm%20automation");
    }
}
