use std::fmt;

/// Navigable locations, mirroring the wiki's URL space.
///
/// Flash destinations and deep links travel as these, so the mapping to
/// path strings stays in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/wiki` — the recent-pages listing.
    Recent,
    /// `/wiki/{name}` — one page.
    Page { name: String },
    /// `/edit/{name}` — edit an existing page.
    Edit { name: String },
    /// `/new` or `/new/{name}` — create a page, optionally pre-named.
    New { name: Option<String> },
}

impl Route {
    /// Parse a path into a route. Empty segments are ignored, so
    /// `/wiki/` and `/wiki` are the same place.
    pub fn parse(path: &str) -> Option<Self> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let head = segments.next()?;
        let name = segments.next();
        if segments.next().is_some() {
            return None;
        }
        match (head, name) {
            ("wiki", None) => Some(Route::Recent),
            ("wiki", Some(name)) => Some(Route::Page {
                name: name.to_string(),
            }),
            ("edit", Some(name)) => Some(Route::Edit {
                name: name.to_string(),
            }),
            ("new", name) => Some(Route::New {
                name: name.map(str::to_string),
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Recent => write!(f, "/wiki"),
            Route::Page { name } => write!(f, "/wiki/{}", name),
            Route::Edit { name } => write!(f, "/edit/{}", name),
            Route::New { name: None } => write!(f, "/new"),
            Route::New { name: Some(name) } => write!(f, "/new/{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wiki_paths() {
        assert_eq!(Route::parse("/wiki"), Some(Route::Recent));
        assert_eq!(Route::parse("/wiki/"), Some(Route::Recent));
        assert_eq!(
            Route::parse("/wiki/HomePage"),
            Some(Route::Page {
                name: "HomePage".to_string()
            })
        );
    }

    #[test]
    fn parses_editor_paths() {
        assert_eq!(
            Route::parse("/edit/HomePage"),
            Some(Route::Edit {
                name: "HomePage".to_string()
            })
        );
        assert_eq!(Route::parse("/new"), Some(Route::New { name: None }));
        assert_eq!(
            Route::parse("/new/HomePage"),
            Some(Route::New {
                name: Some("HomePage".to_string())
            })
        );
    }

    #[test]
    fn rejects_unknown_and_incomplete_paths() {
        assert_eq!(Route::parse("/"), None);
        assert_eq!(Route::parse("/files/abc"), None);
        assert_eq!(Route::parse("/edit"), None);
        assert_eq!(Route::parse("/wiki/Foo/extra"), None);
    }

    #[test]
    fn display_round_trips() {
        for path in ["/wiki", "/wiki/Foo", "/edit/Foo", "/new", "/new/Foo"] {
            let route = Route::parse(path).unwrap();
            assert_eq!(route.to_string(), path);
            assert_eq!(Route::parse(&route.to_string()), Some(route));
        }
    }
}
