//! Route table for the application.
//!
//! SYSTEM CONTEXT
//! ==============
//! `ROUTES` is the single declaration of which paths exist. The server's
//! redirect handlers are built from it. The Leptos `<Routes>` tree in `app`
//! registers one `<Route>` per entry, and the server checks its generated
//! route list against this table.
//!
//! MATCHING
//! ========
//! Paths are compared without the leading `/`, trailing `/`s, the query
//! string and the fragment. View entries are leaf routes and must
//! consume the whole path. Redirect entries declare their own policy; the
//! default redirect uses [`PathMatch::Full`] so the empty path never
//! swallows `/sign-in/extra`.

/// Renderable screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    EnterSteamId,
    SignIn,
    HomePage,
}

impl View {
    pub const ALL: [Self; 3] = [Self::EnterSteamId, Self::SignIn, Self::HomePage];

    /// Path segment the view is registered under.
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::EnterSteamId => "enter-steam-id",
            Self::SignIn => "sign-in",
            Self::HomePage => "home-page",
        }
    }

    /// Absolute link target.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::EnterSteamId => "/enter-steam-id",
            Self::SignIn => "/sign-in",
            Self::HomePage => "/home-page",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::EnterSteamId => "Enter Steam ID",
            Self::SignIn => "Sign In",
            Self::HomePage => "Home",
        }
    }
}

/// How much of the request path a redirect entry must cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMatch {
    /// The entry path must equal the entire request path.
    Full,
    /// The entry path must equal the request path or a leading run of its
    /// segments. An empty prefix matches everything.
    Prefix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTarget {
    View(View),
    Redirect { to: &'static str, path_match: PathMatch },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    /// Path without a leading `/`; `""` is the application root.
    pub path: &'static str,
    pub target: RouteTarget,
}

impl RouteEntry {
    #[must_use]
    pub const fn view(path: &'static str, view: View) -> Self {
        Self { path, target: RouteTarget::View(view) }
    }

    #[must_use]
    pub const fn redirect(path: &'static str, to: &'static str, path_match: PathMatch) -> Self {
        Self { path, target: RouteTarget::Redirect { to, path_match } }
    }

    /// Absolute URL path as registered with an HTTP router.
    #[must_use]
    pub fn url(&self) -> String {
        format!("/{}", self.path)
    }

    fn matches(&self, path: &str) -> bool {
        match self.target {
            RouteTarget::View(_) | RouteTarget::Redirect { path_match: PathMatch::Full, .. } => self.path == path,
            RouteTarget::Redirect { path_match: PathMatch::Prefix, .. } => {
                self.path.is_empty()
                    || path == self.path
                    || path.strip_prefix(self.path).is_some_and(|rest| rest.starts_with('/'))
            }
        }
    }
}

/// The application's routes, in precedence order.
pub const ROUTES: &[RouteEntry] = &[
    RouteEntry::redirect("", View::SignIn.path(), PathMatch::Full),
    RouteEntry::view(View::EnterSteamId.segment(), View::EnterSteamId),
    RouteEntry::view(View::SignIn.segment(), View::SignIn),
    RouteEntry::view(View::HomePage.segment(), View::HomePage),
];

/// Outcome of looking a path up in a route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    View(View),
    Redirect(&'static str),
    /// No entry matched; the router's fallback decides what to show.
    Unmatched,
}

/// Strip the parts of a request path that routing ignores.
#[must_use]
pub fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    let path = path.strip_prefix('/').unwrap_or(path);
    path.trim_end_matches('/')
}

/// Resolve `path` against [`ROUTES`].
#[must_use]
pub fn resolve(path: &str) -> Resolution {
    resolve_in(ROUTES, path)
}

/// Resolve `path` against an arbitrary table. The first matching entry wins.
#[must_use]
pub fn resolve_in(table: &[RouteEntry], path: &str) -> Resolution {
    let path = normalize(path);
    table
        .iter()
        .find(|entry| entry.matches(path))
        .map_or(Resolution::Unmatched, |entry| match entry.target {
            RouteTarget::View(view) => Resolution::View(view),
            RouteTarget::Redirect { to, .. } => Resolution::Redirect(to),
        })
}

/// Follow redirects until a view is reached.
///
/// Returns the final path and view, or `None` when the chain ends unmatched
/// or loops longer than the table.
#[must_use]
pub fn navigate(path: &str) -> Option<(&str, View)> {
    navigate_in(ROUTES, path)
}

#[must_use]
pub fn navigate_in<'a>(table: &[RouteEntry], path: &'a str) -> Option<(&'a str, View)> {
    let mut current: &'a str = path;
    for _ in 0..=table.len() {
        match resolve_in(table, current) {
            Resolution::View(view) => return Some((current, view)),
            Resolution::Redirect(to) => current = to,
            Resolution::Unmatched => return None,
        }
    }
    None
}

/// Destination of the root redirect.
#[must_use]
pub fn default_redirect() -> Option<&'static str> {
    ROUTES.iter().find_map(|entry| match entry.target {
        RouteTarget::Redirect { to, .. } if entry.path.is_empty() => Some(to),
        _ => None,
    })
}

/// Every redirect entry as `(url, destination)`.
pub fn redirects() -> impl Iterator<Item = (String, &'static str)> {
    ROUTES.iter().filter_map(|entry| match entry.target {
        RouteTarget::Redirect { to, .. } => Some((entry.url(), to)),
        RouteTarget::View(_) => None,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteTableError {
    #[error("duplicate route path {0:?}")]
    DuplicatePath(&'static str),
    #[error("no entry for the empty path")]
    MissingDefault,
    #[error("the empty-path entry must redirect, not render a view")]
    DefaultRendersView,
    #[error("the empty-path redirect must use full-path matching")]
    DefaultNotFullMatch,
    #[error("redirect from {from:?} targets {to:?}, which does not resolve to a view")]
    DanglingRedirect { from: &'static str, to: &'static str },
}

/// Check the table invariants: unique paths, exactly one empty-path entry,
/// that entry is a full-match redirect, and every redirect lands on a view.
///
/// # Errors
///
/// Returns the first violated invariant.
pub fn validate(table: &[RouteEntry]) -> Result<(), RouteTableError> {
    for (i, entry) in table.iter().enumerate() {
        if table[..i].iter().any(|earlier| earlier.path == entry.path) {
            return Err(RouteTableError::DuplicatePath(entry.path));
        }
    }

    let default = table
        .iter()
        .find(|entry| entry.path.is_empty())
        .ok_or(RouteTableError::MissingDefault)?;
    match default.target {
        RouteTarget::View(_) => return Err(RouteTableError::DefaultRendersView),
        RouteTarget::Redirect { path_match: PathMatch::Prefix, .. } => {
            return Err(RouteTableError::DefaultNotFullMatch);
        }
        RouteTarget::Redirect { path_match: PathMatch::Full, .. } => {}
    }

    for entry in table {
        if let RouteTarget::Redirect { to, .. } = entry.target {
            if navigate_in(table, to).is_none() {
                return Err(RouteTableError::DanglingRedirect { from: entry.path, to });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
