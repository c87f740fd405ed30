//! Named routes of the `demo` namespace and URL reversal.

use crate::error::AppError;

pub const NAMESPACE: &str = "demo";

/// Route names, in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteName {
    Index,
    PersonCreate,
    PersonUpdate,
    PersonDelete,
}

impl RouteName {
    pub const ALL: [RouteName; 4] = [
        RouteName::Index,
        RouteName::PersonCreate,
        RouteName::PersonUpdate,
        RouteName::PersonDelete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RouteName::Index => "index",
            RouteName::PersonCreate => "person-create",
            RouteName::PersonUpdate => "person-update",
            RouteName::PersonDelete => "person-delete",
        }
    }

    /// Router pattern relative to the mount path.
    pub fn pattern(self) -> &'static str {
        match self {
            RouteName::Index => "/",
            RouteName::PersonCreate => "/create/",
            RouteName::PersonUpdate => "/:pk/update",
            RouteName::PersonDelete => "/:pk/delete",
        }
    }

    fn takes_pk(self) -> bool {
        matches!(self, RouteName::PersonUpdate | RouteName::PersonDelete)
    }

    /// Accepts `index` or the namespaced `demo:index`.
    pub fn parse(name: &str) -> Option<Self> {
        let bare = match name.split_once(':') {
            Some((ns, rest)) if ns == NAMESPACE => rest,
            Some(_) => return None,
            None => name,
        };
        Self::ALL.into_iter().find(|r| r.as_str() == bare)
    }
}

/// Builds URLs for named routes under the configured mount path.
#[derive(Debug, Clone, Default)]
pub struct Urls {
    base: String,
}

impl Urls {
    pub fn new(mount_path: impl Into<String>) -> Self {
        Urls { base: mount_path.into() }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn route(&self, route: RouteName, pk: Option<i64>) -> Result<String, AppError> {
        let path = match (route.takes_pk(), pk) {
            (true, Some(pk)) => route.pattern().replace(":pk", &pk.to_string()),
            (false, None) => route.pattern().to_string(),
            _ => return Err(AppError::NoReverseMatch(route.as_str().to_string())),
        };
        Ok(format!("{}{}", self.base, path))
    }

    pub fn reverse(&self, name: &str, pk: Option<i64>) -> Result<String, AppError> {
        let route = RouteName::parse(name).ok_or_else(|| AppError::NoReverseMatch(name.to_string()))?;
        self.route(route, pk)
    }

    pub fn index(&self) -> String {
        format!("{}/", self.base)
    }

    pub fn create(&self) -> String {
        format!("{}/create/", self.base)
    }

    pub fn update(&self, pk: i64) -> String {
        format!("{}/{}/update", self.base, pk)
    }

    pub fn delete(&self, pk: i64) -> String {
        format!("{}/{}/delete", self.base, pk)
    }
}
