//! Lock-aware navigation between pages.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::view::ViewManager;

/// A navigable page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    Index,
    Counter,
    FetchData,
}

impl Route {
    pub const ALL: [Self; 3] = [Self::Index, Self::Counter, Self::FetchData];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Counter => "counter",
            Self::FetchData => "fetch-data",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|route| route.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let names: Vec<_> = Self::ALL.iter().map(|r| r.as_str()).collect();
                format!("unknown page '{s}', expected one of: {}", names.join(", "))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("cannot leave '{from}' for '{to}' while the view is locked")]
    Locked { from: Route, to: Route },
}

/// Tracks the current route and refuses to leave it while the view is locked.
pub struct Navigator {
    current: Route,
    manager: ViewManager,
}

impl Navigator {
    pub const fn new(start: Route, manager: ViewManager) -> Self {
        Self {
            current: start,
            manager,
        }
    }

    pub const fn current(&self) -> Route {
        self.current
    }

    /// Check whether leaving the current page is allowed right now.
    ///
    /// # Errors
    /// Returns [`NavigationError::Locked`] while the view is locked.
    pub fn check_leave(&self, to: Route) -> Result<(), NavigationError> {
        if self.manager.is_locked() {
            warn!(from = %self.current, %to, "navigation refused: view is locked");
            return Err(NavigationError::Locked {
                from: self.current,
                to,
            });
        }
        Ok(())
    }

    /// Navigate to `to`. Navigating to the current route is a no-op.
    ///
    /// # Errors
    /// Returns [`NavigationError::Locked`] while the view is locked.
    pub fn navigate_to(&mut self, to: Route) -> Result<Route, NavigationError> {
        if to == self.current {
            return Ok(to);
        }
        self.check_leave(to)?;
        debug!(from = %self.current, %to, "navigating");
        self.current = to;
        Ok(to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_from_str() {
        assert_eq!("index".parse::<Route>(), Ok(Route::Index));
        assert_eq!("Fetch-Data".parse::<Route>(), Ok(Route::FetchData));
        assert!("weather".parse::<Route>().unwrap_err().contains("counter"));
    }

    #[test]
    fn test_navigate_when_unlocked() {
        let mut navigator = Navigator::new(Route::Index, ViewManager::new());
        assert_eq!(navigator.navigate_to(Route::Counter), Ok(Route::Counter));
        assert_eq!(navigator.current(), Route::Counter);
    }

    #[test]
    fn test_navigation_refused_while_locked() {
        let manager = ViewManager::new();
        let mut navigator = Navigator::new(Route::Index, manager.clone());

        manager.lock_view();
        assert_eq!(
            navigator.navigate_to(Route::FetchData),
            Err(NavigationError::Locked {
                from: Route::Index,
                to: Route::FetchData,
            })
        );
        assert_eq!(navigator.current(), Route::Index);

        manager.unlock_view();
        assert_eq!(navigator.navigate_to(Route::FetchData), Ok(Route::FetchData));
    }

    #[test]
    fn test_same_route_is_allowed_while_locked() {
        let manager = ViewManager::new();
        let mut navigator = Navigator::new(Route::Counter, manager.clone());
        let _lock = manager.lock_scope();

        assert_eq!(navigator.navigate_to(Route::Counter), Ok(Route::Counter));
    }
}
