//! Navigation stack.

use crate::app::actions::NavAction;
use crate::app::routes::Route;

/// Current route plus the routes beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    current: Route,
    history: Vec<Route>,
}

impl Router {
    #[must_use]
    pub const fn new(initial: Route) -> Self {
        Self {
            current: initial,
            history: Vec::new(),
        }
    }

    #[must_use]
    pub const fn current(&self) -> &Route {
        &self.current
    }

    /// Number of routes on the stack, including the current one.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.history.len() + 1
    }

    pub fn push(&mut self, route: Route) {
        tracing::debug!(route = %route, "push");
        let previous = std::mem::replace(&mut self.current, route);
        self.history.push(previous);
    }

    pub fn replace(&mut self, route: Route) {
        tracing::debug!(route = %route, "replace");
        self.current = route;
    }

    /// Pops the current route. Returns `false` when already at the root.
    pub fn back(&mut self) -> bool {
        let Some(previous) = self.history.pop() else {
            tracing::debug!("back ignored at root route");
            return false;
        };
        self.current = previous;
        tracing::debug!(route = %self.current, "back");
        true
    }

    pub fn apply(&mut self, action: NavAction) {
        match action {
            NavAction::Push(route) => self.push(route),
            NavAction::Replace(route) => self.replace(route),
            NavAction::Back => {
                self.back();
            }
        }
    }
}
