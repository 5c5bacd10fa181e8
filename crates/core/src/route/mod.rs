//! Client-side routes and navigation links

mod flow;

pub use flow::AuthFlow;

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::session::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Signup,
    Login,
    TaskBoard,
}

impl Route {
    pub const ALL: [Route; 4] = [Self::Landing, Self::Signup, Self::Login, Self::TaskBoard];

    pub fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Signup => "/signup",
            Self::Login => "/login",
            Self::TaskBoard => "/taskboard",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = Error;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        Self::ALL
            .into_iter()
            .find(|route| route.path() == normalized)
            .ok_or_else(|| Error::InvalidInput(format!("unknown route: {}", trimmed)))
    }
}

/// An entry in the navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavLink {
    Go { label: &'static str, route: Route },
    Logout,
}

/// Navigation entries for the current session
pub fn nav_links(session: &SessionState) -> Vec<NavLink> {
    let home = NavLink::Go {
        label: "Home",
        route: Route::Landing,
    };
    if session.is_authenticated() {
        vec![
            home,
            NavLink::Go {
                label: "TaskBoard",
                route: Route::TaskBoard,
            },
            NavLink::Logout,
        ]
    } else {
        vec![
            home,
            NavLink::Go {
                label: "Signup",
                route: Route::Signup,
            },
            NavLink::Go {
                label: "Login",
                route: Route::Login,
            },
        ]
    }
}
