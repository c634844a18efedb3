//! URL routing. `Route::parse` is pure so the path table and the auth guards
//! are testable without a browser; the pushState/popstate plumbing lives in
//! [`init`] and [`navigate`].

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::messages::Message;
use crate::state::dispatch_global_message;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Pricing,
    Contact,
    Dashboard,
    Agents,
    Workflows,
    Monitoring,
    Settings,
    NotFound,
}

impl Route {
    /// Map a location pathname to a route. Unknown paths land on NotFound.
    pub fn parse(path: &str) -> Route {
        match path.trim_end_matches('/') {
            "" => Route::Home,
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/pricing" => Route::Pricing,
            "/contact" => Route::Contact,
            "/dashboard" => Route::Dashboard,
            "/agents" => Route::Agents,
            "/workflows" => Route::Workflows,
            "/monitoring" => Route::Monitoring,
            "/settings" => Route::Settings,
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Pricing => "/pricing",
            Route::Contact => "/contact",
            Route::Dashboard => "/dashboard",
            Route::Agents => "/agents",
            Route::Workflows => "/workflows",
            Route::Monitoring => "/monitoring",
            Route::Settings => "/settings",
            Route::NotFound => "/404",
        }
    }

    /// Routes behind the authentication gate.
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::Dashboard
                | Route::Agents
                | Route::Workflows
                | Route::Monitoring
                | Route::Settings
        )
    }

    /// Routes an already-authenticated user is redirected away from.
    pub fn redirects_when_authed(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }
}

/// Apply the auth guards: where should a visitor asking for `requested`
/// actually end up?
pub fn guard(requested: Route, authenticated: bool) -> Route {
    if requested.requires_auth() && !authenticated {
        Route::Login
    } else if requested.redirects_when_authed() && authenticated {
        Route::Dashboard
    } else {
        requested
    }
}

/// Current route from the browser location.
pub fn current_route() -> Route {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .map(|p| Route::parse(&p))
        .unwrap_or(Route::Home)
}

/// Push a new history entry. The caller is responsible for re-rendering
/// (dispatching `Message::Navigate` does both).
pub fn push_history(route: Route) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    window
        .history()?
        .push_state_with_url(&JsValue::NULL, "", Some(route.path()))
}

/// Rewrite the current history entry in place. Used when an auth guard
/// redirects a popstate/initial-load navigation: pushing there would leave
/// the guarded URL underneath, so Back could never get past it.
pub fn replace_history(route: Route) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    window
        .history()?
        .replace_state_with_url(&JsValue::NULL, "", Some(route.path()))
}

/// Listen for back/forward navigation and feed it into the update loop.
pub fn init() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

    let on_popstate = Closure::wrap(Box::new(move |_: web_sys::PopStateEvent| {
        dispatch_global_message(Message::RouteChanged(current_route()));
    }) as Box<dyn FnMut(_)>);

    window.add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref())?;
    // The listener lives for the whole page lifetime.
    on_popstate.forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_fixed_path_parses_to_its_page() {
        let table = [
            ("/", Route::Home),
            ("/login", Route::Login),
            ("/register", Route::Register),
            ("/pricing", Route::Pricing),
            ("/contact", Route::Contact),
            ("/dashboard", Route::Dashboard),
            ("/agents", Route::Agents),
            ("/workflows", Route::Workflows),
            ("/monitoring", Route::Monitoring),
            ("/settings", Route::Settings),
        ];
        for (path, expected) in table {
            assert_eq!(Route::parse(path), expected, "path {}", path);
        }
    }

    #[test]
    fn trailing_slash_is_tolerated() {
        assert_eq!(Route::parse("/agents/"), Route::Agents);
        assert_eq!(Route::parse("/"), Route::Home);
    }

    #[test]
    fn unknown_paths_fall_through_to_not_found() {
        assert_eq!(Route::parse("/nope"), Route::NotFound);
        assert_eq!(Route::parse("/agents/123"), Route::NotFound);
    }

    #[test]
    fn guards_redirect_unauthenticated_to_login() {
        for route in [
            Route::Dashboard,
            Route::Agents,
            Route::Workflows,
            Route::Monitoring,
            Route::Settings,
        ] {
            assert_eq!(guard(route, false), Route::Login);
            assert_eq!(guard(route, true), route);
        }
    }

    #[test]
    fn guards_redirect_authenticated_away_from_auth_pages() {
        assert_eq!(guard(Route::Login, true), Route::Dashboard);
        assert_eq!(guard(Route::Register, true), Route::Dashboard);
        assert_eq!(guard(Route::Login, false), Route::Login);
    }

    #[test]
    fn public_pages_are_open_either_way() {
        for route in [Route::Home, Route::Pricing, Route::Contact, Route::NotFound] {
            assert_eq!(guard(route, false), route);
            assert_eq!(guard(route, true), route);
        }
    }

    #[test]
    fn parse_and_path_round_trip() {
        for route in [
            Route::Home,
            Route::Login,
            Route::Register,
            Route::Pricing,
            Route::Contact,
            Route::Dashboard,
            Route::Agents,
            Route::Workflows,
            Route::Monitoring,
            Route::Settings,
        ] {
            assert_eq!(Route::parse(route.path()), route);
        }
    }
}

#[cfg(test)]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn replace_history_rewrites_without_adding_an_entry() {
        let window = web_sys::window().unwrap();
        let history = window.history().unwrap();

        push_history(Route::Pricing).unwrap();
        let depth = history.length().unwrap();

        replace_history(Route::Login).unwrap();
        assert_eq!(history.length().unwrap(), depth);
        assert_eq!(window.location().pathname().unwrap(), "/login");

        push_history(Route::Contact).unwrap();
        assert_eq!(history.length().unwrap(), depth + 1);
    }
}
