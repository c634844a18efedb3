//! Session lifecycle: token bootstrap, login/register, logout, and forced
//! sign-out on 401.

use crate::messages::{Command, Message};
use crate::router::Route;
use crate::state::{AppState, SessionState};
use crate::storage::TokenStore;
use crate::toast;

pub fn update(state: &mut AppState, msg: Message, commands: &mut Vec<Command>) {
    match msg {
        Message::BootstrapSession => {
            // No stored token means we simply stay signed out.
            if TokenStore::get().is_some() {
                state.session.loading = true;
                commands.push(Command::FetchCurrentUser);
            }
        }

        Message::CurrentUserLoaded(user) => {
            state.session.user = Some(*user);
            state.session.authenticated = true;
            state.session.loading = false;
            // Re-run the guard for wherever we currently are: an authed
            // visitor parked on /login moves on, a protected page kicks off
            // its fetches now that requests will carry the token.
            commands.push(Command::send(Message::RouteChanged(state.route)));
        }

        Message::BootstrapFailed => {
            TokenStore::clear();
            state.session = SessionState::default();
            if state.route.requires_auth() {
                commands.push(Command::NavigateTo(Route::Login));
            }
        }

        Message::SessionExpired => {
            let was_authenticated = state.session.authenticated;
            state.session = SessionState::default();
            if was_authenticated {
                commands.push(Command::update_ui(|| {
                    toast::error("Your session has expired")
                }));
            }
            if state.route.requires_auth() {
                commands.push(Command::NavigateTo(Route::Login));
            }
        }

        Message::SubmitLogin(payload) => {
            // A submit while one is already in flight is dropped.
            if !state.session.loading {
                state.session.loading = true;
                state.session.field_errors.clear();
                state.session.banner = None;
                commands.push(Command::Login(payload));
            }
        }

        Message::SubmitRegister(payload) => {
            if !state.session.loading {
                state.session.loading = true;
                state.session.field_errors.clear();
                state.session.banner = None;
                commands.push(Command::Register(payload));
            }
        }

        Message::LoginSucceeded(response) | Message::RegisterSucceeded(response) => {
            let response = *response;
            TokenStore::set(&response.token);
            state.session.user = Some(response.user);
            state.session.authenticated = true;
            state.session.loading = false;
            state.session.field_errors.clear();
            state.session.banner = None;

            let message = if response.message.is_empty() {
                "Signed in".to_string()
            } else {
                response.message
            };
            commands.push(Command::update_ui(move || toast::success(&message)));
            commands.push(Command::NavigateTo(Route::Dashboard));
        }

        Message::LoginFailed(error) | Message::RegisterFailed(error) => {
            state.session.loading = false;
            state.session.field_errors = error.field_errors;
            state.session.banner = (!error.message.is_empty()).then_some(error.message);
        }

        Message::RequestLogout => {
            // Local sign-out is immediate; the server call is best-effort
            // and needs the token snapshotted before the clear, or it would
            // go out unauthenticated and never invalidate the server side.
            if let Some(token) = TokenStore::get() {
                commands.push(Command::Logout { token });
            }
            TokenStore::clear();
            state.session = SessionState::default();
            commands.push(Command::NavigateTo(Route::Login));
        }

        Message::LogoutCompleted => {}

        Message::SubmitPasswordChange {
            old_password,
            new_password,
        } => {
            commands.push(Command::ChangePassword {
                old_password,
                new_password,
            });
        }

        Message::PasswordChanged => {
            commands.push(Command::update_ui(|| toast::success("Password changed")));
        }

        Message::PasswordChangeFailed { message } => {
            commands.push(Command::update_ui(move || toast::error(&message)));
        }

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuthResponse, CurrentUser, LoginRequest, UserProfile};
    use crate::network::{ApiConfig, ApiHandles};
    use crate::state::AppState;
    use crate::update::update as run_update;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn test_state() -> AppState {
        AppState::new(ApiHandles::new(ApiConfig::default()))
    }

    fn user(email: &str) -> CurrentUser {
        CurrentUser {
            id: "u-1".into(),
            email: email.into(),
            username: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            full_name: String::new(),
            avatar: None,
            is_email_verified: true,
            created_at: None,
            profile: UserProfile::default(),
        }
    }

    #[wasm_bindgen_test]
    fn login_success_persists_token_and_routes_to_dashboard() {
        TokenStore::clear();
        let mut state = test_state();
        state.route = Route::Login;

        let commands = run_update(
            &mut state,
            Message::LoginSucceeded(Box::new(AuthResponse {
                token: "tok-123".into(),
                user: user("a@b.io"),
                message: String::new(),
            })),
        );

        assert_eq!(TokenStore::get().as_deref(), Some("tok-123"));
        assert!(state.session.authenticated);
        assert!(!state.session.loading);
        assert!(commands
            .iter()
            .any(|c| matches!(c, Command::NavigateTo(Route::Dashboard))));
        TokenStore::clear();
    }

    #[wasm_bindgen_test]
    fn expired_session_resets_and_forces_login_route() {
        let mut state = test_state();
        state.session.authenticated = true;
        state.session.user = Some(user("a@b.io"));
        state.route = Route::Agents;

        let commands = run_update(&mut state, Message::SessionExpired);

        assert!(!state.session.authenticated);
        assert!(state.session.user.is_none());
        assert!(commands
            .iter()
            .any(|c| matches!(c, Command::NavigateTo(Route::Login))));
    }

    #[wasm_bindgen_test]
    fn logout_snapshots_token_before_clearing_storage() {
        TokenStore::set("tok-999");
        let mut state = test_state();
        state.session.authenticated = true;
        state.session.user = Some(user("a@b.io"));

        let commands = run_update(&mut state, Message::RequestLogout);

        // Storage is cleared immediately, but the server call still carries
        // the credentials it needs to invalidate the token.
        assert_eq!(TokenStore::get(), None);
        assert!(commands
            .iter()
            .any(|c| matches!(c, Command::Logout { token } if token == "tok-999")));
        assert!(commands
            .iter()
            .any(|c| matches!(c, Command::NavigateTo(Route::Login))));
        assert!(state.session.user.is_none());
    }

    #[wasm_bindgen_test]
    fn second_login_submit_while_loading_is_dropped() {
        let mut state = test_state();
        let payload = LoginRequest {
            email: "a@b.io".into(),
            password: "pw".into(),
        };

        let first = run_update(&mut state, Message::SubmitLogin(payload.clone()));
        assert!(first.iter().any(|c| matches!(c, Command::Login(_))));
        assert!(state.session.loading);

        let second = run_update(&mut state, Message::SubmitLogin(payload));
        assert!(!second.iter().any(|c| matches!(c, Command::Login(_))));
    }
}
