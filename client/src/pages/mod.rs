//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each routed [`View`] has exactly one page component. `render_view` is the
//! exhaustive mapping used by the `<Routes>` tree, so adding a view without a
//! page fails to compile.

pub mod enter_steam_id;
pub mod home_page;
pub mod not_found;
pub mod sign_in;

use leptos::prelude::*;

use crate::routes::View;

/// Render the page bound to `view`.
pub fn render_view(view: View) -> AnyView {
    match view {
        View::EnterSteamId => view! { <enter_steam_id::EnterSteamIdPage/> }.into_any(),
        View::SignIn => view! { <sign_in::SignInPage/> }.into_any(),
        View::HomePage => view! { <home_page::HomePage/> }.into_any(),
    }
}
