//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::config::{API_BASE_META, ClientConfig, REFERRAL_FORM_META};
use crate::pages::{admin::AdminPage, login::LoginPage, student::StudentPage};
use crate::state::auth::AuthState;
use crate::util::auth::install_session_restore;

/// HTML shell rendered on the server for SSR + hydration.
///
/// Expects the host to have provided a `ClientConfig` context; its values are
/// written into `<meta>` tags so the hydrated client can read them back.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    let config = use_context::<ClientConfig>().unwrap_or_default();
    let api_base = config.api_base_url.unwrap_or_default();
    let form_url = config.referral_form_url.unwrap_or_default();
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <meta name=API_BASE_META content=api_base/>
                <meta name=REFERRAL_FORM_META content=form_url/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the client configuration and auth state to every page.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = use_context::<ClientConfig>().unwrap_or_else(ClientConfig::detect);
    provide_context(config);

    let auth = RwSignal::new(AuthState::default());
    provide_context(auth);
    install_session_restore(auth);

    view! {
        <Stylesheet id="leptos" href="/pkg/placify-connect.css"/>
        <Title text="Placify Connect"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=LoginPage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("student") view=StudentPage/>
                <Route path=StaticSegment("admin") view=AdminPage/>
            </Routes>
        </Router>
    }
}
