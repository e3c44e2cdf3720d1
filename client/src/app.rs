//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::nav_shell::{NavFooter, NavHeader};
use crate::components::toast_host::ToastHost;
use crate::net::api::ApiClient;
use crate::net::transport::default_transport;
use crate::pages::{
    approvals::ApprovalsPage, categories::CategoriesPage, expenses::ExpensesPage, grants::GrantsPage,
    home::HomePage, roles::RolesPage, rule_editor::RuleEditorPage, rules::RulesPage, sign_in::SignInPage,
    users::UsersPage,
};
use crate::state::session::Session;
use crate::state::toast::ToastState;
use crate::util::auth::SessionExpiry;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
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
/// Provides the session, API client, and toast queue, then sets up routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = Session::browser();
    let expiry = SessionExpiry::default();
    let api = ApiClient::new(default_transport(), session.clone()).with_rejection_handler(move || expiry.raise());
    let toasts = RwSignal::new(ToastState::default());

    provide_context(session);
    provide_context(api);
    provide_context(toasts);
    provide_context(expiry);

    view! {
        <Stylesheet id="leptos" href="/pkg/grantdesk.css"/>
        <Title text="Grant Desk"/>

        <Router>
            <NavHeader/>
            <main class="app-main">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=SignInPage/>
                    <Route path=StaticSegment("grants") view=GrantsPage/>
                    <Route path=StaticSegment("home") view=HomePage/>
                    <Route path=StaticSegment("expenses") view=ExpensesPage/>
                    <Route path=StaticSegment("approvals") view=ApprovalsPage/>
                    <Route path=StaticSegment("categories") view=CategoriesPage/>
                    <Route path=StaticSegment("roles") view=RolesPage/>
                    <Route path=StaticSegment("users") view=UsersPage/>
                    <Route path=StaticSegment("rules") view=RulesPage/>
                    <Route path=(StaticSegment("rules"), StaticSegment("new")) view=RuleEditorPage/>
                    <Route path=(StaticSegment("rules"), ParamSegment("id")) view=RuleEditorPage/>
                </Routes>
            </main>
            <NavFooter/>
            <ToastHost/>
        </Router>
    }
}
