use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::pages::{LoginPage, ManagerPage, MemberPage, ProfilePage};
use crate::session::Session;

#[component]
pub fn App() -> impl IntoView {
    provide_context(Session::restore());

    view! {
        <Router>
            <Routes fallback=|| view! { <p>"404 - Page introuvable"</p> }>
                <Route path=path!("/") view=LoginPage />
                <Route path=path!("/dashboard") view=ProfilePage />
                <Route path=path!("/member/cotisations") view=MemberPage />
                <Route path=path!("/manager/dashboard") view=ManagerPage />
                <Route path=path!("/supervisor/profile") view=ProfilePage />
            </Routes>
        </Router>
    }
}
