use leptos::prelude::*;
use leptos_router::components::A;
use shared::CONFIG;

use crate::session::use_session;

/// Up to two uppercase initials for the sidebar avatar
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// One sidebar entry
#[derive(Clone, Copy)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
}

/// Sidebar-plus-content shell shared by the signed-in pages
#[component]
pub fn DashboardLayout(
    #[prop(into)] user_name: Signal<String>,
    #[prop(into)] role_label: Signal<&'static str>,
    nav: Vec<NavItem>,
    active: &'static str,
    children: Children,
) -> impl IntoView {
    let session = use_session();

    view! {
        <div class="dashboard">
            <aside class="sidebar">
                <div class="sidebar-brand">{CONFIG.name}</div>
                <div class="sidebar-user">
                    <div class="avatar">{move || initials(&user_name.get())}</div>
                    <div>
                        <div class="user-name">{user_name}</div>
                        <div class="user-role">{role_label}</div>
                    </div>
                </div>
                <nav class="sidebar-nav">
                    {nav
                        .into_iter()
                        .map(|item| {
                            let class = if item.href == active {
                                "nav-link active"
                            } else {
                                "nav-link"
                            };
                            view! {
                                <A href=item.href attr:class=class>
                                    {item.label}
                                </A>
                            }
                        })
                        .collect_view()}
                </nav>
                <button class="nav-link logout" on:click=move |_| session.expire()>
                    "Déconnexion"
                </button>
            </aside>
            <main class="dashboard-content">{children()}</main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::initials;

    #[test]
    fn initials_takes_first_two_words() {
        assert_eq!(initials("Awa Diop"), "AD");
        assert_eq!(initials("Jean Pierre Ndiaye"), "JP");
    }

    #[test]
    fn initials_single_word() {
        assert_eq!(initials("awa"), "A");
    }

    #[test]
    fn initials_empty_and_whitespace() {
        assert_eq!(initials(""), "");
        assert_eq!(initials("   "), "");
    }
}
