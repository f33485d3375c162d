use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::api::profile::{Profile, ProfileUpdate, Role};
use crate::components::{DashboardLayout, EditableRow, InfoRow, NavItem};
use crate::session::use_session;

fn nav_for(role: Role) -> (Vec<NavItem>, &'static str) {
    match role {
        Role::Member => (
            vec![
                NavItem { label: "Mes cotisations", href: "/member/cotisations" },
                NavItem { label: "Mon profil", href: "/dashboard" },
            ],
            "/dashboard",
        ),
        Role::Supervisor => (
            vec![
                NavItem { label: "Tableau de bord", href: "/manager/dashboard" },
                NavItem { label: "Mon profil", href: "/supervisor/profile" },
            ],
            "/supervisor/profile",
        ),
        _ => (
            vec![NavItem { label: "Mon profil", href: "/dashboard" }],
            "/dashboard",
        ),
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let session = use_session();
    let profile =
        LocalResource::new(move || async move { api::profile::get_my_profile(&session).await });

    view! {
        <Suspense fallback=move || {
            view! { <div class="loading">"Chargement du profil..."</div> }
        }>
            {move || {
                profile
                    .get()
                    .map(|result| match &*result {
                        Ok(profile) => {
                            view! { <ProfileContent profile=profile.clone() /> }.into_any()
                        }
                        Err(err) => {
                            view! {
                                <div class="error-banner">
                                    {format!("Profil indisponible: {}", err)}
                                </div>
                            }
                                .into_any()
                        }
                    })
            }}
        </Suspense>
    }
}

#[component]
fn ProfileContent(profile: Profile) -> impl IntoView {
    let session = use_session();
    let role = profile.normalized_role();
    let (nav, active) = nav_for(role);

    let name = RwSignal::new(profile.name.clone().unwrap_or_default());
    let email = RwSignal::new(profile.email.clone().unwrap_or_default());
    let telephone = RwSignal::new(profile.telephone.clone().unwrap_or_default());
    let address = RwSignal::new(profile.address.clone().unwrap_or_default());
    let age = RwSignal::new(profile.age.map(|a| a.to_string()).unwrap_or_default());
    let professional_status =
        RwSignal::new(profile.professional_status.clone().unwrap_or_default());

    let committee = profile.committee_name();
    let committee_row = RwSignal::new(committee);
    let role_row = RwSignal::new(role.label().to_string());

    let editing = RwSignal::new(false);
    let message = RwSignal::new(None::<(bool, String)>);
    let busy = RwSignal::new(false);

    let display_name = Signal::derive(move || {
        let n = name.get();
        if n.trim().is_empty() { "Membre".to_string() } else { n }
    });

    let save = move |_| {
        if busy.get() {
            return;
        }
        busy.set(true);
        message.set(None);
        let update = ProfileUpdate {
            name: Some(name.get()),
            email: Some(email.get()),
            telephone: Some(telephone.get()),
            address: Some(address.get()),
            age: age.get().trim().parse().ok(),
            professional_status: Some(professional_status.get()),
        };
        spawn_local(async move {
            match api::profile::update_my_profile(&session, &update).await {
                Ok(fresh) => {
                    name.set(fresh.name.unwrap_or_default());
                    email.set(fresh.email.unwrap_or_default());
                    telephone.set(fresh.telephone.unwrap_or_default());
                    address.set(fresh.address.unwrap_or_default());
                    age.set(fresh.age.map(|a| a.to_string()).unwrap_or_default());
                    professional_status.set(fresh.professional_status.unwrap_or_default());
                    editing.set(false);
                    message.set(Some((false, "Profil mis à jour".to_string())));
                }
                Err(err) => {
                    message.set(Some((true, format!("Échec de la mise à jour: {}", err))));
                }
            }
            busy.set(false);
        });
    };

    view! {
        <DashboardLayout user_name=display_name role_label=role.label() nav=nav active=active>
            <h1>"Mon profil"</h1>

            {move || {
                message
                    .get()
                    .map(|(is_error, text)| {
                        let class = if is_error { "banner error" } else { "banner" };
                        view! { <div class=class>{text}</div> }
                    })
            }}

            <section class="profile-card">
                <EditableRow label="Nom" editing=editing field=name />
                <EditableRow label="Email" editing=editing field=email />
                <EditableRow label="Téléphone" editing=editing field=telephone />
                <EditableRow label="Adresse" editing=editing field=address />
                <EditableRow label="Âge" editing=editing field=age />
                <EditableRow label="Statut professionnel" editing=editing field=professional_status />
                <InfoRow label="Comité" value=committee_row />
                <InfoRow label="Rôle" value=role_row />
            </section>

            <div class="profile-actions">
                {move || {
                    if editing.get() {
                        view! {
                            <button disabled=move || busy.get() on:click=save>
                                {move || if busy.get() { "Enregistrement..." } else { "Enregistrer" }}
                            </button>
                            <button class="secondary" on:click=move |_| editing.set(false)>
                                "Annuler"
                            </button>
                        }
                            .into_any()
                    } else {
                        view! {
                            <button on:click=move |_| editing.set(true)>"Modifier"</button>
                        }
                            .into_any()
                    }
                }}
            </div>
        </DashboardLayout>
    }
}
