use chrono::NaiveDate;
use cotisation_core::format::format_amount;
use cotisation_core::{Contribution, Status, filter_by_range, sort_newest_first};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::profile::Profile;
use crate::api::{self, ApiResult};
use crate::components::{ContributionsTable, DashboardLayout, NavItem, StatCard};
use crate::session::{Session, use_session};

#[derive(Clone)]
struct MemberData {
    profile: Profile,
    history: Vec<Contribution>,
}

async fn fetch_member_data(session: Session) -> ApiResult<MemberData> {
    let (profile, history) = futures::join!(
        api::profile::get_my_profile(&session),
        api::cotisations::member_history(&session),
    );
    Ok(MemberData {
        profile: profile?,
        history: history?,
    })
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

#[component]
pub fn MemberPage() -> impl IntoView {
    let session = use_session();
    let data = LocalResource::new(move || fetch_member_data(session));

    view! {
        <Suspense fallback=move || {
            view! { <div class="loading">"Chargement..."</div> }
        }>
            {move || {
                data.get()
                    .map(|result| match &*result {
                        Ok(data) => {
                            view! {
                                <MemberContent
                                    profile=data.profile.clone()
                                    history=data.history.clone()
                                />
                            }
                                .into_any()
                        }
                        Err(err) => {
                            view! {
                                <div class="error-banner">
                                    {format!("Données indisponibles: {}", err)}
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
fn MemberContent(profile: Profile, history: Vec<Contribution>) -> impl IntoView {
    let session = use_session();
    let role = profile.normalized_role();
    let nav = vec![
        NavItem { label: "Mes cotisations", href: "/member/cotisations" },
        NavItem { label: "Mon profil", href: "/dashboard" },
    ];

    // Full unfiltered history, kept aside so filters never lose data
    let snapshot = StoredValue::new(history.clone());
    let shown = RwSignal::new(history);

    let from_input = RwSignal::new(String::new());
    let to_input = RwSignal::new(String::new());
    let message = RwSignal::new(None::<(bool, String)>);

    let amount_input = RwSignal::new(String::new());
    let method_input = RwSignal::new(String::new());
    let submitting = RwSignal::new(false);

    let validated_total = Signal::derive(move || {
        let total: f64 = shown
            .get()
            .iter()
            .filter(|c| c.status() == Status::Validated)
            .map(|c| c.amount())
            .sum();
        format_amount(total)
    });
    let count = Signal::derive(move || shown.get().len().to_string());

    let search = move |_| {
        let from = parse_date(&from_input.get());
        let to = parse_date(&to_input.get());
        if from.is_none() && to.is_none() {
            message.set(Some((true, "Sélectionnez au moins une date".to_string())));
            return;
        }
        message.set(None);
        spawn_local(async move {
            match api::cotisations::member_period(&session, from, to).await {
                Ok(records) => shown.set(records),
                // Range endpoint unavailable: filter the snapshot locally
                Err(_) => {
                    let mut filtered = filter_by_range(&snapshot.get_value(), from, to);
                    sort_newest_first(&mut filtered);
                    shown.set(filtered);
                }
            }
        });
    };

    let reset = move |_| {
        from_input.set(String::new());
        to_input.set(String::new());
        message.set(None);
        shown.set(snapshot.get_value());
        spawn_local(async move {
            if let Ok(records) = api::cotisations::member_history(&session).await {
                snapshot.set_value(records.clone());
                shown.set(records);
            }
        });
    };

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get() {
            return;
        }
        let amount: f64 = match amount_input.get().trim().parse() {
            Ok(amount) if amount > 0.0 => amount,
            _ => {
                message.set(Some((true, "Montant invalide".to_string())));
                return;
            }
        };
        let method = method_input.get();
        if method.trim().is_empty() {
            message.set(Some((true, "Choisissez un moyen de paiement".to_string())));
            return;
        }

        submitting.set(true);
        message.set(None);
        spawn_local(async move {
            match api::cotisations::submit(&session, amount, method.trim(), false).await {
                Ok(()) => {
                    amount_input.set(String::new());
                    method_input.set(String::new());
                    message.set(Some((false, "Cotisation soumise".to_string())));
                    if let Ok(records) = api::cotisations::member_history(&session).await {
                        snapshot.set_value(records.clone());
                        shown.set(records);
                    }
                }
                Err(err) => {
                    message.set(Some((true, format!("Échec de la soumission: {}", err))));
                }
            }
            submitting.set(false);
        });
    };

    let display_name = profile.display_name();

    view! {
        <DashboardLayout
            user_name=Signal::derive(move || display_name.clone())
            role_label=role.label()
            nav=nav
            active="/member/cotisations"
        >
            <h1>"Mes cotisations"</h1>

            {move || {
                message
                    .get()
                    .map(|(is_error, text)| {
                        let class = if is_error { "banner error" } else { "banner" };
                        view! { <div class=class>{text}</div> }
                    })
            }}

            <div class="stat-grid">
                <StatCard label="Cotisations affichées" value=count />
                <StatCard label="Total validé" value=validated_total accent="accent-green" />
            </div>

            <section class="filter-bar">
                <label>
                    "Du"
                    <input
                        type="date"
                        prop:value=move || from_input.get()
                        on:input=move |ev| from_input.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Au"
                    <input
                        type="date"
                        prop:value=move || to_input.get()
                        on:input=move |ev| to_input.set(event_target_value(&ev))
                    />
                </label>
                <button on:click=search>"Rechercher"</button>
                <button class="secondary" on:click=reset>
                    "Réinitialiser"
                </button>
            </section>

            <ContributionsTable rows=shown />

            <section class="submit-card">
                <h2>"Nouvelle cotisation"</h2>
                <form on:submit=submit>
                    <label>
                        "Montant (FCFA)"
                        <input
                            type="number"
                            min="1"
                            prop:value=move || amount_input.get()
                            on:input=move |ev| amount_input.set(event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Moyen de paiement"
                        <select on:change=move |ev| method_input.set(event_target_value(&ev))>
                            <option value="">"-- choisir --"</option>
                            <option value="wave">"Wave"</option>
                            <option value="orange-money">"Orange Money"</option>
                            <option value="especes">"Espèces"</option>
                            <option value="virement">"Virement"</option>
                        </select>
                    </label>
                    <button type="submit" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Envoi..." } else { "Soumettre" }}
                    </button>
                </form>
            </section>
        </DashboardLayout>
    }
}
