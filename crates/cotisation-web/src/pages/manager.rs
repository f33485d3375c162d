use chrono::NaiveDate;
use cotisation_core::format::{format_amount, format_date, format_percent};
use cotisation_core::{Contribution, DashboardPayload, distribution, filter_by_range, sort_newest_first};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::cotisations::ForMemberSubmission;
use crate::api::profile::Profile;
use crate::api::users::Member;
use crate::api::{self, ApiResult};
use crate::components::{ContributionsTable, DashboardLayout, NavItem, StatCard};
use crate::session::{Session, use_session};

#[derive(Clone)]
struct ManagerData {
    profile: Profile,
    payload: DashboardPayload,
    pending: Vec<Contribution>,
    members: Vec<Member>,
    history: Vec<Contribution>,
}

/// The profile gates the page; every other block degrades to empty on failure
async fn fetch_manager_data(session: Session) -> ApiResult<ManagerData> {
    let profile = api::profile::get_my_profile(&session).await?;
    let (payload, pending, members, history) = futures::join!(
        api::cotisations::manager_dashboard(&session),
        api::cotisations::pending(&session),
        api::users::get_users(&session),
        api::cotisations::manager_history(&session),
    );
    Ok(ManagerData {
        profile,
        payload: payload.unwrap_or_default(),
        pending: pending.unwrap_or_default(),
        members: members.unwrap_or_default(),
        history: history.unwrap_or_default(),
    })
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

/// A failed date-only search can still be answered from the committee-wide
/// snapshot. A member filter cannot: the snapshot spans every member, so
/// substituting it would show the wrong member's records.
fn local_fallback(
    snapshot: &[Contribution],
    member_selected: bool,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Option<Vec<Contribution>> {
    if member_selected {
        return None;
    }
    let mut filtered = filter_by_range(snapshot, from, to);
    sort_newest_first(&mut filtered);
    Some(filtered)
}

/// Committee listing under the active filters
async fn load_list(
    session: Session,
    member: Option<String>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> ApiResult<Vec<Contribution>> {
    match member {
        Some(id) => {
            let records = api::cotisations::member_contributions(&session, &id).await?;
            if from.is_some() || to.is_some() {
                let mut filtered = filter_by_range(&records, from, to);
                sort_newest_first(&mut filtered);
                Ok(filtered)
            } else {
                Ok(records)
            }
        }
        None if from.is_some() || to.is_some() => {
            api::cotisations::manager_period(&session, from, to).await
        }
        None => api::cotisations::manager_history(&session).await,
    }
}

#[component]
pub fn ManagerPage() -> impl IntoView {
    let session = use_session();
    let data = LocalResource::new(move || fetch_manager_data(session));

    view! {
        <Suspense fallback=move || {
            view! { <div class="loading">"Chargement du tableau de bord..."</div> }
        }>
            {move || {
                data.get()
                    .map(|result| match &*result {
                        Ok(data) => view! { <ManagerContent data=data.clone() /> }.into_any(),
                        Err(err) => {
                            view! {
                                <div class="error-banner">
                                    {format!("Tableau de bord indisponible: {}", err)}
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
fn ManagerContent(data: ManagerData) -> impl IntoView {
    let session = use_session();
    let role = data.profile.normalized_role();
    let nav = vec![
        NavItem { label: "Tableau de bord", href: "/manager/dashboard" },
        NavItem { label: "Mon profil", href: "/supervisor/profile" },
    ];

    let stats = RwSignal::new(data.payload.stats.clone());
    let snapshot = StoredValue::new(data.history.clone());
    let list = RwSignal::new(data.history);
    let pending_list = RwSignal::new(data.pending);
    let members = StoredValue::new(data.members);

    let from_input = RwSignal::new(String::new());
    let to_input = RwSignal::new(String::new());
    let member_select = RwSignal::new(String::new());
    let message = RwSignal::new(None::<(bool, String)>);

    let selected_member = move || {
        let id = member_select.get_untracked();
        if id.trim().is_empty() { None } else { Some(id) }
    };

    // Re-pull pending, stats and the listing under whatever filters are active
    let refresh = move || {
        spawn_local(async move {
            if let Ok(fresh) = api::cotisations::pending(&session).await {
                pending_list.set(fresh);
            }
            if let Ok(payload) = api::cotisations::manager_dashboard(&session).await {
                stats.set(payload.stats);
            }
            let member = selected_member();
            let from = parse_date(&from_input.get_untracked());
            let to = parse_date(&to_input.get_untracked());
            if member.is_none() && from.is_none() && to.is_none() {
                if let Ok(records) = api::cotisations::manager_history(&session).await {
                    snapshot.set_value(records.clone());
                    list.set(records);
                }
            } else if let Ok(records) = load_list(session, member, from, to).await {
                list.set(records);
            }
        });
    };

    let search = move |_| {
        let member = selected_member();
        let from = parse_date(&from_input.get());
        let to = parse_date(&to_input.get());
        if member.is_none() && from.is_none() && to.is_none() {
            message.set(Some((true, "Choisissez un membre ou une période".to_string())));
            return;
        }
        message.set(None);
        spawn_local(async move {
            let member_selected = member.is_some();
            match load_list(session, member, from, to).await {
                Ok(records) => list.set(records),
                Err(err) => {
                    match local_fallback(&snapshot.get_value(), member_selected, from, to) {
                        Some(filtered) => list.set(filtered),
                        None => {
                            message.set(Some((true, format!("Recherche impossible: {}", err))));
                        }
                    }
                }
            }
        });
    };

    let reset = move |_| {
        from_input.set(String::new());
        to_input.set(String::new());
        member_select.set(String::new());
        message.set(None);
        list.set(snapshot.get_value());
        refresh();
    };

    let validate = move |id: String| {
        spawn_local(async move {
            match api::cotisations::validate(&session, &id).await {
                Ok(()) => {
                    message.set(Some((false, "Cotisation validée".to_string())));
                    refresh();
                }
                Err(err) => message.set(Some((true, format!("Échec de la validation: {}", err)))),
            }
        });
    };

    let reject = move |id: String| {
        let reason = web_sys::window()
            .and_then(|w| w.prompt_with_message("Motif du rejet ?").ok().flatten())
            .unwrap_or_default();
        if reason.trim().is_empty() {
            return;
        }
        spawn_local(async move {
            match api::cotisations::reject(&session, &id, reason.trim()).await {
                Ok(()) => {
                    message.set(Some((false, "Cotisation rejetée".to_string())));
                    refresh();
                }
                Err(err) => message.set(Some((true, format!("Échec du rejet: {}", err)))),
            }
        });
    };

    // Submission on behalf of a member
    let fm_member = RwSignal::new(String::new());
    let fm_amount = RwSignal::new(String::new());
    let fm_method = RwSignal::new(String::new());
    let fm_operator = RwSignal::new(String::new());
    let fm_transaction = RwSignal::new(String::new());
    let fm_reference = RwSignal::new(String::new());
    // web_sys::File is not Send, so this signal stays on the main thread
    let fm_proof = RwSignal::new_local(None::<web_sys::File>);
    let fm_busy = RwSignal::new(false);

    let pick_proof = move |ev: leptos::ev::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        fm_proof.set(input.files().and_then(|files| files.get(0)));
    };

    let opt = |signal: RwSignal<String>| {
        let value = signal.get();
        let value = value.trim();
        if value.is_empty() { None } else { Some(value.to_string()) }
    };

    let submit_for_member = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if fm_busy.get() {
            return;
        }
        let member_id = fm_member.get();
        if member_id.trim().is_empty() {
            message.set(Some((true, "Choisissez un membre".to_string())));
            return;
        }
        let amount: f64 = match fm_amount.get().trim().parse() {
            Ok(amount) if amount > 0.0 => amount,
            _ => {
                message.set(Some((true, "Montant invalide".to_string())));
                return;
            }
        };
        let method = fm_method.get();
        if method.trim().is_empty() {
            message.set(Some((true, "Choisissez un moyen de paiement".to_string())));
            return;
        }

        let submission = ForMemberSubmission {
            member_id: member_id.trim().to_string(),
            amount,
            method: method.trim().to_string(),
            operator: opt(fm_operator),
            transaction_id: opt(fm_transaction),
            reference: opt(fm_reference),
            proof: fm_proof.get(),
        };

        fm_busy.set(true);
        message.set(None);
        spawn_local(async move {
            match api::cotisations::submit_for_member(&session, &submission).await {
                Ok(()) => {
                    fm_member.set(String::new());
                    fm_amount.set(String::new());
                    fm_method.set(String::new());
                    fm_operator.set(String::new());
                    fm_transaction.set(String::new());
                    fm_reference.set(String::new());
                    fm_proof.set(None);
                    message.set(Some((false, "Cotisation enregistrée".to_string())));
                    refresh();
                }
                Err(err) => {
                    message.set(Some((true, format!("Échec de l'enregistrement: {}", err))));
                }
            }
            fm_busy.set(false);
        });
    };

    let display_name = data.profile.display_name();
    let committee = data.profile.committee_name();

    let total = Signal::derive(move || format_amount(stats.get().total_contributions));
    let commissions = Signal::derive(move || format_amount(stats.get().total_commissions));
    let net = Signal::derive(move || format_amount(stats.get().total_net_amount));
    let member_count = Signal::derive(move || stats.get().member_count.to_string());
    let pending_count = Signal::derive(move || pending_list.get().len().to_string());

    let member_options = move || {
        members
            .get_value()
            .into_iter()
            .filter_map(|member| {
                member.key().map(|id| {
                    let id = id.to_string();
                    let label = member.display_name();
                    view! { <option value=id>{label}</option> }
                })
            })
            .collect_view()
    };

    view! {
        <DashboardLayout
            user_name=Signal::derive(move || display_name.clone())
            role_label=role.label()
            nav=nav
            active="/manager/dashboard"
        >
            <h1>"Tableau de bord"</h1>
            <p class="committee-name">{committee}</p>

            {move || {
                message
                    .get()
                    .map(|(is_error, text)| {
                        let class = if is_error { "banner error" } else { "banner" };
                        view! { <div class=class>{text}</div> }
                    })
            }}

            <div class="stat-grid">
                <StatCard label="Total des cotisations" value=total />
                <StatCard label="Commissions" value=commissions />
                <StatCard label="Montant net" value=net accent="accent-green" />
                <StatCard label="Membres" value=member_count />
                <StatCard
                    label="En attente"
                    value=pending_count
                    subtitle="à valider"
                    accent="accent-orange"
                />
            </div>

            <section class="distribution">
                <h2>"Répartition du montant net"</h2>
                {move || {
                    distribution(&stats.get())
                        .into_iter()
                        .map(|slice| {
                            view! {
                                <div class="distribution-row">
                                    <span class="distribution-label">{slice.label}</span>
                                    <div class="distribution-track">
                                        <div
                                            class=format!("distribution-bar {}", slice.css_class)
                                            style=format!("width: {}%", slice.bar_width())
                                        ></div>
                                    </div>
                                    <span class="distribution-figure">
                                        {format_amount(slice.amount)} " ("
                                        {format_percent(slice.percent, 1)} ")"
                                    </span>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </section>

            <section class="pending">
                <h2>"En attente de validation"</h2>
                {move || {
                    let rows = pending_list.get();
                    if rows.is_empty() {
                        view! { <p class="empty-row">"Aucune cotisation en attente"</p> }
                            .into_any()
                    } else {
                        view! {
                            <table class="history-table">
                                <thead>
                                    <tr>
                                        <th>"Date"</th>
                                        <th>"Membre"</th>
                                        <th>"Montant"</th>
                                        <th>"Preuve"</th>
                                        <th>"Actions"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {rows
                                        .into_iter()
                                        .map(|row| {
                                            let id = row.key().map(str::to_string);
                                            let validate_id = id.clone();
                                            let reject_id = id.clone();
                                            view! {
                                                <tr>
                                                    <td>{format_date(row.resolved_time())}</td>
                                                    <td>
                                                        {row
                                                            .member_display_name()
                                                            .unwrap_or("-")
                                                            .to_string()}
                                                    </td>
                                                    <td>{format_amount(row.amount())}</td>
                                                    <td>
                                                        {match row.proof_image() {
                                                            Some(href) => {
                                                                view! {
                                                                    <a
                                                                        href=href.to_string()
                                                                        target="_blank"
                                                                        rel="noopener noreferrer"
                                                                    >
                                                                        "Voir"
                                                                    </a>
                                                                }
                                                                    .into_any()
                                                            }
                                                            None => view! { <span>"-"</span> }.into_any(),
                                                        }}
                                                    </td>
                                                    <td>
                                                        {id.is_some()
                                                            .then(move || {
                                                                view! {
                                                                    <button on:click=move |_| {
                                                                        if let Some(id) = validate_id.clone() {
                                                                            validate(id);
                                                                        }
                                                                    }>"Valider"</button>
                                                                    <button
                                                                        class="secondary"
                                                                        on:click=move |_| {
                                                                            if let Some(id) = reject_id.clone() {
                                                                                reject(id);
                                                                            }
                                                                        }
                                                                    >
                                                                        "Rejeter"
                                                                    </button>
                                                                }
                                                            })}
                                                    </td>
                                                </tr>
                                            }
                                        })
                                        .collect_view()}
                                </tbody>
                            </table>
                        }
                            .into_any()
                    }
                }}
            </section>

            <section class="filter-bar">
                <label>
                    "Membre"
                    <select on:change=move |ev| member_select.set(event_target_value(&ev))>
                        <option value="">"Tous les membres"</option>
                        {member_options}
                    </select>
                </label>
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

            <ContributionsTable rows=list show_member=true />

            <section class="submit-card">
                <h2>"Cotiser pour un membre"</h2>
                <form on:submit=submit_for_member>
                    <label>
                        "Membre"
                        <select on:change=move |ev| fm_member.set(event_target_value(&ev))>
                            <option value="">"-- choisir --"</option>
                            {member_options}
                        </select>
                    </label>
                    <label>
                        "Montant (FCFA)"
                        <input
                            type="number"
                            min="1"
                            prop:value=move || fm_amount.get()
                            on:input=move |ev| fm_amount.set(event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Moyen de paiement"
                        <select on:change=move |ev| fm_method.set(event_target_value(&ev))>
                            <option value="">"-- choisir --"</option>
                            <option value="wave">"Wave"</option>
                            <option value="orange-money">"Orange Money"</option>
                            <option value="especes">"Espèces"</option>
                            <option value="virement">"Virement"</option>
                        </select>
                    </label>
                    <label>
                        "Opérateur"
                        <input
                            prop:value=move || fm_operator.get()
                            on:input=move |ev| fm_operator.set(event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "N° de transaction"
                        <input
                            prop:value=move || fm_transaction.get()
                            on:input=move |ev| fm_transaction.set(event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Référence"
                        <input
                            prop:value=move || fm_reference.get()
                            on:input=move |ev| fm_reference.set(event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Preuve de paiement"
                        <input type="file" accept="image/*" on:change=pick_proof />
                    </label>
                    <button type="submit" disabled=move || fm_busy.get()>
                        {move || if fm_busy.get() { "Envoi..." } else { "Enregistrer" }}
                    </button>
                </form>
            </section>
        </DashboardLayout>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: &str, date: &str) -> Contribution {
        serde_json::from_value(json!({ "id": id, "createdAt": date })).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn member_search_failure_never_falls_back_to_the_committee_snapshot() {
        let snapshot = vec![record("a", "2024-01-10"), record("b", "2024-02-10")];
        assert!(local_fallback(&snapshot, true, None, None).is_none());
        assert!(local_fallback(&snapshot, true, Some(date("2024-01-01")), None).is_none());
    }

    #[test]
    fn date_only_search_failure_filters_the_snapshot_locally() {
        let snapshot = vec![record("a", "2024-01-10"), record("b", "2024-02-10")];
        let kept =
            local_fallback(&snapshot, false, Some(date("2024-01-01")), Some(date("2024-01-31")))
                .unwrap();
        assert_eq!(
            kept.iter().map(|c| c.key().unwrap()).collect::<Vec<_>>(),
            vec!["a"]
        );
    }
}
