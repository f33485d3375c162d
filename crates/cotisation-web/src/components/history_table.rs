use cotisation_core::format::{format_amount, format_date};
use cotisation_core::Contribution;
use leptos::prelude::*;

/// Contribution listing shared by the member and committee views
#[component]
pub fn ContributionsTable(
    #[prop(into)] rows: Signal<Vec<Contribution>>,
    #[prop(optional)] show_member: bool,
) -> impl IntoView {
    view! {
        <table class="history-table">
            <thead>
                <tr>
                    <th>"Date"</th>
                    {show_member.then(|| view! { <th>"Membre"</th> })}
                    <th>"Montant"</th>
                    <th>"Moyen"</th>
                    <th>"Statut"</th>
                    <th>"Preuve"</th>
                </tr>
            </thead>
            <tbody>
                {move || {
                    let rows = rows.get();
                    if rows.is_empty() {
                        let span = if show_member { 6 } else { 5 };
                        view! {
                            <tr>
                                <td colspan=span class="empty-row">
                                    "Aucune cotisation trouvée"
                                </td>
                            </tr>
                        }
                            .into_any()
                    } else {
                        rows.into_iter()
                            .map(|row| {
                                let status = row.status();
                                view! {
                                    <tr>
                                        <td>{format_date(row.resolved_time())}</td>
                                        {show_member
                                            .then(|| {
                                                view! {
                                                    <td>
                                                        {row
                                                            .member_display_name()
                                                            .unwrap_or("-")
                                                            .to_string()}
                                                    </td>
                                                }
                                            })}
                                        <td>{format_amount(row.amount())}</td>
                                        <td>{row.channel().unwrap_or("-").to_string()}</td>
                                        <td>
                                            <span class=format!(
                                                "status-badge {}",
                                                status.css_class(),
                                            )>{status.to_string()}</span>
                                        </td>
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
                                    </tr>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }
                }}
            </tbody>
        </table>
    }
}
