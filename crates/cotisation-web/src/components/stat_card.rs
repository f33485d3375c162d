use leptos::prelude::*;

/// One dashboard figure with its caption
#[component]
pub fn StatCard(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(optional)] subtitle: Option<&'static str>,
    #[prop(optional)] accent: Option<&'static str>,
) -> impl IntoView {
    let class = match accent {
        Some(accent) => format!("stat-card {}", accent),
        None => "stat-card".to_string(),
    };

    view! {
        <div class=class>
            <div class="stat-label">{label}</div>
            <div class="stat-value">{value}</div>
            {subtitle.map(|s| view! { <div class="stat-subtitle">{s}</div> })}
        </div>
    }
}
