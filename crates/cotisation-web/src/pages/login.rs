use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use shared::CONFIG;

use crate::api;
use crate::session::use_session;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    // (is_error, text)
    let message = RwSignal::new(None::<(bool, String)>);
    let busy = RwSignal::new(false);

    let navigate = use_navigate();
    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = email.get();
        let password_value = password.get();
        if email_value.trim().is_empty() || password_value.is_empty() {
            message.set(Some((true, "Email et mot de passe requis".to_string())));
            return;
        }

        busy.set(true);
        message.set(None);
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::auth::sign_in(email_value.trim(), &password_value).await {
                Ok(token) => {
                    session.store(token);
                    navigate("/dashboard", Default::default());
                }
                Err(err) => {
                    message.set(Some((true, format!("Connexion impossible: {}", err))));
                }
            }
            busy.set(false);
        });
    };

    let forgot = move |_| {
        let email_value = email.get();
        if email_value.trim().is_empty() {
            message.set(Some((true, "Saisissez votre email d'abord".to_string())));
            return;
        }
        spawn_local(async move {
            match api::auth::request_password_reset(email_value.trim()).await {
                Ok(()) => message.set(Some((
                    false,
                    "Email de réinitialisation envoyé".to_string(),
                ))),
                Err(err) => message.set(Some((true, format!("Échec de l'envoi: {}", err)))),
            }
        });
    };

    view! {
        <main class="login-page">
            <div class="login-card">
                <h1>{CONFIG.name}</h1>
                <p class="login-tagline">{CONFIG.tagline}</p>

                {move || {
                    message
                        .get()
                        .map(|(is_error, text)| {
                            let class = if is_error {
                                "login-message error"
                            } else {
                                "login-message"
                            };
                            view! { <div class=class>{text}</div> }
                        })
                }}

                <form on:submit=submit>
                    <label>
                        "Email"
                        <input
                            type="email"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Mot de passe"
                        <input
                            type="password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </label>
                    <button type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Connexion..." } else { "Se connecter" }}
                    </button>
                </form>

                <button class="link-button" on:click=forgot>
                    "Mot de passe oublié ?"
                </button>
            </div>
        </main>
    }
}
