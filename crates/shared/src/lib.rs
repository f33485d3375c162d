/// Static application configuration
pub struct Config {
    pub name: &'static str,
    pub tagline: &'static str,

    /// Base URL of the cotisation API - every endpoint is relative to this
    pub api_base_url: &'static str,
    /// Identity provider REST endpoint for email/password sign-in
    pub sign_in_url: &'static str,
    /// Identity provider REST endpoint for password-reset emails
    pub password_reset_url: &'static str,

    pub storage: StorageKeys,
}

/// localStorage keys for the persisted bearer token.
/// `token_key` is the canonical key; `legacy_token_key` is still read and
/// cleared for sessions created by older builds.
pub struct StorageKeys {
    pub token_key: &'static str,
    pub legacy_token_key: &'static str,
}

pub static CONFIG: Config = Config {
    name: "Cotizenship",
    tagline: "Gérez vos cotisations en toute sécurité",

    api_base_url: "http://localhost:5000",
    sign_in_url: "https://identitytoolkit.googleapis.com/v1/accounts:signInWithPassword?key=AIzaSyCotizenshipWebClient",
    password_reset_url: "https://identitytoolkit.googleapis.com/v1/accounts:sendOobCode?key=AIzaSyCotizenshipWebClient",

    storage: StorageKeys {
        token_key: "idToken",
        legacy_token_key: "token",
    },
};
