use thiserror::Error;

/// Failure taxonomy for remote calls. Everything ends up rendered as an
/// inline message in the view that initiated the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 401 - the session has already been expired by the time this surfaces
    #[error("session expirée, veuillez vous reconnecter")]
    Unauthorized,
    /// 403
    #[error("accès refusé")]
    Forbidden,
    /// 404 - list endpoints treat this as an empty result instead
    #[error("aucune donnée trouvée")]
    NotFound,
    #[error("le serveur a répondu {0}")]
    Status(u16),
    #[error("erreur réseau : {0}")]
    Network(String),
    #[error("réponse illisible du serveur")]
    Decode,
}

pub type ApiResult<T> = Result<T, ApiError>;
