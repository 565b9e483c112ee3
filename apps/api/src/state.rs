use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Pagination runs are independent: each request builds its own engine, surface and
/// orchestrator from `config.pagination`.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}
