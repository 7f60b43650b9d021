use axum::Router;

/// A feature module that contributes HTTP routes.
///
/// The tasks module implements this trait to register its API endpoints;
/// the server binary collects modules and nests their routes under `/api`.
pub trait Module: Send + Sync {
    /// Module name, used for logging.
    fn name(&self) -> &str;

    /// Return the module's routes, relative to the mount point.
    fn routes(&self) -> Router;
}
