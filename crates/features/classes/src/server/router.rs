use super::handlers;
use lct_kernel::server::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Class and ability query routes.
///
/// Static segments (`search`, `details`, `roles`) take precedence over `{id}`.
pub fn classes_router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::list_classes))
        .routes(routes!(handlers::search_classes))
        .routes(routes!(handlers::class_details))
        .routes(routes!(handlers::list_roles))
        .routes(routes!(handlers::get_class))
        .routes(routes!(handlers::search_abilities))
        .routes(routes!(handlers::ability_facets))
}
