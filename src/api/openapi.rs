//! OpenAPI document for the admin surface.

use utoipa::OpenApi;

use super::handlers::{connections, system};

/// Generated OpenAPI specification.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "companion-gateway",
        description = "Live notification fan-out for companion chat clients"
    ),
    paths(
        connections::active_connections,
        connections::notify_user,
        system::health_handler,
    ),
    tags(
        (name = "Connections", description = "Live connection registry"),
        (name = "System", description = "Service health"),
    )
)]
pub struct ApiDoc;
