//! OpenAPI documentation configuration

use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Events API",
        version = "0.1.0",
        description = "Events catalogue with filtering, proximity search and IBGE location lookup",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/auth", api = crate::api::auth::ApiDoc),
        (path = "/api/events", api = domain_events::ApiDoc),
        (path = "/api/location", api = domain_locations::ApiDoc)
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "API key exchange"),
        (name = "events", description = "Event catalogue search"),
        (name = "location", description = "IBGE municipality lookup")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        components.add_security_scheme(
            "api_key",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("x-api-key"))),
        );
    }
}
