use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{GiftRarity, WinStatus};
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "admin_token",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-Admin-Token"))),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health,
        handlers::gift::list_gifts,
        handlers::roll::record_roll,
        handlers::win::reserve_gift,
        handlers::win::fulfill_win,
        handlers::win::list_wins,
        handlers::admin::add_gift,
        handlers::admin::set_gift_availability,
        handlers::admin::get_stats,
    ),
    components(
        schemas(
            GiftResponse,
            GiftAdminResponse,
            AddGiftRequest,
            SetAvailabilityRequest,
            GiftRarity,
            RollRequest,
            RollResponse,
            RollOutcome,
            StatsResponse,
            ReserveGiftRequest,
            WinResponse,
            WinQuery,
            WinStatus,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Liveness probe"),
        (name = "gifts", description = "Gift catalog API"),
        (name = "rolls", description = "Slot machine roll API"),
        (name = "wins", description = "Win ledger API"),
        (name = "admin", description = "Catalog administration API"),
    ),
    info(
        title = "777 Gift Backend API",
        version = "1.0.0",
        description = "Promotional giveaway backend REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
