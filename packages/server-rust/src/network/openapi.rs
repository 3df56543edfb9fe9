//! `OpenAPI` document for the client REST API.

use clientrisk_core::{Client, ClientDto, RiskProfile};
use utoipa::OpenApi;

use super::handlers::clients;

/// Path of the generated `OpenAPI` JSON document.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";
/// Mount point of the Swagger UI.
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

#[derive(OpenApi)]
#[openapi(
    info(title = "ClientRisk API", description = "Client risk profile management"),
    paths(
        clients::list_clients,
        clients::merge_clients,
        clients::get_client,
        clients::create_client,
        clients::update_client,
        clients::delete_client,
    ),
    components(schemas(Client, ClientDto, RiskProfile)),
    tags((name = "clients", description = "Client records and risk profile merge"))
)]
pub struct ApiDoc;
