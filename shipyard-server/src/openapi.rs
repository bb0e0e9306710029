//! OpenAPI specification for Shipyard server.

use utoipa::OpenApi;

use shipyard_core::{Ship, ShipOrder, ShipPatch, ShipType};

use crate::routes::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::list_ships,
        crate::routes::count_ships,
        crate::routes::create_ship,
        crate::routes::get_ship,
        crate::routes::update_ship,
        crate::routes::delete_ship,
        crate::routes::openapi_json
    ),
    components(schemas(Ship, ShipPatch, ShipType, ShipOrder, ErrorResponse)),
    tags(
        (name = "ships", description = "Ship catalog"),
        (name = "system", description = "System endpoints")
    )
)]
/// OpenAPI specification for the Shipyard server.
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::ApiDoc;
    use utoipa::OpenApi;

    #[test]
    fn openapi_includes_expected_paths() {
        let doc = ApiDoc::openapi();
        let paths = doc.paths.paths;

        assert!(paths.contains_key("/rest/ships"));
        assert!(paths.contains_key("/rest/ships/count"));
        assert!(paths.contains_key("/rest/ships/{id}"));
        assert!(paths.contains_key("/rest/openapi.json"));
        assert_eq!(paths.len(), 4);
    }

    #[test]
    fn openapi_registers_domain_schemas() {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.expect("components").schemas;

        for name in ["Ship", "ShipPatch", "ShipType", "ShipOrder", "ErrorResponse"] {
            assert!(schemas.contains_key(name), "{name}");
        }
    }
}
