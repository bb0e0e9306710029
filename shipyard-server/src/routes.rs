//! HTTP handlers for Shipyard server.

use actix_web::error::InternalError;
use actix_web::{HttpRequest, HttpResponse, Responder, delete, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shipyard_core::{
    PageRequest, Ship, ShipFilter, ShipOrder, ShipPatch, ShipService, ShipType, ShipyardError,
    parse_id,
};
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::openapi::ApiDoc;
use crate::repository::Storage;

#[derive(Clone)]
/// Shared application state for handlers.
pub struct AppState {
    /// Ship catalog over the configured storage.
    pub ships: ShipService<Storage>,
}

/// Error response payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub message: String,
}

/// Query parameters accepted by the list and count endpoints.
///
/// `order`, `pageNumber` and `pageSize` only affect listing.
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ShipQuery {
    /// Substring of the ship name.
    pub name: Option<String>,
    /// Substring of the planet.
    pub planet: Option<String>,
    /// Exact ship type.
    pub ship_type: Option<ShipType>,
    /// Earliest production date, epoch milliseconds.
    pub after: Option<i64>,
    /// Latest production date, epoch milliseconds.
    pub before: Option<i64>,
    /// Used flag.
    pub is_used: Option<bool>,
    /// Minimum speed.
    pub min_speed: Option<f64>,
    /// Maximum speed.
    pub max_speed: Option<f64>,
    /// Minimum crew size.
    pub min_crew_size: Option<i32>,
    /// Maximum crew size.
    pub max_crew_size: Option<i32>,
    /// Minimum rating.
    pub min_rating: Option<f64>,
    /// Maximum rating.
    pub max_rating: Option<f64>,
    /// Sort key.
    pub order: Option<ShipOrder>,
    /// Zero-based page index.
    pub page_number: Option<usize>,
    /// Page size.
    pub page_size: Option<usize>,
}

impl ShipQuery {
    /// Convert the filter parameters into core criteria.
    pub fn filter(&self) -> Result<ShipFilter, ShipyardError> {
        Ok(ShipFilter {
            name: self.name.clone(),
            planet: self.planet.clone(),
            ship_type: self.ship_type,
            after: self.after.map(|millis| instant("after", millis)).transpose()?,
            before: self.before.map(|millis| instant("before", millis)).transpose()?,
            is_used: self.is_used,
            min_speed: self.min_speed,
            max_speed: self.max_speed,
            min_crew_size: self.min_crew_size,
            max_crew_size: self.max_crew_size,
            min_rating: self.min_rating,
            max_rating: self.max_rating,
        })
    }

    /// Page selection for listing.
    pub fn page(&self) -> PageRequest {
        PageRequest {
            page_number: self.page_number,
            page_size: self.page_size,
        }
    }
}

fn instant(param: &str, millis: i64) -> Result<DateTime<Utc>, ShipyardError> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| ShipyardError::invalid(format!("{param} is out of range: {millis}")))
}

fn error_response(err: &ShipyardError) -> HttpResponse {
    let body = ErrorResponse {
        message: err.to_string(),
    };
    match err {
        ShipyardError::InvalidArgument(_) => HttpResponse::BadRequest().json(body),
        ShipyardError::NotFound(_) => HttpResponse::NotFound().json(body),
        ShipyardError::Storage(_) => {
            log::error!("{err}");
            HttpResponse::InternalServerError().json(body)
        }
    }
}

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse { message })
}

/// JSON body settings that report parse failures as [`ErrorResponse`].
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        let response = bad_request(err.to_string());
        InternalError::from_response(err, response).into()
    })
}

/// Query string settings that report parse failures as [`ErrorResponse`].
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req: &HttpRequest| {
        let response = bad_request(err.to_string());
        InternalError::from_response(err, response).into()
    })
}

/// Run a catalog operation on the blocking pool.
async fn run_service<T, F>(state: &web::Data<AppState>, job: F) -> Result<T, HttpResponse>
where
    F: FnOnce(&ShipService<Storage>) -> shipyard_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let service = state.ships.clone();
    match web::block(move || job(&service)).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(error_response(&err)),
        Err(err) => Err(HttpResponse::InternalServerError().json(ErrorResponse {
            message: format!("ship task failed: {err}"),
        })),
    }
}

fn ok_json<T: Serialize>(result: Result<T, HttpResponse>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(response) => response,
    }
}

/// Register every ship route on an app or scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(count_ships)
        .service(list_ships)
        .service(create_ship)
        .service(openapi_json)
        .service(get_ship)
        .service(update_ship)
        .service(delete_ship);
}

#[utoipa::path(
    get,
    path = "/rest/ships",
    params(ShipQuery),
    responses(
        (status = 200, description = "Filtered, sorted page of ships", body = [Ship]),
        (status = 400, description = "Malformed query", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[get("/rest/ships")]
/// List ships matching the filter, sorted and paged.
pub async fn list_ships(
    state: web::Data<AppState>,
    query: web::Query<ShipQuery>,
) -> impl Responder {
    let query = query.into_inner();
    let result = run_service(&state, move |ships| {
        let filter = query.filter()?;
        ships.list(&filter, query.order, &query.page())
    })
    .await;
    ok_json(result)
}

#[utoipa::path(
    get,
    path = "/rest/ships/count",
    params(ShipQuery),
    responses(
        (status = 200, description = "Number of matching ships", body = u64),
        (status = 400, description = "Malformed query", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[get("/rest/ships/count")]
/// Count ships matching the filter.
pub async fn count_ships(
    state: web::Data<AppState>,
    query: web::Query<ShipQuery>,
) -> impl Responder {
    let query = query.into_inner();
    let result = run_service(&state, move |ships| ships.count(&query.filter()?)).await;
    ok_json(result)
}

#[utoipa::path(
    post,
    path = "/rest/ships",
    request_body = ShipPatch,
    responses(
        (status = 200, description = "Created ship", body = Ship),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[post("/rest/ships")]
/// Create a ship.
pub async fn create_ship(
    state: web::Data<AppState>,
    payload: web::Json<ShipPatch>,
) -> impl Responder {
    let patch = payload.into_inner();
    ok_json(run_service(&state, move |ships| ships.create(patch)).await)
}

#[utoipa::path(
    get,
    path = "/rest/ships/{id}",
    params(
        ("id" = i64, Path, description = "Ship identifier")
    ),
    responses(
        (status = 200, description = "Ship", body = Ship),
        (status = 400, description = "Invalid identifier", body = ErrorResponse),
        (status = 404, description = "Unknown ship", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[get("/rest/ships/{id}")]
/// Fetch one ship.
pub async fn get_ship(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = match parse_id(&path) {
        Ok(id) => id,
        Err(err) => return error_response(&err),
    };
    ok_json(run_service(&state, move |ships| ships.get(id)).await)
}

#[utoipa::path(
    post,
    path = "/rest/ships/{id}",
    params(
        ("id" = i64, Path, description = "Ship identifier")
    ),
    request_body = ShipPatch,
    responses(
        (status = 200, description = "Updated ship", body = Ship),
        (status = 400, description = "Invalid identifier or field", body = ErrorResponse),
        (status = 404, description = "Unknown ship", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[post("/rest/ships/{id}")]
/// Apply a partial update to a ship.
pub async fn update_ship(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<ShipPatch>,
) -> impl Responder {
    let id = match parse_id(&path) {
        Ok(id) => id,
        Err(err) => return error_response(&err),
    };
    let patch = payload.into_inner();
    ok_json(run_service(&state, move |ships| ships.update(id, patch)).await)
}

#[utoipa::path(
    delete,
    path = "/rest/ships/{id}",
    params(
        ("id" = i64, Path, description = "Ship identifier")
    ),
    responses(
        (status = 200, description = "Ship deleted"),
        (status = 400, description = "Invalid identifier", body = ErrorResponse),
        (status = 404, description = "Unknown ship", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[delete("/rest/ships/{id}")]
/// Delete a ship.
pub async fn delete_ship(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = match parse_id(&path) {
        Ok(id) => id,
        Err(err) => return error_response(&err),
    };
    match run_service(&state, move |ships| ships.delete(id)).await {
        Ok(()) => HttpResponse::Ok().finish(),
        Err(response) => response,
    }
}

#[utoipa::path(
    get,
    path = "/rest/openapi.json",
    responses(
        (status = 200, description = "OpenAPI document", body = serde_json::Value)
    ),
    tag = "system"
)]
#[get("/rest/openapi.json")]
/// Serve the OpenAPI document.
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::{AppState, ErrorResponse, configure, json_config, query_config};
    use crate::repository::Storage;
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::json;
    use shipyard_core::{MemoryShipRepository, Ship, ShipService, ShipType, compute_rating};

    fn year(year: i32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap()
    }

    fn ship(name: &str, planet: &str, speed: f64, built: i32, is_used: bool) -> Ship {
        let prod_date = year(built);
        Ship {
            id: None,
            name: name.to_string(),
            planet: planet.to_string(),
            ship_type: ShipType::Military,
            prod_date,
            is_used,
            speed,
            crew_size: 100,
            rating: compute_rating(speed, is_used, &prod_date),
        }
    }

    fn state_with(ships: Vec<Ship>) -> (web::Data<AppState>, MemoryShipRepository) {
        let repository = MemoryShipRepository::seeded(ships).expect("seed");
        let state = web::Data::new(AppState {
            ships: ShipService::new(Storage::Memory(repository.clone())),
        });
        (state, repository)
    }

    fn fleet() -> Vec<Ship> {
        vec![
            ship("Orion", "Earth", 0.9, 3000, false),
            ship("Vega", "Mars", 0.2, 2900, true),
            ship("Lyra", "Earth", 0.5, 3010, false),
            ship("Draco", "Venus", 0.7, 2850, false),
            ship("Cygnus", "Earth", 0.1, 3019, true),
        ]
    }

    fn create_body() -> serde_json::Value {
        json!({
            "name": "Nostromo",
            "planet": "Thedus",
            "shipType": "MERCHANT",
            "prodDate": year(3019).timestamp_millis(),
            "speed": 0.5,
            "crewSize": 7
        })
    }

    #[actix_web::test]
    async fn create_computes_rating_and_assigns_id() {
        let (state, _) = state_with(Vec::new());
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(json_config())
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/rest/ships")
            .set_json(create_body())
            .to_request();
        let created: Ship = test::call_and_read_body_json(&app, req).await;

        assert_eq!(created.id, Some(1));
        assert!(!created.is_used);
        assert_eq!(created.rating, 40.0);
        assert_eq!(created.prod_date, year(3019));
    }

    #[actix_web::test]
    async fn create_with_missing_field_persists_nothing() {
        let (state, repository) = state_with(Vec::new());
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(json_config())
                .configure(configure),
        )
        .await;

        let mut body = create_body();
        body.as_object_mut().expect("object").remove("crewSize");
        let req = test::TestRequest::post()
            .uri("/rest/ships")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let error: ErrorResponse = test::read_body_json(resp).await;
        assert!(error.message.contains("crewSize"));
        assert!(repository.is_empty().expect("len"));
    }

    #[actix_web::test]
    async fn malformed_json_is_a_bad_request() {
        let (state, _) = state_with(Vec::new());
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(json_config())
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/rest/ships")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"name\": ")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let mut body = create_body();
        body["shipType"] = json!("BARGE");
        let req = test::TestRequest::post()
            .uri("/rest/ships")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn update_recomputes_rating_and_rejects_invalid_fields() {
        let (state, repository) = state_with(Vec::new());
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(json_config())
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/rest/ships")
            .set_json(create_body())
            .to_request();
        let created: Ship = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/rest/ships/1")
            .set_json(json!({ "isUsed": true }))
            .to_request();
        let updated: Ship = test::call_and_read_body_json(&app, req).await;
        assert!(updated.is_used);
        assert_eq!(updated.rating, 20.0);
        assert_eq!(updated.name, created.name);

        let req = test::TestRequest::post()
            .uri("/rest/ships/1")
            .set_json(json!({ "name": "Renamed", "crewSize": 0 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let stored = shipyard_core::ShipRepository::find_by_id(&repository, 1)
            .expect("find")
            .expect("present");
        assert_eq!(stored.name, "Nostromo");
        assert_eq!(stored.rating, 20.0);
    }

    #[actix_web::test]
    async fn ids_are_validated_before_lookup() {
        let (state, _) = state_with(fleet());
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        for (uri, status) in [
            ("/rest/ships/abc", StatusCode::BAD_REQUEST),
            ("/rest/ships/0", StatusCode::BAD_REQUEST),
            ("/rest/ships/-3", StatusCode::BAD_REQUEST),
            ("/rest/ships/99", StatusCode::NOT_FOUND),
            ("/rest/ships/2", StatusCode::OK),
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), status, "{uri}");
        }
    }

    #[actix_web::test]
    async fn delete_removes_ship() {
        let (state, repository) = state_with(fleet());
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::delete().uri("/rest/ships/3").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(repository.len().expect("len"), 4);

        let req = test::TestRequest::delete().uri("/rest/ships/3").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get().uri("/rest/ships/3").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn list_filters_sorts_and_pages() {
        let (state, _) = state_with(fleet());
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(query_config())
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/rest/ships").to_request();
        let ships: Vec<Ship> = test::call_and_read_body_json(&app, req).await;
        let ids: Vec<_> = ships.iter().filter_map(|ship| ship.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let req = test::TestRequest::get()
            .uri("/rest/ships?order=SPEED&pageNumber=1&pageSize=3")
            .to_request();
        let ships: Vec<Ship> = test::call_and_read_body_json(&app, req).await;
        let names: Vec<_> = ships.iter().map(|ship| ship.name.as_str()).collect();
        assert_eq!(names, vec!["Draco", "Orion"]);

        let req = test::TestRequest::get()
            .uri("/rest/ships?planet=Ear&isUsed=false&order=DATE")
            .to_request();
        let ships: Vec<Ship> = test::call_and_read_body_json(&app, req).await;
        let names: Vec<_> = ships.iter().map(|ship| ship.name.as_str()).collect();
        assert_eq!(names, vec!["Orion", "Lyra"]);

        let after = year(2900).timestamp_millis();
        let before = year(3010).timestamp_millis();
        let req = test::TestRequest::get()
            .uri(&format!("/rest/ships?after={after}&before={before}&order=ID"))
            .to_request();
        let ships: Vec<Ship> = test::call_and_read_body_json(&app, req).await;
        let names: Vec<_> = ships.iter().map(|ship| ship.name.as_str()).collect();
        assert_eq!(names, vec!["Orion", "Vega", "Lyra"]);

        let req = test::TestRequest::get()
            .uri("/rest/ships?pageNumber=9")
            .to_request();
        let ships: Vec<Ship> = test::call_and_read_body_json(&app, req).await;
        assert!(ships.is_empty());
    }

    #[actix_web::test]
    async fn malformed_query_is_a_bad_request() {
        let (state, _) = state_with(fleet());
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(query_config())
                .configure(configure),
        )
        .await;

        for uri in [
            "/rest/ships?pageNumber=-1",
            "/rest/ships?order=NAME",
            "/rest/ships/count?minSpeed=fast",
            "/rest/ships?after=9223372036854775807",
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        }
    }

    #[actix_web::test]
    async fn count_ignores_paging() {
        let (state, _) = state_with(fleet());
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::get()
            .uri("/rest/ships/count?planet=Earth&pageSize=1")
            .to_request();
        let count: usize = test::call_and_read_body_json(&app, req).await;
        assert_eq!(count, 3);

        let req = test::TestRequest::get()
            .uri("/rest/ships/count?minSpeed=0.5&maxSpeed=0.9")
            .to_request();
        let count: usize = test::call_and_read_body_json(&app, req).await;
        assert_eq!(count, 3);
    }

    #[actix_web::test]
    async fn openapi_document_is_served() {
        let app = test::init_service(App::new().configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/rest/openapi.json")
            .to_request();
        let doc: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert!(doc["paths"]["/rest/ships/{id}"].is_object());
    }
}
