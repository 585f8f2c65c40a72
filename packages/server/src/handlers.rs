//! HTTP handler functions for the field registry API.

use actix_web::{HttpResponse, web};
use fieldmap_field::RegistryError;
use fieldmap_server_models::{ApiField, ApiHealth, ApiPoint, ContainsResponse};

use crate::AppState;

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        fields_loaded: state.registry.is_built(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/fields`
///
/// Lists every field in document order.
pub async fn list_fields(state: web::Data<AppState>) -> HttpResponse {
    match state.registry.list_fields() {
        Ok(records) => {
            let fields: Vec<ApiField> = records.iter().map(ApiField::from).collect();
            HttpResponse::Ok().json(fields)
        }
        Err(e) => registry_unavailable(&e),
    }
}

/// `GET /api/fields/{id}/size`
///
/// Returns the field's area in square metres.
pub async fn field_size(state: web::Data<AppState>, id: web::Path<String>) -> HttpResponse {
    match state.registry.get_size(&id) {
        Ok(Some(size)) => HttpResponse::Ok().json(size),
        Ok(None) => HttpResponse::NotFound().finish(),
        Err(e) => registry_unavailable(&e),
    }
}

/// `POST /api/fields/{id}/distance`
///
/// Returns the distance in metres from the field's center to the point in
/// the body.
pub async fn field_distance(
    state: web::Data<AppState>,
    id: web::Path<String>,
    point: web::Json<ApiPoint>,
) -> HttpResponse {
    match state.registry.get_distance(&id, point.into_inner().into()) {
        Ok(Some(distance)) => HttpResponse::Ok().json(distance),
        Ok(None) => HttpResponse::NotFound().finish(),
        Err(e) => registry_unavailable(&e),
    }
}

/// `POST /api/fields/contains`
///
/// Returns `{ id, name }` of the first field containing the point, or
/// `false`.
pub async fn contains(state: web::Data<AppState>, point: web::Json<ApiPoint>) -> HttpResponse {
    match state.registry.find_containing(point.into_inner().into()) {
        Ok(record) => HttpResponse::Ok().json(ContainsResponse::from(record)),
        Err(e) => registry_unavailable(&e),
    }
}

fn registry_unavailable(e: &RegistryError) -> HttpResponse {
    log::error!("Failed to load fields: {e}");
    HttpResponse::InternalServerError().json(serde_json::json!({
        "error": "Failed to load fields"
    }))
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test, web};
    use fieldmap_field::{FieldRegistry, FieldSources};
    use serde_json::Value;

    use crate::{AppState, configure};

    const FIELDS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2"><Document>
  <Placemark><name>A</name><Polygon><outerBoundaryIs><LinearRing>
    <coordinates>0,0 2,0 2,2 0,2</coordinates>
  </LinearRing></outerBoundaryIs></Polygon></Placemark>
  <Placemark><name>B</name><Polygon><outerBoundaryIs><LinearRing>
    <coordinates>1,1 3,1 3,3 1,3</coordinates>
  </LinearRing></outerBoundaryIs></Polygon></Placemark>
</Document></kml>"#;

    const CENTROIDS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2"><Document>
  <Placemark><name>B</name><Point><coordinates>2,2,0</coordinates></Point></Placemark>
</Document></kml>"#;

    fn registry(dir: &Path, write: bool) -> Arc<FieldRegistry> {
        let sources = FieldSources::new(dir.join("fields.kml"), dir.join("centroids.kml"));
        if write {
            std::fs::write(&sources.fields, FIELDS).unwrap();
            std::fs::write(&sources.centroids, CENTROIDS).unwrap();
        }
        Arc::new(FieldRegistry::new(sources))
    }

    macro_rules! app {
        ($registry:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(AppState {
                        registry: $registry,
                    }))
                    .configure(configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn lists_fields_in_document_order() {
        let dir = tempfile::tempdir().unwrap();
        let app = app!(registry(dir.path(), true));

        let req = test::TestRequest::get().uri("/api/fields").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let fields = body.as_array().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0]["id"], "A");
        assert_eq!(fields[0]["name"], "A");
        assert_eq!(fields[0]["locations"]["center"], serde_json::json!([1.0, 1.0]));
        assert_eq!(fields[1]["locations"]["center"], serde_json::json!([2.0, 2.0]));
        assert_eq!(fields[1]["locations"]["polygon"][0], serde_json::json!([1.0, 1.0]));
    }

    #[actix_web::test]
    async fn size_of_unknown_field_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let app = app!(registry(dir.path(), true));

        let req = test::TestRequest::get().uri("/api/fields/A/size").to_request();
        let size: f64 = test::call_and_read_body_json(&app, req).await;
        assert!(size > 0.0);

        let req = test::TestRequest::get().uri("/api/fields/Z/size").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn distance_from_center() {
        let dir = tempfile::tempdir().unwrap();
        let app = app!(registry(dir.path(), true));

        let req = test::TestRequest::post()
            .uri("/api/fields/B/distance")
            .set_json(serde_json::json!({ "lat": 2.0, "lng": 2.0 }))
            .to_request();
        let distance: f64 = test::call_and_read_body_json(&app, req).await;
        assert!(distance.abs() < 1e-6);

        let req = test::TestRequest::post()
            .uri("/api/fields/Z/distance")
            .set_json(serde_json::json!({ "lat": 2.0, "lng": 2.0 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn contains_returns_first_match_or_false() {
        let dir = tempfile::tempdir().unwrap();
        let app = app!(registry(dir.path(), true));

        let req = test::TestRequest::post()
            .uri("/api/fields/contains")
            .set_json(serde_json::json!({ "lat": 1.5, "lng": 1.5 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, serde_json::json!({ "id": "A", "name": "A" }));

        let req = test::TestRequest::post()
            .uri("/api/fields/contains")
            .set_json(serde_json::json!({ "lat": 50.0, "lng": 50.0 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, Value::Bool(false));
    }

    #[actix_web::test]
    async fn missing_documents_are_a_server_error() {
        let dir = tempfile::tempdir().unwrap();
        let app = app!(registry(dir.path(), false));

        let req = test::TestRequest::get().uri("/api/fields").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["fieldsLoaded"], Value::Bool(false));
    }
}
