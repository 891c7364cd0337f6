use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::dto::{self, ValidatedItem};
use crate::app::errors;
use crate::app::services::AppServices;

/// Item routes. The collection path answers with and without a trailing slash.
pub fn router() -> Router {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/", get(list_items).post(create_item))
        .route("/items/:id", get(get_item).put(update_item).delete(delete_item))
}

pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    ValidatedItem(item): ValidatedItem,
) -> axum::response::Response {
    match services.items.create(item) {
        Ok(created) => (StatusCode::OK, Json(created)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn list_items(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    (StatusCode::OK, Json(services.items.list_all())).into_response()
}

pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_item_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.items.get_by_id(id) {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Bytes,
) -> axum::response::Response {
    let (id, item) = match dto::parse_item_update(&id, &body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.items.update(id, item) {
        Ok(updated) => (StatusCode::OK, Json(updated)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_item_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.items.delete(id) {
        Ok(()) => (StatusCode::OK, Json(dto::ITEM_DELETED)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use itemstore_core::{Item, ItemId};
    use itemstore_infra::{InMemoryItemStore, ItemStore};

    use crate::app::{build_app, build_app_with_store};

    async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();

        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn create_returns_200_with_item_echoed() {
        let app = build_app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/items/",
            Some(r#"{"id":1,"name":"Laptop","price":1500.99}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"id": 1, "name": "Laptop", "price": 1500.99, "description": null})
        );
    }

    #[tokio::test]
    async fn duplicate_create_is_400() {
        let app = build_app();
        let payload = r#"{"id":1,"name":"Laptop","price":1500.99}"#;
        send(&app, Method::POST, "/items/", Some(payload)).await;
        let (status, body) = send(&app, Method::POST, "/items/", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "duplicate_key");
        assert_eq!(body["message"], "Item with this ID already exists");
    }

    #[tokio::test]
    async fn invalid_payload_is_422_with_field_report() {
        let store = Arc::new(InMemoryItemStore::new());
        let app = build_app_with_store(store.clone());

        let (status, body) =
            send(&app, Method::POST, "/items/", Some(r#"{"id":"x","price":1}"#)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "validation_error");
        let detail = body["detail"].as_array().unwrap();
        assert_eq!(detail.len(), 2);
        assert_eq!(detail[0]["loc"], json!(["body", "id"]));
        assert_eq!(detail[0]["type"], "int_parsing");
        assert_eq!(detail[1]["loc"], json!(["body", "name"]));
        assert_eq!(detail[1]["type"], "missing");
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn malformed_json_is_422() {
        let app = build_app();
        let (status, body) = send(&app, Method::POST, "/items/", Some("{not json")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["type"], "json_invalid");
        assert_eq!(body["detail"][0]["msg"], "JSON decode error");
        assert!(body["detail"][0]["ctx"].is_string());
    }

    #[tokio::test]
    async fn non_integer_path_id_is_422() {
        let app = build_app();
        let (status, body) = send(&app, Method::GET, "/items/abc", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["loc"], json!(["path", "item_id"]));
    }

    #[tokio::test]
    async fn missing_item_is_404_for_get_put_delete() {
        let app = build_app();
        let payload = r#"{"id":9,"name":"Ghost","price":0}"#;
        for (method, body) in [
            (Method::GET, None),
            (Method::PUT, Some(payload)),
            (Method::DELETE, None),
        ] {
            let (status, json) = send(&app, method, "/items/9", body).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(json["message"], "Item not found");
        }
    }

    #[tokio::test]
    async fn collection_path_works_without_trailing_slash() {
        let store = Arc::new(InMemoryItemStore::with_items([Item::new(5, "Cable", 3.5)]));
        let app = build_app_with_store(store);
        let (status, body) = send(&app, Method::GET, "/items", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["id"], 5);
    }

    #[tokio::test]
    async fn update_and_delete_go_through_injected_store() {
        let store = Arc::new(InMemoryItemStore::with_items([Item::new(1, "Laptop", 1500.99)]));
        let app = build_app_with_store(store.clone());

        let (status, body) = send(
            &app,
            Method::PUT,
            "/items/1",
            Some(r#"{"id":1,"name":"Laptop Pro","price":2000.0,"description":"M3"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Laptop Pro");
        assert_eq!(
            store.get_by_id(ItemId::new(1)).unwrap(),
            Item::new(1, "Laptop Pro", 2000.0).with_description("M3")
        );

        let (status, body) = send(&app, Method::DELETE, "/items/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Item deleted successfully"}));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn health_and_unknown_routes() {
        let app = build_app();
        let (status, _) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, Method::GET, "/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn update_reports_path_and_body_errors_together() {
        let app = build_app();
        let (status, body) = send(&app, Method::PUT, "/items/abc", Some(r#"{"name":1}"#)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let locs: Vec<Value> = body["detail"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["loc"].clone())
            .collect();
        assert_eq!(
            locs,
            vec![
                json!(["path", "item_id"]),
                json!(["body", "id"]),
                json!(["body", "name"]),
                json!(["body", "price"]),
            ]
        );
        assert_eq!(body["detail"][0]["type"], "int_parsing");
    }

    #[tokio::test]
    async fn update_rekey_onto_existing_id_is_400() {
        let store = Arc::new(InMemoryItemStore::with_items([
            Item::new(1, "Laptop", 1500.99),
            Item::new(2, "Mouse", 10.0),
        ]));
        let app = build_app_with_store(store.clone());

        let (status, body) = send(
            &app,
            Method::PUT,
            "/items/1",
            Some(r#"{"id":2,"name":"Clash","price":1}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "duplicate_key");
        assert_eq!(store.get_by_id(ItemId::new(1)).unwrap(), Item::new(1, "Laptop", 1500.99));
        assert_eq!(store.get_by_id(ItemId::new(2)).unwrap(), Item::new(2, "Mouse", 10.0));
    }
}
