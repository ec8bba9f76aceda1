use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde_json::json;
use shared::domain::{
    ContactSort, ContactStatus, NoFilter, OrderId, OrderProgress, OrderStatus, PackageId,
    PackageSort,
};
use tokio::{net::TcpListener, sync::Mutex};

use super::*;

fn package_query() -> ListQuery<PackageSort, NoFilter> {
    ListQuery::default()
}

#[derive(Clone, Default)]
struct Captured {
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    bearers: Arc<Mutex<Vec<Option<String>>>>,
}

impl Captured {
    async fn record(&self, headers: &HeaderMap, query: HashMap<String, String>) {
        self.queries.lock().await.push(query);
        let bearer = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::to_string);
        self.bearers.lock().await.push(bearer);
    }
}

async fn spawn_server(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}")
}

fn transport_for(server_url: &str) -> ApiTransport {
    ApiTransport::new(server_url, SessionContext::new())
}

fn package_meta(page: u32, limit: u32, total: u64) -> serde_json::Value {
    let page_count = (total as u32).div_ceil(limit);
    json!({
        "page": page,
        "limit": limit,
        "total": total,
        "pageCount": page_count,
        "hasNext": page < page_count,
        "hasPrev": page > 1,
    })
}

fn package_json(index: u32) -> serde_json::Value {
    json!({
        "id": format!("pkg_{index}"),
        "name": format!("Paket {index:02}"),
        "price": 1_000_000 * i64::from(index),
        "isActive": true,
        "createdAt": "2025-03-01T00:00:00Z",
        "updatedAt": "2025-03-01T00:00:00Z",
    })
}

fn order_json(status: OrderStatus) -> serde_json::Value {
    json!({
        "id": "ord_1",
        "orderCode": "WO-2025-0001",
        "packageId": "pkg_1",
        "customerName": "Rina",
        "customerEmail": "rina@example.com",
        "customerPhone": "081234567890",
        "eventDate": "2026-06-20T00:00:00Z",
        "venue": "Gedung Serbaguna",
        "status": serde_json::to_value(status).expect("status"),
        "totalPrice": 25_000_000,
        "createdAt": "2025-03-01T00:00:00Z",
        "updatedAt": "2025-03-01T00:00:00Z",
        "package": {"id": "pkg_1", "name": "Paket Gold", "price": 25_000_000},
    })
}

/// Router serving a fixed catalog of 23 packages with real pagination.
fn catalog_router(captured: Captured) -> Router {
    async fn handler(
        State(captured): State<Captured>,
        headers: HeaderMap,
        Query(query): Query<HashMap<String, String>>,
    ) -> impl IntoResponse {
        captured.record(&headers, query.clone()).await;
        let page: u32 = query.get("page").and_then(|v| v.parse().ok()).unwrap_or(1);
        let limit: u32 = query.get("limit").and_then(|v| v.parse().ok()).unwrap_or(10);
        let total: u64 = 23;
        let start = (page - 1) * limit + 1;
        let end = (start + limit - 1).min(total as u32);
        let items: Vec<_> = (start..=end).map(package_json).collect();
        Json(json!({
            "status": "success",
            "meta": package_meta(page, limit, total),
            "data": items,
        }))
    }

    Router::new()
        .route("/packages/admin/all", get(handler))
        .with_state(captured)
}

#[tokio::test]
async fn list_fetch_sends_page_limit_sort_and_omits_empty_search() {
    let captured = Captured::default();
    let server_url = spawn_server(catalog_router(captured.clone())).await;
    let transport = transport_for(&server_url);

    let envelope = transport
        .admin_packages()
        .fetch(&package_query())
        .await
        .expect("fetch");

    assert_eq!(envelope.data.len(), 10);
    assert_eq!(envelope.meta.total, 23);
    assert_eq!(envelope.meta.page_count, 3);

    let queries = captured.queries.lock().await;
    let query = &queries[0];
    assert_eq!(query.get("page").map(String::as_str), Some("1"));
    assert_eq!(query.get("limit").map(String::as_str), Some("10"));
    assert_eq!(query.get("sort").map(String::as_str), Some("az"));
    assert!(!query.contains_key("search"));
    assert!(!query.contains_key("status"));
}

#[tokio::test]
async fn next_page_request_carries_page_two_and_enables_prev() {
    let captured = Captured::default();
    let server_url = spawn_server(catalog_router(captured.clone())).await;
    let transport = transport_for(&server_url);
    let client = transport.admin_packages();

    let mut controller = PackageListController::new("Gagal memuat katalog paket.");
    assert!(controller.load_with(&client).await);
    let meta = *controller.meta().expect("meta");
    assert!(meta.has_next);
    assert!(!meta.has_prev);

    assert!(controller.next());
    assert!(controller.load_with(&client).await);

    let queries = captured.queries.lock().await;
    assert_eq!(queries[1].get("page").map(String::as_str), Some("2"));
    assert!(controller.meta().expect("meta").has_prev);
}

#[tokio::test]
async fn login_attaches_bearer_to_subsequent_requests() {
    async fn login_handler() -> impl IntoResponse {
        Json(json!({
            "status": "success",
            "data": {
                "accessToken": "tok-123",
                "user": {
                    "id": "usr_1",
                    "name": "Admin",
                    "email": "admin@example.com",
                    "role": "ADMIN",
                },
            },
        }))
    }

    let captured = Captured::default();
    let app = catalog_router(captured.clone()).route("/auth/login", post(login_handler));
    let server_url = spawn_server(app).await;
    let transport = transport_for(&server_url);

    let user = transport
        .login("admin@example.com", "rahasia1")
        .await
        .expect("login");
    assert!(user.is_admin());
    assert!(transport.session().is_authenticated());

    transport
        .admin_packages()
        .fetch(&package_query())
        .await
        .expect("fetch");

    let bearers = captured.bearers.lock().await;
    assert_eq!(bearers[0].as_deref(), Some("tok-123"));
}

#[tokio::test]
async fn delete_conflict_surfaces_server_message_verbatim() {
    async fn delete_handler(Path(_id): Path<String>) -> impl IntoResponse {
        (
            StatusCode::CONFLICT,
            Json(json!({"message": "Paket ini masih digunakan."})),
        )
    }

    let app = Router::new().route("/packages/:id", delete(delete_handler));
    let server_url = spawn_server(app).await;
    let transport = transport_for(&server_url);

    let mut bridge = MutationBridge::new();
    assert!(bridge.begin("pkg_1"));
    let result = transport.delete_package(&PackageId::from("pkg_1")).await;
    let outcome = bridge.settle(
        "pkg_1",
        result,
        "Paket berhasil dihapus.",
        "Gagal menghapus paket.",
    );

    assert!(!outcome.reload);
    assert_eq!(outcome.notice.kind, NoticeKind::Error);
    assert_eq!(outcome.notice.message, "Paket ini masih digunakan.");
}

#[tokio::test]
async fn status_update_success_reloads_list_with_new_status() {
    #[derive(Clone)]
    struct OrdersState {
        status: Arc<Mutex<OrderStatus>>,
    }

    async fn list_orders(State(state): State<OrdersState>) -> impl IntoResponse {
        let status = *state.status.lock().await;
        Json(json!({
            "status": "success",
            "meta": package_meta(1, 10, 1),
            "data": [order_json(status)],
        }))
    }

    async fn patch_status(
        State(state): State<OrdersState>,
        Path(_id): Path<String>,
        Json(body): Json<serde_json::Value>,
    ) -> impl IntoResponse {
        let next: OrderStatus =
            serde_json::from_value(body["status"].clone()).expect("status body");
        *state.status.lock().await = next;
        Json(json!({"status": "success", "data": order_json(next)}))
    }

    let state = OrdersState {
        status: Arc::new(Mutex::new(OrderStatus::Pending)),
    };
    let app = Router::new()
        .route("/orders", get(list_orders))
        .route("/orders/:id/status", patch(patch_status))
        .with_state(state);
    let server_url = spawn_server(app).await;
    let transport = transport_for(&server_url);
    let client = transport.orders();

    let mut controller = OrderListController::new("Gagal memuat pesanan.");
    assert!(controller.load_with(&client).await);
    assert_eq!(controller.items()[0].status, OrderStatus::Pending);

    let mut bridge = MutationBridge::new();
    assert!(bridge.begin("ord_1"));
    let result = transport
        .set_order_status(&OrderId::from("ord_1"), OrderStatus::Approved)
        .await;
    let outcome = bridge.settle(
        "ord_1",
        result,
        "Status pesanan diperbarui.",
        "Gagal memperbarui status.",
    );
    assert!(outcome.reload);

    assert!(controller.load_with(&client).await);
    assert_eq!(controller.items()[0].status, OrderStatus::Approved);
}

#[tokio::test]
async fn unauthorized_response_clears_the_session() {
    async fn reject() -> impl IntoResponse {
        (StatusCode::UNAUTHORIZED, Json(json!({"message": "Unauthorized"})))
    }

    let app = Router::new().route("/contacts", get(reject));
    let server_url = spawn_server(app).await;
    let session = SessionContext::new();
    session.login(
        "stale-token",
        serde_json::from_value(json!({
            "id": "usr_1",
            "name": "Admin",
            "email": "admin@example.com",
            "role": "ADMIN",
        }))
        .expect("user"),
    );
    let transport = ApiTransport::new(&server_url, session.clone());
    let mut events = session.subscribe();

    let err = transport
        .contacts()
        .fetch(&ListQuery::<ContactSort, ContactStatus>::default())
        .await
        .expect_err("must fail");

    assert!(matches!(err, ClientError::Server { status: 401, .. }));
    assert!(!session.is_authenticated());
    // Subscribers hear about the forced logout.
    loop {
        match events.try_recv().expect("logout event") {
            SessionEvent::LoggedOut => break,
            SessionEvent::LoggedIn(_) => continue,
        }
    }
}

#[tokio::test]
async fn unreachable_server_maps_to_network_error_and_keeps_rows() {
    // Nothing listens on this port.
    let transport = transport_for("http://127.0.0.1:9");
    let client = transport.admin_packages();

    let mut controller = PackageListController::new("Gagal memuat katalog paket.");
    let err = client.fetch(&package_query()).await.expect_err("down");
    assert!(matches!(err, ClientError::Network(_)));

    controller.load_with(&client).await;
    assert_eq!(controller.phase(), LoadPhase::Errored);
    assert_eq!(controller.error(), Some("Gagal memuat katalog paket."));
}

#[tokio::test]
async fn csv_export_uses_content_disposition_filename() {
    async fn export() -> impl IntoResponse {
        (
            [(
                header::CONTENT_DISPOSITION,
                r#"attachment; filename="laporan-pesanan.csv""#,
            )],
            "orderCode,status\nWO-2025-0001,PENDING\n",
        )
    }

    let app = Router::new().route("/reports/orders/export/csv", get(export));
    let server_url = spawn_server(app).await;
    let transport = transport_for(&server_url);

    let download = transport.export_orders_csv().await.expect("download");
    assert_eq!(download.filename, "laporan-pesanan.csv");
    assert!(download.bytes.starts_with(b"orderCode,status"));
}

#[tokio::test]
async fn order_lookup_by_code_projects_customer_view() {
    async fn check(Query(query): Query<HashMap<String, String>>) -> impl IntoResponse {
        if query.get("code").map(String::as_str) == Some("WO-2025-0001") {
            Json(json!({"status": "success", "data": [order_json(OrderStatus::Approved)]}))
        } else {
            Json(json!({"status": "success", "data": []}))
        }
    }

    let app = Router::new().route("/orders/check", get(check));
    let server_url = spawn_server(app).await;
    let transport = transport_for(&server_url);

    let found = transport
        .check_order_by_code("WO-2025-0001")
        .await
        .expect("lookup");
    let view = found.expect("order exists");
    assert_eq!(view.package_name, "Paket Gold");
    assert_eq!(view.progress, OrderProgress::Dikonfirmasi);

    let missing = transport
        .check_order_by_code("WO-0000-9999")
        .await
        .expect("lookup");
    assert!(missing.is_none());
}
