// floor-client/tests/backend_roundtrip.rs
// Round trips against an in-process mock backend

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use chrono::NaiveDate;
use floor_client::{ClientConfig, ClientError, HttpClient};
use floor_engine::{Canvas, FloorError, FloorPlan, FloorService, LayoutConfig, Point, PointerEvent};
use shared::{
    AvailabilityQuery, AvailabilityResponse, MealSuggestion, TableInfo, TableLayoutUpdate,
    TableRecommendation, Zone,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct MockBackend {
    tables: Arc<Mutex<Vec<TableInfo>>>,
    last_query: Arc<Mutex<HashMap<String, String>>>,
    availability_calls: Arc<AtomicUsize>,
    reject_layout: Arc<AtomicBool>,
}

fn table(id: &str, seats: i32, zone: Zone, x: i32, y: i32) -> TableInfo {
    TableInfo {
        id: id.to_string(),
        seats,
        zone,
        x,
        y,
        privacy: false,
        window: true,
        accessibility: false,
        kids_area: false,
    }
}

impl MockBackend {
    fn seeded() -> Self {
        let backend = Self::default();
        *backend.tables.lock().unwrap() = vec![
            table("T1", 2, Zone::Indoor, 80, 90),
            table("T2", 2, Zone::Indoor, 80, 90),
            table("T3", 4, Zone::Terrace, 330, 240),
        ];
        backend
    }
}

async fn availability(
    State(backend): State<MockBackend>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<AvailabilityResponse> {
    backend.availability_calls.fetch_add(1, Ordering::SeqCst);
    *backend.last_query.lock().unwrap() = params;

    let tables = backend.tables.lock().unwrap().clone();
    let mut items: Vec<TableRecommendation> = tables
        .into_iter()
        .map(|table| TableRecommendation {
            occupied: table.id == "T3",
            recommended: table.id == "T1",
            score: 10.0,
            reason: "Sobib seltskonnale".into(),
            merged: false,
            merged_table_ids: Vec::new(),
            table,
        })
        .collect();
    items.push(TableRecommendation {
        table: table("T1+T2", 4, Zone::Indoor, 140, 90),
        occupied: false,
        recommended: false,
        score: 18.0,
        reason: "Kombineeritud lauad: T1 + T2".into(),
        merged: true,
        merged_table_ids: vec!["T1".into(), "T2".into()],
    });

    Json(AvailabilityResponse {
        tables: items,
        algorithm_info: "Skoor = sobivus seltskonna suurusega".into(),
        meal_suggestion: Some(MealSuggestion {
            name: "Koka üllatusroog".into(),
            category: "Majasoovitus".into(),
            thumbnail: String::new(),
            source_url: "https://www.themealdb.com".into(),
            fallback: true,
        }),
    })
}

async fn get_layout(State(backend): State<MockBackend>) -> Json<Vec<TableInfo>> {
    Json(backend.tables.lock().unwrap().clone())
}

async fn put_layout(
    State(backend): State<MockBackend>,
    Json(updates): Json<Vec<TableLayoutUpdate>>,
) -> Result<Json<Vec<TableInfo>>, (StatusCode, String)> {
    if backend.reject_layout.load(Ordering::SeqCst) {
        return Err((StatusCode::SERVICE_UNAVAILABLE, "layout store offline".into()));
    }
    let mut tables = backend.tables.lock().unwrap();
    for update in updates {
        if let Some(t) = tables.iter_mut().find(|t| t.id == update.id) {
            t.x = update.x;
            t.y = update.y;
        }
    }
    Ok(Json(tables.clone()))
}

async fn spawn(backend: MockBackend) -> String {
    let app = Router::new()
        .route("/api/availability", get(availability))
        .route("/api/admin/layout", get(get_layout).put(put_layout))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn query() -> AvailabilityQuery {
    let at = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(18, 30, 0).unwrap();
    let mut query = AvailabilityQuery::at(at).with_party_size(3).with_zone(Zone::Indoor);
    query.kids_area = true;
    query
}

fn client(base_url: &str) -> HttpClient {
    ClientConfig::new(base_url).with_timeout(5).build_http_client().unwrap()
}

#[tokio::test]
async fn test_availability_sends_query_params() {
    let backend = MockBackend::seeded();
    let client = client(&spawn(backend.clone()).await);

    let response = client.availability(&query()).await.unwrap();
    assert_eq!(response.tables.len(), 4);
    assert!(response.meal_suggestion.unwrap().fallback);

    let params = backend.last_query.lock().unwrap().clone();
    assert_eq!(params["dateTime"], "2025-06-01T18:30:00");
    assert_eq!(params["partySize"], "3");
    assert_eq!(params["zone"], "INDOOR");
    assert_eq!(params["kidsArea"], "true");
    assert_eq!(params["privacy"], "false");
}

#[tokio::test]
async fn test_invalid_query_never_reaches_backend() {
    let backend = MockBackend::seeded();
    let client = client(&spawn(backend.clone()).await);

    let err = client.availability(&query().with_party_size(0)).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(backend.availability_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_layout_update_round_trip() {
    let backend = MockBackend::seeded();
    let client = client(&spawn(backend).await);

    let stored = client
        .update_layout(&[TableLayoutUpdate { id: "T3".into(), x: 500, y: 300 }])
        .await
        .unwrap();
    assert!(stored.iter().any(|t| t.id == "T3" && (t.x, t.y) == (500, 300)));

    let layout = client.layout().await.unwrap();
    assert_eq!(layout, stored);
}

#[tokio::test]
async fn test_rejected_layout_maps_to_server_error() {
    let backend = MockBackend::seeded();
    backend.reject_layout.store(true, Ordering::SeqCst);
    let client = client(&spawn(backend).await);

    let err = client
        .update_layout(&[TableLayoutUpdate { id: "T1".into(), x: 0, y: 40 }])
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Server { status: 503, .. }));
}

#[tokio::test]
async fn test_fetch_layout_through_service() {
    let backend = MockBackend::seeded();
    let client = client(&spawn(backend).await);

    let tables = client.fetch_layout().await.unwrap();
    let ids: Vec<_> = tables.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["T1", "T2", "T3"]);
    assert_eq!(tables[2].zone, Zone::Terrace);
}

#[tokio::test]
async fn test_fetch_layout_unreachable_is_fetch_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}")).fetch_layout().await.unwrap_err();
    assert!(matches!(err, FloorError::Fetch(_)));
}

#[tokio::test]
async fn test_unreachable_backend_is_fetch_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut plan = FloorPlan::new(
        client(&format!("http://{addr}")),
        LayoutConfig::default(),
        Canvas::new(760.0, 520.0),
        query(),
    );
    let err = plan.refresh().await.unwrap_err();
    assert!(matches!(err, FloorError::Fetch(_)));
    assert!(plan.status().unwrap().is_error());
    assert!(plan.cards().is_empty());
}

#[tokio::test]
async fn test_drag_and_save_through_http() {
    let backend = MockBackend::seeded();
    let mut plan = FloorPlan::new(
        client(&spawn(backend.clone()).await),
        LayoutConfig::default(),
        Canvas::new(760.0, 520.0),
        query(),
    );

    plan.set_admin_mode(true).await.unwrap();
    assert_eq!(plan.cards().len(), 4);
    assert_eq!(plan.algorithm_info(), "Skoor = sobivus seltskonna suurusega");
    assert!(!plan.card("T1+T2").unwrap().is_draggable());

    // identical suggestions were separated
    let t1 = plan.card("T1").unwrap().position();
    let t2 = plan.card("T2").unwrap().position();
    assert!(!floor_engine::overlaps(t1, t2, 132.0, 96.0, 16.0));

    plan.on_pointer_down("T1", &PointerEvent::primary(9, t1.x + 5.0, t1.y + 5.0));
    plan.on_pointer_move(&PointerEvent::primary(9, 505.0, 345.0));
    plan.on_pointer_up(&PointerEvent::primary(9, 505.0, 345.0));
    assert_eq!(plan.card("T1").unwrap().position(), Point::new(500.0, 340.0));

    let calls = backend.availability_calls.load(Ordering::SeqCst);
    plan.save_layout().await.unwrap();
    assert_eq!(backend.availability_calls.load(Ordering::SeqCst), calls + 1);

    let stored = backend.tables.lock().unwrap().clone();
    let t1 = stored.iter().find(|t| t.id == "T1").unwrap();
    assert_eq!((t1.x, t1.y), (500, 340));
    assert_eq!(plan.card("T1").unwrap().position(), Point::new(500.0, 340.0));
}

#[tokio::test]
async fn test_rejected_save_keeps_plan() {
    let backend = MockBackend::seeded();
    let mut plan = FloorPlan::new(
        client(&spawn(backend.clone()).await),
        LayoutConfig::default(),
        Canvas::new(760.0, 520.0),
        query(),
    );
    plan.set_admin_mode(true).await.unwrap();
    backend.reject_layout.store(true, Ordering::SeqCst);

    let before = plan.snapshot_positions();
    let calls = backend.availability_calls.load(Ordering::SeqCst);
    let err = plan.save_layout().await.unwrap_err();

    assert!(matches!(err, FloorError::Persist(_)));
    assert_eq!(plan.snapshot_positions(), before);
    assert!(plan.status().unwrap().is_error());
    assert_eq!(backend.availability_calls.load(Ordering::SeqCst), calls);
}
