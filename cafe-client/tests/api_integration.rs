// cafe-client/tests/api_integration.rs
// Client against an in-process mock backend

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use cafe_client::error::GENERIC_USER_MESSAGE;
use cafe_client::{
    ApiResponse, AppContext, AppError, AuthFlow, ClientConfig, ClientError, ErrorCode, HttpClient,
    HttpViewReporter, KeyValueStore, MemoryStore, ViewEvent, ViewReporter,
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use shared::catalog::{CatalogQuery, SortKey, SortOrder};
use shared::models::{Actor, Category, MemberLogin, MemberSignup};
use shared::query::ProductListQuery;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

type HandlerError = (StatusCode, Json<Value>);

#[derive(Clone, Default)]
struct Backend {
    views: Arc<Mutex<HashMap<String, u64>>>,
    tracked: Arc<Mutex<Vec<Value>>>,
    tokens_seen: Arc<Mutex<Vec<String>>>,
}

fn catalog() -> Vec<Value> {
    vec![
        json!({"_id": "p1", "productName": "Latte", "productDesc": "Milky coffee",
               "productPrice": 4.5, "productCollection": "coffee", "productViews": 10,
               "createdAt": 100}),
        json!({"_id": "p2", "productName": "Cheesecake", "productDesc": "Baked",
               "productPrice": "6.25", "productCollection": "dessert", "productViews": 3,
               "createdAt": 200}),
        json!({"_id": "p3", "productName": "Caesar", "productDesc": "Green salad",
               "productPrice": 9.99, "productCollection": "salad", "createdAt": 300}),
        // No name: dropped by the client
        json!({"_id": "p4", "productPrice": 1.0}),
        json!({"_id": "p5", "productName": "Espresso", "productDesc": "Short",
               "productPrice": 2.75, "productCollection": "coffee", "inStock": false,
               "createdAt": 400}),
    ]
}

fn envelope(data: Value) -> Json<Value> {
    Json(json!(ApiResponse::success(data)))
}

fn failure(err: AppError) -> HandlerError {
    (err.http_status(), Json(json!(ApiResponse::<()>::error(&err))))
}

fn member_json(phone: &str, nick: &str) -> Value {
    json!({"_id": "m1", "memberNick": nick, "memberPhone": phone, "memberPoints": 5})
}

async fn list_products(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let page: usize = params.get("page").and_then(|v| v.parse().ok()).unwrap_or(1);
    let limit: usize = params.get("limit").and_then(|v| v.parse().ok()).unwrap_or(100);
    let all = catalog();
    let total = all.len();
    let items: Vec<Value> = all.into_iter().skip((page - 1) * limit).take(limit).collect();
    envelope(json!({
        "data": items,
        "total": total,
        "page": page,
        "limit": limit,
        "total_pages": total.div_ceil(limit),
    }))
}

async fn get_product(Path(id): Path<String>) -> Result<Json<Value>, HandlerError> {
    catalog()
        .into_iter()
        .find(|p| p["_id"] == id.as_str())
        .map(envelope)
        .ok_or_else(|| failure(AppError::new(ErrorCode::ProductNotFound)))
}

async fn increment_view(
    State(backend): State<Backend>,
    Path(id): Path<String>,
) -> Json<Value> {
    let mut views = backend.views.lock().unwrap();
    let count = views.entry(id).or_insert(0);
    *count += 1;
    envelope(json!({"views": *count}))
}

async fn view_counter_gone(Path(_id): Path<String>) -> HandlerError {
    failure(AppError::not_found("View counter"))
}

async fn track(State(backend): State<Backend>, Json(body): Json<Value>) -> Json<Value> {
    backend.tracked.lock().unwrap().push(body);
    Json(json!(ApiResponse::<()>::success(())))
}

async fn signup(Json(body): Json<Value>) -> Result<Json<Value>, HandlerError> {
    let phone = body["phone"].as_str().unwrap_or_default();
    if phone == "0100000000" {
        return Err(failure(AppError::with_message(
            ErrorCode::MemberPhoneExists,
            "Phone number already registered",
        )));
    }
    let nick = body["nickname"].as_str().unwrap_or_default();
    Ok(envelope(json!({"member": member_json(phone, nick), "accessToken": "tok-1"})))
}

async fn login(Json(body): Json<Value>) -> Result<Json<Value>, HandlerError> {
    let phone = body["phone"].as_str().unwrap_or_default();
    if body["password"] != "secret1" {
        return Err(failure(AppError::invalid_credentials()));
    }
    Ok(envelope(json!({"member": member_json(phone, "ana"), "token": "tok-2"})))
}

async fn logout(
    State(backend): State<Backend>,
    headers: axum::http::HeaderMap,
) -> Json<Value> {
    if let Some(auth) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        backend.tokens_seen.lock().unwrap().push(auth.to_string());
    }
    Json(json!(ApiResponse::<()>::success(())))
}

/// How the mock answers `POST /product/{id}/view`
#[derive(Clone, Copy)]
enum ViewEndpoint {
    Counting,
    Missing,
    NotFoundEnvelope,
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn spawn_backend(backend: Backend, view_endpoint: ViewEndpoint) -> String {
    let app = Router::new()
        .route("/product/all", get(list_products))
        .route("/product/{id}", get(get_product))
        .route("/activity/track", post(track))
        .route("/member/signup", post(signup))
        .route("/member/login", post(login))
        .route("/member/logout", post(logout));
    let app = match view_endpoint {
        ViewEndpoint::Counting => app.route("/product/{id}/view", post(increment_view)),
        ViewEndpoint::NotFoundEnvelope => {
            app.route("/product/{id}/view", post(view_counter_gone))
        }
        ViewEndpoint::Missing => app,
    };
    serve(app.with_state(backend)).await
}

async fn client(backend: Backend, view_endpoint: ViewEndpoint) -> HttpClient {
    let url = spawn_backend(backend, view_endpoint).await;
    ClientConfig::new(url).with_timeout(5).build_http_client().unwrap()
}

fn context() -> AppContext {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    AppContext::load(store)
}

#[tokio::test]
async fn test_fetch_catalog_walks_pages_and_drops_invalid() {
    let http = client(Backend::default(), ViewEndpoint::Counting).await;

    let products = http.fetch_catalog(&ProductListQuery::new(1, 2)).await.unwrap();
    let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2", "p3", "p5"]);

    let latte = &products[0];
    assert_eq!(latte.price, Decimal::new(450, 2));
    assert_eq!(latte.category, Category::Drinks);
    assert_eq!(latte.views, 10);
    assert_eq!(products[1].price, Decimal::new(625, 2));
    assert!(!products[3].in_stock);
}

#[tokio::test]
async fn test_catalog_query_over_fetched_products() {
    let http = client(Backend::default(), ViewEndpoint::Counting).await;
    let products = http.fetch_catalog(&ProductListQuery::default()).await.unwrap();

    let page = CatalogQuery::default()
        .with_category(Category::Drinks)
        .with_sort(SortKey::Price, SortOrder::Ascending)
        .apply(&products);
    let names: Vec<&str> = page.items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Espresso", "Latte"]);

    let search = CatalogQuery::default().with_search("COFFEE").apply(&products);
    assert_eq!(search.total, 1);
}

#[tokio::test]
async fn test_configured_page_size_pages_the_menu() {
    let url = spawn_backend(Backend::default(), ViewEndpoint::Counting).await;
    let config = ClientConfig::new(url).with_timeout(5).with_page_size(3);
    let http = config.build_http_client().unwrap();
    let products = http.fetch_catalog(&ProductListQuery::default()).await.unwrap();

    let first = config.catalog_query().apply(&products);
    assert_eq!(first.page_size, 3);
    assert_eq!(first.items.len(), 3);
    assert_eq!(first.total_pages, 2);
    assert!(first.has_next());

    let last = config.catalog_query().with_page(2).apply(&products);
    assert_eq!(last.items.len(), 1);
}

#[tokio::test]
async fn test_undecodable_success_body_is_a_serialization_error() {
    let app = Router::new().route("/product/{id}", get(|| async { "<html>maintenance</html>" }));
    let url = serve(app).await;
    let http = ClientConfig::new(url).with_timeout(5).build_http_client().unwrap();

    let err = http.get_product("p1").await.unwrap_err();
    assert!(matches!(err, ClientError::Serialization(_)), "got {err:?}");
    assert_eq!(err.user_message(), GENERIC_USER_MESSAGE);
}

#[tokio::test]
async fn test_get_product_and_missing_product() {
    let http = client(Backend::default(), ViewEndpoint::Counting).await;

    let product = http.get_product("p3").await.unwrap();
    assert_eq!(product.name, "Caesar");

    let err = http.get_product("nope").await.unwrap_err();
    match &err {
        ClientError::App(e) => assert!(matches!(e.code, ErrorCode::ProductNotFound)),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.user_message(), "Product not found");
}

#[tokio::test]
async fn test_signup_signs_in_and_persists() {
    let backend = Backend::default();
    let mut auth = AuthFlow::new(client(backend.clone(), ViewEndpoint::Counting).await);
    let mut ctx = context();

    let form = MemberSignup::new("  ana ", "010-1234", "secret1");
    let member = auth.signup(&mut ctx, &form).await.unwrap();

    assert_eq!(member.nickname, "ana");
    assert_eq!(member.points, 5);
    assert!(ctx.is_authenticated());
    assert_eq!(ctx.token(), Some("tok-1"));
    assert_eq!(auth.http().token(), Some("tok-1"));
    assert_eq!(ctx.actor(), Actor::Member("m1".into()));

    auth.logout(&mut ctx).await;
    assert!(!ctx.is_authenticated());
    assert_eq!(
        backend.tokens_seen.lock().unwrap().as_slice(),
        &["Bearer tok-1".to_string()]
    );
}

#[tokio::test]
async fn test_signup_conflict_surfaces_backend_message() {
    let mut auth = AuthFlow::new(client(Backend::default(), ViewEndpoint::Counting).await);
    let mut ctx = context();

    let form = MemberSignup::new("ana", "0100000000", "secret1");
    let err = auth.signup(&mut ctx, &form).await.unwrap_err();

    assert!(!err.is_validation());
    assert_eq!(err.user_message(), "Phone number already registered");
    assert!(!ctx.is_authenticated());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let mut auth = AuthFlow::new(client(Backend::default(), ViewEndpoint::Counting).await);
    let mut ctx = context();

    let err = auth
        .login(&mut ctx, &MemberLogin::new("010", "wrong-pass"))
        .await
        .unwrap_err();
    match err {
        ClientError::App(e) => assert!(matches!(e.code, ErrorCode::InvalidCredentials)),
        other => panic!("unexpected error: {other:?}"),
    }

    let member = auth
        .login(&mut ctx, &MemberLogin::new("010", "secret1"))
        .await
        .unwrap();
    assert_eq!(member.id, "m1");
    assert_eq!(ctx.token(), Some("tok-2"));
}

#[tokio::test]
async fn test_reporter_increments_and_tracks() {
    let backend = Backend::default();
    let reporter = HttpViewReporter::new(client(backend.clone(), ViewEndpoint::Counting).await);

    let event = ViewEvent {
        product_id: "p1".into(),
        session_id: cafe_client::SessionId::generate(),
        actor: Actor::Member("m1".into()),
        views: 11,
    };
    reporter.report(&event).await.unwrap();

    assert_eq!(backend.views.lock().unwrap().get("p1"), Some(&1));
    let tracked = backend.tracked.lock().unwrap();
    assert_eq!(tracked.len(), 1);
    assert_eq!(tracked[0]["type"], "view");
    assert_eq!(tracked[0]["product_id"], "p1");
    assert_eq!(tracked[0]["member_id"], "m1");
}

#[tokio::test]
async fn test_reporter_tolerates_missing_view_endpoint() {
    let backend = Backend::default();
    let reporter = HttpViewReporter::new(client(backend.clone(), ViewEndpoint::Missing).await);

    let event = ViewEvent {
        product_id: "p2".into(),
        session_id: cafe_client::SessionId::generate(),
        actor: Actor::Anonymous,
        views: 4,
    };
    reporter.report(&event).await.unwrap();

    let tracked = backend.tracked.lock().unwrap();
    assert_eq!(tracked.len(), 1);
    assert_eq!(tracked[0]["member_id"], "anonymous");
}

#[tokio::test]
async fn test_reporter_tolerates_view_counter_not_found_envelope() {
    let backend = Backend::default();
    let http = client(backend.clone(), ViewEndpoint::NotFoundEnvelope).await;
    let reporter = HttpViewReporter::new(http);

    let event = ViewEvent {
        product_id: "p3".into(),
        session_id: cafe_client::SessionId::generate(),
        actor: Actor::Anonymous,
        views: 1,
    };
    reporter.report(&event).await.unwrap();

    let tracked = backend.tracked.lock().unwrap();
    assert_eq!(tracked.len(), 1);
    assert_eq!(tracked[0]["product_id"], "p3");
}

#[tokio::test]
async fn test_detail_view_counts_once_per_session() {
    let backend = Backend::default();
    let http = client(backend.clone(), ViewEndpoint::Counting).await;
    let ctx = context().with_reporter(Arc::new(HttpViewReporter::new(http.clone())));

    let product = http.get_product("p1").await.unwrap();
    let counter = ctx.view_counter();
    let first = counter.record_view(&product.id, product.views);
    let second = counter.record_view(&product.id, product.views);

    assert!(first.counted);
    assert_eq!(first.views, 11);
    assert!(!second.counted);
    assert_eq!(second.views, 11);

    // Reporting runs in the background
    for _ in 0..50 {
        if !backend.tracked.lock().unwrap().is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(backend.tracked.lock().unwrap().len(), 1);
    assert_eq!(backend.views.lock().unwrap().get("p1"), Some(&1));
}
