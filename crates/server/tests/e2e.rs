use std::net::SocketAddr;
use std::sync::Arc;

use configs::PaginationConfig;
use migration::MigratorTrait;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use service::product::repository::mock::InMemoryProductRepository;
use tokio::net::TcpListener;

use server::routes::AppState;
use server::startup::{build_app, state_from_db, state_from_repo};

struct TestApp {
    base_url: String,
}

async fn spawn(state: AppState) -> anyhow::Result<TestApp> {
    let app = build_app(state);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

/// Server backed by a private SQLite database
async fn start_server() -> anyhow::Result<TestApp> {
    let db = models::db::connect_with_config(&models::db::sqlite_memory_config()).await?;
    migration::Migrator::up(&db, None).await?;
    spawn(state_from_db(db, &PaginationConfig::default())).await
}

/// Server backed by the in-memory store with a small page bound
async fn start_mock_server(max_page_size: u64) -> anyhow::Result<TestApp> {
    let pagination = PaginationConfig { default_page_size: max_page_size.min(20), max_page_size };
    spawn(state_from_repo(Arc::new(InMemoryProductRepository::default()), &pagination)).await
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_tools_scenario() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.post(format!("{}/products", app.base_url))
        .json(&json!({"category": "tools", "name": "hammer"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let hammer = res.json::<Value>().await?;
    let hammer_id = hammer["id"].as_i64().expect("numeric id");
    assert!(hammer_id > 0);
    assert_eq!(hammer["category"], "tools");
    assert_eq!(hammer["name"], "hammer");

    let res = c.post(format!("{}/products", app.base_url))
        .json(&json!({"category": "tools", "name": "wrench"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let res = c.get(format!("{}/products?category=tools&page=0&size=10", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let list = res.json::<Value>().await?;
    assert_eq!(list["items"].as_array().map(Vec::len), Some(2));
    assert_eq!(list["totalPages"], 1);
    assert_eq!(list["totalElements"], 2);
    assert_eq!(list["pageIndex"], 0);

    let res = c.get(format!("{}/categories", app.base_url)).send().await?;
    let cats = res.json::<Vec<String>>().await?;
    assert_eq!(cats.iter().filter(|c| *c == "tools").count(), 1);

    let res = c.delete(format!("{}/products/{}", app.base_url, hammer_id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<bool>().await?, true);

    let res = c.get(format!("{}/products/{}", app.base_url, hammer_id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "not_found");
    Ok(())
}

#[tokio::test]
async fn e2e_update_replaces_both_fields() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let created = c.post(format!("{}/products", app.base_url))
        .json(&json!({"category": "tools", "name": "hammer"}))
        .send().await?
        .json::<Value>().await?;
    let id = created["id"].as_i64().expect("numeric id");

    let res = c.put(format!("{}/products/{}", app.base_url, id))
        .json(&json!({"category": "hardware", "name": "mallet"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let fetched = c.get(format!("{}/products/{}", app.base_url, id)).send().await?.json::<Value>().await?;
    assert_eq!(fetched, json!({"id": id, "category": "hardware", "name": "mallet"}));

    // partial bodies are not patches
    let res = c.put(format!("{}/products/{}", app.base_url, id))
        .json(&json!({"name": "only-name"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn e2e_missing_ids_are_404() -> anyhow::Result<()> {
    let app = start_mock_server(100).await?;
    let c = client();

    let res = c.get(format!("{}/products/999", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let res = c.put(format!("{}/products/999", app.base_url))
        .json(&json!({"category": "c", "name": "n"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let res = c.delete(format!("{}/products/999", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_bad_input_is_400() -> anyhow::Result<()> {
    let app = start_mock_server(5).await?;
    let c = client();

    for query in ["category=tools&size=0", "category=tools&size=6", "size=2", "category=tools&page=-1"] {
        let res = c.get(format!("{}/products?{}", app.base_url, query)).send().await?;
        assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST, "query {query}");
        let body = res.json::<Value>().await?;
        assert_eq!(body["error"], "validation");
    }

    let res = c.get(format!("{}/products/not-a-number", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = c.post(format!("{}/products", app.base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn e2e_pages_cover_the_category() -> anyhow::Result<()> {
    let app = start_mock_server(100).await?;
    let c = client();
    for i in 0..5 {
        c.post(format!("{}/products", app.base_url))
            .json(&json!({"category": "tools", "name": format!("t{i}")}))
            .send().await?;
        c.post(format!("{}/products", app.base_url))
            .json(&json!({"category": "garden", "name": format!("g{i}")}))
            .send().await?;
    }

    let mut names = Vec::new();
    for page in 0..3 {
        let list = c.get(format!("{}/products?category=tools&page={}&size=2", app.base_url, page))
            .send().await?
            .json::<Value>().await?;
        assert_eq!(list["totalPages"], 3);
        assert_eq!(list["totalElements"], 5);
        for item in list["items"].as_array().cloned().unwrap_or_default() {
            assert_eq!(item["category"], "tools");
            names.push(item["name"].as_str().unwrap_or_default().to_string());
        }
    }
    assert_eq!(names, vec!["t0", "t1", "t2", "t3", "t4"]);

    let cats = c.get(format!("{}/categories", app.base_url)).send().await?.json::<Vec<String>>().await?;
    assert_eq!(cats, vec!["garden", "tools"]);
    Ok(())
}

#[tokio::test]
async fn e2e_huge_page_index_is_an_empty_page() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    c.post(format!("{}/products", app.base_url))
        .json(&json!({"category": "tools", "name": "hammer"}))
        .send().await?;

    for page in ["4611686018427387904", "9223372036854775807", "18446744073709551615"] {
        let res = c.get(format!("{}/products?category=tools&page={}&size=2", app.base_url, page)).send().await?;
        assert_eq!(res.status(), HttpStatusCode::OK, "page {page}");
        let list = res.json::<Value>().await?;
        assert_eq!(list["items"].as_array().map(Vec::len), Some(0));
        assert_eq!(list["totalElements"], 1);
        assert_eq!(list["totalPages"], 1);
    }
    Ok(())
}

#[tokio::test]
async fn e2e_openapi_document_served() -> anyhow::Result<()> {
    let app = start_mock_server(100).await?;
    let res = client().get(format!("{}/api-docs/openapi.json", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let doc = res.json::<Value>().await?;
    assert!(doc["paths"]["/products/{id}"].is_object());
    Ok(())
}
