use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use lct::domain::config::{ApiConfig, SslConfig};
use lct_server::Server;
use tower::ServiceExt;

fn config(root: &std::path::Path) -> ApiConfig {
    let mut cfg = ApiConfig::default();
    cfg.content.root = root.to_path_buf();
    cfg
}

fn seed(root: &std::path::Path) {
    let classes = root.join("data/classes");
    std::fs::create_dir_all(&classes).unwrap();
    std::fs::write(classes.join("mage.yaml"), "class:\n  name: Mage\n  main_role: Caster\n").unwrap();
    std::fs::write(root.join("data/class-list.json"), r#"["mage.yaml"]"#).unwrap();
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(Request::get(uri).body(Body::empty()).unwrap()).await.unwrap();
    let status = response.status();
    (status, to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec())
}

#[tokio::test]
async fn serves_health_classes_and_docs() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());
    let server = Server::builder().config(config(dir.path())).port(0).build().unwrap();
    let app = lct_server::app(server.state().clone());

    let (status, body) = get(app.clone(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    let health: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(health["status"], "up");

    let (status, body) = get(app.clone(), "/api/classes").await;
    assert_eq!(status, StatusCode::OK);
    let classes: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(classes[0]["id"], "mage");

    let (status, _) = get(app.clone(), "/api/classes/nobody").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get(app, "/api").await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8_lossy(&body).contains("/api/classes/search"));
}

#[test]
fn missing_tls_material_fails_the_build() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config(dir.path());
    cfg.server.ssl = Some(SslConfig { cert: dir.path().join("cert.pem"), key: dir.path().join("key.pem") });

    let err = Server::builder().config(cfg).build().unwrap_err();
    assert!(err.to_string().contains("SSL certificate not found"));
}

#[test]
fn http_source_without_base_url_fails_the_build() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config(dir.path());
    cfg.content.source = lct::domain::config::ContentSourceKind::Http;
    cfg.content.base_url = String::new();

    let err = Server::builder().config(cfg).build().unwrap_err();
    assert!(format!("{err:#}").contains("base_url"));
}
