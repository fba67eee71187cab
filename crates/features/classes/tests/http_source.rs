use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use lct_classes::{ClassCatalog, ClassesError, ContentSource, HttpContentSource, ImageRewrite};
use std::net::SocketAddr;

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    addr
}

fn http_source(addr: SocketAddr) -> HttpContentSource {
    let client = HttpContentSource::client(5).unwrap();
    HttpContentSource::new(client, &format!("http://{addr}/"), "data/class-list.json", "data/classes")
        .unwrap()
}

#[tokio::test]
async fn assembles_catalog_over_http_and_rewrites_images() {
    let app = Router::new()
        .route("/data/class-list.json", get(|| async { r#"["mage.yaml", "gone.yaml"]"# }))
        .route(
            "/data/classes/mage.yaml",
            get(|| async {
                "class:\n  id: mage\n  name: Arcane Mage\n  main_role: Caster\n  image_url: https://cdn.angelssword.com/a.png\n"
            }),
        );
    let addr = serve(app).await;

    let source = http_source(addr);
    let images = ImageRewrite::new(vec!["cdn.angelssword.com".to_owned()], "/images/classes");
    let catalog = ClassCatalog::new(&source, &images, true);

    let records = catalog.list_all().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].image_url.as_deref(), Some("/images/classes/Arcane_Mage.webp"));

    assert!(matches!(catalog.get_by_id("gone").await, Err(ClassesError::NotFound { .. })));
}

#[tokio::test]
async fn http_source_cannot_list_and_reports_status_errors() {
    let app = Router::new()
        .route("/data/classes/bad.yaml", get(|| async { StatusCode::BAD_GATEWAY }));
    let addr = serve(app).await;
    let source = http_source(addr);

    assert_eq!(source.list_units().await.unwrap(), None);
    assert_eq!(source.manifest().await.unwrap(), None);
    assert!(matches!(
        source.unit("bad.yaml").await,
        Err(ClassesError::UpstreamStatus { status: 502, .. })
    ));

    let images = ImageRewrite::default();
    let err = ClassCatalog::new(&source, &images, true).list_all().await.unwrap_err();
    assert!(matches!(err, ClassesError::Config { .. }));
}

#[test]
fn blank_base_url_is_a_config_error() {
    let client = HttpContentSource::client(5).unwrap();
    let err = HttpContentSource::new(client, "  ", "m.json", "classes").unwrap_err();
    assert!(matches!(err, ClassesError::Config { .. }));
}
