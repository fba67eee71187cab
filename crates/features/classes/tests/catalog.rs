use lct_classes::{
    ClassCatalog, ClassesError, FilterCriteria, FsContentSource, ImageRewrite, filter,
};
use std::path::Path;
use tempfile::TempDir;

const MANIFEST: &str = "data/class-list.json";
const CLASSES: &str = "data/classes";

fn unit(name: &str, role: &str, tier: u32, description: &str) -> String {
    format!("class:\n  name: {name}\n  main_role: {role}\n  tier: {tier}\n  description: {description}\n")
}

/// A content root holding the tank/healer fixture: A(tank, 1), B(healer, 2), C(tank, 3).
fn content_root(manifest: Option<&str>) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let classes = dir.path().join(CLASSES);
    std::fs::create_dir_all(&classes).unwrap();

    std::fs::write(classes.join("a.yaml"), unit("Aegis", "Tank", 1, "Holds the line.")).unwrap();
    std::fs::write(classes.join("b.yaml"), unit("Bloom", "Healer", 2, "Can heal allies.")).unwrap();
    std::fs::write(classes.join("c.yaml"), unit("Citadel", "tank", 3, "A moving wall.")).unwrap();

    if let Some(manifest) = manifest {
        std::fs::write(dir.path().join(MANIFEST), manifest).unwrap();
    }
    dir
}

fn source(root: &Path) -> FsContentSource {
    FsContentSource::new(root, MANIFEST, CLASSES)
}

fn ids(records: &[lct_classes::ClassRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

#[tokio::test]
async fn tank_healer_scenario() {
    let root = content_root(Some(r#"["a.yaml", "b.yaml", "c.yaml"]"#));
    let (source, images) = (source(root.path()), ImageRewrite::default());
    let catalog = ClassCatalog::new(&source, &images, false).catalog().await.unwrap();

    let by_role = filter(&catalog, &FilterCriteria::default().role("tank"));
    assert_eq!(ids(&by_role), ["a", "c"]);

    let by_tier = filter(&catalog, &FilterCriteria::default().tier_range(Some(2), Some(3)));
    assert_eq!(ids(&by_tier), ["b", "c"]);

    let by_text = filter(&catalog, &FilterCriteria::default().text("heal"));
    assert_eq!(ids(&by_text), ["b"]);
}

#[tokio::test]
async fn empty_criteria_is_identity_and_order_follows_manifest() {
    let root = content_root(Some(r#"["c.yaml", "a.yaml", "b.yaml"]"#));
    let (source, images) = (source(root.path()), ImageRewrite::default());
    let catalog = ClassCatalog::new(&source, &images, false).catalog().await.unwrap();

    assert_eq!(ids(catalog.records()), ["c", "a", "b"]);
    assert_eq!(filter(&catalog, &FilterCriteria::default()), catalog.records());

    let tanks = filter(&catalog, &FilterCriteria::default().role("TANK"));
    assert_eq!(ids(&tanks), ["c", "a"]);
}

#[tokio::test]
async fn empty_manifest_yields_empty_catalog() {
    let root = content_root(Some("[]"));
    let (source, images) = (source(root.path()), ImageRewrite::default());
    let catalog = ClassCatalog::new(&source, &images, true).catalog().await.unwrap();
    assert!(catalog.is_empty());
}

#[tokio::test]
async fn malformed_missing_and_duplicate_units_are_skipped() {
    let root = content_root(Some(r#"["a.yaml", "broken.yaml", "ghost.yaml", "a.yaml", "b.yaml"]"#));
    std::fs::write(root.path().join(CLASSES).join("broken.yaml"), "class: [oops").unwrap();

    let (source, images) = (source(root.path()), ImageRewrite::default());
    let catalog = ClassCatalog::new(&source, &images, false).catalog().await.unwrap();
    assert_eq!(ids(catalog.records()), ["a", "b"]);
}

#[tokio::test]
async fn missing_manifest_falls_back_to_sorted_directory_when_enabled() {
    let root = content_root(None);
    let (source, images) = (source(root.path()), ImageRewrite::default());

    let catalog = ClassCatalog::new(&source, &images, true).catalog().await.unwrap();
    assert_eq!(ids(catalog.records()), ["a", "b", "c"]);

    let err = ClassCatalog::new(&source, &images, false).catalog().await.unwrap_err();
    assert!(matches!(err, ClassesError::Config { .. }));
}

#[tokio::test]
async fn get_by_id_requires_a_manifest_entry() {
    let root = content_root(Some(r#"["a.yaml", "b.yaml"]"#));
    let (source, images) = (source(root.path()), ImageRewrite::default());
    let catalog = ClassCatalog::new(&source, &images, false);

    assert_eq!(catalog.get_by_id("b").await.unwrap().name, "Bloom");
    assert_eq!(catalog.get_by_id("b.yaml").await.unwrap().id, "b");

    // c.yaml exists on disk but is not listed.
    assert!(matches!(catalog.get_by_id("c").await, Err(ClassesError::NotFound { .. })));
    assert!(matches!(catalog.get_by_id("zzz").await, Err(ClassesError::NotFound { .. })));
    assert!(matches!(catalog.get_by_id("../a").await, Err(ClassesError::Validation { .. })));
    assert!(matches!(catalog.get_by_id(" ").await, Err(ClassesError::Validation { .. })));
}

#[tokio::test]
async fn listed_ids_resolve_through_get_by_id() {
    let root = content_root(Some(r#"["a.yaml", "b.yaml"]"#));
    std::fs::write(
        root.path().join(CLASSES).join("a.yaml"),
        "class:\n  id: aegis\n  name: Aegis\n  main_role: Tank\n",
    )
    .unwrap();
    let (source, images) = (source(root.path()), ImageRewrite::default());
    let catalog = ClassCatalog::new(&source, &images, false);

    let listed = catalog.list_all().await.unwrap();
    assert_eq!(ids(&listed), ["a", "b"]);
    for record in &listed {
        assert_eq!(&catalog.get_by_id(&record.id).await.unwrap(), record);
    }
    assert!(matches!(catalog.get_by_id("aegis").await, Err(ClassesError::NotFound { .. })));
}

#[tokio::test]
async fn loading_is_idempotent_and_roles_are_sorted() {
    let root = content_root(Some(r#"["a.yaml", "b.yaml", "c.yaml"]"#));
    let (source, images) = (source(root.path()), ImageRewrite::default());
    let catalog = ClassCatalog::new(&source, &images, false);

    assert_eq!(catalog.list_all().await.unwrap(), catalog.list_all().await.unwrap());
    assert_eq!(catalog.roles().await.unwrap(), ["Healer", "Tank", "tank"]);
}

#[tokio::test]
async fn search_rejects_inverted_ranges() {
    let root = content_root(Some(r#"["a.yaml"]"#));
    let (source, images) = (source(root.path()), ImageRewrite::default());
    let err = ClassCatalog::new(&source, &images, false)
        .search(&FilterCriteria::default().tier_range(Some(3), Some(1)))
        .await
        .unwrap_err();
    assert!(matches!(err, ClassesError::Validation { .. }));
}
