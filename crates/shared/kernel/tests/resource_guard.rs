use lct_kernel::security::resource::{ResourceGuard, ResourceGuardError};

#[test]
fn resource_guard_validates_and_strips_extension() {
    assert_eq!(ResourceGuard::content_id("high_priest").unwrap(), "high_priest");
    assert_eq!(ResourceGuard::content_id("high_priest.yaml").unwrap(), "high_priest");

    let err = ResourceGuard::content_id("..%2fetc").unwrap_err();
    assert!(matches!(err, ResourceGuardError::Validation { .. }));

    let long = "a".repeat(200);
    assert!(ResourceGuard::content_id(long).is_err());
}
