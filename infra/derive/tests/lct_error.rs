#[test]
fn lct_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/lct_error_pass.rs");
}
