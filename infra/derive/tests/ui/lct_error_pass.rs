use lct_derive::lct_error;
use std::borrow::Cow;

#[lct_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<(), DemoError> {
    Err(std::io::Error::other("disk")).context("mage.yaml")
}

fn main() {
    let err = read().unwrap_err();
    assert_eq!(err.to_string(), "IO error (mage.yaml): disk");

    let err: DemoError = "boom".into();
    assert!(matches!(err, DemoError::Internal { .. }));

    let err = Err::<(), _>(DemoError::NotFound { message: "mage".into(), context: None })
        .context("lookup")
        .unwrap_err();
    assert_eq!(err.to_string(), "Not found (lookup): mage");
}
