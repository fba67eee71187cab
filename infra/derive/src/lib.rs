#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Attribute macros used across the LCTools workspace to keep error enums, feature
//! slices and HTTP DTOs uniform.
//!
//! The examples below are `ignore`d: a proc-macro crate cannot use its own macros in
//! doctests. The consuming crates exercise every macro in their tests.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Defines a standard API data model.
///
/// # Injected Behaviors
///
/// * **Derives**: `Debug`, `Serialize` and `Deserialize` when missing.
/// * **`OpenAPI`**: `utoipa::ToSchema` behind the consumer's `server` feature.
/// * **Serde Policy**: `rename_all = "camelCase"` and `deny_unknown_fields` unless
///   overridden through the arguments below.
///
/// # Arguments
///
/// * `rename_all = "snake_case"` - Overrides the default rename policy.
/// * `deny_unknown_fields = false` - Tolerates unknown fields (content files).
///
/// # Example
///
/// ```rust,ignore
/// use lct_derive::api_model;
///
/// #[api_model(rename_all = "snake_case", deny_unknown_fields = false)]
/// pub struct ClassSummary {
///     pub id: String,
///     pub main_role: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Bridges an Axum handler with `OpenAPI` documentation.
///
/// Accepts the regular `utoipa::path` arguments and only emits the attribute when
/// the consumer's `server` feature is enabled.
///
/// ```rust,ignore
/// #[api_handler(
///     get,
///     path = "/api/classes",
///     responses((status = OK, body = Vec<ClassRecord>)),
///     tag = CLASSES_TAG,
/// )]
/// pub async fn list_classes(State(state): State<ApiState>) -> Result<Json<Vec<ClassRecord>>> {
///     // ...
/// }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Declares a crate error enum.
///
/// # Features
///
/// * **Automatic Derives**: `Debug` and `thiserror::Error` when missing.
/// * **Context Support**: a companion `<Name>Ext` trait adding `.context(...)` to
///   `Result<T, Name>` and to `Result<T, Source>` for every source-carrying variant.
/// * **Conversions**: `From<Source>` for variants with a `source` field (or a field
///   marked `#[source]`/`#[from]`), enabling `?` on upstream errors.
/// * **Internal Fallback**: `From<&'static str>` and `From<String>` when an `Internal`
///   variant exists.
///
/// # Requirements
///
/// 1. Only enums with named-field variants are accepted.
/// 2. A `context` field must be typed `Option<Cow<'static, str>>`.
/// 3. Variants carrying a source must also carry a `context` field, and nothing else.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[lct_derive::lct_error]
/// pub enum ClassesError {
///     #[error("Malformed content unit{}: {source}", format_context(.context))]
///     Parse { source: serde_yaml::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// let record: ClassFile = serde_yaml::from_str(&text).context("mage.yaml")?;
/// ```
#[proc_macro_attribute]
pub fn lct_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Turns a struct into a feature-slice handle.
///
/// Generates `<Name>Inner` with the declared fields, an `Arc`-backed `<Name>` handle
/// with `Deref` to the inner state, and a `FeatureSlice` impl for registration in
/// the kernel's `ApiState`.
///
/// ```rust,ignore
/// #[lct_derive::lct_slice]
/// pub struct Classes {
///     pub store: ContentStore,
/// }
///
/// let slice = Classes::new(ClassesInner { store });
/// ```
#[proc_macro_attribute]
pub fn lct_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
