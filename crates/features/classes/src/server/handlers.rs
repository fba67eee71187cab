use crate::abilities::{AbilityCriteria, AbilityEntry, AbilityFacets};
use crate::error::ClassesError;
use crate::filter::FilterCriteria;
use crate::model::ClassRecord;
use crate::Classes;
use axum::Json;
use axum::extract::{Path, Query, State};
use lct_derive::api_handler;
use lct_domain::constants::{ABILITIES_TAG, CLASSES_TAG};
use lct_kernel::server::{ApiState, ErrorBody};
use serde::Deserialize;

type Result<T> = std::result::Result<T, ClassesError>;

fn slice(state: &ApiState) -> Result<&Classes> {
    state.try_get_slice::<Classes>().map_err(|e| ClassesError::Internal {
        message: e.to_string().into(),
        context: None,
    })
}

/// Query string of `GET /api/classes/search`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClassSearchQuery {
    /// Substring of the name or description
    pub text: Option<String>,
    /// Main or secondary role
    pub role: Option<String>,
    pub tier_min: Option<u32>,
    pub tier_max: Option<u32>,
    pub difficulty_min: Option<u32>,
    pub difficulty_max: Option<u32>,
    pub main_role: Option<String>,
    /// Secondary role; `None` selects classes without one
    pub secondary_role: Option<String>,
}

impl From<ClassSearchQuery> for FilterCriteria {
    fn from(q: ClassSearchQuery) -> Self {
        Self {
            text: q.text,
            role: q.role,
            main_role: q.main_role,
            secondary_role: q.secondary_role,
            ..Self::default()
        }
        .tier_range(q.tier_min, q.tier_max)
        .difficulty_range(q.difficulty_min, q.difficulty_max)
    }
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClassDetailsQuery {
    /// Class identifier
    pub id: Option<String>,
}

/// Query string of `GET /api/abilities`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AbilitySearchQuery {
    pub text: Option<String>,
    /// Comma-separated ability types
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub keyword: Option<String>,
    pub range: Option<String>,
    pub class_id: Option<String>,
    pub level: Option<u32>,
    pub has_mana: Option<bool>,
    pub has_rp: Option<bool>,
    pub has_ap: Option<bool>,
}

impl From<AbilitySearchQuery> for AbilityCriteria {
    fn from(q: AbilitySearchQuery) -> Self {
        Self {
            text: q.text,
            types: csv(q.kind),
            keywords: csv(q.keyword),
            ranges: csv(q.range),
            class_ids: csv(q.class_id),
            level: q.level,
            has_mana: q.has_mana,
            has_rp: q.has_rp,
            has_ap: q.has_ap,
        }
    }
}

/// Comma-separated list parameter; blanks dropped.
fn csv(value: Option<String>) -> Vec<String> {
    value
        .iter()
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .collect()
}

#[api_handler(
    get,
    path = "/api/classes",
    responses(
        (status = OK, description = "All classes in manifest order", body = Vec<ClassRecord>),
        (status = INTERNAL_SERVER_ERROR, body = ErrorBody),
    ),
    tag = CLASSES_TAG,
)]
pub(super) async fn list_classes(State(state): State<ApiState>) -> Result<Json<Vec<ClassRecord>>> {
    Ok(Json(slice(&state)?.catalog().list_all().await?))
}

#[api_handler(
    get,
    path = "/api/classes/search",
    params(ClassSearchQuery),
    responses(
        (status = OK, description = "Matching classes in manifest order", body = Vec<ClassRecord>),
        (status = BAD_REQUEST, description = "Inverted range", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, body = ErrorBody),
    ),
    tag = CLASSES_TAG,
)]
pub(super) async fn search_classes(
    State(state): State<ApiState>,
    Query(query): Query<ClassSearchQuery>,
) -> Result<Json<Vec<ClassRecord>>> {
    let criteria = FilterCriteria::from(query);
    Ok(Json(slice(&state)?.catalog().search(&criteria).await?))
}

#[api_handler(
    get,
    path = "/api/classes/details",
    params(ClassDetailsQuery),
    responses(
        (status = OK, body = ClassRecord),
        (status = BAD_REQUEST, description = "Missing identifier", body = ErrorBody),
        (status = NOT_FOUND, body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, body = ErrorBody),
    ),
    tag = CLASSES_TAG,
)]
pub(super) async fn class_details(
    State(state): State<ApiState>,
    Query(query): Query<ClassDetailsQuery>,
) -> Result<Json<ClassRecord>> {
    let id = query
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ClassesError::validation("Class ID is required"))?;
    Ok(Json(slice(&state)?.catalog().get_by_id(&id).await?))
}

#[api_handler(
    get,
    path = "/api/classes/{id}",
    params(("id" = String, Path, description = "Class identifier")),
    responses(
        (status = OK, body = ClassRecord),
        (status = BAD_REQUEST, body = ErrorBody),
        (status = NOT_FOUND, body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, body = ErrorBody),
    ),
    tag = CLASSES_TAG,
)]
pub(super) async fn get_class(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<ClassRecord>> {
    Ok(Json(slice(&state)?.catalog().get_by_id(&id).await?))
}

#[api_handler(
    get,
    path = "/api/classes/roles",
    responses(
        (status = OK, description = "Sorted distinct roles", body = Vec<String>),
        (status = INTERNAL_SERVER_ERROR, body = ErrorBody),
    ),
    tag = CLASSES_TAG,
)]
pub(super) async fn list_roles(State(state): State<ApiState>) -> Result<Json<Vec<String>>> {
    Ok(Json(slice(&state)?.catalog().roles().await?))
}

#[api_handler(
    get,
    path = "/api/abilities",
    params(AbilitySearchQuery),
    responses(
        (status = OK, body = Vec<AbilityEntry>),
        (status = INTERNAL_SERVER_ERROR, body = ErrorBody),
    ),
    tag = ABILITIES_TAG,
)]
pub(super) async fn search_abilities(
    State(state): State<ApiState>,
    Query(query): Query<AbilitySearchQuery>,
) -> Result<Json<Vec<AbilityEntry>>> {
    let criteria = AbilityCriteria::from(query);
    Ok(Json(slice(&state)?.catalog().abilities(&criteria).await?))
}

#[api_handler(
    get,
    path = "/api/abilities/facets",
    responses(
        (status = OK, body = AbilityFacets),
        (status = INTERNAL_SERVER_ERROR, body = ErrorBody),
    ),
    tag = ABILITIES_TAG,
)]
pub(super) async fn ability_facets(State(state): State<ApiState>) -> Result<Json<AbilityFacets>> {
    Ok(Json(slice(&state)?.catalog().ability_facets().await?))
}
