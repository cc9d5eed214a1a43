use crate::application::{
    commands::people::BulkEditCommand,
    dto::{PeoplePage, ProfileDto, SpaceDto},
    error::ApplicationError,
    queries::people::ListPeopleQuery,
};
use crate::config::SiteSettings;
use crate::domain::{
    pager::Pager,
    profile::{ProfileId, ProfileSelection, SpaceOperation},
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{CurrentSpace, Locale, MaybeAuthenticated};
use crate::presentation::http::state::HttpState;
use crate::presentation::http::views::{View, found};
use axum::{
    Extension, Form,
    extract::{Query, RawQuery},
    http::{HeaderValue, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use headers::{CacheControl, HeaderMapExt};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const PEOPLE_TEMPLATE: &str = "base";

#[derive(Debug, Default, Deserialize)]
pub struct PeopleParams {
    #[serde(default)]
    pub sortby: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub bulkedit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AvatarParams {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeopleModel {
    pub path: &'static str,
    pub title: String,
    pub people_selected: &'static str,
    pub itemcount: Pager,
    pub userlist: Vec<ProfileDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spaces: Option<Vec<SpaceDto>>,
}

impl PeopleModel {
    fn new(page: PeoplePage, title: String) -> Self {
        Self {
            path: "people.vm",
            title,
            people_selected: "navbtn-hover",
            itemcount: page.pager,
            userlist: page.profiles,
            spaces: page.spaces,
        }
    }
}

/// Bulk-edit form. Browsers send repeated keys, optionally with a `[]`
/// suffix, so the fields are collected from raw pairs.
#[derive(Debug, Default)]
pub struct BulkEditForm {
    pub selected_users: Vec<String>,
    pub selected_spaces: Vec<String>,
    pub operation: Option<String>,
    pub selection: Option<String>,
}

impl BulkEditForm {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut form = Self::default();
        for (key, value) in pairs {
            match key.trim_end_matches("[]") {
                "selectedUsers" => form.selected_users.push(value),
                "selectedSpaces" => form.selected_spaces.push(value),
                "operation" => form.operation = Some(value),
                "selection" => form.selection = Some(value),
                _ => {}
            }
        }
        form
    }

    pub fn into_command(self) -> BulkEditCommand {
        let ids: Vec<ProfileId> = self
            .selected_users
            .into_iter()
            .filter_map(|id| ProfileId::new(id).ok())
            .collect();

        BulkEditCommand {
            operation: SpaceOperation::from_form(self.operation.as_deref()),
            selection: ProfileSelection::from_form(self.selection.as_deref(), ids),
            spaces: self.selected_spaces,
        }
    }
}

fn signin_location(site: &SiteSettings) -> String {
    match serde_urlencoded::to_string([("returnto", site.people_path.as_str())]) {
        Ok(query) => format!("{}?{}", site.signin_path, query),
        Err(_) => site.signin_path.clone(),
    }
}

fn people_location(site: &SiteSettings, query: Option<&str>) -> String {
    match query.filter(|q| !q.is_empty()) {
        Some(query) => format!("{}?{}", site.people_path, query),
        None => site.people_path.clone(),
    }
}

pub async fn list_people(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    CurrentSpace(space): CurrentSpace,
    Locale(locale): Locale,
    Query(params): Query<PeopleParams>,
) -> HttpResult<Response> {
    let query = ListPeopleQuery {
        sortby: params.sortby,
        q: params.q,
        page: params.page.and_then(|p| p.trim().parse::<u32>().ok()),
        bulk_edit: params.bulkedit.is_some(),
        space,
    };

    let result = state
        .services
        .people_queries
        .list_people(actor.0.as_ref(), query)
        .await;

    let page = match result {
        Err(ApplicationError::Unauthorized(reason)) => {
            tracing::debug!(%reason, "anonymous people listing redirected to sign in");
            return Ok(found(signin_location(&state.site)));
        }
        other => other.into_http()?,
    };

    let title = state
        .services
        .language_catalog()
        .get(&locale, "people.title");

    Ok(View::new(PEOPLE_TEMPLATE, PeopleModel::new(page, title)).into_response())
}

pub async fn bulk_edit(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    RawQuery(raw_query): RawQuery,
    Form(fields): Form<Vec<(String, String)>>,
) -> HttpResult<Response> {
    let command = BulkEditForm::from_pairs(fields).into_command();

    match state
        .services
        .people_commands
        .bulk_edit(actor.0.as_ref(), command)
        .await
    {
        Ok(_) => Ok(found(people_location(&state.site, raw_query.as_deref()))),
        Err(ApplicationError::Forbidden(reason)) => {
            tracing::warn!(%reason, "bulk edit rejected");
            Ok(found(people_location(&state.site, None)))
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn avatar(
    Extension(state): Extension<HttpState>,
    Query(params): Query<AvatarParams>,
) -> Response {
    let fallback = || found(state.site.default_avatar_url.clone());

    let Some(url) = params.url.filter(|u| !u.trim().is_empty()) else {
        return fallback();
    };

    let image = match state.services.avatar_fetcher().fetch(&url).await {
        Ok(image) => image,
        Err(err) => {
            tracing::warn!(
                error = %err,
                %url,
                upstream_failure = err.is_server_error(),
                "avatar unavailable, serving default"
            );
            return fallback();
        }
    };

    let Ok(content_type) = HeaderValue::from_str(&image.content_type) else {
        return fallback();
    };

    let mut response = (StatusCode::OK, image.bytes).into_response();
    response.headers_mut().insert(CONTENT_TYPE, content_type);
    response.headers_mut().typed_insert(
        CacheControl::new()
            .with_public()
            .with_max_age(Duration::from_secs(state.avatar.cache_secs)),
    );
    response
}
