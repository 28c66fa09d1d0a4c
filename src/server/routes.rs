//! Request handlers.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use super::auth::authenticate;
use super::state::AppState;
use crate::error::AppError;
use crate::ports::{LinkChanges, ProfileChanges};
use crate::services::analytics::{record_event, report_for_user, NewEvent};
use crate::services::links::{create_link, delete_link, links_for_username, update_link, NewLink};
use crate::services::profiles::{
    find_profile, load_public_page, profile_for_user, save_profile, PageLookup,
};
use crate::services::uploads::{store_image, validate_upload, ImageUpload, UploadForm};
use crate::services::vcard::{render_vcard, VCARD_CONTENT_TYPE};

type SharedState = State<Arc<AppState>>;

/// Body of `POST /api/profile/update`.
#[derive(Deserialize)]
pub struct ProfileUpdate {
    id: String,
    #[serde(flatten)]
    changes: ProfileChanges,
}

/// Body of `POST /api/social/update`.
#[derive(Deserialize)]
pub struct LinkUpdate {
    id: String,
    #[serde(flatten)]
    changes: LinkChanges,
}

/// Body of `POST /api/social/delete`.
#[derive(Deserialize)]
pub struct LinkDelete {
    id: String,
}

pub async fn health_handler() -> &'static str {
    "ok"
}

/// Public page. Renamed addresses answer `301` with the current one.
pub async fn page_handler(
    State(state): SharedState,
    Path(username): Path<String>,
) -> Result<Response, AppError> {
    match load_public_page(&state.ctx, &username).await? {
        PageLookup::Moved(resolved) => Ok(moved_permanently(&format!("/{resolved}"))),
        PageLookup::Found(page) => Ok(Json(page).into_response()),
    }
}

pub async fn profile_links_handler(
    State(state): SharedState,
    Path(username): Path<String>,
) -> Result<Response, AppError> {
    let links = links_for_username(&state.ctx, &username).await?;

    let mut response = Json(json!({ "links": links, "error": null })).into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store, no-cache, must-revalidate, proxy-revalidate"),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    Ok(response)
}

pub async fn my_profile_handler(
    State(state): SharedState,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let user = authenticate(&state.ctx, &headers).await?;
    let profile = profile_for_user(&state.ctx, &user).await?;
    Ok(Json(json!({ "data": profile, "error": null })).into_response())
}

pub async fn update_profile_handler(
    State(state): SharedState,
    headers: HeaderMap,
    Json(body): Json<ProfileUpdate>,
) -> Result<Response, AppError> {
    let user = authenticate(&state.ctx, &headers).await?;
    let profile = save_profile(&state.ctx, &user, &body.id, body.changes).await?;
    Ok(Json(json!({ "data": profile, "error": null })).into_response())
}

/// Contact card download.
pub async fn vcf_handler(
    State(state): SharedState,
    Path(username): Path<String>,
) -> Result<Response, AppError> {
    let profile = find_profile(&state.ctx, &username).await?;
    let card = render_vcard(&profile, &state.config.app_url);
    let file_name = profile.username.as_deref().unwrap_or(&username);

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{file_name}.vcf\""))
        .map_err(|_| AppError::BadRequest("Invalid username".to_string()))?;
    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(VCARD_CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        card,
    )
        .into_response())
}

pub async fn create_link_handler(
    State(state): SharedState,
    headers: HeaderMap,
    Json(body): Json<NewLink>,
) -> Result<Response, AppError> {
    let user = authenticate(&state.ctx, &headers).await?;
    let link = create_link(&state.ctx, &user, body).await?;
    Ok(Json(json!({ "data": [link], "error": null })).into_response())
}

pub async fn update_link_handler(
    State(state): SharedState,
    headers: HeaderMap,
    Json(body): Json<LinkUpdate>,
) -> Result<Response, AppError> {
    let user = authenticate(&state.ctx, &headers).await?;
    let link = update_link(&state.ctx, &user, &body.id, &body.changes).await?;
    Ok(Json(json!({ "data": link, "error": null })).into_response())
}

pub async fn delete_link_handler(
    State(state): SharedState,
    headers: HeaderMap,
    Json(body): Json<LinkDelete>,
) -> Result<Response, AppError> {
    let user = authenticate(&state.ctx, &headers).await?;
    delete_link(&state.ctx, &user, &body.id).await?;
    Ok(Json(json!({ "success": true, "error": null })).into_response())
}

/// Image upload. Payload checks run before authentication.
pub async fn upload_handler(
    State(state): SharedState,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let upload = validate_upload(read_upload_form(multipart).await?)?;
    let user = authenticate(&state.ctx, &headers).await?;
    let url = store_image(&state.ctx, &user, upload).await?;
    Ok(Json(json!({ "url": url, "error": null })).into_response())
}

pub async fn record_event_handler(
    State(state): SharedState,
    Json(body): Json<NewEvent>,
) -> Result<Response, AppError> {
    record_event(&state.ctx, body).await?;
    Ok(Json(json!({ "success": true })).into_response())
}

pub async fn analytics_report_handler(
    State(state): SharedState,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let user = authenticate(&state.ctx, &headers).await?;
    let report = report_for_user(&state.ctx, &user).await?;
    Ok(Json(report).into_response())
}

fn moved_permanently(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(location) => {
            (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response()
        }
        Err(_) => AppError::NotFound("Profile not found".to_string()).into_response(),
    }
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid form data: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid file: {e}")))?;
                form.file = Some(ImageUpload { file_name, content_type, bytes: bytes.to_vec() });
            }
            "bucket" | "userId" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid {name} field: {e}")))?;
                if name == "bucket" {
                    form.bucket = Some(value);
                } else {
                    form.user_id = Some(value);
                }
            }
            _ => {}
        }
    }

    Ok(form)
}
