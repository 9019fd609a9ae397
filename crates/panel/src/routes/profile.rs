//! Profile route handlers.
//!
//! These routes require an upstream-authenticated identity.

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::instrument;

use verve_core::{Email, PhoneNumber};

use crate::db::{ProfileRepository, RepositoryError};
use crate::error::AppError;
use crate::middleware::auth::RequireAuth;
use crate::models::user::{ProfileChanges, UserProfile};
use crate::services::uploads::ImageUpload;
use crate::state::AppState;

/// Profile fetch response body.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub data: Vec<UserProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

/// Fetch the caller's profile.
///
/// A missing profile row is reported as 404 with an empty data set, not as
/// a server error.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Response, AppError> {
    let repo = ProfileRepository::new(state.pool());

    match repo.get_by_user(user.id).await? {
        Some(profile) => Ok((
            StatusCode::OK,
            Json(ProfileResponse {
                data: vec![profile],
                msg: None,
            }),
        )
            .into_response()),
        None => Ok((
            StatusCode::NOT_FOUND,
            Json(ProfileResponse {
                data: Vec::new(),
                msg: Some("user not found".to_string()),
            }),
        )
            .into_response()),
    }
}

/// Raw multipart fields of a profile update request.
///
/// Every field is optional; an omitted field keeps its stored value.
#[derive(Debug, Default)]
struct UpdateProfileForm {
    display_name: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    phone_number: Option<String>,
    address: Option<String>,
    birthdate: Option<String>,
    email: Option<String>,
    gender: Option<String>,
    image: Option<ImageUpload>,
}

/// Drain a multipart body into an [`UpdateProfileForm`].
///
/// Unknown fields are ignored.
async fn read_form(multipart: &mut Multipart) -> Result<UpdateProfileForm, AppError> {
    let mut form = UpdateProfileForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };

        if name == "image" {
            let file_name = field.file_name().unwrap_or("profile").to_owned();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_owned();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("unreadable image field: {e}")))?
                .to_vec();

            form.image = Some(ImageUpload {
                file_name,
                content_type,
                bytes,
            });
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(format!("unreadable field '{name}': {e}")))?;

        match name.as_str() {
            "display_name" => form.display_name = Some(value),
            "first_name" => form.first_name = Some(value),
            "last_name" => form.last_name = Some(value),
            "phone_number" => form.phone_number = Some(value),
            "address" => form.address = Some(value),
            "birthdate" => form.birthdate = Some(value),
            "email" => form.email = Some(value),
            "gender" => form.gender = Some(value),
            _ => {}
        }
    }

    Ok(form)
}

/// Validate the provided fields into typed [`ProfileChanges`].
///
/// Runs before any database or upload work; a failing field short-circuits
/// the whole request with 422.
fn validate(form: &UpdateProfileForm) -> Result<ProfileChanges, AppError> {
    let email = form
        .email
        .as_deref()
        .map(Email::parse)
        .transpose()
        .map_err(|e| AppError::Validation(format!("invalid email input: {e}")))?;

    let phone_number = form
        .phone_number
        .as_deref()
        .map(PhoneNumber::parse)
        .transpose()
        .map_err(|e| AppError::Validation(format!("invalid phone number input: {e}")))?;

    let birthdate = form
        .birthdate
        .as_deref()
        .map(|value| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .transpose()
        .map_err(|_| AppError::Validation("invalid birthdate input, expected YYYY-MM-DD".to_string()))?;

    Ok(ProfileChanges {
        display_name: form.display_name.clone(),
        first_name: form.first_name.clone(),
        last_name: form.last_name.clone(),
        address: form.address.clone(),
        birthdate,
        gender: form.gender.clone(),
        img: None,
        email,
        phone_number,
    })
}

/// Profile update response body.
#[derive(Debug, Serialize)]
pub struct UpdateProfileResponse {
    pub msg: String,
    pub data: Vec<UserProfile>,
}

/// Apply a partial update to the caller's profile.
///
/// Field validation happens before any side effect; the image (if any) is
/// pushed to the upload service only after the caller's profile row is known
/// to exist, and the database update runs as one transaction.
#[instrument(skip(state, multipart))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let form = read_form(&mut multipart).await?;
    let mut changes = validate(&form)?;

    let repo = ProfileRepository::new(state.pool());

    if repo.get_by_user(user.id).await?.is_none() {
        return Err(AppError::NotFound("user".to_string()));
    }

    if let Some(image) = &form.image {
        let url = state.uploads().upload_profile_image(user.id, image).await?;
        changes.img = Some(url);
    }

    let updated = repo.update(user.id, &changes).await.map_err(|e| match e {
        RepositoryError::NotFound => AppError::NotFound("user".to_string()),
        other => AppError::Database(other),
    })?;

    Ok((
        StatusCode::OK,
        Json(UpdateProfileResponse {
            msg: "profile updated".to_string(),
            data: vec![updated],
        }),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_empty_form_changes_nothing() {
        let form = UpdateProfileForm::default();
        let changes = validate(&form).unwrap_or_default();

        assert!(changes.display_name.is_none());
        assert!(changes.email.is_none());
        assert!(changes.phone_number.is_none());
        assert!(changes.birthdate.is_none());
    }

    #[test]
    fn test_validate_phone_only_leaves_other_fields_omitted() {
        let form = UpdateProfileForm {
            phone_number: Some("0812345678".to_string()),
            ..UpdateProfileForm::default()
        };
        let changes = validate(&form).unwrap_or_default();

        assert!(changes.phone_number.is_some());
        assert!(changes.display_name.is_none());
        assert!(changes.email.is_none());
        assert!(changes.address.is_none());
    }

    #[test]
    fn test_validate_rejects_invalid_email() {
        let form = UpdateProfileForm {
            email: Some("not-an-email".to_string()),
            ..UpdateProfileForm::default()
        };

        assert!(matches!(validate(&form), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_invalid_phone() {
        let form = UpdateProfileForm {
            phone_number: Some("call me".to_string()),
            ..UpdateProfileForm::default()
        };

        assert!(matches!(validate(&form), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_parses_birthdate() {
        let form = UpdateProfileForm {
            birthdate: Some("1994-03-21".to_string()),
            ..UpdateProfileForm::default()
        };
        let changes = validate(&form).unwrap_or_default();

        assert_eq!(
            changes.birthdate,
            NaiveDate::from_ymd_opt(1994, 3, 21)
        );
    }

    #[test]
    fn test_validate_rejects_garbled_birthdate() {
        let form = UpdateProfileForm {
            birthdate: Some("21/03/1994".to_string()),
            ..UpdateProfileForm::default()
        };

        assert!(matches!(validate(&form), Err(AppError::Validation(_))));
    }
}
