//! HTTP routes.
//!
//! Every JSON response uses the envelope the web client expects:
//! `{ data, message? }` on success, `{ error, message }` on failure.

use axum::{
    extract::{FromRequestParts, Query, State},
    http::{request::Parts, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use ghostagotchi_domain::{
    DomainError, OwnerId, Pet, PetId, PetName, Profile, Username,
};

use crate::app::App;
use crate::use_cases::{
    AdoptPetError, CareAction, CareForPetError, ChatOutcome, FetchPetError, LeaderboardView,
    SetUsernameError, TalkToPetError,
};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/pet", get(get_pet).post(create_pet))
        .route("/api/pet/feed", post(feed_pet))
        .route("/api/pet/play", post(play_pet))
        .route("/api/chat", post(chat_with_pet))
        .route("/api/leaderboard", get(get_leaderboard))
        .route("/api/profile", post(update_profile))
        .fallback(unknown_route)
        .method_not_allowed_fallback(method_not_allowed)
}

async fn health() -> &'static str {
    "OK"
}

async fn unknown_route() -> ApiError {
    ApiError::NotFound("Resource")
}

async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed(format!("Method {} not allowed", method))
}

// =============================================================================
// Authentication
// =============================================================================

const USER_ID_HEADER: &str = "x-user-id";

/// Caller identity taken from the `X-User-Id` header.
///
/// The engine treats the header value as an opaque owner token; session
/// verification happens upstream of this service.
pub struct CurrentOwner(pub OwnerId);

impl<S> FromRequestParts<S> for CurrentOwner
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|token| OwnerId::new(token).ok())
            .map(CurrentOwner)
            .ok_or(ApiError::Unauthorized)
    }
}

// =============================================================================
// Pet
// =============================================================================

async fn get_pet(
    State(app): State<Arc<App>>,
    owner: CurrentOwner,
) -> Result<Json<SuccessBody<PetDto>>, ApiError> {
    let owned = app
        .use_cases
        .pet
        .fetch
        .execute(&owner.0)
        .await
        .map_err(|e| match e {
            FetchPetError::PetNotFound => ApiError::NotFound("Pet"),
            other => internal("Failed to process pet request", other),
        })?;

    Ok(Json(SuccessBody::new(pet_dto(owned.pet, owned.username))))
}

#[derive(Debug, Deserialize)]
struct CreatePetRequest {
    name: Option<String>,
}

async fn create_pet(
    State(app): State<Arc<App>>,
    owner: CurrentOwner,
    Json(body): Json<CreatePetRequest>,
) -> Result<(StatusCode, Json<SuccessBody<PetDto>>), ApiError> {
    let name = PetName::new(require_field(body.name, "name")?)?;

    let pet = app
        .use_cases
        .pet
        .adopt
        .execute(owner.0, name)
        .await
        .map_err(|e| match e {
            AdoptPetError::AlreadyAdopted => ApiError::Conflict(e.to_string()),
            other => internal("Failed to process pet request", other),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(SuccessBody::with_message(
            pet_dto(pet, None),
            "Pet created successfully",
        )),
    ))
}

async fn feed_pet(
    State(app): State<Arc<App>>,
    owner: CurrentOwner,
) -> Result<Json<SuccessBody<CareDto>>, ApiError> {
    care_for_pet(&app, owner, CareAction::Feed, "Failed to feed pet").await
}

async fn play_pet(
    State(app): State<Arc<App>>,
    owner: CurrentOwner,
) -> Result<Json<SuccessBody<CareDto>>, ApiError> {
    care_for_pet(&app, owner, CareAction::Play, "Failed to play with pet").await
}

async fn care_for_pet(
    app: &App,
    owner: CurrentOwner,
    action: CareAction,
    failure: &'static str,
) -> Result<Json<SuccessBody<CareDto>>, ApiError> {
    let cared = app
        .use_cases
        .pet
        .care
        .execute(&owner.0, action)
        .await
        .map_err(|e| match e {
            CareForPetError::PetNotFound => ApiError::NotFound("Pet"),
            other => internal(failure, other),
        })?;

    let message = care_message(action, cared.outcome.leveled_up, cared.pet.level);
    let dto = CareDto {
        leveled_up: cared.outcome.leveled_up,
        xp_gained: cared.outcome.xp_gained,
        pet: pet_dto(cared.pet, None),
    };
    Ok(Json(SuccessBody::with_message(dto, message)))
}

/// Celebration line for the care response envelope.
fn care_message(action: CareAction, leveled_up: bool, level: u32) -> String {
    let verb = match action {
        CareAction::Feed => "Fed",
        CareAction::Play => "Played",
    };
    if leveled_up {
        format!("{verb}! Your ghost leveled up to {level}! 🎉")
    } else {
        format!("{verb}! Your ghost is happy! 👻")
    }
}

// =============================================================================
// Chat
// =============================================================================

#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: Option<String>,
}

async fn chat_with_pet(
    State(app): State<Arc<App>>,
    owner: CurrentOwner,
    Json(body): Json<ChatRequest>,
) -> Result<Json<SuccessBody<ChatReplyDto>>, ApiError> {
    let message = require_field(body.message, "message")?;

    let outcome = app
        .use_cases
        .chat
        .execute(&owner.0, &message)
        .await
        .map_err(|e| match e {
            TalkToPetError::Validation(message) => ApiError::Validation(message),
            TalkToPetError::PetNotFound => ApiError::NotFound("Pet"),
            other => internal("Failed to process chat message", other),
        })?;

    let dto = match outcome {
        ChatOutcome::Succeeded {
            reply,
            pet_name,
            tokens_used,
        } => ChatReplyDto {
            reply,
            pet_name,
            tokens_used: Some(tokens_used),
            error: None,
        },
        ChatOutcome::Degraded {
            reply,
            pet_name,
            error,
        } => ChatReplyDto {
            reply,
            pet_name,
            tokens_used: None,
            error: Some(error),
        },
        ChatOutcome::TimedOut => return Err(ApiError::Timeout),
    };

    Ok(Json(SuccessBody::new(dto)))
}

// =============================================================================
// Leaderboard
// =============================================================================

#[derive(Debug, Deserialize)]
struct LeaderboardQuery {
    limit: Option<String>,
}

async fn get_leaderboard(
    State(app): State<Arc<App>>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<SuccessBody<LeaderboardDto>>, ApiError> {
    // Malformed limits fall back to the default instead of erroring.
    let limit = query
        .limit
        .as_deref()
        .and_then(|raw| raw.parse::<i64>().ok());

    let view = app
        .use_cases
        .leaderboard
        .execute(limit)
        .await
        .map_err(|e| internal("Failed to fetch leaderboard", e))?;

    Ok(Json(SuccessBody::new(leaderboard_dto(view))))
}

// =============================================================================
// Profile
// =============================================================================

#[derive(Debug, Deserialize)]
struct UpdateProfileRequest {
    username: Option<String>,
}

async fn update_profile(
    State(app): State<Arc<App>>,
    owner: CurrentOwner,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<SuccessBody<ProfileDto>>, ApiError> {
    let username = Username::new(require_field(body.username, "username")?)?;

    let profile = app
        .use_cases
        .profile
        .execute(owner.0, username)
        .await
        .map_err(|e| match e {
            SetUsernameError::UsernameTaken => ApiError::Conflict(e.to_string()),
            other => internal("Failed to update profile", other),
        })?;

    Ok(Json(SuccessBody::with_message(
        profile_dto(profile),
        "Profile updated successfully",
    )))
}

// =============================================================================
// Envelopes and DTOs
// =============================================================================

#[derive(Debug, Serialize)]
struct SuccessBody<T> {
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl<T> SuccessBody<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            message: None,
        }
    }

    fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PetDto {
    id: PetId,
    owner_id: OwnerId,
    name: PetName,
    level: u32,
    experience: u32,
    hunger: u8,
    mood: u8,
    created_at: DateTime<Utc>,
    last_fed_at: Option<DateTime<Utc>>,
    last_played_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile: Option<PetProfileDto>,
}

#[derive(Debug, Serialize)]
struct PetProfileDto {
    username: Username,
}

fn pet_dto(pet: Pet, username: Option<Username>) -> PetDto {
    PetDto {
        id: pet.id,
        owner_id: pet.owner_id,
        name: pet.name,
        level: pet.level,
        experience: pet.experience,
        hunger: pet.hunger.value(),
        mood: pet.mood.value(),
        created_at: pet.created_at,
        last_fed_at: pet.last_fed_at,
        last_played_at: pet.last_played_at,
        profile: username.map(|username| PetProfileDto { username }),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CareDto {
    pet: PetDto,
    leveled_up: bool,
    xp_gained: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatReplyDto {
    reply: String,
    pet_name: PetName,
    #[serde(skip_serializing_if = "Option::is_none")]
    tokens_used: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LeaderboardDto {
    leaderboard: Vec<LeaderboardRowDto>,
    total: u32,
    last_updated: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LeaderboardRowDto {
    rank: u32,
    ghost_name: String,
    level: u32,
    experience: u32,
    owner: String,
    age: String,
}

fn leaderboard_dto(view: LeaderboardView) -> LeaderboardDto {
    LeaderboardDto {
        leaderboard: view
            .rows
            .into_iter()
            .map(|row| LeaderboardRowDto {
                rank: row.rank,
                ghost_name: row.ghost_name,
                level: row.level,
                experience: row.experience,
                owner: row.owner,
                age: row.age,
            })
            .collect(),
        total: view.total,
        last_updated: view.last_updated,
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileDto {
    id: OwnerId,
    username: Username,
    updated_at: DateTime<Utc>,
}

fn profile_dto(profile: Profile) -> ProfileDto {
    ProfileDto {
        id: profile.owner_id,
        username: profile.username,
        updated_at: profile.updated_at,
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Absent, null, and empty-string fields are all treated as missing.
fn require_field(value: Option<String>, field: &'static str) -> Result<String, ApiError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ApiError::Validation(format!(
            "Missing required fields: {field}"
        ))),
    }
}

/// Logged detail stays in the variant; only `public` reaches the client.
fn internal(public: &'static str, detail: impl std::fmt::Display) -> ApiError {
    ApiError::Internal {
        public,
        detail: detail.to_string(),
    }
}

#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    Unauthorized,
    NotFound(&'static str),
    MethodNotAllowed(String),
    Timeout,
    Conflict(String),
    Internal {
        public: &'static str,
        detail: String,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, "Bad Request", message),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Unauthorized",
                "Authentication required".to_string(),
            ),
            ApiError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                "Not Found",
                format!("{resource} not found"),
            ),
            ApiError::MethodNotAllowed(message) => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method Not Allowed",
                message,
            ),
            ApiError::Timeout => (
                StatusCode::REQUEST_TIMEOUT,
                "Request Timeout",
                "The ghost is taking too long to respond. Please try again.".to_string(),
            ),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, "Conflict", message),
            ApiError::Internal { public, detail } => {
                tracing::error!(error = %detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    public.to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error, message })).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(message)
            | DomainError::Constraint(message)
            | DomainError::Parse(message) => ApiError::Validation(message),
            DomainError::NotFound { entity_type, .. } => ApiError::NotFound(entity_type),
        }
    }
}
