//! Public lead-capture endpoints: course enquiries, counselling enquiries
//! and college applications. All three create a record with the initial
//! status of their lifecycle; only the admin console mutates status later.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::{AppError, AppResult, FieldError};
use crate::models::enquiry::COUNSELLING_SOURCES;
use crate::models::{CollegeApplication, CounsellingEnquiry, Enquiry, ObjectId};
use crate::state::AppState;

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateEnquiryBody {
    mobile: Option<String>,
    name: Option<String>,
    email: Option<String>,
    description: Option<String>,
    course_id: Option<String>,
}

/// Mandatory: mobile. The optional course id is format-checked strictly,
/// like the listing path.
async fn create_enquiry(
    State(state): State<AppState>,
    Json(body): Json<CreateEnquiryBody>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let Some(mobile) = non_empty(body.mobile.as_deref()) else {
        return Err(AppError::Validation(vec![FieldError::new(
            "mobile",
            "Mobile number is required",
        )]));
    };

    let course_id: Option<ObjectId> = match non_empty(body.course_id.as_deref()) {
        Some(raw) => Some(raw.parse().map_err(|_| {
            AppError::Validation(vec![FieldError::new(
                "courseId",
                "Invalid courseId format (24-char hex)",
            )])
        })?),
        None => None,
    };

    let enquiry = Enquiry::create(
        state.db(),
        mobile,
        non_empty(body.name.as_deref()),
        non_empty(body.email.as_deref()),
        non_empty(body.description.as_deref()),
        course_id.as_ref(),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": {
                "id": enquiry.id,
                "mobile": enquiry.mobile,
                "name": enquiry.name,
                "email": enquiry.email,
                "description": enquiry.description,
                "courseId": enquiry.course_id,
                "status": enquiry.status,
                "createdAt": enquiry.created_at,
            },
        })),
    ))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CounsellingBody {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    course_interest: Option<String>,
    current_status: Option<String>,
    message: Option<String>,
    college_id: Option<ObjectId>,
    source: Option<String>,
}

async fn submit_counselling_enquiry(
    State(state): State<AppState>,
    Json(body): Json<CounsellingBody>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let (Some(name), Some(email), Some(phone)) = (
        non_empty(body.name.as_deref()),
        non_empty(body.email.as_deref()),
        non_empty(body.phone.as_deref()),
    ) else {
        return Err(AppError::BadRequest(
            "name, email and phone are required".to_string(),
        ));
    };

    let source = non_empty(body.source.as_deref())
        .filter(|s| COUNSELLING_SOURCES.contains(s))
        .unwrap_or("cta");

    CounsellingEnquiry::create(
        state.db(),
        name,
        email,
        phone,
        non_empty(body.course_interest.as_deref()),
        non_empty(body.current_status.as_deref()),
        non_empty(body.message.as_deref()),
        body.college_id.as_ref(),
        source,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": "Enquiry submitted successfully" })),
    ))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApplicationBody {
    college_id: Option<ObjectId>,
    email: Option<String>,
    phone: Option<String>,
    name: Option<String>,
}

async fn submit_college_application(
    State(state): State<AppState>,
    Json(body): Json<ApplicationBody>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let (Some(college_id), Some(email), Some(phone)) = (
        body.college_id.as_ref(),
        non_empty(body.email.as_deref()),
        non_empty(body.phone.as_deref()),
    ) else {
        return Err(AppError::BadRequest(
            "collegeId, email and phone are required".to_string(),
        ));
    };

    CollegeApplication::create(
        state.db(),
        college_id,
        email,
        phone,
        non_empty(body.name.as_deref()),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": "Application submitted successfully" })),
    ))
}

/// Create the public lead-capture router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/enquiries", post(create_enquiry))
        .route("/api/counselling-enquiry", post(submit_counselling_enquiry))
        .route("/api/college-apply", post(submit_college_application))
}
