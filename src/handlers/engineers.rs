use std::collections::BTreeMap;

use actix_web::{web, HttpResponse};
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{Availability, EngineerProfile, JoinNetworkRequest};
use crate::state::AppState;

/// Handle the join-network form submission.
pub async fn join_network(
    data: web::Json<JoinNetworkRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let join_req = data.into_inner();
    let pool = &state.pool;

    let missing = join_req.missing_fields();
    if !missing.is_empty() {
        let mut errors = BTreeMap::new();
        for field in &missing {
            let message = if *field == "termsAgreed" {
                "You must agree to the terms and conditions.".to_string()
            } else {
                format!("{field} is required.")
            };
            errors.insert((*field).to_string(), message);
        }
        return Err(ApiError::Validation {
            message: format!("Missing required fields: {}", missing.join(", ")),
            errors: Some(errors),
        });
    }

    // the normalized form is what gets stored and what uniqueness is
    // checked against
    let email = join_req
        .email
        .as_deref()
        .unwrap_or_default()
        .trim()
        .to_lowercase();

    let existing =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(1) FROM engineer_profiles WHERE email = ?")
            .bind(&email)
            .fetch_one(pool)
            .await
            .map_err(|err| {
                log::error!("Error checking for existing profile: {err}");
                ApiError::Internal("Server Error saving profile".to_string())
            })?;
    if existing > 0 {
        return Err(ApiError::Conflict(
            "Profile with this email already exists.".to_string(),
        ));
    }

    let profile = EngineerProfile {
        id: Uuid::new_v4().to_string(),
        first_name: join_req.first_name.clone().unwrap_or_default(),
        last_name: join_req.last_name.clone().unwrap_or_default(),
        email,
        phone: join_req.phone.clone(),
        company: join_req.company.clone(),
        service_type: join_req.service_type.clone(),
        experience: join_req.experience.clone(),
        location: join_req.location.clone(),
        specialties: join_req.specialty_list(),
        terms_agreed: join_req.terms_agreed,
        marketing_opt_in: join_req.marketing_opt_in,
        avatar_url: None,
        bio: None,
        certifications: Vec::new(),
        hourly_rate: None,
        rating: 0.0,
        total_projects: 0,
        availability: Availability::default(),
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    if let Err(errors) = profile.validate() {
        return Err(ApiError::fields(errors));
    }

    let specialties_json =
        serde_json::to_string(&profile.specialties).unwrap_or_else(|_| "[]".to_string());
    let certifications_json =
        serde_json::to_string(&profile.certifications).unwrap_or_else(|_| "[]".to_string());

    sqlx::query(
        "INSERT INTO engineer_profiles \
         (id, first_name, last_name, email, phone, company, service_type, experience, location, \
          specialties, terms_agreed, marketing_opt_in, avatar_url, bio, certifications, \
          hourly_rate, rating, total_projects, availability, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&profile.id)
    .bind(&profile.first_name)
    .bind(&profile.last_name)
    .bind(&profile.email)
    .bind(&profile.phone)
    .bind(&profile.company)
    .bind(&profile.service_type)
    .bind(&profile.experience)
    .bind(&profile.location)
    .bind(&specialties_json)
    .bind(profile.terms_agreed)
    .bind(profile.marketing_opt_in)
    .bind(&profile.avatar_url)
    .bind(&profile.bio)
    .bind(&certifications_json)
    .bind(profile.hourly_rate)
    .bind(profile.rating)
    .bind(profile.total_projects)
    .bind(profile.availability.as_str())
    .bind(&profile.created_at)
    .execute(pool)
    .await
    .map_err(|err| {
        log::error!("Error saving engineer profile: {err}");
        ApiError::Internal("Server Error saving profile".to_string())
    })?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Successfully joined the network!",
        "profile": profile
    })))
}

/// Fetch a single profile for the profile view.
pub async fn get_engineer_profile(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    if Uuid::parse_str(&id).is_err() {
        return Err(ApiError::validation("Invalid profile ID format"));
    }

    let row = sqlx::query(
        "SELECT id, first_name, last_name, email, phone, company, service_type, experience, \
         location, specialties, terms_agreed, marketing_opt_in, avatar_url, bio, certifications, \
         hourly_rate, rating, total_projects, availability, created_at \
         FROM engineer_profiles WHERE id = ? LIMIT 1",
    )
    .bind(&id)
    .fetch_optional(&state.pool)
    .await
    .map_err(|err| {
        log::error!("Error fetching engineer profile: {err}");
        ApiError::Internal("Server Error fetching profile".to_string())
    })?;

    match row {
        Some(row) => Ok(HttpResponse::Ok().json(EngineerProfile::from_row(&row))),
        None => Err(ApiError::NotFound("Engineer profile not found".to_string())),
    }
}
