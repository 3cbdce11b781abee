use actix_web::{HttpResponse, Responder, get, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::activities::show_day;
use crate::services::analytics::show_analytics;

fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => HttpResponse::Unauthorized().finish(),
        ServiceError::NotFound => HttpResponse::NotFound().finish(),
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            HttpResponse::BadRequest().body(message)
        }
        ServiceError::Unavailable => HttpResponse::ServiceUnavailable().finish(),
    }
}

#[get("/analytics/{date}")]
pub async fn api_analytics(
    date: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match show_analytics(&date, &user, repo.get_ref()) {
        Ok(snapshot) => HttpResponse::Ok().json(snapshot),
        Err(err) => error_response(err),
    }
}

#[get("/activities/{date}")]
pub async fn api_activities(
    date: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match show_day(&date, &user, repo.get_ref()) {
        Ok(day) => HttpResponse::Ok().json(day),
        Err(err) => error_response(err),
    }
}
