use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::Local;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use serde::Deserialize;
use tera::Tera;

use crate::domain::activity::SUGGESTED_CATEGORIES;
use crate::domain::types::ActivityDate;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::activities::show_day as show_day_service;
use crate::services::analytics::show_analytics as show_analytics_service;

#[derive(Deserialize)]
struct DayQueryParams {
    date: Option<String>,
}

fn today() -> String {
    ActivityDate::from(Local::now().date_naive()).to_string()
}

#[get("/")]
pub async fn show_day(
    params: web::Query<DayQueryParams>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let date = params.into_inner().date.unwrap_or_else(today);

    match show_day_service(&date, &user, repo.get_ref()) {
        Ok(day) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "day",
                &server_config.auth_service_url,
            );
            context.insert("day", &day);
            context.insert("categories", &SUGGESTED_CATEGORIES);
            render_template(&tera, "main/index.html", &context)
        }
        Err(ServiceError::TypeConstraint(message)) => {
            FlashMessage::error(message).send();
            redirect("/")
        }
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(ServiceError::Unavailable) => HttpResponse::ServiceUnavailable().finish(),
        Err(err) => {
            log::error!("Failed to render day page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/analytics/{date}")]
pub async fn show_analytics(
    date: web::Path<String>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let date = date.into_inner();

    match show_analytics_service(&date, &user, repo.get_ref()) {
        Ok(snapshot) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "analytics",
                &server_config.auth_service_url,
            );
            context.insert("date", &date);
            context.insert("analytics", &snapshot);
            render_template(&tera, "analytics/index.html", &context)
        }
        Err(ServiceError::TypeConstraint(message)) => {
            FlashMessage::error(message).send();
            redirect("/")
        }
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(ServiceError::Unavailable) => HttpResponse::ServiceUnavailable().finish(),
        Err(err) => {
            log::error!("Failed to render analytics page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
