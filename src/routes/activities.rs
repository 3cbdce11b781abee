use actix_web::{HttpRequest, HttpResponse, Responder, post, web};
use actix_web_flash_messages::FlashMessage;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::redirect;

use crate::forms::activities::{
    AddActivityForm, AddActivityFormPayload, DeleteActivityForm, DeleteActivityFormPayload,
    UpdateActivityForm,
};
use crate::repository::DieselRepository;
use crate::routes::day_url;
use crate::services::ServiceError;
use crate::services::activities::{
    add_activity as add_activity_service, delete_activity as delete_activity_service,
    update_activity as update_activity_service,
};

fn referer(request: &HttpRequest) -> String {
    request
        .headers()
        .get("referer")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("/")
        .to_string()
}

#[post("/activities")]
pub async fn add_activity(
    request: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddActivityForm>,
) -> impl Responder {
    let payload: AddActivityFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(&referer(&request));
        }
    };
    let redirect_to = day_url(payload.date);

    match add_activity_service(payload, &user, repo.get_ref()) {
        Ok(_) => FlashMessage::success("Activity added.").send(),
        Err(ServiceError::Unauthorized) => return HttpResponse::Unauthorized().finish(),
        Err(ServiceError::Form(message)) | Err(ServiceError::TypeConstraint(message)) => {
            FlashMessage::error(message).send()
        }
        Err(_) => FlashMessage::error("Failed to create activity.").send(),
    }

    redirect(&redirect_to)
}

#[post("/activities/{activity_id}/update")]
pub async fn update_activity(
    request: HttpRequest,
    activity_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<UpdateActivityForm>,
) -> impl Responder {
    let redirect_to = referer(&request);

    let payload = match form.into_payload(activity_id.into_inner()) {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(&redirect_to);
        }
    };

    match update_activity_service(payload, &user, repo.get_ref()) {
        Ok(activity) => {
            FlashMessage::success("Activity updated.").send();
            return redirect(&day_url(activity.date));
        }
        Err(ServiceError::Unauthorized) => return HttpResponse::Unauthorized().finish(),
        Err(ServiceError::NotFound) => FlashMessage::error("Activity not found.").send(),
        Err(ServiceError::Form(message)) | Err(ServiceError::TypeConstraint(message)) => {
            FlashMessage::error(message).send()
        }
        Err(_) => FlashMessage::error("Failed to update activity.").send(),
    }

    redirect(&redirect_to)
}

#[post("/activities/{activity_id}/delete")]
pub async fn delete_activity(
    request: HttpRequest,
    activity_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let redirect_to = referer(&request);

    let form = DeleteActivityForm {
        activity_id: activity_id.into_inner(),
    };
    let payload: DeleteActivityFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(&redirect_to);
        }
    };

    match delete_activity_service(payload, &user, repo.get_ref()) {
        Ok(activity) => {
            FlashMessage::success("Activity deleted.").send();
            return redirect(&day_url(activity.date));
        }
        Err(ServiceError::Unauthorized) => return HttpResponse::Unauthorized().finish(),
        Err(ServiceError::NotFound) => FlashMessage::error("Activity not found.").send(),
        Err(ServiceError::Form(message)) | Err(ServiceError::TypeConstraint(message)) => {
            FlashMessage::error(message).send()
        }
        Err(_) => FlashMessage::error("Failed to delete activity.").send(),
    }

    redirect(&redirect_to)
}
