use actix_identity::Identity;
use actix_web::{Responder, post, web};
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::redirect;

/// Drop the session identity and hand the user back to the auth service.
#[post("/logout")]
pub async fn logout(
    identity: Option<Identity>,
    server_config: web::Data<CommonServerConfig>,
) -> impl Responder {
    if let Some(identity) = identity {
        identity.logout();
    }
    redirect(&server_config.auth_service_url)
}
