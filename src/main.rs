use std::env;
use std::io;

use actix_identity::IdentityMiddleware;
use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::Key;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pushkind_common::db::establish_connection_pool;
use tera::Tera;

use pushkind_timelog::db::enable_wal;
use pushkind_timelog::models::config::ServerConfig;
use pushkind_timelog::repository::DieselRepository;
use pushkind_timelog::routes::activities::{add_activity, delete_activity, update_activity};
use pushkind_timelog::routes::api::{api_activities, api_analytics};
use pushkind_timelog::routes::auth::logout;
use pushkind_timelog::routes::main::{show_analytics, show_day};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

fn startup_error(message: impl std::fmt::Display) -> io::Error {
    log::error!("{message}");
    io::Error::other(message.to_string())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
    let server_config = ServerConfig::load(&app_env)
        .map_err(|e| startup_error(format!("Failed to load configuration: {e}")))?;

    let pool = establish_connection_pool(&server_config.database_url)
        .map_err(|e| startup_error(format!("Failed to establish database pool: {e:?}")))?;
    enable_wal(&pool).map_err(|e| startup_error(format!("Failed to enable WAL: {e}")))?;
    {
        let mut conn = pool
            .get()
            .map_err(|e| startup_error(format!("Failed to get database connection: {e}")))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| startup_error(format!("Failed to run migrations: {e}")))?;
    }
    let repo = DieselRepository::new(pool);

    let tera = Tera::new(&format!("{}/**/*", server_config.templates_dir))
        .map_err(|e| startup_error(format!("Failed to parse templates: {e}")))?;

    let secret_key = Key::try_from(server_config.secret.as_bytes())
        .map_err(|e| startup_error(format!("Invalid session secret: {e}")))?;

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let common_config = server_config.common();
    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false)
                    .cookie_domain(Some(server_config.domain.clone()))
                    .build(),
            )
            .wrap(Logger::default())
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(common_config.clone()))
            .app_data(web::Data::new(tera.clone()))
            .service(web::scope("/api").service(api_analytics).service(api_activities))
            .service(show_day)
            .service(show_analytics)
            .service(add_activity)
            .service(update_activity)
            .service(delete_activity)
            .service(logout)
    })
    .bind(bind_address)?
    .run()
    .await
}
