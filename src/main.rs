use std::env;

use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use dotenvy::dotenv;
use tera::Tera;

use rateboard::auth::RedirectUnauthorized;
use rateboard::config::ServerConfig;
use rateboard::db::establish_connection_pool;
use rateboard::repository::DieselRepository;
use rateboard::routes::api::{api_v1_availability, api_v1_calendar};
use rateboard::routes::automation::{save_automation, show_automation};
use rateboard::routes::bookings::{
    add_booking, cancel_booking_route, show_bookings, upload_bookings,
};
use rateboard::routes::calendar::show_calendar;
use rateboard::routes::main::{logout, not_assigned, show_index};
use rateboard::routes::pricing_rules::{
    add_rule, add_rule_modifier, delete_rule, delete_rule_modifier, edit_rule, show_rules,
    toggle_rule_enabled,
};
use rateboard::routes::properties::{
    add_property, delete_property, edit_property, show_properties,
};
use rateboard::routes::rate_plans::{
    add_rate_plan, delete_rate_plan, edit_rate_plan, set_rate_plan_status, show_rate_plan,
    show_rate_plans,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let database_url = env::var("DATABASE_URL").unwrap_or("app.db".to_string());
    let port = env::var("PORT").unwrap_or("8080".to_string());
    let port = port.parse::<u16>().unwrap_or(8080);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());

    let secret = env::var("SECRET_KEY");
    let secret_key = match &secret {
        Ok(key) => Key::from(key.as_bytes()),
        Err(_) => Key::generate(),
    };

    let auth_service_url = env::var("AUTH_SERVICE_URL");
    let auth_service_url = match auth_service_url {
        Ok(auth_service_url) => auth_service_url,
        Err(_) => {
            log::error!("AUTH_SERVICE_URL environment variable not set");
            std::process::exit(1);
        }
    };

    let server_config = ServerConfig {
        secret: secret.unwrap_or_default(),
        auth_service_url,
    };

    let domain = env::var("DOMAIN").unwrap_or("localhost".to_string());

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = match Tera::new("templates/**/*") {
        Ok(t) => t,
        Err(e) => {
            log::error!("Parsing error(s): {e}");
            std::process::exit(1);
        }
    };

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{domain}")))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized)
                    .service(show_index)
                    .service(not_assigned)
                    .service(show_rate_plans)
                    .service(add_rate_plan)
                    .service(show_rate_plan)
                    .service(edit_rate_plan)
                    .service(set_rate_plan_status)
                    .service(delete_rate_plan)
                    .service(show_rules)
                    .service(add_rule)
                    .service(edit_rule)
                    .service(toggle_rule_enabled)
                    .service(delete_rule)
                    .service(add_rule_modifier)
                    .service(delete_rule_modifier)
                    .service(show_automation)
                    .service(save_automation)
                    .service(show_calendar)
                    .service(show_bookings)
                    .service(add_booking)
                    .service(cancel_booking_route)
                    .service(upload_bookings)
                    .service(show_properties)
                    .service(add_property)
                    .service(edit_property)
                    .service(delete_property)
                    .service(api_v1_calendar)
                    .service(api_v1_availability)
                    .service(logout),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}
