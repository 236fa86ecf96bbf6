use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::calendar::{CalendarQuery, build_rate_calendar};

#[get("/rate-plans/{rate_plan_id}/calendar")]
pub async fn show_calendar(
    path: web::Path<i32>,
    params: web::Query<CalendarQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let rate_plan_id = path.into_inner();
    let today = chrono::Local::now().date_naive();

    match build_rate_calendar(repo.get_ref(), &user, rate_plan_id, params.0, today) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "calendar",
                &server_config.auth_service_url,
            );
            context.insert("plan", &data.plan);
            context.insert("entries", &data.entries);
            context.insert("start", &data.start);
            context.insert("end", &data.end);
            render_template(&tera, "calendar/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Rate plan not found.").send();
            redirect("/rate-plans")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&format!("/rate-plans/{rate_plan_id}/calendar"))
        }
        Err(err) => {
            log::error!("Failed to build calendar of rate plan {rate_plan_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
