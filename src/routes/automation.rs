use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, parse_form, redirect, render_template};
use crate::services::ServiceError;
use crate::services::automation::{load_automation_page, save_automation_settings};

fn automation_url(rate_plan_id: i32) -> String {
    format!("/rate-plans/{rate_plan_id}/automation")
}

#[get("/rate-plans/{rate_plan_id}/automation")]
pub async fn show_automation(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let rate_plan_id = path.into_inner();

    match load_automation_page(repo.get_ref(), &user, rate_plan_id) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "rate_plans",
                &server_config.auth_service_url,
            );
            context.insert("plan", &data.plan);
            context.insert("settings", &data.settings);
            render_template(&tera, "automation/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Rate plan not found.").send();
            redirect("/rate-plans")
        }
        Err(err) => {
            log::error!("Failed to load automation settings of plan {rate_plan_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/rate-plans/{rate_plan_id}/automation")]
pub async fn save_automation(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    let rate_plan_id = path.into_inner();
    let back_url = automation_url(rate_plan_id);

    // Parsed by hand: occupancy ladder rows arrive as repeated fields.
    let form = match parse_form(&body) {
        Ok(form) => form,
        Err(err) => {
            FlashMessage::error(format!("Invalid form: {err}")).send();
            return redirect(&back_url);
        }
    };

    match save_automation_settings(repo.get_ref(), &user, rate_plan_id, form) {
        Ok(_) => {
            FlashMessage::success("Automation settings saved.").send();
            redirect(&back_url)
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
            redirect(&back_url)
        }
        Err(err) => {
            log::error!("Failed to save automation settings of plan {rate_plan_id}: {err}");
            FlashMessage::error("Could not save the automation settings.").send();
            redirect(&back_url)
        }
    }
}
