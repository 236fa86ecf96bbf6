use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::config::ServerConfig;
use crate::forms::rate_plans::SetRatePlanStatusForm;
use crate::repository::DieselRepository;
use crate::routes::{base_context, parse_form, redirect, render_template};
use crate::services::ServiceError;
use crate::services::rate_plans::{
    RatePlansQuery, change_rate_plan_status, create_rate_plan, load_rate_plan, load_rate_plans,
    modify_rate_plan, remove_rate_plan,
};

#[get("/rate-plans")]
pub async fn show_rate_plans(
    params: web::Query<RatePlansQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_rate_plans(repo.get_ref(), &user, params.0) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "rate_plans",
                &server_config.auth_service_url,
            );
            context.insert("rate_plans", &data.rate_plans);
            context.insert("search", &data.search);
            context.insert("status_filter", &data.status);
            context.insert("search_action", "/rate-plans");
            render_template(&tera, "rate_plans/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to list rate plans: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/rate-plans/{rate_plan_id}")]
pub async fn show_rate_plan(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let rate_plan_id = path.into_inner();

    match load_rate_plan(repo.get_ref(), &user, rate_plan_id) {
        Ok(plan) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "rate_plans",
                &server_config.auth_service_url,
            );
            context.insert("plan", &plan);
            render_template(&tera, "rate_plans/detail.html", &context)
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
            log::error!("Failed to load rate plan {rate_plan_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/rate-plans/add")]
pub async fn add_rate_plan(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    // Parsed by hand: the weekend-day multi-select arrives as a repeated
    // field.
    let form = match parse_form(&body) {
        Ok(form) => form,
        Err(err) => {
            FlashMessage::error(format!("Invalid form: {err}")).send();
            return redirect("/rate-plans");
        }
    };

    match create_rate_plan(repo.get_ref(), &user, form) {
        Ok(plan) => {
            FlashMessage::success(format!("Rate plan \"{}\" created.", plan.name)).send();
            redirect(&format!("/rate-plans/{}", plan.id))
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/rate-plans")
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("A rate plan with this name already exists.").send();
            redirect("/rate-plans")
        }
        Err(err) => {
            log::error!("Failed to create rate plan: {err}");
            FlashMessage::error("Could not create the rate plan.").send();
            redirect("/rate-plans")
        }
    }
}

#[post("/rate-plans/{rate_plan_id}/edit")]
pub async fn edit_rate_plan(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    let rate_plan_id = path.into_inner();
    let detail_url = format!("/rate-plans/{rate_plan_id}");

    let form = match parse_form(&body) {
        Ok(form) => form,
        Err(err) => {
            FlashMessage::error(format!("Invalid form: {err}")).send();
            return redirect(&detail_url);
        }
    };

    match modify_rate_plan(repo.get_ref(), &user, rate_plan_id, form) {
        Ok(plan) => {
            FlashMessage::success(format!("Rate plan \"{}\" updated.", plan.name)).send();
            redirect(&detail_url)
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
            redirect(&detail_url)
        }
        Err(err) => {
            log::error!("Failed to update rate plan {rate_plan_id}: {err}");
            FlashMessage::error("Could not update the rate plan.").send();
            redirect(&detail_url)
        }
    }
}

#[post("/rate-plans/{rate_plan_id}/status")]
pub async fn set_rate_plan_status(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<SetRatePlanStatusForm>,
) -> impl Responder {
    let rate_plan_id = path.into_inner();
    let detail_url = format!("/rate-plans/{rate_plan_id}");

    match change_rate_plan_status(repo.get_ref(), &user, rate_plan_id, form.into_inner()) {
        Ok(plan) => {
            FlashMessage::success(format!(
                "Rate plan \"{}\" is now {}.",
                plan.name,
                plan.status.as_str()
            ))
            .send();
            redirect(&detail_url)
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
            redirect(&detail_url)
        }
        Err(err) => {
            log::error!("Failed to change status of rate plan {rate_plan_id}: {err}");
            FlashMessage::error("Could not change the rate plan status.").send();
            redirect(&detail_url)
        }
    }
}

#[post("/rate-plans/{rate_plan_id}/delete")]
pub async fn delete_rate_plan(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let rate_plan_id = path.into_inner();

    match remove_rate_plan(repo.get_ref(), &user, rate_plan_id) {
        Ok(()) => {
            FlashMessage::success("Rate plan deleted.").send();
            redirect("/rate-plans")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Rate plan not found or already deleted.").send();
            redirect("/rate-plans")
        }
        Err(err) => {
            log::error!("Failed to delete rate plan {rate_plan_id}: {err}");
            FlashMessage::error("Could not delete the rate plan.").send();
            redirect("/rate-plans")
        }
    }
}
