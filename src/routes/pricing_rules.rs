use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::config::ServerConfig;
use crate::forms::pricing_rules::{AddModifierForm, ToggleRuleForm};
use crate::repository::DieselRepository;
use crate::routes::{base_context, parse_form, redirect, render_template};
use crate::services::ServiceError;
use crate::services::pricing_rules::{
    add_modifier, create_rule, load_rules_page, modify_rule, remove_modifier, remove_rule,
    toggle_rule,
};

fn rules_url(rate_plan_id: i32) -> String {
    format!("/rate-plans/{rate_plan_id}/rules")
}

#[get("/rate-plans/{rate_plan_id}/rules")]
pub async fn show_rules(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let rate_plan_id = path.into_inner();

    match load_rules_page(repo.get_ref(), &user, rate_plan_id) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "rate_plans",
                &server_config.auth_service_url,
            );
            context.insert("plan", &data.plan);
            render_template(&tera, "pricing_rules/index.html", &context)
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
            log::error!("Failed to load rules of rate plan {rate_plan_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/rate-plans/{rate_plan_id}/rules/add")]
pub async fn add_rule(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    let rate_plan_id = path.into_inner();
    let back_url = rules_url(rate_plan_id);

    // Parsed by hand: the weekday multi-select arrives as a repeated field.
    let form = match parse_form(&body) {
        Ok(form) => form,
        Err(err) => {
            FlashMessage::error(format!("Invalid form: {err}")).send();
            return redirect(&back_url);
        }
    };

    match create_rule(repo.get_ref(), &user, rate_plan_id, form) {
        Ok(rule) => {
            FlashMessage::success(format!("Rule \"{}\" added.", rule.name)).send();
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
            log::error!("Failed to create rule on rate plan {rate_plan_id}: {err}");
            FlashMessage::error("Could not create the rule.").send();
            redirect(&back_url)
        }
    }
}

#[post("/rate-plans/{rate_plan_id}/rules/{rule_id}/edit")]
pub async fn edit_rule(
    path: web::Path<(i32, i32)>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    let (rate_plan_id, rule_id) = path.into_inner();
    let back_url = rules_url(rate_plan_id);

    let form = match parse_form(&body) {
        Ok(form) => form,
        Err(err) => {
            FlashMessage::error(format!("Invalid form: {err}")).send();
            return redirect(&back_url);
        }
    };

    match modify_rule(repo.get_ref(), &user, rate_plan_id, rule_id, form) {
        Ok(rule) => {
            FlashMessage::success(format!("Rule \"{}\" updated.", rule.name)).send();
            redirect(&back_url)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Rule or rate plan not found.").send();
            redirect(&back_url)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&back_url)
        }
        Err(err) => {
            log::error!("Failed to update rule {rule_id}: {err}");
            FlashMessage::error("Could not update the rule.").send();
            redirect(&back_url)
        }
    }
}

#[post("/rate-plans/{rate_plan_id}/rules/{rule_id}/toggle")]
pub async fn toggle_rule_enabled(
    path: web::Path<(i32, i32)>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<ToggleRuleForm>,
) -> impl Responder {
    let (rate_plan_id, rule_id) = path.into_inner();
    let back_url = rules_url(rate_plan_id);

    match toggle_rule(repo.get_ref(), &user, rate_plan_id, rule_id, form.into_inner()) {
        Ok(rule) => {
            let state = if rule.enabled { "enabled" } else { "disabled" };
            FlashMessage::success(format!("Rule \"{}\" {state}.", rule.name)).send();
            redirect(&back_url)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Rule or rate plan not found.").send();
            redirect(&back_url)
        }
        Err(err) => {
            log::error!("Failed to toggle rule {rule_id}: {err}");
            FlashMessage::error("Could not toggle the rule.").send();
            redirect(&back_url)
        }
    }
}

#[post("/rate-plans/{rate_plan_id}/rules/{rule_id}/delete")]
pub async fn delete_rule(
    path: web::Path<(i32, i32)>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (rate_plan_id, rule_id) = path.into_inner();
    let back_url = rules_url(rate_plan_id);

    match remove_rule(repo.get_ref(), &user, rate_plan_id, rule_id) {
        Ok(()) => {
            FlashMessage::success("Rule deleted.").send();
            redirect(&back_url)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Rule not found or already deleted.").send();
            redirect(&back_url)
        }
        Err(err) => {
            log::error!("Failed to delete rule {rule_id}: {err}");
            FlashMessage::error("Could not delete the rule.").send();
            redirect(&back_url)
        }
    }
}

#[post("/rate-plans/{rate_plan_id}/rules/{rule_id}/modifiers/add")]
pub async fn add_rule_modifier(
    path: web::Path<(i32, i32)>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<AddModifierForm>,
) -> impl Responder {
    let (rate_plan_id, rule_id) = path.into_inner();
    let back_url = rules_url(rate_plan_id);

    match add_modifier(repo.get_ref(), &user, rate_plan_id, rule_id, form.into_inner()) {
        Ok(_) => {
            FlashMessage::success("Modifier added.").send();
            redirect(&back_url)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Rule or rate plan not found.").send();
            redirect(&back_url)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&back_url)
        }
        Err(err) => {
            log::error!("Failed to add modifier to rule {rule_id}: {err}");
            FlashMessage::error("Could not add the modifier.").send();
            redirect(&back_url)
        }
    }
}

#[post("/rate-plans/{rate_plan_id}/rules/{rule_id}/modifiers/{modifier_id}/delete")]
pub async fn delete_rule_modifier(
    path: web::Path<(i32, i32, i32)>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (rate_plan_id, rule_id, modifier_id) = path.into_inner();
    let back_url = rules_url(rate_plan_id);

    match remove_modifier(repo.get_ref(), &user, rate_plan_id, rule_id, modifier_id) {
        Ok(()) => {
            FlashMessage::success("Modifier removed.").send();
            redirect(&back_url)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Modifier not found or already removed.").send();
            redirect(&back_url)
        }
        Err(err) => {
            log::error!("Failed to remove modifier {modifier_id}: {err}");
            FlashMessage::error("Could not remove the modifier.").send();
            redirect(&back_url)
        }
    }
}
