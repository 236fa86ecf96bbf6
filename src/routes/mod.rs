use actix_web::http::header;
use actix_web::{HttpResponse, web};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use serde::Serialize;
use tera::{Context, Tera};

use crate::auth::AuthenticatedUser;

pub mod api;
pub mod automation;
pub mod bookings;
pub mod calendar;
pub mod main;
pub mod pricing_rules;
pub mod properties;
pub mod rate_plans;

/// One flash message prepared for the template.
#[derive(Debug, Serialize)]
struct Alert {
    level: &'static str,
    message: String,
}

/// Build the context shared by every rendered page.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    active_menu: &str,
    auth_service_url: &str,
) -> Context {
    let alerts: Vec<Alert> = flash_messages
        .iter()
        .map(|message| Alert {
            level: match message.level() {
                Level::Debug => "debug",
                Level::Info => "info",
                Level::Success => "success",
                Level::Warning => "warning",
                Level::Error => "error",
            },
            message: message.content().to_string(),
        })
        .collect();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", user);
    context.insert("active_menu", active_menu);
    context.insert("auth_service_url", auth_service_url);
    context
}

/// Issue a 303 redirect to `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Render a template, logging and masking any template failure.
pub fn render_template(tera: &Tera, name: &str, context: &Context) -> HttpResponse {
    match tera.render(name, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template {name}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Parse an urlencoded body that may carry repeated fields (multi-selects),
/// which `web::Form` cannot represent.
pub fn parse_form<T: serde::de::DeserializeOwned>(
    body: &web::Bytes,
) -> Result<T, serde_html_form::de::Error> {
    serde_html_form::from_bytes(body)
}

/// Deserialize an optional form field, mapping empty strings to `None`.
pub fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    use serde::Deserialize;

    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(trimmed) => trimmed
            .parse::<T>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
