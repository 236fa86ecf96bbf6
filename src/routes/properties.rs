use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::config::ServerConfig;
use crate::forms::properties::{AddPropertyForm, EditPropertyForm};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::properties::{
    PropertiesQuery, create_property, load_properties, modify_property, remove_property,
};

#[get("/properties")]
pub async fn show_properties(
    params: web::Query<PropertiesQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_properties(repo.get_ref(), &user, params.0) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "properties",
                &server_config.auth_service_url,
            );
            context.insert("properties", &data.properties);
            context.insert("search", &data.search);
            context.insert("search_action", "/properties");
            render_template(&tera, "properties/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to list properties: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/properties/add")]
pub async fn add_property(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<AddPropertyForm>,
) -> impl Responder {
    match create_property(repo.get_ref(), &user, form.into_inner()) {
        Ok(property) => {
            FlashMessage::success(format!("Property \"{}\" created.", property.name)).send();
            redirect("/properties")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/properties")
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("A property with this name already exists.").send();
            redirect("/properties")
        }
        Err(err) => {
            log::error!("Failed to create property: {err}");
            FlashMessage::error("Could not create the property.").send();
            redirect("/properties")
        }
    }
}

#[post("/properties/{property_id}/edit")]
pub async fn edit_property(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<EditPropertyForm>,
) -> impl Responder {
    let property_id = path.into_inner();

    match modify_property(repo.get_ref(), &user, property_id, form.into_inner()) {
        Ok(property) => {
            FlashMessage::success(format!("Property \"{}\" updated.", property.name)).send();
            redirect("/properties")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Property not found.").send();
            redirect("/properties")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/properties")
        }
        Err(err) => {
            log::error!("Failed to update property {property_id}: {err}");
            FlashMessage::error("Could not update the property.").send();
            redirect("/properties")
        }
    }
}

#[post("/properties/{property_id}/delete")]
pub async fn delete_property(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let property_id = path.into_inner();

    match remove_property(repo.get_ref(), &user, property_id) {
        Ok(()) => {
            FlashMessage::success("Property deleted.").send();
            redirect("/properties")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Property not found or already deleted.").send();
            redirect("/properties")
        }
        Err(err) => {
            log::error!("Failed to delete property {property_id}: {err}");
            FlashMessage::error("Could not delete the property.").send();
            redirect("/properties")
        }
    }
}
