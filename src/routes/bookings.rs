use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::config::ServerConfig;
use crate::forms::bookings::{AddBookingForm, UploadBookingsForm};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::bookings::{
    BookingsQuery, cancel_booking, create_booking, import_bookings, load_bookings,
};

#[get("/bookings")]
pub async fn show_bookings(
    params: web::Query<BookingsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_bookings(repo.get_ref(), &user, params.0) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "bookings",
                &server_config.auth_service_url,
            );
            context.insert("bookings", &data.bookings);
            context.insert("search", &data.search);
            context.insert("status_filter", &data.status);
            context.insert("channel_filter", &data.channel);
            context.insert("search_action", "/bookings");
            render_template(&tera, "bookings/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to list bookings: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/bookings/add")]
pub async fn add_booking(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<AddBookingForm>,
) -> impl Responder {
    match create_booking(repo.get_ref(), &user, form.into_inner()) {
        Ok(booking) => {
            FlashMessage::success(format!(
                "Booking on {} recorded ({} - {}).",
                booking.channel, booking.check_in, booking.check_out
            ))
            .send();
            redirect("/bookings")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/bookings")
        }
        Err(err) => {
            log::error!("Failed to create booking: {err}");
            FlashMessage::error("Could not record the booking.").send();
            redirect("/bookings")
        }
    }
}

#[post("/bookings/{booking_id}/cancel")]
pub async fn cancel_booking_route(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let booking_id = path.into_inner();

    match cancel_booking(repo.get_ref(), &user, booking_id) {
        Ok(booking) => {
            FlashMessage::success(format!("Booking on {} cancelled.", booking.channel)).send();
            redirect("/bookings")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Booking not found.").send();
            redirect("/bookings")
        }
        Err(err) => {
            log::error!("Failed to cancel booking {booking_id}: {err}");
            FlashMessage::error("Could not cancel the booking.").send();
            redirect("/bookings")
        }
    }
}

#[post("/bookings/upload")]
pub async fn upload_bookings(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    MultipartForm(form): MultipartForm<UploadBookingsForm>,
) -> impl Responder {
    match import_bookings(repo.get_ref(), &user, form) {
        Ok(count) => {
            FlashMessage::success(format!("Imported {count} bookings.")).send();
            redirect("/bookings")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/bookings")
        }
        Err(err) => {
            log::error!("Failed to import bookings: {err}");
            FlashMessage::error("Could not import the bookings.").send();
            redirect("/bookings")
        }
    }
}
