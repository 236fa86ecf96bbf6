use std::future::{Future, Ready, ready};
use std::pin::Pin;

use actix_identity::{Identity, IdentityExt};
use actix_web::body::EitherBody;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::error::ErrorUnauthorized;
use actix_web::http::header;
use actix_web::{Error, FromRequest, HttpRequest, HttpResponse, web};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::config::ServerConfig;

/// User roles issued by the auth service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Superadmin,
    Admin,
    Supervisor,
    Client,
}

/// Actions a route or service may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ViewDashboard,
    ViewCalendar,
    ManageRatePlans,
    ManageRules,
    ManageAutomation,
    ManageBookings,
    ManageProperties,
}

impl Role {
    /// Capability table: the single place that says what each role may do.
    pub fn allows(self, capability: Capability) -> bool {
        use Capability::*;

        match self {
            Role::Superadmin => true,
            Role::Admin => !matches!(capability, ManageProperties),
            Role::Supervisor => {
                matches!(capability, ViewDashboard | ViewCalendar | ManageBookings)
            }
            Role::Client => matches!(capability, ViewCalendar),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Superadmin => "superadmin",
            Role::Admin => "admin",
            Role::Supervisor => "supervisor",
            Role::Client => "client",
        }
    }
}

/// Claims decoded from the identity cookie issued by the auth service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Subject identifier assigned by the auth service.
    pub sub: String,
    /// Email address of the user.
    pub email: String,
    /// Display name of the user.
    pub name: String,
    /// Property the user belongs to.
    pub property_id: i32,
    /// Role used for capability checks.
    pub role: Role,
    /// Expiry timestamp of the token.
    pub exp: usize,
}

impl AuthenticatedUser {
    /// Whether this user's role grants `capability`.
    pub fn can(&self, capability: Capability) -> bool {
        self.role.allows(capability)
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let user = Identity::from_request(req, payload)
            .into_inner()
            .ok()
            .and_then(|identity| identity.id().ok())
            .and_then(|token| {
                let config = req.app_data::<web::Data<ServerConfig>>()?;
                decode::<AuthenticatedUser>(
                    &token,
                    &DecodingKey::from_secret(config.secret.as_bytes()),
                    &Validation::default(),
                )
                .ok()
                .map(|data| data.claims)
            });

        ready(user.ok_or_else(|| ErrorUnauthorized("authentication required")))
    }
}

/// Sends anonymous visitors to the auth service instead of returning 401 pages.
pub struct RedirectUnauthorized;

impl<S, B> Transform<S, ServiceRequest> for RedirectUnauthorized
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RedirectUnauthorizedMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RedirectUnauthorizedMiddleware { service }))
    }
}

pub struct RedirectUnauthorizedMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RedirectUnauthorizedMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let anonymous = req
            .get_identity()
            .and_then(|identity| identity.id())
            .is_err();

        if anonymous {
            if let Some(config) = req.app_data::<web::Data<ServerConfig>>() {
                let login_url = config.auth_service_url.clone();
                let (request, _payload) = req.into_parts();
                let response = HttpResponse::SeeOther()
                    .insert_header((header::LOCATION, login_url))
                    .finish()
                    .map_into_right_body();
                return Box::pin(ready(Ok(ServiceResponse::new(request, response))));
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(|res| res.map_into_left_body()) })
    }
}
