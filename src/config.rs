/// Runtime configuration shared with request handlers.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HMAC secret used to verify auth tokens.
    pub secret: String,
    /// Login page of the external auth service.
    pub auth_service_url: String,
}
