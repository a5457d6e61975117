//! HTTP Basic authentication.
//!
//! [`Authenticated`] decodes the `Authorization` header and resolves it
//! through the [`CredentialVerifier`](crate::domain::ports::CredentialVerifier)
//! held in [`HttpState`]. Handlers then demand a role with
//! [`Authenticated::require`].

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::{BasicCredentials, Error, Principal, Role};
use crate::inbound::http::state::HttpState;

const BASIC_SCHEME: &str = "Basic ";

/// Principal authenticated for the current request.
#[derive(Debug, Clone)]
pub struct Authenticated(Principal);

impl Authenticated {
    /// Return the principal when it holds `role`, otherwise `403 Forbidden`.
    pub fn require(self, role: Role) -> Result<Principal, Error> {
        if self.0.has_role(role) {
            Ok(self.0)
        } else {
            debug!(username = %self.0.username(), role = %role, "principal lacks role");
            Err(Error::forbidden(format!("role {role} required")))
        }
    }

    pub fn principal(&self) -> &Principal {
        &self.0
    }
}

/// Parse an `Authorization: Basic ...` header value.
pub(crate) fn parse_basic_header(value: &str) -> Result<BasicCredentials, Error> {
    let malformed = || Error::unauthorized("malformed authorization header");

    let encoded = value
        .strip_prefix(BASIC_SCHEME)
        .ok_or_else(malformed)?
        .trim();
    let decoded = STANDARD.decode(encoded).map_err(|_| malformed())?;
    let decoded = String::from_utf8(decoded).map_err(|_| malformed())?;
    let (username, password) = decoded.split_once(':').ok_or_else(malformed)?;

    BasicCredentials::try_from_parts(username, password).map_err(|_| malformed())
}

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let header = req
            .headers()
            .get(actix_web::http::header::AUTHORIZATION)
            .map(|value| value.to_str().map(str::to_owned));
        let state = req.app_data::<web::Data<HttpState>>().cloned();

        Box::pin(async move {
            let state =
                state.ok_or_else(|| Error::internal("HTTP state missing from application"))?;
            let header = match header {
                None => return Err(Error::unauthorized("authentication required")),
                Some(Err(_)) => return Err(Error::unauthorized("malformed authorization header")),
                Some(Ok(header)) => header,
            };
            let credentials = parse_basic_header(&header)?;
            state.credentials.verify(&credentials).await.map(Authenticated)
        })
    }
}
