//! Actix-web extractor for the gateway-supplied user identity.

use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::{web, FromRequest, HttpRequest, HttpResponse, ResponseError};
use std::future::{ready, Ready};
use uuid::Uuid;

use super::GatewayToken;
use crate::config::{GATEWAY_TOKEN_HEADER, USER_ID_HEADER};
use crate::error::ErrorResponse;

/// Authentication error for the extractor.
#[derive(Debug)]
pub struct AuthError {
    message: String,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for AuthError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::UNAUTHORIZED).json(ErrorResponse {
            error: "UNAUTHORIZED".to_string(),
            message: self.message.clone(),
        })
    }
}

/// Extractor carrying the authenticated user identity.
///
/// Use this in handlers that operate on user-owned resources:
/// ```ignore
/// async fn handler(user: AuthenticatedUser) -> impl Responder {
///     // user.id is the gateway-verified identity
/// }
/// ```
///
/// The identity is rejected before any store access when the header is
/// missing or malformed, or when the gateway token check fails.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub id: Uuid,
}

impl FromRequest for AuthenticatedUser {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // When a gateway token is configured, require it on every request.
        // Constant-time comparison prevents timing attacks.
        if let Some(expected) = req.app_data::<web::Data<GatewayToken>>()
            && expected.is_configured()
        {
            let provided = req
                .headers()
                .get(GATEWAY_TOKEN_HEADER)
                .and_then(|v| v.to_str().ok());

            match provided {
                Some(token) if expected.verify(token) => {}
                Some(_) => {
                    return ready(Err(AuthError {
                        message: "Invalid gateway token".to_string(),
                    }));
                }
                None => {
                    return ready(Err(AuthError {
                        message: format!(
                            "Missing gateway token. Provide {} header.",
                            GATEWAY_TOKEN_HEADER
                        ),
                    }));
                }
            }
        }

        let header = req
            .headers()
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok());

        match header {
            Some(value) => match Uuid::parse_str(value) {
                Ok(id) => ready(Ok(AuthenticatedUser { id })),
                Err(_) => ready(Err(AuthError {
                    message: format!("{} header is not a valid UUID", USER_ID_HEADER),
                })),
            },
            None => ready(Err(AuthError {
                message: format!(
                    "Missing caller identity. Provide {} header.",
                    USER_ID_HEADER
                ),
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_rt::test]
    async fn test_extracts_valid_user_id() {
        let user_id = Uuid::new_v4();
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, user_id.to_string()))
            .to_http_request();

        let user = AuthenticatedUser::from_request(&req, &mut Payload::None)
            .await
            .expect("extraction should succeed");
        assert_eq!(user.id, user_id);
    }

    #[actix_rt::test]
    async fn test_rejects_missing_header() {
        let req = TestRequest::default().to_http_request();
        let result = AuthenticatedUser::from_request(&req, &mut Payload::None).await;
        assert!(result.is_err());
    }

    #[actix_rt::test]
    async fn test_rejects_malformed_user_id() {
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, "not-a-uuid"))
            .to_http_request();
        let result = AuthenticatedUser::from_request(&req, &mut Payload::None).await;
        assert!(result.is_err());
    }

    #[actix_rt::test]
    async fn test_requires_gateway_token_when_configured() {
        let user_id = Uuid::new_v4();
        let token = web::Data::new(GatewayToken::new(Some("gw-secret".to_string())));

        let req = TestRequest::default()
            .app_data(token.clone())
            .insert_header((USER_ID_HEADER, user_id.to_string()))
            .to_http_request();
        assert!(AuthenticatedUser::from_request(&req, &mut Payload::None)
            .await
            .is_err());

        let req = TestRequest::default()
            .app_data(token)
            .insert_header((USER_ID_HEADER, user_id.to_string()))
            .insert_header((GATEWAY_TOKEN_HEADER, "gw-secret"))
            .to_http_request();
        assert!(AuthenticatedUser::from_request(&req, &mut Payload::None)
            .await
            .is_ok());
    }
}
