use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};

use super::app_error::AppError;

/// JSON body extractor whose rejection is a 400 with the usual
/// `{"message"}` body. The stock extractor answers 422 for a body that
/// deserializes but misses a field, which is not what the API promises.
#[derive(Debug)]
pub(crate) struct ApiJson<T>(pub(crate) T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::extract::{FromRequest, Request};
    use axum::http::{StatusCode, header};
    use axum::response::IntoResponse;

    use super::ApiJson;
    use crate::presentation::app_error::AppError;
    use crate::presentation::handlers::auth::RegisterDto;

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .expect("request must build")
    }

    #[tokio::test]
    async fn body_missing_a_field_is_rejected_with_bad_request() {
        let request = json_request(r#"{"username":"alice","email":"a@x.com"}"#);

        let err = ApiJson::<RegisterDto>::from_request(request, &())
            .await
            .expect_err("missing password must be rejected");

        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn syntactically_invalid_body_is_rejected_with_bad_request() {
        let request = json_request("not json");

        let err = ApiJson::<RegisterDto>::from_request(request, &())
            .await
            .expect_err("garbage must be rejected");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn complete_body_deserializes() {
        let request =
            json_request(r#"{"username":"alice","email":"a@x.com","password":"pw"}"#);

        let ApiJson(dto) = ApiJson::<RegisterDto>::from_request(request, &())
            .await
            .expect("complete body must deserialize");
        assert_eq!(dto.username, "alice");
    }
}
