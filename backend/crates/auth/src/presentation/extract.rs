//! Request Extractors

use axum::Json;
use axum::extract::{FromRequest, Request};
use kernel::error::app_error::AppError;
use kernel::validation::{RequiredFields, require_fields};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// JSON body that must carry `T::REQUIRED_FIELDS` before it is decoded.
///
/// Every missing field is reported in one 400 response.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + RequiredFields,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<Value>::from_request(req, state).await?;

        require_fields(&payload, T::REQUIRED_FIELDS)?;

        let value = serde_json::from_value(payload)?;
        Ok(Self(value))
    }
}
