use crate::actions::Action;
use crate::client::Client;
use crate::errors::ClientError;
use crate::models::{AuthUser, LoginRequest, Session, SignupRequest};
use crate::transport::{ApiRequest, ApiResponse};
use serde_json::Value;
use tracing::{info, warn};

const SOMETHING_WENT_WRONG: &str = "Something went wrong!";

/// The auth endpoints may answer 200 with `success: false`; treat that the
/// same as a rejected status.
fn accepted_body(response: &ApiResponse) -> Result<Value, ClientError> {
    let body: Value = response.decode(SOMETHING_WENT_WRONG)?;
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or(SOMETHING_WENT_WRONG);
        return Err(ClientError::rejected(response.status, message));
    }
    Ok(body)
}

impl Client {
    pub async fn signup(&self, request: &SignupRequest) -> Result<(), ClientError> {
        let http = ApiRequest::post("/api/auth/signup").json(serde_json::to_value(request)?);
        let response = self.transport().send(http).await?;
        accepted_body(&response).inspect_err(|err| warn!("signup failed: {err}"))?;
        info!(username = %request.username, "signed up");
        Ok(())
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<Session, ClientError> {
        self.store().dispatch(Action::LoginStarted).await;

        let outcome = async {
            let http = ApiRequest::post("/api/auth/login").json(serde_json::to_value(request)?);
            let response = self.transport().send(http).await?;
            let body = accepted_body(&response)?;
            Ok::<AuthUser, ClientError>(serde_json::from_value(body)?)
        }
        .await;

        match outcome {
            Ok(user) => {
                let session = Session::from(&user);
                info!(user_id = %user.id, "logged in");
                self.store().dispatch(Action::LoggedIn(user)).await;
                Ok(session)
            }
            Err(err) => {
                warn!("login failed: {err}");
                self.store().dispatch(Action::LoginFailed(err.to_string())).await;
                Err(err)
            }
        }
    }

    pub async fn logout(&self) {
        self.store().dispatch(Action::LoggedOut).await;
    }
}
