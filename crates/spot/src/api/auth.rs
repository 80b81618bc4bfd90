use crate::client::SpotClient;
use crate::error::{SpotError, SpotResult};
use crate::models::{JwtResponse, LoginRequest, StudentIdLoginRequest};
use crate::session::AuthSession;
use tracing::info;

pub struct AuthApi<'a> {
    client: &'a SpotClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a SpotClient) -> Self {
        Self { client }
    }

    /// Logs in with email and password and stores the resulting session.
    pub async fn login(&self, email: &str, password: &str) -> SpotResult<AuthSession> {
        let request = LoginRequest::new(email, password);
        let jwt: JwtResponse = self.client.post("/auth/login", &request).await?;
        self.install(jwt)
    }

    /// Logs in with the student's physical id card number.
    pub async fn login_with_student_id(
        &self,
        student_physical_id: &str,
        password: &str,
    ) -> SpotResult<AuthSession> {
        let request = StudentIdLoginRequest {
            student_physical_id: student_physical_id.trim().to_string(),
            password: password.trim().to_string(),
        };
        let jwt: JwtResponse = self.client.post("/auth/login/student-id", &request).await?;
        self.install(jwt)
    }

    /// Whether an account already uses this email.
    pub async fn check_email(&self, email: &str) -> SpotResult<bool> {
        self.client
            .get_query(
                "/auth/check-email",
                &[("email", email.trim().to_lowercase())],
            )
            .await
    }

    /// The backend is stateless, so logging out only drops local credentials.
    pub fn logout(&self) {
        self.client.clear_session();
        info!("Logged out");
    }

    fn install(&self, jwt: JwtResponse) -> SpotResult<AuthSession> {
        let session = AuthSession::from_jwt(&jwt).map_err(|message| SpotError::Decode { message })?;
        self.client.set_session(session.clone())?;
        info!(user_id = session.user_id, role = %session.role, "Logged in");
        Ok(session)
    }
}
