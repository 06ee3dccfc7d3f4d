use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use account_service::account::errors::DeliveryError;
use account_service::account::models::AccountName;
use account_service::account::models::EmailAddress;
use account_service::account::ports::VerificationMailer;
use account_service::domain::account::service::AccountService;
use account_service::inbound::http::pages::VerificationPages;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryAccountRepository;
use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenService;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const LOGIN_URL: &str = "http://localhost:3000/login";

/// Verification email captured by [`RecordingMailer`]
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub recipient_name: String,
    pub link: String,
}

impl SentEmail {
    /// Token carried in the link's query string
    pub fn token(&self) -> String {
        reqwest::Url::parse(&self.link)
            .expect("Verification link is not a URL")
            .query_pairs()
            .find(|(key, _)| key == "token")
            .map(|(_, value)| value.into_owned())
            .expect("Verification link has no token")
    }
}

/// Mailer double that records requests instead of delivering them
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentEmail>>,
    failure: Option<String>,
}

impl RecordingMailer {
    pub fn failing(cause: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failure: Some(cause.to_string()),
        }
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_to(&self, email: &str) -> SentEmail {
        self.sent()
            .into_iter()
            .rev()
            .find(|sent| sent.to == email)
            .expect("No verification email recorded for address")
    }
}

#[async_trait]
impl VerificationMailer for RecordingMailer {
    async fn send_verification_email(
        &self,
        to: &EmailAddress,
        recipient_name: &AccountName,
        verification_link: &str,
    ) -> Result<(), DeliveryError> {
        if let Some(cause) = &self.failure {
            return Err(DeliveryError::Transport(cause.clone()));
        }

        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            recipient_name: recipient_name.to_string(),
            link: verification_link.to_string(),
        });
        Ok(())
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub repository: Arc<InMemoryAccountRepository>,
    pub mailer: Arc<RecordingMailer>,
    pub token_service: Arc<TokenService>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with_mailer(RecordingMailer::default()).await
    }

    pub async fn spawn_with_mailer(mailer: RecordingMailer) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryAccountRepository::new());
        let mailer = Arc::new(mailer);
        let token_service = Arc::new(TokenService::with_default_ttl(JWT_SECRET));

        let account_service = Arc::new(
            AccountService::new(
                Arc::clone(&repository),
                Arc::clone(&mailer),
                Arc::clone(&token_service),
                address.clone(),
            )
            .with_password_hasher(
                PasswordHasher::with_cost(8, 1, 1).expect("Failed to build password hasher"),
            ),
        );

        let router = create_router(
            account_service,
            Arc::clone(&token_service),
            VerificationPages::new(LOGIN_URL, Duration::from_secs(3)),
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            repository,
            mailer,
            token_service,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    pub async fn signup(&self, name: &str, email: &str, password: &str) -> reqwest::Response {
        self.post("/signup")
            .json(&serde_json::json!({
                "name": name,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/login")
            .json(&serde_json::json!({
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn verify(&self, token: &str) -> reqwest::Response {
        self.get("/verify")
            .query(&[("token", token)])
            .send()
            .await
            .expect("Failed to execute request")
    }
}
