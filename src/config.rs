use serde::Deserialize;

/// What to do when a Google sign-in presents an email that already belongs
/// to an existing account: attach the Google subject to that row, or refuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailLinking {
    Link,
    Reject,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub secure: bool,
    pub inactivity_ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpoonacularConfig {
    pub api_key: String,
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub session: SessionConfig,
    pub google: Option<GoogleConfig>,
    pub spoonacular: SpoonacularConfig,
    pub email_linking: EmailLinking,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;

        let session = SessionConfig {
            secure: std::env::var("SESSION_SECURE")
                .map(|v| v == "true")
                .unwrap_or(false),
            inactivity_ttl_minutes: std::env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24 * 7),
        };

        // Google sign-in stays optional; without credentials the routes
        // report themselves unconfigured instead of failing startup.
        let google = match (
            std::env::var("GOOGLE_CLIENT_ID"),
            std::env::var("GOOGLE_CLIENT_SECRET"),
        ) {
            (Ok(client_id), Ok(client_secret)) => Some(GoogleConfig {
                client_id,
                client_secret,
                redirect_url: std::env::var("GOOGLE_REDIRECT_URL").unwrap_or_else(|_| {
                    "http://localhost:8080/api/v1/auth/google/callback".into()
                }),
            }),
            _ => None,
        };

        let spoonacular = SpoonacularConfig {
            api_key: std::env::var("SPOONACULAR_API_KEY")?,
            base_url: std::env::var("SPOONACULAR_BASE_URL")
                .unwrap_or_else(|_| "https://api.spoonacular.com".into()),
        };

        let email_linking = match std::env::var("OAUTH_EMAIL_LINKING").as_deref() {
            Ok("link") => EmailLinking::Link,
            _ => EmailLinking::Reject,
        };

        Ok(Self {
            database_url,
            session,
            google,
            spoonacular,
            email_linking,
        })
    }
}
