use serde::{Deserialize, Serialize};

/// One tracked job application. Held only in process memory for the life of
/// the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: String,
    pub role: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub status: String,
    /// ISO date (YYYY-MM-DD) of when the application was filed.
    pub date_applied: String,
}

/// Incoming record fields. Carries no `id` — the store assigns one on
/// insert, so a caller-supplied id is ignored by deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct NewJobApplication {
    pub role: String,
    pub company: String,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default = "default_salary")]
    pub salary: String,
    #[serde(default = "default_status")]
    pub status: String,
    /// Defaults to the server's current date when omitted.
    #[serde(default)]
    pub date_applied: Option<String>,
}

fn default_location() -> String {
    "Remote".to_string()
}

fn default_salary() -> String {
    "N/A".to_string()
}

fn default_status() -> String {
    "Applied".to_string()
}
