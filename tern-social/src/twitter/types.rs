use serde::{Deserialize, Serialize};

/// A tweet as returned by the v1.1 write endpoints.
///
/// Calls made with `trim_user=true` get a user object reduced to its id, so
/// everything beyond `id` and `text` is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Status {
    pub id: i64,
    pub text: String,

    #[serde(default)]
    pub id_str: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub user: Option<TwitterUser>,
    #[serde(default)]
    pub retweeted: Option<bool>,
    #[serde(default)]
    pub favorited: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwitterUser {
    pub id: i64,
    #[serde(default)]
    pub screen_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub following: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectMessage {
    pub id: i64,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub recipient_screen_name: Option<String>,
    #[serde(default)]
    pub sender_screen_name: Option<String>,
}
