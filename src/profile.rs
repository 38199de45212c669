use serde::{Deserialize, Serialize};

/// Who the widget speaks for. Shown in the header.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub full_name: String,
    pub title: String,
    pub logo: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Mua Sevim".to_string(),
            full_name: "Muhammed Sevim".to_string(),
            title: "Computer Engineer".to_string(),
            logo: "MUA".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SocialLinks {
    pub github: String,
    pub linkedin: String,
    pub email: String,
}

impl Default for SocialLinks {
    fn default() -> Self {
        Self {
            github: "https://github.com/muasevim".to_string(),
            linkedin: "https://linkedin.com/in/muasevim".to_string(),
            email: "hello@muasevim.com".to_string(),
        }
    }
}
