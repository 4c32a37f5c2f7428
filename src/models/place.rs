use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Separator used when `plans` holds an ordered list rather than free text
const PLANS_SEPARATOR: char = '\n';

/// Which list a place belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "traveled")]
    Traveled,
    #[serde(rename = "wantToTravel")]
    WantToTravel,
}

impl Category {
    /// Wire spelling used in the REST query string and payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Traveled => "traveled",
            Category::WantToTravel => "wantToTravel",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Traveled => write!(f, "Traveled to"),
            Category::WantToTravel => write!(f, "Want to travel"),
        }
    }
}

/// A recorded place, as served by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub id: i32,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub plans: Option<String>,
    pub category: Option<Category>,
    pub hotels: Option<String>,
    pub restaurants: Option<String>,
    pub image_uri: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl Place {
    /// The plans field split into its ordered entries, empty lines dropped.
    pub fn plans_list(&self) -> Vec<&str> {
        self.plans
            .as_deref()
            .map(|p| {
                p.split(PLANS_SEPARATOR)
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Payload for creating or replacing a place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceDraft {
    pub title: String,
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub plans: Option<String>,
    pub category: Option<Category>,
    pub hotels: Option<String>,
    pub restaurants: Option<String>,
    pub image_uri: Option<String>,
    pub address: Option<String>,
}

/// A resolved map position.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}
