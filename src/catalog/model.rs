use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SustainabilityScore {
    pub overall: u8,
    pub carbon_footprint: u8,
    pub water_usage: u8,
    pub recyclability: u8,
    pub ethical_sourcing: u8,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Price in whole rupees.
    pub price: u64,
    pub original_price: u64,
    pub category: String,
    pub score: SustainabilityScore,
    pub description: String,
    pub reviews: u32,
    pub rating: f32,
    #[serde(default = "in_stock_default")]
    pub in_stock: bool,
}

fn in_stock_default() -> bool {
    true
}

impl Product {
    /// Discount against the original price, rounded to a whole percent.
    pub fn discount_percent(&self) -> u64 {
        if self.original_price == 0 || self.original_price <= self.price {
            return 0;
        }
        let saved = (self.original_price - self.price) as f64;
        (saved / self.original_price as f64 * 100.0).round() as u64
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Post {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_avatar: String,
    pub content: String,
    #[serde(default)]
    pub product_id: Option<String>,
    pub likes: u32,
    pub comments: u32,
    #[serde(default)]
    pub challenge_id: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub liked: bool,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub participants: u32,
    pub reward: String,
    /// Length in days.
    pub duration: u32,
    pub carbon_saving: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub product_count: u32,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub sustainability_score: u32,
    pub level: String,
    pub badges: Vec<String>,
    pub followers: u32,
    pub following: u32,
    pub total_co2_saved_kg: f64,
    pub monthly_goal_kg: f64,
    pub current_progress_kg: f64,
}

impl UserProfile {
    /// Share of the monthly CO2 goal reached, as a whole percent capped at 100.
    pub fn monthly_progress_percent(&self) -> u32 {
        if self.monthly_goal_kg <= 0.0 {
            return 0;
        }
        let percent = (self.current_progress_kg / self.monthly_goal_kg * 100.0).round();
        percent.clamp(0.0, 100.0) as u32
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub name: String,
    pub avatar: String,
    pub score: u32,
    #[serde(default)]
    pub is_user: bool,
}
