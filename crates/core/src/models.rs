use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{require, ValidationError};

pub const GREETING: &str = "Hello! I'm Krishi Mitra, your AI farming assistant. How can I help you today? You can ask me about crops, weather, pest control, or any farming-related questions.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub triggers: Vec<String>,
    pub response: String,
}

impl Rule {
    pub fn new(id: &str, triggers: &[&str], response: &str) -> Self {
        Self {
            id: id.to_string(),
            triggers: triggers.iter().map(|t| t.to_string()).collect(),
            response: response.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Sender::User, content.into())
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(Sender::Bot, content.into())
    }

    fn new(sender: Sender, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            content,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    NotAvailable,
}

impl Availability {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "available" | "yes" => Some(Self::Available),
            "not_available" | "not-available" | "notavailable" | "no" => {
                Some(Self::NotAvailable)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Labour {
    pub id: String,
    pub name: String,
    pub mobile_number: String,
    pub availability: Availability,
    pub skills: Vec<String>,
    pub experience: String,
    pub daily_wage: f64,
}

impl Labour {
    /// Name matches case-insensitively, mobile number by plain substring.
    pub fn matches_search(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.to_lowercase())
            || self.mobile_number.contains(term)
    }
}

/// Raw labour form input, as typed by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewLabour {
    pub name: String,
    pub mobile_number: String,
    pub availability: Option<Availability>,
    pub skills: String,
    pub experience: String,
    pub daily_wage: String,
}

impl NewLabour {
    pub fn into_labour(self, id: String) -> Result<Labour, ValidationError> {
        require(&self.name, "name")?;
        require(&self.mobile_number, "mobile_number")?;

        let skills = self
            .skills
            .split(',')
            .map(str::trim)
            .filter(|skill| !skill.is_empty())
            .map(ToString::to_string)
            .collect();

        Ok(Labour {
            id,
            name: self.name.trim().to_string(),
            mobile_number: self.mobile_number.trim().to_string(),
            availability: self.availability.unwrap_or(Availability::Available),
            skills,
            experience: self.experience.trim().to_string(),
            daily_wage: parse_leading_number(&self.daily_wage),
        })
    }
}

/// Reads the longest numeric prefix ("500/day" is 500). Anything without a
/// leading number, or that is not finite, is 0.
pub fn parse_leading_number(raw: &str) -> f64 {
    let trimmed = raw.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    trimmed[..end]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropPlan {
    pub id: String,
    pub crop: String,
    pub area_acres: f64,
    pub yield_outlook: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCropPlan {
    pub crop: String,
    pub area_acres: f64,
    pub yield_outlook: Option<String>,
}

impl NewCropPlan {
    pub fn into_plan(self, id: String) -> Result<CropPlan, ValidationError> {
        require(&self.crop, "crop")?;
        Ok(CropPlan {
            id,
            crop: self.crop.trim().to_string(),
            area_acres: self.area_acres.max(0.0),
            yield_outlook: self.yield_outlook.filter(|v| !v.trim().is_empty()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmerProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub farm_size_acres: f64,
    pub primary_crops: Vec<String>,
    pub experience_years: u32,
    pub bio: String,
}

/// Partial profile edit; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub farm_size_acres: Option<f64>,
    pub primary_crops: Option<Vec<String>>,
    pub experience_years: Option<u32>,
    pub bio: Option<String>,
}

impl FarmerProfile {
    pub fn apply(&self, update: ProfileUpdate) -> Result<Self, ValidationError> {
        if let Some(name) = update.name.as_deref() {
            require(name, "name")?;
        }

        let current = self.clone();
        Ok(Self {
            name: update.name.map_or(current.name, |v| v.trim().to_string()),
            email: update.email.unwrap_or(current.email),
            phone: update.phone.unwrap_or(current.phone),
            location: update.location.unwrap_or(current.location),
            farm_size_acres: update.farm_size_acres.unwrap_or(current.farm_size_acres),
            primary_crops: update.primary_crops.unwrap_or(current.primary_crops),
            experience_years: update.experience_years.unwrap_or(current.experience_years),
            bio: update.bio.unwrap_or(current.bio),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityPost {
    pub id: String,
    pub author: String,
    pub location: String,
    pub content: String,
    pub category: String,
    pub likes: u32,
    pub comments: u32,
    pub liked: bool,
    pub posted_at: DateTime<Utc>,
}

impl CommunityPost {
    pub fn toggled_like(&self) -> Self {
        let mut post = self.clone();
        if post.liked {
            post.likes = post.likes.saturating_sub(1);
        } else {
            post.likes += 1;
        }
        post.liked = !post.liked;
        post
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPost {
    pub author: String,
    pub location: String,
    pub content: String,
    pub category: String,
}

impl NewPost {
    pub fn into_post(self, id: String) -> Result<CommunityPost, ValidationError> {
        require(&self.content, "content")?;
        Ok(CommunityPost {
            id,
            author: self.author,
            location: self.location,
            content: self.content.trim().to_string(),
            category: if self.category.trim().is_empty() {
                "General".to_string()
            } else {
                self.category
            },
            likes: 0,
            comments: 0,
            liked: false,
            posted_at: Utc::now(),
        })
    }
}
