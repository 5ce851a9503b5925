//! Domain models: user profile, tracked vocabulary, game content, and
//! daily-challenge shapes. Serialized names match the persisted JSON layout
//! (camelCase), so hydrating data written by earlier app versions keeps working.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cached profile of the signed-in user. Replaced whole on re-storage;
/// partial updates go through `SessionManager::update_user_data`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

/// Partial profile update: every field optional, merged over the current one.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl UserProfile {
    /// Merge a partial update over this profile. `id` is never patched.
    pub fn merged(&self, updates: &UserProfileUpdate) -> UserProfile {
        let mut out = self.clone();
        if let Some(email) = &updates.email {
            out.email = email.clone();
        }
        if let Some(first) = &updates.first_name {
            out.first_name = first.clone();
        }
        if let Some(last) = &updates.last_name {
            out.last_name = last.clone();
        }
        if let Some(img) = &updates.profile_image {
            out.profile_image = Some(img.clone());
        }
        out
    }
}

/// A vocabulary entry the user added to a personal collection.
/// `word`/`definition` are copied from the catalog at insertion time and
/// not re-synced if the catalog changes later.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedItem {
    pub id: String,
    pub word: String,
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    pub date_marked: DateTime<Utc>,
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_review_date: Option<DateTime<Utc>>,
}

/// Insertion payload; timestamps and progress are filled in by the tracker.
#[derive(Clone, Debug)]
pub struct NewTrackedItem {
    pub id: String,
    pub word: String,
    pub definition: String,
    pub audio_url: Option<String>,
}

/// One multiple-choice word of the vocabulary task.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VocabWord {
    pub word: String,
    pub meaning: String,
    pub options: Vec<String>,
    pub correct: String,
    pub difficulty: Difficulty,
}

/// One fill-in-the-blank question of the grammar quiz.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarQuestion {
    pub id: String,
    pub sentence: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

/// One prompt of the speaking-practice placeholder.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpeakingExercise {
    pub id: String,
    pub text: String,
    pub tip: String,
    pub difficulty: String,
    pub category: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeType {
    Vocabulary,
    Grammar,
    Speaking,
    Listening,
    Writing,
    Reading,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeRequirements {
    pub total: u32,
    pub completed: u32,
}

/// One generated daily challenge as shown on the challenges tab.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyChallenge {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub challenge_type: ChallengeType,
    pub difficulty: Difficulty,
    pub requirements: ChallengeRequirements,
    pub points: u32,
    pub xp_reward: u32,
    pub streak_bonus: u32,
    pub completed: bool,
    pub deadline: DateTime<Utc>,
}

/// Persisted when a mini-game run reaches its terminal state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRecord {
    pub score: u32,
    pub completed_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_streak: Option<u32>,
    pub completed: bool,
}

/// Navigation targets the core can ask the embedding UI to move to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    SignIn,
    Home,
    Challenges { completed_challenge_id: String },
}
