use bytes::Bytes;
use candid::{Int, Nat, Principal};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::constants::NANOS_PER_SEC;
use crate::wire::{int_text, nat_text, principal_text};

/// Backend video identifier. Wider than any fixed-width integer on the ledger side.
pub type VideoId = Nat;

/// Token amounts (balances, stakes, rewards).
pub type TokenAmount = Nat;

/// Content category. Exactly one tag, no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    LongForm,
    Short,
    Entertainment,
    Education,
    Gaming,
    Music,
    Technology,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::LongForm,
        Category::Short,
        Category::Entertainment,
        Category::Education,
        Category::Gaming,
        Category::Music,
        Category::Technology,
        Category::Other,
    ];

    /// Variant tag as it appears on the wire.
    pub fn label(&self) -> &'static str {
        match self {
            Self::LongForm => "LongForm",
            Self::Short => "Short",
            Self::Entertainment => "Entertainment",
            Self::Education => "Education",
            Self::Gaming => "Gaming",
            Self::Music => "Music",
            Self::Technology => "Technology",
            Self::Other => "Other",
        }
    }

    /// Total mapping from a label; anything unrecognised is [`Category::Other`].
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == label)
            .unwrap_or(Category::Other)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Category {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Binary media attached to a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaPayload {
    // payload bytes are never echoed back out
    #[serde(skip)]
    pub content: Bytes,
    #[serde(skip)]
    pub thumbnail: Bytes,
    pub is_short: bool,
    pub content_type: String,
}

/// A video as seen by callers.
///
/// Every copy is a snapshot of the ledger; it goes stale as soon as the
/// next mutating call lands.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    #[serde(with = "nat_text")]
    pub id: VideoId,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub channel: String,
    #[serde(with = "principal_text")]
    pub uploader: Principal,
    /// Nanoseconds since the Unix epoch, as stamped by the ledger.
    #[serde(with = "int_text")]
    pub timestamp: Int,
    pub duration_secs: u64,
    pub media: MediaPayload,
    pub views: u64,
    pub likes: u64,
    pub dislikes: u64,
    #[serde(with = "nat_text")]
    pub token_rewards: TokenAmount,
    pub is_deleted: bool,
}

impl Video {
    /// Ledger timestamp as wall-clock time, if it fits in `i64` nanoseconds.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let nanos = i64::try_from(&self.timestamp.0).ok()?;
        DateTime::from_timestamp(
            nanos.div_euclid(NANOS_PER_SEC),
            nanos.rem_euclid(NANOS_PER_SEC) as u32,
        )
    }
}

/// A user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub email: Option<String>,
    pub gender: Option<String>,
    /// Seconds since the Unix epoch.
    #[serde(with = "int_text::option")]
    pub birthday: Option<Int>,
    pub channel_name: String,
    #[serde(with = "nat_text")]
    pub total_views: Nat,
    #[serde(with = "nat_text")]
    pub token_balance: TokenAmount,
}

/// Fields a caller may change on their own profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub birthday: Option<Int>,
}

/// Everything the backend needs to register a new video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadVideo {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub channel: String,
    pub duration_secs: u64,
    pub media: MediaPayload,
    /// Lowercase hex SHA-256 of `media.content`.
    pub content_hash: String,
}

/// Per-channel statistics for the calling user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelAnalytics {
    #[serde(with = "nat_text")]
    pub total_views: Nat,
    pub avg_watch_time_secs: f64,
    pub popular_content: Vec<Video>,
}
