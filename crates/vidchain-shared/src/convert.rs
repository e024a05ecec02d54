//! Conversions between backend wire shapes and caller-facing types.
//!
//! Identifiers, timestamps and token amounts stay arbitrary-precision the
//! whole way through. Only counters and durations are narrowed to `u64`.

use candid::Nat;
use tracing::warn;

use crate::types::{Category, ChannelAnalytics, MediaPayload, Profile, ProfileUpdate, Video};
use crate::wire::{
    ChannelAnalyticsWire, ProfileUpdateWire, ProfileWire, RawMedia, RawVideo, WireInt, WireOpt,
};

/// Map a free-form label onto a category. Never fails; unknown labels are `Other`.
pub fn encode_category(label: &str) -> Category {
    Category::from_label(label)
}

/// Turn a backend video record into a [`Video`].
pub fn normalize_video(raw: RawVideo) -> Video {
    let id = raw.id.0;
    Video {
        duration_secs: narrow(&id, "duration", &raw.duration.0),
        views: narrow(&id, "views", &raw.views.0),
        likes: narrow(&id, "likes", &raw.likes.0),
        dislikes: narrow(&id, "dislikes", &raw.dislikes.0),
        title: raw.title,
        description: raw.description,
        category: raw.category.0,
        channel: raw.channel,
        uploader: raw.uploader,
        timestamp: raw.timestamp.0,
        media: normalize_media(raw.media),
        token_rewards: raw.token_rewards.0,
        is_deleted: raw.is_deleted,
        id,
    }
}

fn normalize_media(raw: RawMedia) -> MediaPayload {
    MediaPayload {
        content: raw.content,
        thumbnail: raw.thumbnail,
        is_short: raw.is_short,
        content_type: raw.content_type,
    }
}

/// Saturate a counter at `u64::MAX`.
fn narrow(video_id: &Nat, field: &'static str, value: &Nat) -> u64 {
    u64::try_from(&value.0).unwrap_or_else(|_| {
        warn!(video_id = %video_id.0, field, value = %value.0, "Counter exceeds u64, saturating");
        u64::MAX
    })
}

pub fn normalize_profile(raw: ProfileWire) -> Profile {
    Profile {
        name: raw.name,
        email: raw.email.into_option(),
        gender: raw.gender.into_option(),
        birthday: raw.birthday.into_option().map(|b| b.0),
        channel_name: raw.channel_name,
        total_views: raw.total_views.0,
        token_balance: raw.token_balance.0,
    }
}

/// Build the `updateProfile` argument.
///
/// Blank strings count as absent, the same as a field that was never filled in.
pub fn encode_profile_update(update: &ProfileUpdate) -> ProfileUpdateWire {
    ProfileUpdateWire {
        name: update.name.clone(),
        email: non_blank(update.email.as_deref()),
        gender: non_blank(update.gender.as_deref()),
        birthday: update.birthday.clone().map(WireInt).into(),
    }
}

fn non_blank(value: Option<&str>) -> WireOpt<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_owned)
        .into()
}

pub fn normalize_analytics(raw: ChannelAnalyticsWire) -> ChannelAnalytics {
    ChannelAnalytics {
        total_views: raw.total_views.0,
        avg_watch_time_secs: raw.avg_watch_time,
        popular_content: raw.popular_content.into_iter().map(normalize_video).collect(),
    }
}
