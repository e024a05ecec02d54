//! The actor binding seam.
//!
//! [`ActorBinding`] has one method per backend canister method. Arguments
//! and replies use the wire shapes from [`vidchain_shared::wire`]. The outer
//! `Result` separates "the call never completed" ([`TransportError`]) from
//! whatever the backend answered, which stays inside [`WireResult`].

use async_trait::async_trait;

use vidchain_shared::wire::{
    ChannelAnalyticsWire, ProfileUpdateWire, ProfileWire, RawVideo, UploadVideoWire, WireCategory,
    WireNat, WireOpt, WireResult,
};
use vidchain_shared::{Principal, TokenAmount, VideoId};

use crate::error::TransportError;

/// Reply of a single binding call.
pub type Reply<T> = Result<WireResult<T>, TransportError>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActorBinding: Send + Sync {
    // Profiles
    async fn update_profile(&self, profile: ProfileUpdateWire) -> Reply<()>;
    async fn get_profile(&self) -> Reply<ProfileWire>;
    async fn get_user_profile(&self, user: Principal) -> Reply<ProfileWire>;

    // Videos
    async fn upload_video(&self, video: UploadVideoWire) -> Reply<WireNat>;
    async fn delete_video(&self, video_id: VideoId) -> Reply<()>;
    async fn get_video_by_id(&self, video_id: VideoId) -> Reply<RawVideo>;

    // Interaction
    async fn watch_video(&self, video_id: VideoId) -> Reply<()>;
    async fn like_video(&self, video_id: VideoId) -> Reply<()>;
    async fn dislike_video(&self, video_id: VideoId) -> Reply<()>;
    async fn report_video(&self, video_id: VideoId, reason: String) -> Reply<()>;

    // Token economy
    async fn stake_tokens(&self, amount: TokenAmount) -> Reply<()>;
    async fn get_balance(&self) -> Reply<WireNat>;
    async fn mint_video_nft(&self, video_id: VideoId, contract_address: String) -> Reply<()>;

    // Discovery
    async fn search_videos(
        &self,
        query: String,
        category: WireOpt<WireCategory>,
    ) -> Reply<Vec<RawVideo>>;
    async fn get_trending_videos(&self) -> Reply<Vec<RawVideo>>;
    async fn get_all_videos(&self) -> Reply<Vec<RawVideo>>;
    async fn get_videos_by_category(&self, category: WireCategory) -> Reply<Vec<RawVideo>>;
    async fn get_user_videos(&self, user: Principal) -> Reply<Vec<RawVideo>>;

    // Analytics
    async fn get_channel_analytics(&self) -> Reply<ChannelAnalyticsWire>;
}
