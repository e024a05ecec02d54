//! Typed facade over an [`ActorBinding`].
//!
//! Each method makes exactly one binding call and settles its outcome:
//! backend rejections come back as [`ClientError::Backend`] with the tag
//! untouched, transport failures as [`ClientError::Transport`]. The two are
//! never mixed. There is no caching, retrying or cross-call state.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info, warn};

use vidchain_shared::convert::{
    encode_profile_update, normalize_analytics, normalize_profile, normalize_video,
};
use vidchain_shared::wire::{RawVideo, UploadVideoWire, WireCategory, WireNat, WireOpt};
use vidchain_shared::{
    Category, ChannelAnalytics, Principal, Profile, ProfileUpdate, TokenAmount, UploadVideo, Video,
    VideoId,
};

use crate::binding::{ActorBinding, Reply};
use crate::error::{ClientError, Result};

/// Client for the VidChain backend canister.
///
/// Cheap to clone; clones share the same binding.
#[derive(Clone)]
pub struct VidChainClient {
    binding: Arc<dyn ActorBinding>,
}

impl VidChainClient {
    pub fn new(binding: Arc<dyn ActorBinding>) -> Self {
        Self { binding }
    }

    // -- Profiles ------------------------------------------------------------

    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<()> {
        let wire = encode_profile_update(&update);
        settle("updateProfile", self.binding.update_profile(wire)).await
    }

    pub async fn get_profile(&self) -> Result<Profile> {
        settle("getProfile", self.binding.get_profile()).await.map(normalize_profile)
    }

    pub async fn get_user_profile(&self, user: Principal) -> Result<Profile> {
        settle("getUserProfile", self.binding.get_user_profile(user))
            .await
            .map(normalize_profile)
    }

    // -- Videos --------------------------------------------------------------

    pub async fn upload_video(&self, video: UploadVideo) -> Result<VideoId> {
        let wire = UploadVideoWire {
            title: video.title,
            description: video.description,
            category: WireCategory(video.category),
            channel: video.channel,
            media: video.media.content,
            thumbnail: video.media.thumbnail,
            duration: WireNat::from(video.duration_secs),
            is_short: video.media.is_short,
            content_type: video.media.content_type,
            content_hash: Bytes::from(video.content_hash.into_bytes()),
        };

        debug!(
            title = %wire.title,
            size = wire.media.len(),
            content_type = %wire.content_type,
            "Uploading video"
        );

        let id = settle("uploadVideo", self.binding.upload_video(wire)).await?.0;
        info!(video_id = %id.0, "Video uploaded");
        Ok(id)
    }

    pub async fn delete_video(&self, video_id: VideoId) -> Result<()> {
        settle("deleteVideo", self.binding.delete_video(video_id)).await
    }

    pub async fn get_video(&self, video_id: VideoId) -> Result<Video> {
        settle("getVideoById", self.binding.get_video_by_id(video_id))
            .await
            .map(normalize_video)
    }

    // -- Interaction ---------------------------------------------------------

    pub async fn watch_video(&self, video_id: VideoId) -> Result<()> {
        settle("watchVideo", self.binding.watch_video(video_id)).await
    }

    pub async fn like_video(&self, video_id: VideoId) -> Result<()> {
        settle("likeVideo", self.binding.like_video(video_id)).await
    }

    pub async fn dislike_video(&self, video_id: VideoId) -> Result<()> {
        settle("dislikeVideo", self.binding.dislike_video(video_id)).await
    }

    pub async fn report_video(&self, video_id: VideoId, reason: impl Into<String>) -> Result<()> {
        settle("reportVideo", self.binding.report_video(video_id, reason.into())).await
    }

    // -- Token economy -------------------------------------------------------

    pub async fn stake_tokens(&self, amount: TokenAmount) -> Result<()> {
        settle("stakeTokens", self.binding.stake_tokens(amount)).await
    }

    pub async fn get_balance(&self) -> Result<TokenAmount> {
        settle("getBalance", self.binding.get_balance()).await.map(|n| n.0)
    }

    pub async fn mint_video_nft(
        &self,
        video_id: VideoId,
        contract_address: impl Into<String>,
    ) -> Result<()> {
        settle(
            "mintVideoNFT",
            self.binding.mint_video_nft(video_id, contract_address.into()),
        )
        .await
    }

    // -- Discovery -----------------------------------------------------------

    pub async fn search_videos(
        &self,
        query: impl Into<String>,
        category: Option<Category>,
    ) -> Result<Vec<Video>> {
        let category = WireOpt::from(category.map(WireCategory));
        settle(
            "searchVideos",
            self.binding.search_videos(query.into(), category),
        )
        .await
        .map(normalize_all)
    }

    pub async fn get_trending_videos(&self) -> Result<Vec<Video>> {
        settle("getTrendingVideos", self.binding.get_trending_videos()).await.map(normalize_all)
    }

    pub async fn get_all_videos(&self) -> Result<Vec<Video>> {
        settle("getAllVideos", self.binding.get_all_videos()).await.map(normalize_all)
    }

    pub async fn get_videos_by_category(&self, category: Category) -> Result<Vec<Video>> {
        settle(
            "getVideosByCategory",
            self.binding.get_videos_by_category(WireCategory(category)),
        )
        .await
        .map(normalize_all)
    }

    pub async fn get_user_videos(&self, user: Principal) -> Result<Vec<Video>> {
        settle("getUserVideos", self.binding.get_user_videos(user)).await.map(normalize_all)
    }

    // -- Analytics -----------------------------------------------------------

    pub async fn get_channel_analytics(&self) -> Result<ChannelAnalytics> {
        settle("getChannelAnalytics", self.binding.get_channel_analytics())
            .await
            .map(normalize_analytics)
    }
}

fn normalize_all(raw: Vec<RawVideo>) -> Vec<Video> {
    raw.into_iter().map(normalize_video).collect()
}

/// Collapse a binding reply into the facade's result type.
async fn settle<T>(method: &'static str, call: impl Future<Output = Reply<T>>) -> Result<T> {
    debug!(method, "Calling canister");
    match call.await {
        Ok(envelope) => envelope.into_result().map_err(|e| {
            debug!(method, error = e.tag(), "Backend rejected call");
            ClientError::Backend(e)
        }),
        Err(e) => {
            warn!(method, error = %e, transient = e.is_transient(), "Canister call failed");
            Err(ClientError::Transport(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use mockall::predicate::eq;
    use vidchain_shared::wire::{ChannelAnalyticsWire, ProfileWire, RawMedia, WireError, WireInt, WireResult};
    use vidchain_shared::{Int, MediaPayload, Nat, VidChainError};

    use super::*;
    use crate::binding::MockActorBinding;
    use crate::error::TransportError;

    fn client(mock: MockActorBinding) -> VidChainClient {
        VidChainClient::new(Arc::new(mock))
    }

    fn raw_video(id: u64) -> RawVideo {
        RawVideo {
            id: WireNat::from(id),
            title: format!("video {id}"),
            description: String::new(),
            category: WireCategory(Category::Gaming),
            channel: "chan".into(),
            uploader: Principal::anonymous(),
            timestamp: WireInt::from(1_700_000_000_000_000_000i64),
            duration: WireNat::from(60),
            media: RawMedia {
                content: Bytes::new(),
                thumbnail: Bytes::new(),
                is_short: false,
                content_type: "video/mp4".into(),
            },
            views: WireNat::from(1),
            likes: WireNat::from(0),
            dislikes: WireNat::from(0),
            token_rewards: WireNat::from(0),
            is_deleted: false,
        }
    }

    fn wire_profile(email: Option<&str>) -> ProfileWire {
        ProfileWire {
            name: "A".into(),
            email: email.map(str::to_string).into(),
            gender: WireOpt::none(),
            birthday: WireOpt::none(),
            channel_name: "a-channel".into(),
            total_views: WireNat::from(7),
            token_balance: WireNat::from(100),
        }
    }

    #[tokio::test]
    async fn test_backend_error_passes_through_untouched() {
        let mut mock = MockActorBinding::new();
        mock.expect_delete_video()
            .with(eq(Nat::from(999u64)))
            .times(1)
            .returning(|_| Ok(WireResult::Err(WireError(VidChainError::VideoNotFound))));

        let err = client(mock).delete_video(Nat::from(999u64)).await.unwrap_err();
        assert!(matches!(err, ClientError::Backend(VidChainError::VideoNotFound)));
    }

    #[tokio::test]
    async fn test_timeout_is_kept_distinct_from_backend_tags() {
        let mut mock = MockActorBinding::new();
        mock.expect_watch_video()
            .with(eq(Nat::from(42u64)))
            .times(1)
            .returning(|_| Err(TransportError::Timeout));

        let err = client(mock).watch_video(Nat::from(42u64)).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(TransportError::Timeout)));
        assert_eq!(err.backend(), None);
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_every_backend_tag_surfaces_as_is() {
        for tag in VidChainError::ALL {
            let mut mock = MockActorBinding::new();
            mock.expect_stake_tokens()
                .returning(move |_| Ok(WireResult::Err(WireError(tag))));

            let err = client(mock).stake_tokens(Nat::from(5u64)).await.unwrap_err();
            assert_eq!(err.backend(), Some(tag));
        }
    }

    #[tokio::test]
    async fn test_update_profile_sends_empty_arrays_for_omitted_fields() {
        let mut mock = MockActorBinding::new();
        mock.expect_update_profile()
            .withf(|p| {
                serde_json::to_value(p).unwrap()
                    == serde_json::json!({ "name": "A", "email": [], "gender": [], "birthday": [] })
            })
            .times(1)
            .returning(|_| Ok(WireResult::Ok(())));

        let update = ProfileUpdate {
            name: "A".into(),
            email: None,
            ..Default::default()
        };
        client(mock).update_profile(update).await.unwrap();
    }

    #[tokio::test]
    async fn test_get_profile_unwraps_email() {
        let mut mock = MockActorBinding::new();
        mock.expect_get_profile()
            .times(1)
            .returning(|| Ok(WireResult::Ok(wire_profile(Some("a@b.com")))));

        let profile = client(mock).get_profile().await.unwrap();
        assert_eq!(profile.email.as_deref(), Some("a@b.com"));
        assert_eq!(profile.gender, None);
        assert_eq!(profile.token_balance, Nat::from(100u64));
    }

    #[tokio::test]
    async fn test_get_user_profile_missing_email() {
        let user = Principal::anonymous();
        let mut mock = MockActorBinding::new();
        mock.expect_get_user_profile()
            .with(eq(user))
            .returning(|_| Ok(WireResult::Ok(wire_profile(None))));

        let profile = client(mock).get_user_profile(user).await.unwrap();
        assert_eq!(profile.email, None);
    }

    #[tokio::test]
    async fn test_search_normalizes_and_forwards_category() {
        let mut mock = MockActorBinding::new();
        mock.expect_search_videos()
            .withf(|q, c| q == "speedrun" && c.as_option() == Some(&WireCategory(Category::Gaming)))
            .times(1)
            .returning(|_, _| Ok(WireResult::Ok(vec![raw_video(1), raw_video(2)])));

        let videos = client(mock)
            .search_videos("speedrun", Some(Category::Gaming))
            .await
            .unwrap();
        assert_eq!(videos.len(), 2);
        assert_eq!(videos[1].id, Nat::from(2u64));
        assert_eq!(videos[0].category, Category::Gaming);
        assert_eq!(videos[0].duration_secs, 60);
    }

    #[tokio::test]
    async fn test_search_without_category_sends_empty_opt() {
        let mut mock = MockActorBinding::new();
        mock.expect_search_videos()
            .withf(|_, c| !c.is_present())
            .returning(|_, _| Ok(WireResult::Ok(vec![])));

        let videos = client(mock).search_videos("", None).await.unwrap();
        assert!(videos.is_empty());
    }

    #[tokio::test]
    async fn test_soft_deleted_videos_stay_visible() {
        let mut mock = MockActorBinding::new();
        mock.expect_get_all_videos().returning(|| {
            let mut gone = raw_video(3);
            gone.is_deleted = true;
            Ok(WireResult::Ok(vec![raw_video(1), gone]))
        });

        let videos = client(mock).get_all_videos().await.unwrap();
        assert_eq!(videos.len(), 2);
        assert!(videos[1].is_deleted);
    }

    #[tokio::test]
    async fn test_upload_maps_fields_and_returns_id() {
        let mut mock = MockActorBinding::new();
        mock.expect_upload_video()
            .withf(|w| {
                w.title == "clip"
                    && w.category == WireCategory(Category::Short)
                    && &w.media[..] == b"frames"
                    && w.thumbnail.is_empty()
                    && w.duration == WireNat::from(15)
                    && w.is_short
                    && w.content_type == "video/mp4"
                    && &w.content_hash[..] == b"abc123"
            })
            .times(1)
            .returning(|_| Ok(WireResult::Ok(WireNat("18446744073709551617".parse().unwrap()))));

        let upload = UploadVideo {
            title: "clip".into(),
            description: String::new(),
            category: Category::Short,
            channel: "chan".into(),
            duration_secs: 15,
            media: MediaPayload {
                content: Bytes::from_static(b"frames"),
                thumbnail: Bytes::new(),
                is_short: true,
                content_type: "video/mp4".into(),
            },
            content_hash: "abc123".into(),
        };

        let id = client(mock).upload_video(upload).await.unwrap();
        assert_eq!(id.0.to_string(), "18446744073709551617");
    }

    #[tokio::test]
    async fn test_balance_and_analytics() {
        let mut mock = MockActorBinding::new();
        mock.expect_get_balance()
            .returning(|| Ok(WireResult::Ok(WireNat("99999999999999999999999".parse().unwrap()))));
        mock.expect_get_channel_analytics().returning(|| {
            Ok(WireResult::Ok(ChannelAnalyticsWire {
                total_views: WireNat::from(12),
                avg_watch_time: 30.0,
                popular_content: vec![raw_video(4)],
            }))
        });

        let client = client(mock);
        let balance = client.get_balance().await.unwrap();
        assert_eq!(balance.0.to_string(), "99999999999999999999999");

        let analytics = client.get_channel_analytics().await.unwrap();
        assert_eq!(analytics.total_views, Nat::from(12u64));
        assert_eq!(analytics.popular_content[0].id, Nat::from(4u64));
    }

    #[tokio::test]
    async fn test_report_and_mint_forward_strings() {
        let mut mock = MockActorBinding::new();
        mock.expect_report_video()
            .with(eq(Nat::from(8u64)), eq("spam".to_string()))
            .returning(|_, _| Ok(WireResult::Ok(())));
        mock.expect_mint_video_nft()
            .with(eq(Nat::from(8u64)), eq("0xabc".to_string()))
            .returning(|_, _| Err(TransportError::Unreachable("offline".into())));

        let client = client(mock);
        client.report_video(Nat::from(8u64), "spam").await.unwrap();

        let err = client.mint_video_nft(Nat::from(8u64), "0xabc").await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(TransportError::Unreachable(_))));
    }

    #[tokio::test]
    async fn test_interactions_and_listing_by_category() {
        let mut mock = MockActorBinding::new();
        mock.expect_like_video().returning(|_| Ok(WireResult::Ok(())));
        mock.expect_dislike_video()
            .returning(|_| Ok(WireResult::Err(WireError(VidChainError::DuplicateAction))));
        mock.expect_get_video_by_id()
            .with(eq(Nat::from(5u64)))
            .returning(|_| Ok(WireResult::Ok(raw_video(5))));
        mock.expect_get_videos_by_category()
            .with(eq(WireCategory(Category::Music)))
            .returning(|_| Ok(WireResult::Ok(vec![])));
        mock.expect_get_trending_videos()
            .returning(|| Ok(WireResult::Ok(vec![raw_video(6)])));
        mock.expect_get_user_videos()
            .returning(|_| Ok(WireResult::Ok(vec![])));

        let client = client(mock);
        client.like_video(Nat::from(5u64)).await.unwrap();
        let err = client.dislike_video(Nat::from(5u64)).await.unwrap_err();
        assert_eq!(err.backend(), Some(VidChainError::DuplicateAction));

        let video = client.get_video(Nat::from(5u64)).await.unwrap();
        assert_eq!(video.created_at().map(|t| t.timestamp()), Some(1_700_000_000));

        assert!(client.get_videos_by_category(Category::Music).await.unwrap().is_empty());
        assert_eq!(client.get_trending_videos().await.unwrap().len(), 1);
        assert!(client.get_user_videos(Principal::anonymous()).await.unwrap().is_empty());
    }

    #[test]
    fn test_birthday_int_roundtrip_in_profile() {
        let mut wire = wire_profile(None);
        wire.birthday = WireOpt::some(WireInt(Int::from(-86_400i64)));
        let profile = normalize_profile(wire);
        assert_eq!(profile.birthday, Some(Int::from(-86_400i64)));
    }

    #[derive(Clone)]
    struct LogSink(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for LogSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_every_call_is_logged_at_debug() {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let sink = LogSink(buf.clone());
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || sink.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut mock = MockActorBinding::new();
        mock.expect_like_video().returning(|_| Ok(WireResult::Ok(())));
        client(mock).like_video(Nat::from(7u64)).await.unwrap();

        let logs = String::from_utf8(buf.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("Calling canister"), "{logs}");
        assert!(logs.contains("likeVideo"), "{logs}");
    }
}
