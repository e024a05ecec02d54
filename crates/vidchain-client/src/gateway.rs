//! [`ActorBinding`] over a JSON canister gateway.
//!
//! Every backend method maps onto
//! `POST {gateway}/api/canister/{canister_id}/{query|call}/{method}` with a
//! body of `{"args": [...]}`. A 2xx reply carries the method's result
//! envelope as JSON. Reads go through `query`, anything that changes ledger
//! state through `call`.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use vidchain_shared::wire::{
    ChannelAnalyticsWire, ProfileUpdateWire, ProfileWire, RawVideo, UploadVideoWire, WireCategory,
    WireNat, WireOpt, WireResult,
};
use vidchain_shared::{Principal, TokenAmount, VideoId};

use crate::binding::{ActorBinding, Reply};
use crate::config::ClientConfig;
use crate::error::TransportError;

const NO_ARGS: [(); 0] = [];

#[derive(Debug, Clone, Copy)]
enum CallKind {
    Query,
    Update,
}

impl CallKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Update => "call",
        }
    }
}

#[derive(Serialize)]
struct CallBody<'a, A> {
    args: &'a A,
}

/// HTTP binding to a single backend canister.
#[derive(Debug, Clone)]
pub struct GatewayBinding {
    http: Client,
    endpoint: String,
    identity_token: Option<String>,
}

impl GatewayBinding {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let canister_id = config
            .canister_id
            .as_deref()
            .ok_or_else(|| TransportError::Config("canister id is not set".into()))?;
        let canister = Principal::from_text(canister_id)
            .map_err(|e| TransportError::Config(format!("invalid canister id {canister_id}: {e}")))?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        let endpoint = format!(
            "{}/api/canister/{}",
            config.gateway_url.trim_end_matches('/'),
            canister.to_text()
        );

        debug!(%endpoint, authenticated = config.identity_token.is_some(), "Gateway binding ready");

        Ok(Self {
            http,
            endpoint,
            identity_token: config.identity_token.clone(),
        })
    }

    async fn invoke<A, T>(&self, kind: CallKind, method: &'static str, args: A) -> Reply<T>
    where
        A: Serialize + Send + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}/{}", self.endpoint, kind.as_str(), method);

        let mut req = self.http.post(&url).json(&CallBody { args: &args });
        if let Some(ref token) = self.identity_token {
            req = req.bearer_auth(token);
        }

        debug!(method, kind = kind.as_str(), "Dispatching canister call");

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp.bytes().await?;
        serde_json::from_slice::<WireResult<T>>(&bytes)
            .map_err(|e| TransportError::MalformedReply(format!("{method}: {e}")))
    }
}

#[async_trait]
impl ActorBinding for GatewayBinding {
    async fn update_profile(&self, profile: ProfileUpdateWire) -> Reply<()> {
        self.invoke(CallKind::Update, "updateProfile", (profile,)).await
    }

    async fn get_profile(&self) -> Reply<ProfileWire> {
        self.invoke(CallKind::Query, "getProfile", NO_ARGS).await
    }

    async fn get_user_profile(&self, user: Principal) -> Reply<ProfileWire> {
        self.invoke(CallKind::Query, "getUserProfile", (user.to_text(),))
            .await
    }

    async fn upload_video(&self, video: UploadVideoWire) -> Reply<WireNat> {
        self.invoke(CallKind::Update, "uploadVideo", (video,)).await
    }

    async fn delete_video(&self, video_id: VideoId) -> Reply<()> {
        self.invoke(CallKind::Update, "deleteVideo", (WireNat(video_id),))
            .await
    }

    async fn get_video_by_id(&self, video_id: VideoId) -> Reply<RawVideo> {
        self.invoke(CallKind::Query, "getVideoById", (WireNat(video_id),))
            .await
    }

    async fn watch_video(&self, video_id: VideoId) -> Reply<()> {
        self.invoke(CallKind::Update, "watchVideo", (WireNat(video_id),))
            .await
    }

    async fn like_video(&self, video_id: VideoId) -> Reply<()> {
        self.invoke(CallKind::Update, "likeVideo", (WireNat(video_id),))
            .await
    }

    async fn dislike_video(&self, video_id: VideoId) -> Reply<()> {
        self.invoke(CallKind::Update, "dislikeVideo", (WireNat(video_id),))
            .await
    }

    async fn report_video(&self, video_id: VideoId, reason: String) -> Reply<()> {
        self.invoke(CallKind::Update, "reportVideo", (WireNat(video_id), reason))
            .await
    }

    async fn stake_tokens(&self, amount: TokenAmount) -> Reply<()> {
        self.invoke(CallKind::Update, "stakeTokens", (WireNat(amount),))
            .await
    }

    async fn get_balance(&self) -> Reply<WireNat> {
        self.invoke(CallKind::Query, "getBalance", NO_ARGS).await
    }

    async fn mint_video_nft(&self, video_id: VideoId, contract_address: String) -> Reply<()> {
        self.invoke(
            CallKind::Update,
            "mintVideoNFT",
            (WireNat(video_id), contract_address),
        )
        .await
    }

    async fn search_videos(
        &self,
        query: String,
        category: WireOpt<WireCategory>,
    ) -> Reply<Vec<RawVideo>> {
        self.invoke(CallKind::Query, "searchVideos", (query, category))
            .await
    }

    async fn get_trending_videos(&self) -> Reply<Vec<RawVideo>> {
        self.invoke(CallKind::Query, "getTrendingVideos", NO_ARGS).await
    }

    async fn get_all_videos(&self) -> Reply<Vec<RawVideo>> {
        self.invoke(CallKind::Query, "getAllVideos", NO_ARGS).await
    }

    async fn get_videos_by_category(&self, category: WireCategory) -> Reply<Vec<RawVideo>> {
        self.invoke(CallKind::Query, "getVideosByCategory", (category,))
            .await
    }

    async fn get_user_videos(&self, user: Principal) -> Reply<Vec<RawVideo>> {
        self.invoke(CallKind::Query, "getUserVideos", (user.to_text(),))
            .await
    }

    async fn get_channel_analytics(&self) -> Reply<ChannelAnalyticsWire> {
        self.invoke(CallKind::Query, "getChannelAnalytics", NO_ARGS).await
    }
}
