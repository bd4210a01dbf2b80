//! Real-time media transport seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::Result;
use crate::models::StreamProfile;

/// Live statistics pushed by the media channel after a join.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ChannelStats {
    pub rtt_ms: u32,
    pub tx_bitrate_kbps: u32,
    pub rx_bitrate_kbps: u32,
    pub packet_loss_pct: f32,
}

/// Audio/video channel collaborator. Capture and encoding internals are the
/// implementation's concern.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaTransport: Send + Sync {
    /// Join the named channel, authenticating with `token` and publishing
    /// under `stream_id`.
    async fn join(&self, channel: &str, token: &str, stream_id: u64) -> Result<()>;

    async fn leave(&self) -> Result<()>;

    /// Reconfigure the outbound stream; applies to the current and any
    /// future publish.
    fn configure_outbound(&self, profile: StreamProfile);

    fn set_audio_enabled(&self, enabled: bool);

    /// Enabling video can fail (camera in use, permission revoked by the
    /// OS); the failure is surfaced to the caller.
    fn set_video_enabled(&self, enabled: bool) -> Result<()>;

    /// Live channel statistics, updated by the transport while joined.
    fn statistics(&self) -> watch::Receiver<ChannelStats>;
}
