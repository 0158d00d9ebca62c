use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use webrtc::api::media_engine::{MIME_TYPE_OPUS, MIME_TYPE_VP8};
use webrtc::rtp_transceiver::rtp_codec::RTCRtpCodecCapability;
use webrtc::track::track_local::TrackLocal;
use webrtc::track::track_local::track_local_static_sample::TrackLocalStaticSample;

/// Source of the local tracks a session offers on the call. Acquisition
/// failure is terminal for the session; there is no retry.
#[async_trait]
pub trait MediaSource: Send + Sync {
    async fn open_tracks(&self) -> Result<Vec<Arc<dyn TrackLocal + Send + Sync>>>;
}

/// Sample-backed VP8 video and Opus audio tracks. Enough to negotiate a
/// real media section; capture devices plug in via their own `MediaSource`.
pub struct SyntheticMedia;

#[async_trait]
impl MediaSource for SyntheticMedia {
    async fn open_tracks(&self) -> Result<Vec<Arc<dyn TrackLocal + Send + Sync>>> {
        let video: Arc<dyn TrackLocal + Send + Sync> = Arc::new(TrackLocalStaticSample::new(
            RTCRtpCodecCapability {
                mime_type: MIME_TYPE_VP8.to_owned(),
                ..Default::default()
            },
            "video".to_owned(),
            "wardcall".to_owned(),
        ));
        let audio: Arc<dyn TrackLocal + Send + Sync> = Arc::new(TrackLocalStaticSample::new(
            RTCRtpCodecCapability {
                mime_type: MIME_TYPE_OPUS.to_owned(),
                ..Default::default()
            },
            "audio".to_owned(),
            "wardcall".to_owned(),
        ));
        Ok(vec![video, audio])
    }
}
