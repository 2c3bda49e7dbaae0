use std::cmp::Ordering;
use std::env;
use std::time::Duration;

use async_trait::async_trait;
use tap::{TapFallible, TapOptional};
use tracing::{error, info, warn};
use which::which;
use youtube_dl::{Format, SingleVideo, YoutubeDl, YoutubeDlOutput};

use super::TrackResolver;
use crate::dto::track::{StreamRef, Track};

fn ytdl_exe() -> Option<String> {
    env::var("YT_DLP_PATH")
        .or_else(|_| which("yt-dlp").map(|p| p.to_string_lossy().to_string()))
        .tap_err(|e| error!("yt-dlp path not found: {e:?}"))
        .ok()
}

fn is_url(query: &str) -> bool {
    query.starts_with("http://") || query.starts_with("https://") || query.starts_with("www.")
}

fn best_audio_url(video: &SingleVideo) -> Option<String> {
    // Prefer the URL yt-dlp already picked if available
    if let Some(url) = &video.url {
        return Some(url.clone());
    }
    let formats = video.formats.as_deref()?;
    let rate = |f: &Format| f.abr.or(f.tbr).unwrap_or_default();
    let best = formats
        .iter()
        .filter(|f| {
            f.acodec.as_deref().is_some_and(|a| a != "none")
                && f.vcodec.as_deref().is_none_or(|v| v == "none")
        })
        .max_by(|a, b| rate(*a).partial_cmp(&rate(*b)).unwrap_or(Ordering::Equal));

    match best {
        Some(format) => format.url.clone(),
        // No audio-only format; fall back to the first one carrying audio
        None => formats.first().and_then(|f| f.url.clone()),
    }
}

/// Resolves with yt-dlp: URLs are extracted directly, free text becomes a
/// search where the first hit wins.
pub struct YtDlpResolver {
    ytdl_path: Option<String>,
}

impl YtDlpResolver {
    pub fn new() -> Self {
        Self {
            ytdl_path: ytdl_exe(),
        }
    }

    async fn extract(&self, target: &str) -> Option<SingleVideo> {
        let mut command = YoutubeDl::new(target);
        if let Some(path) = &self.ytdl_path {
            command.youtube_dl_path(path);
        }
        command.extra_arg("--no-playlist");

        info!("extracting metadata for {target} - this may take a few seconds");
        let output = command
            .run_async()
            .await
            .tap_err(|e| error!("error running yt-dlp: {e:?}"))
            .ok()?;
        info!("metadata extraction complete");

        match output {
            YoutubeDlOutput::SingleVideo(video) => Some(*video),
            YoutubeDlOutput::Playlist(playlist) => {
                let entry = playlist.entries.unwrap_or_default().into_iter().next();
                if entry.is_none() {
                    warn!("no results for {target}");
                }
                entry
            }
        }
    }
}

impl Default for YtDlpResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TrackResolver for YtDlpResolver {
    async fn resolve(&self, query: &str) -> Option<Track> {
        let target = if is_url(query) {
            query.to_owned()
        } else {
            format!("ytsearch1:{query}")
        };

        let video = self.extract(&target).await?;
        let url = best_audio_url(&video)
            .tap_none(|| warn!("no playable audio url for {target}"))?;
        let duration = video
            .duration
            .as_ref()
            .and_then(|d| d.as_f64())
            .map(|secs| Duration::from_secs_f64(secs.max(0.0)))
            .unwrap_or_default();

        Some(Track {
            stream_ref: StreamRef::new(url),
            title: video.title.clone().unwrap_or_else(|| "Unknown".to_owned()),
            duration,
        })
    }
}
