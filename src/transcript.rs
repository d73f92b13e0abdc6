/*!
 * Video transcripts via yt-dlp and Whisper.
 *
 * Audio for the requested slice of a YouTube video is pulled with `yt-dlp`
 * into a temporary directory and handed to a [`Transcriber`]. The cost
 * estimate assumes roughly one megabyte of mp3 per minute of audio.
 */

use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use url::Url;

use crate::errors::TranscriptError;
use crate::providers::Transcriber;

/// Whisper price per minute of audio
pub const WHISPER_COST_PER_MINUTE: f64 = 0.006;
/// End bound used when only a start time is given
const OPEN_END_SECONDS: u64 = 999_999;
const AUDIO_FILE_NAME: &str = "audio.mp3";

static SHORT_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"youtu\.be/([a-zA-Z0-9_-]+)").unwrap());

/// Video id from a youtu.be or youtube.com watch URL
pub fn extract_video_id(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    if let Some(caps) = SHORT_LINK.captures(url) {
        return Some(caps[1].to_string());
    }

    let parsed = Url::parse(url).ok()?;
    match parsed.host_str()? {
        "www.youtube.com" | "youtube.com" | "m.youtube.com" => parsed
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
            .filter(|id| !id.is_empty()),
        _ => None,
    }
}

/// Seconds from `SS`, `MM:SS` or `HH:MM:SS`
pub fn parse_timestamp(timestamp: &str) -> Option<u64> {
    let timestamp = timestamp.trim();
    if timestamp.is_empty() {
        return None;
    }

    let parts = timestamp
        .split(':')
        .map(|p| p.parse::<u64>().ok())
        .collect::<Option<Vec<_>>>()?;

    // Overflowing values count as unparsable
    match parts.as_slice() {
        [seconds] => Some(*seconds),
        [minutes, seconds] => minutes.checked_mul(60)?.checked_add(*seconds),
        [hours, minutes, seconds] => hours
            .checked_mul(3600)?
            .checked_add(minutes.checked_mul(60)?)?
            .checked_add(*seconds),
        _ => None,
    }
}

/// Arguments for the yt-dlp invocation
pub fn download_args(video_id: &str, output: &Path, start: Option<u64>, end: Option<u64>) -> Vec<String> {
    let mut args = vec![
        "-x".to_string(),
        "--audio-format".to_string(),
        "mp3".to_string(),
        "-o".to_string(),
        output.display().to_string(),
    ];

    if start.is_some() || end.is_some() {
        args.push("--download-sections".to_string());
        args.push(format!(
            "*{}-{}",
            start.unwrap_or(0),
            end.unwrap_or(OPEN_END_SECONDS)
        ));
    }

    args.push(format!("https://www.youtube.com/watch?v={}", video_id));
    args
}

/// Estimated (minutes, dollars) for an mp3 of `bytes`
pub fn estimate_cost(bytes: u64) -> (f64, f64) {
    let minutes = bytes as f64 / (1024.0 * 1024.0);
    let cost = minutes * WHISPER_COST_PER_MINUTE;
    ((minutes * 10.0).round() / 10.0, (cost * 1000.0).round() / 1000.0)
}

/// A finished transcript
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transcript {
    pub video_id: String,
    pub text: String,
    pub duration_minutes: f64,
    pub cost_estimate: f64,
}

/// Downloads audio and transcribes it
#[derive(Debug)]
pub struct TranscriptService<T: Transcriber> {
    /// `None` when no API key is configured
    transcriber: Option<T>,
    downloader: String,
    download_timeout: Duration,
}

impl<T: Transcriber> TranscriptService<T> {
    pub fn new(transcriber: Option<T>, download_timeout: Duration) -> Self {
        Self {
            transcriber,
            downloader: "yt-dlp".to_string(),
            download_timeout,
        }
    }

    /// Use a different yt-dlp executable
    pub fn with_downloader(mut self, program: impl Into<String>) -> Self {
        self.downloader = program.into();
        self
    }

    /// Transcribe a video, optionally limited to `start`..`end`
    pub async fn get_transcript(
        &self,
        youtube_url: &str,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Transcript, TranscriptError> {
        let transcriber = self.transcriber.as_ref().ok_or(TranscriptError::MissingApiKey)?;
        let video_id = extract_video_id(youtube_url).ok_or(TranscriptError::InvalidUrl)?;

        let temp_dir = tempfile::tempdir().map_err(|e| {
            warn!("Could not create temp dir for audio: {}", e);
            TranscriptError::DownloadFailed
        })?;
        let audio_file = temp_dir.path().join(AUDIO_FILE_NAME);

        let args = download_args(
            &video_id,
            &audio_file,
            start.and_then(parse_timestamp),
            end.and_then(parse_timestamp),
        );
        self.download(&args).await?;

        let metadata = tokio::fs::metadata(&audio_file)
            .await
            .map_err(|_| TranscriptError::MissingAudio)?;
        let (duration_minutes, cost_estimate) = estimate_cost(metadata.len());

        let text = transcriber.transcribe(&audio_file).await?;
        info!(
            "Transcribed video {} (~{} min, ${:.3})",
            video_id, duration_minutes, cost_estimate
        );

        Ok(Transcript {
            video_id,
            text: text.trim().to_string(),
            duration_minutes,
            cost_estimate,
        })
    }

    async fn download(&self, args: &[String]) -> Result<(), TranscriptError> {
        debug!("Running {} {}", self.downloader, args.join(" "));

        let child = Command::new(&self.downloader)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                warn!("Failed to start {}: {}", self.downloader, e);
                TranscriptError::DownloadFailed
            })?;

        let output = tokio::time::timeout(self.download_timeout, child.wait_with_output())
            .await
            .map_err(|_| TranscriptError::DownloadTimeout)?
            .map_err(|_| TranscriptError::DownloadFailed)?;

        if !output.status.success() {
            warn!(
                "{} exited with {}: {}",
                self.downloader,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Err(TranscriptError::DownloadFailed);
        }
        Ok(())
    }
}
