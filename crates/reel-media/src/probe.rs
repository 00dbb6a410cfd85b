//! FFprobe media information behind a fakeable capability trait.
//!
//! Selection and planning only ever look at probed metadata, so they
//! depend on [`MediaProber`] rather than on ffprobe directly. Tests swap
//! in a fake prober with fixed metadata.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::process::Command;

use crate::error::{MediaError, MediaResult};

/// Video stream information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoInfo {
    /// Duration in seconds
    pub duration: f64,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Frame rate (fps)
    pub fps: f64,
}

impl VideoInfo {
    /// Basic media-health check: positive duration and dimensions.
    pub fn is_usable(&self) -> bool {
        self.duration > 0.0 && self.width > 0 && self.height > 0
    }
}

/// Audio track information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioInfo {
    /// Duration in seconds
    pub duration: f64,
}

/// Capability interface over the native probing tool.
#[async_trait]
pub trait MediaProber: Send + Sync {
    /// Probe a video file.
    async fn video_info(&self, path: &Path) -> MediaResult<VideoInfo>;

    /// Probe an audio file.
    async fn audio_info(&self, path: &Path) -> MediaResult<AudioInfo>;
}

/// FFprobe JSON output format.
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: String,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    avg_frame_rate: Option<String>,
}

/// The real prober, shelling out to ffprobe.
#[derive(Debug, Clone, Copy, Default)]
pub struct FfprobeProber;

impl FfprobeProber {
    async fn probe(&self, path: &Path) -> MediaResult<FfprobeOutput> {
        if !path.exists() {
            return Err(MediaError::FileNotFound(path.to_path_buf()));
        }

        which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)?;

        let output = Command::new("ffprobe")
            .args([
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            return Err(MediaError::FfprobeFailed {
                message: format!("FFprobe failed for {}", path.display()),
                stderr: Some(String::from_utf8_lossy(&output.stderr).to_string()),
            });
        }

        Ok(serde_json::from_slice(&output.stdout)?)
    }
}

#[async_trait]
impl MediaProber for FfprobeProber {
    async fn video_info(&self, path: &Path) -> MediaResult<VideoInfo> {
        let probe = self.probe(path).await?;

        let video_stream = probe
            .streams
            .iter()
            .find(|s| s.codec_type == "video")
            .ok_or_else(|| {
                MediaError::InvalidMedia(format!("no video stream in {}", path.display()))
            })?;

        let duration = probe
            .format
            .duration
            .as_ref()
            .and_then(|d| d.parse::<f64>().ok())
            .unwrap_or(0.0);

        let fps = video_stream
            .avg_frame_rate
            .as_ref()
            .or(video_stream.r_frame_rate.as_ref())
            .and_then(|r| parse_frame_rate(r))
            .unwrap_or(30.0);

        Ok(VideoInfo {
            duration,
            width: video_stream.width.unwrap_or(0),
            height: video_stream.height.unwrap_or(0),
            fps,
        })
    }

    async fn audio_info(&self, path: &Path) -> MediaResult<AudioInfo> {
        let probe = self.probe(path).await?;

        probe
            .streams
            .iter()
            .find(|s| s.codec_type == "audio")
            .ok_or_else(|| {
                MediaError::InvalidMedia(format!("no audio stream in {}", path.display()))
            })?;

        let duration = probe
            .format
            .duration
            .as_ref()
            .and_then(|d| d.parse::<f64>().ok())
            .unwrap_or(0.0);

        if duration <= 0.0 {
            return Err(MediaError::InvalidMedia(format!(
                "zero-length audio: {}",
                path.display()
            )));
        }

        Ok(AudioInfo { duration })
    }
}

/// Parse a frame rate string (e.g., "30/1" or "29.97").
fn parse_frame_rate(s: &str) -> Option<f64> {
    if let Some((num, den)) = s.split_once('/') {
        let num: f64 = num.parse().ok()?;
        let den: f64 = den.parse().ok()?;
        if den > 0.0 {
            return Some(num / den);
        }
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame_rate() {
        assert!((parse_frame_rate("30/1").unwrap() - 30.0).abs() < 0.01);
        assert!((parse_frame_rate("30000/1001").unwrap() - 29.97).abs() < 0.01);
        assert!((parse_frame_rate("29.97").unwrap() - 29.97).abs() < 0.01);
        assert!(parse_frame_rate("0/0").is_none());
    }

    #[test]
    fn test_usable_check() {
        let good = VideoInfo {
            duration: 12.0,
            width: 1920,
            height: 1080,
            fps: 30.0,
        };
        assert!(good.is_usable());

        let zero_duration = VideoInfo { duration: 0.0, ..good.clone() };
        assert!(!zero_duration.is_usable());

        let zero_width = VideoInfo { width: 0, ..good };
        assert!(!zero_width.is_usable());
    }

    #[test]
    fn test_ffprobe_json_shape() {
        let json = r#"{
            "format": {"duration": "12.5"},
            "streams": [
                {"codec_type": "video", "width": 1920, "height": 1080,
                 "r_frame_rate": "30/1", "avg_frame_rate": "30/1"}
            ]
        }"#;
        let parsed: FfprobeOutput = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.streams.len(), 1);
        assert_eq!(parsed.format.duration.as_deref(), Some("12.5"));
    }
}
