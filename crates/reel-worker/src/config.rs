//! Worker configuration.

use std::path::PathBuf;

use chrono::{Duration, NaiveTime};

use reel_models::{EncodingConfig, RenderSettings};
use reel_schedule::{default_publish_slots, default_utc_offset};

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Directory of raw source clips (fatal when missing or empty).
    pub videos_dir: PathBuf,
    /// Directory of music tracks (optional, silent reels without it).
    pub music_dir: PathBuf,
    /// Logo image for branding (optional).
    pub logo_path: PathBuf,
    /// Caption/hook font file (optional, system default without it).
    pub font_path: PathBuf,
    /// JSON file of quote records.
    pub quotes_path: PathBuf,
    /// Directory finished reels are written into (created if absent).
    pub output_dir: PathBuf,
    /// Publish checkpoint file.
    pub checkpoint_path: PathBuf,
    /// Visual template knobs.
    pub render: RenderSettings,
    /// Encoder settings.
    pub encoding: EncodingConfig,
    /// Prefer NVENC when ffmpeg supports it.
    pub prefer_nvenc: bool,
    /// Per-reel encode timeout, seconds.
    pub encode_timeout_secs: u64,
    /// Daily publish slots, local time.
    pub publish_slots: Vec<NaiveTime>,
    /// Local-time offset from UTC, minutes.
    pub utc_offset_minutes: i64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        let render = RenderSettings::default();
        Self {
            videos_dir: PathBuf::from("assets/videos"),
            music_dir: PathBuf::from("assets/musics"),
            logo_path: PathBuf::from("assets/logo/logo.png"),
            font_path: PathBuf::from("assets/fonts/NotoSerifDisplay_Condensed-Medium.ttf"),
            quotes_path: PathBuf::from("data/generated/motivational_content.json"),
            output_dir: PathBuf::from("data/generated/reels"),
            checkpoint_path: PathBuf::from("data/last_upload_time.txt"),
            render,
            encoding: EncodingConfig::default(),
            prefer_nvenc: true,
            encode_timeout_secs: 600,
            publish_slots: default_publish_slots(),
            utc_offset_minutes: default_utc_offset().num_minutes(),
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let mut config = Self {
            videos_dir: env_path("REEL_VIDEOS_DIR", defaults.videos_dir),
            music_dir: env_path("REEL_MUSIC_DIR", defaults.music_dir),
            logo_path: env_path("REEL_LOGO_PATH", defaults.logo_path),
            font_path: env_path("REEL_FONT_PATH", defaults.font_path),
            quotes_path: env_path("REEL_QUOTES_PATH", defaults.quotes_path),
            output_dir: env_path("REEL_OUTPUT_DIR", defaults.output_dir),
            checkpoint_path: env_path("REEL_CHECKPOINT_PATH", defaults.checkpoint_path),
            render: defaults.render,
            encoding: defaults.encoding,
            prefer_nvenc: env_parse("REEL_USE_NVENC", defaults.prefer_nvenc),
            encode_timeout_secs: env_parse("REEL_ENCODE_TIMEOUT_SECS", defaults.encode_timeout_secs),
            publish_slots: std::env::var("REEL_PUBLISH_SLOTS")
                .ok()
                .and_then(|value| parse_slots(&value))
                .unwrap_or(defaults.publish_slots),
            utc_offset_minutes: env_parse("REEL_UTC_OFFSET_MINUTES", defaults.utc_offset_minutes),
        };

        config.render.scene_duration = env_parse("REEL_SCENE_DURATION", config.render.scene_duration);
        config.render.fade_duration = env_parse("REEL_FADE_DURATION", config.render.fade_duration);
        config.render.fps = env_parse("REEL_FPS", config.render.fps);
        config.render.font_file = Some(config.font_path.clone());

        config
    }

    /// The local-time offset as a chrono duration.
    pub fn utc_offset(&self) -> Duration {
        Duration::minutes(self.utc_offset_minutes)
    }
}

/// Parse a comma-separated `HH:MM` slot list; any unparsable entry
/// rejects the whole list so a typo falls back to the defaults.
fn parse_slots(value: &str) -> Option<Vec<NaiveTime>> {
    let slots: Vec<NaiveTime> = value
        .split(',')
        .map(|slot| NaiveTime::parse_from_str(slot.trim(), "%H:%M"))
        .collect::<Result<_, _>>()
        .ok()?;
    if slots.is_empty() {
        None
    } else {
        Some(slots)
    }
}

fn env_path(key: &str, default: PathBuf) -> PathBuf {
    std::env::var(key).map(PathBuf::from).unwrap_or(default)
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WorkerConfig::default();
        assert_eq!(config.videos_dir, PathBuf::from("assets/videos"));
        assert_eq!(config.publish_slots.len(), 4);
        assert_eq!(config.utc_offset_minutes, 330);
        assert_eq!(config.utc_offset(), Duration::minutes(330));
    }

    #[test]
    fn test_parse_slots() {
        let slots = parse_slots("06:00, 13:00,21:30").unwrap();
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0], NaiveTime::from_hms_opt(6, 0, 0).unwrap());
        assert_eq!(slots[2], NaiveTime::from_hms_opt(21, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_slots_rejects_bad_input() {
        assert!(parse_slots("06:00,noon").is_none());
        assert!(parse_slots("").is_none());
        assert!(parse_slots("25:00").is_none());
    }
}
