//! Single-pass reel rendering.
//!
//! A whole [`RenderPlan`] becomes one ffmpeg invocation: per-scene seeked
//! inputs, an optional lavfi hook source, optional looped music, an
//! optional logo image, and a filter graph combining composition,
//! branding and the audio chain.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use reel_models::{EncodingConfig, RenderPlan, RenderSettings};

use crate::audio::{extra_stream_loops, music_filter_chain};
use crate::branding::LogoConfig;
use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::compose::SceneGraphBuilder;
use crate::error::{MediaError, MediaResult};

/// Renders a plan into its output artifact.
///
/// The batch orchestrator depends on this trait so resilience tests can
/// substitute a fake that fails selected items.
#[async_trait]
pub trait ReelRenderer: Send + Sync {
    async fn render(&self, plan: &RenderPlan) -> MediaResult<()>;
}

/// The real renderer, shelling out to ffmpeg.
#[derive(Debug, Clone)]
pub struct FfmpegReelRenderer {
    settings: RenderSettings,
    encoding: EncodingConfig,
    logo: Option<PathBuf>,
    timeout_secs: Option<u64>,
}

impl FfmpegReelRenderer {
    pub fn new(settings: RenderSettings, encoding: EncodingConfig) -> Self {
        Self {
            settings,
            encoding,
            logo: None,
            timeout_secs: None,
        }
    }

    /// Set the logo image used for branding.
    pub fn with_logo(mut self, path: impl Into<PathBuf>) -> Self {
        self.logo = Some(path.into());
        self
    }

    /// Bound each encode with a kill-on-timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Assemble the full ffmpeg command for a plan.
    pub fn build_command(&self, plan: &RenderPlan) -> MediaResult<FfmpegCommand> {
        let mut cmd = FfmpegCommand::new(&plan.output);

        // Body scene inputs at indices 0..n
        for scene in &plan.scenes {
            cmd = cmd.input_seeked(&scene.source, scene.start, scene.duration);
        }

        let builder = SceneGraphBuilder::new(&self.settings, &plan.colors);

        // Hook background as a lavfi source
        let hook_input = if let Some(hook) = &plan.hook {
            let index = cmd.input_count();
            cmd = cmd.input_lavfi(builder.hook_source(hook));
            Some(index)
        } else {
            None
        };

        let total_duration = plan.total_duration();

        // Looped music input
        let music_input = if let Some(music) = &plan.music {
            let index = cmd.input_count();
            cmd = cmd.input_looped(
                &music.source,
                extra_stream_loops(music.duration, total_duration),
            );
            Some(index)
        } else {
            None
        };

        // Logo image input; overlay repeats its last frame for the whole
        // video
        let logo_config = self
            .logo
            .as_ref()
            .map(|path| LogoConfig::from_settings(path, &self.settings));
        let logo_input = match &logo_config {
            Some(config) if config.is_available() => {
                let index = cmd.input_count();
                cmd = cmd.input(&config.image_path);
                Some(index)
            }
            _ => None,
        };

        // Video graph: composition, then optional branding
        let (mut graph, mut video_label) = builder.build(plan, hook_input)?;
        if let (Some(config), Some(index)) = (&logo_config, logo_input) {
            if let Some(chain) = config.overlay_chain(index, &video_label) {
                graph.push(';');
                graph.push_str(&chain);
                video_label = "branded".to_string();
            }
        }

        // Audio chain replaces all source audio; no music means silence
        if let Some(index) = music_input {
            graph.push(';');
            graph.push_str(&music_filter_chain(
                index,
                total_duration,
                self.settings.music_volume,
            ));
        }

        cmd = cmd
            .filter_complex(graph)
            .map(format!("[{video_label}]"));
        if music_input.is_some() {
            cmd = cmd.map("[amain]");
        }

        cmd = cmd
            .frame_rate(self.settings.fps)
            .output_args(self.encoding.to_ffmpeg_args())
            .output_args(["-movflags", "+faststart"]);

        Ok(cmd)
    }
}

#[async_trait]
impl ReelRenderer for FfmpegReelRenderer {
    async fn render(&self, plan: &RenderPlan) -> MediaResult<()> {
        if let Some(parent) = plan.output.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let cmd = self.build_command(plan)?;
        let total_ms = (plan.total_duration() * 1000.0) as i64;

        let mut runner = FfmpegRunner::new();
        if let Some(secs) = self.timeout_secs {
            runner = runner.with_timeout(secs);
        }

        let output = plan.output.clone();
        let result = runner
            .run_with_progress(&cmd, move |progress| {
                debug!(
                    output = %output.display(),
                    percent = format!("{:.0}", progress.percentage(total_ms)),
                    eta_secs = progress.eta_seconds(total_ms).map(|eta| eta.round()),
                    speed = progress.speed,
                    "Encoding"
                );
            })
            .await;

        match result {
            Ok(()) => {
                info!(
                    output = %plan.output.display(),
                    scenes = plan.scenes.len(),
                    duration = format!("{:.1}", plan.total_duration()),
                    "Reel encoded"
                );
                Ok(())
            }
            Err(e) => {
                // Drop any partial container so failed items leave nothing
                // behind
                if plan.output.exists() {
                    if let Err(rm) = tokio::fs::remove_file(&plan.output).await {
                        warn!(
                            output = %plan.output.display(),
                            error = %rm,
                            "Failed to remove partial output"
                        );
                    }
                }
                Err(e)
            }
        }
    }
}

/// Check whether ffmpeg was built with the NVENC H.264 encoder.
pub async fn nvenc_available() -> bool {
    if which::which("ffmpeg").is_err() {
        return false;
    }

    let output = tokio::process::Command::new("ffmpeg")
        .args(["-hide_banner", "-encoders"])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
        .await;

    match output {
        Ok(out) if out.status.success() => {
            String::from_utf8_lossy(&out.stdout).contains("h264_nvenc")
        }
        _ => false,
    }
}
