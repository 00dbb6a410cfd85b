//! Render-plan building.
//!
//! One plan per quote record: sample and validate source clips, choose a
//! trim window per caption, pick the reel's color scheme and hook phrase,
//! and select music. The plan is pure value data consumed by the
//! renderer.

use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::warn;

use reel_media::{
    choose_trim_window, select_clips, select_music, MediaProber, SHORT_CLIP_FALLBACK_START,
};
use reel_models::{
    default_color_schemes, HookPlan, QuoteRecord, RenderPlan, SceneShortfall, ScenePlan,
};

use crate::config::WorkerConfig;
use crate::error::{WorkerError, WorkerResult};

/// Hook phrases shown at the beginning of reels.
pub const HOOK_PHRASES: &[&str] = &[
    "99% are stuck for this one reason.",
    "Comfort is the killer of dreams.",
    "Change your circle or lose your future.",
    "Stop wanting it to finally get it.",
];

/// Build the render plan for one quote record.
pub async fn build_plan<P, R>(
    config: &WorkerConfig,
    record: &QuoteRecord,
    prober: &P,
    rng: &mut R,
) -> WorkerResult<RenderPlan>
where
    P: MediaProber + ?Sized,
    R: Rng + Send,
{
    let mut captions = record.quotes.clone();

    // Every selected clip must hold a full trim window, fallback included
    let min_clip_duration = config.render.scene_duration + SHORT_CLIP_FALLBACK_START;
    let clips = select_clips(
        &config.videos_dir,
        captions.len(),
        min_clip_duration,
        prober,
        rng,
    )
    .await?;

    if clips.len() < captions.len() {
        match config.render.shortfall {
            SceneShortfall::TruncateCaptions => {
                warn!(
                    record = record.id,
                    clips = clips.len(),
                    captions = captions.len(),
                    "Fewer clips than captions, truncating caption list"
                );
                captions.truncate(clips.len());
            }
            SceneShortfall::Fail => {
                return Err(WorkerError::plan_failed(format!(
                    "record {}: {} captions but only {} usable clips",
                    record.id,
                    captions.len(),
                    clips.len()
                )));
            }
        }
    }

    let scenes = clips
        .iter()
        .zip(captions)
        .map(|(clip, caption)| {
            let window = choose_trim_window(clip.info.duration, &config.render, rng);
            ScenePlan {
                source: clip.path.clone(),
                start: window.start,
                duration: window.duration,
                caption,
                source_width: clip.info.width,
                source_height: clip.info.height,
            }
        })
        .collect();

    let colors = default_color_schemes()
        .choose(rng)
        .cloned()
        .ok_or_else(|| WorkerError::plan_failed("empty color palette"))?;

    // A reel without a hook is still publishable
    let hook = match HOOK_PHRASES.choose(rng) {
        Some(phrase) => Some(HookPlan {
            phrase: phrase.to_string(),
            duration: config.render.hook_duration,
        }),
        None => {
            warn!(record = record.id, "No hook phrases configured, skipping intro");
            None
        }
    };

    let music = select_music(&config.music_dir, prober, rng).await?;

    Ok(RenderPlan {
        scenes,
        hook,
        music,
        colors,
        output: config.output_dir.join(record.output_filename()),
    })
}
