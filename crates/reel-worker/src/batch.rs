//! Sequential batch orchestration.
//!
//! One reel's full pipeline completes before the next begins; hardware
//! encoders are single-session-efficient, so items are never encoded
//! concurrently. A failure at any stage aborts only its item — the plan
//! and any spawned encoder are dropped, the failure is recorded, and the
//! loop continues.

use std::path::Path;

use rand::Rng;
use tracing::{error, info};

use reel_media::{MediaProber, ReelRenderer, VIDEO_EXTENSIONS};
use reel_models::{QuoteRecord, UploadRequest};

use crate::config::WorkerConfig;
use crate::error::{WorkerError, WorkerResult};
use crate::planner::build_plan;

/// One successfully encoded reel with its upload metadata.
#[derive(Debug, Clone)]
pub struct ReelArtifact {
    pub reel_id: u32,
    pub path: std::path::PathBuf,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
}

/// One failed batch item with enough context to diagnose it.
#[derive(Debug, Clone)]
pub struct BatchFailure {
    pub reel_id: u32,
    /// Pipeline stage that failed ("plan" or "encode").
    pub stage: &'static str,
    pub message: String,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub attempted: usize,
    pub successes: Vec<ReelArtifact>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn successful(&self) -> usize {
        self.successes.len()
    }
}

/// Check the source directory exists and holds at least one candidate
/// clip. Without any clips no partial work is possible, so this is fatal
/// to the whole batch.
fn check_source_videos(dir: &Path) -> WorkerResult<()> {
    if !dir.is_dir() {
        return Err(WorkerError::SourceVideosUnavailable(dir.to_path_buf()));
    }
    let has_candidate = std::fs::read_dir(dir)?.flatten().any(|entry| {
        let path = entry.path();
        path.is_file()
            && path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| VIDEO_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
                .unwrap_or(false)
    });
    if !has_candidate {
        return Err(WorkerError::SourceVideosUnavailable(dir.to_path_buf()));
    }
    Ok(())
}

/// Generate one reel per quote record, sequentially.
///
/// Partial failure never aborts the batch; only missing preconditions do
/// (no records at all, or an unusable source video directory).
pub async fn generate_batch<P, T, R>(
    config: &WorkerConfig,
    records: &[QuoteRecord],
    prober: &P,
    renderer: &T,
    rng: &mut R,
) -> WorkerResult<BatchReport>
where
    P: MediaProber + ?Sized,
    T: ReelRenderer + ?Sized,
    R: Rng + Send,
{
    if records.is_empty() {
        return Err(WorkerError::NoQuotes);
    }
    check_source_videos(&config.videos_dir)?;

    tokio::fs::create_dir_all(&config.output_dir).await?;

    let mut report = BatchReport {
        attempted: records.len(),
        ..Default::default()
    };

    for record in records {
        info!(reel_id = record.id, title = %record.video_title, "Generating reel");

        let plan = match build_plan(config, record, prober, rng).await {
            Ok(plan) => plan,
            Err(e) => {
                error!(reel_id = record.id, stage = "plan", error = %e, "Reel failed");
                report.failures.push(BatchFailure {
                    reel_id: record.id,
                    stage: "plan",
                    message: e.to_string(),
                });
                continue;
            }
        };

        match renderer.render(&plan).await {
            Ok(()) => {
                info!(reel_id = record.id, output = %plan.output.display(), "Reel complete");
                report.successes.push(ReelArtifact {
                    reel_id: record.id,
                    path: plan.output.clone(),
                    title: record.video_title.clone(),
                    description: record.youtube_description.clone(),
                    tags: UploadRequest::merged_tags(&record.video_tags),
                });
            }
            Err(e) => {
                error!(reel_id = record.id, stage = "encode", error = %e, "Reel failed");
                report.failures.push(BatchFailure {
                    reel_id: record.id,
                    stage: "encode",
                    message: e.to_string(),
                });
            }
        }
    }

    info!(
        successful = report.successful(),
        attempted = report.attempted,
        "Batch generation complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::TempDir;

    use reel_media::{AudioInfo, MediaError, MediaResult, VideoInfo};
    use reel_models::RenderPlan;

    struct FakeProber {
        videos: HashMap<PathBuf, VideoInfo>,
    }

    #[async_trait]
    impl MediaProber for FakeProber {
        async fn video_info(&self, path: &Path) -> MediaResult<VideoInfo> {
            self.videos
                .get(path)
                .cloned()
                .ok_or_else(|| MediaError::InvalidMedia(path.display().to_string()))
        }

        async fn audio_info(&self, _path: &Path) -> MediaResult<AudioInfo> {
            Ok(AudioInfo { duration: 45.0 })
        }
    }

    /// Renderer that records plans and fails for configured reel ids.
    struct FakeRenderer {
        fail_outputs: Vec<String>,
        rendered: Mutex<Vec<RenderPlan>>,
    }

    impl FakeRenderer {
        fn new(fail_outputs: &[&str]) -> Self {
            Self {
                fail_outputs: fail_outputs.iter().map(|s| s.to_string()).collect(),
                rendered: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ReelRenderer for FakeRenderer {
        async fn render(&self, plan: &RenderPlan) -> MediaResult<()> {
            let name = plan
                .output
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if self.fail_outputs.contains(&name) {
                return Err(MediaError::ffmpeg_failed("simulated encode failure", None, Some(1)));
            }
            self.rendered.lock().unwrap().push(plan.clone());
            Ok(())
        }
    }

    fn record(id: u32) -> QuoteRecord {
        QuoteRecord {
            id,
            quotes: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            video_title: format!("Title {id}"),
            youtube_description: "Desc".into(),
            video_tags: vec!["focus".into()],
        }
    }

    fn fixture(clip_count: usize) -> (TempDir, WorkerConfig, FakeProber) {
        let dir = TempDir::new().unwrap();
        let videos = dir.path().join("videos");
        std::fs::create_dir_all(&videos).unwrap();

        let mut table = HashMap::new();
        for i in 0..clip_count {
            let path = videos.join(format!("clip{i}.mp4"));
            std::fs::write(&path, b"stub").unwrap();
            table.insert(
                path,
                VideoInfo {
                    duration: 30.0,
                    width: 1920,
                    height: 1080,
                    fps: 30.0,
                },
            );
        }

        let config = WorkerConfig {
            videos_dir: videos,
            music_dir: dir.path().join("musics"),
            output_dir: dir.path().join("reels"),
            ..WorkerConfig::default()
        };

        (dir, config, FakeProber { videos: table })
    }

    #[tokio::test]
    async fn test_batch_resilience() {
        let (_dir, config, prober) = fixture(6);
        let renderer = FakeRenderer::new(&["reel_2.mp4"]);
        let mut rng = StdRng::seed_from_u64(1);

        let records = vec![record(1), record(2), record(3)];
        let report = generate_batch(&config, &records, &prober, &renderer, &mut rng)
            .await
            .unwrap();

        // Item 2 fails, items 1 and 3 still succeed
        assert_eq!(report.attempted, 3);
        assert_eq!(report.successful(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].reel_id, 2);
        assert_eq!(report.failures[0].stage, "encode");

        let ids: Vec<u32> = report.successes.iter().map(|a| a.reel_id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_single_record_with_three_clips() {
        // 3 valid clips, 4 captions: degraded to 3 scenes, no error
        let (_dir, config, prober) = fixture(3);
        let renderer = FakeRenderer::new(&[]);
        let mut rng = StdRng::seed_from_u64(2);

        let report = generate_batch(&config, &[record(1)], &prober, &renderer, &mut rng)
            .await
            .unwrap();
        assert_eq!(report.successful(), 1);
        assert!(report.successes[0].path.ends_with("reel_1.mp4"));

        let rendered = renderer.rendered.lock().unwrap();
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].scenes.len(), 3);
        // No music directory in the fixture: silent reel
        assert!(rendered[0].music.is_none());
    }

    #[tokio::test]
    async fn test_no_records_is_fatal() {
        let (_dir, config, prober) = fixture(3);
        let renderer = FakeRenderer::new(&[]);
        let mut rng = StdRng::seed_from_u64(3);

        let err = generate_batch(&config, &[], &prober, &renderer, &mut rng)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkerError::NoQuotes));
    }

    #[tokio::test]
    async fn test_missing_video_dir_is_fatal() {
        let (_dir, mut config, prober) = fixture(3);
        config.videos_dir = config.videos_dir.join("missing");
        let renderer = FakeRenderer::new(&[]);
        let mut rng = StdRng::seed_from_u64(4);

        let err = generate_batch(&config, &[record(1)], &prober, &renderer, &mut rng)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkerError::SourceVideosUnavailable(_)));
    }

    #[tokio::test]
    async fn test_empty_video_dir_is_fatal() {
        let (_dir, config, prober) = fixture(0);
        let renderer = FakeRenderer::new(&[]);
        let mut rng = StdRng::seed_from_u64(5);

        let err = generate_batch(&config, &[record(1)], &prober, &renderer, &mut rng)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkerError::SourceVideosUnavailable(_)));
    }

    #[tokio::test]
    async fn test_tags_include_defaults() {
        let (_dir, config, prober) = fixture(4);
        let renderer = FakeRenderer::new(&[]);
        let mut rng = StdRng::seed_from_u64(6);

        let report = generate_batch(&config, &[record(9)], &prober, &renderer, &mut rng)
            .await
            .unwrap();
        let tags = &report.successes[0].tags;
        assert!(tags.contains(&"focus".to_string()));
        assert!(tags.contains(&"shorts".to_string()));
    }
}
