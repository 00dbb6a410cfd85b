//! Reel generation worker binary.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use reel_media::{check_ffmpeg, check_ffprobe, nvenc_available, FfmpegReelRenderer, FfprobeProber};
use reel_worker::{generate_batch, load_quotes, schedule_uploads, WorkerConfig};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("reel=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting reel-worker");

    let mut config = WorkerConfig::from_env();
    info!("Worker config: {:?}", config);

    if let Err(e) = check_ffmpeg() {
        error!("FFmpeg check failed: {}", e);
        std::process::exit(1);
    }
    if let Err(e) = check_ffprobe() {
        error!("FFprobe check failed: {}", e);
        std::process::exit(1);
    }

    if config.prefer_nvenc {
        if nvenc_available().await {
            config.encoding = config.encoding.clone().with_nvenc();
        } else {
            warn!("NVENC requested but not available, falling back to libx264");
            config.encoding = config.encoding.clone().without_nvenc();
        }
    }

    let records = match load_quotes(&config.quotes_path) {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to load quote records: {}", e);
            std::process::exit(1);
        }
    };

    let prober = FfprobeProber;
    let renderer = {
        let mut r = FfmpegReelRenderer::new(config.render.clone(), config.encoding.clone())
            .with_timeout(config.encode_timeout_secs);
        if config.logo_path.exists() {
            r = r.with_logo(&config.logo_path);
        } else {
            warn!(logo = %config.logo_path.display(), "Logo not found, branding disabled");
        }
        r
    };

    let mut rng = StdRng::from_os_rng();
    let report = match generate_batch(&config, &records, &prober, &renderer, &mut rng).await {
        Ok(report) => report,
        Err(e) => {
            error!("Batch generation failed: {}", e);
            std::process::exit(1);
        }
    };

    for failure in &report.failures {
        warn!(
            reel_id = failure.reel_id,
            stage = failure.stage,
            message = %failure.message,
            "Reel was not generated"
        );
    }

    let requests = match schedule_uploads(
        &report.successes,
        Utc::now(),
        &config.checkpoint_path,
        &config.publish_slots,
        config.utc_offset(),
    ) {
        Ok(requests) => requests,
        Err(e) => {
            error!("Upload scheduling failed: {}", e);
            std::process::exit(1);
        }
    };

    for request in &requests {
        info!(
            video = %request.video_path.display(),
            title = %request.title,
            publish_at = %request.publish_at,
            "Upload scheduled"
        );
    }

    info!(
        generated = report.successful(),
        attempted = report.attempted,
        scheduled = requests.len(),
        "Worker run complete"
    );

    if report.successful() == 0 {
        std::process::exit(1);
    }
}
