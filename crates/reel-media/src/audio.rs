//! Background music synchronization.
//!
//! The track is looped until it covers the final video duration, trimmed
//! to exactly that duration, and scaled to the configured volume. Looping
//! is done at the input (`-stream_loop`), trimming and volume in the
//! filter graph.

/// Number of times the track must play to cover `video_duration`.
///
/// Always at least 1; a track at least as long as the video plays once.
pub fn loops_needed(audio_duration: f64, video_duration: f64) -> u32 {
    if audio_duration <= 0.0 {
        return 1;
    }
    (video_duration / audio_duration).ceil().max(1.0) as u32
}

/// Extra input repetitions for `-stream_loop` (plays = loops + 1).
pub fn extra_stream_loops(audio_duration: f64, video_duration: f64) -> u32 {
    loops_needed(audio_duration, video_duration) - 1
}

/// Filter chain trimming the looped track to the video duration and
/// applying the volume scale, labeled `[amain]`.
pub fn music_filter_chain(input_index: usize, video_duration: f64, volume: f64) -> String {
    format!(
        "[{input_index}:a]atrim=0:{video_duration:.3},asetpts=PTS-STARTPTS,volume={volume}[amain]"
    )
}
