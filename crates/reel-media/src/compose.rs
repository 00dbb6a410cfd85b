//! Scene composition as ffmpeg filter graphs.
//!
//! Every reel follows one fixed visual template. Per body scene: the
//! trimmed clip is scaled to cover the target frame without distortion,
//! center-cropped to the exact output size, dimmed with a full-frame dark
//! box, captioned with stroked centered text, and faded in and out. A
//! text-only hook scene on black is prepended, then everything is
//! concatenated. The graph fragments built here are pure strings, which
//! keeps the geometry and layering unit-testable without ffmpeg.

use std::path::PathBuf;

use tracing::warn;

use reel_models::{ColorScheme, HookPlan, RenderPlan, RenderSettings, ScenePlan};

use crate::error::{MediaError, MediaResult};

/// Scale `src` uniformly so it covers `target` in both axes.
///
/// Whichever dimension binds is matched exactly; the other is rounded and
/// clamped to at least the target so the follow-up crop always succeeds.
pub fn scaled_dimensions(src: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (sw, sh) = (src.0 as f64, src.1 as f64);
    let (tw, th) = (target.0 as f64, target.1 as f64);

    let src_aspect = sw / sh;
    let target_aspect = tw / th;

    if src_aspect > target_aspect {
        // Wider than the target frame: match height, let width overflow
        let width = (th * src_aspect).round() as u32;
        (width.max(target.0), target.1)
    } else {
        let height = (tw / src_aspect).round() as u32;
        (target.0, height.max(target.1))
    }
}

/// Centered crop offsets from `scaled` down to `target`.
pub fn crop_offsets(scaled: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    ((scaled.0 - target.0) / 2, (scaled.1 - target.1) / 2)
}

/// Average glyph width as a fraction of the font size, used to turn a
/// pixel box width into a per-line character budget.
const GLYPH_WIDTH_FRAC: f64 = 0.55;

/// Greedy word wrap to at most `max_chars` characters per line.
///
/// A single word longer than the budget gets its own line rather than
/// being split mid-word.
pub fn wrap_text(text: &str, max_chars: usize) -> String {
    let max_chars = max_chars.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}

/// Escape a value for use inside a single-quoted filter option.
pub fn escape_filter_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace(':', "\\:")
        .replace('%', "\\%")
        .replace(',', "\\,")
}

/// Resolve the configured font file, falling back to the system default
/// (no `fontfile` option) when it is absent.
fn resolve_font(settings: &RenderSettings) -> Option<PathBuf> {
    match &settings.font_file {
        Some(path) if path.exists() => Some(path.clone()),
        Some(path) => {
            warn!(font = %path.display(), "Font file not found, using system default");
            None
        }
        None => None,
    }
}

/// Builds the video half of a reel's filter graph.
#[derive(Debug)]
pub struct SceneGraphBuilder<'a> {
    settings: &'a RenderSettings,
    colors: &'a ColorScheme,
    font: Option<PathBuf>,
}

impl<'a> SceneGraphBuilder<'a> {
    pub fn new(settings: &'a RenderSettings, colors: &'a ColorScheme) -> Self {
        let font = resolve_font(settings);
        Self {
            settings,
            colors,
            font,
        }
    }

    /// Centered stroked drawtext for a caption or the hook phrase,
    /// wrapped to stay inside `box_width` pixels.
    fn drawtext(
        &self,
        text: &str,
        font_size: u32,
        box_width: u32,
        fill: &str,
        stroke: &str,
    ) -> String {
        let per_line = (box_width as f64 / (font_size as f64 * GLYPH_WIDTH_FRAC)) as usize;
        let wrapped = wrap_text(text, per_line);
        let mut options = vec![format!("text='{}'", escape_filter_text(&wrapped))];
        if let Some(font) = &self.font {
            options.push(format!(
                "fontfile='{}'",
                escape_filter_text(&font.to_string_lossy())
            ));
        }
        options.push(format!("fontsize={}", font_size));
        options.push(format!("fontcolor={}", fill));
        options.push("borderw=1".to_string());
        options.push(format!("bordercolor={}", stroke));
        options.push("x=(w-text_w)/2".to_string());
        options.push("y=(h-text_h)/2".to_string());
        format!("drawtext={}", options.join(":"))
    }

    /// Filter chain for one body scene, labeled `[scene<index>]`.
    ///
    /// Layer order is fixed: base clip, dark overlay, caption; fades wrap
    /// the composed stack. A fade longer than half the scene simply
    /// overlaps its counterpart.
    pub fn scene_chain(&self, index: usize, scene: &ScenePlan) -> String {
        let target = (self.settings.target_width, self.settings.target_height);
        let scaled = scaled_dimensions((scene.source_width, scene.source_height), target);
        let (crop_x, crop_y) = crop_offsets(scaled, target);
        let fade = self.settings.fade_duration;
        let fade_out_start = (scene.duration - fade).max(0.0);

        format!(
            "[{index}:v]scale={sw}:{sh},crop={tw}:{th}:{cx}:{cy},fps={fps},format=yuv420p,\
             drawbox=x=0:y=0:w=iw:h=ih:color=black@{opacity}:t=fill,\
             {caption},\
             fade=t=in:st=0:d={fade:.3},fade=t=out:st={fos:.3}:d={fade:.3},\
             setsar=1[scene{index}]",
            index = index,
            sw = scaled.0,
            sh = scaled.1,
            tw = target.0,
            th = target.1,
            cx = crop_x,
            cy = crop_y,
            fps = self.settings.fps,
            opacity = self.settings.overlay_opacity,
            caption = self.drawtext(
                &scene.caption,
                self.settings.caption_font_size,
                self.settings.caption_box_width,
                &self.colors.text,
                "grey",
            ),
            fade = fade,
            fos = fade_out_start,
        )
    }

    /// Lavfi source spec for the hook's black background.
    pub fn hook_source(&self, hook: &HookPlan) -> String {
        format!(
            "color=c=black:size={}x{}:rate={}:duration={:.3}",
            self.settings.target_width, self.settings.target_height, self.settings.fps, hook.duration
        )
    }

    /// Filter chain for the hook scene, labeled `[hook]`.
    ///
    /// The phrase uses the scheme's stroke color for both fill and
    /// outline.
    pub fn hook_chain(&self, input_index: usize, hook: &HookPlan) -> String {
        format!(
            "[{index}:v]{text},format=yuv420p,setsar=1[hook]",
            index = input_index,
            text = self.drawtext(
                &hook.phrase,
                self.settings.hook_font_size,
                self.settings.hook_box_width,
                &self.colors.stroke,
                &self.colors.stroke,
            ),
        )
    }

    /// Concat of hook (if present) and all scenes, labeled `[vmain]`.
    ///
    /// Each scene keeps its independent layering; concat does no
    /// cross-scene blending.
    pub fn concat_chain(&self, has_hook: bool, scene_count: usize) -> String {
        let mut labels = String::new();
        if has_hook {
            labels.push_str("[hook]");
        }
        for index in 0..scene_count {
            labels.push_str(&format!("[scene{index}]"));
        }
        let total = scene_count + usize::from(has_hook);
        format!("{labels}concat=n={total}:v=1:a=0[vmain]")
    }

    /// Full video filter graph for a plan.
    ///
    /// Scene inputs are expected at indices `0..scenes.len()`; the hook
    /// lavfi input (when present) at `hook_input`. Returns the joined
    /// fragments and the final label.
    pub fn build(
        &self,
        plan: &RenderPlan,
        hook_input: Option<usize>,
    ) -> MediaResult<(String, String)> {
        if plan.scenes.is_empty() {
            return Err(MediaError::composition_failed("no scenes to compose"));
        }

        let mut chains: Vec<String> = Vec::with_capacity(plan.scenes.len() + 2);

        if let (Some(hook), Some(input)) = (&plan.hook, hook_input) {
            chains.push(self.hook_chain(input, hook));
        }

        for (index, scene) in plan.scenes.iter().enumerate() {
            chains.push(self.scene_chain(index, scene));
        }

        let has_hook = plan.hook.is_some() && hook_input.is_some();
        chains.push(self.concat_chain(has_hook, plan.scenes.len()));

        Ok((chains.join(";"), "vmain".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> RenderSettings {
        RenderSettings::default()
    }

    fn colors() -> ColorScheme {
        ColorScheme::new("yellow", "white")
    }

    fn scene(width: u32, height: u32) -> ScenePlan {
        ScenePlan {
            source: PathBuf::from("clip.mp4"),
            start: 2.0,
            duration: 2.0,
            caption: "Discipline beats motivation".to_string(),
            source_width: width,
            source_height: height,
        }
    }

    #[test]
    fn test_scaled_dimensions_cover_target() {
        let target = (1080, 1920);
        for src in [
            (1920, 1080),
            (1280, 720),
            (3840, 2160),
            (1080, 1920),
            (720, 1280),
            (640, 480),
            (1000, 2000),
            (1079, 1921),
        ] {
            let scaled = scaled_dimensions(src, target);
            assert!(scaled.0 >= target.0, "width too small for {src:?}");
            assert!(scaled.1 >= target.1, "height too small for {src:?}");
            // One axis is matched exactly
            assert!(scaled.0 == target.0 || scaled.1 == target.1);
        }
    }

    #[test]
    fn test_scaled_dimensions_landscape() {
        // 16:9 source into 9:16 target scales by height
        let scaled = scaled_dimensions((1920, 1080), (1080, 1920));
        assert_eq!(scaled.1, 1920);
        assert_eq!(scaled.0, 3413); // 1920 * (1920/1080), rounded
    }

    #[test]
    fn test_crop_is_centered_and_exact() {
        let target = (1080, 1920);
        let scaled = scaled_dimensions((1920, 1080), target);
        let (x, y) = crop_offsets(scaled, target);
        assert_eq!(x, (scaled.0 - 1080) / 2);
        assert_eq!(y, 0);
        // The crop output is exactly the target by construction
        assert!(scaled.0 - x >= target.0);
        assert!(scaled.1 - y >= target.1);
    }

    #[test]
    fn test_matching_aspect_passthrough() {
        let scaled = scaled_dimensions((540, 960), (1080, 1920));
        assert_eq!(scaled, (1080, 1920));
        assert_eq!(crop_offsets(scaled, (1080, 1920)), (0, 0));
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("a b c", 3), "a b\nc");
        assert_eq!(wrap_text("short line", 40), "short line");
        // An oversized word gets its own line, unsplit
        assert_eq!(wrap_text("x incomprehensibilities y", 10), "x\nincomprehensibilities\ny");
    }

    #[test]
    fn test_long_caption_wraps_inside_frame() {
        let s = settings();
        let c = colors();
        let builder = SceneGraphBuilder::new(&s, &c);
        let mut long = scene(1920, 1080);
        long.caption =
            "The distance between who you are and who you want to be is what you do every single day"
                .to_string();

        let chain = builder.scene_chain(0, &long);
        assert!(chain.contains('\n'), "long caption must wrap");

        // 900px box at font size 40 allows 40 characters per line
        let text = chain
            .split("text='")
            .nth(1)
            .and_then(|rest| rest.split('\'').next())
            .unwrap();
        for line in text.lines() {
            assert!(line.chars().count() <= 40, "line too wide: {line:?}");
        }
        assert!(text.lines().count() >= 3);
    }

    #[test]
    fn test_escape_filter_text() {
        assert_eq!(
            escape_filter_text("it's 100%: a,b"),
            "it\\'s 100\\%\\: a\\,b"
        );
    }

    #[test]
    fn test_scene_chain_contents() {
        let s = settings();
        let c = colors();
        let builder = SceneGraphBuilder::new(&s, &c);
        let chain = builder.scene_chain(0, &scene(1920, 1080));

        assert!(chain.starts_with("[0:v]scale=3413:1920,crop=1080:1920:1166:0"));
        assert!(chain.contains("drawbox=x=0:y=0:w=iw:h=ih:color=black@0.6:t=fill"));
        assert!(chain.contains("fontcolor=white"));
        assert!(chain.contains("bordercolor=grey"));
        assert!(chain.contains("fade=t=in:st=0:d=0.300"));
        assert!(chain.contains("fade=t=out:st=1.700:d=0.300"));
        assert!(chain.ends_with("[scene0]"));
    }

    #[test]
    fn test_overlapping_fades_accepted() {
        let s = settings().with_fade_duration(1.5);
        let c = colors();
        let builder = SceneGraphBuilder::new(&s, &c);
        // Fade longer than half the 2s scene: out starts at 0.5, overlap ok
        let chain = builder.scene_chain(1, &scene(1920, 1080));
        assert!(chain.contains("fade=t=out:st=0.500:d=1.500"));
    }

    #[test]
    fn test_hook_source_and_chain() {
        let s = settings();
        let c = colors();
        let builder = SceneGraphBuilder::new(&s, &c);
        let hook = HookPlan {
            phrase: "Comfort is the killer of dreams.".to_string(),
            duration: 2.0,
        };

        let source = builder.hook_source(&hook);
        assert_eq!(source, "color=c=black:size=1080x1920:rate=30:duration=2.000");

        let chain = builder.hook_chain(3, &hook);
        assert!(chain.starts_with("[3:v]drawtext="));
        assert!(chain.contains("fontcolor=yellow"));
        assert!(chain.contains("bordercolor=yellow"));
        assert!(chain.ends_with("[hook]"));
    }

    #[test]
    fn test_build_full_graph() {
        let s = settings();
        let c = colors();
        let builder = SceneGraphBuilder::new(&s, &c);
        let plan = RenderPlan {
            scenes: vec![scene(1920, 1080), scene(1280, 720)],
            hook: Some(HookPlan {
                phrase: "Stop wanting it.".to_string(),
                duration: 2.0,
            }),
            music: None,
            colors: c.clone(),
            output: PathBuf::from("reel_1.mp4"),
        };

        let (graph, label) = builder.build(&plan, Some(2)).unwrap();
        assert_eq!(label, "vmain");
        assert!(graph.contains("[hook][scene0][scene1]concat=n=3:v=1:a=0[vmain]"));
    }

    #[test]
    fn test_build_without_hook() {
        let s = settings();
        let c = colors();
        let builder = SceneGraphBuilder::new(&s, &c);
        let plan = RenderPlan {
            scenes: vec![scene(1920, 1080)],
            hook: None,
            music: None,
            colors: c.clone(),
            output: PathBuf::from("reel_2.mp4"),
        };

        let (graph, _) = builder.build(&plan, None).unwrap();
        assert!(graph.contains("[scene0]concat=n=1:v=1:a=0[vmain]"));
        assert!(!graph.contains("[hook]"));
    }

    #[test]
    fn test_build_empty_plan_fails() {
        let s = settings();
        let c = colors();
        let builder = SceneGraphBuilder::new(&s, &c);
        let plan = RenderPlan {
            scenes: vec![],
            hook: None,
            music: None,
            colors: c.clone(),
            output: PathBuf::from("reel_3.mp4"),
        };
        assert!(matches!(
            builder.build(&plan, None),
            Err(MediaError::CompositionFailed(_))
        ));
    }
}
