//! Quote records supplied by the external content generator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of captions (and therefore body scenes) per reel.
pub const CAPTIONS_PER_REEL: usize = 4;

/// Validation errors for a quote record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuoteError {
    #[error("record {id}: expected {CAPTIONS_PER_REEL} captions, got {got}")]
    WrongCaptionCount { id: u32, got: usize },

    #[error("record {id}: caption {index} is blank")]
    BlankCaption { id: u32, index: usize },
}

/// One externally-generated content unit for a single reel.
///
/// Read-only input to the pipeline: captions drive the body scenes, the
/// remaining fields become upload metadata. The integer id derives the
/// output filename (`reel_<id>.mp4`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub id: u32,
    pub quotes: Vec<String>,
    pub video_title: String,
    #[serde(default)]
    pub youtube_description: String,
    #[serde(default)]
    pub video_tags: Vec<String>,
}

impl QuoteRecord {
    /// Check the fixed-caption-count invariant and reject blank captions.
    pub fn validate(&self) -> Result<(), QuoteError> {
        if self.quotes.len() != CAPTIONS_PER_REEL {
            return Err(QuoteError::WrongCaptionCount {
                id: self.id,
                got: self.quotes.len(),
            });
        }
        for (index, caption) in self.quotes.iter().enumerate() {
            if caption.trim().is_empty() {
                return Err(QuoteError::BlankCaption { id: self.id, index });
            }
        }
        Ok(())
    }

    /// Output filename for this record.
    pub fn output_filename(&self) -> String {
        format!("reel_{}.mp4", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(quotes: &[&str]) -> QuoteRecord {
        QuoteRecord {
            id: 7,
            quotes: quotes.iter().map(|q| q.to_string()).collect(),
            video_title: "Title".to_string(),
            youtube_description: "Desc".to_string(),
            video_tags: vec!["shorts".to_string()],
        }
    }

    #[test]
    fn test_valid_record() {
        let r = record(&["a", "b", "c", "d"]);
        assert!(r.validate().is_ok());
        assert_eq!(r.output_filename(), "reel_7.mp4");
    }

    #[test]
    fn test_wrong_caption_count() {
        let r = record(&["a", "b", "c"]);
        assert_eq!(
            r.validate(),
            Err(QuoteError::WrongCaptionCount { id: 7, got: 3 })
        );
    }

    #[test]
    fn test_blank_caption() {
        let r = record(&["a", "  ", "c", "d"]);
        assert_eq!(r.validate(), Err(QuoteError::BlankCaption { id: 7, index: 1 }));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{"id": 1, "quotes": ["a","b","c","d"], "video_title": "t"}"#;
        let r: QuoteRecord = serde_json::from_str(json).unwrap();
        assert!(r.youtube_description.is_empty());
        assert!(r.video_tags.is_empty());
        assert!(r.validate().is_ok());
    }
}
