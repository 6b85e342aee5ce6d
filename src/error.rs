use thiserror::Error;

/// Why a sound could not be played. Always absorbed: logged, never retried,
/// never allowed to affect the page state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaPlaybackFailure {
    #[error("no audio element is available for `{0}`")]
    AssetMissing(&'static str),

    #[error("`{cue}` could not be decoded: {detail}")]
    Decode { cue: &'static str, detail: String },

    #[error("host rejected playback of `{cue}`: {detail}")]
    Rejected { cue: &'static str, detail: String },
}

impl MediaPlaybackFailure {
    /// Categorize a DOMException raised by `HTMLMediaElement.play()`.
    pub fn from_dom_error(cue: &'static str, name: &str, message: &str) -> Self {
        let detail = if message.is_empty() {
            name.to_string()
        } else {
            format!("{name}: {message}")
        };
        match name {
            "NotSupportedError" | "EncodingError" => Self::Decode { cue, detail },
            "NotFoundError" => Self::AssetMissing(cue),
            _ => Self::Rejected { cue, detail },
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid page config: {0}")]
    Invalid(String),

    #[error("could not parse page config: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autoplay_policy_is_a_rejection() {
        let err = MediaPlaybackFailure::from_dom_error(
            "celebration",
            "NotAllowedError",
            "play() failed because the user didn't interact with the document first.",
        );
        assert!(matches!(err, MediaPlaybackFailure::Rejected { cue: "celebration", .. }));
        assert!(err.to_string().contains("NotAllowedError"));
    }

    #[test]
    fn unsupported_source_is_a_decode_failure() {
        let err = MediaPlaybackFailure::from_dom_error("escalation", "NotSupportedError", "");
        assert_eq!(
            err,
            MediaPlaybackFailure::Decode {
                cue: "escalation",
                detail: "NotSupportedError".into()
            }
        );
    }

    #[test]
    fn not_found_maps_to_missing_asset() {
        let err = MediaPlaybackFailure::from_dom_error("celebration", "NotFoundError", "gone");
        assert_eq!(err, MediaPlaybackFailure::AssetMissing("celebration"));
    }
}
