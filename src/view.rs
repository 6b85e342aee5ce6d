//! What the page shows for a given state.
//!
//! Pure data so it can be checked without a browser; `page` only copies these
//! values into the DOM.

use crate::config::PageConfig;
use crate::controller::{InteractionState, Phase, Point};

pub const CONFETTI: &[&str] = &["🎉", "🎊", "✨", "🌟", "💫", "🎈", "🥳", "💚", "🤍", "👏"];
pub const SPOOKS: &[&str] = &["👻", "💀", "🕷️", "🦇", "🕸️"];

/// Falling pieces shown after "yes".
pub const CONFETTI_PIECES: usize = 20;
/// Floating spooks shown after the escalated "no".
pub const SPOOK_PIECES: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Calm,
    Haunted,
}

/// Load state of one audio track.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AudioReadiness {
    #[default]
    Loading,
    Ready,
    Failed,
}

impl AudioReadiness {
    pub fn label(self) -> &'static str {
        match self {
            AudioReadiness::Loading => "Loading audio...",
            AudioReadiness::Ready => "Audio ready",
            AudioReadiness::Failed => "Audio unavailable",
        }
    }
}

/// The evasive control as it should be drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct DeclineControl {
    pub label: &'static str,
    pub position: Point,
    pub wiggling: bool,
    pub clickable: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PageView {
    pub theme: Theme,
    pub hero: &'static str,
    pub headline: String,
    pub message: String,
    pub footer: Option<String>,
    pub emoji_row: &'static [&'static str],
    /// `Some` only while the question is open.
    pub decline: Option<DeclineControl>,
    pub accept_label: &'static str,
    pub audio_status: &'static str,
    pub attempts: Option<String>,
    pub confetti: bool,
    pub haunting: bool,
}

pub fn page_view(
    state: &InteractionState,
    config: &PageConfig,
    celebration_audio: AudioReadiness,
) -> PageView {
    let friend = &config.friend_name;
    let asker = &config.asker_name;
    let threshold = config.evade.unlock_threshold;

    let mut view = PageView {
        theme: Theme::Calm,
        hero: "👋",
        headline: String::new(),
        message: String::new(),
        footer: None,
        emoji_row: &[],
        decline: None,
        accept_label: "Yes, I'd love to!",
        audio_status: celebration_audio.label(),
        attempts: None,
        confetti: state.celebration_overlay,
        haunting: false,
    };

    match state.phase {
        Phase::Pending => {
            view.headline = format!("Hiiii {friend}!");
            view.message =
                format!("It's {asker} here! I was wondering... would you like to be my friend?");
            view.decline = Some(DeclineControl {
                label: if state.click_unlocked {
                    "No way... (Click me!)"
                } else {
                    "No way..."
                },
                position: state.evade_position,
                wiggling: state.is_repositioning,
                clickable: state.click_unlocked,
            });
            if state.evade_attempts > 0 {
                let mut label = format!("Attempts: {}/{threshold}", state.evade_attempts);
                if state.click_unlocked {
                    label.push_str(" (Ready to click!)");
                }
                view.attempts = Some(label);
            }
        }
        Phase::Accepted => {
            view.hero = "🎉";
            view.headline = "AMAZING!".into();
            view.message = format!("{friend}, you just made {asker} the happiest person!");
            view.footer = Some("Yaaayyyy we are friendsss! 👫".into());
            view.emoji_row = &["💚", "🤍", "✨", "🎈", "🌟"];
        }
        Phase::Declined => {
            view.hero = "😢";
            view.headline = "That's okay...".into();
            view.message = "But you'll never catch that button anyway! 😏".into();
        }
        Phase::Escalated => {
            view.theme = Theme::Haunted;
            view.hero = "🏚️";
            view.headline = "YOU DARE SAY NO?!".into();
            view.message = "The spirits of the abandoned house are not pleased... \
                            You have awakened something dark! 👻💀"
                .into();
            view.footer = Some("The ghosts whisper... \"Lets change the decision...\" 🌙".into());
            view.emoji_row = &["💀", "👻", "🕷️", "🦇", "🕸️"];
            view.haunting = true;
        }
    }
    view
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending() -> InteractionState {
        InteractionState::default()
    }

    #[test]
    fn pending_view_greets_friend() {
        let view = page_view(&pending(), &PageConfig::default(), AudioReadiness::Loading);
        assert_eq!(view.theme, Theme::Calm);
        assert_eq!(view.headline, "Hiiii Luna!");
        assert!(view.message.starts_with("It's Bashy here!"));
        assert_eq!(view.audio_status, "Loading audio...");
        assert!(view.attempts.is_none());
        let decline = view.decline.unwrap();
        assert_eq!(decline.label, "No way...");
        assert!(!decline.clickable);
    }

    #[test]
    fn attempts_label_tracks_progress() {
        let mut state = pending();
        state.evade_attempts = 2;
        let view = page_view(&state, &PageConfig::default(), AudioReadiness::Ready);
        assert_eq!(view.attempts.as_deref(), Some("Attempts: 2/3"));
        assert_eq!(view.audio_status, "Audio ready");

        state.evade_attempts = 3;
        state.click_unlocked = true;
        let view = page_view(&state, &PageConfig::default(), AudioReadiness::Ready);
        assert_eq!(view.attempts.as_deref(), Some("Attempts: 3/3 (Ready to click!)"));
        let decline = view.decline.unwrap();
        assert_eq!(decline.label, "No way... (Click me!)");
        assert!(decline.clickable);
    }

    #[test]
    fn accepted_view_celebrates() {
        let state = InteractionState {
            phase: Phase::Accepted,
            celebration_overlay: true,
            ..pending()
        };
        let view = page_view(&state, &PageConfig::default(), AudioReadiness::Failed);
        assert_eq!(view.headline, "AMAZING!");
        assert_eq!(view.message, "Luna, you just made Bashy the happiest person!");
        assert!(view.confetti);
        assert!(!view.haunting);
        assert!(view.decline.is_none());
        assert_eq!(view.emoji_row.len(), 5);
    }

    #[test]
    fn only_escalation_is_haunted() {
        for phase in [Phase::Pending, Phase::Accepted, Phase::Declined] {
            let state = InteractionState { phase, ..pending() };
            let view = page_view(&state, &PageConfig::default(), AudioReadiness::Ready);
            assert_eq!(view.theme, Theme::Calm);
        }
        let state = InteractionState {
            phase: Phase::Escalated,
            ..pending()
        };
        let view = page_view(&state, &PageConfig::default(), AudioReadiness::Ready);
        assert_eq!(view.theme, Theme::Haunted);
        assert!(view.haunting);
        assert_eq!(view.headline, "YOU DARE SAY NO?!");
    }

    #[test]
    fn names_come_from_config() {
        let config = PageConfig {
            friend_name: "Mira".into(),
            asker_name: "Oz".into(),
            ..PageConfig::default()
        };
        let view = page_view(&pending(), &config, AudioReadiness::Loading);
        assert_eq!(view.headline, "Hiiii Mira!");
        assert!(view.message.contains("It's Oz here!"));
    }
}
