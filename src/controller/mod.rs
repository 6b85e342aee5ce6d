//! Response state machine for the friendship question.
//!
//! `ResponseController` owns the whole interaction: which answer was given,
//! where the evasive "no" control sits, and how many times the visitor has
//! chased it. It knows nothing about the DOM. The page shell feeds it
//! measured geometry and user events, and it drives two capabilities:
//!
//! - [`AudioPlayer`]: fire-and-forget playback of a [`SoundCue`].
//! - [`RepositionTimer`]: a deferred reset of the wiggle flag, re-armed on
//!   every jump.
//!
//! Phases only move forward: `Pending -> Accepted` or `Pending -> Escalated`.

mod geometry;

pub use geometry::{
    EvadeBounds, Point, Size, evade_bounds, recentered_position, sample_evade_position,
};

use log::{debug, error, info};
use rand::Rng;

use crate::config::EvadeSettings;
use crate::error::MediaPlaybackFailure;

/// Outcome of the question.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Pending,
    Accepted,
    /// Plain "no". Reserved: the decline control is inert until unlocked and
    /// then routes to `Escalated`, so nothing reaches this phase.
    Declined,
    Escalated,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Phase::Pending)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Celebration,
    Escalation,
}

impl SoundCue {
    pub fn id(self) -> &'static str {
        match self {
            SoundCue::Celebration => "celebration",
            SoundCue::Escalation => "escalation",
        }
    }
}

/// Plays a sound without blocking. Implementations report the eventual
/// outcome through [`report_playback`] and never retry.
pub trait AudioPlayer {
    fn play(&mut self, cue: SoundCue);
}

/// Identifies one scheduled wiggle reset. Only the latest ticket counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RepositionTicket(u64);

/// Schedules `ResponseController::on_reposition_elapsed(ticket)` after
/// `delay_ms`. Scheduling again may cancel the earlier callback.
pub trait RepositionTimer {
    fn schedule(&mut self, delay_ms: u32, ticket: RepositionTicket);
}

/// Log the result of a playback attempt. Failures stop here.
pub fn report_playback(cue: SoundCue, outcome: Result<(), MediaPlaybackFailure>) {
    match outcome {
        Ok(()) => info!("{} audio played successfully", cue.id()),
        Err(err) => error!("{} audio playback failed: {err}", cue.id()),
    }
}

/// Everything the page renders from.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionState {
    pub phase: Phase,
    pub evade_position: Point,
    pub is_repositioning: bool,
    pub evade_attempts: u8,
    pub click_unlocked: bool,
    pub celebration_overlay: bool,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            phase: Phase::Pending,
            evade_position: Point::default(),
            is_repositioning: false,
            evade_attempts: 0,
            click_unlocked: false,
            celebration_overlay: false,
        }
    }
}

pub struct ResponseController<A, T, R> {
    settings: EvadeSettings,
    state: InteractionState,
    audio: A,
    timer: T,
    rng: R,
    last_ticket: u64,
}

impl<A, T, R> ResponseController<A, T, R>
where
    A: AudioPlayer,
    T: RepositionTimer,
    R: Rng,
{
    pub fn new(settings: EvadeSettings, audio: A, timer: T, rng: R) -> Self {
        Self {
            settings,
            state: InteractionState::default(),
            audio,
            timer,
            rng,
            last_ticket: 0,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn settings(&self) -> &EvadeSettings {
        &self.settings
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Whether activating the decline control should confirm the "no".
    pub fn is_decline_activatable(&self) -> bool {
        self.state.phase == Phase::Pending && self.state.click_unlocked
    }

    /// "Yes". Returns whether anything changed.
    pub fn on_accept_requested(&mut self) -> bool {
        if self.state.phase.is_terminal() {
            debug!("accept ignored in {:?}", self.state.phase);
            return false;
        }
        self.state.phase = Phase::Accepted;
        self.state.celebration_overlay = true;
        info!(
            "accepted after {} evade attempt(s)",
            self.state.evade_attempts
        );
        self.audio.play(SoundCue::Celebration);
        true
    }

    /// Pointer or focus reached the decline control while it is still locked.
    pub fn on_decline_attempt(&mut self, surface: Size, control: Size) -> bool {
        if self.state.phase != Phase::Pending
            || self.state.click_unlocked
            || self.state.evade_attempts >= self.settings.unlock_threshold
        {
            debug!("decline attempt ignored");
            return false;
        }

        let next = sample_evade_position(&mut self.rng, surface, control, &self.settings);
        self.state.evade_position = next;
        self.state.is_repositioning = true;

        self.last_ticket += 1;
        self.timer.schedule(
            self.settings.reposition_ms,
            RepositionTicket(self.last_ticket),
        );

        self.state.evade_attempts += 1;
        debug!(
            "decline control jumped to ({:.0}, {:.0}), attempt {}/{}",
            next.x, next.y, self.state.evade_attempts, self.settings.unlock_threshold
        );
        if self.state.evade_attempts >= self.settings.unlock_threshold {
            self.state.click_unlocked = true;
            info!("decline control unlocked");
        }
        true
    }

    /// The decline control was activated. Inert until unlocked.
    pub fn on_decline_confirmed(&mut self) -> bool {
        if !self.is_decline_activatable() {
            debug!("decline confirm ignored (phase {:?})", self.state.phase);
            return false;
        }
        self.state.phase = Phase::Escalated;
        info!("declined; escalating");
        self.audio.play(SoundCue::Escalation);
        true
    }

    /// Put the decline control back at its starting spot for the current
    /// surface. Only before it has been unlocked.
    pub fn recenter_evade_control(&mut self, surface: Size) -> bool {
        if self.state.phase != Phase::Pending || self.state.click_unlocked {
            return false;
        }
        let p = recentered_position(surface, &self.settings);
        if p == self.state.evade_position {
            return false;
        }
        self.state.evade_position = p;
        true
    }

    /// Timer continuation. Stale tickets are ignored so only the most recent
    /// jump ends the wiggle.
    pub fn on_reposition_elapsed(&mut self, ticket: RepositionTicket) -> bool {
        if ticket.0 != self.last_ticket || !self.state.is_repositioning {
            return false;
        }
        self.state.is_repositioning = false;
        true
    }
}
