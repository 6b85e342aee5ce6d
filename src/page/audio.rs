use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use js_sys::Promise;
use log::{error, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{DomException, HtmlAudioElement};

use super::Page;
use crate::config::PageConfig;
use crate::controller::{AudioPlayer, SoundCue, report_playback};
use crate::error::MediaPlaybackFailure;
use crate::view::AudioReadiness;

struct Track {
    cue: SoundCue,
    element: Option<HtmlAudioElement>,
    readiness: Rc<Cell<AudioReadiness>>,
}

impl Track {
    fn open(cue: SoundCue, src: &str) -> Self {
        let readiness = Rc::new(Cell::new(AudioReadiness::Loading));
        let element = match HtmlAudioElement::new_with_src(src) {
            Ok(el) => {
                el.set_preload("metadata");
                Some(el)
            }
            Err(err) => {
                warn!("could not create {} audio element for {src}: {err:?}", cue.id());
                readiness.set(AudioReadiness::Failed);
                None
            }
        };
        Self {
            cue,
            element,
            readiness,
        }
    }
}

/// One `<audio>` element per cue.
pub(crate) struct BrowserAudio {
    celebration: Track,
    escalation: Track,
}

impl BrowserAudio {
    pub(crate) fn new(config: &PageConfig) -> Self {
        Self {
            celebration: Track::open(SoundCue::Celebration, &config.celebration_src),
            escalation: Track::open(SoundCue::Escalation, &config.escalation_src),
        }
    }

    fn track(&self, cue: SoundCue) -> &Track {
        match cue {
            SoundCue::Celebration => &self.celebration,
            SoundCue::Escalation => &self.escalation,
        }
    }

    pub(crate) fn readiness(&self, cue: SoundCue) -> AudioReadiness {
        self.track(cue).readiness.get()
    }

    /// Track `loadeddata` / `error` per element and re-render on change, then
    /// start loading.
    pub(crate) fn watch_readiness(&self, page: Weak<RefCell<Page>>) -> Result<(), JsValue> {
        for track in [&self.celebration, &self.escalation] {
            let Some(element) = &track.element else {
                continue;
            };
            for (event, outcome) in [
                ("loadeddata", AudioReadiness::Ready),
                ("error", AudioReadiness::Failed),
            ] {
                let cue = track.cue;
                let cell = Rc::clone(&track.readiness);
                let page = page.clone();
                let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
                    cell.set(outcome);
                    match outcome {
                        AudioReadiness::Failed => error!("{} audio failed to load", cue.id()),
                        _ => info!("{} audio loaded successfully", cue.id()),
                    }
                    if let Some(page) = page.upgrade() {
                        if let Ok(mut p) = page.try_borrow_mut() {
                            p.render();
                        }
                    }
                }) as Box<dyn FnMut(_)>);
                element.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
                closure.forget();
            }
            element.load();
        }
        Ok(())
    }
}

impl AudioPlayer for BrowserAudio {
    fn play(&mut self, cue: SoundCue) {
        let Some(element) = &self.track(cue).element else {
            report_playback(cue, Err(MediaPlaybackFailure::AssetMissing(cue.id())));
            return;
        };
        element.set_current_time(0.0);
        match element.play() {
            Ok(promise) => observe(cue, promise),
            Err(err) => report_playback(cue, Err(playback_failure(cue, &err))),
        }
    }
}

/// Log the promise outcome; nothing waits on it.
fn observe(cue: SoundCue, promise: Promise) {
    let on_played = Closure::once(move |_: JsValue| report_playback(cue, Ok(())));
    let on_failed =
        Closure::once(move |err: JsValue| report_playback(cue, Err(playback_failure(cue, &err))));
    let _ = promise.then2(&on_played, &on_failed);
    on_played.forget();
    on_failed.forget();
}

fn playback_failure(cue: SoundCue, err: &JsValue) -> MediaPlaybackFailure {
    match err.dyn_ref::<DomException>() {
        Some(ex) => MediaPlaybackFailure::from_dom_error(cue.id(), &ex.name(), &ex.message()),
        None => MediaPlaybackFailure::Rejected {
            cue: cue.id(),
            detail: err.as_string().unwrap_or_else(|| format!("{err:?}")),
        },
    }
}
