//! Browser shell: builds the DOM, wires events into the controller and
//! renders the view model.
//!
//! The page is held in an `Rc<RefCell<Page>>`. Event closures keep strong
//! clones for the lifetime of the document; timer and audio callbacks only
//! hold `Weak` references.

mod audio;
mod timer;

use std::cell::RefCell;
use std::rc::Rc;

use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, EventTarget, window};

use crate::config::PageConfig;
use crate::controller::{Phase, RepositionTicket, ResponseController, Size, SoundCue};
use crate::view::{self, PageView, Theme};

use audio::BrowserAudio;
use timer::BrowserTimer;

type Controller = ResponseController<BrowserAudio, BrowserTimer, StdRng>;

pub(crate) struct Page {
    config: PageConfig,
    controller: Controller,
    dom: PageDom,
    decor_rng: StdRng,
    confetti_drawn: bool,
    spooks_drawn: bool,
}

/// Elements the page writes into. Ids are prefixed with the mount id so more
/// than one page can live in a document.
struct PageDom {
    root: Element,
    surface: Element,
    card: Element,
    hero: Element,
    headline: Element,
    message: Element,
    prompt: Element,
    accept: Element,
    decline: Element,
    status: Element,
    emoji_row: Element,
    footer: Element,
    confetti: Element,
    spooks: Element,
}

pub(crate) fn mount(config: PageConfig) -> Result<(), JsValue> {
    config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    install_keyframes(&doc)?;
    let dom = PageDom::build(&doc, &config.mount_id)?;
    let audio = BrowserAudio::new(&config);

    let page = Rc::new_cyclic(|weak| {
        let timer = BrowserTimer::new(win.clone(), weak.clone());
        let controller =
            ResponseController::new(config.evade.clone(), audio, timer, StdRng::from_entropy());
        RefCell::new(Page {
            config,
            controller,
            dom,
            decor_rng: StdRng::from_entropy(),
            confetti_drawn: false,
            spooks_drawn: false,
        })
    });

    page.borrow()
        .controller
        .audio()
        .watch_readiness(Rc::downgrade(&page))?;
    wire_events(&win, &page)?;

    {
        let mut p = page.borrow_mut();
        p.recenter();
        p.render();
        info!("friend request page mounted at #{}", p.config.mount_id);
    }
    Ok(())
}

fn wire_events(win: &web_sys::Window, page: &Rc<RefCell<Page>>) -> Result<(), JsValue> {
    let (accept, decline) = {
        let p = page.borrow();
        (p.dom.accept.clone(), p.dom.decline.clone())
    };
    listen(&accept, "click", page, Page::accept)?;
    // Approaching the locked control makes it jump; once unlocked these are no-ops.
    listen(&decline, "mouseenter", page, Page::decline_attempt)?;
    listen(&decline, "focus", page, Page::decline_attempt)?;
    listen(&decline, "click", page, Page::decline_confirm)?;
    listen(win, "resize", page, Page::recenter)?;
    Ok(())
}

/// Attach `handler` to `event`, re-rendering when it reports a change.
fn listen(
    target: &EventTarget,
    event: &'static str,
    page: &Rc<RefCell<Page>>,
    handler: fn(&mut Page) -> bool,
) -> Result<(), JsValue> {
    let page = Rc::clone(page);
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
        match page.try_borrow_mut() {
            Ok(mut p) => {
                if handler(&mut *p) {
                    p.render();
                }
            }
            Err(_) => warn!("{event} fired while the page was busy; ignored"),
        }
    }) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

impl Page {
    fn measure(&self) -> (Size, Size) {
        let surface = self.dom.surface.get_bounding_client_rect();
        let control = self.dom.decline.get_bounding_client_rect();
        (
            Size::new(surface.width(), surface.height()),
            Size::new(control.width(), control.height()),
        )
    }

    fn accept(&mut self) -> bool {
        self.controller.on_accept_requested()
    }

    fn decline_attempt(&mut self) -> bool {
        let (surface, control) = self.measure();
        self.controller.on_decline_attempt(surface, control)
    }

    fn decline_confirm(&mut self) -> bool {
        self.controller.on_decline_confirmed()
    }

    fn recenter(&mut self) -> bool {
        let (surface, _) = self.measure();
        self.controller.recenter_evade_control(surface)
    }

    pub(crate) fn reposition_elapsed(&mut self, ticket: RepositionTicket) {
        if self.controller.on_reposition_elapsed(ticket) {
            self.render();
        }
    }

    pub(crate) fn render(&mut self) {
        let readiness = self.controller.audio().readiness(SoundCue::Celebration);
        let view = view::page_view(self.controller.state(), &self.config, readiness);
        let phase = self.controller.state().phase;
        self.paint(&view, phase);
        if view.confetti && !self.confetti_drawn {
            self.confetti_drawn = true;
            self.scatter_confetti();
        }
        if view.haunting && !self.spooks_drawn {
            self.spooks_drawn = true;
            self.scatter_spooks();
        }
    }

    fn paint(&self, view: &PageView, phase: Phase) {
        let dom = &self.dom;
        set_style(&dom.root, &root_style(view.theme));
        set_style(&dom.card, card_style(view.theme));
        dom.hero.set_text_content(Some(view.hero));
        dom.headline.set_text_content(Some(&view.headline));
        set_style(&dom.headline, &headline_style(phase));
        dom.message.set_text_content(Some(&view.message));

        match &view.decline {
            Some(decline) => {
                set_style(&dom.prompt, PROMPT_STYLE);
                dom.accept.set_text_content(Some(&format!("♥ {}", view.accept_label)));
                dom.decline.set_text_content(Some(decline.label));
                let motion = if decline.wiggling {
                    "transform:scale(1.1) rotate(12deg); transition:all 0.4s cubic-bezier(0.68,-0.55,0.265,1.55);"
                } else {
                    "transition:none;"
                };
                let cursor = if decline.clickable { "pointer" } else { "default" };
                set_style(
                    &dom.decline,
                    &format!(
                        "{DECLINE_BASE} left:{:.1}px; top:{:.1}px; cursor:{cursor}; {motion}",
                        decline.position.x, decline.position.y
                    ),
                );
                let mut status = format!("🔊 {}", view.audio_status);
                if let Some(attempts) = &view.attempts {
                    status.push_str("  ·  ");
                    status.push_str(attempts);
                }
                dom.status.set_text_content(Some(&status));
            }
            None => {
                set_style(&dom.prompt, "display:none;");
                set_style(&dom.decline, "display:none;");
            }
        }

        let row: String = view
            .emoji_row
            .iter()
            .enumerate()
            .map(|(i, e)| {
                format!(
                    "<span style='display:inline-block; margin:0 10px; animation:fr-bounce 1s infinite; animation-delay:{}ms;'>{e}</span>",
                    (i + 1) * 120
                )
            })
            .collect();
        dom.emoji_row.set_inner_html(&row);

        match &view.footer {
            Some(text) => {
                dom.footer.set_text_content(Some(text));
                set_style(&dom.footer, FOOTER_STYLE);
            }
            None => set_style(&dom.footer, "display:none;"),
        }
    }

    fn scatter_confetti(&mut self) {
        let mut html = String::new();
        for _ in 0..view::CONFETTI_PIECES {
            let glyph = view::CONFETTI[self.decor_rng.gen_range(0..view::CONFETTI.len())];
            html.push_str(&format!(
                "<span style='position:absolute; top:-10%; left:{:.1}%; font-size:32px; animation:fr-fall {:.2}s linear {:.2}s infinite;'>{glyph}</span>",
                self.decor_rng.gen_range(0.0..100.0),
                self.decor_rng.gen_range(3.0..5.0),
                self.decor_rng.gen_range(0.0..2.0),
            ));
        }
        self.dom.confetti.set_inner_html(&html);
        set_style(&self.dom.confetti, OVERLAY_STYLE);
    }

    fn scatter_spooks(&mut self) {
        let mut html = String::new();
        for _ in 0..view::SPOOK_PIECES {
            let glyph = view::SPOOKS[self.decor_rng.gen_range(0..view::SPOOKS.len())];
            html.push_str(&format!(
                "<span style='position:absolute; left:{:.1}%; top:{:.1}%; font-size:48px; opacity:0.8; animation:fr-float {:.2}s ease-in-out {:.2}s infinite;'>{glyph}</span>",
                self.decor_rng.gen_range(0.0..90.0),
                self.decor_rng.gen_range(0.0..80.0),
                self.decor_rng.gen_range(4.0..6.0),
                self.decor_rng.gen_range(0.0..3.0),
            ));
        }
        self.dom.spooks.set_inner_html(&html);
        set_style(&self.dom.spooks, OVERLAY_STYLE);
    }
}

impl PageDom {
    fn build(doc: &Document, mount_id: &str) -> Result<Self, JsValue> {
        let root = match doc.get_element_by_id(mount_id) {
            Some(el) => el,
            None => {
                let el = doc.create_element("div")?;
                el.set_id(mount_id);
                let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
                body.append_child(&el)?;
                el
            }
        };
        root.set_inner_html("");

        let child = |parent: &Element, tag: &str, name: &str, style: &str| -> Result<Element, JsValue> {
            let el = doc.create_element(tag)?;
            el.set_id(&format!("{mount_id}-{name}"));
            set_style(&el, style);
            parent.append_child(&el)?;
            Ok(el)
        };

        let confetti = child(&root, "div", "confetti", "display:none;")?;
        let spooks = child(&root, "div", "spooks", "display:none;")?;
        let surface = child(&root, "div", "surface", SURFACE_STYLE)?;
        let card = child(&surface, "div", "card", "")?;
        let hero = child(&card, "div", "hero", HERO_STYLE)?;
        let headline = child(&card, "h1", "headline", "")?;
        let message = child(&card, "p", "message", MESSAGE_STYLE)?;
        let emoji_row = child(&card, "div", "emoji-row", "font-size:40px; margin:8px 0;")?;
        let prompt = child(&card, "div", "prompt", PROMPT_STYLE)?;
        let accept = child(&prompt, "button", "accept", ACCEPT_STYLE)?;
        let status = child(&prompt, "div", "status", STATUS_STYLE)?;
        let footer = child(&card, "p", "footer", "display:none;")?;
        // Positioned against the surface, not the card, so it can roam freely.
        let decline = child(&surface, "button", "decline", DECLINE_BASE)?;

        Ok(Self {
            root,
            surface,
            card,
            hero,
            headline,
            message,
            prompt,
            accept,
            decline,
            status,
            emoji_row,
            footer,
            confetti,
            spooks,
        })
    }
}

const KEYFRAMES_ID: &str = "fr-keyframes";

fn install_keyframes(doc: &Document) -> Result<(), JsValue> {
    if doc.get_element_by_id(KEYFRAMES_ID).is_some() {
        return Ok(());
    }
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    let style = doc.create_element("style")?;
    style.set_id(KEYFRAMES_ID);
    style.set_text_content(Some(
        "@keyframes fr-fall { from { transform: translateY(0) rotate(0deg); } to { transform: translateY(120vh) rotate(360deg); } }\n\
         @keyframes fr-float { 0%, 100% { transform: translateY(0); } 50% { transform: translateY(-24px); } }\n\
         @keyframes fr-bounce { 0%, 100% { transform: translateY(0); } 50% { transform: translateY(-12px); } }",
    ));
    body.append_child(&style)?;
    Ok(())
}

fn set_style(el: &Element, style: &str) {
    el.set_attribute("style", style).ok();
}

const SURFACE_STYLE: &str = "position:relative; width:min(92vw, 960px); height:700px; z-index:10;";
const HERO_STYLE: &str = "font-size:72px; animation:fr-bounce 1.2s infinite;";
const MESSAGE_STYLE: &str = "font-size:20px; color:#e5e7eb; max-width:560px; line-height:1.6; font-weight:300;";
const PROMPT_STYLE: &str = "display:flex; flex-direction:column; align-items:center; gap:24px;";
const ACCEPT_STYLE: &str = "padding:16px 40px; font-size:18px; font-weight:600; color:#fff; border:1px solid rgba(255,255,255,0.2); border-radius:16px; background:linear-gradient(90deg, rgba(16,185,129,0.8), rgba(34,197,94,0.8)); cursor:pointer;";
const STATUS_STYLE: &str = "font-size:13px; color:#d1d5db; padding:10px 16px; background:rgba(255,255,255,0.05); border:1px solid rgba(255,255,255,0.2); border-radius:12px;";
const DECLINE_BASE: &str = "position:absolute; padding:16px 40px; font-size:18px; font-weight:600; color:#fca5a5; background:rgba(255,255,255,0.05); border:1px solid rgba(239,68,68,0.3); border-radius:16px;";
const FOOTER_STYLE: &str = "font-size:18px; font-style:italic; color:#d1d5db; font-weight:300;";
const OVERLAY_STYLE: &str = "position:fixed; inset:0; pointer-events:none; overflow:hidden; z-index:50;";

fn root_style(theme: Theme) -> String {
    let background = match theme {
        Theme::Calm => "linear-gradient(135deg, #020617, #030712, #000)",
        Theme::Haunted => "linear-gradient(135deg, #450a0a, #000, #030712)",
    };
    format!(
        "min-height:100vh; display:flex; align-items:center; justify-content:center; overflow:hidden; \
         font-family:system-ui, sans-serif; transition:all 1s; background:{background};"
    )
}

fn card_style(theme: Theme) -> &'static str {
    match theme {
        Theme::Calm => {
            "position:absolute; inset:0; display:flex; flex-direction:column; align-items:center; justify-content:center; gap:28px; text-align:center; border-radius:24px; border:1px solid rgba(255,255,255,0.2); background:rgba(255,255,255,0.02); box-shadow:0 8px 32px rgba(31,38,135,0.37); transition:all 1s;"
        }
        Theme::Haunted => {
            "position:absolute; inset:0; display:flex; flex-direction:column; align-items:center; justify-content:center; gap:28px; text-align:center; border-radius:24px; border:1px solid rgba(239,68,68,0.3); background:rgba(69,10,10,0.2); box-shadow:0 8px 32px rgba(220,38,38,0.5); transition:all 1s;"
        }
    }
}

fn headline_style(phase: Phase) -> String {
    let gradient = match phase {
        Phase::Pending => "#d8b4fe, #f9a8d4, #93c5fd",
        Phase::Accepted => "#6ee7b7, #86efac, #5eead4",
        Phase::Declined => "#e5e7eb, #e5e7eb, #e5e7eb",
        Phase::Escalated => "#f87171, #fb923c, #f87171",
    };
    format!(
        "font-size:56px; font-weight:700; margin:0; background:linear-gradient(90deg, {gradient}); \
         -webkit-background-clip:text; background-clip:text; color:transparent;"
    )
}
