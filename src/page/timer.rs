use std::cell::RefCell;
use std::rc::Weak;

use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use super::Page;
use crate::controller::{RepositionTicket, RepositionTimer};

/// `setTimeout`-backed wiggle reset. A new schedule clears the previous one.
pub(crate) struct BrowserTimer {
    window: Window,
    page: Weak<RefCell<Page>>,
    pending: Option<i32>,
}

impl BrowserTimer {
    pub(crate) fn new(window: Window, page: Weak<RefCell<Page>>) -> Self {
        Self {
            window,
            page,
            pending: None,
        }
    }
}

impl RepositionTimer for BrowserTimer {
    fn schedule(&mut self, delay_ms: u32, ticket: RepositionTicket) {
        if let Some(handle) = self.pending.take() {
            self.window.clear_timeout_with_handle(handle);
        }
        let page = self.page.clone();
        let callback = Closure::once_into_js(move || {
            let Some(page) = page.upgrade() else {
                return;
            };
            match page.try_borrow_mut() {
                Ok(mut p) => p.reposition_elapsed(ticket),
                Err(_) => warn!("reposition reset fired while the page was busy"),
            }
        });
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
        {
            Ok(handle) => self.pending = Some(handle),
            Err(err) => warn!("could not schedule reposition reset: {err:?}"),
        }
    }
}
