// Browser tests for the page shell. Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use friend_request::{PageConfig, mount_page};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{HtmlElement, MouseEvent, window};

wasm_bindgen_test_configure!(run_in_browser);

fn element(id: &str) -> HtmlElement {
    window()
        .unwrap()
        .document()
        .unwrap()
        .get_element_by_id(id)
        .unwrap_or_else(|| panic!("missing #{id}"))
        .dyn_into()
        .unwrap()
}

fn text(id: &str) -> String {
    element(id).text_content().unwrap_or_default()
}

fn mount(id: &str) {
    mount_page(PageConfig {
        mount_id: id.into(),
        ..PageConfig::default()
    })
    .unwrap();
}

#[wasm_bindgen_test]
fn accept_click_celebrates() {
    mount("t-accept");
    assert_eq!(text("t-accept-headline"), "Hiiii Luna!");
    element("t-accept-accept").click();
    assert_eq!(text("t-accept-headline"), "AMAZING!");
}

#[wasm_bindgen_test]
fn decline_needs_three_chases() {
    mount("t-decline");
    let decline = element("t-decline-decline");

    decline.click();
    assert_eq!(text("t-decline-headline"), "Hiiii Luna!");

    for n in 1..=3 {
        let hover = MouseEvent::new("mouseenter").unwrap();
        decline.dispatch_event(&hover).unwrap();
        assert!(text("t-decline-status").contains(&format!("Attempts: {n}/3")));
    }
    assert_eq!(text("t-decline-decline"), "No way... (Click me!)");

    decline.click();
    assert_eq!(text("t-decline-headline"), "YOU DARE SAY NO?!");
}
