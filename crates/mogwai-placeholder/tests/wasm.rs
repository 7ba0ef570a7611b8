#![cfg(target_arch = "wasm32")]
use mogwai_placeholder::{
    time::{Scheduler, TimerKind},
    web::{WebScheduler, prelude::*},
};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

async fn sleep(millis: u32) {
    let (tx, rx) = async_channel::bounded(1);
    let _timer = WebScheduler
        .schedule(TimerKind::Typing, millis, move || {
            let _ = tx.try_send(());
        })
        .unwrap();
    rx.recv().await.unwrap();
}

fn fast() -> Timing {
    Timing {
        start: 10,
        keystroke_min: 5,
        keystroke_max: 6,
        dwell: 1000,
        blink: 400,
        blinks: 8,
    }
}

fn new_input(id: &str) -> web_sys::HtmlInputElement {
    let document = mogwai_placeholder::web::document().unwrap();
    let input = document
        .create_element("input")
        .unwrap()
        .dyn_into::<web_sys::HtmlInputElement>()
        .unwrap();
    input.set_id(id);
    document.body().unwrap().append_child(&input).unwrap();
    input
}

fn dispatch(input: &web_sys::HtmlInputElement, name: &str) {
    let event = web_sys::Event::new(name).unwrap();
    input.dispatch_event(&event).unwrap();
}

#[wasm_bindgen_test]
async fn types_into_a_browser_input() {
    let _ = console_log::init_with_level(log::Level::Trace);

    let element = new_input("types");
    let placeholder = bind(
        element.clone(),
        PlaceholderConfig::new("Hi").with_timing(fast()),
    )
    .unwrap();
    assert_eq!("", element.placeholder());

    sleep(12).await;
    assert_eq!("H|", element.placeholder());
    sleep(20).await;
    assert_eq!("Hi", element.placeholder());
    assert_eq!(Phase::Dwelling, placeholder.state().phase);

    dispatch(&element, "focus");
    sleep(1).await;
    assert_eq!("", element.placeholder());
    assert_eq!(Phase::Suspended, placeholder.state().phase);

    element.set_value("typed");
    dispatch(&element, "blur");
    sleep(50).await;
    assert_eq!("", element.placeholder());

    element.set_value("");
    dispatch(&element, "blur");
    sleep(12).await;
    assert_eq!("H|", element.placeholder());

    placeholder.detach();
    assert_eq!("", element.placeholder());
}

#[wasm_bindgen_test]
async fn binds_declared_inputs() {
    let _ = console_log::init_with_level(log::Level::Trace);

    let document = mogwai_placeholder::web::document().unwrap();
    let root = document.create_element("div").unwrap();
    root.set_inner_html(
        r#"<input id="declared" data-placeholder='["Go"]' data-last-char="_" />
           <input data-placeholder="Plain" />
           <div data-placeholder="not an input"></div>"#,
    );
    document.body().unwrap().append_child(&root).unwrap();

    let bindings = bind_all(&root).unwrap();
    assert_eq!(2, bindings.len());
    let declared = bindings.get("declared").unwrap();
    assert_eq!('_', declared.cursor());
    assert_eq!(vec!["Go"], declared.hints().iter().collect::<Vec<_>>());
    let plain = bindings.get("placeholder-1").unwrap();
    assert_eq!(vec!["Plain"], plain.hints().iter().collect::<Vec<_>>());

    sleep(1010).await;
    assert_eq!("G_", declared.input().placeholder());

    drop(bindings);
    sleep(300).await;
    let element = document.get_element_by_id("declared").unwrap();
    assert_eq!(Some(String::new()), element.get_attribute("placeholder"));
}

#[wasm_bindgen_test]
async fn removing_an_input_detaches_it() {
    let _ = console_log::init_with_level(log::Level::Trace);

    let document = mogwai_placeholder::web::document().unwrap();
    let root = document.create_element("div").unwrap();
    root.set_inner_html(
        r#"<input id="leaving" data-placeholder-config='{"hints": "Bye", "timing": {"start": 10, "keystrokeMin": 5, "keystrokeMax": 6}}' />
           <input id="staying" data-placeholder-config='{"hints": "Hi", "timing": {"start": 10}}' />"#,
    );
    document.body().unwrap().append_child(&root).unwrap();

    let bindings = bind_all(&root).unwrap();
    let leaving = bindings.get("leaving").unwrap();
    sleep(12).await;
    assert_eq!("B|", leaving.input().placeholder());

    leaving.input().element().remove();
    sleep(1).await;
    assert!(leaving.is_detached());
    assert_eq!(vec!["staying".to_string()], bindings.keys());
    assert_eq!(0, bindings.detach_removed());

    let element = leaving.input().element().clone();
    let frozen = element.placeholder();
    sleep(50).await;
    assert_eq!(frozen, element.placeholder());
    assert!(!bindings.get("staying").unwrap().is_detached());
}

#[wasm_bindgen_test]
async fn config_attributes_pick_the_hints() {
    let _ = console_log::init_with_level(log::Level::Trace);

    let document = mogwai_placeholder::web::document().unwrap();
    let root = document.create_element("div").unwrap();
    root.set_inner_html(
        r#"<input id="both" data-placeholder="Ignored" data-placeholder-config='{"hints": ["Email"]}' />
           <input id="number" data-placeholder="42" />
           <input id="broken" data-placeholder-config="{not json" />"#,
    );

    let bindings = bind_all(&root).unwrap();
    assert_eq!(2, bindings.len());
    let both = bindings.get("both").unwrap();
    assert_eq!(vec!["Email"], both.hints().iter().collect::<Vec<_>>());
    let number = bindings.get("number").unwrap();
    assert_eq!(vec!["42"], number.hints().iter().collect::<Vec<_>>());
    assert!(bindings.get("broken").is_none());
}
