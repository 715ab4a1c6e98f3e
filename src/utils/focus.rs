use wasm_bindgen::{closure::Closure, JsCast};

const CONTROL_SELECTOR: &str = ".semform-control";

pub fn focus_first_form_control_now() {
    let Some(doc) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if let Ok(Some(el)) = doc.query_selector(CONTROL_SELECTOR) {
        if let Some(he) = el.dyn_ref::<web_sys::HtmlElement>() {
            let _ = he.focus();
        }
    }
}

pub fn raf_focus_first_form_control() {
    if let Some(win) = web_sys::window() {
        let cb = Closure::<dyn FnMut()>::new(focus_first_form_control_now);
        let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
        cb.forget();
    }
}

/// Moves focus `delta` controls forward (or back), clamped to the form.
pub fn focus_move(delta: i32) {
    let Some(doc) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Ok(list) = doc.query_selector_all(CONTROL_SELECTOR) else {
        return;
    };
    let len = list.length() as i32;
    if len == 0 {
        return;
    }

    let active = doc.active_element();
    let current = (0..len).find(|i| {
        match (list.item(*i as u32), &active) {
            (Some(el), Some(ae)) => ae.is_same_node(Some(&el)),
            _ => false,
        }
    });
    let next = match current {
        Some(i) => (i + delta).clamp(0, len - 1),
        None => 0,
    };
    if let Some(el) = list.item(next as u32) {
        let _ = el.dyn_ref::<web_sys::HtmlElement>().map(|h| h.focus());
    }
}
