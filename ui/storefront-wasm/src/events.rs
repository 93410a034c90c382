//! Event binding.
//!
//! Every listener turns a DOM event into an `Intent`, dispatches it into the
//! storefront, performs the returned effects and re-renders. Lists rebuilt on
//! render (product cards, indicators, cart lines) use one delegated listener
//! on their container.

use crate::dom::{self, Elements};
use crate::render;
use crate::state;
use crate::timers;
use sf_api_types::ProductId;
use sf_storefront::{Effect, Intent};
use tracing::error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Helper: attach a handler for `$event` that maps the event to an optional intent.
macro_rules! on_event {
    ($target:expr, $event:expr, $els:expr, $to_intent:expr) => {{
        let els = $els.clone();
        let cb = Closure::wrap(Box::new(move |e: web_sys::Event| {
            if let Some(intent) = $to_intent(&e) {
                dispatch(&els, intent);
            }
        }) as Box<dyn FnMut(_)>);
        $target.add_event_listener_with_callback($event, cb.as_ref().unchecked_ref())?;
        cb.forget();
    }};
}

/// Helper: attach a click handler that always dispatches the same intent.
macro_rules! on_click {
    ($el:expr, $els:expr, $intent:expr) => {
        on_event!($el, "click", $els, |_: &web_sys::Event| Some($intent))
    };
}

/// Dispatch an intent, perform its effects, then re-render.
pub fn dispatch(els: &Elements, intent: Intent) {
    match state::with_mut(|sf| sf.dispatch(intent)) {
        Some(Ok(effects)) => {
            for effect in effects {
                perform(els, effect);
            }
        }
        Some(Err(err)) => error!(error = %err, ?intent, "storefront action failed"),
        None => return,
    }
    render::render(els);
}

fn perform(els: &Elements, effect: Effect) {
    match effect {
        Effect::Notice(notice) => {
            let _ = gloo_utils::window().alert_with_message(notice.message());
        }
        Effect::PulseCartButton => timers::pulse_cart_button(els),
    }
}

fn data_attr<T: std::str::FromStr>(event: &web_sys::Event, selector: &str, attr: &str) -> Option<T> {
    dom::closest_target(event, selector)?
        .get_attribute(attr)?
        .parse()
        .ok()
}

/// Bind all UI event listeners. Call once after init.
pub fn bind_events(els: &Elements) -> Result<(), JsValue> {
    // ── Catalog ──
    on_event!(els.product_list, "click", els, |e: &web_sys::Event| {
        data_attr::<u64>(e, ".product-card", "data-id").map(|id| Intent::SelectProduct(ProductId(id)))
    });

    // ── Carousel ──
    on_click!(els.prev_btn, els, Intent::CarouselPrev);
    on_click!(els.next_btn, els, Intent::CarouselNext);
    on_event!(els.indicators, "click", els, |e: &web_sys::Event| {
        data_attr::<usize>(e, "button[data-index]", "data-index").map(Intent::CarouselGoTo)
    });
    on_event!(els.carousel, "mouseenter", els, |_: &web_sys::Event| {
        Some(Intent::CarouselPointerEnter)
    });
    on_event!(els.carousel, "mouseleave", els, |_: &web_sys::Event| {
        Some(Intent::CarouselPointerLeave)
    });

    // ── Cart ──
    on_click!(els.add_to_cart_btn, els, Intent::AddSelectedToCart);
    on_click!(els.open_cart_btn, els, Intent::ToggleCartPanel);
    on_click!(els.clear_cart_btn, els, Intent::ClearCart);
    on_click!(els.checkout_btn, els, Intent::Checkout);
    on_event!(els.cart_items, "click", els, |e: &web_sys::Event| {
        data_attr::<u64>(e, ".remove", "data-id").map(|id| Intent::RemoveFromCart(ProductId(id)))
    });

    // ── Viewport ──
    {
        let els2 = els.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
            render::apply_offset(&els2);
        }) as Box<dyn FnMut(_)>);
        gloo_utils::window().add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }

    Ok(())
}
