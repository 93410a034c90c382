//! DOM element bindings.
//!
//! All fields are resolved once at startup. To add new UI elements, add a
//! field here and bind it in `Elements::bind()`.

use sf_storefront::{RejectedOverride, StorefrontConfig};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement};

/// Root element whose `data-*` attributes override the defaults.
const ROOT_ID: &str = "storefront";

// ── Helpers ──

fn doc() -> Document {
    gloo_utils::document()
}

pub fn by_id(id: &str) -> Option<Element> {
    doc().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

/// Nearest ancestor of the event target (inclusive) matching `selector`.
pub fn closest_target(event: &web_sys::Event, selector: &str) -> Option<Element> {
    let target: Element = event.target()?.dyn_into().ok()?;
    target.closest(selector).ok().flatten()
}

/// Reads `data-*` overrides from `#storefront`, if present.
pub fn read_config() -> (StorefrontConfig, Vec<RejectedOverride>) {
    let root = by_id(ROOT_ID);
    StorefrontConfig::from_lookup(|name| root.as_ref()?.get_attribute(&format!("data-{name}")))
}

// ── Elements struct ──

/// All DOM element references used by the storefront.
/// Clone-friendly (all inner types are reference-counted via JS GC).
#[derive(Clone)]
pub struct Elements {
    // Catalog
    pub product_list: Element,

    // Info panel
    pub p_title: Element,
    pub p_price: Element,
    pub p_desc: Element,
    pub add_to_cart_btn: HtmlButtonElement,

    // Carousel
    pub carousel: Element,
    pub slides: HtmlElement,
    pub indicators: Element,
    pub prev_btn: HtmlElement,
    pub next_btn: HtmlElement,

    // Cart
    pub cart_count: Element,
    pub open_cart_btn: HtmlElement,
    pub cart_modal: Element,
    pub cart_items: Element,
    pub cart_total: Element,
    pub clear_cart_btn: HtmlElement,
    pub checkout_btn: HtmlElement,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_html {
    ($id:expr) => {
        by_id_typed::<HtmlElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing html element #{}", $id)))?
    };
}

macro_rules! get_button {
    ($id:expr) => {
        by_id_typed::<HtmlButtonElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing button #{}", $id)))?
    };
}

impl Elements {
    /// Resolve all DOM references. Call once after DOMContentLoaded.
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            product_list: get_el!("productList"),

            p_title: get_el!("pTitle"),
            p_price: get_el!("pPrice"),
            p_desc: get_el!("pDesc"),
            add_to_cart_btn: get_button!("addToCartBtn"),

            carousel: get_el!("carousel"),
            slides: get_html!("slides"),
            indicators: get_el!("indicators"),
            prev_btn: get_html!("prevBtn"),
            next_btn: get_html!("nextBtn"),

            cart_count: get_el!("cartCount"),
            open_cart_btn: get_html!("openCartBtn"),
            cart_modal: get_el!("cartModal"),
            cart_items: get_el!("cartItems"),
            cart_total: get_el!("cartTotal"),
            clear_cart_btn: get_html!("clearCartBtn"),
            checkout_btn: get_html!("checkoutBtn"),
        })
    }

    /// Width of the first mounted slide, if any.
    pub fn measured_slide_width(&self) -> Option<f64> {
        self.slides
            .first_element_child()
            .map(|slide| f64::from(slide.client_width()))
    }
}
