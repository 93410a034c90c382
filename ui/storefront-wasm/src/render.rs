//! View rendering.
//!
//! The `*_html` builders are pure functions of the view structs; `render()`
//! pulls a fresh `StorefrontView` and writes it into the DOM. Containers are
//! only rewritten when their markup changed, so autoplay ticks do not reload
//! slide images.

use crate::dom::{self, Elements};
use crate::state;
use sf_carousel::CarouselView;
use sf_cart::CartPanelView;
use sf_catalog::CatalogView;
use sf_storefront::StorefrontView;
use std::cell::RefCell;
use std::collections::HashMap;
use tracing::error;
use web_sys::Element;

thread_local! {
    static LAST_HTML: RefCell<HashMap<&'static str, String>> = RefCell::new(HashMap::new());
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn product_list_html(view: &CatalogView) -> String {
    match view {
        CatalogView::Loading => String::new(),
        CatalogView::Failed { message } => {
            format!(r#"<p class="catalog-error">{}</p>"#, escape_html(message))
        }
        CatalogView::Ready { cards } => cards
            .iter()
            .map(|card| {
                let title = escape_html(&card.title);
                format!(
                    r#"<div class="product-card" data-id="{}">
  <img src="{}" alt="{}">
  <div class="meta">
    <div class="title">{}</div>
    <div class="price">{}</div>
  </div>
</div>"#,
                    card.id,
                    escape_html(&card.thumbnail),
                    title,
                    title,
                    escape_html(&card.price_label),
                )
            })
            .collect(),
    }
}

pub fn slides_html(view: &CarouselView, alt: &str) -> String {
    let alt = escape_html(alt);
    view.slides
        .iter()
        .map(|src| format!(r#"<img src="{}" alt="{}">"#, escape_html(src), alt))
        .collect()
}

pub fn indicators_html(view: &CarouselView) -> String {
    view.indicators
        .iter()
        .enumerate()
        .map(|(i, active)| {
            if *active {
                format!(r#"<button class="active" data-index="{i}"></button>"#)
            } else {
                format!(r#"<button data-index="{i}"></button>"#)
            }
        })
        .collect()
}

/// Markup for the cart line list plus the total label.
pub fn cart_panel_html(view: &CartPanelView) -> (String, String) {
    match view {
        CartPanelView::Empty {
            message,
            total_label,
        } => (
            format!(r#"<p class="cart-empty">{}</p>"#, escape_html(message)),
            total_label.clone(),
        ),
        CartPanelView::Lines { lines, total_label } => {
            let items = lines
                .iter()
                .map(|line| {
                    let title = escape_html(&line.title);
                    format!(
                        r#"<div class="cart-item">
  <img src="{}" alt="{}">
  <div class="meta">
    <div class="cart-item-title">{}</div>
    <div>{}</div>
  </div>
  <button class="remove" data-id="{}">Remove</button>
</div>"#,
                        escape_html(&line.thumbnail),
                        title,
                        title,
                        escape_html(&line.summary),
                        line.id,
                    )
                })
                .collect();
            (items, total_label.clone())
        }
    }
}

fn set_html_if_changed(slot: &'static str, el: &Element, html: String) {
    LAST_HTML.with(|cache| {
        let mut cache = cache.borrow_mut();
        if cache.get(slot) != Some(&html) {
            el.set_inner_html(&html);
            cache.insert(slot, html);
        }
    });
}

/// Re-render everything from the current state.
pub fn render(els: &Elements) {
    let view = match state::with(|sf| sf.view()) {
        Some(Ok(view)) => view,
        Some(Err(err)) => {
            error!(error = %err, "could not build storefront view");
            return;
        }
        None => return,
    };
    apply(els, &view);
    apply_offset(els);
}

fn apply(els: &Elements, view: &StorefrontView) {
    set_html_if_changed("productList", &els.product_list, product_list_html(&view.catalog));

    match &view.detail {
        Some(detail) => {
            dom::set_text(&els.p_title, &detail.title);
            dom::set_text(&els.p_price, &detail.price_label);
            dom::set_text(&els.p_desc, &detail.description);
            els.add_to_cart_btn.set_disabled(!detail.add_to_cart_enabled);
        }
        None => {
            dom::set_text(&els.p_title, "");
            dom::set_text(&els.p_price, "");
            dom::set_text(&els.p_desc, "");
            els.add_to_cart_btn.set_disabled(true);
        }
    }

    let alt = view.detail.as_ref().map(|d| d.title.as_str()).unwrap_or_default();
    set_html_if_changed("slides", &els.slides, slides_html(&view.carousel, alt));
    set_html_if_changed("indicators", &els.indicators, indicators_html(&view.carousel));

    dom::set_text(&els.cart_count, &view.badge.to_string());

    dom::toggle_class(&els.cart_modal, "open", view.cart_panel.is_some());
    if let Some(panel) = &view.cart_panel {
        let (items, total) = cart_panel_html(panel);
        set_html_if_changed("cartItems", &els.cart_items, items);
        dom::set_text(&els.cart_total, &total);
    }
}

/// Translates the slide strip to the current index using the mounted width.
pub fn apply_offset(els: &Elements) {
    let width = els.measured_slide_width();
    if let Some(offset) = state::with(|sf| sf.carousel_offset(width)) {
        dom::set_style(&els.slides, "transform", &format!("translateX(-{offset}px)"));
    }
}
