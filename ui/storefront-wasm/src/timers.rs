//! Browser timers.
//!
//! `IntervalScheduler` backs carousel autoplay with a `gloo_timers` interval
//! that dispatches `Intent::AutoplayTick`. Dropping the handle clears it.

use crate::dom::Elements;
use crate::events;
use gloo_timers::callback::{Interval, Timeout};
use sf_carousel::Scheduler;
use sf_storefront::Intent;
use std::time::Duration;

/// Length of the cart-button bump after an add.
const PULSE_MS: u32 = 180;

pub struct IntervalScheduler {
    els: Elements,
}

impl IntervalScheduler {
    pub fn new(els: Elements) -> Self {
        Self { els }
    }
}

impl Scheduler for IntervalScheduler {
    type Handle = Interval;

    fn schedule(&mut self, interval: Duration) -> Interval {
        let millis = u32::try_from(interval.as_millis()).unwrap_or(u32::MAX);
        let els = self.els.clone();
        Interval::new(millis, move || events::dispatch(&els, Intent::AutoplayTick))
    }

    fn cancel(&mut self, handle: Interval) {
        drop(handle);
    }
}

/// Briefly scales the cart button up, then restores its previous transform.
pub fn pulse_cart_button(els: &Elements) {
    let button = els.open_cart_btn.clone();
    let previous = button.style().get_property_value("transform").unwrap_or_default();
    let _ = button.style().set_property("transform", "scale(1.06)");
    Timeout::new(PULSE_MS, move || {
        let _ = button.style().set_property("transform", &previous);
    })
    .forget();
}
