//! Image carousel for the selected product.
//!
//! `CarouselState` is the pure index arithmetic. `Carousel` adds the slide
//! list and a single-instance autoplay timer driven through a `Scheduler`,
//! so the browser shell plugs in real timers and tests plug in
//! `ManualScheduler`.

use std::time::Duration;
use tracing::debug;

pub const DEFAULT_AUTOPLAY_INTERVAL: Duration = Duration::from_millis(3_500);

/// Slide width used when no slide is mounted to measure.
pub const FALLBACK_SLIDE_WIDTH: f64 = 720.0;

/// Current slide index over `count` slides. `count == 0` pins the index at 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarouselState {
    index: usize,
    count: usize,
}

impl CarouselState {
    pub fn new(count: usize) -> Self {
        Self { index: 0, count }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Jumps to `index`. Returns `false` and changes nothing when out of range.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.count {
            return false;
        }
        self.index = index;
        true
    }

    pub fn next(&mut self) {
        if self.count == 0 {
            return;
        }
        self.index = (self.index + 1) % self.count;
    }

    pub fn prev(&mut self) {
        if self.count == 0 {
            return;
        }
        self.index = (self.index + self.count - 1) % self.count;
    }

    /// Horizontal translation for the current index. A missing or zero
    /// measurement falls back to `FALLBACK_SLIDE_WIDTH`.
    pub fn offset_px(&self, measured_width: Option<f64>) -> f64 {
        let width = match measured_width {
            Some(w) if w > 0.0 => w,
            _ => FALLBACK_SLIDE_WIDTH,
        };
        self.index as f64 * width
    }
}

/// Repeating-task scheduler. The task itself is bound by the implementation.
pub trait Scheduler {
    type Handle;

    fn schedule(&mut self, interval: Duration) -> Self::Handle;
    fn cancel(&mut self, handle: Self::Handle);
}

/// Holds at most one live scheduled task.
pub struct Autoplay<S: Scheduler> {
    scheduler: S,
    interval: Duration,
    handle: Option<S::Handle>,
}

impl<S: Scheduler> Autoplay<S> {
    pub fn new(scheduler: S, interval: Duration) -> Self {
        Self {
            scheduler,
            interval,
            handle: None,
        }
    }

    /// Cancels any pending task, then schedules a fresh one from zero.
    pub fn restart(&mut self) {
        self.stop();
        self.handle = Some(self.scheduler.schedule(self.interval));
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.scheduler.cancel(handle);
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarouselView {
    pub slides: Vec<String>,
    pub indicators: Vec<bool>,
    pub index: usize,
}

pub struct Carousel<S: Scheduler> {
    state: CarouselState,
    slides: Vec<String>,
    autoplay: Autoplay<S>,
}

impl<S: Scheduler> Carousel<S> {
    pub fn new(scheduler: S, interval: Duration) -> Self {
        Self {
            state: CarouselState::default(),
            slides: Vec::new(),
            autoplay: Autoplay::new(scheduler, interval),
        }
    }

    /// Replaces the slide set, rewinds to the first slide and restarts autoplay.
    pub fn build(&mut self, images: Vec<String>) {
        debug!(slides = images.len(), "building carousel");
        self.state = CarouselState::new(images.len());
        self.slides = images;
        self.autoplay.restart();
    }

    /// Indicator click.
    pub fn go_to(&mut self, index: usize) {
        if self.state.go_to(index) {
            self.autoplay.restart();
        }
    }

    /// Next-button click.
    pub fn next(&mut self) {
        self.state.next();
        self.autoplay.restart();
    }

    /// Prev-button click.
    pub fn prev(&mut self) {
        self.state.prev();
        self.autoplay.restart();
    }

    /// Timer advance; leaves the running timer alone.
    pub fn tick(&mut self) {
        self.state.next();
    }

    pub fn pointer_enter(&mut self) {
        self.autoplay.stop();
    }

    pub fn pointer_leave(&mut self) {
        self.autoplay.restart();
    }

    /// Recomputes the offset against a new slide width. The index is kept.
    pub fn resize(&self, measured_width: Option<f64>) -> f64 {
        self.state.offset_px(measured_width)
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    pub fn autoplay(&self) -> &Autoplay<S> {
        &self.autoplay
    }

    pub fn view(&self) -> CarouselView {
        CarouselView {
            slides: self.slides.clone(),
            indicators: (0..self.slides.len()).map(|i| i == self.state.index()).collect(),
            index: self.state.index(),
        }
    }
}

/// Scheduler that only records what it was asked to do.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_handle: u64,
    live: Vec<u64>,
    scheduled: usize,
    last_interval: Option<Duration>,
}

impl ManualScheduler {
    pub fn live_tasks(&self) -> usize {
        self.live.len()
    }

    pub fn scheduled_total(&self) -> usize {
        self.scheduled
    }

    pub fn last_interval(&self) -> Option<Duration> {
        self.last_interval
    }
}

impl Scheduler for ManualScheduler {
    type Handle = u64;

    fn schedule(&mut self, interval: Duration) -> u64 {
        self.next_handle += 1;
        self.scheduled += 1;
        self.last_interval = Some(interval);
        self.live.push(self.next_handle);
        self.next_handle
    }

    fn cancel(&mut self, handle: u64) {
        self.live.retain(|h| *h != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("img-{i}.png")).collect()
    }

    fn carousel() -> Carousel<ManualScheduler> {
        Carousel::new(ManualScheduler::default(), DEFAULT_AUTOPLAY_INTERVAL)
    }

    #[test]
    fn next_wraps_from_last_to_first() {
        let mut state = CarouselState::new(3);
        assert!(state.go_to(2));
        state.next();
        assert_eq!(state.index(), 0);
    }

    #[test]
    fn prev_wraps_from_first_to_last() {
        let mut state = CarouselState::new(3);
        state.prev();
        assert_eq!(state.index(), 2);
    }

    #[test]
    fn index_stays_in_range_over_many_moves() {
        let mut state = CarouselState::new(4);
        for step in 0..25 {
            if step % 3 == 0 {
                state.prev();
            } else {
                state.next();
            }
            assert!(state.index() < state.count());
        }
    }

    #[test]
    fn out_of_range_go_to_is_ignored() {
        let mut state = CarouselState::new(2);
        state.next();
        assert!(!state.go_to(5));
        assert_eq!(state.index(), 1);
    }

    #[test]
    fn offset_uses_measured_width_or_fallback() {
        let mut state = CarouselState::new(3);
        state.go_to(2);
        assert_eq!(state.offset_px(Some(400.0)), 800.0);
        assert_eq!(state.offset_px(None), 1440.0);
        assert_eq!(state.offset_px(Some(0.0)), 1440.0);
    }

    #[test]
    fn empty_build_keeps_navigation_inert() {
        let mut carousel = carousel();
        carousel.build(Vec::new());

        carousel.next();
        carousel.prev();
        carousel.tick();
        carousel.go_to(0);

        assert_eq!(carousel.state().index(), 0);
        assert!(carousel.view().indicators.is_empty());
    }

    #[test]
    fn build_resets_index_and_marks_first_indicator() {
        let mut carousel = carousel();
        carousel.build(images(3));
        carousel.next();
        carousel.next();

        carousel.build(images(2));

        let view = carousel.view();
        assert_eq!(view.index, 0);
        assert_eq!(view.indicators, vec![true, false]);
        assert_eq!(view.slides, images(2));
    }

    #[test]
    fn autoplay_never_has_two_live_timers() {
        let mut carousel = carousel();
        carousel.build(images(3));
        carousel.next();
        carousel.go_to(1);
        carousel.prev();
        carousel.pointer_leave();
        carousel.build(images(2));

        let scheduler = carousel.autoplay().scheduler();
        assert_eq!(scheduler.live_tasks(), 1);
        assert_eq!(scheduler.scheduled_total(), 6);
        assert_eq!(scheduler.last_interval(), Some(DEFAULT_AUTOPLAY_INTERVAL));
    }

    #[test]
    fn hover_pauses_and_leave_resumes() {
        let mut carousel = carousel();
        carousel.build(images(2));

        carousel.pointer_enter();
        assert!(!carousel.autoplay().is_running());
        assert_eq!(carousel.autoplay().scheduler().live_tasks(), 0);

        carousel.pointer_leave();
        assert!(carousel.autoplay().is_running());
        assert_eq!(carousel.autoplay().scheduler().live_tasks(), 1);
    }

    #[test]
    fn tick_advances_without_rescheduling() {
        let mut carousel = carousel();
        carousel.build(images(2));
        let before = carousel.autoplay().scheduler().scheduled_total();

        carousel.tick();
        carousel.tick();

        assert_eq!(carousel.state().index(), 0);
        assert_eq!(carousel.autoplay().scheduler().scheduled_total(), before);
    }

    #[test]
    fn resize_keeps_logical_index() {
        let mut carousel = carousel();
        carousel.build(images(3));
        carousel.go_to(1);

        assert_eq!(carousel.resize(Some(500.0)), 500.0);
        assert_eq!(carousel.resize(Some(300.0)), 300.0);
        assert_eq!(carousel.state().index(), 1);
    }
}
