//! FocusSession: the single owner of all mutable reward-quest state.
//!
//! Every user action and every tick goes through `&mut FocusSession`, so
//! the countdown, the tick source, the alarm handle and the visible state
//! never disagree.

use tracing::info;

use super::state::UiState;
use crate::activity::{ActivityClient, Category};
use crate::alarm::AlarmSynthesizer;
use crate::events::Event;
use crate::timer::{CountdownEngine, TickSource};

pub struct FocusSession {
    pub ui: UiState,
    engine: CountdownEngine,
    ticks: TickSource,
    alarm: AlarmSynthesizer,
}

impl FocusSession {
    /// Engine preset from the initial input text, as on page load.
    pub fn new(initial_input: &str, alarm: AlarmSynthesizer) -> Self {
        Self::with_tick_source(initial_input, alarm, TickSource::new())
    }

    pub fn with_tick_source(initial_input: &str, alarm: AlarmSynthesizer, ticks: TickSource) -> Self {
        let engine = CountdownEngine::from_display(initial_input);
        let mut ui = UiState::new(initial_input);
        if engine.remaining_secs() > 0 {
            ui.sync_countdown(&engine);
        }
        Self {
            ui,
            engine,
            ticks,
            alarm,
        }
    }

    pub fn engine(&self) -> &CountdownEngine {
        &self.engine
    }

    pub fn ticking(&self) -> bool {
        self.ticks.is_active()
    }

    /// Fetch a reward unless a fetch is already in flight.
    ///
    /// Returns false when the request was refused.
    pub async fn fetch_reward(&mut self, client: &ActivityClient, category: &Category) -> bool {
        if !self.ui.begin_fetch(category) {
            return false;
        }
        let outcome = client.fetch_reward(category).await;
        self.ui.finish_fetch(outcome);
        true
    }

    pub fn enter_focus_mode(&mut self) {
        self.ui.enter_focus_mode();
    }

    pub fn set_time_input(&mut self, text: &str) -> bool {
        self.ui.set_time_input(text)
    }

    pub fn toggle_time_input(&mut self) -> bool {
        self.ui.toggle_time_input()
    }

    pub fn press_start_pause(&mut self) -> Option<Event> {
        let event = self.ui.press_start_pause(&mut self.engine);
        self.ticks.sync(self.engine.is_running());
        event
    }

    /// Wait for the next tick of a running countdown.
    pub async fn next_tick(&mut self) {
        self.ticks.tick().await;
    }

    /// Advance the countdown by one second and apply the result.
    pub fn on_tick(&mut self) -> Option<Event> {
        let Some(event) = self.engine.tick() else {
            self.ticks.stop();
            return None;
        };
        self.ticks.sync(self.engine.is_running());
        self.ui.sync_countdown(&self.engine);

        if let Event::TimerExpired { duration_secs, .. } = &event {
            info!(duration_secs, "countdown finished");
            self.alarm.play();
            self.ui.reveal_reward();
        }
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::{AudioOutput, OutputOpener, Tone};
    use crate::error::AudioUnavailableError;
    use crate::timer::TimerState;
    use crate::ui::ActivitySlot;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingOutput(Rc<Cell<usize>>);

    impl AudioOutput for CountingOutput {
        fn play(&mut self, _rate: u32, _samples: Vec<f32>) -> Result<(), AudioUnavailableError> {
            self.0.set(self.0.get() + 1);
            Ok(())
        }
    }

    fn session(input: &str) -> (FocusSession, Rc<Cell<usize>>) {
        let plays = Rc::new(Cell::new(0));
        let shared = Rc::clone(&plays);
        let opener: OutputOpener = Box::new(move || {
            Ok(Box::new(CountingOutput(Rc::clone(&shared))) as Box<dyn AudioOutput>)
        });
        let alarm = AlarmSynthesizer::with_opener(Tone::default(), opener);
        (FocusSession::new(input, alarm), plays)
    }

    #[tokio::test]
    async fn full_countdown_plays_alarm_once_and_reveals_reward() {
        let (mut s, plays) = session("0:03");
        s.enter_focus_mode();
        assert!(s.press_start_pause().is_some());
        assert!(s.ticking());

        let expiries = (0..3).filter_map(|_| s.on_tick()).filter(Event::is_expiry).count();

        assert_eq!(expiries, 1);
        assert_eq!(plays.get(), 1);
        assert_eq!(s.engine().state(), TimerState::Idle);
        assert!(!s.ticking());
        assert!(!s.ui.timer_area_visible);
        assert!(!s.ui.time_input_disabled);
        assert_eq!(s.ui.time_input, "00:00");
        assert!(matches!(s.ui.activity, ActivitySlot::Html(_)));
    }

    #[tokio::test]
    async fn pausing_stops_the_tick_source() {
        let (mut s, plays) = session("1");
        s.press_start_pause();
        s.on_tick();
        s.press_start_pause();
        assert!(!s.ticking());
        assert_eq!(s.engine().state(), TimerState::Paused);
        assert_eq!(s.ui.time_input, "00:59");
        assert!(s.on_tick().is_none());
        assert_eq!(plays.get(), 0);
    }

    #[test]
    fn initial_input_presets_engine() {
        let (s, _) = session("25");
        assert_eq!(s.engine().remaining_secs(), 1500);
        assert_eq!(s.ui.time_input, "25:00");
    }

    #[tokio::test(start_paused = true)]
    async fn next_tick_drives_engine_in_real_time() {
        let (mut s, plays) = session("0:02");
        s.press_start_pause();
        let begin = tokio::time::Instant::now();
        while s.ticking() {
            s.next_tick().await;
            s.on_tick();
        }
        assert_eq!(begin.elapsed(), std::time::Duration::from_secs(2));
        assert_eq!(plays.get(), 1);
    }
}
