//! Integration tests for the whole fetch -> focus -> reward flow.

use std::cell::Cell;
use std::rc::Rc;

use rewardquest_core::alarm::{AudioOutput, OutputOpener};
use rewardquest_core::ui::{ActivitySlot, DESCRIPTION_DONE, HEADER_FOCUS, RESET_INPUT};
use rewardquest_core::{
    ActivityClient, AlarmSynthesizer, AudioUnavailableError, Category, Event, FocusSession,
    TimerState, Tone,
};

struct CountingOutput(Rc<Cell<usize>>);

impl AudioOutput for CountingOutput {
    fn play(&mut self, _rate: u32, _samples: Vec<f32>) -> Result<(), AudioUnavailableError> {
        self.0.set(self.0.get() + 1);
        Ok(())
    }
}

fn counting_alarm() -> (AlarmSynthesizer, Rc<Cell<usize>>) {
    let plays = Rc::new(Cell::new(0));
    let shared = Rc::clone(&plays);
    let opener: OutputOpener =
        Box::new(move || Ok(Box::new(CountingOutput(Rc::clone(&shared))) as Box<dyn AudioOutput>));
    (AlarmSynthesizer::with_opener(Tone::default(), opener), plays)
}

fn broken_alarm() -> AlarmSynthesizer {
    let opener: OutputOpener =
        Box::new(|| Err(AudioUnavailableError::NoOutput("no sound card".into())));
    AlarmSynthesizer::with_opener(Tone::default(), opener)
}

#[tokio::test]
async fn test_reward_is_revealed_after_countdown() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/random")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"activity":"Go <outside> & play"}"#)
        .create_async()
        .await;
    let client = ActivityClient::new(server.url());

    let (alarm, plays) = counting_alarm();
    let mut session = FocusSession::new("00:00", alarm);

    assert!(session.fetch_reward(&client, &Category::Random).await);
    assert_eq!(
        session.ui.activity,
        ActivitySlot::Html("<p class=\"reward\">Go &lt;outside&gt; &amp; play</p>".into())
    );

    session.enter_focus_mode();
    assert_eq!(session.ui.header, HEADER_FOCUS);

    assert!(session.set_time_input("0:04"));
    assert!(matches!(
        session.press_start_pause(),
        Some(Event::TimerStarted { duration_secs: 4, resumed: false, .. })
    ));

    let mut expiries = 0;
    for _ in 0..4 {
        if session.on_tick().is_some_and(|e| e.is_expiry()) {
            expiries += 1;
        }
    }

    assert_eq!(expiries, 1);
    assert_eq!(plays.get(), 1);
    assert_eq!(session.engine().state(), TimerState::Idle);
    assert_eq!(session.ui.description, DESCRIPTION_DONE);
    assert!(!session.ui.timer_area_visible);
    assert!(!session.ui.controls_visible);
    assert_eq!(
        session.ui.reward.as_ref().map(|r| r.text()),
        Some("Go &lt;outside&gt; &amp; play")
    );
}

#[tokio::test]
async fn test_pause_then_resume_continues_remainder() {
    let (alarm, _) = counting_alarm();
    let mut session = FocusSession::new("00:00", alarm);
    session.enter_focus_mode();
    session.set_time_input("0:10");
    session.press_start_pause();
    for _ in 0..3 {
        session.on_tick();
    }

    assert!(matches!(
        session.press_start_pause(),
        Some(Event::TimerPaused { remaining_secs: 7, .. })
    ));
    assert_eq!(session.ui.time_input, "00:07");
    assert!(!session.ticking());

    assert!(session.set_time_input(""));
    assert!(matches!(
        session.press_start_pause(),
        Some(Event::TimerStarted { duration_secs: 7, resumed: true, .. })
    ));
}

#[tokio::test]
async fn test_alarm_failure_never_blocks_the_reward() {
    let mut session = FocusSession::new("0:01", broken_alarm());
    session.enter_focus_mode();
    session.press_start_pause();
    let event = session.on_tick();

    assert!(event.is_some_and(|e| e.is_expiry()));
    assert_eq!(session.ui.description, DESCRIPTION_DONE);
    assert!(matches!(session.ui.activity, ActivitySlot::Html(_)));
}

#[tokio::test]
async fn test_bad_input_resets_without_starting() {
    let (alarm, _) = counting_alarm();
    let mut session = FocusSession::new("00:00", alarm);
    session.enter_focus_mode();
    session.set_time_input("half an hour");
    assert!(session.press_start_pause().is_none());
    assert_eq!(session.ui.time_input, RESET_INPUT);
    assert!(!session.ticking());
}

#[tokio::test]
async fn test_failed_fetch_shows_message_and_allows_retry() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/random")
        .with_status(500)
        .create_async()
        .await;
    let client = ActivityClient::new(server.url());

    let (alarm, _) = counting_alarm();
    let mut session = FocusSession::new("00:00", alarm);
    assert!(session.fetch_reward(&client, &Category::Random).await);
    assert_eq!(
        session.ui.activity,
        ActivitySlot::Message("Failed to fetch an activity. Please try again.".into())
    );
    assert!(!session.ui.fetch_busy);
    assert!(session.fetch_reward(&client, &Category::Random).await);
}
