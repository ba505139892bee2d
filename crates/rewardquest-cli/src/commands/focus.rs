use std::io::Write;
use std::time::Duration;

use clap::Args;
use rewardquest_core::ui::{ActivitySlot, LOADING_LABEL, RESET_INPUT};
use rewardquest_core::{
    ActivityClient, AlarmSynthesizer, Category, Config, Event, FocusSession, Tone, UiState,
};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Args)]
pub struct FocusArgs {
    /// Activity type for the reward; "random" for any
    #[arg(long, short)]
    pub category: Option<String>,
    /// Initial countdown, MM:SS or minutes
    #[arg(long, short)]
    pub time: Option<String>,
    /// Start the countdown without waiting for Enter
    #[arg(long)]
    pub auto_start: bool,
}

enum Flow {
    Continue,
    Quit,
}

const HELP: &str = "Enter: start/pause   <time>: set time and start   t: show/hide time   s: status   q: quit";

pub async fn run(args: FocusArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let client = ActivityClient::from_config(&config.activity);
    let category = Category::parse(
        args.category
            .as_deref()
            .unwrap_or(&config.activity.default_category),
    );
    let initial = args
        .time
        .clone()
        .unwrap_or_else(|| config.timer.initial_input.clone());
    let mut session = FocusSession::new(&initial, AlarmSynthesizer::from_config(&config.alarm));

    println!("[{}] {LOADING_LABEL}", UiState::category_label(&category));
    session.fetch_reward(&client, &category).await;
    if let ActivitySlot::Message(message) = &session.ui.activity {
        println!("{message}");
    } else {
        println!("Your reward is ready. Stay focused to unlock it.");
    }

    session.enter_focus_mode();
    println!("{}\n{}\n{HELP}", session.ui.header, session.ui.description);
    if args.auto_start {
        let event = session.press_start_pause();
        report(&session, event);
    }
    render_countdown(&session.ui)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);

    loop {
        tokio::select! {
            _ = session.next_tick() => {
                match session.on_tick() {
                    Some(event) if event.is_expiry() => {
                        finish(&session.ui).await;
                        break;
                    }
                    Some(_) => render_countdown(&session.ui)?,
                    None => {}
                }
            }
            line = lines.next_line(), if stdin_open => {
                match line? {
                    Some(line) => {
                        if let Flow::Quit = handle_command(&mut session, line.trim()) {
                            break;
                        }
                        render_countdown(&session.ui)?;
                    }
                    None => {
                        stdin_open = false;
                        if !session.ticking() {
                            break;
                        }
                    }
                }
            }
            _ = &mut interrupt => {
                println!();
                break;
            }
        }
    }
    Ok(())
}

fn handle_command(session: &mut FocusSession, input: &str) -> Flow {
    match input {
        "q" | "quit" => return Flow::Quit,
        "" => {
            let event = session.press_start_pause();
            report(session, event);
        }
        "t" | "toggle" => {
            session.toggle_time_input();
        }
        "s" | "status" => match serde_json::to_string(&session.engine().snapshot()) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::warn!("cannot encode snapshot: {e}"),
        },
        "h" | "help" | "?" => println!("{HELP}"),
        time => {
            if session.set_time_input(time) {
                let event = session.press_start_pause();
                report(session, event);
            } else {
                println!("Pause the countdown before changing the time.");
            }
        }
    }
    Flow::Continue
}

fn report(session: &FocusSession, event: Option<Event>) {
    match event {
        Some(Event::TimerStarted { resumed: true, .. }) => println!("Resumed."),
        Some(Event::TimerStarted { .. }) => println!("Focus started."),
        Some(Event::TimerPaused { .. }) => println!("Paused."),
        Some(_) => {}
        None if session.ui.time_input == RESET_INPUT
            && !session.engine().is_running() =>
        {
            println!("Enter a time as MM:SS or minutes.");
        }
        None => {}
    }
}

fn render_countdown(ui: &UiState) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();
    if ui.time_input_hidden {
        write!(out, "\r[{}]        ", ui.start_pause_label)?;
    } else {
        write!(out, "\r{}  [{}]   ", ui.time_input, ui.start_pause_label)?;
    }
    out.flush()
}

async fn finish(ui: &UiState) {
    println!("\r{}", ui.time_input);
    println!("{}", ui.description);
    match (&ui.reward, &ui.activity) {
        (Some(reward), _) => println!("Reward: {}", reward.text()),
        (None, ActivitySlot::Message(message)) => println!("{message}"),
        (None, _) => println!("No reward available."),
    }
    // Let the alarm finish before the output is dropped.
    tokio::time::sleep(Tone::default().stop + Duration::from_millis(100)).await;
}
