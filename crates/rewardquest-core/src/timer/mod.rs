mod engine;
mod parse;
mod ticker;

pub use engine::{CountdownEngine, TimerState};
pub use parse::{format_mmss, parse_time_input, MAX_SECONDS_FIELD};
pub use ticker::{TickSource, TICK_PERIOD};
