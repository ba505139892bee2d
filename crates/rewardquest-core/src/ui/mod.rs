//! UI bridge: visible-state slots and the session that drives them.

mod session;
mod state;

pub use session::FocusSession;
pub use state::{
    ActivitySlot, UiState, DESCRIPTION_DONE, DESCRIPTION_FOCUS, HEADER_FOCUS, LOADING_LABEL,
    NO_REWARD_HTML, RESET_INPUT,
};
