//! Activity suggestions: fetching, selection and escaping.

mod client;
mod escape;
mod selector;

pub use client::{ActivityClient, Category};
pub use escape::escape_html;
pub use selector::{
    select, select_with, ActivityItem, ActivityPayload, SelectedReward, MISSING_ACTIVITY_TEXT,
};
