//! 平台能力抽象 Trait

mod clock;
mod form_view;
mod history_store;

pub use clock::{Clock, SystemClock};
pub use form_view::FormView;
pub use history_store::{HistoryStore, DEFAULT_HISTORY_KEY};
