pub mod calendar;
pub mod cancel;
pub mod pager;
pub mod tab;

pub use calendar::{MarkedCalendar, MultiselectCalendar, RadioCalendar};
pub use cancel::{Cancel, CancelDecision};
pub use pager::{page_window, PaginationMode, PaginationPager};
pub use tab::{CheckStateMode, TabAction, TabState};
