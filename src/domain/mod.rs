pub mod card;
pub mod enums;
pub mod grid;
pub mod task;
pub mod week_key;

pub use card::{CancelOutcome, Card, CardMode};
pub use enums::{TaskStatus, UiMode};
pub use grid::{DayColumn, WeekGrid};
pub use task::{Task, Week, WeekStore};
pub use week_key::{week_key, WeekKey, DAYS_PER_WEEK};
