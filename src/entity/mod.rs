mod line;
mod question;
mod unit;

pub use line::{HistoryEntry, LineStatus};
pub use question::Contribution;
pub use unit::{StoryUnit, UnitStatus, UnitType};
