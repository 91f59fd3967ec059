//! Types that represent the core data model, such as `DailyRecord` and `Num`.
mod filter;
mod num;
mod record;

pub use filter::Filter;
pub use num::Num;
pub use record::{derive_distance, DailyRecord, RecordDraft, Records};
