mod key;
mod record;

pub use key::{KeyRange, RecordKey};
pub use record::TaskRecord;
