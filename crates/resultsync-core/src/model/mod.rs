pub mod change_type;
pub mod index_path;
pub mod record;

pub use change_type::ChangeType;
pub use index_path::IndexPath;
pub use record::FetchedRecord;
