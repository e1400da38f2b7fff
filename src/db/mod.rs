

pub mod snapshot;
pub mod source;
pub mod supabase;

pub use snapshot::{Snapshot, SnapshotSource};
pub use source::{ProfileSource, SourceError};
pub use supabase::SupabaseSource;
