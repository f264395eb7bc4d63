pub(crate) mod loader;

pub(crate) use loader::{Snapshot, load_snapshot};
