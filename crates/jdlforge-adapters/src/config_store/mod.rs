pub mod local;
pub mod memory;

pub use local::{ENTITY_DIR, GENERATOR_KEY, LocalEntityConfigStore, YO_RC_FILE};
pub use memory::InMemoryEntityConfigStore;
