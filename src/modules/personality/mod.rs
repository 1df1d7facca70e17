pub mod defaults;
pub mod store;

pub use defaults::{default_baseline, default_malleable};
pub use store::PersonalityStore;
