pub mod personality_mock;

pub use personality_mock::*;
