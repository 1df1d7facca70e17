pub mod personality_mock;
