pub mod personality_service;

pub use personality_service::PersonalityService;
