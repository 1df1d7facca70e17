pub mod services;

pub use services::PersonalityService;
