pub mod personality_config;

pub use personality_config::{
    BlendConfig, ConfigError, EvolutionConfig, HistoryConfig, Identity, PersonalityConfig, ResetStrategy,
    DEFAULT_PERTURBATION_BOUND, DEFAULT_PROFILE_NAME, MAX_PERTURBATION_BOUND,
};
