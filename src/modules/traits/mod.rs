pub mod blender;
pub mod vector;

pub use blender::{blend, DEFAULT_CORE_WEIGHT};
pub use vector::{
    clamp_intensity, Intensity, Trait, TraitDeltas, TraitParseError, TraitVector, MAX_INTENSITY,
    MIN_INTENSITY, NEUTRAL_INTENSITY,
};
