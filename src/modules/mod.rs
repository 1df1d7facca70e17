pub mod context;
pub mod evolution;
pub mod history;
pub mod personality;
pub mod traits;
