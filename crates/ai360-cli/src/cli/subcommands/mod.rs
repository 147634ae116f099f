pub mod cache;
pub mod profile;

pub use cache::CacheCommands;
pub use profile::{ProfileCommands, ProfileSetArgs};
