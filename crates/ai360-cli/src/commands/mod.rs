pub mod analyze;
pub mod cache;
pub mod chat;
pub mod dispatch;
pub mod overview;
pub mod predict;
pub mod profile;
pub mod speak;
