pub mod chat;
pub mod prediction;

pub use chat::{CancelToken, ChatFlow, ChatReply, ReplySource};
pub use prediction::{PredictionError, PredictionFlow, PredictionOutcome};
