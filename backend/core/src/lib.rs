pub mod error;
pub mod message;
pub mod traits;
pub mod types;
pub mod update;

pub use error::PriceFeedError;
pub use message::{ButtonAction, InlineButton, InlineKeyboard, Reply};
pub use traits::{ReplySender, SessionStore, SessionUpdate};
pub use types::{FlowState, Language, Session};
pub use update::{CallbackQuery, Chat, IncomingMessage, Update, User};
