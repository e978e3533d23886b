//! kite-chat: Client-side conversation pipeline
//!
//! This crate owns everything between the user's input and the rendered
//! reply: the append-only message log and its request lifecycle, session
//! identity, the markup renderer, result formatting and the demo overlay.

pub mod chat;
pub mod copy;
pub mod demo;
pub mod error;
pub mod format;
pub mod identity;
pub mod markup;
pub mod message;
pub mod store;
pub mod view;

pub use chat::{AgentCall, Chat};
pub use copy::{Clipboard, CopyIndicator, ItemKey, SystemClipboard};
pub use demo::DemoOverlay;
pub use error::Error;
pub use format::Accent;
pub use identity::SessionIdentity;
pub use message::{Message, Role};
pub use store::{ConversationStore, PendingRequest, Phase};
pub use view::ResultView;
