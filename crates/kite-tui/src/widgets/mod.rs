//! Custom widgets for the TUI

pub mod banner;
pub mod chips;
pub mod input_box;
pub mod markup;
pub mod message_list;
pub mod result_card;
pub mod selector;
pub mod spinner;

pub use banner::ErrorBanner;
pub use chips::Chips;
pub use input_box::InputBox;
pub use message_list::{ItemTarget, MessageList, item_targets};
pub use selector::{Selector, SelectorItem, SelectorState};
pub use spinner::Spinner;
