//! Chat-specific UI components.
//!
//! The transcript is rendered newest first; each exchange shows the user's
//! prompt and the assistant's Markdown reply, with a delete button once the
//! backend has stored it.

mod header;
mod input_area;
mod message_list;
mod shell;

pub use header::ChatHeader;
pub use input_area::ChatInputArea;
pub use message_list::{ChatMessageList, MessageItem};
pub use shell::{ChatShell, ChatView};
