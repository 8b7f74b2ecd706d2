//! Flash messages that survive navigation.
//!
//! A mutation flow stashes its confirmation through [`FlashRelay`] and
//! navigates; the destination view drains the relay once on activation
//! and raises the toast. The slot behind the relay holds at most one
//! message, so rapid successive flows keep only the newest.

mod message;
mod relay;
mod slot;

pub use message::{FlashKind, FlashMessage};
pub use relay::FlashRelay;
pub use slot::{FileSlot, FlashSlot, MemorySlot, FLASH_FILE_NAME};
