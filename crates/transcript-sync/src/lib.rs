pub mod clock;
pub mod controller;
pub mod error;
pub mod index;
pub mod input;
pub mod types;
pub mod view;

pub use clock::{ClockEvent, MediaClock};
pub use controller::{SyncController, SyncPhase};
pub use error::SyncError;
pub use index::TokenIndex;
pub use input::TranscriptInput;
pub use types::{
    ScrollBehavior, SegmentPayload, SyncEffect, SyncFrame, Token, TranscriptPayload, WordPayload,
};
pub use view::SyncView;
