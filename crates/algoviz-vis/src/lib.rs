//! Algoviz Visualizer
//!
//! Replays algorithm step logs against live visual state, with playback
//! controls and an HTTP/WebSocket surface for a frontend.
//!
//! # Architecture
//!
//! - **Store**: [`VisualState`], the only thing a replay mutates
//! - **Playback**: start, pause, step, seek and stop over one captured log
//! - **Traversal**: timed tree walks, separate from the step engine
//! - **Session**: selected algorithm, inputs, presets and interactive
//!   structures for one user
//! - **Driver**: ticks a session on a [`Clock`], one step per delay
//! - **REST/WebSocket**: control the session, pull frames
//!
//! # Usage
//!
//! ```ignore
//! let session = Session::new(VisConfig::from_env()?);
//! let server = VisServer::new(session);
//! server.serve(addr).await?;
//! ```

mod config;
mod driver;
mod error;
mod playback;
mod server;
mod session;
mod store;
mod traversal;

pub use config::{VisConfig, DEFAULT_ARRAY_LEN};
pub use driver::{drive, drive_traversal, CancelFlag, Clock, ManualClock, RunOutcome, TokioClock};
pub use error::{Result, VisError};
pub use playback::{Playback, PlaybackState, PlaybackStatus, Speed, Tick};
pub use server::{SessionSnapshot, VisServer};
pub use session::{
    Session, BUCKET_ARRAY_LEN, DEFAULT_STRINGS, MAX_HEAP_BUILD, MAX_ITEM_VALUE, MAX_KNAPSACK_CAPACITY,
    MAX_KNAPSACK_ITEMS, MAX_STRING_LEN,
};
pub use store::{TraversalView, VisualState};
pub use traversal::{TraversalPlayback, TraversalTick, TRAVERSAL_DELAY};
