pub mod config;
pub mod demo;
pub mod mode;
pub mod profile;
pub mod responder;
pub mod transcript;
pub mod typing;
pub mod widget;

// Re-export main types for convenience
pub use config::Config;
pub use demo::{DemoAnimation, DemoSignal, DemoTimings};
pub use mode::Mode;
pub use profile::{Profile, SocialLinks};
pub use responder::{CannedResponder, Category, DelayRange};
pub use transcript::{Message, MessageId, Role, Transcript};
pub use typing::{StartDelay, Typewriter};
pub use widget::TerminalWidget;
