//! # Codefield Core
//!
//! Drifting code-token background for a single-page portfolio, plus the
//! small state models behind the rest of the page.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        FRAME PIPELINE                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Host refresh → FrameLoop::step → TokenField::frame → Surface│
//! │       ↑               │                  ↑                   │
//! │  re-request       Continue /       pointer setter,           │
//! │  on Continue       Stopped          resize (full rebuild)    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in this crate touches a browser. The host implements
//! [`DrawSurface`] and feeds viewport, pointer and refresh callbacks;
//! [`RecordingSurface`] stands in for it headless.
//!
//! ## Example
//!
//! ```rust
//! use codefield_core::{FieldConfig, FrameLoop, RecordingSurface, TokenField, Viewport};
//!
//! let viewport = Viewport::new(1200.0, 800.0)?;
//! let field = TokenField::with_seed(FieldConfig::default(), viewport, 7)?;
//! let mut frame_loop = FrameLoop::new(field);
//! let stop = frame_loop.start();
//!
//! let mut surface = RecordingSurface::new();
//! assert!(frame_loop.step(&mut surface).should_continue());
//! stop.stop();
//! assert!(!frame_loop.step(&mut surface).should_continue());
//! # Ok::<(), codefield_core::FieldError>(())
//! ```

#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod field;
pub mod frame_loop;
pub mod page;
pub mod parallax;
pub mod pointer;
pub mod skills;
pub mod style;
pub mod surface;
pub mod token;
pub mod typewriter;
pub mod viewport;

pub use config::{FieldConfig, PageConfig, ParallaxConfig, SkillRevealConfig, TypewriterConfig};
pub use error::{FieldError, FieldResult};
pub use field::{FrameStats, TokenField};
pub use frame_loop::{FrameLoop, FrameOutcome, StopHandle};
pub use page::NavMenu;
pub use parallax::{LayerKind, LayerOffset, ParallaxLayers};
pub use pointer::PointerState;
pub use skills::SkillReveal;
pub use style::{BlendMode, Color};
pub use surface::{DrawCommand, DrawSurface, RecordingSurface, TextRun};
pub use token::Token;
pub use typewriter::{TypeStep, Typewriter};
pub use viewport::Viewport;
