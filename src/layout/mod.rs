//! Box layout engine for computing child positions and sizes inside a
//! container under padding, gap, alignment and free-space rules.
//!
//! The pass is a pure function of (container, children, options): it
//! writes only into a scratch bounds table owned by one [`LayoutPass`],
//! which is consumed when its results are committed to the model.

pub mod engine;
pub mod error;
pub mod options;

pub use engine::{BoundsData, LayoutPass};
pub use error::LayoutError;
pub use options::{HAlign, LayoutOptions, LayoutOverrides};
