//! Design tokens for theming
//!
//! Tokens are the atomic values that make up the design system:
//! - Color values and the named channels a theme fills in
//! - Base palettes and light/dark semantic tables
//! - Scale tokens (spacing, typography, radii, shadows, transitions)

mod channel;
mod color;
pub mod palette;
mod scale;

pub use channel::*;
pub use color::*;
pub use scale::*;
