//! Presentational components
//!
//! Each component renders to an [`Element`](crate::markup::Element) using the
//! `cui-{block}__{element}--{modifier}` class vocabulary and reads colors only
//! through `var(--cui-color-*)` references, so restyling happens entirely
//! through the variables the theme manager writes.

pub mod button;
pub mod card;
pub mod icon;
pub mod input;
pub mod modal;
pub mod theme_selector;
pub mod toast;

pub use button::{button, Button, ButtonConfig, ButtonType, ButtonVariant, PointerEvent};
pub use card::{card, Card, CardVariant};
pub use icon::{icon, Icon, IconConfig};
pub use input::{Input, InputConfig, InputVariant};
pub use modal::{modal, Modal};
pub use theme_selector::{theme_preview, CategoryFilter, ThemeSelector};
pub use toast::{ToastContainer, ToastView};
