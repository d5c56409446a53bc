//! Reusable UI building blocks, rendered via Leptos SSR.
//!
//! # Components
//!
//! - [`Button`]: Clickable button with variants
//! - [`Card`], [`CardContent`], [`CardFooter`]: Titled card container
//! - [`Input`], [`Field`]: Form inputs
//! - [`Alert`]: Inline error / notice banner
//! - [`icons`]: SVG icon components

mod alert;
mod button;
mod card;
mod icons;
mod input;

pub use alert::{Alert, AlertVariant};
pub use button::{Button, ButtonSize, ButtonVariant};
pub use card::{Card, CardContent, CardFooter};
pub use icons::*;
pub use input::{Field, Input};
