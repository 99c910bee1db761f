//! Carousel items
//!
//! Items are caller-supplied and immutable from the carousel's perspective:
//! an icon name, a display label, and an optional activation callback fired
//! when the item is tapped while centered. Insertion order is display order.

use std::fmt;
use std::sync::Arc;

/// Zero-argument activation callback
pub type ActivateFn = Arc<dyn Fn() + Send + Sync>;

/// A selectable carousel entry
#[derive(Clone)]
pub struct CarouselItem {
    /// Icon name, resolved against an [`crate::icon::IconSet`]
    pub icon: String,
    /// Display label
    pub label: String,
    /// Invoked when the item is tapped while already centered
    pub on_activate: Option<ActivateFn>,
}

impl CarouselItem {
    /// Create an item with no activation callback
    pub fn new(icon: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            label: label.into(),
            on_activate: None,
        }
    }

    /// Set the activation callback
    pub fn on_activate<F: Fn() + Send + Sync + 'static>(mut self, callback: F) -> Self {
        self.on_activate = Some(Arc::new(callback));
        self
    }
}

impl fmt::Debug for CarouselItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselItem")
            .field("icon", &self.icon)
            .field("label", &self.label)
            .field("on_activate", &self.on_activate.is_some())
            .finish()
    }
}

/// Create a carousel item
pub fn item(icon: impl Into<String>, label: impl Into<String>) -> CarouselItem {
    CarouselItem::new(icon, label)
}
