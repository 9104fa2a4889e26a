//! Seams to the element a timeline attaches to.
//!
//! Methods take `&self`: DOM handles are shared references with interior
//! mutability, and failures to touch the page are logged by the implementor.

use crate::item::FocalPoint;
use crate::settings::AttributeSource;

pub const LOADED_CLASS: &str = "wm-timeline";
pub const LAST_EVENT_HEIGHT_PROPERTY: &str = "--last-event-height";
pub const IMAGE_LOADED_CLASS: &str = "wm-image-loaded";
pub const FOCAL_POINT_ATTRIBUTE: &str = "data-image-focal-point";

/// Where markup is inserted relative to the host's existing children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    AfterBegin,
    BeforeEnd,
}

impl InsertPosition {
    /// Position keyword understood by `insertAdjacentHTML`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AfterBegin => "afterbegin",
            Self::BeforeEnd => "beforeend",
        }
    }
}

/// Placeholder element carrying the timeline configuration.
pub trait HostElement: AttributeSource {
    type Image: ImageElement;

    fn insert_html(&self, position: InsertPosition, html: &str);
    fn add_class(&self, class: &str);
    fn set_attribute(&self, name: &str, value: &str);
    fn set_style_property(&self, name: &str, value: &str);
    /// Images inside rendered event content (`.tl-content img`).
    fn content_images(&self) -> Vec<Self::Image>;
    /// Rendered height in pixels of the second-to-last `tl-event`, if there is one.
    fn trailing_event_height(&self) -> Option<f64>;
}

pub trait ImageElement: AttributeSource {
    fn add_class(&self, class: &str);
    fn set_attribute(&self, name: &str, value: &str);
    fn set_style_property(&self, name: &str, value: &str);
}

/// Marks a lazily loaded content image as loaded.
///
/// Exposes the packed focal point as `--x`/`--y` percentages and promotes
/// `data-src` to `src`.
pub fn finalize_image<I: ImageElement + ?Sized>(image: &I) {
    image.add_class(IMAGE_LOADED_CLASS);

    match image
        .attribute(FOCAL_POINT_ATTRIBUTE)
        .as_deref()
        .and_then(FocalPoint::parse_packed)
    {
        Some(point) => {
            let (x, y) = point.percentages();
            image.set_style_property("--x", &x);
            image.set_style_property("--y", &y);
        }
        None => log::debug!("content image without a usable focal point"),
    }

    image.set_attribute("data-load", "true");
    if let Some(src) = image.attribute("data-src") {
        image.set_attribute("src", &src);
    }
}
