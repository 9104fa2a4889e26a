#![cfg(target_arch = "wasm32")]

//! Hiện thực các seam của `timeline-core` trên DOM thật qua `web-sys`.

use futures::future::LocalBoxFuture;
use timeline_core::{AttributeSource, FormatContext, HostElement, ImageElement, InsertPosition, Page};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{console, Document, Element, HtmlElement, NodeList, Window};

/// Host element: thẻ giữ chỗ mang các thuộc tính `data-*`.
#[derive(Clone)]
pub struct DomHost {
    element: Element,
}

impl DomHost {
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    fn elements(&self, selector: &str) -> Vec<Element> {
        collect_elements(self.element.query_selector_all(selector))
    }
}

impl AttributeSource for DomHost {
    fn attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }
}

impl HostElement for DomHost {
    type Image = DomImage;

    fn insert_html(&self, position: InsertPosition, html: &str) {
        report(self.element.insert_adjacent_html(position.as_str(), html));
    }

    fn add_class(&self, class: &str) {
        report(self.element.class_list().add_1(class));
    }

    fn set_attribute(&self, name: &str, value: &str) {
        report(self.element.set_attribute(name, value));
    }

    fn set_style_property(&self, name: &str, value: &str) {
        set_style(&self.element, name, value);
    }

    fn content_images(&self) -> Vec<DomImage> {
        self.elements(".tl-content img")
            .into_iter()
            .map(|element| DomImage { element })
            .collect()
    }

    fn trailing_event_height(&self) -> Option<f64> {
        let events = self.elements(".tl-event");
        let trailing = events.len().checked_sub(2).and_then(|index| events.get(index))?;
        Some(trailing.get_bounding_client_rect().height())
    }
}

/// Ảnh nằm trong nội dung sự kiện, tải trễ qua `data-src`.
pub struct DomImage {
    element: Element,
}

impl AttributeSource for DomImage {
    fn attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }
}

impl ImageElement for DomImage {
    fn add_class(&self, class: &str) {
        report(self.element.class_list().add_1(class));
    }

    fn set_attribute(&self, name: &str, value: &str) {
        report(self.element.set_attribute(name, value));
    }

    fn set_style_property(&self, name: &str, value: &str) {
        set_style(&self.element, name, value);
    }
}

/// Trang hiện tại: tìm host, lập lịch task và lắng nghe resize.
#[derive(Clone)]
pub struct DomPage {
    window: Window,
    document: Document,
}

impl DomPage {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }
}

impl Page for DomPage {
    type Host = DomHost;

    fn discover(&self, selector: &str) -> Vec<DomHost> {
        collect_elements(self.document.query_selector_all(selector))
            .into_iter()
            .map(DomHost::new)
            .collect()
    }

    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }

    fn on_resize(&self, mut callback: Box<dyn FnMut()>) {
        let closure = Closure::<dyn FnMut()>::new(move || callback());
        report(
            self.window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref()),
        );
        closure.forget();
    }

    fn format_context(&self) -> FormatContext {
        let offset = -js_sys::Date::new_0().get_timezone_offset();
        FormatContext::from_offset_minutes(offset as i32)
    }
}

fn collect_elements(list: Result<NodeList, JsValue>) -> Vec<Element> {
    match list {
        Ok(list) => (0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect(),
        Err(err) => {
            console::error_1(&err);
            Vec::new()
        }
    }
}

fn set_style(element: &Element, name: &str, value: &str) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        report(element.style().set_property(name, value));
    }
}

fn report(result: Result<(), JsValue>) {
    if let Err(err) = result {
        console::error_1(&err);
    }
}
