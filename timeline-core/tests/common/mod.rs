#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use futures::executor::LocalSpawner;
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use regex::Regex;
use timeline_core::{
    AttributeSource, Collection, CollectionFilter, CollectionItem, CollectionSource, Diagnostic,
    FocalPoint, HostElement, ImageElement, InsertPosition, Page,
};

/// In-memory stand-in for a host element.
#[derive(Clone, Default)]
pub struct FakeHost {
    inner: Rc<FakeHostInner>,
}

#[derive(Default)]
struct FakeHostInner {
    attributes: RefCell<BTreeMap<String, String>>,
    classes: RefCell<Vec<String>>,
    style: RefCell<BTreeMap<String, String>>,
    inserted: RefCell<Vec<(InsertPosition, String)>>,
    images: RefCell<Vec<FakeImage>>,
    event_heights: RefCell<Vec<f64>>,
}

impl FakeHost {
    pub fn with_attributes(pairs: &[(&str, &str)]) -> Self {
        let host = Self::default();
        for (name, value) in pairs {
            host.inner
                .attributes
                .borrow_mut()
                .insert(name.to_string(), value.to_string());
        }
        host
    }

    /// Heights reported for rendered events, in document order.
    pub fn set_event_heights(&self, heights: &[f64]) {
        *self.inner.event_heights.borrow_mut() = heights.to_vec();
    }

    pub fn html(&self) -> String {
        self.inner
            .inserted
            .borrow()
            .iter()
            .map(|(_, html)| html.as_str())
            .collect()
    }

    pub fn insertions(&self) -> Vec<(InsertPosition, String)> {
        self.inner.inserted.borrow().clone()
    }

    pub fn classes(&self) -> Vec<String> {
        self.inner.classes.borrow().clone()
    }

    pub fn style(&self, name: &str) -> Option<String> {
        self.inner.style.borrow().get(name).cloned()
    }

    pub fn images(&self) -> Vec<FakeImage> {
        self.inner.images.borrow().clone()
    }

    pub fn event_count(&self) -> usize {
        self.html().matches(r#"class="tl-event""#).count()
    }
}

impl AttributeSource for FakeHost {
    fn attribute(&self, name: &str) -> Option<String> {
        self.inner.attributes.borrow().get(name).cloned()
    }
}

impl HostElement for FakeHost {
    type Image = FakeImage;

    fn insert_html(&self, position: InsertPosition, html: &str) {
        let body = Regex::new(r#"(?s)<div class="tl-body">(.*?)</div>"#).unwrap();
        let img = Regex::new(r"<img\s([^>]*)>").unwrap();
        let attr = Regex::new(r#"([\w-]+)="([^"]*)""#).unwrap();

        for section in body.captures_iter(html) {
            for tag in img.captures_iter(&section[1]) {
                let image = FakeImage::default();
                for pair in attr.captures_iter(&tag[1]) {
                    image.set_attribute(&pair[1], &pair[2]);
                }
                self.inner.images.borrow_mut().push(image);
            }
        }

        self.inner
            .inserted
            .borrow_mut()
            .push((position, html.to_string()));
    }

    fn add_class(&self, class: &str) {
        self.inner.classes.borrow_mut().push(class.to_string());
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.inner
            .attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn set_style_property(&self, name: &str, value: &str) {
        self.inner
            .style
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn content_images(&self) -> Vec<FakeImage> {
        self.images()
    }

    fn trailing_event_height(&self) -> Option<f64> {
        let count = self.event_count();
        if count < 2 {
            return None;
        }
        Some(
            self.inner
                .event_heights
                .borrow()
                .get(count - 2)
                .copied()
                .unwrap_or(100.0),
        )
    }
}

#[derive(Clone, Default)]
pub struct FakeImage {
    inner: Rc<FakeImageInner>,
}

#[derive(Default)]
struct FakeImageInner {
    attributes: RefCell<BTreeMap<String, String>>,
    classes: RefCell<Vec<String>>,
    style: RefCell<BTreeMap<String, String>>,
}

impl FakeImage {
    pub fn classes(&self) -> Vec<String> {
        self.inner.classes.borrow().clone()
    }

    pub fn style(&self, name: &str) -> Option<String> {
        self.inner.style.borrow().get(name).cloned()
    }
}

impl AttributeSource for FakeImage {
    fn attribute(&self, name: &str) -> Option<String> {
        self.inner.attributes.borrow().get(name).cloned()
    }
}

impl ImageElement for FakeImage {
    fn add_class(&self, class: &str) {
        self.inner.classes.borrow_mut().push(class.to_string());
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.inner
            .attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn set_style_property(&self, name: &str, value: &str) {
        self.inner
            .style
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }
}

/// Source returning a canned result and recording each request. Clones share the log.
#[derive(Clone)]
pub struct FakeSource {
    result: Result<Collection, Diagnostic>,
    pub calls: Rc<RefCell<Vec<(String, Option<CollectionFilter>, bool)>>>,
}

impl FakeSource {
    pub fn ok(items: Vec<CollectionItem>) -> Self {
        Self {
            result: Ok(Collection { items }),
            calls: Rc::default(),
        }
    }

    pub fn failing(url: &str) -> Self {
        Self {
            result: Err(Diagnostic::collection(url, None, "status 404")),
            calls: Rc::default(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

#[async_trait(?Send)]
impl CollectionSource for FakeSource {
    async fn fetch_collection(
        &self,
        url: &str,
        filter: Option<&CollectionFilter>,
        cache: bool,
    ) -> Result<Collection, Diagnostic> {
        self.calls
            .borrow_mut()
            .push((url.to_string(), filter.cloned(), cache));
        self.result.clone()
    }
}

/// Page backed by a `LocalPool` spawner and a list of resize callbacks.
pub struct FakePage {
    pub hosts: RefCell<Vec<FakeHost>>,
    spawner: LocalSpawner,
    resize: RefCell<Vec<Box<dyn FnMut()>>>,
    pub discoveries: Cell<usize>,
}

impl FakePage {
    pub fn new(spawner: LocalSpawner, hosts: Vec<FakeHost>) -> Self {
        Self {
            hosts: RefCell::new(hosts),
            spawner,
            resize: RefCell::new(Vec::new()),
            discoveries: Cell::new(0),
        }
    }

    pub fn resize_listener_count(&self) -> usize {
        self.resize.borrow().len()
    }

    pub fn fire_resize(&self) {
        for callback in self.resize.borrow_mut().iter_mut() {
            callback();
        }
    }
}

impl Page for FakePage {
    type Host = FakeHost;

    fn discover(&self, _selector: &str) -> Vec<FakeHost> {
        self.discoveries.set(self.discoveries.get() + 1);
        self.hosts.borrow().clone()
    }

    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        self.spawner.spawn_local(task).unwrap();
    }

    fn on_resize(&self, callback: Box<dyn FnMut()>) {
        self.resize.borrow_mut().push(callback);
    }
}

/// Three items newest first, the way the collection API returns them.
pub fn sample_items() -> Vec<CollectionItem> {
    [("Gamma", 3), ("Beta", 2), ("Alpha", 1)]
        .into_iter()
        .map(|(title, day)| CollectionItem {
            title: title.to_string(),
            body: format!(
                r#"<p>{title} body</p><img data-src="https://img/{day}.jpg" data-image-focal-point="0.25,0.5">"#
            ),
            excerpt: format!("<p>{title} excerpt</p>"),
            publish_on: Some(Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap()),
            asset_url: Some(format!("https://assets/{day}.jpg")),
            media_focal_point: Some(FocalPoint { x: 0.5, y: 0.5 }),
        })
        .collect()
}
