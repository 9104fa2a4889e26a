//! Discovery of host elements and wiring of one instance per host.

use std::rc::Rc;

use futures::future::LocalBoxFuture;

use crate::builder::{InstanceId, Phase, TimelineBuilder};
use crate::format::FormatContext;
use crate::host::HostElement;
use crate::settings::AttributeSource;
use crate::source::CollectionSource;

/// Selector matching timeline placeholders.
pub const PLUGIN_SELECTOR: &str = r#"[data-wm-plugin="timeline"]"#;
/// Set on a host once an instance owns it, so re-scans skip it.
pub const INSTANCE_ATTRIBUTE: &str = "data-wm-timeline-id";

/// The page hosting timelines: element lookup, task scheduling and resize events.
pub trait Page {
    type Host: HostElement + 'static;

    fn discover(&self, selector: &str) -> Vec<Self::Host>;
    /// Schedules `task` on the page's single-threaded task queue.
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>);
    /// Registers a callback fired on every viewport resize. Never removed.
    fn on_resize(&self, callback: Box<dyn FnMut()>);

    fn format_context(&self) -> FormatContext {
        FormatContext::default()
    }
}

/// Creates one [`TimelineBuilder`] per discovered host.
pub struct LifecycleController<P, S> {
    page: Rc<P>,
    source: Rc<S>,
    next_id: u64,
}

impl<P, S> LifecycleController<P, S>
where
    P: Page + 'static,
    S: CollectionSource + 'static,
{
    pub fn new(page: P, source: S) -> Self {
        Self {
            page: Rc::new(page),
            source: Rc::new(source),
            next_id: 0,
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// Attaches an instance to every host not seen before and schedules its
    /// load. Returns the ids assigned during this scan.
    pub fn scan(&mut self) -> Vec<InstanceId> {
        let mut started = Vec::new();

        for host in self.page.discover(PLUGIN_SELECTOR) {
            if host.attribute(INSTANCE_ATTRIBUTE).is_some() {
                continue;
            }

            let id = InstanceId(self.next_id);
            self.next_id += 1;
            host.set_attribute(INSTANCE_ATTRIBUTE, &id.0.to_string());

            let builder = TimelineBuilder::new(id, host, self.page.format_context());
            self.page
                .spawn_local(Box::pin(drive(builder, Rc::clone(&self.page), Rc::clone(&self.source))));
            started.push(id);
        }

        if !started.is_empty() {
            log::debug!("started {} timeline instance(s)", started.len());
        }
        started
    }
}

async fn drive<P, S>(mut builder: TimelineBuilder<P::Host>, page: Rc<P>, source: Rc<S>)
where
    P: Page + 'static,
    S: CollectionSource + 'static,
{
    match builder.run(source.as_ref()).await {
        Ok(Phase::Loaded) => {
            let builder = Rc::new(builder);
            page.on_resize(Box::new(move || {
                builder.measure_layout();
            }));
        }
        Ok(phase) => log::debug!("{} stopped in phase {phase:?}", builder.id()),
        Err(err) => log::warn!("{}: {err}", builder.id()),
    }
}
