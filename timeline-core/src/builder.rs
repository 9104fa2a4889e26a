//! Per-host timeline instance: `Idle → Loading → Loaded | Failed`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::diagnostic::Diagnostic;
use crate::format::FormatContext;
use crate::host::{
    finalize_image, HostElement, InsertPosition, LAST_EVENT_HEIGHT_PROPERTY, LOADED_CLASS,
};
use crate::item::CollectionItem;
use crate::markup::{render_events, wrap_timeline};
use crate::settings::{BodyContent, HostConfig};
use crate::source::CollectionSource;
use crate::TimelineError;

/// Identifier assigned to each instance at construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timeline-{}", self.0)
    }
}

/// Load phase. `Loaded` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Settings and data owned by one instance.
#[derive(Debug, Clone)]
pub struct TimelineState {
    config: HostConfig,
    items: Option<Vec<CollectionItem>>,
    phase: Phase,
    rendered: bool,
}

impl TimelineState {
    fn new(config: HostConfig) -> Self {
        Self {
            config,
            items: None,
            phase: Phase::Idle,
            rendered: false,
        }
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Items in source order; `None` until the fetch succeeds.
    pub fn items(&self) -> Option<&[CollectionItem]> {
        self.items.as_deref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loaded(&self) -> bool {
        self.phase == Phase::Loaded
    }

    pub fn is_rendered(&self) -> bool {
        self.rendered
    }
}

/// Drives one host element from configuration to rendered timeline.
pub struct TimelineBuilder<H> {
    id: InstanceId,
    host: H,
    context: FormatContext,
    state: TimelineState,
}

impl<H: HostElement> TimelineBuilder<H> {
    /// Resolves the host's settings once; nothing is fetched yet.
    pub fn new(id: InstanceId, host: H, context: FormatContext) -> Self {
        let config = HostConfig::resolve(&host);
        Self {
            id,
            host,
            context,
            state: TimelineState::new(config),
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn state(&self) -> &TimelineState {
        &self.state
    }

    /// Fetches the collection. Runs at most once; later calls return the
    /// phase already reached.
    pub async fn load<S: CollectionSource + ?Sized>(&mut self, source: &S) -> Phase {
        if self.state.phase != Phase::Idle {
            return self.state.phase;
        }
        self.state.phase = Phase::Loading;
        log::debug!("{}: loading {:?}", self.id, self.state.config.collection_url);

        let config = &self.state.config;
        let result = if config.collection_url.is_empty() {
            Err(Diagnostic::collection(
                "",
                config.filter.as_ref().map(ToString::to_string),
                "host element has no data-collection attribute",
            ))
        } else {
            source
                .fetch_collection(&config.collection_url, config.filter.as_ref(), config.cache)
                .await
        };

        match result {
            Ok(collection) => {
                log::debug!("{}: loaded {} items", self.id, collection.items.len());
                self.host.add_class(LOADED_CLASS);
                self.state.items = Some(collection.items);
                self.state.phase = Phase::Loaded;
            }
            Err(diagnostic) => {
                log::warn!("{}: {diagnostic}", self.id);
                self.host
                    .insert_html(InsertPosition::AfterBegin, &diagnostic.to_markup());
                self.state.phase = Phase::Failed;
            }
        }
        self.state.phase
    }

    /// Appends the timeline markup to the host. Returns the number of events.
    pub fn render(&mut self) -> Result<usize, TimelineError> {
        if self.state.phase != Phase::Loaded {
            return Err(TimelineError::NotLoaded(self.state.phase));
        }
        if self.state.rendered {
            return Err(TimelineError::AlreadyRendered);
        }

        let items = self.state.items.as_deref().unwrap_or_default();
        let events = render_events(items, &self.state.config, &self.context);
        self.host
            .insert_html(InsertPosition::BeforeEnd, &wrap_timeline(&events));
        self.state.rendered = true;

        if self.state.config.content == BodyContent::Body {
            for image in self.host.content_images() {
                finalize_image(&image);
            }
        }

        log::debug!("{}: rendered {} events", self.id, events.len());
        Ok(events.len())
    }

    /// Publishes the trailing event height on the host. Safe to call repeatedly.
    pub fn measure_layout(&self) -> Option<f64> {
        if !self.state.rendered {
            return None;
        }
        let height = self.host.trailing_event_height()?;
        self.host
            .set_style_property(LAST_EVENT_HEIGHT_PROPERTY, &format!("{height}px"));
        Some(height)
    }

    /// Loads, then renders and measures once the data has settled.
    pub async fn run<S: CollectionSource + ?Sized>(&mut self, source: &S) -> Result<Phase, TimelineError> {
        if self.load(source).await == Phase::Loaded {
            self.render()?;
            self.measure_layout();
        }
        Ok(self.state.phase)
    }
}
