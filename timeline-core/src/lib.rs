//! Logic lõi dựng timeline từ một collection bài viết: đọc cấu hình từ
//! host element, định dạng từng sự kiện và quản lý vòng đời instance.
//!
//! Pipeline:
//!
//! ```text
//! HostConfig::resolve → CollectionSource::fetch_collection → render_events → HostElement
//! ```

pub mod builder;
pub mod diagnostic;
pub mod format;
pub mod host;
pub mod item;
pub mod lifecycle;
pub mod markup;
pub mod settings;
pub mod source;

pub use builder::{InstanceId, Phase, TimelineBuilder, TimelineState};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use format::{
    format_date, order_items, resolve_body, resolve_title_format, FormatContext, TitleSpec,
};
pub use host::{finalize_image, HostElement, ImageElement, InsertPosition};
pub use item::{Collection, CollectionItem, FocalPoint};
pub use lifecycle::{LifecycleController, Page};
pub use markup::{render_event, render_events, render_timeline, wrap_timeline, RenderedEvent};
pub use settings::{
    AttributeSource, BodyContent, CollectionFilter, DateFormat, DatePosition, HostConfig,
    MediaStyle, TitleFormat,
};
pub use source::CollectionSource;

/// Lỗi chung khi dựng timeline.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    #[error("Timeline chưa tải xong dữ liệu (trạng thái hiện tại: {0:?})")]
    NotLoaded(Phase),
    #[error("Timeline đã được render, bỏ qua lần gọi thứ hai")]
    AlreadyRendered,
    #[error("Không đọc được dữ liệu: {0}")]
    Parse(String),
}
