#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Node};

const STYLE_TAG_SELECTOR: &str = "style[data-wm-timeline]";

/// Default CSS for the timeline along with easy-to-override custom properties.
pub const DEFAULT_STYLES: &str = r#"
[data-wm-plugin="timeline"] {
  --tl-bar-width: 2px;
  --tl-bar-color: currentColor;
  --tl-dot-size: 14px;
  --tl-media-size: 80px;
  --tl-gap: 34px;
  --tl-card-bg: rgba(0, 0, 0, 0.04);
  --tl-card-radius: 8px;
  --last-event-height: 0px;
}

.wm-timeline .timeline-wrapper {
  position: relative;
  display: grid;
  gap: var(--tl-gap);
  padding: 20px 0;
}

.wm-timeline .tl-event {
  position: relative;
  display: grid;
  grid-template-columns: 1fr var(--tl-media-size) 1fr;
  align-items: start;
  z-index: 1;
}

.wm-timeline .tl-event > .tl-date {
  grid-column: 1;
  text-align: right;
  padding-right: 20px;
}

.wm-timeline .tl-event:nth-of-type(even) > .tl-date {
  grid-column: 3;
  text-align: left;
  padding-left: 20px;
  padding-right: 0;
}

.wm-timeline .tl-content {
  grid-column: 3;
  grid-row: 1;
  position: relative;
  padding: 17px;
  background: var(--tl-card-bg);
  border-radius: var(--tl-card-radius);
}

.wm-timeline .tl-event:nth-of-type(even) .tl-content {
  grid-column: 1;
}

.wm-timeline .tl-content .arrow {
  position: absolute;
  top: 20px;
  left: -8px;
  width: 0;
  height: 0;
  border-top: 8px solid transparent;
  border-bottom: 8px solid transparent;
  border-right: 8px solid var(--tl-card-bg);
}

.wm-timeline .tl-event:nth-of-type(even) .tl-content .arrow {
  left: auto;
  right: -8px;
  border-right: 0;
  border-left: 8px solid var(--tl-card-bg);
}

.wm-timeline .tl-content .tl-date p,
.wm-timeline .tl-title {
  margin: 0 0 8px 0;
}

/* Wide layout shows the outside copy of the date. */
.wm-timeline .tl-event > .tl-date ~ .tl-content .tl-date,
[data-date="none"].wm-timeline .tl-date {
  display: none;
}

/* The bar is the last child, so the final event is the second-to-last one. */
.wm-timeline .tl-event:nth-last-child(2) {
  min-height: var(--last-event-height);
}

.wm-timeline .tl-body img {
  display: block;
  width: 100%;
  height: auto;
  object-fit: cover;
  object-position: var(--x, 50%) var(--y, 50%);
}

.wm-timeline .tl-body img:not(.wm-image-loaded) {
  visibility: hidden;
}

.wm-timeline .tl-media {
  grid-column: 2;
  grid-row: 1;
  display: flex;
  justify-content: center;
}

.wm-timeline .tl-media:empty::before {
  content: "";
  width: var(--tl-dot-size);
  height: var(--tl-dot-size);
  margin-top: 20px;
  border-radius: 50%;
  background: var(--tl-bar-color);
}

.wm-timeline .tl-media img {
  width: var(--tl-media-size);
  height: var(--tl-media-size);
  border-radius: 50%;
  object-fit: cover;
  object-position: calc(var(--x) * 100%) calc(var(--y) * 100%);
}

.wm-timeline .tl-bar {
  position: absolute;
  top: 0;
  bottom: 0;
  left: 50%;
  width: var(--tl-bar-width);
  transform: translateX(-50%);
  z-index: 0;
}

.wm-timeline .tl-bar span {
  display: block;
  height: 100%;
  background: var(--tl-bar-color);
}

[data-wm-plugin="timeline"] .wm-alert {
  padding: 17px;
  border: 1px dashed currentColor;
  border-radius: var(--tl-card-radius);
}

body:not(.sqs-edit-mode) [data-wm-plugin="timeline"] .wm-alert {
  display: none;
}

@media (max-width: 767px) {
  .wm-timeline .tl-event {
    grid-template-columns: var(--tl-media-size) 1fr;
  }

  .wm-timeline .tl-event > .tl-date,
  .wm-timeline .tl-event:nth-of-type(even) > .tl-date {
    display: none;
  }

  .wm-timeline .tl-event > .tl-date ~ .tl-content .tl-date {
    display: block;
  }

  [data-date="none"].wm-timeline .tl-date {
    display: none;
  }

  .wm-timeline .tl-content,
  .wm-timeline .tl-event:nth-of-type(even) .tl-content {
    grid-column: 2;
  }

  .wm-timeline .tl-media {
    grid-column: 1;
  }

  .wm-timeline .tl-bar {
    left: calc(var(--tl-media-size) / 2);
  }
}
"#;

pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.query_selector(STYLE_TAG_SELECTOR)?.is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("Document không có thẻ <head>"))?;

    let style_el = document.create_element("style")?;
    style_el.set_attribute("data-wm-timeline", "v1")?;
    style_el.set_text_content(Some(DEFAULT_STYLES));
    head.append_child(&style_el.clone().dyn_into::<Node>()?)?;

    Ok(())
}
