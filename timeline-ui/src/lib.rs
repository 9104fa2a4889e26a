//! Gắn timeline vào trang thật: tìm các thẻ `[data-wm-plugin="timeline"]`,
//! tải collection qua `fetch` và chèn markup trực tiếp vào DOM.

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod fetch;
#[cfg(target_arch = "wasm32")]
mod styles;

#[cfg(target_arch = "wasm32")]
mod wasm_ui {
    use std::cell::RefCell;

    use crate::dom::DomPage;
    use crate::fetch::{DomFragmentExtractor, FetchTransport};
    use crate::styles;
    use js_sys::Reflect;
    use timeline_collection::CollectionClient;
    use timeline_core::LifecycleController;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{console, Document, Window};

    type Controller = LifecycleController<DomPage, CollectionClient<FetchTransport>>;

    /// Sự kiện trang phát ra sau khi điều hướng nội bộ tải xong nội dung mới.
    const PAGE_LOAD_EVENT: &str = "mercury:load";

    thread_local! {
        static CONTROLLER: RefCell<Option<Controller>> = const { RefCell::new(None) };
    }

    fn page_handles() -> Result<(Window, Document), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("Không có window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("Không truy cập được document"))?;
        Ok((window, document))
    }

    fn scan() -> usize {
        CONTROLLER.with(|cell| {
            cell.borrow_mut()
                .as_mut()
                .map(|controller| controller.scan().len())
                .unwrap_or(0)
        })
    }

    /// Khởi tạo controller (chỉ một lần) rồi quét trang.
    /// Trả về số instance mới được gắn.
    #[wasm_bindgen(js_name = initTimelines)]
    pub fn init_timelines() -> Result<usize, JsValue> {
        let already_started = CONTROLLER.with(|cell| cell.borrow().is_some());
        if !already_started {
            let (window, document) = page_handles()?;
            styles::ensure_styles(&document)?;

            let source = CollectionClient::new(FetchTransport::new(window.clone()));
            let controller = LifecycleController::new(DomPage::new(window.clone(), document), source);
            CONTROLLER.with(|cell| *cell.borrow_mut() = Some(controller));

            let on_page_load = Closure::<dyn FnMut()>::new(|| {
                scan();
            });
            window.add_event_listener_with_callback(
                PAGE_LOAD_EVENT,
                on_page_load.as_ref().unchecked_ref(),
            )?;
            on_page_load.forget();
        }

        Ok(scan())
    }

    /// Quét lại sau khi nội dung được chèn động; host đã gắn sẽ bị bỏ qua.
    #[wasm_bindgen(js_name = wmInitContentLoad)]
    pub fn rescan() -> Result<usize, JsValue> {
        init_timelines()
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        if let Err(err) = init_timelines() {
            console::error_1(&err);
        }
    }

    /// Tải một trang khác và trả về phần nội dung chính của nó.
    #[wasm_bindgen(js_name = loadPageSection)]
    pub async fn load_page_section(url: String) -> Result<String, JsValue> {
        let (window, _) = page_handles()?;
        let version = template_version(&window);
        let client = CollectionClient::new(FetchTransport::new(window));

        match client
            .fetch_fragment(&url, version.as_deref(), &DomFragmentExtractor)
            .await
        {
            Ok(html) => Ok(html),
            Err(diagnostic) => {
                console::error_1(&JsValue::from_str(&diagnostic.to_string()));
                Ok(diagnostic.to_markup())
            }
        }
    }

    /// `Static.SQUARESPACE_CONTEXT.templateVersion`, dạng chuỗi.
    fn template_version(window: &Window) -> Option<String> {
        let value = ["Static", "SQUARESPACE_CONTEXT", "templateVersion"]
            .iter()
            .try_fold(JsValue::from(window.clone()), |target, key| {
                Reflect::get(&target, &JsValue::from_str(key))
                    .ok()
                    .filter(|value| !value.is_undefined() && !value.is_null())
            })?;
        value
            .as_string()
            .or_else(|| value.as_f64().map(|number| number.to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_ui::{init_timelines, load_page_section, rescan};

#[cfg(not(target_arch = "wasm32"))]
pub fn init_timelines() -> Result<usize, wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "timeline-ui chỉ hỗ trợ biên dịch target wasm32",
    ))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn rescan() -> Result<usize, wasm_bindgen::JsValue> {
    init_timelines()
}
