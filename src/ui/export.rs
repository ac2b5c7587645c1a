//! Download the rendered diagram as SVG or PNG

pub const NO_DIAGRAM: &str = "No diagram to export";
pub const SVG_FILENAME: &str = "salesforce_erd.svg";
pub const PNG_FILENAME: &str = "salesforce_erd.png";

#[cfg(not(feature = "ssr"))]
mod browser {
    use super::{NO_DIAGRAM, PNG_FILENAME, SVG_FILENAME};
    use crate::ui::diagram::DIAGRAM_CONTAINER_ID;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    fn js_err(e: JsValue) -> String {
        format!("{:?}", e)
    }

    /// Serialized `<svg>` currently shown in the diagram container
    fn rendered_svg(document: &web_sys::Document) -> Result<String, String> {
        let svg = document
            .query_selector(&format!("#{} svg", DIAGRAM_CONTAINER_ID))
            .map_err(js_err)?
            .ok_or_else(|| NO_DIAGRAM.to_string())?;

        let serializer = web_sys::XmlSerializer::new().map_err(js_err)?;
        serializer.serialize_to_string(&svg).map_err(js_err)
    }

    fn trigger_download(
        document: &web_sys::Document,
        href: &str,
        filename: &str,
    ) -> Result<(), String> {
        let anchor = document
            .create_element("a")
            .map_err(js_err)?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| "Failed to create download link".to_string())?;
        anchor.set_href(href);
        anchor.set_download(filename);

        let body = document.body().ok_or("No document body")?;
        body.append_child(&anchor).map_err(js_err)?;
        anchor.click();
        body.remove_child(&anchor).map_err(js_err)?;
        Ok(())
    }

    pub fn export_svg() -> Result<(), String> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("No document")?;
        let svg = rendered_svg(&document)?;

        let parts = js_sys::Array::new();
        parts.push(&JsValue::from_str(&svg));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type("image/svg+xml;charset=utf-8");
        let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
            .map_err(js_err)?;

        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;
        let result = trigger_download(&document, &url, SVG_FILENAME);
        let _ = web_sys::Url::revoke_object_url(&url);
        result
    }

    /// Rasterize the SVG through an offscreen canvas once the image loads
    pub fn export_png() -> Result<(), String> {
        let window = web_sys::window().ok_or("No window")?;
        let document = window.document().ok_or("No document")?;
        let svg = rendered_svg(&document)?;

        let encoded = window.btoa(&svg).map_err(js_err)?;
        let image = web_sys::HtmlImageElement::new().map_err(js_err)?;

        let loaded = image.clone();
        let onload = Closure::once(move || {
            if let Err(e) = draw_and_download(&document, &loaded) {
                leptos::logging::error!("PNG export failed: {}", e);
            }
        });
        image.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();

        image.set_src(&format!("data:image/svg+xml;base64,{}", encoded));
        Ok(())
    }

    fn draw_and_download(
        document: &web_sys::Document,
        image: &web_sys::HtmlImageElement,
    ) -> Result<(), String> {
        let canvas = document
            .create_element("canvas")
            .map_err(js_err)?
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .map_err(|_| "Failed to create canvas".to_string())?;
        canvas.set_width(image.width());
        canvas.set_height(image.height());

        let context = canvas
            .get_context("2d")
            .map_err(js_err)?
            .ok_or("Canvas 2d context unavailable")?
            .dyn_into::<web_sys::CanvasRenderingContext2d>()
            .map_err(|_| "Canvas 2d context unavailable".to_string())?;
        context
            .draw_image_with_html_image_element(image, 0.0, 0.0)
            .map_err(js_err)?;

        let data_url = canvas.to_data_url_with_type("image/png").map_err(js_err)?;
        trigger_download(document, &data_url, PNG_FILENAME)
    }
}

#[cfg(not(feature = "ssr"))]
pub use browser::{export_png, export_svg};

#[cfg(feature = "ssr")]
pub fn export_svg() -> Result<(), String> {
    Err(NO_DIAGRAM.to_string())
}

#[cfg(feature = "ssr")]
pub fn export_png() -> Result<(), String> {
    Err(NO_DIAGRAM.to_string())
}
