use crate::browser;
use crate::gallery::GalleryEntry;
use anyhow::{anyhow, Result};
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

const FALLBACK_NAME: &str = "game";

/// `"Super Mario 64!"` -> `"super-mario-64"`; empty results fall back to
/// `"game"`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        slug
    }
}

pub fn file_name(title: &str) -> String {
    format!("{}.html", slugify(title))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Minimal page that plays `absolute_url` full-window.
pub fn standalone_document(title: &str, absolute_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<meta name="viewport" content="width=device-width,initial-scale=1.0">
<style>
html,body{{margin:0;height:100%;background:#000;}}
iframe{{border:0;width:100%;height:100%;}}
</style>
</head>
<body>
<iframe src="{src}" allowfullscreen></iframe>
</body>
</html>"#,
        title = escape_html(title),
        src = escape_html(absolute_url),
    )
}

/// Offers the entry as a downloadable standalone `.html` file. The object URL
/// and the temporary anchor are released after `revoke_delay_ms`.
pub fn download(entry: &GalleryEntry, revoke_delay_ms: i32) -> Result<()> {
    let title = entry.display_title();
    let absolute = browser::absolute_url(&entry.url)?;
    let document = standalone_document(title, &absolute);

    let parts = js_sys::Array::of1(&JsValue::from_str(&document));
    let options = BlobPropertyBag::new();
    options.set_type("text/html");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|err| anyhow!("Could not build blob : {:#?}", err))?;
    let blob_url = Url::create_object_url_with_blob(&blob)
        .map_err(|err| anyhow!("Could not create object url : {:#?}", err))?;

    let anchor: HtmlAnchorElement = browser::create_element("a")?;
    anchor.set_href(&blob_url);
    anchor.set_download(&file_name(title));
    browser::body()?
        .append_child(&anchor)
        .map_err(|err| anyhow!("Could not attach download link : {:#?}", err))?;
    anchor.click();

    browser::spawn_local(async move {
        if let Err(err) = browser::sleep(revoke_delay_ms).await {
            error!("export: {:#}", err);
        }
        if let Err(err) = Url::revoke_object_url(&blob_url) {
            error!("export: could not revoke {} : {:#?}", blob_url, err);
        }
        anchor.remove();
    });
    Ok(())
}
