//! Static HTML rendering of a surface.

use mediagrid_core::{GalleryElement, MediaKind, Placeholder};

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn media_tag(kind: MediaKind, src: &str) -> String {
    match kind {
        MediaKind::Video => format!(r#"<video src="{}" controls></video>"#, escape(src)),
        _ => format!(r#"<img src="{}" alt="">"#, escape(src)),
    }
}

/// One grid cell per element.
pub fn render_element(element: &GalleryElement) -> String {
    match element {
        GalleryElement::Media { kind, src, caption }
        | GalleryElement::Preview { kind, src, caption } => format!(
            "<figure class=\"cell\">{}<figcaption>{}</figcaption></figure>",
            media_tag(*kind, src),
            escape(caption)
        ),
        GalleryElement::Placeholder(placeholder) => {
            let class = match placeholder {
                Placeholder::Empty => "placeholder",
                Placeholder::Error(_) => "placeholder error",
            };
            format!(
                "<p class=\"{}\">{}</p>",
                class,
                escape(placeholder.text())
            )
        }
    }
}

/// A standalone page showing the elements as a grid.
pub fn render_page(title: &str, elements: &[GalleryElement]) -> String {
    let cells: String = elements
        .iter()
        .map(|e| format!("    {}\n", render_element(e)))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <style>
    #gallery {{ display: grid; grid-template-columns: repeat(auto-fill, minmax(240px, 1fr)); gap: 1rem; }}
    .cell img, .cell video {{ width: 100%; }}
    figcaption, .placeholder {{ text-align: center; color: #666; font-size: small; }}
    .error {{ color: #b00; }}
  </style>
</head>
<body>
  <div id="gallery">
{cells}  </div>
</body>
</html>
"#,
        title = escape(title),
        cells = cells
    )
}
