// src/render.rs
//! Static HTML report for the ranked clusters.

use anyhow::{Context, Result};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::path::Path;

use crate::story::Cluster;

/// Render the ranked clusters as a complete HTML document.
pub fn render_html(clusters: &[Cluster], page_title: &str) -> String {
    let title = encode_text(page_title);
    let mut html = format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         \x20   <meta charset=\"UTF-8\">\n\
         \x20   <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         \x20   <title>{title}</title>\n\
         \x20   <style>\n\
         \x20       body {{ font-family: Arial, sans-serif; }}\n\
         \x20       h1 {{ text-align: center; }}\n\
         \x20       article {{ margin-bottom: 2rem; }}\n\
         \x20   </style>\n\
         </head>\n\
         <body>\n\
         \x20   <h1>{title}</h1>\n"
    );

    for cluster in clusters {
        html.push_str(&format!(
            "    <article>\n\
             \x20       <h2>{}</h2>\n\
             \x20       <p><a href=\"{}\">Read the full story</a></p>\n\
             \x20       <p>{}</p>\n\
             \x20       <p><em>Reported by {} source{}</em></p>\n\
             \x20   </article>\n",
            encode_text(&cluster.title),
            encode_double_quoted_attribute(&cluster.link),
            encode_text(&cluster.gist),
            cluster.count,
            if cluster.count == 1 { "" } else { "s" },
        ));
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Render and write the report, creating parent directories as needed.
pub fn write_report(clusters: &[Cluster], page_title: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    std::fs::write(path, render_html(clusters, page_title))
        .with_context(|| format!("writing report to {}", path.display()))
}
