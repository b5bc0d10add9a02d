//! Markup assembly: turn normalized Markdown sections into one styled HTML
//! document ready for the external renderer.
//!
//! The division of labour is strict: this module produces *markup only* —
//! section HTML, page-break markers, the styling block, and the
//! page-numbering footer rule. Layout, pagination mechanics, and artifact
//! encoding belong to the renderer behind
//! [`crate::renderer::ReportRenderer`].

use pulldown_cmark::{html, Options, Parser};

/// Marker emitted between report parts; the stylesheet maps it to a hard
/// page break.
pub(crate) const PAGE_BREAK: &str = r#"<div class="page-break"></div>"#;

/// Constant report styling: typography, section headings, and the printed
/// footer with a running page counter.
const REPORT_CSS: &str = r#"
  @page {
    size: A4;
    margin: 22mm 18mm 24mm 18mm;
    @bottom-center {
      content: "Page " counter(page);
      font-size: 9pt;
      color: #666;
    }
  }
  body {
    font-family: "Helvetica Neue", Helvetica, Arial, sans-serif;
    font-size: 11pt;
    line-height: 1.5;
    color: #1a1a1a;
  }
  .report-cover h1 {
    font-size: 26pt;
    margin-top: 38mm;
    text-align: center;
  }
  .report-section > h1 {
    font-size: 18pt;
    border-bottom: 2px solid #1a1a1a;
    padding-bottom: 4px;
  }
  h2 { font-size: 14pt; margin-top: 1.2em; }
  h3 { font-size: 12pt; }
  ul { padding-left: 1.4em; }
  li { margin-bottom: 0.25em; }
  pre {
    background: #f5f5f5;
    border: 1px solid #ddd;
    padding: 10px;
    font-size: 9pt;
    white-space: pre-wrap;
    word-wrap: break-word;
  }
  code { font-family: "SF Mono", Menlo, Consolas, monospace; }
  .page-break { page-break-after: always; }
"#;

/// Render one normalized Markdown section to HTML.
///
/// GFM extensions are enabled because the generator freely emits tables,
/// task lists, and strikethrough even when not asked to.
pub(crate) fn markdown_to_html(markdown: &str) -> String {
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut out, parser);
    out
}

/// One report section: heading, rendered body, trailing page break.
pub(crate) fn section_html(title: &str, markdown: &str) -> String {
    format!(
        "<section class=\"report-section\">\n<h1>{}</h1>\n{}</section>\n{PAGE_BREAK}\n",
        html_escape(title),
        markdown_to_html(markdown)
    )
}

/// The code appendix: embedded as an escaped preformatted block, never run
/// through the repair stages — reflow would destroy the code's line
/// structure.
pub(crate) fn code_section_html(title: &str, code: &str) -> String {
    format!(
        "<section class=\"report-section\">\n<h1>{}</h1>\n<pre><code>{}</code></pre>\n</section>\n",
        html_escape(title),
        html_escape(code)
    )
}

/// Wrap the assembled parts in the full document: cover block, styling,
/// and body. The result is the single string handed to the renderer.
pub(crate) fn wrap_report(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title_esc}</title>
<style>{css}</style>
</head>
<body>
<header class="report-cover">
<h1>{title_esc}</h1>
</header>
{page_break}
{body}</body>
</html>
"#,
        title_esc = html_escape(title),
        css = REPORT_CSS,
        page_break = PAGE_BREAK,
        body = body,
    )
}

/// Escape HTML special characters.
pub(crate) fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_renders_headings_and_lists() {
        let html = markdown_to_html("## Risks\n\n- vendor lock-in\n- churn");
        assert!(html.contains("<h2>"));
        assert!(html.contains("<li>vendor lock-in</li>"));
    }

    #[test]
    fn markdown_renders_gfm_tables() {
        let html = markdown_to_html("| A | B |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn section_title_is_escaped_and_break_appended() {
        let html = section_html("Specs & Analysis", "body");
        assert!(html.contains("<h1>Specs &amp; Analysis</h1>"));
        assert!(html.ends_with(&format!("{PAGE_BREAK}\n")));
    }

    #[test]
    fn code_section_escapes_content() {
        let html = code_section_html("MVP Skeleton", "if a < b:\n    pass");
        assert!(html.contains("a &lt; b"));
        assert!(html.contains("<pre><code>"));
        assert!(!html.contains("<script"));
    }

    #[test]
    fn wrapper_carries_title_styling_and_footer_rule() {
        let doc = wrap_report("SaaS Launchpad Report", "<p>hi</p>");
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>SaaS Launchpad Report</title>"));
        assert!(doc.contains("counter(page)"));
        assert!(doc.contains("page-break-after: always"));
        assert!(doc.contains("<p>hi</p>"));
    }

    #[test]
    fn html_escape_covers_the_specials() {
        assert_eq!(html_escape("<>&\"'"), "&lt;&gt;&amp;&quot;&#39;");
    }
}
