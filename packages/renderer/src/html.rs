//! HTML text emission.
//!
//! Serializes a [`VNode`] tree to HTML. Text and attribute values are
//! escaped; the only unescaped passthrough is the document-level
//! `advanced.headHtml` snippet, which is admin-authored by definition.

use crate::sections::compose_page;
use crate::vdom::VNode;
use crate::RenderContext;
use pagecraft_document::SiteDocument;

/// Options for HTML emission
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Pretty print with one element per line
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

impl HtmlOptions {
    pub fn compact() -> Self {
        Self {
            pretty: false,
            indent: String::new(),
        }
    }
}

/// Elements with no closing tag and no children.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

struct Context {
    options: HtmlOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: HtmlOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            let indent = self.options.indent.clone();
            for _ in 0..self.depth {
                self.buffer.push_str(&indent);
            }
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }
}

/// Emit one VNode tree as HTML.
pub fn render_html(node: &VNode, options: HtmlOptions) -> String {
    let mut ctx = Context::new(options);
    emit(node, &mut ctx);
    ctx.buffer
}

/// Emit the full public page: doctype, head (SEO metadata, custom CSS and
/// head HTML) and the composed body.
pub fn render_page(doc: &SiteDocument, options: HtmlOptions) -> String {
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html>");
    ctx.indent();

    emit_head(doc, &mut ctx);

    ctx.add_line("<body>");
    ctx.indent();
    emit(&compose_page(doc, &RenderContext::preview()), &mut ctx);
    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");
    ctx.buffer
}

fn emit_head(doc: &SiteDocument, ctx: &mut Context) {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");

    let seo = &doc.advanced.seo;
    let title = if seo.title.is_empty() {
        &doc.general.name
    } else {
        &seo.title
    };
    ctx.add_line(&format!("<title>{}</title>", escape_text(title)));
    if !seo.description.is_empty() {
        ctx.add_line(&format!(
            "<meta name=\"description\" content=\"{}\">",
            escape_attr(&seo.description)
        ));
    }

    if let Some(css) = &doc.advanced.custom_css {
        ctx.add_line("<style>");
        ctx.indent();
        ctx.add_line(css);
        ctx.dedent();
        ctx.add_line("</style>");
    }
    if let Some(head_html) = &doc.advanced.head_html {
        ctx.add_line(head_html);
    }

    ctx.dedent();
    ctx.add_line("</head>");
}

fn emit(node: &VNode, ctx: &mut Context) {
    match node {
        VNode::Text { content } => {
            ctx.add_line(&escape_text(content));
        }
        VNode::Comment { content } => {
            ctx.add_line(&format!("<!-- {} -->", escape_text(content)));
        }
        VNode::Element {
            tag,
            attributes,
            styles,
            children,
        } => {
            let mut open = format!("<{tag}");
            for (name, value) in attributes {
                open.push_str(&format!(" {}=\"{}\"", name, escape_attr(value)));
            }
            if !styles.is_empty() {
                let css: Vec<String> = styles
                    .iter()
                    .map(|(name, value)| format!("{name}: {value}"))
                    .collect();
                open.push_str(&format!(" style=\"{}\"", escape_attr(&css.join("; "))));
            }

            if VOID_ELEMENTS.contains(&tag.as_str()) {
                open.push('>');
                ctx.add_line(&open);
                return;
            }

            if children.is_empty() {
                open.push_str(&format!("></{tag}>"));
                ctx.add_line(&open);
                return;
            }

            open.push('>');
            ctx.add_line(&open);
            ctx.indent();
            for child in children {
                emit(child, ctx);
            }
            ctx.dedent();
            ctx.add_line(&format!("</{tag}>"));
        }
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_element() {
        let node = VNode::element("p")
            .with_attr("id", "x")
            .with_child(VNode::text("hello"));
        let html = render_html(&node, HtmlOptions::compact());
        assert_eq!(html, "<p id=\"x\">hello</p>");
    }

    #[test]
    fn test_void_element_has_no_closing_tag() {
        let node = VNode::element("img").with_attr("src", "a.jpg");
        let html = render_html(&node, HtmlOptions::compact());
        assert_eq!(html, "<img src=\"a.jpg\">");
    }

    #[test]
    fn test_styles_render_inline() {
        let node = VNode::element("div")
            .with_style("color", "#fff")
            .with_style("padding-top", "8px");
        let html = render_html(&node, HtmlOptions::compact());
        assert_eq!(html, "<div style=\"color: #fff; padding-top: 8px\"></div>");
    }

    #[test]
    fn test_text_and_attrs_are_escaped() {
        let node = VNode::element("div")
            .with_attr("title", "a \"quote\" & more")
            .with_child(VNode::text("<script>alert(1)</script>"));
        let html = render_html(&node, HtmlOptions::compact());

        assert!(html.contains("title=\"a &quot;quote&quot; &amp; more\""));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_pretty_print_indents_children() {
        let node = VNode::element("div").with_child(VNode::element("p").with_child(VNode::text("x")));
        let html = render_html(&node, HtmlOptions::default());
        assert_eq!(html, "<div>\n  <p>\n    x\n  </p>\n</div>\n");
    }

    #[test]
    fn test_full_page_has_doctype_and_title() {
        let doc = SiteDocument::default();
        let html = render_page(&doc, HtmlOptions::default());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>"));
        assert!(html.contains("<main data-page=\"home\""));
        assert!(html.contains("id=\"contact\""));
    }
}
