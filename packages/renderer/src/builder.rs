//! Builder element rendering.
//!
//! Each [`BuilderElement`] renders to at most one [`VNode`]. Children render
//! in array order, which is paint order. In edit mode the output carries
//! inert data-attribute affordances:
//!
//! - `data-element-id`: click-to-select contract. The host resolves a click
//!   to the nearest ancestor carrying this attribute and selects that id,
//!   so propagation stops at the first match.
//! - `data-selected="true"` on the selected node (selection ring).
//! - a `data-builder-controls` cluster (move/delete) inside the selected
//!   node only.
//! - `data-placeholder` drop hints inside empty containers.
//! - `contenteditable` on text and heading nodes.

use crate::vdom::VNode;
use pagecraft_document::{BuilderElement, ElementType};

/// Immutable per-render settings threaded through the tree walk.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    pub editing: bool,
    pub selected_id: Option<String>,
}

impl RenderContext {
    /// Read-only public site rendering.
    pub fn preview() -> Self {
        Self::default()
    }

    /// Edit-mode rendering with an optional current selection.
    pub fn editing(selected_id: Option<String>) -> Self {
        Self {
            editing: true,
            selected_id,
        }
    }

    fn is_selected(&self, id: &str) -> bool {
        self.editing && self.selected_id.as_deref() == Some(id)
    }
}

/// Render one element subtree. Returns `None` for nothing-to-paint cases;
/// children that render to `None` are simply skipped.
pub fn render_element(element: &BuilderElement, ctx: &RenderContext) -> Option<VNode> {
    let node = match element.element_type {
        ElementType::Section | ElementType::Container | ElementType::Card => {
            container(element, ctx)
        }
        ElementType::Row => {
            // Rows are flex containers by default; explicit styles win.
            let mut node = base_element("div", element, ctx)
                .with_style("display", "flex")
                .with_style("flex-wrap", "wrap");
            node = apply_styles(node, element);
            node.with_children(render_children(element, ctx))
        }
        ElementType::Column => {
            let mut node = apply_styles(base_element("div", element, ctx), element)
                .with_children(render_children(element, ctx));
            if ctx.editing && element.children().is_empty() {
                node = node.with_child(
                    VNode::element("div")
                        .with_attr("data-placeholder", "column")
                        .with_child(VNode::text("Column")),
                );
            }
            node
        }
        ElementType::Text => editable_text("p", element, ctx),
        ElementType::Heading => editable_text(heading_tag(element), element, ctx),
        ElementType::Button => {
            let inner = apply_styles(VNode::element("button"), element)
                .with_child(VNode::text(element.content.clone().unwrap_or_default()));
            base_element("div", element, ctx)
                .with_style("display", "inline-block")
                .with_opt_child(controls(element, ctx))
                .with_child(inner)
        }
        ElementType::Image => {
            let img = apply_styles(VNode::element("img"), element)
                .with_attr("src", element.content.clone().unwrap_or_default())
                .with_attr("alt", element.name.clone().unwrap_or_default())
                .with_style("width", "100%")
                .with_style("height", "100%");
            let mut wrapper = base_element("div", element, ctx).with_style("display", "inline-block");
            for key in ["width", "height"] {
                if let Some(value) = element.style.get(&key.into()) {
                    wrapper = wrapper.with_style(key, value);
                }
            }
            wrapper.with_opt_child(controls(element, ctx)).with_child(img)
        }
        ElementType::Icon => base_element("div", element, ctx)
            .with_style("display", "inline-block")
            .with_opt_child(controls(element, ctx))
            .with_child(
                apply_styles(VNode::element("div"), element)
                    .with_child(VNode::text(icon_glyph(element))),
            ),
        ElementType::Divider => base_element("div", element, ctx)
            .with_opt_child(controls(element, ctx))
            .with_child(apply_styles(VNode::element("hr"), element)),
        ElementType::Spacer => {
            let height = element
                .style
                .get(&"height".into())
                .unwrap_or("50px")
                .to_string();
            let mut node = apply_styles(base_element("div", element, ctx), element)
                .with_style("min-height", height)
                .with_opt_child(controls(element, ctx));
            if ctx.editing {
                node = node.with_child(
                    VNode::element("div")
                        .with_attr("data-placeholder", "spacer")
                        .with_child(VNode::text("Spacer")),
                );
            }
            node
        }
    };
    Some(node)
}

fn container(element: &BuilderElement, ctx: &RenderContext) -> VNode {
    let mut node = apply_styles(base_element("div", element, ctx), element)
        .with_children(render_children(element, ctx));
    if ctx.editing && element.children().is_empty() {
        node = node.with_child(
            VNode::element("div")
                .with_attr("data-placeholder", format!("empty-{}", element.element_type))
                .with_child(VNode::text(format!("Empty {}", element.element_type))),
        );
    }
    node
}

fn render_children(element: &BuilderElement, ctx: &RenderContext) -> Vec<VNode> {
    element
        .children()
        .iter()
        .filter_map(|child| render_element(child, ctx))
        .collect()
}

/// Tag plus id and the edit-mode selection attributes. Styles are applied
/// separately because some wrappers take only a subset of them.
fn base_element(tag: &str, element: &BuilderElement, ctx: &RenderContext) -> VNode {
    let mut node = VNode::element(tag).with_attr("id", element.id.clone());
    if ctx.editing {
        node = node
            .with_attr("data-element-id", element.id.clone())
            .with_attr("data-element-type", element.element_type.as_str());
        if ctx.is_selected(&element.id) {
            node = node.with_attr("data-selected", "true");
        }
    }
    node
}

fn apply_styles(mut node: VNode, element: &BuilderElement) -> VNode {
    for (key, value) in element.style.iter() {
        node = node.with_style(key.css_name(), value.clone());
    }
    node
}

/// Move/delete cluster, present only inside the selected node. Buttons are
/// identified by `data-action`; the host wires the handlers.
fn controls(element: &BuilderElement, ctx: &RenderContext) -> Option<VNode> {
    if !ctx.is_selected(&element.id) {
        return None;
    }
    let button = |action: &str, label: &str| {
        VNode::element("button")
            .with_attr("data-action", action)
            .with_child(VNode::text(label))
    };
    Some(
        VNode::element("div")
            .with_attr("data-builder-controls", element.id.clone())
            .with_child(
                VNode::element("span").with_child(VNode::text(element.element_type.as_str())),
            )
            .with_child(button("move-up", "←"))
            .with_child(button("move-down", "→"))
            .with_child(button("delete", "✕")),
    )
}

fn editable_text(tag: &str, element: &BuilderElement, ctx: &RenderContext) -> VNode {
    let mut node = apply_styles(base_element(tag, element, ctx), element)
        .with_opt_child(controls(element, ctx))
        .with_child(VNode::text(element.content.clone().unwrap_or_default()));
    if ctx.editing {
        node = node.with_attr("contenteditable", "true");
    }
    node
}

/// Heading level comes from props; anything outside h1..h6 falls back to h2.
fn heading_tag(element: &BuilderElement) -> &'static str {
    match element.props.get("level").and_then(|v| v.as_str()) {
        Some("h1") => "h1",
        Some("h3") => "h3",
        Some("h4") => "h4",
        Some("h5") => "h5",
        Some("h6") => "h6",
        _ => "h2",
    }
}

fn icon_glyph(element: &BuilderElement) -> String {
    element.content.clone().unwrap_or_else(|| "★".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_document::StyleBag;

    fn text_element(id: &str, content: &str) -> BuilderElement {
        BuilderElement::new(id, ElementType::Text).with_content(content)
    }

    #[test]
    fn test_preview_has_no_edit_attributes() {
        let element = text_element("t1", "hello");
        let node = render_element(&element, &RenderContext::preview()).unwrap();

        assert_eq!(node.tag(), Some("p"));
        assert_eq!(node.attr("id"), Some("t1"));
        assert!(node.attr("data-element-id").is_none());
        assert!(node.attr("contenteditable").is_none());
        assert_eq!(node.text_content(), "hello");
    }

    #[test]
    fn test_editing_marks_text_contenteditable() {
        let element = text_element("t1", "hello");
        let node = render_element(&element, &RenderContext::editing(None)).unwrap();

        assert_eq!(node.attr("data-element-id"), Some("t1"));
        assert_eq!(node.attr("contenteditable"), Some("true"));
        assert!(node.attr("data-selected").is_none());
    }

    #[test]
    fn test_controls_only_on_selected_node() {
        let tree = BuilderElement::new("root", ElementType::Section)
            .with_child(text_element("a", "one"))
            .with_child(text_element("b", "two"));

        let ctx = RenderContext::editing(Some("b".to_string()));
        let node = render_element(&tree, &ctx).unwrap();

        let selected = node
            .find_element(&|n| n.attr("data-selected") == Some("true"))
            .unwrap();
        assert_eq!(selected.attr("data-element-id"), Some("b"));
        assert!(selected
            .find_element(&|n| n.attr("data-builder-controls").is_some())
            .is_some());

        let other = node
            .find_element(&|n| n.attr("data-element-id") == Some("a"))
            .unwrap();
        assert!(other
            .find_element(&|n| n.attr("data-builder-controls").is_some())
            .is_none());
    }

    #[test]
    fn test_children_render_in_array_order() {
        let tree = BuilderElement::new("root", ElementType::Row)
            .with_child(text_element("a", "one"))
            .with_child(text_element("b", "two"));

        let node = render_element(&tree, &RenderContext::preview()).unwrap();
        let ids: Vec<&str> = node.children().iter().filter_map(|c| c.attr("id")).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(node.style("display"), Some("flex"));
    }

    #[test]
    fn test_empty_container_placeholder_edit_mode_only() {
        let section = BuilderElement::new("s", ElementType::Section);

        let preview = render_element(&section, &RenderContext::preview()).unwrap();
        assert!(preview
            .find_element(&|n| n.attr("data-placeholder").is_some())
            .is_none());

        let edited = render_element(&section, &RenderContext::editing(None)).unwrap();
        let hint = edited
            .find_element(&|n| n.attr("data-placeholder").is_some())
            .unwrap();
        assert_eq!(hint.attr("data-placeholder"), Some("empty-section"));
    }

    #[test]
    fn test_heading_level_prop() {
        let mut heading = BuilderElement::new("h", ElementType::Heading).with_content("Title");
        heading
            .props
            .insert("level".to_string(), serde_json::json!("h1"));
        let node = render_element(&heading, &RenderContext::preview()).unwrap();
        assert_eq!(node.tag(), Some("h1"));

        heading
            .props
            .insert("level".to_string(), serde_json::json!("h9"));
        let node = render_element(&heading, &RenderContext::preview()).unwrap();
        assert_eq!(node.tag(), Some("h2"));
    }

    #[test]
    fn test_styles_convert_to_css_names() {
        let style: StyleBag = [("backgroundColor", "#111"), ("paddingTop", "8px")]
            .into_iter()
            .collect();
        let element = BuilderElement::new("c", ElementType::Container).with_style(style);
        let node = render_element(&element, &RenderContext::preview()).unwrap();

        assert_eq!(node.style("background-color"), Some("#111"));
        assert_eq!(node.style("padding-top"), Some("8px"));
    }

    #[test]
    fn test_image_renders_src_from_content() {
        let image = BuilderElement::new("i", ElementType::Image)
            .with_content("https://example.com/x.jpg")
            .with_name("Cover");
        let node = render_element(&image, &RenderContext::preview()).unwrap();

        let img = node.find_element(&|n| n.tag() == Some("img")).unwrap();
        assert_eq!(img.attr("src"), Some("https://example.com/x.jpg"));
        assert_eq!(img.attr("alt"), Some("Cover"));
    }
}
