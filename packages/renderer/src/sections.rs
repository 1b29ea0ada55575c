//! Page section composition.
//!
//! `pageStructure.home` is the single source of section order. For each key:
//! a matching entry in `customSections` wins and renders through the builder
//! renderer; otherwise the key's base (the part before the first `-`) picks
//! a built-in section renderer. Keys disabled in `enabledSections` and keys
//! matching nothing render nothing. Edit mode keeps disabled sections
//! visible so they can be re-enabled in place.

use crate::builder::{render_element, RenderContext};
use crate::vdom::VNode;
use pagecraft_document::{SiteDocument, SpacingUnit, TypographyStyle};

/// Render the whole home page in document order.
pub fn compose_page(doc: &SiteDocument, ctx: &RenderContext) -> VNode {
    let mut main = VNode::element("main").with_attr("data-page", "home");
    for key in &doc.page_structure.home {
        main = main.with_opt_child(render_section(doc, key, ctx));
    }
    main
}

/// Render one section by key, or nothing.
pub fn render_section(doc: &SiteDocument, key: &str, ctx: &RenderContext) -> Option<VNode> {
    if let Some(root) = doc.custom_sections.get(key) {
        return Some(custom_section(key, root, ctx));
    }

    let base_key = key.split('-').next().unwrap_or(key);
    if !doc.section_enabled(key) && !doc.section_enabled(base_key) && !ctx.editing {
        return None;
    }

    match base_key {
        "home" => Some(hero(doc, key, ctx)),
        "about" => Some(about(doc, key)),
        "services" => Some(services(doc, key)),
        "kdpCategories" => Some(kdp_categories(doc, key)),
        "promotions" => Some(promotions(doc, key)),
        "portfolio" => Some(portfolio(doc, key)),
        "testimonials" => Some(testimonials(doc, key)),
        "contact" => Some(contact(doc, key)),
        _ => None,
    }
}

/// Custom sections select as a unit: the wrapper carries the section key as
/// its element id, and the delete control lives on the wrapper, not inside
/// the tree.
fn custom_section(key: &str, root: &pagecraft_document::BuilderElement, ctx: &RenderContext) -> VNode {
    let mut wrapper = VNode::element("div")
        .with_attr("data-section-key", key)
        .with_attr("data-custom-section", "true");
    if ctx.editing {
        wrapper = wrapper.with_attr("data-element-id", key);
        if ctx.selected_id.as_deref() == Some(key) {
            wrapper = wrapper.with_attr("data-selected", "true").with_child(
                VNode::element("div")
                    .with_attr("data-builder-controls", key)
                    .with_child(VNode::element("span").with_child(VNode::text("Custom Section")))
                    .with_child(
                        VNode::element("button")
                            .with_attr("data-action", "remove-section")
                            .with_child(VNode::text("Delete")),
                    ),
            );
        }
    }
    wrapper.with_opt_child(render_element(root, ctx))
}

// --- built-in sections ------------------------------------------------------

fn hero(doc: &SiteDocument, key: &str, ctx: &RenderContext) -> VNode {
    let general = &doc.general;
    let typ = &doc.typography;

    let mut copy = VNode::element("div").with_attr("data-role", "hero-copy");
    if let Some(greeting) = &general.hero_greeting {
        copy = copy.with_child(VNode::element("p").with_child(VNode::text(greeting.clone())));
    }
    copy = copy
        .with_child(typeset(
            VNode::element("h1"),
            &typ.hero_subtitle,
            &typ.font_family_heading,
        )
        .with_child(VNode::text(general.name.clone())))
        .with_child(typeset(
            VNode::element("h2"),
            &typ.hero_title,
            &typ.font_family_heading,
        )
        .with_child(VNode::text(general.title.clone())))
        .with_child(typeset(
            VNode::element("p"),
            &typ.body_text,
            &typ.font_family_body,
        )
        .with_child(VNode::text(general.description.clone())));

    let cta_label = general
        .hero_cta_text
        .clone()
        .unwrap_or_else(|| "Hire Me".to_string());
    let mut cta = VNode::element("a")
        .with_attr("href", general.hero_cta_link.clone().unwrap_or_else(|| "#contact".to_string()))
        .with_attr("data-role", "hero-cta")
        .with_child(VNode::text(cta_label));
    if let Some(brand) = &general.brand_color {
        cta = cta.with_style("background-color", brand.clone());
    }
    copy = copy.with_child(cta);

    // While editing the hero image stays visible even when unset so it can
    // be clicked and replaced.
    let mut shell = section_shell(doc, key, "home").with_child(copy);
    if !general.hero_image.is_empty() || ctx.editing {
        shell = shell.with_child(
            VNode::element("img")
                .with_attr("src", general.hero_image.clone())
                .with_attr("alt", general.name.clone())
                .with_attr("data-role", "hero-image"),
        );
    }
    shell
}

fn about(doc: &SiteDocument, key: &str) -> VNode {
    let mut shell =
        section_shell(doc, key, "about").with_opt_child(section_heading(doc, "about"));
    shell = shell.with_child(
        typeset(
            VNode::element("p"),
            &doc.typography.body_text,
            &doc.typography.font_family_body,
        )
        .with_child(VNode::text(doc.about.content.clone())),
    );

    if !doc.about.expertises.is_empty() {
        let mut list = VNode::element("ul").with_attr("data-role", "expertises");
        for expertise in &doc.about.expertises {
            list = list.with_child(
                VNode::element("li")
                    .with_attr("data-item-id", expertise.id.clone())
                    .with_child(VNode::text(expertise.text.clone())),
            );
        }
        shell = shell.with_child(list);
    }

    if let Some(image) = &doc.general.about_image {
        shell = shell.with_child(
            VNode::element("img")
                .with_attr("src", image.clone())
                .with_attr("alt", doc.general.name.clone()),
        );
    }
    shell
}

fn services(doc: &SiteDocument, key: &str) -> VNode {
    let mut grid = VNode::element("div").with_attr("data-role", "grid");
    for service in visible(&doc.services, |s| s.is_hidden, Some(9)) {
        grid = grid.with_child(
            VNode::element("div")
                .with_attr("data-item-id", service.id.clone())
                .with_attr("data-icon", service.icon_name.clone())
                .with_child(VNode::element("h3").with_child(VNode::text(service.title.clone())))
                .with_child(
                    VNode::element("p").with_child(VNode::text(service.description.clone())),
                ),
        );
    }
    section_shell(doc, key, "services")
        .with_opt_child(section_heading(doc, "services"))
        .with_child(grid)
}

/// Category grid is capped at nine entries to hold its 3x3 layout.
fn kdp_categories(doc: &SiteDocument, key: &str) -> VNode {
    let mut grid = VNode::element("div").with_attr("data-role", "grid");
    for category in visible(&doc.kdp_categories, |c| c.is_hidden, Some(9)) {
        grid = grid.with_child(
            VNode::element("div")
                .with_attr("data-item-id", category.id.clone())
                .with_child(
                    VNode::element("img")
                        .with_attr("src", category.image_url.clone())
                        .with_attr("alt", category.title.clone()),
                )
                .with_child(VNode::element("h3").with_child(VNode::text(category.title.clone())))
                .with_child(
                    VNode::element("p").with_child(VNode::text(category.description.clone())),
                ),
        );
    }
    section_shell(doc, key, "kdpCategories")
        .with_opt_child(section_heading(doc, "kdpCategories"))
        .with_child(grid)
}

fn promotions(doc: &SiteDocument, key: &str) -> VNode {
    let mut list = VNode::element("div").with_attr("data-role", "promotions");
    for promotion in visible(&doc.promotions, |p| p.is_hidden, None) {
        list = list.with_child(
            VNode::element("div")
                .with_attr("data-item-id", promotion.id.clone())
                .with_child(
                    VNode::element("img")
                        .with_attr("src", promotion.image_url.clone())
                        .with_attr("alt", promotion.title.clone()),
                )
                .with_child(VNode::element("h3").with_child(VNode::text(promotion.title.clone())))
                .with_child(
                    VNode::element("p").with_child(VNode::text(promotion.description.clone())),
                ),
        );
    }
    section_shell(doc, key, "promotions")
        .with_opt_child(section_heading(doc, "promotions"))
        .with_child(list)
}

fn portfolio(doc: &SiteDocument, key: &str) -> VNode {
    let mut grid = VNode::element("div").with_attr("data-role", "grid");
    for project in visible(&doc.portfolio, |p| p.is_hidden, Some(9)) {
        grid = grid.with_child(
            VNode::element("div")
                .with_attr("data-item-id", project.id.clone())
                .with_attr("data-category", project.category.clone())
                .with_child(
                    VNode::element("img")
                        .with_attr("src", project.image_url.clone())
                        .with_attr("alt", project.title.clone()),
                )
                .with_child(VNode::element("h3").with_child(VNode::text(project.title.clone())))
                .with_child(VNode::element("p").with_child(VNode::text(project.book_type.clone()))),
        );
    }
    section_shell(doc, key, "portfolio")
        .with_opt_child(section_heading(doc, "portfolio"))
        .with_child(grid)
}

fn testimonials(doc: &SiteDocument, key: &str) -> VNode {
    let mut list = VNode::element("div").with_attr("data-role", "testimonials");
    for testimonial in visible(&doc.testimonials, |t| t.is_hidden, None) {
        let mut card = VNode::element("figure")
            .with_attr("data-item-id", testimonial.id.clone())
            .with_child(
                VNode::element("blockquote")
                    .with_child(VNode::text(testimonial.content.clone())),
            );
        if let Some(avatar) = &testimonial.avatar_url {
            card = card.with_child(
                VNode::element("img")
                    .with_attr("src", avatar.clone())
                    .with_attr("alt", testimonial.client_name.clone()),
            );
        }
        card = card.with_child(
            VNode::element("figcaption").with_child(VNode::text(format!(
                "{}, {}",
                testimonial.client_name, testimonial.role
            ))),
        );
        list = list.with_child(card);
    }
    section_shell(doc, key, "testimonials")
        .with_opt_child(section_heading(doc, "testimonials"))
        .with_child(list)
}

fn contact(doc: &SiteDocument, key: &str) -> VNode {
    let mut info = VNode::element("div").with_attr("data-role", "contact-info").with_child(
        VNode::element("a")
            .with_attr("href", format!("mailto:{}", doc.general.email))
            .with_child(VNode::text(doc.general.email.clone())),
    );
    if let Some(phone) = &doc.general.phone {
        info = info.with_child(
            VNode::element("a")
                .with_attr("href", format!("tel:{phone}"))
                .with_child(VNode::text(phone.clone())),
        );
    }

    let form = &doc.contact_form;
    let mut form_node = VNode::element("form")
        .with_attr("name", "contact")
        .with_attr("method", "POST");
    for field in &form.fields {
        let mut label = VNode::element("label")
            .with_attr("for", field.id.clone())
            .with_child(VNode::text(field.label.clone()));
        let control = form_control(field);
        label = label.with_child(control);
        form_node = form_node.with_child(label);
    }
    let mut submit = VNode::element("button")
        .with_attr("type", "submit")
        .with_child(VNode::text(form.submit_button_text.clone()));
    if let Some(brand) = &doc.general.brand_color {
        submit = submit.with_style("background-color", brand.clone());
    }
    form_node = form_node.with_child(submit);

    section_shell(doc, key, "contact")
        .with_opt_child(section_heading(doc, "contact"))
        .with_child(info)
        .with_child(form_node)
}

fn form_control(field: &pagecraft_document::FormField) -> VNode {
    use pagecraft_document::FormFieldType;

    let mut control = match field.field_type {
        FormFieldType::Textarea => VNode::element("textarea"),
        FormFieldType::Select => {
            let mut select = VNode::element("select");
            for option in field.options.as_deref().unwrap_or(&[]) {
                select = select.with_child(
                    VNode::element("option")
                        .with_attr("value", option.clone())
                        .with_child(VNode::text(option.clone())),
                );
            }
            select
        }
        FormFieldType::Email => VNode::element("input").with_attr("type", "email"),
        FormFieldType::Tel => VNode::element("input").with_attr("type", "tel"),
        FormFieldType::Text => VNode::element("input").with_attr("type", "text"),
    };
    control = control
        .with_attr("id", field.id.clone())
        .with_attr("name", field.id.clone());
    if field.required {
        control = control.with_attr("required", "required");
    }
    if let Some(placeholder) = &field.placeholder {
        control = control.with_attr("placeholder", placeholder.clone());
    }
    control
}

// --- shared helpers ---------------------------------------------------------

fn visible<'a, T>(
    items: &'a [T],
    hidden: impl Fn(&T) -> bool,
    limit: Option<usize>,
) -> impl Iterator<Item = &'a T> {
    items
        .iter()
        .filter(move |item| !hidden(item))
        .take(limit.unwrap_or(usize::MAX))
}

/// `<section>` shell with padding and background from the key's style
/// record (defaults when absent).
fn section_shell(doc: &SiteDocument, key: &str, html_id: &str) -> VNode {
    let style = doc
        .section_styles
        .get(key)
        .cloned()
        .unwrap_or_default();
    let unit = style.spacing_unit.unwrap_or(SpacingUnit::Px);
    let mut node = VNode::element("section")
        .with_attr("id", html_id)
        .with_attr("data-section-key", key)
        .with_style("padding-top", spacing(style.padding_top, unit))
        .with_style("padding-bottom", spacing(style.padding_bottom, unit));
    if let Some(background) = &style.background_color {
        node = node.with_style("background-color", background.clone());
    }
    if style.is_dark == Some(true) {
        node = node.with_attr("data-theme", "dark");
    }
    node
}

fn spacing(value: u32, unit: SpacingUnit) -> String {
    match unit {
        SpacingUnit::Px => format!("{value}px"),
        SpacingUnit::Rem => format!("{value}rem"),
        SpacingUnit::Vh => format!("{value}vh"),
    }
}

/// Title/subtitle header block for a built-in section, absent when no
/// header record exists.
fn section_heading(doc: &SiteDocument, base_key: &str) -> Option<VNode> {
    let header = doc.section_headers.get(base_key)?;
    let typ = &doc.typography;
    Some(
        VNode::element("header")
            .with_child(
                typeset(
                    VNode::element("h2"),
                    &typ.section_title,
                    &typ.font_family_heading,
                )
                .with_child(VNode::text(header.title.clone())),
            )
            .with_child(
                typeset(
                    VNode::element("p"),
                    &typ.section_subtitle,
                    &typ.font_family_body,
                )
                .with_child(VNode::text(header.subtitle.clone())),
            ),
    )
}

/// Apply a typography preset as inline styles.
fn typeset(mut node: VNode, style: &TypographyStyle, font_family: &str) -> VNode {
    node = node
        .with_style("font-size", format!("{}px", style.font_size))
        .with_style("font-weight", style.font_weight.clone())
        .with_style("letter-spacing", format!("{}px", style.letter_spacing))
        .with_style("line-height", style.line_height.to_string())
        .with_style("font-family", font_family.to_string());
    if let Some(color) = &style.color {
        node = node.with_style("color", color.clone());
    }
    if let Some(align) = style.text_align {
        node = node.with_style("text-align", align.as_css());
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_document::{BuilderElement, ElementType, SectionStyle};

    fn doc() -> SiteDocument {
        SiteDocument::default()
    }

    #[test]
    fn test_page_follows_structure_order() {
        let doc = doc();
        let page = compose_page(&doc, &RenderContext::preview());

        let keys: Vec<&str> = page
            .children()
            .iter()
            .filter_map(|n| n.attr("data-section-key"))
            .collect();
        assert_eq!(
            keys,
            doc.page_structure
                .home
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_disabled_section_hidden_in_preview_visible_in_edit() {
        let mut doc = doc();
        doc.enabled_sections.insert("services".to_string(), false);

        assert!(render_section(&doc, "services", &RenderContext::preview()).is_none());
        assert!(render_section(&doc, "services", &RenderContext::editing(None)).is_some());
    }

    #[test]
    fn test_dangling_key_renders_nothing() {
        let doc = doc();
        assert!(render_section(&doc, "no-such-section", &RenderContext::preview()).is_none());
        assert!(render_section(&doc, "no-such-section", &RenderContext::editing(None)).is_none());
    }

    #[test]
    fn test_custom_section_takes_precedence() {
        let mut doc = doc();
        let root = BuilderElement::new("root-1", ElementType::Section)
            .with_child(BuilderElement::new("t-1", ElementType::Text).with_content("custom!"));
        doc.custom_sections.insert("services".to_string(), root);

        let node = render_section(&doc, "services", &RenderContext::preview()).unwrap();
        assert_eq!(node.attr("data-custom-section"), Some("true"));
        assert!(node.text_content().contains("custom!"));
    }

    #[test]
    fn test_custom_section_delete_control_when_selected() {
        let mut doc = doc();
        doc.custom_sections.insert(
            "custom-1".to_string(),
            BuilderElement::new("r", ElementType::Section),
        );
        doc.page_structure.home.push("custom-1".to_string());

        let ctx = RenderContext::editing(Some("custom-1".to_string()));
        let node = render_section(&doc, "custom-1", &ctx).unwrap();
        assert_eq!(node.attr("data-selected"), Some("true"));
        let control = node
            .find_element(&|n| n.attr("data-action") == Some("remove-section"))
            .unwrap();
        assert_eq!(control.tag(), Some("button"));
    }

    #[test]
    fn test_hidden_items_are_filtered() {
        let mut doc = doc();
        doc.services[1].is_hidden = true;
        let node = render_section(&doc, "services", &RenderContext::preview()).unwrap();

        let shown: Vec<&str> = collect_item_ids(&node);
        assert!(!shown.contains(&doc.services[1].id.as_str()));
        assert!(shown.contains(&doc.services[0].id.as_str()));
    }

    #[test]
    fn test_category_grid_caps_at_nine() {
        let mut doc = doc();
        let template = doc.kdp_categories[0].clone();
        for i in 0..12 {
            let mut extra = template.clone();
            extra.id = format!("extra-{i}");
            doc.kdp_categories.push(extra);
        }
        let node = render_section(&doc, "kdpCategories", &RenderContext::preview()).unwrap();
        assert_eq!(collect_item_ids(&node).len(), 9);
    }

    #[test]
    fn test_section_style_applied_to_shell() {
        let mut doc = doc();
        doc.section_styles.insert(
            "about".to_string(),
            SectionStyle {
                padding_top: 4,
                padding_bottom: 2,
                background_color: Some("#fafafa".to_string()),
                is_dark: None,
                spacing_unit: Some(SpacingUnit::Rem),
            },
        );
        let node = render_section(&doc, "about", &RenderContext::preview()).unwrap();
        assert_eq!(node.style("padding-top"), Some("4rem"));
        assert_eq!(node.style("padding-bottom"), Some("2rem"));
        assert_eq!(node.style("background-color"), Some("#fafafa"));
    }

    fn collect_item_ids(node: &VNode) -> Vec<&str> {
        fn walk<'a>(node: &'a VNode, out: &mut Vec<&'a str>) {
            if let Some(id) = node.attr("data-item-id") {
                out.push(id);
            }
            for child in node.children() {
                walk(child, out);
            }
        }
        let mut out = Vec::new();
        walk(node, &mut out);
        out
    }
}
