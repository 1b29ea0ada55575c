//! Built-in starter document.
//!
//! This is the document a fresh install (or a `reset`) starts from. Item ids
//! here are fixed short strings; ids minted at runtime use the id generator
//! and never collide with these.

use crate::content::*;
use crate::style::{SectionStyle, TextAlign, TypographyStyle};
use indexmap::IndexMap;

const HERO_IMAGE: &str =
    "https://images.unsplash.com/photo-1519389950473-47ba0277781c?auto=format&fit=crop&q=80&w=800";
const ABOUT_IMAGE: &str =
    "https://images.unsplash.com/photo-1499750310107-5fef28a66643?auto=format&fit=crop&q=80&w=800";

fn nav(id: &str, label: &str, href: &str) -> NavLink {
    NavLink {
        id: id.to_string(),
        label: label.to_string(),
        href: href.to_string(),
    }
}

fn header_entry(title: &str, subtitle: &str) -> SectionHeader {
    SectionHeader {
        title: title.to_string(),
        subtitle: subtitle.to_string(),
    }
}

impl Default for SiteDocument {
    fn default() -> Self {
        let default_style = SectionStyle::default();

        let mut section_headers = IndexMap::new();
        section_headers.insert("about".to_string(), header_entry("About Me", ""));
        section_headers.insert(
            "services".to_string(),
            header_entry(
                "Services",
                "Specialized publishing services tailored to make your book stand out.",
            ),
        );
        section_headers.insert(
            "kdpCategories".to_string(),
            header_entry("Categories", "Expertise across all major book categories."),
        );
        section_headers.insert(
            "portfolio".to_string(),
            header_entry("My Projects", "Recent success stories and designs."),
        );
        section_headers.insert(
            "promotions".to_string(),
            header_entry("Special Offers", "Exclusive deals for new authors."),
        );
        section_headers.insert(
            "testimonials".to_string(),
            header_entry("Testimonials", "What authors say about my work."),
        );
        section_headers.insert(
            "contact".to_string(),
            header_entry(
                "Let's Work Together",
                "Ready to publish? Enter your email and let's get started.",
            ),
        );

        let mut section_styles = IndexMap::new();
        section_styles.insert(
            "home".to_string(),
            SectionStyle {
                padding_top: 120,
                padding_bottom: 60,
                ..default_style.clone()
            },
        );
        for key in [
            "about",
            "services",
            "kdpCategories",
            "promotions",
            "portfolio",
            "testimonials",
        ] {
            section_styles.insert(key.to_string(), default_style.clone());
        }
        section_styles.insert(
            "contact".to_string(),
            SectionStyle {
                padding_top: 120,
                padding_bottom: 120,
                ..default_style
            },
        );

        let mut enabled_sections = IndexMap::new();
        for key in [
            "home",
            "about",
            "services",
            "kdpCategories",
            "promotions",
            "portfolio",
            "testimonials",
            "contact",
        ] {
            enabled_sections.insert(key.to_string(), true);
        }

        Self {
            general: General {
                name: "NORTHBOOK PRESS.".to_string(),
                logo_url: None,
                hero_greeting: Some("Hi, I am".to_string()),
                title: "Independent Publishing Expert".to_string(),
                description: "Helping authors publish, optimize and sell books with \
                              professional precision. From formatting to launch strategy, \
                              I turn your manuscript into a finished book."
                    .to_string(),
                hero_image: HERO_IMAGE.to_string(),
                about_image: Some(ABOUT_IMAGE.to_string()),
                email: "hello@northbook.example".to_string(),
                phone: None,
                linkedin: Some("https://linkedin.com/in/northbook".to_string()),
                fiverr: None,
                hero_cta_text: Some("Hire Me".to_string()),
                hero_cta_link: Some("#contact".to_string()),
                brand_color: Some("#FF6B4E".to_string()),
                secondary_color: Some("#111827".to_string()),
                button_style: Some(ButtonShape::Rounded),
            },
            header: HeaderConfig {
                sticky: true,
                layout: HeaderLayout::Standard,
                menu_items: vec![
                    nav("h1", "Home", "#home"),
                    nav("h2", "About", "#about"),
                    nav("h3", "Services", "#services"),
                    nav("h4", "Portfolio", "#portfolio"),
                    nav("h5", "Contact", "#contact"),
                ],
                custom_html: None,
            },
            footer: FooterConfig {
                columns: vec![FooterColumn {
                    id: "fcol1".to_string(),
                    title: "Navigation".to_string(),
                    links: vec![
                        nav("fl1", "Home", "#home"),
                        nav("fl2", "About Me", "#about"),
                        nav("fl3", "Services", "#services"),
                    ],
                }],
                copyright: "Northbook Press. All Rights Reserved.".to_string(),
                custom_html: None,
                show_socials: true,
            },
            typography: Typography {
                hero_title: TypographyStyle {
                    font_size: 72.0,
                    font_weight: "700".to_string(),
                    color: Some("#111827".to_string()),
                    text_align: Some(TextAlign::Left),
                    letter_spacing: -2.0,
                    line_height: 1.1,
                },
                hero_subtitle: TypographyStyle {
                    font_size: 24.0,
                    font_weight: "700".to_string(),
                    color: Some("#FF6B4E".to_string()),
                    text_align: Some(TextAlign::Left),
                    letter_spacing: 0.0,
                    line_height: 1.2,
                },
                section_title: TypographyStyle {
                    font_size: 48.0,
                    font_weight: "700".to_string(),
                    color: Some("#111827".to_string()),
                    text_align: Some(TextAlign::Center),
                    letter_spacing: -1.0,
                    line_height: 1.2,
                },
                section_subtitle: TypographyStyle {
                    font_size: 16.0,
                    font_weight: "400".to_string(),
                    color: Some("#4B5563".to_string()),
                    text_align: Some(TextAlign::Center),
                    letter_spacing: 0.0,
                    line_height: 1.6,
                },
                body_text: TypographyStyle {
                    font_size: 16.0,
                    font_weight: "400".to_string(),
                    color: Some("#4B5563".to_string()),
                    text_align: Some(TextAlign::Left),
                    letter_spacing: 0.0,
                    line_height: 1.6,
                },
                font_family_heading: "'Poppins', sans-serif".to_string(),
                font_family_body: "'Inter', sans-serif".to_string(),
            },
            section_headers,
            section_styles,
            about: About {
                content: "I am a dedicated publishing expert with years of experience \
                          helping authors turn manuscripts into professional books. I \
                          handle the publishing complexity so you can focus on writing."
                    .to_string(),
                expertises: vec![
                    Expertise {
                        id: "exp1".to_string(),
                        text: "Book Publishing".to_string(),
                    },
                    Expertise {
                        id: "exp2".to_string(),
                        text: "Formatting".to_string(),
                    },
                    Expertise {
                        id: "exp3".to_string(),
                        text: "Cover Compliance".to_string(),
                    },
                    Expertise {
                        id: "exp4".to_string(),
                        text: "Listing Optimization".to_string(),
                    },
                ],
            },
            services: vec![
                Service {
                    id: "svc1".to_string(),
                    title: "Account Setup".to_string(),
                    description: "Complete guidance on setting up your publishing account, \
                                  tax information and payment details correctly."
                        .to_string(),
                    icon_name: "Settings".to_string(),
                    is_hidden: false,
                },
                Service {
                    id: "svc2".to_string(),
                    title: "Book Formatting".to_string(),
                    description: "Professional interior layout for paperback, hardcover \
                                  and ebook formats."
                        .to_string(),
                    icon_name: "BookOpen".to_string(),
                    is_hidden: false,
                },
                Service {
                    id: "svc3".to_string(),
                    title: "Keyword Research".to_string(),
                    description: "In-depth research to find high-traffic, low-competition \
                                  keywords that boost visibility."
                        .to_string(),
                    icon_name: "Search".to_string(),
                    is_hidden: false,
                },
            ],
            kdp_categories: vec![
                KdpCategory {
                    id: "cat1".to_string(),
                    title: "Literature and Fiction".to_string(),
                    description: "Classic and contemporary fiction formatting and layout."
                        .to_string(),
                    image_url: "https://images.unsplash.com/photo-1474932430478-367dbb6832c1?auto=format&fit=crop&q=80&w=800".to_string(),
                    is_hidden: false,
                },
                KdpCategory {
                    id: "cat2".to_string(),
                    title: "Children's Books".to_string(),
                    description: "Colorful layouts and age-appropriate typography."
                        .to_string(),
                    image_url: "https://images.unsplash.com/photo-1512820790803-83ca734da794?auto=format&fit=crop&q=80&w=800".to_string(),
                    is_hidden: false,
                },
                KdpCategory {
                    id: "cat3".to_string(),
                    title: "Self Help".to_string(),
                    description: "Clean and motivational layouts for non-fiction."
                        .to_string(),
                    image_url: "https://images.unsplash.com/photo-1506126613408-eca07ce68773?auto=format&fit=crop&q=80&w=800".to_string(),
                    is_hidden: false,
                },
            ],
            portfolio: vec![
                Project {
                    id: "prj1".to_string(),
                    title: "The Silent Ocean".to_string(),
                    book_type: "Paperback & eBook".to_string(),
                    description: "Complete formatting and launch support for a mystery novel."
                        .to_string(),
                    image_url: "https://images.unsplash.com/photo-1544947950-fa07a98d237f?auto=format&fit=crop&q=80&w=800".to_string(),
                    category: "Literature and Fiction".to_string(),
                    is_hidden: false,
                },
                Project {
                    id: "prj2".to_string(),
                    title: "Path to Wellness".to_string(),
                    book_type: "Paperback".to_string(),
                    description: "Professional interior formatting and publishing strategy."
                        .to_string(),
                    image_url: "https://images.unsplash.com/photo-1512820790803-83ca734da794?auto=format&fit=crop&q=80&w=800".to_string(),
                    category: "Self Help".to_string(),
                    is_hidden: false,
                },
            ],
            promotions: vec![Promotion {
                id: "prm1".to_string(),
                title: "New Author Bundle".to_string(),
                description: "20% off when you book formatting and cover design together."
                    .to_string(),
                image_url: "https://images.unsplash.com/photo-1512820790803-83ca734da794?auto=format&fit=crop&q=80&w=800".to_string(),
                is_hidden: false,
            }],
            testimonials: vec![Testimonial {
                id: "tst1".to_string(),
                client_name: "Sarah Jenkins".to_string(),
                role: "Novel Author".to_string(),
                content: "The publishing process was so simple. My book looks amazing in \
                          both digital and print!"
                    .to_string(),
                avatar_url: None,
                is_hidden: false,
            }],
            enabled_sections,
            page_structure: PageStructure {
                home: vec![
                    "home".to_string(),
                    "about".to_string(),
                    "services".to_string(),
                    "kdpCategories".to_string(),
                    "promotions".to_string(),
                    "portfolio".to_string(),
                    "testimonials".to_string(),
                    "contact".to_string(),
                ],
            },
            custom_sections: IndexMap::new(),
            contact_form: ContactForm {
                fields: vec![
                    FormField {
                        id: "f1".to_string(),
                        label: "Full Name".to_string(),
                        field_type: FormFieldType::Text,
                        required: true,
                        placeholder: Some("Jane Doe".to_string()),
                        options: None,
                    },
                    FormField {
                        id: "f2".to_string(),
                        label: "Email Address".to_string(),
                        field_type: FormFieldType::Email,
                        required: true,
                        placeholder: Some("jane@example.com".to_string()),
                        options: None,
                    },
                    FormField {
                        id: "f3".to_string(),
                        label: "Project Details".to_string(),
                        field_type: FormFieldType::Textarea,
                        required: false,
                        placeholder: Some("Tell me about your book...".to_string()),
                        options: None,
                    },
                ],
                submit_button_text: "Send Proposal".to_string(),
                success_message: "Thank you! I will get back to you within 24 hours."
                    .to_string(),
                enable_spam_protection: true,
            },
            advanced: Advanced {
                custom_css: None,
                head_html: None,
                seo: Seo {
                    title: "Northbook Press | Publishing Expert".to_string(),
                    description: "Professional publishing services for authors worldwide."
                        .to_string(),
                },
            },
            admin_settings: AdminSettings {
                role: AdminRole::SuperAdmin,
                is_draft: true,
                last_published_at: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::SiteDocument;
    use std::collections::HashSet;

    #[test]
    fn test_page_structure_keys_resolve() {
        let doc = SiteDocument::default();
        for key in &doc.page_structure.home {
            let known = key == "home"
                || key == "contact"
                || doc.section_headers.contains_key(key)
                || doc.custom_sections.contains_key(key);
            assert!(known, "dangling section key in defaults: {key}");
        }
    }

    #[test]
    fn test_default_item_ids_unique_per_collection() {
        let doc = SiteDocument::default();
        let ids: Vec<&str> = doc.services.iter().map(|s| s.id.as_str()).collect();
        let set: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(ids.len(), set.len());
    }
}
