#![forbid(unsafe_code)]

//! Static navigation content.
//!
//! Link labels, targets and footer text are pass-through data: the menu
//! animates whatever the consumer supplies and never validates or fetches it.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A navigation entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavLink {
    /// Visible text.
    pub label: String,
    /// Link destination.
    pub target: String,
}

impl NavLink {
    /// Create a link.
    pub fn new(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
        }
    }
}

/// One line in a footer section; linked lines carry a target.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FooterItem {
    /// Visible text.
    pub text: String,
    /// Optional link destination.
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: Option<String>,
}

impl FooterItem {
    fn text(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            target: None,
        }
    }

    fn link(text: &str, target: &str) -> Self {
        Self {
            text: text.to_owned(),
            target: Some(target.to_owned()),
        }
    }
}

/// A titled group of footer lines.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FooterSection {
    /// Section heading.
    pub title: String,
    /// Lines under the heading.
    pub items: Vec<FooterItem>,
}

/// Everything the overlay displays besides images.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavContent {
    /// Primary links, in display order.
    pub links: Vec<NavLink>,
    /// Footer columns, each a list of sections.
    pub footer: Vec<Vec<FooterSection>>,
}

impl NavContent {
    /// Number of animated secondary lines (section titles plus items).
    #[must_use]
    pub fn sub_item_count(&self) -> usize {
        self.footer
            .iter()
            .flatten()
            .map(|section| 1 + section.items.len())
            .sum()
    }
}

impl Default for NavContent {
    fn default() -> Self {
        let links = [
            "Home",
            "About",
            "Services",
            "Technologies",
            "Careers",
            "Portfolio",
            "Contact Us",
        ]
        .into_iter()
        .map(|label| NavLink::new(label, "#"))
        .collect();

        let contact = vec![
            FooterSection {
                title: "Contact Us".into(),
                items: vec![
                    FooterItem::text("+12149374683"),
                    FooterItem::text("info@bytesplatform.com"),
                ],
            },
            FooterSection {
                title: "Location".into(),
                items: vec![
                    FooterItem::text("Bytes Platform Production Office"),
                    FooterItem::text("14-C 2nd Commercial Ln"),
                    FooterItem::text("Defence V"),
                ],
            },
        ];
        let social = vec![FooterSection {
            title: "Follow Us".into(),
            items: vec![
                FooterItem::link("LinkedIn", "#"),
                FooterItem::link("Instagram", "https://www.instagram.com/bytesplatform/"),
                FooterItem::link("Twitter", "#"),
            ],
        }];

        Self {
            links,
            footer: vec![contact, social],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_content_shape() {
        let content = NavContent::default();
        assert_eq!(content.links.len(), 7);
        assert_eq!(content.links[0].label, "Home");
        assert_eq!(content.links[6].label, "Contact Us");
        assert_eq!(content.footer.len(), 2);
        // 3 titles + 8 lines
        assert_eq!(content.sub_item_count(), 11);
    }
}
