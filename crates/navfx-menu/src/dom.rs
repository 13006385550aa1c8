#![forbid(unsafe_code)]

//! Builds the menu's element tree in a [`Scene`].
//!
//! Only the elements the choreography touches are created, each tagged
//! with the selectors the timelines use. Text and assets live with the
//! host renderer.

use navfx_core::scene::{ElementId, Scene};

use crate::content::NavContent;
use crate::layers::{LAYER_COUNT, LayerRefs};
use crate::timeline::selectors;

/// Element ids of a mounted menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuDom {
    /// Root container.
    pub root: ElementId,
    /// Header toggle button.
    pub nav_toggle: ElementId,
    /// Hero section.
    pub hero: ElementId,
    /// Overlay.
    pub overlay: ElementId,
    /// Overlay close button.
    pub overlay_toggle: ElementId,
    /// Layer container.
    pub layer_container: ElementId,
    /// Layers, back to front.
    pub layers: [ElementId; LAYER_COUNT],
    /// Links and footer block.
    pub content: ElementId,
    /// Overlay logo image.
    pub logo: ElementId,
    /// One text element per link.
    pub links: Vec<ElementId>,
    /// One text element per footer line.
    pub sub_items: Vec<ElementId>,
}

impl MenuDom {
    /// Insert the menu's elements into `scene` in document order.
    pub fn build(scene: &mut Scene, content: &NavContent, style_class: &str) -> Self {
        let root = if style_class.is_empty() {
            scene.insert([selectors::ROOT.to_owned()])
        } else {
            scene.insert([selectors::ROOT.to_owned(), format!(".{style_class}")])
        };
        let nav_toggle = scene.insert([selectors::NAV_TOGGLE]);
        let hero = scene.insert([selectors::HERO]);
        let overlay = scene.insert([selectors::OVERLAY]);
        let overlay_toggle = scene.insert([selectors::OVERLAY_TOGGLE]);
        let layer_container = scene.insert([selectors::LAYER_CONTAINER]);
        let layers = std::array::from_fn(|i| {
            if i == 0 {
                scene.insert([selectors::LAYERS[i]])
            } else {
                scene.insert([selectors::LAYERS[i], selectors::MOVING_LAYERS])
            }
        });
        let content_block = scene.insert([selectors::CONTENT]);
        let logo = scene.insert([selectors::LOGO]);
        let links = content
            .links
            .iter()
            .map(|_| scene.insert([selectors::LINKS]))
            .collect();
        let sub_items = (0..content.sub_item_count())
            .map(|_| scene.insert([selectors::SUB_ITEMS]))
            .collect();

        Self {
            root,
            nav_toggle,
            hero,
            overlay,
            overlay_toggle,
            layer_container,
            layers,
            content: content_block,
            logo,
            links,
            sub_items,
        }
    }

    /// References for the transform engine.
    #[must_use]
    pub fn layer_refs(&self) -> LayerRefs {
        LayerRefs {
            container: Some(self.layer_container),
            layers: self.layers.map(Some),
        }
    }
}
