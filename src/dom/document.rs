use crate::{
    animation::props::{PropMap, VisualState},
    foundation::core::{Rect, Size},
    foundation::ids::ElementId,
};

/// One node of the page tree.
#[derive(Clone, Debug)]
pub struct Element {
    /// Stable handle.
    pub id: ElementId,
    /// Tag-like label for logs (`"section"`, `"card"`).
    pub tag: String,
    /// Fragment name for in-page links (`"contact"` for `#contact`).
    pub anchor: Option<String>,
    /// Layout box in document coordinates.
    pub rect: Rect,
    /// Last committed animated state.
    pub visual: VisualState,
    attached: bool,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

/// Arena-backed element tree standing in for the browser DOM.
///
/// Elements are never freed: a removed element keeps its slot so a stale handle resolves to
/// "detached" instead of aliasing another element.
#[derive(Clone, Debug)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    /// Create a document whose attached root (`body`) spans `size`.
    pub fn new(size: Size) -> Self {
        let root = Element {
            id: ElementId(0),
            tag: "body".to_owned(),
            anchor: None,
            rect: Rect::from_origin_size((0.0, 0.0), size),
            visual: VisualState::default(),
            attached: true,
            parent: None,
            children: Vec::new(),
        };
        Self {
            elements: vec![root],
        }
    }

    /// The always-attached root element.
    pub fn root(&self) -> ElementId {
        ElementId(0)
    }

    /// Create a detached element.
    pub fn create(&mut self, tag: impl Into<String>, rect: Rect) -> ElementId {
        let id = ElementId(self.elements.len() as u32);
        self.elements.push(Element {
            id,
            tag: tag.into(),
            anchor: None,
            rect,
            visual: VisualState::default(),
            attached: false,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Insert `child` under `parent`; the subtree becomes attached when `parent` is.
    ///
    /// Returns `false` when either handle is unknown or `child` already has a parent.
    pub fn append(&mut self, parent: ElementId, child: ElementId) -> bool {
        if parent == child || self.get(parent).is_none() {
            return false;
        }
        match self.get(child) {
            Some(c) if c.parent.is_none() && child != self.root() => {}
            _ => return false,
        }
        let mut up = Some(parent);
        while let Some(cur) = up {
            if cur == child {
                return false;
            }
            up = self.elements[cur.0 as usize].parent;
        }
        self.elements[parent.0 as usize].children.push(child);
        self.elements[child.0 as usize].parent = Some(parent);
        let attached = self.elements[parent.0 as usize].attached;
        self.set_attached(child, attached);
        true
    }

    /// Detach `id` and its subtree from the tree.
    pub fn remove(&mut self, id: ElementId) {
        if id == self.root() {
            return;
        }
        let Some(parent) = self.get(id).and_then(|e| e.parent) else {
            return;
        };
        self.elements[parent.0 as usize]
            .children
            .retain(|&c| c != id);
        self.elements[id.0 as usize].parent = None;
        self.set_attached(id, false);
    }

    fn set_attached(&mut self, id: ElementId, attached: bool) {
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            let el = &mut self.elements[cur.0 as usize];
            el.attached = attached;
            stack.extend(el.children.iter().copied());
        }
    }

    /// Element by handle, attached or not.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0 as usize)
    }

    /// Attached element by handle.
    pub fn attached(&self, id: ElementId) -> Option<&Element> {
        self.get(id).filter(|e| e.attached)
    }

    /// Return `true` when `id` is part of the live tree.
    pub fn is_attached(&self, id: ElementId) -> bool {
        self.attached(id).is_some()
    }

    /// Children in insertion order.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.get(id).map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    /// Layout box of an attached element.
    pub fn rect(&self, id: ElementId) -> Option<Rect> {
        self.attached(id).map(|e| e.rect)
    }

    /// Replace an element's layout box.
    pub fn set_rect(&mut self, id: ElementId, rect: Rect) {
        if let Some(el) = self.elements.get_mut(id.0 as usize) {
            el.rect = rect;
        }
    }

    /// Name `id` as the target of `#anchor` links.
    pub fn set_anchor(&mut self, id: ElementId, anchor: impl Into<String>) {
        if let Some(el) = self.elements.get_mut(id.0 as usize) {
            el.anchor = Some(anchor.into());
        }
    }

    /// First attached element carrying `anchor`.
    pub fn find_anchor(&self, anchor: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .find(|e| e.attached && e.anchor.as_deref() == Some(anchor))
            .map(|e| e.id)
    }

    /// Committed visual state of an element, attached or not.
    pub fn visual(&self, id: ElementId) -> Option<&VisualState> {
        self.get(id).map(|e| &e.visual)
    }

    /// Write animated values; a no-op for detached or unknown elements.
    pub(crate) fn commit(&mut self, id: ElementId, values: &PropMap) -> bool {
        match self.elements.get_mut(id.0 as usize) {
            Some(el) if el.attached => {
                el.visual.apply(values);
                true
            }
            _ => false,
        }
    }

    /// Bottom edge of the lowest attached element.
    pub fn content_height(&self) -> f64 {
        self.elements
            .iter()
            .filter(|e| e.attached)
            .map(|e| e.rect.y1)
            .fold(0.0, f64::max)
    }
}

/// Visible window onto the document.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
    /// Document offset of the viewport's top edge.
    pub scroll_y: f64,
}

impl Viewport {
    /// Viewport of `width x height` scrolled to the top.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dom/document.rs"]
mod tests;
