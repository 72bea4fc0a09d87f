//! Stable identifiers for animated elements and animation names.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::dom::{Document, NodeId};

/// Mints document-unique ids as `prefix + counter`.
///
/// One allocator lives for one document translation. Counters are
/// monotonic per prefix; a candidate that collides only advances the
/// counter and is never retried.
#[derive(Debug, Default)]
pub struct IdAllocator {
    counters: FxHashMap<String, usize>,
    /// Every id handed out or adopted so far, including ids of elements
    /// that have since been detached.
    claimed: FxHashSet<String>,
    generated: usize,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the element's id, generating and writing one if absent.
    pub fn ensure_id(&mut self, doc: &mut Document, node: NodeId, prefix: &str) -> String {
        if let Some(existing) = doc.attr(node, "id") {
            let existing = existing.to_string();
            self.claimed.insert(existing.clone());
            return existing;
        }

        let id = self.next_id(doc, prefix);
        doc.set_attr(node, "id", id.clone());
        id
    }

    /// Mint a fresh id without attaching it to any element.
    pub fn next_id(&mut self, doc: &Document, prefix: &str) -> String {
        let counter = self.counters.entry(prefix.to_string()).or_insert(0);
        let id = loop {
            let candidate = format!("{prefix}{counter}");
            *counter += 1;
            if !doc.contains_id(&candidate) && !self.claimed.contains(&candidate) {
                break candidate;
            }
        };
        self.claimed.insert(id.clone());
        self.generated += 1;
        id
    }

    /// Number of ids minted (not adopted).
    pub fn generated(&self) -> usize {
        self.generated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_xml;

    #[test]
    fn test_existing_id_is_kept() {
        let mut doc = parse_xml(r#"<svg><rect id="box"/></svg>"#).unwrap();
        let rect = doc.first_element_by_tag("rect").unwrap();
        let mut ids = IdAllocator::new();
        assert_eq!(ids.ensure_id(&mut doc, rect, "rect"), "box");
        assert_eq!(ids.generated(), 0);
    }

    #[test]
    fn test_generated_ids_skip_collisions() {
        let mut doc =
            parse_xml(r#"<svg><rect id="rect0"/><rect/><rect id="rect2"/><rect/></svg>"#).unwrap();
        let rects = doc.elements_by_tag("rect");
        let mut ids = IdAllocator::new();

        assert_eq!(ids.ensure_id(&mut doc, rects[1], "rect"), "rect1");
        assert_eq!(doc.attr(rects[1], "id"), Some("rect1"));
        // rect2 is taken, so the counter moves past it
        assert_eq!(ids.ensure_id(&mut doc, rects[3], "rect"), "rect3");
        assert_eq!(ids.generated(), 2);
    }

    #[test]
    fn test_counters_are_per_prefix() {
        let doc = parse_xml("<svg/>").unwrap();
        let mut ids = IdAllocator::new();
        assert_eq!(ids.next_id(&doc, "anim"), "anim0");
        assert_eq!(ids.next_id(&doc, "circle"), "circle0");
        assert_eq!(ids.next_id(&doc, "anim"), "anim1");
    }

    #[test]
    fn test_detached_ids_are_not_reused() {
        let mut doc = parse_xml(r#"<svg><g><animate id="anim0"/></g></svg>"#).unwrap();
        let animate = doc.first_element_by_tag("animate").unwrap();
        let mut ids = IdAllocator::new();

        assert_eq!(ids.ensure_id(&mut doc, animate, "anim"), "anim0");
        doc.detach(animate);
        assert!(!doc.contains_id("anim0"));
        assert_eq!(ids.next_id(&doc, "anim"), "anim1");
    }
}
