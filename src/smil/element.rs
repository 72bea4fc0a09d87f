//! Typed view of a SMIL animation element.
//!
//! Each element is read once from the markup tree into named optional
//! fields, so attribute legality is decided by pattern matching on
//! these records instead of ad hoc lookups.

use crate::dom::{Document, NodeId};

/// The four SMIL animation elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationTag {
    Animate,
    AnimateMotion,
    AnimateTransform,
    Set,
}

impl AnimationTag {
    pub const ALL: [Self; 4] = [Self::Animate, Self::AnimateMotion, Self::AnimateTransform, Self::Set];

    /// Element name as written in markup.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Animate => "animate",
            Self::AnimateMotion => "animateMotion",
            Self::AnimateTransform => "animateTransform",
            Self::Set => "set",
        }
    }

    /// Classify a node, honoring the document's tag matching rules.
    pub fn of(doc: &Document, node: NodeId) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| doc.is_tag(node, tag.name()))
    }
}

/// Timing attributes shared by every animation element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timing {
    pub dur: Option<String>,
    pub begin: Option<String>,
    pub end: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
    pub restart: Option<String>,
    pub repeat_count: Option<String>,
    pub repeat_dur: Option<String>,
    pub fill: Option<String>,
}

/// Value and composition attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueAttrs {
    pub attribute_name: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub by: Option<String>,
    pub values: Option<String>,
    pub key_times: Option<String>,
    pub key_splines: Option<String>,
    pub calc_mode: Option<String>,
    pub additive: Option<String>,
    pub accumulate: Option<String>,
}

/// Element-specific attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimationKind {
    Animate,
    Set,
    Transform {
        /// The `type` attribute.
        kind: Option<String>,
    },
    Motion {
        path: Option<String>,
        rotate: Option<String>,
        /// `href` of the first `<mpath>` child.
        mpath: Option<String>,
    },
}

/// A source animation element and its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationElement {
    pub node: NodeId,
    /// Parent element being animated, if the parent is an element.
    pub target: Option<NodeId>,
    pub kind: AnimationKind,
    pub timing: Timing,
    pub values: ValueAttrs,
}

impl AnimationElement {
    /// Read an animation element from the tree. Returns `None` for other nodes.
    pub fn read(doc: &Document, node: NodeId) -> Option<Self> {
        let tag = AnimationTag::of(doc, node)?;
        let get = |name: &str| doc.attr(node, name).map(str::to_string);

        let kind = match tag {
            AnimationTag::Animate => AnimationKind::Animate,
            AnimationTag::Set => AnimationKind::Set,
            AnimationTag::AnimateTransform => AnimationKind::Transform { kind: get("type") },
            AnimationTag::AnimateMotion => AnimationKind::Motion {
                path: get("path"),
                rotate: get("rotate"),
                mpath: doc
                    .element_children(node)
                    .find(|child| doc.is_tag(*child, "mpath"))
                    .and_then(|mpath| {
                        doc.attr(mpath, "href")
                            .or_else(|| doc.attr(mpath, "xlink:href"))
                            .map(str::to_string)
                    }),
            },
        };

        let timing = Timing {
            dur: get("dur"),
            begin: get("begin"),
            end: get("end"),
            min: get("min"),
            max: get("max"),
            restart: get("restart"),
            repeat_count: get("repeatCount"),
            repeat_dur: get("repeatDur"),
            fill: get("fill"),
        };

        let values = ValueAttrs {
            attribute_name: get("attributeName"),
            from: get("from"),
            to: get("to"),
            by: get("by"),
            values: get("values"),
            key_times: get("keyTimes"),
            key_splines: get("keySplines"),
            calc_mode: get("calcMode"),
            additive: get("additive"),
            accumulate: get("accumulate"),
        };

        let target = doc.parent(node).filter(|parent| doc.element(*parent).is_some());

        Some(Self {
            node,
            target,
            kind,
            timing,
            values,
        })
    }

    pub fn tag(&self) -> AnimationTag {
        match self.kind {
            AnimationKind::Animate => AnimationTag::Animate,
            AnimationKind::Set => AnimationTag::Set,
            AnimationKind::Transform { .. } => AnimationTag::AnimateTransform,
            AnimationKind::Motion { .. } => AnimationTag::AnimateMotion,
        }
    }
}

/// Every animation element in document order.
pub fn collect_animation_nodes(doc: &Document) -> Vec<NodeId> {
    doc.descendants(doc.root())
        .into_iter()
        .filter(|node| AnimationTag::of(doc, *node).is_some())
        .collect()
}
