//! Whole-document translation.
//!
//! Walks every animation element in document order, lowers it through
//! the model builder, collects emitted text, and finally attaches the
//! text to `<style>` / `<script>` containers.

use super::element::{AnimationElement, collect_animation_nodes};
use super::emit::EmitBuffers;
use super::error::{Result, TranslateError};
use super::ids::IdAllocator;
use super::model::build_model;
use super::TranslateOptions;
use crate::debug;
use crate::dom::{Document, MarkupFormat, NodeId};
use crate::utils::html::escape_text;

/// Summary of one document translation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslateStats {
    /// Animation elements translated and removed.
    pub animations: usize,
    /// Ids generated for targets and animations.
    pub generated_ids: usize,
}

/// Translate every SMIL animation in `doc` in place.
///
/// A document without animation elements is left untouched. On error the
/// document may be partially modified and must be discarded.
pub fn translate_document(doc: &mut Document, options: &TranslateOptions) -> Result<TranslateStats> {
    let nodes = collect_animation_nodes(doc);
    if nodes.is_empty() {
        return Ok(TranslateStats::default());
    }

    let mut ids = IdAllocator::new();
    let mut buffers = EmitBuffers::new();
    let mut animations = 0;

    for node in nodes {
        // Nested inside an animation element consumed earlier
        if !doc.is_attached(node) {
            continue;
        }
        let Some(elem) = AnimationElement::read(doc, node) else {
            continue;
        };

        let model = build_model(doc, &mut ids, &elem, options)?;
        debug!(
            "translate";
            "{} #{} -> #{} ({})",
            elem.tag().name(),
            model.animation_id,
            model.target_id,
            model.attribute_name
        );
        buffers.push(&model, options.mode);
        animations += 1;
    }

    if buffers.needs_style {
        let style = find_or_create_container(doc, "style", "svg")?;
        append_generated(doc, style, &buffers.style);
    }
    if buffers.needs_script {
        let script = find_or_create_container(doc, "script", "head")?;
        append_generated(doc, script, &buffers.script);
    }

    Ok(TranslateStats {
        animations,
        generated_ids: ids.generated(),
    })
}

/// First existing `tag` element, else a new one under `<head>`, else under `<svg>`.
fn find_or_create_container(doc: &mut Document, tag: &str, missing: &str) -> Result<NodeId> {
    if let Some(existing) = doc.first_element_by_tag(tag) {
        return Ok(existing);
    }

    let parent = doc
        .first_element_by_tag("head")
        .or_else(|| doc.first_element_by_tag("svg"))
        .ok_or_else(|| TranslateError::MissingStructuralElement(missing.to_string()))?;

    let container = doc.create_element(tag);
    doc.append_child(parent, container);
    Ok(container)
}

/// XML containers hold parsed character data; HTML ones hold raw text.
fn append_generated(doc: &mut Document, container: NodeId, text: &str) {
    match doc.format() {
        MarkupFormat::Xml => doc.append_text(container, &escape_text(text)),
        MarkupFormat::Html => doc.append_text(container, text),
    }
}
