//! Canonical animation model and its builder.
//!
//! `build_model` validates one source element against everything the
//! emitters can express and lowers it into an `AnimationModel`. The
//! checks run in a fixed order so the first unsupported construct
//! reported for a document is deterministic.

use super::TranslateOptions;
use super::clock::{clock_to_millis, parse_clock};
use super::element::{AnimationElement, AnimationKind, AnimationTag, ValueAttrs};
use super::error::{Result, TranslateError};
use super::ids::IdAllocator;
use super::number::{format_number, parse_number};
use super::transform::TransformKind;
use crate::dom::{Document, NodeId};

/// Property name used for motion animations.
pub const MOTION_ATTRIBUTE: &str = "motion-offset";

/// Iteration count of an animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepeatCount {
    Indefinite,
    /// Numeric count, canonical or as written in `repeatCount`.
    Count(String),
}

impl RepeatCount {
    /// A single iteration, the CSS and Web Animations default.
    #[inline]
    pub fn is_once(&self) -> bool {
        matches!(self, Self::Count(count) if count == "1")
    }
}

/// What happens to the animated value after the active duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillMode {
    #[default]
    None,
    Forwards,
}

impl FillMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Forwards => "forwards",
        }
    }
}

/// Side rule of a motion animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotionPath {
    /// CSS `motion-path` value: `path("...")` or `none`.
    pub path: String,
    /// CSS `motion-rotation` value.
    pub rotation: String,
}

/// Unit-independent description of one animation, ready for emission.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationModel {
    pub target_id: String,
    pub animation_id: String,
    pub attribute_name: String,
    /// Converted for the target syntax. Same length as `key_times`, at least 2.
    pub values: Vec<String>,
    pub key_times: Vec<f64>,
    /// Whether `key_times` came from a `keyTimes` attribute.
    pub explicit_key_times: bool,
    pub duration_ms: String,
    pub begin_ms: Option<String>,
    pub repeat_count: RepeatCount,
    pub fill_mode: FillMode,
    pub motion: Option<MotionPath>,
}

/// Validate one animation element and lower it into a model.
///
/// Generates missing ids on the animation element and its target, and
/// detaches the element from the tree once it has been translated.
pub fn build_model(
    doc: &mut Document,
    ids: &mut IdAllocator,
    elem: &AnimationElement,
    options: &TranslateOptions,
) -> Result<AnimationModel> {
    // 1. identifiers
    let animation_id = ids.ensure_id(doc, elem.node, &options.animation_prefix);
    let target = elem
        .target
        .ok_or_else(|| TranslateError::unsupported("animation element without target element"))?;
    let target_prefix = doc.tag(target).unwrap_or("element").to_string();
    let target_id = ids.ensure_id(doc, target, &target_prefix);

    let attrs = &elem.values;

    // 2. element kind
    let mut transform = None;
    let mut motion = None;
    let mut fixed_values = None;
    let attribute_name = match &elem.kind {
        AnimationKind::Transform { kind } => {
            ensure_single(doc, target, AnimationTag::AnimateTransform)?;
            let kind = kind.as_deref().ok_or_else(|| {
                TranslateError::unsupported("animateTransform element without type")
            })?;
            transform = Some(kind.parse::<TransformKind>()?);
            require_attribute_name(attrs)?
        }
        AnimationKind::Motion {
            path,
            rotate,
            mpath,
        } => {
            ensure_single(doc, target, AnimationTag::AnimateMotion)?;
            motion = Some(MotionPath {
                path: motion_path(doc, attrs, path.as_deref(), mpath.as_deref())?,
                rotation: motion_rotation(rotate.as_deref()),
            });
            fixed_values = Some(vec!["0%".to_string(), "100%".to_string()]);
            MOTION_ATTRIBUTE.to_string()
        }
        AnimationKind::Set => {
            check_set_attributes(attrs)?;
            let name = require_attribute_name(attrs)?;
            let to = attrs
                .to
                .clone()
                .ok_or_else(|| TranslateError::unsupported("set element without to"))?;
            fixed_values = Some(vec![to.clone(), to]);
            name
        }
        AnimationKind::Animate => require_attribute_name(attrs)?,
    };

    // 3. duration
    let dur = match elem.timing.dur.as_deref() {
        None => return Err(TranslateError::unsupported("animation element without dur")),
        Some("indefinite") => {
            return Err(TranslateError::unsupported(
                "animation element with indefinite dur",
            ));
        }
        Some(dur) => dur,
    };
    let duration_millis = clock_to_millis(dur)?;
    let duration_ms = format_number(duration_millis);

    // 4. values
    let values = match fixed_values {
        Some(values) => values,
        None => source_values(attrs)?,
    };

    // 5. key times
    let (key_times, explicit_key_times) = match attrs.key_times.as_deref() {
        Some(list) => (parse_key_times(list)?, true),
        None => (uniform_key_times(values.len()), false),
    };
    if key_times.len() != values.len() {
        return Err(TranslateError::unsupported(
            "values and keyTimes with different lengths",
        ));
    }

    // 6. unsupported timing and composition
    let rejected = [
        ("keySplines", &attrs.key_splines),
        ("end", &elem.timing.end),
        ("min", &elem.timing.min),
        ("max", &elem.timing.max),
        ("restart", &elem.timing.restart),
        ("calcMode", &attrs.calc_mode),
        ("by", &attrs.by),
        ("additive", &attrs.additive),
        ("accumulate", &attrs.accumulate),
    ];
    if let Some((name, _)) = rejected.iter().find(|(_, value)| value.is_some()) {
        return Err(TranslateError::unsupported(*name));
    }

    // 7. begin
    let begin_ms = match elem.timing.begin.as_deref() {
        Some(begin) if ["begin", "end", "on"].iter().any(|s| begin.contains(s)) => {
            return Err(TranslateError::unsupported("begin"));
        }
        Some(begin) => Some(parse_clock(begin)?),
        None => None,
    };

    // 8. iterations
    let repeat_count = reconcile_repeat(
        elem.timing.repeat_dur.as_deref(),
        elem.timing.repeat_count.as_deref(),
        duration_millis,
    )?;

    // 9. fill
    let fill_mode = match elem.timing.fill.as_deref() {
        None | Some("remove") => FillMode::None,
        Some("freeze") => FillMode::Forwards,
        Some(other) => return Err(TranslateError::unsupported(format!("fill \"{other}\""))),
    };

    // 10. value conversion
    let values = match transform {
        Some(kind) => values
            .iter()
            .map(|value| kind.to_css(value))
            .collect::<Result<Vec<_>>>()?,
        None => values,
    };
    let values = if attribute_name == "d" {
        values
            .into_iter()
            .map(|value| format!("path('{value}')"))
            .collect()
    } else if options
        .length_properties
        .iter()
        .any(|property| *property == attribute_name)
    {
        values.into_iter().map(with_length_unit).collect()
    } else {
        values
    };

    // 11. the source element is consumed
    doc.detach(elem.node);

    Ok(AnimationModel {
        target_id,
        animation_id,
        attribute_name,
        values,
        key_times,
        explicit_key_times,
        duration_ms,
        begin_ms,
        repeat_count,
        fill_mode,
        motion,
    })
}

// ============================================================================
// Helpers
// ============================================================================

fn require_attribute_name(attrs: &ValueAttrs) -> Result<String> {
    attrs
        .attribute_name
        .clone()
        .ok_or_else(|| TranslateError::unsupported("animation element without attributeName"))
}

/// At most one element of `tag` may animate a target.
fn ensure_single(doc: &Document, target: NodeId, tag: AnimationTag) -> Result<()> {
    let count = doc
        .element_children(target)
        .filter(|child| doc.is_tag(*child, tag.name()))
        .count();
    if count > 1 {
        return Err(TranslateError::unsupported(format!(
            "multiple {} on element",
            tag.name()
        )));
    }
    Ok(())
}

/// `set` only takes `to` as a value attribute.
fn check_set_attributes(attrs: &ValueAttrs) -> Result<()> {
    match attrs {
        ValueAttrs {
            from: None,
            by: None,
            values: None,
            key_times: None,
            key_splines: None,
            calc_mode: None,
            additive: None,
            accumulate: None,
            attribute_name: _,
            to: _,
        } => Ok(()),
        _ => Err(TranslateError::unsupported("unexpected attribute for set")),
    }
}

fn motion_rotation(rotate: Option<&str>) -> String {
    match rotate.map(str::trim) {
        None => "0deg".to_string(),
        Some("auto") => "auto".to_string(),
        Some("auto-reverse") => "reverse".to_string(),
        Some(angle) => format!("{angle}deg"),
    }
}

/// Pick the motion path source: `path` > `values` > `from`/`to` > `<mpath>`.
fn motion_path(
    doc: &Document,
    attrs: &ValueAttrs,
    path: Option<&str>,
    mpath: Option<&str>,
) -> Result<String> {
    if let Some(path) = path {
        return Ok(css_path(path));
    }

    if let Some(list) = attrs.values.as_deref() {
        let points = split_list(list);
        if points.len() < 2 {
            return Err(TranslateError::unsupported("less than 2 values"));
        }
        return Ok(css_path(&format!("M{}", points.join(" L"))));
    }

    if let (Some(from), Some(to)) = (attrs.from.as_deref(), attrs.to.as_deref()) {
        return Ok(css_path(&format!("M{from} L{to}")));
    }

    if let Some(href) = mpath {
        let unresolved = || TranslateError::unsupported(format!("mpath reference \"{href}\""));
        let id = href.strip_prefix('#').ok_or_else(unresolved)?;
        let referenced = doc.element_by_id(id).ok_or_else(unresolved)?;
        let d = doc.attr(referenced, "d").ok_or_else(unresolved)?;
        return Ok(css_path(d));
    }

    Ok("none".to_string())
}

#[inline]
fn css_path(d: &str) -> String {
    format!("path(\"{d}\")")
}

/// Split a `;` list, dropping one trailing empty entry.
fn split_list(list: &str) -> Vec<String> {
    let mut items: Vec<String> = list
        .trim()
        .split(';')
        .map(|item| item.trim().to_string())
        .collect();
    if items.last().is_some_and(String::is_empty) {
        items.pop();
    }
    items
}

fn source_values(attrs: &ValueAttrs) -> Result<Vec<String>> {
    if let Some(list) = attrs.values.as_deref() {
        let values = split_list(list);
        if values.len() < 2 {
            return Err(TranslateError::unsupported("less than 2 values"));
        }
        return Ok(values);
    }

    match (&attrs.from, &attrs.to) {
        (Some(from), Some(to)) => Ok(vec![from.clone(), to.clone()]),
        _ => Err(TranslateError::unsupported(
            "animation element without from/to or values",
        )),
    }
}

/// Explicit key times pass through as written, without reordering.
fn parse_key_times(list: &str) -> Result<Vec<f64>> {
    let items = split_list(list);
    if items.len() < 2 {
        return Err(TranslateError::unsupported("less than 2 keyTimes"));
    }
    items
        .iter()
        .map(|item| {
            parse_number(item)
                .ok_or_else(|| TranslateError::unsupported(format!("keyTimes value \"{item}\"")))
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)] // Value counts are tiny
fn uniform_key_times(count: usize) -> Vec<f64> {
    let last = count.saturating_sub(1).max(1) as f64;
    (0..count).map(|index| index as f64 / last).collect()
}

/// Combine `repeatDur` and `repeatCount`; the smaller bound wins.
fn reconcile_repeat(
    repeat_dur: Option<&str>,
    repeat_count: Option<&str>,
    duration_millis: f64,
) -> Result<RepeatCount> {
    // Running value: None = indefinite
    let mut running: Option<f64> = match repeat_dur {
        None | Some("indefinite") => None,
        Some(repeat_dur) => {
            if duration_millis == 0.0 {
                return Err(TranslateError::unsupported("duration 0 with repeatDur"));
            }
            Some(clock_to_millis(repeat_dur)? / duration_millis)
        }
    };

    match repeat_count.map(str::trim) {
        Some("indefinite") => {}
        Some(count) => {
            let number = parse_number(count)
                .ok_or_else(|| TranslateError::unsupported(format!("repeatCount \"{count}\"")))?;
            match running {
                // Indefinite so far: the attribute is taken as written
                None => return Ok(RepeatCount::Count(count.to_string())),
                Some(current) => running = Some(current.min(number)),
            }
        }
        None if repeat_dur.is_none() => return Ok(RepeatCount::Count("1".to_string())),
        None => {}
    }

    Ok(match running {
        None => RepeatCount::Indefinite,
        Some(count) => RepeatCount::Count(format_number(count)),
    })
}

/// Append `px` unless the value already ends in a unit.
fn with_length_unit(value: String) -> String {
    match value.chars().last() {
        Some(c) if c.is_alphabetic() || c == '%' => value,
        None => value,
        Some(_) => format!("{value}px"),
    }
}
