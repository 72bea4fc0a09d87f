//! Web Animations API calls.
//!
//! ```js
//! window.addEventListener("load", function() { document.getElementById("rect0").animate([ { opacity: "0" }, { opacity: "1" } ], 2000); });
//! ```

use std::fmt::Write;

use crate::smil::model::{AnimationModel, FillMode, RepeatCount};
use crate::smil::number::format_number;

/// `stroke-dashoffset` -> `strokeDashoffset`
///
/// The first character is kept; every later letter is upper-cased after
/// a non-letter and lower-cased otherwise, and hyphens are dropped.
pub fn to_camel_case(property: &str) -> String {
    let mut chars = property.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut out = String::with_capacity(property.len());
    out.push(first);
    let mut after_letter = first.is_alphabetic();
    for c in chars {
        if c == '-' {
            after_letter = false;
            continue;
        }
        if after_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        after_letter = c.is_alphabetic();
    }
    out
}

/// Append one page-load statement animating the target.
pub fn write_animation(buf: &mut String, model: &AnimationModel) {
    let _ = write!(
        buf,
        "\nwindow.addEventListener(\"load\", function() {{ \
         document.getElementById(\"{}\").animate({}, {}); }});",
        model.target_id,
        keyframes(model),
        timing(model)
    );
}

/// `[ { offset: 0, opacity: "0" }, ... ]`
fn keyframes(model: &AnimationModel) -> String {
    let property = to_camel_case(&model.attribute_name);
    let frames: Vec<String> = model
        .values
        .iter()
        .zip(&model.key_times)
        .map(|(value, key_time)| {
            let offset = if model.explicit_key_times {
                format!("offset: {}, ", format_number(*key_time))
            } else {
                String::new()
            };
            format!("{{ {offset}{property}: \"{}\" }}", escape_js(value))
        })
        .collect();

    format!("[ {} ]", frames.join(", "))
}

/// Bare duration when nothing else is set, otherwise an options record.
fn timing(model: &AnimationModel) -> String {
    if model.fill_mode == FillMode::None
        && model.repeat_count.is_once()
        && model.begin_ms.is_none()
    {
        return model.duration_ms.clone();
    }

    let mut record = format!("{{ duration: {}", model.duration_ms);
    if let Some(begin) = &model.begin_ms {
        let _ = write!(record, ", delay: {begin}");
    }
    if model.fill_mode != FillMode::None {
        let _ = write!(record, ", fill: \"{}\"", model.fill_mode.as_str());
    }
    match &model.repeat_count {
        RepeatCount::Indefinite => record.push_str(", iterations: Infinity"),
        count if count.is_once() => {}
        RepeatCount::Count(count) => {
            let _ = write!(record, ", iterations: {count}");
        }
    }
    record.push_str(" }");
    record
}

/// Escape for a double-quoted JavaScript string inside a `<script>` element.
fn escape_js(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            '<' if chars.peek() == Some(&'/') => out.push_str("<\\"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> AnimationModel {
        AnimationModel {
            target_id: "rect0".into(),
            animation_id: "anim0".into(),
            attribute_name: "opacity".into(),
            values: vec!["0".into(), "1".into()],
            key_times: vec![0.0, 1.0],
            explicit_key_times: false,
            duration_ms: "2000".into(),
            begin_ms: None,
            repeat_count: RepeatCount::Count("1".into()),
            fill_mode: FillMode::None,
            motion: None,
        }
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("opacity"), "opacity");
        assert_eq!(to_camel_case("stroke-dashoffset"), "strokeDashoffset");
        assert_eq!(to_camel_case("motion-offset"), "motionOffset");
        assert_eq!(to_camel_case("font-size"), "fontSize");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn test_bare_duration_timing() {
        let mut buf = String::new();
        write_animation(&mut buf, &model());
        assert_eq!(
            buf,
            "\nwindow.addEventListener(\"load\", function() { document.getElementById(\"rect0\")\
             .animate([ { opacity: \"0\" }, { opacity: \"1\" } ], 2000); });"
        );
    }

    #[test]
    fn test_explicit_offsets() {
        let mut model = model();
        model.values = vec!["0".into(), "5".into(), "10".into()];
        model.key_times = vec![0.0, 0.25, 1.0];
        model.explicit_key_times = true;

        assert_eq!(
            keyframes(&model),
            "[ { offset: 0, opacity: \"0\" }, { offset: 0.25, opacity: \"5\" }, { offset: 1, opacity: \"10\" } ]"
        );
    }

    #[test]
    fn test_timing_record() {
        let mut model = model();
        model.begin_ms = Some("500".into());
        assert_eq!(timing(&model), "{ duration: 2000, delay: 500 }");

        model.fill_mode = FillMode::Forwards;
        model.repeat_count = RepeatCount::Indefinite;
        assert_eq!(
            timing(&model),
            "{ duration: 2000, delay: 500, fill: \"forwards\", iterations: Infinity }"
        );

        model.begin_ms = None;
        model.repeat_count = RepeatCount::Count("3".into());
        assert_eq!(
            timing(&model),
            "{ duration: 2000, fill: \"forwards\", iterations: 3 }"
        );
    }

    #[test]
    fn test_escape_js() {
        assert_eq!(escape_js("plain"), "plain");
        assert_eq!(escape_js("a\\b"), "a\\\\b");
        assert_eq!(escape_js("M0 0\n L1 1\r\n"), "M0 0\\n L1 1\\r\\n");
        assert_eq!(escape_js("a\u{2028}b\u{2029}"), "a\\u2028b\\u2029");
        assert_eq!(escape_js("</script>"), "<\\/script>");
        assert_eq!(escape_js("a < b"), "a < b");
    }

    #[test]
    fn test_multiline_value_stays_on_one_line() {
        let mut model = model();
        model.attribute_name = "d".into();
        model.values = vec!["path('M0 0\n L1 1')".into(), "path('M2 2\n L3 3')".into()];

        let mut buf = String::new();
        write_animation(&mut buf, &model);
        assert_eq!(buf.matches('\n').count(), 1);
        assert!(buf.contains("{ d: \"path('M0 0\\n L1 1')\" }"));
    }

    #[test]
    fn test_values_are_quoted() {
        let mut model = model();
        model.attribute_name = "d".into();
        model.values = vec!["path('M0 0')".into(), "say \"hi\"".into()];
        let frames = keyframes(&model);
        assert!(frames.contains("d: \"path('M0 0')\""));
        assert!(frames.contains("d: \"say \\\"hi\\\"\""));
    }
}
