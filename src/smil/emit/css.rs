//! CSS keyframe animations.
//!
//! Each model becomes one `animation` rule on the target plus one
//! `@keyframes` block:
//!
//! ```css
//! #rect0 { animation: anim0 2s linear; }
//! @keyframes anim0 { 0% { opacity: 0; } 100% { opacity: 1; } }
//! ```

use std::fmt::Write;

use crate::smil::model::{AnimationModel, FillMode, MotionPath, RepeatCount};
use crate::smil::number::{format_number, format_percentage, parse_number};

/// CSS time value for a canonical millisecond string.
///
/// Whole hundreds switch to seconds: `2000` -> `2s`, `1500` -> `1.5s`,
/// `250` -> `250ms`.
pub fn milliseconds_to_css(ms: &str) -> String {
    if ms.ends_with("00")
        && let Some(value) = parse_number(ms)
    {
        return format!("{}s", format_number(value / 1000.0));
    }
    format!("{ms}ms")
}

/// `#id { motion-path: P; motion-rotation: R; }`
pub fn write_motion_rule(buf: &mut String, target_id: &str, motion: &MotionPath) {
    let _ = write!(
        buf,
        "\n#{target_id} {{ motion-path: {}; motion-rotation: {}; }}",
        motion.path, motion.rotation
    );
}

/// Append the `animation` rule and the `@keyframes` block.
pub fn write_animation(buf: &mut String, model: &AnimationModel) {
    let _ = write!(
        buf,
        "\n#{} {{ animation: {} {} linear",
        model.target_id,
        model.animation_id,
        milliseconds_to_css(&model.duration_ms)
    );
    if let Some(begin) = &model.begin_ms {
        let _ = write!(buf, " {}", milliseconds_to_css(begin));
    }
    match &model.repeat_count {
        RepeatCount::Indefinite => buf.push_str(" infinite"),
        count if count.is_once() => {}
        RepeatCount::Count(count) => {
            let _ = write!(buf, " {count}");
        }
    }
    if model.fill_mode == FillMode::Forwards {
        buf.push_str(" forwards");
    }
    buf.push_str("; }");

    let _ = write!(buf, "\n@keyframes {} {{", model.animation_id);
    for (key_time, value) in model.key_times.iter().zip(&model.values) {
        let _ = write!(
            buf,
            " {}% {{ {}: {value}; }}",
            format_percentage(*key_time),
            model.attribute_name
        );
    }
    buf.push_str(" }");
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
    fn test_milliseconds_to_css() {
        assert_eq!(milliseconds_to_css("2000"), "2s");
        assert_eq!(milliseconds_to_css("1500"), "1.5s");
        assert_eq!(milliseconds_to_css("100"), "0.1s");
        assert_eq!(milliseconds_to_css("250"), "250ms");
        assert_eq!(milliseconds_to_css("0"), "0ms");
        assert_eq!(milliseconds_to_css("12.5"), "12.5ms");
    }

    #[test]
    fn test_simple_animation() {
        let mut buf = String::new();
        write_animation(&mut buf, &model());
        assert_eq!(
            buf,
            "\n#rect0 { animation: anim0 2s linear; }\
             \n@keyframes anim0 { 0% { opacity: 0; } 100% { opacity: 1; } }"
        );
    }

    #[test]
    fn test_optional_animation_parts() {
        let mut model = model();
        model.begin_ms = Some("250".into());
        model.repeat_count = RepeatCount::Indefinite;
        model.fill_mode = FillMode::Forwards;

        let mut buf = String::new();
        write_animation(&mut buf, &model);
        assert!(buf.starts_with("\n#rect0 { animation: anim0 2s linear 250ms infinite forwards; }"));

        model.repeat_count = RepeatCount::Count("2.5".into());
        let mut buf = String::new();
        write_animation(&mut buf, &model);
        assert!(buf.contains("linear 250ms 2.5 forwards;"));
    }

    #[test]
    fn test_keyframe_percentages() {
        let mut model = model();
        model.values = vec!["0".into(), "5".into(), "10".into()];
        model.key_times = vec![0.0, 0.2, 1.0];

        let mut buf = String::new();
        write_animation(&mut buf, &model);
        assert!(buf.ends_with(
            "{ 0% { opacity: 0; } 20% { opacity: 5; } 100% { opacity: 10; } }"
        ));
    }

    #[test]
    fn test_motion_rule() {
        let mut buf = String::new();
        let motion = MotionPath {
            path: "path(\"M0 0 L10 10\")".into(),
            rotation: "auto".into(),
        };
        write_motion_rule(&mut buf, "circle0", &motion);
        assert_eq!(
            buf,
            "\n#circle0 { motion-path: path(\"M0 0 L10 10\"); motion-rotation: auto; }"
        );
    }
}
