//! `animateTransform` values to CSS transform functions.

use std::str::FromStr;

use super::error::{Result, TranslateError};

/// The `type` of an `animateTransform` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    Rotate,
    Scale,
    Translate,
    SkewX,
    SkewY,
}

impl FromStr for TransformKind {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "rotate" => Ok(Self::Rotate),
            "scale" => Ok(Self::Scale),
            "translate" => Ok(Self::Translate),
            "skewX" => Ok(Self::SkewX),
            "skewY" => Ok(Self::SkewY),
            other => Err(TranslateError::unsupported(format!(
                "animateTransform type \"{other}\""
            ))),
        }
    }
}

impl TransformKind {
    /// Translate one SMIL transform value into a CSS function list.
    ///
    /// # Examples
    ///
    /// - `Rotate`, `"45"` -> `rotate(45deg)`
    /// - `Rotate`, `"45,10,20"` -> `translate(10px,20px) rotate(45deg) translate(-10px,-20px)`
    /// - `Scale`, `"2 3"` -> `scale(2,3)`
    pub fn to_css(self, value: &str) -> Result<String> {
        let tokens = split_tokens(value);

        match (self, tokens.as_slice()) {
            (Self::Rotate, [angle]) => Ok(format!("rotate({angle}deg)")),
            // Rotation about (cx, cy): move the pivot to the origin and back
            (Self::Rotate, [angle, cx, cy]) => Ok(format!(
                "translate({cx}px,{cy}px) rotate({angle}deg) translate({},{})",
                negate_px(cx),
                negate_px(cy)
            )),
            (Self::Rotate, _) => Err(TranslateError::unsupported("bad rotation")),

            (Self::Scale, [s]) => Ok(format!("scale({s})")),
            (Self::Scale, [sx, sy]) => Ok(format!("scale({sx},{sy})")),
            (Self::Scale, _) => Err(TranslateError::unsupported("bad scale")),

            (Self::Translate, [x]) => Ok(format!("translate({x}px)")),
            (Self::Translate, [x, y]) => Ok(format!("translate({x}px,{y}px)")),
            (Self::Translate, _) => Err(TranslateError::unsupported("bad translate")),

            (Self::SkewX, [angle]) => Ok(format!("skewX({angle}deg)")),
            (Self::SkewX, _) => Err(TranslateError::unsupported("bad skewX")),

            (Self::SkewY, [angle]) => Ok(format!("skewY({angle}deg)")),
            (Self::SkewY, _) => Err(TranslateError::unsupported("bad skewY")),
        }
    }
}

/// Split on commas and/or whitespace, dropping empty tokens.
fn split_tokens(value: &str) -> Vec<&str> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .collect()
}

/// `10` -> `-10px`, `-10` -> `10px`
fn negate_px(token: &str) -> String {
    match token.strip_prefix('-') {
        Some(positive) => format!("{positive}px"),
        None => format!("-{}px", token.strip_prefix('+').unwrap_or(token)),
    }
}
