// Copyright 2026 the Waveview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::palette::AnnotationColor;

/// Annotation text with its leading escapes decoded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AnnotationStyle<'a> {
    /// Text left after the escapes.
    pub text: &'a str,
    /// Foreground color.
    pub color: AnnotationColor,
    /// `false` once a `#p` escape was seen.
    pub bold: bool,
}

impl<'a> AnnotationStyle<'a> {
    /// Consumes `#x` escapes from the start of `raw`, left to right.
    ///
    /// An escape is only taken while more than two characters remain, so a
    /// bare `#r` is drawn as text. Unknown escape letters are dropped.
    #[must_use]
    pub fn parse(raw: &'a str) -> Self {
        let mut style = Self {
            text: raw,
            color: AnnotationColor::default(),
            bold: true,
        };
        loop {
            let mut chars = style.text.chars();
            let (Some('#'), Some(code), Some(_)) = (chars.next(), chars.next(), chars.next())
            else {
                return style;
            };
            match code {
                'r' => style.color = AnnotationColor::Red,
                'g' => style.color = AnnotationColor::Green,
                'b' => style.color = AnnotationColor::Blue,
                'y' => style.color = AnnotationColor::Yellow,
                'p' => style.bold = false,
                _ => {}
            }
            style.text = &style.text[1 + code.len_utf8()..];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AnnotationColor, AnnotationStyle};

    #[test]
    fn plain_text_is_bold_blue() {
        let style = AnnotationStyle::parse("ready");
        assert_eq!(style.text, "ready");
        assert_eq!(style.color, AnnotationColor::Blue);
        assert!(style.bold);
    }

    #[test]
    fn escapes_are_consumed_left_to_right() {
        let style = AnnotationStyle::parse("#r#pfault");
        assert_eq!(style.text, "fault");
        assert_eq!(style.color, AnnotationColor::Red);
        assert!(!style.bold);

        let last_wins = AnnotationStyle::parse("#g#yok");
        assert_eq!(last_wins.text, "ok");
        assert_eq!(last_wins.color, AnnotationColor::Yellow);
    }

    #[test]
    fn short_escape_is_kept_as_text() {
        assert_eq!(AnnotationStyle::parse("#r").text, "#r");
        assert_eq!(AnnotationStyle::parse("#r#g").text, "#g");
        assert_eq!(AnnotationStyle::parse("#qx").text, "x");
    }
}
