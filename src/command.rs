// src/command.rs

//! Wire protocol of the command server.
//!
//! One JSON object per line in each direction. Requests are tagged by `cmd`:
//!
//! ```text
//! {"cmd":"draw_pixel","x":1,"y":2,"color":16711680}
//! {"cmd":"set_rotate","degree":270,"flip_x":false,"flip_y":true}
//! {"cmd":"width"}
//! ```
//!
//! Replies are `{"ok":true}`, `{"ok":true,"value":N}` for queries, or
//! `{"ok":false,"error":"..."}`.

use serde::{Deserialize, Serialize};

use crate::color::Color;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Command {
    /// Flush the canvas to the LEDs.
    Render,
    DrawPixel {
        x: i32,
        y: i32,
        color: Color,
    },
    /// Draw 4x8 text. `background` defaults to the canvas background, which
    /// a transparent canvas skips.
    DrawText {
        x: i32,
        y: i32,
        text: String,
        color: Color,
        #[serde(default)]
        background: Option<Color>,
    },
    DrawNumber {
        x: i32,
        y: i32,
        number: u64,
        color: Color,
    },
    Clear,
    Width,
    Height,
    Pixel {
        x: i32,
        y: i32,
    },
    SetRotate {
        degree: i32,
        #[serde(default, alias = "flipX")]
        flip_x: bool,
        #[serde(default, alias = "flipY")]
        flip_y: bool,
    },
    SetTransparent {
        enabled: bool,
    },
    SetBackground {
        color: Color,
    },
    SetAutoRender {
        enabled: bool,
    },
}

impl Command {
    pub fn parse(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line)
    }
}

/// Reply to a single [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn ok() -> Self {
        Self {
            ok: true,
            value: None,
            error: None,
        }
    }

    pub fn value(value: u64) -> Self {
        Self {
            ok: true,
            value: Some(value),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            value: None,
            error: Some(message.into()),
        }
    }

    /// Serialized form, without the trailing newline.
    pub fn to_line(&self) -> String {
        // A struct of bools, integers and strings always serializes.
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"ok":false}"#.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn parses_tagged_commands() {
        assert_eq!(Command::parse(r#"{"cmd":"render"}"#).unwrap(), Command::Render);
        assert_eq!(
            Command::parse(r#"{"cmd":"draw_pixel","x":1,"y":2,"color":16711680}"#).unwrap(),
            Command::DrawPixel {
                x: 1,
                y: 2,
                color: Color::RED
            }
        );
        assert_eq!(
            Command::parse(r#"{"cmd":"draw_text","x":0,"y":0,"text":"Hi","color":255}"#).unwrap(),
            Command::DrawText {
                x: 0,
                y: 0,
                text: "Hi".into(),
                color: Color::BLUE,
                background: None
            }
        );
    }

    #[test]
    fn set_rotate_accepts_both_flip_spellings() {
        let a = Command::parse(r#"{"cmd":"set_rotate","degree":90,"flip_x":true}"#).unwrap();
        let b = Command::parse(r#"{"cmd":"set_rotate","degree":90,"flipX":true}"#).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            a,
            Command::SetRotate {
                degree: 90,
                flip_x: true,
                flip_y: false
            }
        );
    }

    #[test]
    fn rejects_unknown_and_malformed_input() {
        assert!(Command::parse(r#"{"cmd":"explode"}"#).is_err());
        assert!(Command::parse(r#"{"cmd":"draw_number","x":0,"y":0,"number":-3,"color":1}"#).is_err());
        assert!(Command::parse("not json").is_err());
    }

    #[test]
    fn responses_omit_empty_fields() {
        assert_eq!(Response::ok().to_line(), r#"{"ok":true}"#);
        assert_eq!(Response::value(32).to_line(), r#"{"ok":true,"value":32}"#);
        assert_eq!(
            Response::error("boom").to_line(),
            r#"{"ok":false,"error":"boom"}"#
        );
    }
}
