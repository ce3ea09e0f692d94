//! Frame rate and reference timecode.

use serde_json::json;

use crate::foundation::error::JcutResult;
use crate::schema::Entity;
use crate::tree::codec::{self, encode_bool};
use crate::tree::{Node, NodeMap};

/// Integer timebase plus NTSC pull-down flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Rate {
    /// Nominal frames per second.
    pub timebase: u32,
    /// `true` when the real rate is `timebase * 1000/1001`.
    pub ntsc: bool,
}

impl Rate {
    /// Non-NTSC rate at `timebase` frames per second.
    pub fn new(timebase: u32) -> Self {
        Self {
            timebase,
            ntsc: false,
        }
    }

    /// Effective frames per second.
    pub fn fps(self) -> f64 {
        let base = f64::from(self.timebase);
        if self.ntsc { base * 1000.0 / 1001.0 } else { base }
    }

    /// Convert a frame count to seconds.
    pub fn frames_to_secs(self, frames: i64) -> f64 {
        if self.timebase == 0 {
            return 0.0;
        }
        frames as f64 / self.fps()
    }
}

impl Entity for Rate {
    const NAME: &'static str = "Rate";

    fn parse(node: &Node) -> JcutResult<Self> {
        Ok(Self {
            timebase: codec::uint(node, Self::NAME, "timebase")?,
            ntsc: codec::flag(node, Self::NAME, "ntsc")?,
        })
    }

    fn dump(&self) -> Node {
        json!({
            "timebase": self.timebase.to_string(),
            "ntsc": encode_bool(self.ntsc),
        })
    }
}

/// Reference timecode of a sequence or media file.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TimeCode {
    /// `HH:MM:SS:FF` text (`;` before frames for drop-frame).
    pub timecode: String,
    /// Absolute frame number of the timecode, when the document states it.
    pub frame: Option<i64>,
    /// Display format such as `NDF` or `DF`.
    pub display_format: Option<String>,
    /// Rate the timecode counts in.
    pub rate: Rate,
}

impl Entity for TimeCode {
    const NAME: &'static str = "TimeCode";

    fn parse(node: &Node) -> JcutResult<Self> {
        let frame = codec::optional_text(node, Self::NAME, "frame")?
            .map(|s| codec::decode_int("frame", s))
            .transpose()?;
        Ok(Self {
            timecode: codec::text(node, Self::NAME, "string")?.to_string(),
            frame,
            display_format: codec::optional_text(node, Self::NAME, "displayformat")?
                .map(str::to_string),
            rate: Rate::parse(codec::required(node, Self::NAME, "rate")?)?,
        })
    }

    fn dump(&self) -> Node {
        let mut m = NodeMap::new();
        m.insert("string".into(), codec::string(&self.timecode));
        if let Some(frame) = self.frame {
            m.insert("frame".into(), codec::string(frame));
        }
        if let Some(fmt) = &self.display_format {
            m.insert("displayformat".into(), codec::string(fmt));
        }
        m.insert("rate".into(), self.rate.dump());
        Node::Object(m)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/rate.rs"]
mod tests;
