//! Clip filters and their parameters.

use serde_json::json;

use crate::foundation::error::{JcutError, JcutResult};
use crate::schema::Entity;
use crate::tree::codec::{self, Number, decode_number, encode_bool};
use crate::tree::Node;

/// Value of a filter parameter.
///
/// The shape is closed: scalars always carry bounds and points never do.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterValue {
    /// Scalar value with inclusive bounds.
    Scalar {
        /// Current value.
        value: Number,
        /// Lower bound (`valuemin`).
        min: Number,
        /// Upper bound (`valuemax`).
        max: Number,
    },
    /// 2D point, e.g. a center or anchor.
    Point {
        /// Horizontal coordinate.
        horiz: Number,
        /// Vertical coordinate.
        vert: Number,
    },
}

/// One named parameter of a [`Filter`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FilterParameter {
    /// Display name.
    pub name: String,
    /// Parameter id within the effect.
    pub parameter_id: String,
    /// Scalar or point value.
    pub value: FilterValue,
}

impl Entity for FilterParameter {
    const NAME: &'static str = "FilterParameter";

    fn parse(node: &Node) -> JcutResult<Self> {
        let raw = codec::required(node, Self::NAME, "value")?;
        let value = match raw {
            Node::String(s) => FilterValue::Scalar {
                value: decode_number("value", s)?,
                min: decode_number("valuemin", codec::text(node, Self::NAME, "valuemin")?)?,
                max: decode_number("valuemax", codec::text(node, Self::NAME, "valuemax")?)?,
            },
            Node::Object(_) => FilterValue::Point {
                horiz: decode_number("horiz", codec::text(raw, Self::NAME, "horiz")?)?,
                vert: decode_number("vert", codec::text(raw, Self::NAME, "vert")?)?,
            },
            _ => {
                return Err(JcutError::shape(
                    Self::NAME,
                    "value",
                    "a text leaf or a horiz/vert mapping",
                ));
            }
        };

        Ok(Self {
            name: codec::text(node, Self::NAME, "name")?.to_string(),
            parameter_id: codec::text(node, Self::NAME, "parameterid")?.to_string(),
            value,
        })
    }

    fn dump(&self) -> Node {
        match &self.value {
            FilterValue::Scalar { value, min, max } => json!({
                "name": self.name,
                "parameterid": self.parameter_id,
                "value": value.to_string(),
                "valuemin": min.to_string(),
                "valuemax": max.to_string(),
            }),
            FilterValue::Point { horiz, vert } => json!({
                "name": self.name,
                "parameterid": self.parameter_id,
                "value": {
                    "horiz": horiz.to_string(),
                    "vert": vert.to_string(),
                },
            }),
        }
    }
}

/// Effect applied to a clip over `[start, end]`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Filter {
    /// Whether the effect is active.
    pub enabled: bool,
    /// First active frame (clip-relative; `-1` means clip start).
    pub start: i64,
    /// Last active frame (clip-relative; `-1` means clip end).
    pub end: i64,
    /// Effect display name.
    pub name: String,
    /// `video` or `audio`.
    pub media_type: String,
    /// Effect identifier.
    pub effect_id: String,
    /// Effect type, e.g. `filter`.
    pub effect_type: String,
    /// Effect category, e.g. `motion`.
    pub effect_category: String,
    /// Ordered parameters.
    pub parameters: Vec<FilterParameter>,
}

impl Entity for Filter {
    const NAME: &'static str = "Filter";

    fn parse(node: &Node) -> JcutResult<Self> {
        let effect = codec::required(node, Self::NAME, "effect")?;
        let parameters = codec::as_sequence(codec::optional(effect, "parameter"))
            .into_iter()
            .map(FilterParameter::parse)
            .collect::<JcutResult<Vec<_>>>()?;

        Ok(Self {
            enabled: codec::flag(node, Self::NAME, "enabled")?,
            start: codec::int(node, Self::NAME, "start")?,
            end: codec::int(node, Self::NAME, "end")?,
            name: codec::text(effect, Self::NAME, "name")?.to_string(),
            media_type: codec::text(effect, Self::NAME, "mediatype")?.to_string(),
            effect_id: codec::text(effect, Self::NAME, "effectid")?.to_string(),
            effect_type: codec::text(effect, Self::NAME, "effecttype")?.to_string(),
            effect_category: codec::text(effect, Self::NAME, "effectcategory")?.to_string(),
            parameters,
        })
    }

    fn dump(&self) -> Node {
        json!({
            "enabled": encode_bool(self.enabled),
            "start": self.start.to_string(),
            "end": self.end.to_string(),
            "effect": {
                "name": self.name,
                "effectid": self.effect_id,
                "effecttype": self.effect_type,
                "mediatype": self.media_type,
                "effectcategory": self.effect_category,
                "parameter": codec::list(self.parameters.iter().map(Entity::dump)),
            },
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/effect.rs"]
mod tests;
