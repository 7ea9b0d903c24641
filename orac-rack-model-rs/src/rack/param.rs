use alloc::string::String;
use core::fmt;

use super::error::RackError;

/// Highest acceleration level with its own step size. Higher levels reuse
/// the last tier.
pub const MAX_ACCELERATION_LEVEL: u8 = 3;

/// Value semantics of a parameter: drives formatting and step size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParamKind {
    Percent,
    Frequency,
    Time,
    Pitch,
    Boolean,
    Integer,
    Pan,
}

impl ParamKind {
    /// Parse the wire type tag (`pct`, `freq`, `time`, `pitch`, `bool`,
    /// `int`, `pan`).
    pub fn from_tag(tag: &str) -> Result<Self, RackError> {
        match tag {
            "pct" => Ok(ParamKind::Percent),
            "freq" => Ok(ParamKind::Frequency),
            "time" => Ok(ParamKind::Time),
            "pitch" => Ok(ParamKind::Pitch),
            "bool" => Ok(ParamKind::Boolean),
            "int" => Ok(ParamKind::Integer),
            "pan" => Ok(ParamKind::Pan),
            _ => Err(RackError::UnknownParamKind),
        }
    }

    /// The wire type tag, inverse of [`from_tag()`](Self::from_tag).
    pub fn tag(self) -> &'static str {
        match self {
            ParamKind::Percent => "pct",
            ParamKind::Frequency => "freq",
            ParamKind::Time => "time",
            ParamKind::Pitch => "pitch",
            ParamKind::Boolean => "bool",
            ParamKind::Integer => "int",
            ParamKind::Pan => "pan",
        }
    }

    /// Step tiers indexed by acceleration level.
    fn step_tiers(self) -> [f32; 4] {
        match self {
            ParamKind::Percent => [1.0, 5.0, 10.0, 20.0],
            ParamKind::Frequency => [1.0, 10.0, 100.0, 1000.0],
            ParamKind::Time => [1.0, 10.0, 50.0, 100.0],
            ParamKind::Pitch => [1.0, 2.0, 4.0, 8.0],
            ParamKind::Boolean => [1.0, 1.0, 1.0, 1.0],
            ParamKind::Integer => [1.0, 2.0, 4.0, 8.0],
            ParamKind::Pan => [0.01, 0.05, 0.1, 0.2],
        }
    }

    /// Step size for one increase/decrease at `level`.
    ///
    /// Levels above [`MAX_ACCELERATION_LEVEL`] use the largest step.
    pub fn step(self, level: u8) -> f32 {
        self.step_tiers()[level.min(MAX_ACCELERATION_LEVEL) as usize]
    }
}

/// Every field of a [`Param`], used to snapshot and rebuild one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParamParts {
    pub kind: ParamKind,
    pub id: String,
    pub label: String,
    pub min: f32,
    pub max: f32,
    pub default: f32,
    pub current: f32,
}

/// One controllable value of a module.
///
/// **Invariant:** `min <= current <= max`, all finite, after construction
/// and after every mutation. Boolean parameters always have the range
/// `[0, 1]`. Deserialization goes through [`Param::from_parts()`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "ParamParts", into = "ParamParts")
)]
pub struct Param {
    kind: ParamKind,
    id: String,
    label: String,
    min: f32,
    max: f32,
    default: f32,
    current: f32,
}

impl Param {
    /// Declare a parameter. The current value starts at `default`, clamped
    /// into range.
    ///
    /// For [`ParamKind::Boolean`] the supplied range is ignored and `[0, 1]`
    /// is used.
    ///
    /// # Errors
    ///
    /// Same as [`from_parts()`](Self::from_parts).
    pub fn new(
        kind: ParamKind,
        id: &str,
        label: &str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Result<Self, RackError> {
        let (min, max) = match kind {
            ParamKind::Boolean => (0.0, 1.0),
            _ => (min, max),
        };
        Self::from_parts(ParamParts {
            kind,
            id: id.into(),
            label: label.into(),
            min,
            max,
            default,
            current: default,
        })
    }

    /// Rebuild a parameter from a snapshot taken with [`to_parts()`](Self::to_parts).
    ///
    /// # Errors
    ///
    /// - [`RackError::NonFinite`] if any of `min`, `max`, `default` or
    ///   `current` is NaN or infinite.
    /// - [`RackError::InvertedRange`] if `min > max`.
    pub fn from_parts(parts: ParamParts) -> Result<Self, RackError> {
        let values = [parts.min, parts.max, parts.default, parts.current];
        if !values.iter().all(|v| v.is_finite()) {
            return Err(RackError::NonFinite);
        }
        if parts.min > parts.max {
            return Err(RackError::InvertedRange);
        }
        let mut param = Self {
            kind: parts.kind,
            id: parts.id,
            label: parts.label,
            min: parts.min,
            max: parts.max,
            default: parts.default,
            current: parts.min,
        };
        param.set_current(parts.current);
        Ok(param)
    }

    pub fn to_parts(&self) -> ParamParts {
        ParamParts {
            kind: self.kind,
            id: self.id.clone(),
            label: self.label.clone(),
            min: self.min,
            max: self.max,
            default: self.default,
            current: self.current,
        }
    }

    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn default_value(&self) -> f32 {
        self.default
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    /// Set the current value, clamped to `[min, max]`. NaN is ignored.
    pub fn set_current(&mut self, value: f32) {
        if value.is_nan() {
            return;
        }
        self.current = value.clamp(self.min, self.max);
    }

    /// Step up by the tier for `level`, saturating at `max`.
    pub fn increase(&mut self, level: u8) {
        self.set_current(self.current + self.kind.step(level));
    }

    /// Step down by the tier for `level`, saturating at `min`.
    pub fn decrease(&mut self, level: u8) {
        self.set_current(self.current - self.kind.step(level));
    }

    /// Position of `current` within the range, in percent (0 when the
    /// range is empty).
    pub fn percent(&self) -> f32 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        100.0 * (self.current - self.min) / span
    }

    /// Formatted current value, e.g. `12.50%`, `440Hz`, `L 40`, `ON`.
    pub fn display_value(&self) -> DisplayValue<'_> {
        DisplayValue(self)
    }
}

impl TryFrom<ParamParts> for Param {
    type Error = RackError;

    fn try_from(parts: ParamParts) -> Result<Self, RackError> {
        Param::from_parts(parts)
    }
}

impl From<Param> for ParamParts {
    fn from(param: Param) -> Self {
        param.to_parts()
    }
}

/// [`Display`](fmt::Display) adapter returned by [`Param::display_value()`].
pub struct DisplayValue<'a>(&'a Param);

impl fmt::Display for DisplayValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0.current;
        match self.0.kind {
            ParamKind::Percent => write!(f, "{:.2}%", v),
            ParamKind::Frequency => write!(f, "{:.0}Hz", v),
            ParamKind::Time => write!(f, "{:.0}ms", v),
            ParamKind::Pitch => write!(f, "{:.0}st", v),
            ParamKind::Integer => write!(f, "{:.0}", v),
            ParamKind::Boolean => f.write_str(if v == 1.0 { "ON" } else { "OFF" }),
            ParamKind::Pan => {
                if v == 0.5 {
                    f.write_str("C")
                } else if v < 0.5 {
                    write!(f, "L {:.0}", 200.0 * (0.5 - v))
                } else {
                    write!(f, "{:.0} R", 200.0 * (v - 0.5))
                }
            }
        }
    }
}
