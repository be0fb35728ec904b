//! Unary functions, constants and the angle mode shared by the evaluator
//! and the input state machine.

use super::error::CalcError;
use serde::{Deserialize, Serialize};
use std::f64::consts;
use std::fmt;

/// Cosines smaller than this are treated as a tangent asymptote.
const TAN_ASYMPTOTE_EPSILON: f64 = 1e-12;

/// How trigonometric functions interpret their argument.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AngleMode {
    #[default]
    Degrees,
    Radians,
}

impl AngleMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Degrees => Self::Radians,
            Self::Radians => Self::Degrees,
        }
    }

    /// Convert an angle given in this mode to radians.
    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            Self::Degrees => angle.to_radians(),
            Self::Radians => angle,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Degrees => "DEGREES",
            Self::Radians => "RADIANS",
        }
    }
}

impl fmt::Display for AngleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A function of one argument.
///
/// The first six can also be written as `name(arg)` inside an expression;
/// `Square`, `Reciprocal` and `Percent` only exist as calculator keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryFunction {
    Sin,
    Cos,
    Tan,
    Log,
    Ln,
    Sqrt,
    Square,
    Reciprocal,
    Percent,
}

impl UnaryFunction {
    pub const ALL: [UnaryFunction; 9] = [
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Log,
        Self::Ln,
        Self::Sqrt,
        Self::Square,
        Self::Reciprocal,
        Self::Percent,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Log => "log",
            Self::Ln => "ln",
            Self::Sqrt => "sqrt",
            Self::Square => "sq",
            Self::Reciprocal => "inv",
            Self::Percent => "percent",
        }
    }

    /// Look up a function by its key name. Case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        Self::ALL.into_iter().find(|f| f.name() == lower)
    }

    /// Look up a function that may appear in call syntax inside an expression.
    pub fn callable(name: &str) -> Option<Self> {
        Self::from_name(name).filter(|f| f.is_callable())
    }

    pub fn is_callable(self) -> bool {
        !matches!(self, Self::Square | Self::Reciprocal | Self::Percent)
    }

    fn is_trig(self) -> bool {
        matches!(self, Self::Sin | Self::Cos | Self::Tan)
    }

    /// Reject arguments outside the function's domain.
    pub fn check_domain(self, value: f64, mode: AngleMode) -> Result<(), CalcError> {
        let in_domain = match self {
            Self::Log | Self::Ln => value > 0.0,
            Self::Sqrt => value >= 0.0,
            Self::Reciprocal => value != 0.0,
            Self::Tan => !is_tan_asymptote(value, mode),
            _ => true,
        };

        if in_domain {
            Ok(())
        } else {
            Err(CalcError::Domain {
                function: self.name(),
                value,
            })
        }
    }

    /// Apply the function without any domain check.
    pub fn apply(self, value: f64, mode: AngleMode) -> f64 {
        if self.is_trig()
            && mode == AngleMode::Degrees
            && let Some(exact) = self.exact_degrees(value)
        {
            return exact;
        }

        match self {
            Self::Sin => mode.to_radians(value).sin(),
            Self::Cos => mode.to_radians(value).cos(),
            Self::Tan => mode.to_radians(value).tan(),
            Self::Log => value.log10(),
            Self::Ln => value.ln(),
            Self::Sqrt => value.sqrt(),
            Self::Square => value * value,
            Self::Reciprocal => 1.0 / value,
            Self::Percent => value / 100.0,
        }
    }

    /// Exact results at multiples of 90 degrees, where converting to radians
    /// would otherwise leave residue like `sin(180) = 1.2e-16`.
    fn exact_degrees(self, degrees: f64) -> Option<f64> {
        if degrees % 90.0 != 0.0 {
            return None;
        }
        let quadrant = (degrees / 90.0).rem_euclid(4.0) as u8;
        let (sin, cos) = match quadrant {
            0 => (0.0, 1.0),
            1 => (1.0, 0.0),
            2 => (0.0, -1.0),
            _ => (-1.0, 0.0),
        };
        match self {
            Self::Sin => Some(sin),
            Self::Cos => Some(cos),
            Self::Tan if cos == 0.0 => Some(f64::INFINITY),
            Self::Tan => Some(0.0),
            _ => None,
        }
    }
}

impl fmt::Display for UnaryFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn is_tan_asymptote(angle: f64, mode: AngleMode) -> bool {
    if mode == AngleMode::Degrees && angle % 90.0 == 0.0 {
        return (angle / 90.0).rem_euclid(2.0) == 1.0;
    }
    mode.to_radians(angle).cos().abs() < TAN_ASYMPTOTE_EPSILON
}

/// A named constant that can be recalled or written inside an expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn name(self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::E => "e",
        }
    }

    /// Case-insensitive lookup.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "pi" | "π" => Some(Self::Pi),
            "e" => Some(Self::E),
            _ => None,
        }
    }

    pub fn value(self) -> f64 {
        match self {
            Self::Pi => consts::PI,
            Self::E => consts::E,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_lookup() {
        assert_eq!(UnaryFunction::from_name("SQRT"), Some(UnaryFunction::Sqrt));
        assert_eq!(UnaryFunction::from_name("inv"), Some(UnaryFunction::Reciprocal));
        assert_eq!(UnaryFunction::callable("sq"), None);
        assert_eq!(UnaryFunction::callable("ln"), Some(UnaryFunction::Ln));
        assert_eq!(Constant::from_name("PI"), Some(Constant::Pi));
        assert_eq!(Constant::from_name("phi"), None);
    }

    #[test]
    fn test_degrees_and_radians_agree() {
        let deg = UnaryFunction::Sin.apply(90.0, AngleMode::Degrees);
        let rad = UnaryFunction::Sin.apply(consts::FRAC_PI_2, AngleMode::Radians);
        assert!((deg - rad).abs() < 1e-12);

        let deg = UnaryFunction::Cos.apply(60.0, AngleMode::Degrees);
        assert!((deg - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_exact_quadrants() {
        assert_eq!(UnaryFunction::Sin.apply(180.0, AngleMode::Degrees), 0.0);
        assert_eq!(UnaryFunction::Cos.apply(-90.0, AngleMode::Degrees), 0.0);
        assert_eq!(UnaryFunction::Sin.apply(270.0, AngleMode::Degrees), -1.0);
        assert_eq!(UnaryFunction::Tan.apply(360.0, AngleMode::Degrees), 0.0);
        assert!(UnaryFunction::Tan.apply(90.0, AngleMode::Degrees).is_infinite());
    }

    #[test]
    fn test_domain_checks() {
        let mode = AngleMode::Degrees;
        assert!(UnaryFunction::Sqrt.check_domain(-1.0, mode).is_err());
        assert!(UnaryFunction::Sqrt.check_domain(0.0, mode).is_ok());
        assert!(UnaryFunction::Log.check_domain(0.0, mode).is_err());
        assert!(UnaryFunction::Ln.check_domain(-3.0, mode).is_err());
        assert!(UnaryFunction::Reciprocal.check_domain(0.0, mode).is_err());
        assert!(UnaryFunction::Tan.check_domain(90.0, mode).is_err());
        assert!(UnaryFunction::Tan.check_domain(270.0, mode).is_err());
        assert!(UnaryFunction::Tan.check_domain(180.0, mode).is_ok());
        assert!(
            UnaryFunction::Tan
                .check_domain(consts::FRAC_PI_2, AngleMode::Radians)
                .is_err()
        );
    }

    #[test]
    fn test_domain_error_carries_cause() {
        let err = UnaryFunction::Sqrt
            .check_domain(-4.0, AngleMode::Radians)
            .unwrap_err();
        assert_eq!(
            err,
            CalcError::Domain {
                function: "sqrt",
                value: -4.0
            }
        );
    }
}
