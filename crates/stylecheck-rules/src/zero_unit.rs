//! Rule forbidding units on zero lengths.
//!
//! # Detected Patterns
//!
//! - `0px`, `0.0em`, `-0rem` and other zero lengths with a unit
//!
//! # Allowed Patterns
//!
//! - Zero percentages, times, angles and other non-length units (`0%`, `0s`, `0deg`)
//! - Anything inside `calc()`, `min()`, `max()` and `clamp()`, where unitless
//!   zero changes meaning
//! - Custom properties (`--gap: 0px`)
//! - Properties listed in `ignore-properties`
//!
//! # Configuration
//!
//! - `ignore-properties`: Properties whose units are significant
//!   (default: `["flex", "flex-basis"]`)

use stylecheck_core::utils::value::{tokenize, TokenKind};
use stylecheck_core::{
    Context, NodeData, NodeKind, Params, Rule, Suggestion, SyntaxNode, Violation,
};

/// Rule code for zero-unit.
pub const CODE: &str = "SC009";

/// Rule name for zero-unit.
pub const NAME: &str = "zero-unit";

const LENGTH_UNITS: &[&str] = &[
    "px", "em", "rem", "ex", "ch", "vw", "vh", "vmin", "vmax", "cm", "mm", "q", "in", "pt", "pc",
];

const MATH_FUNCTIONS: &[&str] = &["calc", "min", "max", "clamp"];

/// Requires `0` instead of `0px` for lengths.
#[derive(Debug, Clone)]
pub struct ZeroUnit {
    /// Properties skipped by default.
    pub ignore_properties: Vec<String>,
}

impl Default for ZeroUnit {
    fn default() -> Self {
        Self::new()
    }
}

impl ZeroUnit {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ignore_properties: vec!["flex".to_string(), "flex-basis".to_string()],
        }
    }

    /// Adds properties to skip.
    #[must_use]
    pub fn ignore_properties(mut self, properties: &[&str]) -> Self {
        self.ignore_properties
            .extend(properties.iter().map(|s| (*s).to_string()));
        self
    }
}

fn is_zero(number: &str) -> bool {
    number.parse::<f64>().is_ok_and(|n| n == 0.0)
}

impl Rule for ZeroUnit {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids units on zero lengths"
    }

    fn applies_to(&self) -> &'static [NodeKind] {
        &[NodeKind::Declaration]
    }

    fn default_params(&self) -> Params {
        Params::new().with("ignore-properties", self.ignore_properties.clone())
    }

    fn check(&self, node: &SyntaxNode, _ctx: &mut Context<'_>, params: &Params) -> Vec<Violation> {
        let NodeData::Declaration {
            property,
            value,
            value_start,
            ..
        } = &node.data
        else {
            return Vec::new();
        };

        if property.starts_with("--") {
            return Vec::new();
        }
        let property = property.to_ascii_lowercase();
        if params
            .get_str_array("ignore-properties")
            .iter()
            .any(|p| p.eq_ignore_ascii_case(&property))
        {
            return Vec::new();
        }

        let mut violations = Vec::new();
        let mut functions: Vec<String> = Vec::new();

        for token in tokenize(value) {
            match token.kind {
                TokenKind::Function => {
                    functions.push(token.function_name().unwrap_or_default().to_ascii_lowercase());
                }
                TokenKind::OpenParen => functions.push(String::new()),
                TokenKind::CloseParen => {
                    functions.pop();
                }
                TokenKind::Number => {
                    if functions
                        .iter()
                        .any(|f| MATH_FUNCTIONS.contains(&f.as_str()))
                    {
                        continue;
                    }
                    let Some((number, unit)) = token.number_parts() else {
                        continue;
                    };
                    let unit = unit.to_ascii_lowercase();
                    if is_zero(number) && LENGTH_UNITS.contains(&unit.as_str()) {
                        violations.push(
                            Violation::at(
                                NAME,
                                CODE,
                                self.default_severity(),
                                token.position(value, *value_start),
                                format!("Unit on zero length `{}`", token.text),
                            )
                            .with_suggestion(Suggestion::new("Use `0`")),
                        );
                    }
                }
                _ => {}
            }
        }

        violations
    }
}
