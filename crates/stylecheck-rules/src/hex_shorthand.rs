//! Rule requiring 3-digit hex colors where they are equivalent.

use stylecheck_core::utils::value::tokenize;
use stylecheck_core::{
    Context, NodeData, NodeKind, Params, Rule, Suggestion, SyntaxNode, Violation,
};

/// Rule code for hex-shorthand.
pub const CODE: &str = "SC007";

/// Rule name for hex-shorthand.
pub const NAME: &str = "hex-shorthand";

/// Flags `#RRGGBB` colors that can be written as `#RGB`.
#[derive(Debug, Clone, Default)]
pub struct HexShorthand;

impl HexShorthand {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Returns the 3-digit form of a 6-digit hex color, keeping the original case.
fn shorthand(digits: &str) -> Option<String> {
    let bytes = digits.as_bytes();
    if bytes.len() != 6 {
        return None;
    }
    bytes
        .chunks(2)
        .all(|pair| pair[0].eq_ignore_ascii_case(&pair[1]))
        .then(|| bytes.chunks(2).map(|pair| char::from(pair[0])).collect())
}

impl Rule for HexShorthand {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires the 3-digit form of hex colors where it is equivalent"
    }

    fn applies_to(&self) -> &'static [NodeKind] {
        &[NodeKind::Declaration]
    }

    fn check(&self, node: &SyntaxNode, _ctx: &mut Context<'_>, _params: &Params) -> Vec<Violation> {
        let NodeData::Declaration {
            value, value_start, ..
        } = &node.data
        else {
            return Vec::new();
        };

        tokenize(value)
            .iter()
            .filter_map(|token| {
                let short = shorthand(token.hex_color()?)?;
                Some(
                    Violation::at(
                        NAME,
                        CODE,
                        self.default_severity(),
                        token.position(value, *value_start),
                        format!("Hex color `{}` can be shortened", token.text),
                    )
                    .with_suggestion(Suggestion::new(format!("Use `#{short}`"))),
                )
            })
            .collect()
    }
}
