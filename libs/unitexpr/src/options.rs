//! Syntax switches shared by the lexer and the tree builder

/// Default bound on nesting
pub const DEFAULT_MAX_DEPTH: usize = 200;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SyntaxOptions {
    /// Upper bound on nesting: parentheses, prefix operators and `**`
    /// exponents. Chains of `+ - * /` are not limited.
    pub max_depth: usize,
    /// If `true`, juxtaposed operands multiply (`kilogram meter`), and a
    /// parenthesized group right after an operand binds to that operand
    /// before any binary operator does.
    pub implicit_multiplication: bool,
    /// If `true`, `^` is read as an alias for `**`.
    pub caret_power: bool,
    /// If `true`, prefix `+` is accepted where prefix `-` is.
    pub unary_plus: bool,
}

impl Default for SyntaxOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            implicit_multiplication: false,
            caret_power: false,
            unary_plus: false,
        }
    }
}

impl SyntaxOptions {
    /// The fixed grammar: `+ - * / **`, unary minus, parentheses.
    pub fn strict() -> Self {
        Self::default()
    }

    /// The grammar spoken by the host units library's expression parser.
    pub fn pint() -> Self {
        Self {
            implicit_multiplication: true,
            caret_power: true,
            unary_plus: true,
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
