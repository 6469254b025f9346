//! Relational conditions such as `[>0]` or `[<=100]`.
//!
//! A condition is the bracket content of a section prefix. The grammar is
//! `OP NUMBER`, whitespace allowed around both parts:
//!
//! | Operator | Aliases | Meaning |
//! |----------|---------|---------|
//! | `>`  |      | greater than |
//! | `>=` |      | greater or equal |
//! | `<`  |      | less than |
//! | `<=` |      | less or equal |
//! | `=`  | `==` | equal |
//! | `<>` | `!=` | not equal |

/// Comparison operator of a [`Condition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Gt,
    Gte,
    Lt,
    Lte,
    Eq,
    Ne,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Eq => "=",
            Operator::Ne => "<>",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A numeric guard that selects a section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Condition {
    pub op: Operator,
    pub operand: f64,
}

impl Condition {
    pub fn new(op: Operator, operand: f64) -> Self {
        Self { op, operand }
    }

    /// Parses the content of a bracket group (without the brackets).
    ///
    /// Returns `None` when the content is not a condition, so the caller can
    /// try the other directive kinds.
    pub fn parse(content: &str) -> Option<Self> {
        let s = content.trim();
        let (op, rest) = split_operator(s)?;
        let operand: f64 = rest.trim().parse().ok()?;
        if operand.is_nan() {
            return None;
        }
        Some(Self { op, operand })
    }

    /// Evaluates the condition. NaN never matches.
    pub fn matches(&self, value: f64) -> bool {
        if value.is_nan() {
            return false;
        }
        match self.op {
            Operator::Gt => value > self.operand,
            Operator::Gte => value >= self.operand || approx_eq(value, self.operand),
            Operator::Lt => value < self.operand,
            Operator::Lte => value <= self.operand || approx_eq(value, self.operand),
            Operator::Eq => approx_eq(value, self.operand),
            Operator::Ne => !approx_eq(value, self.operand),
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}{}]", self.op, self.operand)
    }
}

fn split_operator(s: &str) -> Option<(Operator, &str)> {
    // Two-character operators first so `>=` never reads as `>` + "=0".
    const OPERATORS: &[(&str, Operator)] = &[
        (">=", Operator::Gte),
        ("<=", Operator::Lte),
        ("<>", Operator::Ne),
        ("!=", Operator::Ne),
        ("==", Operator::Eq),
        (">", Operator::Gt),
        ("<", Operator::Lt),
        ("=", Operator::Eq),
    ];
    OPERATORS
        .iter()
        .find_map(|(token, op)| s.strip_prefix(token).map(|rest| (*op, rest)))
}

fn approx_eq(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= f64::EPSILON * scale
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Parsing
    // =========================================================================

    #[test]
    fn test_parse_basic_operators() {
        assert_eq!(Condition::parse(">0"), Some(Condition::new(Operator::Gt, 0.0)));
        assert_eq!(Condition::parse(">=10"), Some(Condition::new(Operator::Gte, 10.0)));
        assert_eq!(Condition::parse("<-5"), Some(Condition::new(Operator::Lt, -5.0)));
        assert_eq!(Condition::parse("<=100"), Some(Condition::new(Operator::Lte, 100.0)));
        assert_eq!(Condition::parse("=5"), Some(Condition::new(Operator::Eq, 5.0)));
        assert_eq!(Condition::parse("<>3"), Some(Condition::new(Operator::Ne, 3.0)));
    }

    #[test]
    fn test_parse_aliases_and_whitespace() {
        assert_eq!(Condition::parse(" != 1.5 "), Some(Condition::new(Operator::Ne, 1.5)));
        assert_eq!(Condition::parse("== 2"), Some(Condition::new(Operator::Eq, 2.0)));
        assert_eq!(
            Condition::parse("<1e6"),
            Some(Condition::new(Operator::Lt, 1_000_000.0))
        );
    }

    #[test]
    fn test_parse_rejects_non_conditions() {
        assert_eq!(Condition::parse("Red"), None);
        assert_eq!(Condition::parse(">"), None);
        assert_eq!(Condition::parse(">abc"), None);
        assert_eq!(Condition::parse("#FF0000"), None);
        assert_eq!(Condition::parse(">NaN"), None);
    }

    // =========================================================================
    // Evaluation
    // =========================================================================

    #[test]
    fn test_matches() {
        assert!(Condition::new(Operator::Gt, 0.0).matches(1.0));
        assert!(!Condition::new(Operator::Gt, 0.0).matches(0.0));
        assert!(Condition::new(Operator::Gte, 0.0).matches(0.0));
        assert!(Condition::new(Operator::Lt, 0.0).matches(-0.5));
        assert!(Condition::new(Operator::Lte, 1.0).matches(1.0));
        assert!(Condition::new(Operator::Ne, 1.0).matches(2.0));
    }

    #[test]
    fn test_equality_tolerates_float_noise() {
        assert!(Condition::new(Operator::Eq, 0.3).matches(0.1 + 0.2));
        assert!(!Condition::new(Operator::Ne, 0.3).matches(0.1 + 0.2));
    }

    #[test]
    fn test_nan_never_matches() {
        for op in [
            Operator::Gt,
            Operator::Gte,
            Operator::Lt,
            Operator::Lte,
            Operator::Eq,
            Operator::Ne,
        ] {
            assert!(!Condition::new(op, 0.0).matches(f64::NAN), "{}", op);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Condition::new(Operator::Gte, 10.0).to_string(), "[>=10]");
    }
}
