use serde::{Deserialize, Serialize};

use super::Occurrence;

/// Syntax classification of an occurrence, numbered as in the SCIP protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SyntaxKind {
    Comment = 1,
    PunctuationDelimiter = 2,
    PunctuationBracket = 3,
    Keyword = 4,
    IdentifierOperator = 5,
    Identifier = 6,
    IdentifierBuiltin = 7,
    IdentifierNull = 8,
    IdentifierConstant = 9,
    IdentifierMutableGlobal = 10,
    IdentifierParameter = 11,
    IdentifierLocal = 12,
    IdentifierShadowed = 13,
    IdentifierModule = 14,
    IdentifierFunction = 15,
    IdentifierFunctionDefinition = 16,
    IdentifierMacro = 17,
    IdentifierMacroDefinition = 18,
    IdentifierType = 19,
    IdentifierBuiltinType = 20,
    IdentifierAttribute = 21,
    RegexEscape = 22,
    RegexRepeated = 23,
    RegexWildcard = 24,
    RegexDelimiter = 25,
    RegexJoin = 26,
    StringLiteral = 27,
    StringLiteralEscape = 28,
    StringLiteralSpecial = 29,
    StringLiteralKey = 30,
    CharacterLiteral = 31,
    NumericLiteral = 32,
    BooleanLiteral = 33,
    Tag = 34,
    TagAttribute = 35,
    TagDelimiter = 36,
}

impl SyntaxKind {
    /// Map a SCIP `SyntaxKind` number. `0` (unspecified) and unknown values have no kind.
    pub fn from_scip(value: i64) -> Option<Self> {
        use SyntaxKind::*;
        let kind = match value {
            1 => Comment,
            2 => PunctuationDelimiter,
            3 => PunctuationBracket,
            4 => Keyword,
            5 => IdentifierOperator,
            6 => Identifier,
            7 => IdentifierBuiltin,
            8 => IdentifierNull,
            9 => IdentifierConstant,
            10 => IdentifierMutableGlobal,
            11 => IdentifierParameter,
            12 => IdentifierLocal,
            13 => IdentifierShadowed,
            14 => IdentifierModule,
            15 => IdentifierFunction,
            16 => IdentifierFunctionDefinition,
            17 => IdentifierMacro,
            18 => IdentifierMacroDefinition,
            19 => IdentifierType,
            20 => IdentifierBuiltinType,
            21 => IdentifierAttribute,
            22 => RegexEscape,
            23 => RegexRepeated,
            24 => RegexWildcard,
            25 => RegexDelimiter,
            26 => RegexJoin,
            27 => StringLiteral,
            28 => StringLiteralEscape,
            29 => StringLiteralSpecial,
            30 => StringLiteralKey,
            31 => CharacterLiteral,
            32 => NumericLiteral,
            33 => BooleanLiteral,
            34 => Tag,
            35 => TagAttribute,
            36 => TagDelimiter,
            _ => return None,
        };
        Some(kind)
    }

    pub fn scip_value(self) -> i64 {
        self as i64
    }

    pub fn is_interactive(self) -> bool {
        INTERACTIVE_KINDS.contains(&self)
    }
}

/// Kinds a user can navigate from: identifiers of every flavour, types,
/// functions, macros, modules and attributes.
pub const INTERACTIVE_KINDS: &[SyntaxKind] = &[
    SyntaxKind::Identifier,
    SyntaxKind::IdentifierBuiltin,
    SyntaxKind::IdentifierConstant,
    SyntaxKind::IdentifierMutableGlobal,
    SyntaxKind::IdentifierParameter,
    SyntaxKind::IdentifierLocal,
    SyntaxKind::IdentifierShadowed,
    SyntaxKind::IdentifierModule,
    SyntaxKind::IdentifierFunction,
    SyntaxKind::IdentifierFunctionDefinition,
    SyntaxKind::IdentifierMacro,
    SyntaxKind::IdentifierMacroDefinition,
    SyntaxKind::IdentifierType,
    SyntaxKind::IdentifierBuiltinType,
    SyntaxKind::IdentifierAttribute,
];

/// Whether `occurrence` can carry code intelligence. Occurrences without a kind never do.
pub fn is_interactive(occurrence: &Occurrence) -> bool {
    occurrence.kind.is_some_and(SyntaxKind::is_interactive)
}

#[cfg(test)]
#[path = "../../tests/src/occurrence/kind_tests.rs"]
mod tests;
