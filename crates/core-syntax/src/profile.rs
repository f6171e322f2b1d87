//! Language profiles: keyword tables, palettes and token-rule switches.
//!
//! A profile is chosen once at startup (config or CLI) and handed to the
//! `Highlighter`. Colors follow the editor's dark theme.

use crate::color::Rgba;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    #[serde(alias = "c++")]
    Cpp,
    #[serde(alias = "py")]
    Python,
    #[serde(alias = "js")]
    JavaScript,
}

impl ProfileKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProfileKind::Cpp => "cpp",
            ProfileKind::Python => "python",
            ProfileKind::JavaScript => "javascript",
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown language profile: {0}")]
pub struct ProfileParseError(pub String);

impl FromStr for ProfileKind {
    type Err = ProfileParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpp" | "c++" | "cxx" => Ok(ProfileKind::Cpp),
            "python" | "py" => Ok(ProfileKind::Python),
            "javascript" | "js" => Ok(ProfileKind::JavaScript),
            _ => Err(ProfileParseError(s.to_string())),
        }
    }
}

/// Lexical category of a highlight span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    NumberLiteral,
    Comment,
    StringLiteral,
    Preprocessor,
    KeywordDefault,
    KeywordSpecial,
    Function,
    Macro,
    MagicMethod,
    BuiltinFunction,
    Datatype,
}

/// Class -> color mapping for one profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub number_literal: Rgba,
    pub comment: Rgba,
    pub string_literal: Rgba,
    pub preprocessor: Rgba,
    pub keyword_default: Rgba,
    pub keyword_special: Rgba,
    pub function: Rgba,
    pub macro_name: Rgba,
    pub magic_method: Rgba,
    pub builtin_function: Rgba,
    pub datatype: Rgba,
}

impl Palette {
    pub fn color(&self, class: TokenClass) -> Rgba {
        match class {
            TokenClass::NumberLiteral => self.number_literal,
            TokenClass::Comment => self.comment,
            TokenClass::StringLiteral => self.string_literal,
            TokenClass::Preprocessor => self.preprocessor,
            TokenClass::KeywordDefault => self.keyword_default,
            TokenClass::KeywordSpecial => self.keyword_special,
            TokenClass::Function => self.function,
            TokenClass::Macro => self.macro_name,
            TokenClass::MagicMethod => self.magic_method,
            TokenClass::BuiltinFunction => self.builtin_function,
            TokenClass::Datatype => self.datatype,
        }
    }

    fn cpp() -> Self {
        Self {
            number_literal: Rgba::from_hex(0xb5cea8),
            comment: Rgba::from_hex(0x57a64a),
            string_literal: Rgba::from_hex(0xd69d85),
            preprocessor: Rgba::from_hex(0x9b9b9b),
            keyword_default: Rgba::from_hex(0x569cd6),
            keyword_special: Rgba::from_hex(0xd8a0df),
            function: Rgba::from_hex(0xd4b964),
            macro_name: Rgba::from_hex(0xbeb7ff),
            magic_method: Rgba::from_hex(0xbeb7ff),
            builtin_function: Rgba::from_hex(0xd4b964),
            datatype: Rgba::from_hex(0x569cd6),
        }
    }

    fn python() -> Self {
        Self {
            number_literal: Rgba::from_hex(0xb5cea8),
            comment: Rgba::from_hex(0x57a64a),
            string_literal: Rgba::from_hex(0xce9178),
            preprocessor: Rgba::from_hex(0x57a64a),
            keyword_default: Rgba::from_hex(0xd8a0df),
            keyword_special: Rgba::from_hex(0x569cd6),
            function: Rgba::from_hex(0xd4b964),
            macro_name: Rgba::from_hex(0x569cd6),
            magic_method: Rgba::from_hex(0xff0000),
            builtin_function: Rgba::from_hex(0xff00ff),
            datatype: Rgba::from_hex(0x4ec9b0),
        }
    }

    fn javascript() -> Self {
        Self {
            number_literal: Rgba::from_hex(0xb5cea8),
            comment: Rgba::from_hex(0x57a64a),
            string_literal: Rgba::from_hex(0xce9178),
            preprocessor: Rgba::from_hex(0x9b9b9b),
            keyword_default: Rgba::from_hex(0xd8a0df),
            keyword_special: Rgba::from_hex(0x569cd6),
            function: Rgba::from_hex(0xd4b964),
            macro_name: Rgba::from_hex(0x569cd6),
            magic_method: Rgba::from_hex(0xd8a0df),
            builtin_function: Rgba::from_hex(0xd4b964),
            datatype: Rgba::from_hex(0x4ec9b0),
        }
    }
}

/// Behaviour of `#` at a scan position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashRule {
    /// `#` is an ordinary character.
    None,
    /// `#directive` with an optional `<header>` after one space.
    Preprocessor,
    /// `#` starts a comment running to end of line.
    LineComment,
}

/// Which optional token rules a profile enables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenRules {
    /// Identifiers directly followed by `(` are colored as function calls.
    pub function_calls: bool,
    /// Floats may end in one of `f F u U l L`.
    pub numeric_suffixes: bool,
    /// `//` line and `/* */` block comments.
    pub slash_comments: bool,
    pub hash: HashRule,
}

#[derive(Debug, Clone)]
pub struct LanguageProfile {
    pub kind: ProfileKind,
    pub palette: Palette,
    pub rules: TokenRules,
    keywords: HashMap<&'static str, TokenClass>,
}

impl LanguageProfile {
    pub fn for_kind(kind: ProfileKind) -> Self {
        match kind {
            ProfileKind::Cpp => Self::cpp(),
            ProfileKind::Python => Self::python(),
            ProfileKind::JavaScript => Self::javascript(),
        }
    }

    pub fn cpp() -> Self {
        Self {
            kind: ProfileKind::Cpp,
            palette: Palette::cpp(),
            rules: TokenRules {
                function_calls: true,
                numeric_suffixes: true,
                slash_comments: true,
                hash: HashRule::Preprocessor,
            },
            keywords: keyword_map(CPP_KEYWORDS),
        }
    }

    pub fn python() -> Self {
        Self {
            kind: ProfileKind::Python,
            palette: Palette::python(),
            rules: TokenRules {
                function_calls: false,
                numeric_suffixes: false,
                slash_comments: false,
                hash: HashRule::LineComment,
            },
            keywords: keyword_map(PYTHON_KEYWORDS),
        }
    }

    pub fn javascript() -> Self {
        Self {
            kind: ProfileKind::JavaScript,
            palette: Palette::javascript(),
            rules: TokenRules {
                function_calls: true,
                numeric_suffixes: false,
                slash_comments: true,
                hash: HashRule::None,
            },
            keywords: keyword_map(JAVASCRIPT_KEYWORDS),
        }
    }

    pub fn keyword_class(&self, word: &str) -> Option<TokenClass> {
        self.keywords.get(word).copied()
    }

    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }
}

impl Default for LanguageProfile {
    fn default() -> Self {
        Self::cpp()
    }
}

// First entry wins when a word is listed twice.
fn keyword_map(table: &[(&'static str, TokenClass)]) -> HashMap<&'static str, TokenClass> {
    let mut map = HashMap::with_capacity(table.len());
    for &(word, class) in table {
        map.entry(word).or_insert(class);
    }
    map
}

use TokenClass::{
    BuiltinFunction as Builtin, Datatype, KeywordDefault as Kd, KeywordSpecial as Ks,
    Macro, MagicMethod as Magic,
};

const CPP_KEYWORDS: &[(&str, TokenClass)] = &[
    ("NULL", Macro),
    ("TRUE", Macro),
    ("FALSE", Macro),
    ("EXIT_SUCCESS", Macro),
    ("EXIT_FAILURE", Macro),
    ("__FILE__", Macro),
    ("__LINE__", Macro),
    ("__FUNCTION__", Macro),
    ("__DATE__", Macro),
    ("__TIME__", Macro),
    ("__STDC__", Macro),
    ("__STDC_VERSION__", Macro),
    ("__STDC_HOSTED__", Macro),
    ("__cplusplus", Macro),
    ("__OBJC__", Macro),
    ("__ASSEMBLER__", Macro),
    ("__cdecl", Kd),
    ("__thiscall", Kd),
    ("__stdcall", Kd),
    ("__fastcall", Kd),
    ("asm", Kd),
    ("alignas", Kd),
    ("alignof", Kd),
    ("and", Kd),
    ("and_eq", Kd),
    ("auto", Kd),
    ("bitand", Kd),
    ("bitor", Kd),
    ("bool", Kd),
    ("break", Ks),
    ("case", Ks),
    ("catch", Ks),
    ("char", Kd),
    ("char8_t", Kd),
    ("char16_t", Kd),
    ("char32_t", Kd),
    ("class", Kd),
    ("compl", Kd),
    ("const", Kd),
    ("const_cast", Kd),
    ("constexpr", Kd),
    ("continue", Ks),
    ("decltype", Kd),
    ("__declspec", Kd),
    ("dllimport", Kd),
    ("dllexport", Kd),
    ("default", Ks),
    ("delete", Kd),
    ("do", Ks),
    ("double", Kd),
    ("dynamic_cast", Kd),
    ("else", Ks),
    ("enum", Kd),
    ("explicit", Kd),
    ("extern", Kd),
    ("false", Kd),
    ("float", Kd),
    ("for", Ks),
    ("friend", Kd),
    ("final", Kd),
    ("goto", Kd),
    ("if", Ks),
    ("inline", Kd),
    ("int", Kd),
    ("long", Kd),
    ("mutable", Kd),
    ("namespace", Kd),
    ("new", Kd),
    ("noexcept", Kd),
    ("not", Kd),
    ("not_eq", Kd),
    ("nullptr", Kd),
    ("operator", Kd),
    ("or", Kd),
    ("or_eq", Kd),
    ("private", Kd),
    ("protected", Kd),
    ("public", Kd),
    ("register", Kd),
    ("reinterpret_cast", Kd),
    ("return", Ks),
    ("short", Kd),
    ("signed", Kd),
    ("sizeof", Kd),
    ("static", Kd),
    ("static_assert", Kd),
    ("static_cast", Kd),
    ("struct", Kd),
    ("switch", Ks),
    ("template", Kd),
    ("this", Kd),
    ("thread_local", Kd),
    ("throw", Ks),
    ("true", Kd),
    ("try", Ks),
    ("typedef", Kd),
    ("typeid", Kd),
    ("union", Kd),
    ("unsigned", Kd),
    ("using", Kd),
    ("virtual", Kd),
    ("void", Kd),
    ("volatile", Kd),
    ("wchar_t", Kd),
    ("while", Ks),
    ("xor", Kd),
    ("xor_eq", Kd),
];

const PYTHON_KEYWORDS: &[(&str, TokenClass)] = &[
    ("abs", Builtin),
    ("aiter", Builtin),
    ("all", Builtin),
    ("anext", Builtin),
    ("any", Builtin),
    ("ascii", Builtin),
    ("bin", Builtin),
    ("bool", Builtin),
    ("breakpoint", Builtin),
    ("bytearray", Builtin),
    ("bytes", Builtin),
    ("callable", Builtin),
    ("chr", Builtin),
    ("classmethod", Builtin),
    ("compile", Builtin),
    ("complex", Builtin),
    ("delattr", Builtin),
    ("dict", Builtin),
    ("dir", Builtin),
    ("divmod", Builtin),
    ("enumerate", Builtin),
    ("eval", Builtin),
    ("exec", Builtin),
    ("filter", Builtin),
    ("float", Builtin),
    ("format", Builtin),
    ("frozenset", Builtin),
    ("getattr", Builtin),
    ("globals", Builtin),
    ("hasattr", Builtin),
    ("hash", Builtin),
    ("help", Builtin),
    ("hex", Builtin),
    ("id", Builtin),
    ("input", Builtin),
    ("int", Builtin),
    ("isinstance", Builtin),
    ("issubclass", Builtin),
    ("iter", Builtin),
    ("len", Builtin),
    ("list", Builtin),
    ("locals", Builtin),
    ("map", Builtin),
    ("max", Builtin),
    ("memoryview", Builtin),
    ("min", Builtin),
    ("next", Builtin),
    ("object", Builtin),
    ("oct", Builtin),
    ("open", Builtin),
    ("ord", Builtin),
    ("pow", Builtin),
    ("print", Builtin),
    ("property", Builtin),
    ("range", Builtin),
    ("repr", Builtin),
    ("reversed", Builtin),
    ("round", Builtin),
    ("set", Builtin),
    ("setattr", Builtin),
    ("slice", Builtin),
    ("sorted", Builtin),
    ("staticmethod", Builtin),
    ("str", Builtin),
    ("sum", Builtin),
    ("tuple", Builtin),
    ("type", Builtin),
    ("vars", Builtin),
    ("zip", Builtin),
    ("__import__", Builtin),
    ("super", Magic),
    ("self", Magic),
    ("__new__", Magic),
    ("__init__", Magic),
    ("__del__", Magic),
    ("__eq__", Magic),
    ("__ne__", Magic),
    ("__lt__", Magic),
    ("__gt__", Magic),
    ("__le__", Magic),
    ("__ge__", Magic),
    ("__cmp__", Magic),
    ("__pos__", Magic),
    ("__neg__", Magic),
    ("__abs__", Magic),
    ("__round__", Magic),
    ("__floor__", Magic),
    ("__ceil__", Magic),
    ("__trunc__", Magic),
    ("__invert__", Magic),
    ("__index__", Magic),
    ("__nonzero__", Magic),
    ("__add__", Magic),
    ("__sub__", Magic),
    ("__mul__", Magic),
    ("__floordiv__", Magic),
    ("__div__", Magic),
    ("__truediv__", Magic),
    ("__mod__", Magic),
    ("__divmod__", Magic),
    ("__pow__", Magic),
    ("__lshift__", Magic),
    ("__rshift__", Magic),
    ("__and__", Magic),
    ("__or__", Magic),
    ("__xor__", Magic),
    ("__radd__", Magic),
    ("__rsub__", Magic),
    ("__rmul__", Magic),
    ("__rfloordiv__", Magic),
    ("__rdiv__", Magic),
    ("__rtruediv__", Magic),
    ("__rmod__", Magic),
    ("__rdivmod__", Magic),
    ("__rpow__", Magic),
    ("__rlshift__", Magic),
    ("__rrshift__", Magic),
    ("__rand__", Magic),
    ("__ror__", Magic),
    ("__rxor__", Magic),
    ("__iadd__", Magic),
    ("__isub__", Magic),
    ("__imul__", Magic),
    ("__ifloordiv__", Magic),
    ("__idiv__", Magic),
    ("__itruediv__", Magic),
    ("__imod__", Magic),
    ("__idivmod__", Magic),
    ("__ipow__", Magic),
    ("__ilshift__", Magic),
    ("__irshift__", Magic),
    ("__iand__", Magic),
    ("__ior__", Magic),
    ("__ixor__", Magic),
    ("__int__", Magic),
    ("__long__", Magic),
    ("__float__", Magic),
    ("__complex__", Magic),
    ("__oct__", Magic),
    ("__hex__", Magic),
    ("__coerce__", Magic),
    ("__getattr__", Magic),
    ("__setattr__", Magic),
    ("__delattr__", Magic),
    ("__getattribute__", Magic),
    ("__getitem__", Magic),
    ("__setitem__", Magic),
    ("__delitem__", Magic),
    ("__iter__", Magic),
    ("__contains__", Magic),
    ("__call__", Magic),
    ("__enter__", Magic),
    ("__exit__", Magic),
    ("__getstate__", Magic),
    ("__setstate__", Magic),
    ("__str__", Magic),
    ("__repr__", Magic),
    ("__unicode__", Magic),
    ("__format__", Magic),
    ("__hash__", Magic),
    ("__dir__", Magic),
    ("__sizeof__", Magic),
    ("__len__", Magic),
    ("__reversed__", Magic),
    ("__missing__", Magic),
    ("__copy__", Magic),
    ("__deepcopy__", Magic),
    ("__getinitargs__", Magic),
    ("__getnewargs__", Magic),
    ("__reduce__", Magic),
    ("__reduce_ex__", Magic),
    ("False", Ks),
    ("None", Ks),
    ("True", Ks),
    ("and", Ks),
    ("class", Ks),
    ("in", Ks),
    ("is", Ks),
    ("lambda", Ks),
    ("not", Ks),
    ("or", Ks),
    ("as", Kd),
    ("assert", Kd),
    ("async", Kd),
    ("await", Kd),
    ("break", Kd),
    ("continue", Kd),
    ("def", Kd),
    ("del", Kd),
    ("elif", Kd),
    ("else", Kd),
    ("except", Kd),
    ("finally", Kd),
    ("for", Kd),
    ("from", Kd),
    ("global", Kd),
    ("if", Kd),
    ("import", Kd),
    ("nonlocal", Kd),
    ("pass", Kd),
    ("raise", Kd),
    ("return", Kd),
    ("try", Kd),
    ("while", Kd),
    ("with", Kd),
    ("yield", Kd),
];

const JAVASCRIPT_KEYWORDS: &[(&str, TokenClass)] = &[
    ("Any", Datatype),
    ("ArrayBuffer", Datatype),
    ("Array", Datatype),
    ("Boolean", Datatype),
    ("Constant", Datatype),
    ("Float", Datatype),
    ("Function", Datatype),
    ("HTMLElement", Datatype),
    ("Integer", Datatype),
    ("null", Datatype),
    ("Object", Datatype),
    ("String", Datatype),
    ("Float32Array", Datatype),
    ("Uint8Array", Datatype),
    ("Int8Array", Datatype),
    ("Uint16Array", Datatype),
    ("Int16Array", Datatype),
    ("Uint32Array", Datatype),
    ("Int32Array", Datatype),
    ("undefined", Datatype),
    ("void", Datatype),
    ("never", Datatype),
    ("await", Ks),
    ("break", Ks),
    ("case", Ks),
    ("catch", Ks),
    ("continue", Ks),
    ("default", Ks),
    ("do", Ks),
    ("else", Ks),
    ("for", Ks),
    ("if", Ks),
    ("return", Ks),
    ("switch", Ks),
    ("throw", Ks),
    ("try", Ks),
    ("while", Ks),
    ("yield", Ks),
    ("class", Kd),
    ("const", Kd),
    ("debugger", Kd),
    ("delete", Kd),
    ("enum", Kd),
    ("export", Kd),
    ("extends", Kd),
    ("false", Kd),
    ("finally", Kd),
    ("function", Kd),
    ("implements", Kd),
    ("import", Kd),
    ("in", Kd),
    ("instanceof", Kd),
    ("interface", Kd),
    ("let", Kd),
    ("new", Kd),
    ("package", Kd),
    ("private", Kd),
    ("protected", Kd),
    ("public", Kd),
    ("static", Kd),
    ("super", Kd),
    ("this", Kd),
    ("true", Kd),
    ("typeof", Kd),
    ("var", Kd),
    ("void", Kd),
    ("with", Kd),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_profile_names_and_aliases() {
        assert_eq!("cpp".parse::<ProfileKind>(), Ok(ProfileKind::Cpp));
        assert_eq!("C++".parse::<ProfileKind>(), Ok(ProfileKind::Cpp));
        assert_eq!(" py ".parse::<ProfileKind>(), Ok(ProfileKind::Python));
        assert_eq!("js".parse::<ProfileKind>(), Ok(ProfileKind::JavaScript));
        let err = "cobol".parse::<ProfileKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown language profile: cobol");
    }

    #[test]
    fn duplicate_keyword_keeps_first_class() {
        let js = LanguageProfile::javascript();
        assert_eq!(js.keyword_class("void"), Some(TokenClass::Datatype));
    }

    #[test]
    fn tables_are_profile_specific() {
        let cpp = LanguageProfile::cpp();
        let py = LanguageProfile::python();
        assert_eq!(cpp.keyword_class("int"), Some(TokenClass::KeywordDefault));
        assert_eq!(cpp.keyword_class("return"), Some(TokenClass::KeywordSpecial));
        assert_eq!(cpp.keyword_class("NULL"), Some(TokenClass::Macro));
        assert_eq!(py.keyword_class("int"), Some(TokenClass::BuiltinFunction));
        assert_eq!(py.keyword_class("self"), Some(TokenClass::MagicMethod));
        assert_eq!(py.keyword_class("def"), Some(TokenClass::KeywordDefault));
        assert_eq!(cpp.keyword_class("def"), None);
        assert!(cpp.keyword_count() > 100);
    }

    #[test]
    fn palette_maps_classes() {
        let cpp = LanguageProfile::cpp();
        assert_eq!(
            cpp.palette.color(TokenClass::KeywordDefault),
            Rgba::from_hex(0x569cd6)
        );
        let py = LanguageProfile::python();
        assert_eq!(
            py.palette.color(TokenClass::KeywordDefault),
            Rgba::from_hex(0xd8a0df)
        );
    }

    #[test]
    fn rule_flags_per_profile() {
        assert_eq!(LanguageProfile::cpp().rules.hash, HashRule::Preprocessor);
        assert_eq!(LanguageProfile::python().rules.hash, HashRule::LineComment);
        assert!(!LanguageProfile::python().rules.slash_comments);
        assert!(LanguageProfile::javascript().rules.function_calls);
        assert!(!LanguageProfile::javascript().rules.numeric_suffixes);
        assert_eq!(
            LanguageProfile::for_kind(ProfileKind::Python).kind,
            ProfileKind::Python
        );
    }
}
