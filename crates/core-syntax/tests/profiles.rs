use core_syntax::{Highlighter, LanguageProfile, ProfileKind, Rgba, TokenClass};
use pretty_assertions::assert_eq;

fn classes(kind: ProfileKind, src: &str) -> Vec<(String, TokenClass)> {
    let chars: Vec<char> = src.chars().collect();
    Highlighter::new(LanguageProfile::for_kind(kind))
        .highlight(&chars)
        .into_iter()
        .map(|s| (chars[s.start..s.end].iter().collect(), s.class))
        .collect()
}

fn owned(v: &[(&str, TokenClass)]) -> Vec<(String, TokenClass)> {
    v.iter().map(|(s, c)| (s.to_string(), *c)).collect()
}

#[test]
fn cpp_function_body() {
    let src = "#include <stdio.h>\nint main() {\n\tprintf(\"hi\");\n\treturn NULL; // done\n}";
    assert_eq!(
        classes(ProfileKind::Cpp, src),
        owned(&[
            ("#include", TokenClass::Preprocessor),
            ("<stdio.h>", TokenClass::StringLiteral),
            ("int", TokenClass::KeywordDefault),
            ("main", TokenClass::Function),
            ("printf", TokenClass::Function),
            ("\"hi\"", TokenClass::StringLiteral),
            ("return", TokenClass::KeywordSpecial),
            ("NULL", TokenClass::Macro),
            ("// done", TokenClass::Comment),
        ])
    );
}

#[test]
fn python_class_definition() {
    let src = "class A:\n    def __init__(self):\n        print(len('x'))";
    assert_eq!(
        classes(ProfileKind::Python, src),
        owned(&[
            ("class", TokenClass::KeywordSpecial),
            ("def", TokenClass::KeywordDefault),
            ("__init__", TokenClass::MagicMethod),
            ("self", TokenClass::MagicMethod),
            ("print", TokenClass::BuiltinFunction),
            ("len", TokenClass::BuiltinFunction),
            ("'x'", TokenClass::StringLiteral),
        ])
    );
}

#[test]
fn javascript_function() {
    let src = "function f(a) { /* x */ return new Array(2.5); }";
    assert_eq!(
        classes(ProfileKind::JavaScript, src),
        owned(&[
            ("function", TokenClass::KeywordDefault),
            ("f", TokenClass::Function),
            ("/* x */", TokenClass::Comment),
            ("return", TokenClass::KeywordSpecial),
            ("new", TokenClass::KeywordDefault),
            ("Array", TokenClass::Datatype),
            ("2.5", TokenClass::NumberLiteral),
        ])
    );
}

#[test]
fn same_word_colors_differ_by_profile() {
    let cpp = Highlighter::new(LanguageProfile::cpp()).highlight_str("for");
    let py = Highlighter::new(LanguageProfile::python()).highlight_str("for");
    assert_eq!(cpp[0].color, Rgba::from_hex(0xd8a0df));
    assert_eq!(py[0].color, Rgba::from_hex(0xd8a0df));
    assert_eq!(cpp[0].class, TokenClass::KeywordSpecial);
    assert_eq!(py[0].class, TokenClass::KeywordDefault);
}
