//! Deterministic naming rules shared by every artifact.

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod",
    "move", "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait",
    "true", "try", "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do",
    "final", "macro", "override", "priv", "typeof", "unsized", "virtual", "yield",
];

/// Keywords that cannot be written as raw identifiers.
const NOT_RAW: &[&str] = &["crate", "self", "Self", "super", "_"];

/// Title-cased prefix used for the generated trait names.
///
/// ```rust,ignore
/// assert_eq!(title_case("pet-store"), "PetStore");
/// assert_eq!(title_case("admiral"), "Admiral");
/// ```
pub fn title_case(s: &str) -> String {
    s.split(['-', '_', ' '])
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Convert a handler name such as `LoggerMw` or `getHTTPStatus` to snake_case.
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(|n| n.is_lowercase()),
                _ => false,
            };
            if boundary && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Method identifier for a handler name: snake_case, with keywords escaped.
pub fn method_name(handler_name: &str) -> String {
    sanitize_rust_identifier(&to_snake_case(handler_name))
}

/// Identifier of the generated crate as seen from `use` statements.
pub fn crate_ident(project_name: &str) -> String {
    project_name.replace('-', "_")
}

pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// Escape keywords as raw identifiers; the few that cannot be raw get a
/// trailing underscore instead.
pub fn sanitize_rust_identifier(name: &str) -> String {
    if NOT_RAW.contains(&name) {
        format!("{name}_")
    } else if is_keyword(name) {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}

/// True for plain or raw ASCII identifiers the renderer may emit.
pub fn is_valid_identifier(name: &str) -> bool {
    let bare = name.strip_prefix("r#").unwrap_or(name);
    let mut chars = bare.chars();
    let head_ok = match chars.next() {
        Some(c) => c.is_ascii_alphabetic() || c == '_',
        None => false,
    };
    if !head_ok || bare == "_" || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return false;
    }
    if name.starts_with("r#") {
        !NOT_RAW.contains(&bare)
    } else {
        !is_keyword(bare)
    }
}

/// A project name doubles as the Cargo package name and the crate identifier.
pub fn is_valid_project_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
                && !is_keyword(&crate_ident(name))
        }
        _ => false,
    }
}
