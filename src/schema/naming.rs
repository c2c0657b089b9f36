//! Identifier casing helpers shared by the generator and templates.

/// Convert a human or snake_case name to CamelCase.
///
/// Word boundaries are spaces, underscores, dashes and lower-to-upper
/// transitions, so `"My Cool Thing"`, `"my_cool_thing"` and `"myCoolThing"`
/// all map to `MyCoolThing`.
pub fn to_camel_case(s: &str) -> String {
    split_words(s)
        .into_iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect()
}

/// Convert a name to lowerCamelCase, the wire form of invocation and
/// argument names.
pub fn to_lower_camel_case(s: &str) -> String {
    let camel = to_camel_case(s);
    let mut chars = camel.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Convert a human name to the kebab-case form used for crate names.
///
/// `"My Cool Thing"` maps to `my-cool-thing`.
pub fn to_kebab_case(s: &str) -> String {
    split_words(s)
        .into_iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Convert a human name to snake_case, the module-path form of a crate name.
pub fn to_snake_case(s: &str) -> String {
    split_words(s)
        .into_iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

fn split_words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for c in s.chars() {
        if c == ' ' || c == '_' || c == '-' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Escape Rust keywords so schema names stay usable as identifiers.
pub fn sanitize_identifier(name: &str) -> String {
    const KEYWORDS: &[&str] = &[
        "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn",
        "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref",
        "return", "self", "static", "struct", "super", "trait", "true", "type", "unsafe", "use",
        "where", "while", "async", "await", "dyn",
    ];
    if KEYWORDS.contains(&name) {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_from_human_name() {
        assert_eq!(to_camel_case("My Cool Thing"), "MyCoolThing");
        assert_eq!(to_camel_case("my_cool_thing"), "MyCoolThing");
        assert_eq!(to_camel_case("myCoolThing"), "MyCoolThing");
        assert_eq!(to_camel_case("single"), "Single");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn kebab_case_from_human_name() {
        assert_eq!(to_kebab_case("My Cool Thing"), "my-cool-thing");
        assert_eq!(to_kebab_case("myCoolThing"), "my-cool-thing");
        assert_eq!(to_kebab_case("already-kebab"), "already-kebab");
    }

    #[test]
    fn snake_case_from_human_name() {
        assert_eq!(to_snake_case("My Cool Thing"), "my_cool_thing");
        assert_eq!(to_snake_case("my-mod"), "my_mod");
    }

    #[test]
    fn same_input_derives_both_conventions() {
        // crate name and scaffold type name come from the same string
        let name = "My Cool Thing";
        assert_eq!(to_kebab_case(name), "my-cool-thing");
        assert_eq!(to_camel_case(name), "MyCoolThing");
    }

    #[test]
    fn lower_camel_for_wire_names() {
        assert_eq!(to_lower_camel_case("container_echo"), "containerEcho");
        assert_eq!(to_lower_camel_case("string_arg"), "stringArg");
        assert_eq!(to_lower_camel_case(""), "");
    }

    #[test]
    fn keywords_are_escaped() {
        assert_eq!(sanitize_identifier("type"), "r#type");
        assert_eq!(sanitize_identifier("container"), "container");
    }
}
