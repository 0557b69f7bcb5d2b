//! Identifier and casing helpers shared by the parser, the classifier and
//! the render context.

/// Whether `s` matches `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Convert a string to snake_case.
///
/// | Input | Output |
/// |-------|--------|
/// | "MyApp" | "my_app" |
/// | "my-app" | "my_app" |
/// | "HTTPRequest" | "http_request" |
pub fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

/// Same as [`to_snake_case`] but joined with `-`.
pub fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

/// Convert a string to PascalCase.
///
/// | Input | Output |
/// |-------|--------|
/// | "my-app" | "MyApp" |
/// | "HTTPRequest" | "HttpRequest" |
pub fn to_pascal_case(s: &str) -> String {
    split_words(s).iter().map(|w| capitalize(w)).collect()
}

/// Convert a string to camelCase.
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    lower_first(&pascal)
}

/// Upper-case the first character, leaving the rest untouched.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// Lower-case the first character, leaving the rest untouched.
pub fn lower_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            out.extend(first.to_lowercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// Split a string into lower-cased words.
///
/// ## Word Boundary Detection
///
/// 1. **Explicit separators:** `_`, `-`, whitespace → always split
/// 2. **Case transition (camelCase):** `aB` → split between `a` and `B`
/// 3. **Acronym boundary:** `HTTPRequest` → split between `P` and `R`
///    (detected by `Upper Upper Lower` pattern)
pub fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(&next) = chars.peek() {
            // "myApp" → "my" + "App"
            if c.is_lowercase() && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            // "HTTPServer" → "HTTP" + "Server"
            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase())
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}

/// Case-preserving camel-case tokenizer.
///
/// A new token starts at every upper-case letter that follows a non-upper-case
/// character, and at every separator (`_`, `-`, whitespace). Separators are
/// dropped; lower-case initial letters are capitalised so tokens can be
/// re-joined into PascalCase names.
///
/// | Input | Tokens |
/// |-------|--------|
/// | "BlogPostToUser" | ["Blog", "Post", "To", "User"] |
/// | "tag_to_article" | ["Tag", "To", "Article"] |
/// | "Cadeaux" | ["Cadeaux"] |
pub fn camel_tokens(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut prev_upper = false;

    for c in input.chars() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                tokens.push(capitalize(&current));
                current.clear();
            }
            prev_upper = false;
            continue;
        }

        if c.is_uppercase() && !prev_upper && !current.is_empty() {
            tokens.push(capitalize(&current));
            current.clear();
        }

        prev_upper = c.is_uppercase();
        current.push(c);
    }

    if !current.is_empty() {
        tokens.push(capitalize(&current));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers() {
        assert!(is_identifier("nom"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("created_at2"));
        assert!(!is_identifier("2fast"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("with-dash"));
        assert!(!is_identifier("é"));
    }

    #[test]
    fn casing_variants() {
        assert_eq!(to_snake_case("BlogPost"), "blog_post");
        assert_eq!(to_kebab_case("BlogPost"), "blog-post");
        assert_eq!(to_pascal_case("blog_post"), "BlogPost");
        assert_eq!(to_camel_case("BlogPost"), "blogPost");
        assert_eq!(to_snake_case("HTTPRequest"), "http_request");
    }

    #[test]
    fn camel_tokens_preserve_case() {
        assert_eq!(camel_tokens("BlogPostToUser"), ["Blog", "Post", "To", "User"]);
        assert_eq!(camel_tokens("tag_to_article"), ["Tag", "To", "Article"]);
        assert_eq!(camel_tokens("Cadeaux"), ["Cadeaux"]);
        assert!(camel_tokens("").is_empty());
    }
}
