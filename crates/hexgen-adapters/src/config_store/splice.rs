//! In-place insertion of a single entry into block-style YAML text.
//!
//! Only the new lines are produced by `serde_yaml`; every existing line,
//! comments and quoting included, is copied through unchanged.

use serde_yaml::{Mapping, Value};

use super::layout::{SectionLayout, SectionShape};

/// Fallback child indent when the document has no nested lines yet.
const DEFAULT_STEP: usize = 4;

struct Line<'a> {
    raw: &'a str,
    indent: usize,
    body: &'a str,
}

impl<'a> Line<'a> {
    fn new(raw: &'a str) -> Self {
        let text = raw.trim_end_matches(['\n', '\r']);
        let body = text.trim_start_matches(' ');
        Self {
            raw,
            indent: text.len() - body.len(),
            body: body.trim_end(),
        }
    }

    fn is_content(&self) -> bool {
        !self.body.is_empty() && !self.body.starts_with('#') && self.body != "---"
    }

    fn is_sequence_item(&self) -> bool {
        self.body == "-" || self.body.starts_with("- ")
    }

    /// The text after `segment:` when this line opens that key.
    fn value_after(&self, segment: &str) -> Option<&'a str> {
        let body = self.body;
        let rest = [segment.to_string(), format!("\"{segment}\""), format!("'{segment}'")]
            .iter()
            .find_map(|k| body.strip_prefix(k.as_str()))?;
        let rest = rest.strip_prefix(':')?;
        (rest.is_empty() || rest.starts_with([' ', '\t'])).then_some(rest)
    }
}

/// What follows a section key on its own line.
enum Opening<'a> {
    /// Nothing but maybe a comment: children follow on the next lines.
    Block,
    /// `~`, `null`, `{}` or `[]`, optionally commented.
    EmptyInline { comment: Option<&'a str> },
    /// Flow collection or scalar with content.
    Inline,
}

fn opening(rest: &str) -> Opening<'_> {
    let rest = rest.trim();
    let (value, comment) = match rest.find(" #") {
        Some(at) => (rest[..at].trim(), Some(rest[at..].trim())),
        None if rest.starts_with('#') => ("", Some(rest)),
        None => (rest, None),
    };
    match value {
        "" => Opening::Block,
        "~" | "null" | "{}" | "[]" => Opening::EmptyInline { comment },
        _ => Opening::Inline,
    }
}

/// Append `key: value` (or the list item `value`) to the section described
/// by `layout`, creating missing parents at the end of the deepest existing
/// one.
///
/// `Ok(None)` when an existing section is written inline with content, which
/// cannot be extended line by line.
pub fn append_entry(
    text: &str,
    layout: &SectionLayout,
    key: &str,
    value: &Value,
) -> Result<Option<String>, serde_yaml::Error> {
    let lines: Vec<Line<'_>> = text.split_inclusive('\n').map(Line::new).collect();
    let step = lines
        .iter()
        .find(|l| l.is_content() && l.indent > 0)
        .map_or(DEFAULT_STEP, |l| l.indent);

    // Children of the current section live in `start..end`.
    let (mut start, mut end) = (0, lines.len());
    let mut section_indent: Option<usize> = None;
    let mut rewrite: Option<(usize, String)> = None;
    let mut found = 0;

    for segment in layout.path {
        let Some(child_indent) = lines[start..end]
            .iter()
            .find(|l| l.is_content())
            .map(|l| l.indent)
        else {
            break;
        };
        let hit = (start..end).find_map(|i| {
            let line = &lines[i];
            if line.indent != child_indent || !line.is_content() {
                return None;
            }
            line.value_after(segment).map(|rest| (i, rest))
        });
        let Some((at, rest)) = hit else {
            break;
        };

        match opening(rest) {
            Opening::Block => {}
            Opening::EmptyInline { comment } => {
                let line = &lines[at];
                let key_end = line.indent + (line.body.len() - rest.len());
                let newline = &line.raw[line.raw.trim_end_matches(['\n', '\r']).len()..];
                let mut head = line.raw[..key_end].to_string();
                if let Some(comment) = comment {
                    head.push(' ');
                    head.push_str(comment);
                }
                head.push_str(if newline.is_empty() { "\n" } else { newline });
                rewrite = Some((at, head));
            }
            Opening::Inline => return Ok(None),
        }

        let last = block_last(&lines, at, child_indent);
        start = at + 1;
        end = last + 1;
        section_indent = Some(child_indent);
        found += 1;
        if rewrite.is_some() {
            // An emptied inline value has no children to descend into.
            break;
        }
    }

    let leaf = match layout.shape {
        SectionShape::Mapping => {
            let mut map = Mapping::new();
            map.insert(Value::String(key.to_string()), value.clone());
            Value::Mapping(map)
        }
        SectionShape::List { .. } => Value::Sequence(vec![value.clone()]),
    };
    let wrapped = layout.path[found..].iter().rev().fold(leaf, |inner, segment| {
        let mut map = Mapping::new();
        map.insert(Value::String((*segment).to_string()), inner);
        Value::Mapping(map)
    });
    let snippet = serde_yaml::to_string(&wrapped)?;

    let (insert_at, indent) = match section_indent {
        None => (
            lines.len(),
            lines.iter().find(|l| l.is_content()).map_or(0, |l| l.indent),
        ),
        Some(parent) => (
            end,
            lines[start..end]
                .iter()
                .find(|l| l.is_content())
                .map_or(parent + step, |l| l.indent),
        ),
    };

    let newline = if text.contains("\r\n") { "\r\n" } else { "\n" };
    let mut out = String::with_capacity(text.len() + snippet.len() * 2);
    for (i, line) in lines.iter().enumerate().take(insert_at) {
        match &rewrite {
            Some((at, head)) if *at == i => out.push_str(head),
            _ => out.push_str(line.raw),
        }
    }
    if !out.is_empty() && !out.ends_with('\n') {
        out.push_str(newline);
    }
    for line in snippet.lines() {
        if !line.is_empty() {
            out.push_str(&" ".repeat(indent));
        }
        out.push_str(line);
        out.push_str(newline);
    }
    for line in &lines[insert_at..] {
        out.push_str(line.raw);
    }
    Ok(Some(out))
}

/// Index of the last content line belonging to the key opened at `at`.
fn block_last(lines: &[Line<'_>], at: usize, indent: usize) -> usize {
    let mut last = at;
    for (i, line) in lines.iter().enumerate().skip(at + 1) {
        if !line.is_content() {
            continue;
        }
        // Sequences may sit at the same indent as their key.
        if line.indent > indent || (line.indent == indent && line.is_sequence_item()) {
            last = i;
        } else {
            break;
        }
    }
    last
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexgen_core::domain::RegistryKind;

    fn services() -> SectionLayout {
        SectionLayout::for_kind(RegistryKind::DependencyBinding)
    }

    fn plain(s: &str) -> Value {
        Value::String(s.to_string())
    }

    fn append(text: &str, layout: SectionLayout, key: &str, value: Value) -> String {
        append_entry(text, &layout, key, &value).unwrap().unwrap()
    }

    #[test]
    fn entry_lands_at_end_of_section() {
        let text = "services:\n    _defaults:\n        autowire: true\n\nparameters:\n    locale: en\n";
        let out = append(text, services(), "Foo", plain("bar"));
        assert_eq!(
            out,
            "services:\n    _defaults:\n        autowire: true\n    Foo: bar\n\nparameters:\n    locale: en\n"
        );
    }

    #[test]
    fn missing_parents_are_created_inside_deepest_section() {
        let text = "doctrine:\n  dbal:\n    url: x\n";
        let out = append(
            text,
            SectionLayout::for_kind(RegistryKind::TypeMapping),
            "Billing",
            Value::Null,
        );
        assert!(out.starts_with(text));
        assert!(out.ends_with("  orm:\n    mappings:\n      Billing: null\n"));
    }

    #[test]
    fn empty_inline_section_is_opened() {
        let out = append("services: {} # none yet\n", services(), "a", plain("b"));
        assert_eq!(out, "services: # none yet\n    a: b\n");
    }

    #[test]
    fn compact_route_list_keeps_its_indent() {
        let text = "routes:\n- name: home\n  resource: a\n";
        let out = append(
            text,
            SectionLayout::for_kind(RegistryKind::RouteDeclaration),
            "blog",
            serde_yaml::from_str("{name: blog}").unwrap(),
        );
        assert_eq!(out, "routes:\n- name: home\n  resource: a\n- name: blog\n");
    }

    #[test]
    fn flow_section_with_content_is_not_spliced() {
        let layout = services();
        let result = append_entry("services: {a: b}\n", &layout, "c", &plain("d")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn missing_trailing_newline_is_added_before_entry() {
        let out = append("services:\n  a: b", services(), "c", plain("d"));
        assert_eq!(out, "services:\n  a: b\n  c: d\n");
    }
}
