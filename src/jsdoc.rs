//! JSDoc block parsing
//!
//! Turns a `/** ... */` block into a description plus a list of tags. The
//! grammar is deliberately permissive: unknown tags are kept verbatim so
//! user plugins can consume their own vocabulary, and malformed tags
//! degrade to description text instead of failing the run.

use once_cell::sync::Lazy;
use regex::Regex;
use tree_sitter::Node;

use crate::ast;
use crate::schema::Privacy;

/// Tag shapes where no name token is expected; everything after the type
/// braces is description.
const NAMELESS_TAGS: &[&str] = &[
    "returns",
    "return",
    "type",
    "summary",
    "public",
    "private",
    "protected",
    "ignore",
    "internal",
    "deprecated",
    "reflect",
    "reflects",
    "readonly",
];

static TAG_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@([A-Za-z][\w-]*)\s*(?:\{([^}]*)\})?\s*(.*)$").unwrap());

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsDoc {
    pub description: Option<String>,
    pub tags: Vec<JsDocTag>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsDocTag {
    pub tag: String,
    pub type_text: Option<String>,
    pub name: Option<String>,
    pub default: Option<String>,
    pub optional: bool,
    pub description: Option<String>,
}

/// Parse the JSDoc block preceding a node, if any.
pub fn for_node(node: Node, source: &str) -> Option<JsDoc> {
    ast::doc_comment(node, source).map(|raw| parse(&raw))
}

/// Parse a raw `/** ... */` block.
pub fn parse(raw: &str) -> JsDoc {
    let mut description_lines: Vec<String> = Vec::new();
    let mut tags: Vec<JsDocTag> = Vec::new();

    for line in strip_comment_markers(raw) {
        if let Some(captures) = TAG_LINE.captures(&line) {
            let tag_name = captures.get(1).map(|m| m.as_str().to_string()).unwrap_or_default();
            let type_text = captures
                .get(2)
                .map(|m| m.as_str().trim().to_string())
                .filter(|t| !t.is_empty());
            let rest = captures.get(3).map(|m| m.as_str()).unwrap_or("");
            tags.push(build_tag(tag_name, type_text, rest));
        } else if let Some(tag) = tags.last_mut() {
            // Continuation line of the current tag's description.
            if !line.is_empty() {
                append_description(&mut tag.description, &line);
            }
        } else {
            description_lines.push(line);
        }
    }

    let description = join_non_empty(description_lines);
    JsDoc { description, tags }
}

fn build_tag(tag: String, type_text: Option<String>, rest: &str) -> JsDocTag {
    let mut out = JsDocTag {
        tag,
        type_text,
        ..Default::default()
    };

    let rest = rest.trim();
    if NAMELESS_TAGS.contains(&out.tag.as_str()) {
        out.description = non_empty(rest.trim_start_matches("- ").trim());
        return out;
    }

    let (name_token, remainder) = split_first_token(rest);
    if let Some(token) = name_token {
        if let Some(inner) = token.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
            // `[name=default]` marks an optional entry with a default.
            out.optional = true;
            match inner.split_once('=') {
                Some((name, default)) => {
                    out.name = non_empty(name.trim());
                    out.default = non_empty(default.trim());
                }
                None => out.name = non_empty(inner.trim()),
            }
        } else {
            out.name = Some(token.to_string());
        }
    }
    out.description = non_empty(remainder.trim_start_matches("- ").trim());
    out
}

fn split_first_token(text: &str) -> (Option<&str>, &str) {
    let text = text.trim();
    if text.is_empty() {
        return (None, "");
    }
    match text.split_once(char::is_whitespace) {
        Some((token, rest)) => (Some(token), rest.trim()),
        None => (Some(text), ""),
    }
}

fn strip_comment_markers(raw: &str) -> Vec<String> {
    let body = raw
        .trim()
        .trim_start_matches("/**")
        .trim_end_matches("*/");
    body.lines()
        .map(|line| {
            line.trim()
                .trim_start_matches('*')
                .trim_start_matches(' ')
                .to_string()
        })
        .collect()
}

fn append_description(existing: &mut Option<String>, line: &str) {
    match existing {
        Some(text) => {
            text.push('\n');
            text.push_str(line);
        }
        None => *existing = Some(line.to_string()),
    }
}

fn join_non_empty(lines: Vec<String>) -> Option<String> {
    let joined = lines.join("\n");
    non_empty(joined.trim())
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

impl JsDoc {
    /// First tag matching any of the given names.
    pub fn tag(&self, names: &[&str]) -> Option<&JsDocTag> {
        self.tags.iter().find(|t| names.contains(&t.tag.as_str()))
    }

    /// All tags matching any of the given names, in source order.
    pub fn tags_named(&self, names: &[&str]) -> Vec<&JsDocTag> {
        self.tags
            .iter()
            .filter(|t| names.contains(&t.tag.as_str()))
            .collect()
    }

    pub fn has(&self, names: &[&str]) -> bool {
        self.tag(names).is_some()
    }

    /// Privacy override from `@public`/`@private`/`@protected`.
    pub fn privacy(&self) -> Option<Privacy> {
        self.tags.iter().rev().find_map(|t| match t.tag.as_str() {
            "public" => Some(Privacy::Public),
            "private" => Some(Privacy::Private),
            "protected" => Some(Privacy::Protected),
            _ => None,
        })
    }

    /// Whether this block opts the documented item out of the manifest.
    pub fn is_ignored(&self) -> bool {
        self.has(&["ignore", "internal"])
    }

    pub fn type_text(&self) -> Option<&str> {
        self.tag(&["type"]).and_then(|t| t.type_text.as_deref())
    }

    pub fn summary(&self) -> Option<String> {
        self.tag(&["summary"]).and_then(|t| t.description.clone())
    }

    pub fn param(&self, name: &str) -> Option<&JsDocTag> {
        self.tags
            .iter()
            .find(|t| t.tag == "param" && t.name.as_deref() == Some(name))
    }

    pub fn returns(&self) -> Option<&JsDocTag> {
        self.tag(&["returns", "return"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_and_tags_split() {
        let doc = parse(
            "/**\n * A fancy button.\n * Works everywhere.\n *\n * @fires click-count - Fired on click\n * @private\n */",
        );
        assert_eq!(
            doc.description.as_deref(),
            Some("A fancy button.\nWorks everywhere.")
        );
        let fires = doc.tag(&["fires"]).unwrap();
        assert_eq!(fires.name.as_deref(), Some("click-count"));
        assert_eq!(fires.description.as_deref(), Some("Fired on click"));
        assert_eq!(doc.privacy(), Some(Privacy::Private));
    }

    #[test]
    fn param_with_type_default_and_optionality() {
        let doc = parse("/** @param {string} [label='ok'] - button label */");
        let param = doc.param("label").unwrap();
        assert_eq!(param.type_text.as_deref(), Some("string"));
        assert_eq!(param.default.as_deref(), Some("'ok'"));
        assert!(param.optional);
        assert_eq!(param.description.as_deref(), Some("button label"));
    }

    #[test]
    fn returns_keeps_whole_description() {
        let doc = parse("/** @returns {boolean} true when the toggle flipped */");
        let ret = doc.returns().unwrap();
        assert_eq!(ret.type_text.as_deref(), Some("boolean"));
        assert_eq!(
            ret.description.as_deref(),
            Some("true when the toggle flipped")
        );
    }

    #[test]
    fn cssprop_names_survive_leading_dashes() {
        let doc = parse("/** @cssprop --main-color - controls the color */");
        let tag = doc.tag(&["cssprop"]).unwrap();
        assert_eq!(tag.name.as_deref(), Some("--main-color"));
        assert_eq!(tag.description.as_deref(), Some("controls the color"));

        let doc = parse("/** @cssprop [--gap=8px] - row gap */");
        let tag = doc.tag(&["cssprop"]).unwrap();
        assert_eq!(tag.name.as_deref(), Some("--gap"));
        assert_eq!(tag.default.as_deref(), Some("8px"));
    }

    #[test]
    fn attr_tag_without_name_is_bare() {
        let doc = parse("/** @attr */");
        let attr = doc.tag(&["attr"]).unwrap();
        assert_eq!(attr.name, None);

        let doc = parse("/** @attr my-attr */");
        assert_eq!(
            doc.tag(&["attr"]).unwrap().name.as_deref(),
            Some("my-attr")
        );
    }

    #[test]
    fn ignore_and_internal_flag() {
        assert!(parse("/** @ignore */").is_ignored());
        assert!(parse("/** @internal */").is_ignored());
        assert!(!parse("/** plain */").is_ignored());
    }

    #[test]
    fn multiline_tag_descriptions_continue() {
        let doc = parse("/**\n * @param {number} count - how many\n *   times to repeat\n */");
        let param = doc.param("count").unwrap();
        assert_eq!(
            param.description.as_deref(),
            Some("how many\ntimes to repeat")
        );
    }
}
