//! Module specifier classification and resolution
//!
//! Import specifiers come in two flavors: bare specifiers that name a
//! package (`lit`, `@scope/pkg`) and relative specifiers that name a file
//! (`./base.js`, `../mixins/a.js`). Relative specifiers resolve against
//! the importing module's path with URL-style segment folding.

/// Whether a specifier names a package rather than a file.
///
/// Bare specifiers do not start with `.` or `/` and begin with an
/// alphabetic character or `@` (scoped packages).
pub fn is_bare_specifier(specifier: &str) -> bool {
    if specifier.starts_with('.') || specifier.starts_with('/') {
        return false;
    }
    match specifier.chars().next() {
        Some(first) => first.is_alphabetic() || first == '@',
        None => false,
    }
}

/// Resolve a relative specifier against the importing module's path.
///
/// Follows relative-URL semantics: the base's last segment is dropped, the
/// specifier's segments are appended, and `.`/`..` segments are folded.
/// `..` segments past the root are discarded. An absolute specifier
/// replaces the base path entirely.
pub fn resolve_relative(base_module: &str, specifier: &str) -> String {
    if specifier.starts_with('/') {
        return specifier.to_string();
    }

    let mut segments: Vec<&str> = base_module.split('/').collect();
    segments.pop();

    for segment in specifier.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_specifier_detection() {
        assert!(is_bare_specifier("lit"));
        assert!(is_bare_specifier("@lion/button"));
        assert!(is_bare_specifier("lit/decorators.js"));
        assert!(!is_bare_specifier("./local.js"));
        assert!(!is_bare_specifier("../up.js"));
        assert!(!is_bare_specifier("/abs.js"));
        assert!(!is_bare_specifier(""));
        // A leading digit is not a valid package name start.
        assert!(!is_bare_specifier("0pkg"));
    }

    #[test]
    fn sibling_resolution() {
        assert_eq!(resolve_relative("src/a.js", "./b.js"), "src/b.js");
        assert_eq!(resolve_relative("a.js", "./b.js"), "b.js");
    }

    #[test]
    fn parent_resolution() {
        assert_eq!(resolve_relative("src/nested/a.js", "../b.js"), "src/b.js");
        assert_eq!(resolve_relative("src/a.js", "../b.js"), "b.js");
        // Folding past the root discards the extra segments.
        assert_eq!(resolve_relative("a.js", "../../b.js"), "b.js");
    }

    #[test]
    fn deep_resolution() {
        assert_eq!(
            resolve_relative("src/a.js", "./mixins/b.js"),
            "src/mixins/b.js"
        );
        assert_eq!(
            resolve_relative("src/elements/a.js", ".././shared/c.js"),
            "src/shared/c.js"
        );
    }
}
