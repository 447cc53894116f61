use std::borrow::Cow;

/// Absolute path of the tree root.
pub const ROOT: &str = "/";

const SEPARATOR: char = '/';
const HOME: &str = "~";
const HOME_PREFIX: &str = "~/";

/// Resolves `path` into a canonical absolute path.
///
/// Absolute paths are taken as they are, `~` and `~/...` are expanded against
/// `home`, and everything else is joined onto `cwd`. Empty segments and `.`
/// are dropped, `..` pops one segment and never climbs above the root.
/// The function is total: an empty `path` resolves to `cwd` itself.
pub fn normalize(path: &str, cwd: &str, home: &str) -> String {
    let joined: Cow<'_, str> = if path.starts_with(SEPARATOR) {
        Cow::Borrowed(path)
    } else if path == HOME {
        Cow::Borrowed(home)
    } else if let Some(rest) = path.strip_prefix(HOME_PREFIX) {
        Cow::Owned(format!("{home}{SEPARATOR}{rest}"))
    } else {
        Cow::Owned(format!("{cwd}{SEPARATOR}{path}"))
    };

    let mut resolved: Vec<&str> = Vec::new();
    for segment in joined.split(SEPARATOR) {
        match segment {
            "" | "." => {}
            ".." => {
                resolved.pop();
            }
            name => resolved.push(name),
        }
    }

    format!("{SEPARATOR}{}", resolved.join("/"))
}

/// Splits a path into its normalized parent directory and its final segment.
///
/// The root has no base name: it splits into `("/", "")`, and callers that
/// need a name must reject the empty base.
pub fn split_parent_and_base(path: &str, cwd: &str, home: &str) -> (String, String) {
    let normalized = normalize(path, cwd, home);
    match normalized.rsplit_once(SEPARATOR) {
        Some((parent, base)) if !base.is_empty() => {
            (normalize(parent, ROOT, ROOT), base.to_string())
        }
        _ => (ROOT.to_string(), String::new()),
    }
}

/// Iterates over the non-empty segments of an absolute path.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(SEPARATOR).filter(|segment| !segment.is_empty())
}

/// Whether `path` is `ancestor` itself or lies somewhere below it.
/// Both arguments must already be normalized.
pub fn is_same_or_descendant(path: &str, ancestor: &str) -> bool {
    if ancestor == ROOT {
        return true;
    }
    path == ancestor
        || path
            .strip_prefix(ancestor)
            .is_some_and(|rest| rest.starts_with(SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    const HOME_DIR: &str = "/home/u";

    #[rstest]
    #[case("/a/b", "/x", "/a/b")]
    #[case("/a//b///c", "/x", "/a/b/c")]
    #[case("x/y", "/a/b", "/a/b/x/y")]
    #[case("./x/./y/.", "/a", "/a/x/y")]
    #[case("../c", "/a/b", "/a/c")]
    #[case("..", "/", "/")]
    #[case("../../..", "/a/b", "/")]
    #[case("/../../a", "/", "/a")]
    #[case("~", "/var", "/home/u")]
    #[case("~/docs", "/var", "/home/u/docs")]
    #[case("~/../other", "/var", "/home/other")]
    #[case("~user", "/var", "/var/~user")]
    #[case("", "/a/b", "/a/b")]
    #[case("", "/", "/")]
    #[case("/", "/a", "/")]
    #[case("/a/b/", "/", "/a/b")]
    fn normalize_resolves_paths(#[case] path: &str, #[case] cwd: &str, #[case] expected: &str) {
        assert_eq!(normalize(path, cwd, HOME_DIR), expected);
    }

    #[rstest]
    #[case("x/../y")]
    #[case("~/a/./b/..")]
    #[case("../../../..")]
    #[case("//a//b//")]
    #[case("")]
    #[case("...")]
    fn normalize_is_idempotent(#[case] path: &str) {
        let cwd = "/a/b";
        let once = normalize(path, cwd, HOME_DIR);
        assert_eq!(normalize(&once, cwd, HOME_DIR), once);
    }

    #[test]
    fn normalize_keeps_dotted_names_that_are_not_special() {
        assert_eq!(normalize("...", "/", HOME_DIR), "/...");
        assert_eq!(normalize(".hidden", "/a", HOME_DIR), "/a/.hidden");
    }

    #[test]
    fn normalize_tolerates_relative_cwd() {
        assert_eq!(normalize("x", "a", HOME_DIR), "/a/x");
    }

    #[rstest]
    #[case("/a/b", "/", "/a", "b")]
    #[case("/a/b/", "/", "/a", "b")]
    #[case("/a", "/", "/", "a")]
    #[case("f.txt", "/a", "/a", "f.txt")]
    #[case("~/note", "/", "/home/u", "note")]
    #[case("/", "/a", "/", "")]
    #[case("..", "/a", "/", "")]
    fn split_parent_and_base_decomposes(
        #[case] path: &str,
        #[case] cwd: &str,
        #[case] parent: &str,
        #[case] base: &str,
    ) {
        assert_eq!(
            split_parent_and_base(path, cwd, HOME_DIR),
            (parent.to_string(), base.to_string())
        );
    }

    #[test]
    fn segments_skip_empty_components() {
        assert_eq!(segments("/a//b/").collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(segments(ROOT).count(), 0);
    }

    #[rstest]
    #[case("/a", "/a", true)]
    #[case("/a/b", "/a", true)]
    #[case("/ab", "/a", false)]
    #[case("/b", "/a", false)]
    #[case("/anything", "/", true)]
    fn is_same_or_descendant_matches_whole_segments(
        #[case] path: &str,
        #[case] ancestor: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(is_same_or_descendant(path, ancestor), expected);
    }
}
