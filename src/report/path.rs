use derive_more::{Display, From};

/// Key of the root node, which has an empty path.
pub const ROOT_KEY: &str = "root";
pub const ROOT_NAME: &str = "root";

/// One step inside a compared structure: a mapping key (or set member) or a
/// sequence index.
#[derive(Debug, Display, From, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    #[display("{_0}")]
    Key(String),
    #[display("{_0}")]
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(value: &str) -> Self {
        PathSegment::Key(value.to_string())
    }
}

/// Deterministic string form of a path, used to deduplicate and look up nodes.
///
/// The empty path maps to [`ROOT_KEY`]. Otherwise keys are single quoted with
/// `\` and `'` escaped and indices are written bare, e.g. `['a', 0, 'b']`, so
/// distinct paths never share a key.
pub fn canonical_key(path: &[PathSegment]) -> String {
    if path.is_empty() {
        return ROOT_KEY.to_string();
    }

    let mut key = String::from("[");
    for (i, segment) in path.iter().enumerate() {
        if i > 0 {
            key.push_str(", ");
        }
        push_segment(&mut key, segment);
    }
    key.push(']');
    key
}

fn push_segment(out: &mut String, segment: &PathSegment) {
    match segment {
        PathSegment::Index(index) => out.push_str(&index.to_string()),
        PathSegment::Key(name) => {
            out.push('\'');
            for c in name.chars() {
                if c == '\\' || c == '\'' {
                    out.push('\\');
                }
                out.push(c);
            }
            out.push('\'');
        }
    }
}

/// Builds a path from anything convertible into segments.
///
/// ```
/// use difftree::report::{path_of, PathSegment};
///
/// assert_eq!(
///     path_of(["a".into(), 0usize.into()]),
///     vec![PathSegment::Key("a".into()), PathSegment::Index(0)]
/// );
/// ```
pub fn path_of(segments: impl IntoIterator<Item = PathSegment>) -> Vec<PathSegment> {
    segments.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn key(name: &str) -> PathSegment {
        PathSegment::Key(name.to_string())
    }

    #[test]
    fn empty_path_is_root() {
        assert_eq!(canonical_key(&[]), ROOT_KEY);
    }

    #[rstest]
    #[case(vec![key("a")], "['a']")]
    #[case(vec![key("a"), key("b"), key("c")], "['a', 'b', 'c']")]
    #[case(vec![key("list"), PathSegment::Index(3)], "['list', 3]")]
    #[case(vec![key("it's")], r"['it\'s']")]
    #[case(vec![key(r"back\slash")], r"['back\\slash']")]
    fn keys_are_formatted(#[case] path: Vec<PathSegment>, #[case] expected: &str) {
        assert_eq!(canonical_key(&path), expected);
    }

    #[rstest]
    #[case(vec![key("0")], vec![PathSegment::Index(0)])]
    #[case(vec![key("a, 'b")], vec![key("a"), key("b")])]
    #[case(vec![key("a', 'b")], vec![key("a"), key("b")])]
    #[case(vec![key("root")], vec![])]
    fn distinct_paths_do_not_collide(
        #[case] left: Vec<PathSegment>,
        #[case] right: Vec<PathSegment>,
    ) {
        assert_ne!(canonical_key(&left), canonical_key(&right));
    }

    #[test]
    fn equal_paths_share_a_key() {
        let left = path_of([key("a"), PathSegment::Index(1)]);
        let right = path_of(["a".into(), 1usize.into()]);
        assert_eq!(canonical_key(&left), canonical_key(&right));
    }

    #[test]
    fn display_is_the_raw_segment() {
        assert_eq!(key("name").to_string(), "name");
        assert_eq!(PathSegment::Index(7).to_string(), "7");
    }
}
