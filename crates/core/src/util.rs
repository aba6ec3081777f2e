use std::path::{Path, PathBuf};

/// Join two paths, only including the normal components.
pub fn join_normalized(base: impl AsRef<Path>, path: impl AsRef<Path>) -> PathBuf {
    let mut out = base.as_ref().to_path_buf();
    out.extend(path.as_ref().components().filter(|v| matches!(v, std::path::Component::Normal(_))));
    out
}

#[cfg(test)]
mod tests {
    use super::join_normalized;

    #[test]
    fn test_join_normalized() {
        let cases: &[(&str, &str)] = &[
            ("a/b.txt", "out/a/b.txt"),
            ("./a/b.txt", "out/a/b.txt"),
            ("../../etc/passwd", "out/etc/passwd"),
            ("/abs/path.txt", "out/abs/path.txt"),
        ];
        for &(input, expected) in cases {
            assert_eq!(join_normalized("out", input), std::path::PathBuf::from(expected));
        }
    }
}
