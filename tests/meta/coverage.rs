//! Layout checks keeping `tests/unit` a mirror of `src`

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    const SRC: &str = "src";
    const UNIT: &str = "tests/unit";

    // Files that wire modules together rather than implement them
    fn is_module_glue(relative: &Path) -> bool {
        matches!(
            relative.file_name().and_then(|name| name.to_str()),
            Some("mod.rs" | "lib.rs" | "main.rs")
        )
    }

    fn walk(root: &Path, dir: &Path, found: &mut BTreeSet<PathBuf>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let relative = path
                .strip_prefix(root)
                .map_err(io::Error::other)?
                .to_path_buf();

            if path.is_dir() {
                found.insert(relative);
                walk(root, &path, found)?;
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                found.insert(relative);
            }
        }
        Ok(())
    }

    fn tree(root: &str) -> BTreeSet<PathBuf> {
        let root = Path::new(root);
        let mut found = BTreeSet::new();
        if let Err(error) = walk(root, root, &mut found) {
            assert!(!root.exists(), "failed to read {}: {error}", root.display());
        }
        found
    }

    fn listing(paths: &[&PathBuf], from: &str, to: &str) -> String {
        paths
            .iter()
            .map(|path| format!("  - {from}/{0} -> {to}/{0}", path.display()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_all_src_files_have_unit_tests() {
        let src = tree(SRC);
        let unit = tree(UNIT);
        let missing: Vec<_> = src
            .iter()
            .filter(|path| !is_module_glue(path) && !unit.contains(*path))
            .collect();

        assert!(
            missing.is_empty(),
            "src files without a unit test counterpart:\n{}",
            listing(&missing, SRC, UNIT)
        );
    }

    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let src = tree(SRC);
        let unit = tree(UNIT);
        let orphaned: Vec<_> = unit
            .iter()
            .filter(|path| !is_module_glue(path) && !src.contains(*path))
            .collect();

        assert!(
            orphaned.is_empty(),
            "unit tests without a src counterpart:\n{}",
            listing(&orphaned, UNIT, SRC)
        );
    }

    #[test]
    fn test_all_test_files_contain_tests() {
        let mut empty = Vec::new();
        for relative in tree("tests") {
            let path = Path::new("tests").join(&relative);
            if path.is_dir() || is_module_glue(&relative) {
                continue;
            }
            let content = fs::read_to_string(&path).unwrap_or_default();
            if !content.contains("#[test]") {
                empty.push(format!("  - {}", path.display()));
            }
        }

        assert!(
            empty.is_empty(),
            "test files without any #[test] function:\n{}",
            empty.join("\n")
        );
    }

    #[test]
    fn test_all_modules_are_declared() {
        let mut undeclared = Vec::new();
        for relative in tree(SRC) {
            let path = Path::new(SRC).join(&relative);
            if path.is_dir() || is_module_glue(&relative) {
                continue;
            }
            let Some(stem) = relative.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let parent = match path.parent() {
                Some(dir) if dir == Path::new(SRC) => dir.join("lib.rs"),
                Some(dir) => dir.join("mod.rs"),
                None => continue,
            };

            let declarations = fs::read_to_string(&parent).unwrap_or_default();
            if !declarations.contains(&format!("mod {stem};")) {
                undeclared.push(format!("  - {} (not in {})", path.display(), parent.display()));
            }
        }

        assert!(
            undeclared.is_empty(),
            "source files never compiled as modules:\n{}",
            undeclared.join("\n")
        );
    }
}
