/*!
 * End-to-end tests for repo-export
 */

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use indicatif::ProgressBar;
use tempfile::tempdir;

use crate::collector::Collector;
use crate::config::Config;
use crate::exporter::Exporter;
use crate::tree::{ChildIndex, TreeRenderer};

// a.txt without trailing newline, an excluded dependency, a nested file
fn setup_scenario_directory() -> io::Result<tempfile::TempDir> {
    let temp_dir = tempdir()?;

    fs::write(temp_dir.path().join("a.txt"), "hi")?;

    fs::create_dir(temp_dir.path().join("node_modules"))?;
    fs::write(temp_dir.path().join("node_modules").join("x.js"), "ignored")?;

    fs::create_dir(temp_dir.path().join("sub"))?;
    fs::write(temp_dir.path().join("sub").join("b.txt"), "line1\n")?;

    Ok(temp_dir)
}

// A larger tree with every excluded name at several depths
fn setup_project_directory() -> io::Result<tempfile::TempDir> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();

    for dir in [
        "src/components",
        "src/node_modules/lib",
        "web/.next/server",
        "web/dist",
        ".git/refs",
        "docs",
        "vendor/node_modules",
        "empty/nested",
    ] {
        fs::create_dir_all(root.join(dir))?;
    }

    let mut main = File::create(root.join("src").join("main.ts"))?;
    writeln!(main, "console.log('main');")?;
    fs::write(root.join("src/components/Button.tsx"), "export {}\n")?;
    fs::write(root.join("src/node_modules/lib/index.js"), "nope")?;
    fs::write(root.join("web/.next/server/page.js"), "nope")?;
    fs::write(root.join("web/dist/app.js"), "nope")?;
    fs::write(root.join("web/index.html"), "<html></html>")?;
    fs::write(root.join(".git/refs/HEAD"), "nope")?;
    fs::write(root.join("vendor/node_modules/x.js"), "nope")?;
    fs::write(root.join("docs/Guide.md"), "# Guide\r\nline\r\n")?;
    fs::write(root.join("README.md"), "readme\n")?;
    fs::write(root.join("package.json"), "{}\n")?;

    Ok(temp_dir)
}

fn export(dir: &Path) -> io::Result<String> {
    let exporter = Exporter::new(Config::for_dir(dir), ProgressBar::hidden());
    let summary = exporter.run()?;
    fs::read_to_string(summary.output_file)
}

#[test]
fn test_scenario_document() -> io::Result<()> {
    let temp_dir = setup_scenario_directory()?;
    let root = fs::canonicalize(temp_dir.path())?;

    let document = export(temp_dir.path())?;

    let expected = format!(
        "REPO TREE\n\
         ========\n\
         {}\n\
         ├── sub\n\
         │   └── b.txt\n\
         └── a.txt\n\
         \n\
         FILE CONTENTS (latest)\n\
         ======================\n\
         \n\
         --- FILE: a.txt ---\n\
         hi\n\
         \n\
         --- FILE: sub/b.txt ---\n\
         line1\n\
         \n",
        root.display()
    );
    assert_eq!(document, expected);
    assert!(!document.contains("node_modules"));
    assert!(!document.contains("ignored"));

    Ok(())
}

#[test]
fn test_exclusion_invariant() -> io::Result<()> {
    let temp_dir = setup_project_directory()?;
    let root = fs::canonicalize(temp_dir.path())?;

    let files = Collector::new(&root).collect()?;
    for file in &files {
        let rel = file.strip_prefix(&root).unwrap();
        for part in crate::utils::segments(rel) {
            assert!(!crate::EXCLUDED_DIRS.contains(&part.as_str()), "{:?}", rel);
        }
    }

    let index = ChildIndex::build(&root, &files);
    let tree = TreeRenderer::default().render(&index)[1..].join("\n");
    for name in crate::EXCLUDED_DIRS {
        assert!(!tree.contains(name), "{} in tree", name);
    }

    let document = export(temp_dir.path())?;
    assert!(!document.contains("nope"));

    Ok(())
}

#[test]
fn test_every_file_has_exactly_one_section() -> io::Result<()> {
    let temp_dir = setup_project_directory()?;

    let document = export(temp_dir.path())?;

    for rel in [
        "README.md",
        "docs/Guide.md",
        "package.json",
        "src/components/Button.tsx",
        "src/main.ts",
        "web/index.html",
    ] {
        let delimiter = format!("--- FILE: {} ---\n", rel);
        assert_eq!(document.matches(&delimiter).count(), 1, "{}", rel);
    }
    assert_eq!(document.matches("--- FILE: ").count(), 6);

    Ok(())
}

#[test]
fn test_tree_groups_directories_first() -> io::Result<()> {
    let temp_dir = setup_project_directory()?;

    let document = export(temp_dir.path())?;
    let tree: Vec<&str> = document
        .lines()
        .skip(3)
        .take_while(|line| !line.is_empty())
        .collect();

    assert_eq!(
        tree,
        vec![
            "├── docs",
            "│   └── Guide.md",
            "├── src",
            "│   ├── components",
            "│   │   └── Button.tsx",
            "│   └── main.ts",
            "├── web",
            "│   └── index.html",
            "├── package.json",
            "└── README.md",
        ]
    );
    for name in ["vendor", "empty", "nested"] {
        assert!(!tree.iter().any(|line| line.ends_with(name)), "{} in tree", name);
    }

    Ok(())
}

#[test]
fn test_rerun_is_byte_identical() -> io::Result<()> {
    let temp_dir = setup_project_directory()?;

    let first = export(temp_dir.path())?;
    let second = export(temp_dir.path())?;

    assert_eq!(first, second);
    assert!(!second.contains("--- FILE: _repo_export.txt ---"));

    Ok(())
}

#[test]
fn test_rerun_with_non_canonical_output_path() -> io::Result<()> {
    let temp_dir = setup_project_directory()?;
    let mut config = Config::for_dir(temp_dir.path());
    config.output_file = ["src", "..", "_repo_export.txt"].iter().collect();

    let run = |config: &Config| -> io::Result<String> {
        let summary = Exporter::new(config.clone(), ProgressBar::hidden()).run()?;
        fs::read_to_string(summary.output_file)
    };
    let first = run(&config)?;
    let second = run(&config)?;

    assert_eq!(first, second);
    assert!(!second.contains("_repo_export.txt"));

    Ok(())
}

#[test]
fn test_crlf_is_normalized() -> io::Result<()> {
    let temp_dir = setup_project_directory()?;

    let document = export(temp_dir.path())?;

    assert!(document.contains("--- FILE: docs/Guide.md ---\n# Guide\nline\n\n"));
    assert!(!document.contains('\r'));

    Ok(())
}

#[test]
fn test_fallback_decoding_in_document() -> io::Result<()> {
    let temp_dir = tempdir()?;
    fs::write(temp_dir.path().join("latin1.txt"), [b'r', 0xe9, b's', b'u', b'm', 0xe9])?;

    let document = export(temp_dir.path())?;

    assert!(document.contains("--- FILE: latin1.txt ---\nr\u{e9}sum\u{e9}\n\n"));
    assert!(!document.contains("[Error reading file"));

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_does_not_abort() -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = tempdir()?;
    let locked = temp_dir.path().join("locked.txt");
    fs::write(&locked, "secret")?;
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;
    fs::write(temp_dir.path().join("open.txt"), "visible\n")?;

    // Root can read anything, so the placeholder only shows up otherwise
    let readable = fs::read(&locked).is_ok();
    let document = export(temp_dir.path())?;

    assert!(document.contains("--- FILE: open.txt ---\nvisible\n\n"));
    if readable {
        assert!(document.contains("--- FILE: locked.txt ---\nsecret\n\n"));
    } else {
        assert!(document.contains("--- FILE: locked.txt ---\n[Error reading file: "));
    }

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644))?;
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_broken_symlink_gets_placeholder_section() -> io::Result<()> {
    let temp_dir = tempdir()?;
    fs::write(temp_dir.path().join("a.txt"), "a\n")?;
    std::os::unix::fs::symlink(temp_dir.path().join("missing"), temp_dir.path().join("broken"))?;

    let document = export(temp_dir.path())?;

    assert!(document.contains("\n├── a.txt\n└── broken\n\n"));
    assert!(document.contains("--- FILE: broken ---\n[Error reading file: "));
    assert!(document.contains("--- FILE: a.txt ---\na\n\n"));

    Ok(())
}

#[test]
fn test_export_of_empty_directory() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let root = fs::canonicalize(temp_dir.path())?;

    let document = export(temp_dir.path())?;

    assert_eq!(
        document,
        format!(
            "REPO TREE\n========\n{}\n\nFILE CONTENTS (latest)\n======================\n\n",
            root.display()
        )
    );

    Ok(())
}
