use std::fs;
use std::path::{Path, PathBuf};

fn rs_files(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if path.extension().and_then(|s| s.to_str()) == Some("rs") {
                out.push(path);
            }
        }
    }
    out.sort();
    out
}

fn rel(path: &Path) -> String {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let rel = path
        .strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string();
    rel.replace('\\', "/")
}

fn check(dir: &str, forbidden: &[&str]) -> Vec<String> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join(dir);
    let mut violations = Vec::new();

    for file in rs_files(&root) {
        let content = fs::read_to_string(&file).unwrap_or_default();
        for pattern in forbidden {
            if content.contains(pattern) {
                violations.push(format!(
                    "{} imports forbidden dependency `{}`",
                    rel(&file),
                    pattern
                ));
            }
        }
    }
    violations
}

#[test]
fn gauge_module_is_pure() {
    let violations = check("src/gauge", &["ratatui", "crossterm", "crate::ui", "tokio"]);
    assert!(
        violations.is_empty(),
        "Gauge layering violations:\n{}",
        violations.join("\n")
    );
}

#[test]
fn table_module_is_pure() {
    let violations = check("src/table", &["ratatui", "crossterm", "crate::ui", "tokio"]);
    assert!(
        violations.is_empty(),
        "Table layering violations:\n{}",
        violations.join("\n")
    );
}

#[test]
fn metrics_module_does_not_render() {
    let violations = check("src/metrics", &["ratatui", "crate::ui"]);
    assert!(
        violations.is_empty(),
        "Metrics layering violations:\n{}",
        violations.join("\n")
    );
}

#[test]
fn ui_module_does_not_spawn_collectors() {
    let violations = check(
        "src/ui",
        &["tokio::process", "std::process", "metrics::collector"],
    );
    assert!(
        violations.is_empty(),
        "UI/collector boundary violations:\n{}",
        violations.join("\n")
    );
}

#[test]
fn no_platform_specific_code() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let offenders: Vec<String> = rs_files(&root)
        .into_iter()
        .filter(|file| {
            fs::read_to_string(file)
                .unwrap_or_default()
                .contains("target_os")
        })
        .map(|file| rel(&file))
        .collect();

    assert!(
        offenders.is_empty(),
        "Unexpected target_os cfg usage:\n{}",
        offenders.join("\n")
    );
}
