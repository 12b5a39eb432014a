//! Manifest checks: browser-only crates must stay out of the SSR build.

const MANIFEST: &str = include_str!("../Cargo.toml");

/// Crates used only inside `#[cfg(feature = "hydrate")]` code.
const HYDRATE_ONLY: &[&str] = &[
    "console_error_panic_hook",
    "console_log",
    "log",
    "wasm-bindgen",
    "gloo-timers",
    "uuid",
    "web-sys",
    "js-sys",
];

fn dependency_line(name: &str) -> Option<&'static str> {
    let prefix = format!("{name} = ");
    MANIFEST.lines().find(|l| l.starts_with(&prefix))
}

fn hydrate_feature() -> &'static str {
    let start = MANIFEST.find("hydrate = [").unwrap_or(MANIFEST.len());
    let rest = &MANIFEST[start..];
    &rest[..rest.find(']').map_or(rest.len(), |end| end + 1)]
}

#[test]
fn hydrate_only_crates_are_optional() {
    for name in HYDRATE_ONLY {
        let line = dependency_line(name).unwrap_or_else(|| panic!("{name} missing from [dependencies]"));
        assert!(line.contains("optional = true"), "{name} must be optional: {line}");
    }
}

#[test]
fn hydrate_feature_enables_them() {
    let feature = hydrate_feature();
    for name in HYDRATE_ONLY {
        assert!(feature.contains(&format!("\"dep:{name}\"")), "hydrate feature must enable {name}");
    }
}
