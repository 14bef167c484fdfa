// tests/watch_patterns.rs

use std::error::Error;

use siteflow::config::SiteConfig;
use siteflow::pipeline::watch_rules;
use siteflow::registry::SessionKind;
use siteflow::watch::compile_rules;

type TestResult = Result<(), Box<dyn Error>>;

fn tasks_matching(rel_path: &str) -> Result<Vec<String>, Box<dyn Error>> {
    let rules = watch_rules(&SiteConfig::default(), SessionKind::Reload);
    let compiled = compile_rules(&rules)?;
    Ok(compiled
        .iter()
        .filter(|r| r.matches(rel_path))
        .map(|r| r.task().to_string())
        .collect())
}

#[test]
fn css_changes_trigger_the_css_task() -> TestResult {
    assert_eq!(tasks_matching("src/css/main.css")?, vec!["css"]);
    assert_eq!(tasks_matching("src/css/vendor/reset.css")?, vec!["css"]);
    Ok(())
}

#[test]
fn js_changes_trigger_the_js_task() -> TestResult {
    assert_eq!(tasks_matching("src/js/app.js")?, vec!["js"]);
    // Non-JS files in the JS tree are ignored.
    assert!(tasks_matching("src/js/notes.txt")?.is_empty());
    Ok(())
}

#[test]
fn site_content_triggers_the_generator() -> TestResult {
    assert_eq!(tasks_matching("site/content/post.md")?, vec!["hugo"]);
    assert_eq!(tasks_matching("site/layouts/index.html")?, vec!["hugo"]);
    Ok(())
}

#[test]
fn any_font_file_triggers_the_fonts_task() -> TestResult {
    assert_eq!(tasks_matching("src/fonts/serif/bold.woff2")?, vec!["fonts"]);
    Ok(())
}

#[test]
fn unrelated_paths_match_nothing() -> TestResult {
    assert!(tasks_matching("README.md")?.is_empty());
    assert!(tasks_matching("dist/css/main.css")?.is_empty());
    Ok(())
}
