//! End-to-end tests running the compiled `annuaire` binary against the
//! fixture content directory.
//!
//! Run with: cargo test --test cli_build

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content")
}

fn annuaire(args: &[&str], source: &Path, work: &Path) -> Output {
    let out = Command::new(env!("CARGO_BIN_EXE_annuaire"))
        .arg("--source")
        .arg(source)
        .arg("--output")
        .arg(work.join("dist"))
        .arg("--temp-dir")
        .arg(work.join("temp"))
        .args(args)
        .output()
        .unwrap();
    assert!(
        out.status.success(),
        "annuaire {args:?} failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    out
}

fn stdout(out: &Output) -> String {
    String::from_utf8(out.stdout.clone()).unwrap()
}

#[test]
fn build_writes_site() {
    let work = TempDir::new().unwrap();
    let out = annuaire(&["build"], &fixtures(), work.path());
    let text = stdout(&out);
    assert!(text.contains("==> Build complete"));
    assert!(text.contains("Generated 7 category pages"));

    let dist = work.path().join("dist");
    let expected = [
        "commerces-alimentation-boulangeries",
        "commerces-vetements",
        "restauration-snacks",
        "restauration-restaurants-poisson",
        "restauration-restaurants-cuisine-francaise",
        "services-sante",
        "services-sante-bien-etre-massages",
    ];
    for slug in expected {
        assert!(
            dist.join(format!("pages/{slug}.html")).exists(),
            "missing page {slug}"
        );
    }
    assert!(dist.join("index.html").exists());
    assert!(dist.join("favicon.svg").exists());
    assert!(work.path().join("temp/manifest.json").exists());

    let page = std::fs::read_to_string(dist.join("pages/commerces-alimentation-boulangeries.html"))
        .unwrap();
    assert!(page.contains("<title>Boulangeries - Moorea Life</title>"));
    assert!(page.contains("Commerces &gt; Alimentation &gt; Boulangeries"));
    assert!(page.contains(r#"data-href="https://www.facebook.com/chez.tama""#));
    assert!(page.contains(r#"data-href="https://facebook.com/boulangeriemaharepa""#));
    assert!(page.contains("© 2024 Moorea Life - Annuaire local"));
}

#[test]
fn second_build_leaves_pages_unchanged() {
    let work = TempDir::new().unwrap();
    annuaire(&["build"], &fixtures(), work.path());
    let out = annuaire(&["build"], &fixtures(), work.path());
    assert!(stdout(&out).contains("0 written, 8 unchanged, 0 removed"));

    let out = annuaire(&["build", "--no-cache"], &fixtures(), work.path());
    assert!(stdout(&out).contains("8 written, 0 unchanged"));
}

#[test]
fn render_by_slug_and_query() {
    let work = TempDir::new().unwrap();
    let out = annuaire(&["render", "--cat", "commerces-vetements"], &fixtures(), work.path());
    let html = stdout(&out);
    assert!(html.contains("Pareo Shop"));
    assert!(html.contains(r#"href="category.html?cat=restauration-snacks""#));

    let out = annuaire(
        &["render", "--query", "?cat=services-sante-bien-etre-massages"],
        &fixtures(),
        work.path(),
    );
    assert!(stdout(&out).contains("Spa Tiare"));
}

#[test]
fn render_placeholder_states() {
    let work = TempDir::new().unwrap();
    let none = stdout(&annuaire(&["render"], &fixtures(), work.path()));
    assert!(none.contains("Aucune catégorie spécifiée"));

    let missing = stdout(&annuaire(&["render", "--cat", "nope"], &fixtures(), work.path()));
    assert!(missing.contains("Catégorie introuvable"));
}

#[test]
fn check_summarizes_catalog() {
    let work = TempDir::new().unwrap();
    let text = stdout(&annuaire(&["check"], &fixtures(), work.path()));
    assert!(text.contains("Catalog annuaire.csv: 10 entries in 4 top categories"));
    assert!(text.contains("7 category pages to generate"));
    assert!(text.contains("==> Content is valid"));
}

#[test]
fn gen_config_prints_stock_file() {
    let work = TempDir::new().unwrap();
    let text = stdout(&annuaire(&["gen-config"], &fixtures(), work.path()));
    assert!(text.contains("catalog = \"annuaire.csv\""));
    assert!(text.contains("[embed]"));
}
