use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("manuscript-core")
        .join("testdata")
        .join("dracula.mom")
}

#[test]
fn cat_prints_all_chapters() {
    let dir = tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("book");
    cmd.current_dir(dir.path()).arg("cat").arg(fixture_path());

    cmd.assert().success().stdout(
        predicate::str::starts_with("Chapter I\nJONATHAN HARKER'S JOURNAL\n\nKept in shorthand.\n")
            .and(predicate::str::contains(
                "\n        The impression I had was that we were leaving the West.\n",
            ))
            .and(predicate::str::contains("Chapter II\n")),
    );
}

#[test]
fn cat_selects_chapter_by_ordinal() {
    let dir = tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("book");
    cmd.current_dir(dir.path())
        .arg("cat")
        .arg(fixture_path())
        .arg("2");

    cmd.assert().success().stdout(
        predicate::str::starts_with("Chapter II\n")
            .and(predicate::str::contains("Kept in shorthand").not()),
    );
}

#[test]
fn cat_unknown_chapter_fails() {
    let dir = tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("book");
    cmd.current_dir(dir.path())
        .arg("cat")
        .arg(fixture_path())
        .arg("9");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("error: no such chapter: 9"));
}

#[test]
fn cat_title_page_from_config() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("custom.toml");
    fs::write(&config, "[render]\ntitle_page = true\nindent = \"\\t\"\n").unwrap();

    let mut cmd = cargo_bin_cmd!("book");
    cmd.current_dir(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("cat")
        .arg(fixture_path());

    cmd.assert().success().stdout(
        predicate::str::starts_with("DRACULA\nby\nBram Stoker\n\nChapter I\n")
            .and(predicate::str::contains("\n\tThe impression")),
    );
}

#[test]
fn project_config_is_picked_up() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("book.toml"), "[render]\ntitle_page = true\n").unwrap();

    let mut cmd = cargo_bin_cmd!("book");
    cmd.current_dir(dir.path()).arg("cat").arg(fixture_path());

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("DRACULA\n"));
}

#[test]
fn ls_lists_titles() {
    let mut cmd = cargo_bin_cmd!("book");
    cmd.arg("ls").arg(fixture_path());

    cmd.assert().success().stdout(
        "JONATHAN HARKER'S JOURNAL\nJONATHAN HARKER'S JOURNAL--continued\n",
    );
}

#[test]
fn ls_with_numbers_and_word_counts() {
    let mut cmd = cargo_bin_cmd!("book");
    cmd.arg("ls").arg("-n").arg("--wc").arg(fixture_path());

    // Titles are padded to the longest one (36 characters).
    let first = format!("  1 JONATHAN HARKER'S JOURNAL{}{:>7}\n", " ".repeat(11), "30");
    let second = format!("  2 JONATHAN HARKER'S JOURNAL--continued{:>7}\n", "28");

    cmd.assert().success().stdout(first + &second);
}

#[test]
fn wc_reports_totals() {
    let mut cmd = cargo_bin_cmd!("book");
    cmd.arg("wc").arg(fixture_path());

    cmd.assert().success().stdout(
        "Average chapter word count: 29\nManuscript word count:      58\n",
    );
}

#[test]
fn wc_single_chapter_by_title() {
    let mut cmd = cargo_bin_cmd!("book");
    cmd.arg("wc")
        .arg(fixture_path())
        .arg("JONATHAN HARKER'S JOURNAL");

    cmd.assert().success().stdout("30\n");
}

#[test]
fn wc_without_chapters_fails() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("empty.mom");
    fs::write(&file, ".DOCTITLE \"Empty\"\nNo chapters here.\n").unwrap();

    let mut cmd = cargo_bin_cmd!("book");
    cmd.current_dir(dir.path()).arg("wc").arg(&file);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("manuscript has no chapters"));
}

#[test]
fn missing_file_fails() {
    let mut cmd = cargo_bin_cmd!("book");
    cmd.arg("ls").arg("no-such-manuscript.mom");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to read 'no-such-manuscript.mom'"));
}

#[test]
fn pub_mom_single_chapter() {
    let dir = tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("book");
    cmd.current_dir(dir.path())
        .arg("pub")
        .arg("-f")
        .arg("mom")
        .arg(fixture_path())
        .arg("2");

    cmd.assert().success().stdout("dracula-chapter-2.mom\n");

    let published = fs::read_to_string(dir.path().join("dracula-chapter-2.mom")).unwrap();
    assert!(published.starts_with(".TITLE \"DRACULA\"\n.DOCTITLE \"DRACULA\"\n"));
    assert!(published.contains(".CHAPTER \"II\"\n"));
    assert!(!published.contains("JONATHAN HARKER'S JOURNAL\"\n"));
    assert!(!published.ends_with(".COLLATE\n"));
}

#[test]
fn pub_mom_word_budget() {
    let dir = tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("book");
    cmd.current_dir(dir.path())
        .arg("pub")
        .arg("-f")
        .arg("mom")
        .arg("--wc")
        .arg("10")
        .arg(fixture_path())
        .arg("1")
        .arg("2");

    cmd.assert()
        .success()
        .stdout("dracula-chapters-1-to-2-first-10-words.mom\n");

    let published =
        fs::read_to_string(dir.path().join("dracula-chapters-1-to-2-first-10-words.mom")).unwrap();
    assert!(published.contains("Kept in shorthand."));
    assert!(!published.contains("The impression"));
}

#[test]
fn tokens_dumps_lines() {
    let mut cmd = cargo_bin_cmd!("book");
    cmd.arg("tokens").arg(fixture_path());

    cmd.assert().success().stdout(
        predicate::str::starts_with(".TITLE \"DRACULA\"\n")
            .and(predicate::str::contains("\n.EPIGRAPH \"OFF\"\n")),
    );
}

#[test]
fn tokens_as_json() {
    let mut cmd = cargo_bin_cmd!("book");
    cmd.arg("tokens").arg("--json").arg(fixture_path());

    cmd.assert().success().stdout(
        predicate::str::contains("\"author\": \"Bram Stoker\"")
            .and(predicate::str::contains("\"type\": \"Macro\""))
            .and(predicate::str::contains("\"word_count\": 28")),
    );
}
