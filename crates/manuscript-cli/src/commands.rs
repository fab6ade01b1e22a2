//! Subcommand implementations.
//!
//! Each command opens the manuscript, asks the core for the chapters it
//! needs, and prints to stdout. Errors are flattened to strings for `main`.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use clap::ValueEnum;
use manuscript_core::render::{PlainText, Renderer};
use manuscript_core::{Chapter, Manuscript};
use tracing::{debug, info};

use crate::config::{BookConfig, PublishConfig};
use crate::json;

fn open(file: &Path) -> Result<Manuscript, String> {
    Manuscript::open(file).map_err(|e| e.to_string())
}

/// Format `n` with comma thousands separators: `12345` -> `"12,345"`.
pub fn format_number(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// =============================================================================
// cat
// =============================================================================

pub fn cat(file: &Path, selectors: &[String], config: &BookConfig) -> Result<(), String> {
    let ms = open(file)?;
    let chapters = ms.chapters(selectors).map_err(|e| e.to_string())?;

    let stdout = io::stdout();
    let sink = PlainText::new(BufWriter::new(stdout.lock())).with_indent(config.render.indent.as_str());

    Renderer::new(sink)
        .with_title_page(config.render.title_page)
        .render(&ms, &chapters)
        .map_err(|e| e.to_string())
}

// =============================================================================
// ls
// =============================================================================

pub fn ls(file: &Path, number: bool, word_count: bool) -> Result<(), String> {
    let ms = open(file)?;
    let chapters = ms.all_chapters();
    let titles: Vec<_> = chapters.iter().map(Chapter::title).collect();

    let pad = titles.iter().map(|t| t.chars().count()).max().unwrap_or(0);

    for (ch, title) in chapters.iter().zip(&titles) {
        let mut line = String::new();

        if number {
            line.push_str(&format!("{:3} ", ch.count()));
        }

        line.push_str(title);

        if word_count {
            line.push_str(&" ".repeat(pad - title.chars().count()));
            line.push_str(&format!(" {:>6}", format_number(ch.word_count())));
        }
        println!("{}", line);
    }
    Ok(())
}

// =============================================================================
// wc
// =============================================================================

pub fn wc(file: &Path, chapter: Option<&str>) -> Result<(), String> {
    let ms = open(file)?;

    if let Some(selector) = chapter {
        let chapters = ms.chapters(&[selector]).map_err(|e| e.to_string())?;
        let words: usize = chapters.iter().map(Chapter::word_count).sum();

        println!("{}", format_number(words));
        return Ok(());
    }

    let average = ms.average_chapter_word_count().map_err(|e| e.to_string())?;

    println!("Average chapter word count: {}", format_number(average));
    println!("Manuscript word count:      {}", format_number(ms.word_count()));
    Ok(())
}

// =============================================================================
// pub
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Normalized mom markup
    Mom,
    /// PDF typeset by groff
    Pdf,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Mom => "mom",
            Format::Pdf => "pdf",
        }
    }
}

#[derive(Debug)]
pub struct Publish<'a> {
    pub file: &'a Path,
    pub format: Format,
    pub words: Option<usize>,
    pub output: Option<PathBuf>,
    pub selectors: &'a [String],
}

pub fn publish(args: Publish<'_>, config: &BookConfig) -> Result<(), String> {
    let mut ms = open(args.file)?;

    let mut name = args
        .file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "manuscript".to_string());

    if !args.selectors.is_empty() {
        let counts: Vec<usize> = ms
            .chapters(args.selectors)
            .map_err(|e| e.to_string())?
            .iter()
            .map(Chapter::count)
            .collect();

        name.push_str(&chapter_suffix(&counts));
        ms = ms.select(args.selectors).map_err(|e| e.to_string())?;
    }

    if let Some(words) = args.words.filter(|&w| w > 0) {
        ms = ms.truncate_words(words);
        name.push_str(&format!("-first-{}-words", words));
    }

    // A trailing COLLATE typesets as an extra blank page.
    let ms = ms.without_trailing_collate();

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{}.{}", name, args.format.extension())));

    match args.format {
        Format::Mom => write_markup(&ms, &output)?,
        Format::Pdf => typeset(&ms, &output, &config.publish)?,
    }

    info!(output = %output.display(), "published manuscript");
    println!("{}", output.display());
    Ok(())
}

fn chapter_suffix(counts: &[usize]) -> String {
    match counts {
        [only] => format!("-chapter-{}", only),
        [first, .., last] => format!("-chapters-{}-to-{}", first, last),
        [] => String::new(),
    }
}

fn write_markup(ms: &Manuscript, output: &Path) -> Result<(), String> {
    let file = File::create(output)
        .map_err(|e| format!("failed to create '{}': {}", output.display(), e))?;

    ms.write_to(BufWriter::new(file)).map_err(|e| e.to_string())
}

fn typeset(ms: &Manuscript, output: &Path, publish: &PublishConfig) -> Result<(), String> {
    let mut markup = tempfile::Builder::new()
        .suffix(".mom")
        .tempfile()
        .map_err(|e| format!("failed to create temporary file: {}", e))?;

    ms.write_to(markup.as_file_mut()).map_err(|e| e.to_string())?;

    let pdf = File::create(output)
        .map_err(|e| format!("failed to create '{}': {}", output.display(), e))?;

    debug!(command = %publish.groff, args = ?publish.groff_args, "running typesetter");

    let status = Command::new(&publish.groff)
        .args(&publish.groff_args)
        .arg(markup.path())
        .stdin(Stdio::null())
        .stdout(pdf)
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| format!("failed to run '{}': {}", publish.groff, e))?;

    if !status.success() {
        return Err(format!("{} exited with {}", publish.groff, status));
    }
    Ok(())
}

// =============================================================================
// tokens
// =============================================================================

pub fn tokens(file: &Path, as_json: bool) -> Result<(), String> {
    let ms = open(file)?;

    if as_json {
        let doc = json::to_json(&ms).map_err(|e| e.to_string())?;
        println!("{}", doc);
        return Ok(());
    }

    for token in ms.tokens() {
        println!("{}", token);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_thousands() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn names_chapter_ranges() {
        assert_eq!(chapter_suffix(&[3]), "-chapter-3");
        assert_eq!(chapter_suffix(&[2, 4, 7]), "-chapters-2-to-7");
        assert_eq!(chapter_suffix(&[]), "");
    }
}
