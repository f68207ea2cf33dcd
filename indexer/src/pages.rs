//! Page sources: turn text already extracted from a document into an ordered
//! list of page strings.

use anyhow::{bail, Context, Result};
use std::cmp::Ordering;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Separator emitted between pages by PDF-to-text extraction.
pub const PAGE_BREAK: char = '\x0c';

pub fn read_pages(input: &Path) -> Result<Vec<String>> {
    if input.is_dir() {
        return read_page_dir(input);
    }
    if !input.is_file() {
        bail!("input {} does not exist", input.display());
    }
    match input.extension().and_then(|s| s.to_str()) {
        Some("json") => read_json(input),
        Some("jsonl") => read_jsonl(input),
        _ => read_text(input),
    }
}

fn read_json(file: &Path) -> Result<Vec<String>> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let pages: Vec<String> = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("{} must hold a JSON array of strings", file.display()))?;
    Ok(pages)
}

fn read_jsonl(file: &Path) -> Result<Vec<String>> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let mut pages = Vec::new();
    for (n, line) in BufReader::new(f).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let page: String = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: expected a JSON string", file.display(), n + 1))?;
        pages.push(page);
    }
    Ok(pages)
}

fn read_text(file: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    Ok(split_pages(&text))
}

/// Split extracted text on form feeds. A trailing form feed does not start a
/// new page.
pub fn split_pages(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let body = text.strip_suffix(PAGE_BREAK).unwrap_or(text);
    body.split(PAGE_BREAK).map(str::to_string).collect()
}

fn read_page_dir(dir: &Path) -> Result<Vec<String>> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("txt"))
        .collect();
    files.sort_by(|a, b| natural_cmp(&a.to_string_lossy(), &b.to_string_lossy()));
    files
        .iter()
        .map(|p| fs::read_to_string(p).with_context(|| format!("reading {}", p.display())))
        .collect()
}

/// Compare names so digit runs order by value: "page-2" < "page-10".
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (mut a, mut b) = (a, b);
    loop {
        match (a.chars().next(), b.chars().next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let (na, rest_a) = split_digits(a);
                let (nb, rest_b) = split_digits(b);
                let ord = compare_digit_runs(na, nb);
                if ord != Ordering::Equal {
                    return ord;
                }
                a = rest_a;
                b = rest_b;
            }
            (Some(x), Some(y)) => {
                if x != y {
                    return x.cmp(&y);
                }
                a = &a[x.len_utf8()..];
                b = &b[y.len_utf8()..];
            }
        }
    }
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

/// Numeric comparison of two digit strings of any length; ties on value fall
/// back to the shorter (less zero-padded) run first.
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let ta = a.trim_start_matches('0');
    let tb = b.trim_start_matches('0');
    ta.len()
        .cmp(&tb.len())
        .then_with(|| ta.cmp(tb))
        .then_with(|| a.len().cmp(&b.len()))
}
