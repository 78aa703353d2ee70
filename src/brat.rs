//! brat standoff files: `<name>.txt` holds the text, `<name>.ann` the annotations.
//!
//! Only text-bound annotations (`T` lines) are read. Fragment annotations, which brat writes
//! for spans crossing a line break, are skipped.

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::annotation::Annotation;
use crate::document::SurrogateDocument;
use crate::error::BratError;

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> BratError + '_ {
    move |source| BratError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Stems of every `.ann` file in `dir`, sorted.
pub fn document_names(dir: &Path) -> Result<Vec<String>, BratError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error(dir))? {
        let path = entry.map_err(io_error(dir))?.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("ann") {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
            names.push(stem.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Parses the contents of an `.ann` file. Every annotation gets `doc_id` as its document id.
pub fn parse_annotations(content: &str, doc_id: &str) -> Vec<Annotation> {
    let mut annotations = Vec::new();

    for line in content.lines() {
        if !line.starts_with('T') {
            continue;
        }

        match parse_line(line, doc_id) {
            Some(annotation) => annotations.push(annotation),
            None => warn!(
                document = doc_id,
                line,
                "skipping unsupported brat annotation (fragments are not supported)"
            ),
        }
    }

    annotations
}

fn parse_line(line: &str, doc_id: &str) -> Option<Annotation> {
    let mut fields = line.splitn(3, '\t');
    let ann_id = fields.next()?;
    let mut span = fields.next()?.split(' ');
    let text = fields.next()?;

    let tag = span.next()?;
    let start = span.next()?.parse().ok()?;
    let end = span.next()?.parse().ok()?;
    if span.next().is_some() {
        return None;
    }

    Some(
        Annotation::new(text, start, end, tag)
            .with_doc_id(doc_id)
            .with_ann_id(ann_id),
    )
}

/// Reads a text file byte for byte, so offsets match the `.ann` file.
pub fn load_text(path: &Path) -> Result<String, BratError> {
    fs::read_to_string(path).map_err(io_error(path))
}

pub fn load_annotations(path: &Path, doc_id: &str) -> Result<Vec<Annotation>, BratError> {
    let content = fs::read_to_string(path).map_err(io_error(path))?;
    Ok(parse_annotations(&content, doc_id))
}

/// Loads `<name>.txt` and `<name>.ann` from `dir` and checks the annotations against the text.
pub fn load_document(dir: &Path, name: &str) -> Result<SurrogateDocument, BratError> {
    let text = load_text(&dir.join(format!("{}.txt", name)))?;
    let annotations = load_annotations(&dir.join(format!("{}.ann", name)), name)?;
    Ok(SurrogateDocument::new(name, text, annotations)?)
}

pub fn format_annotations(annotations: &[Annotation]) -> String {
    annotations
        .iter()
        .map(|a| format!("{}\t{} {} {}\t{}\n", a.ann_id, a.tag, a.start, a.end, a.text))
        .collect()
}

pub fn write_document(
    dir: &Path,
    name: &str,
    text: &str,
    annotations: &[Annotation],
) -> Result<(), BratError> {
    let ann_path = dir.join(format!("{}.ann", name));
    fs::write(&ann_path, format_annotations(annotations)).map_err(io_error(&ann_path))?;

    let txt_path = dir.join(format!("{}.txt", name));
    fs::write(&txt_path, text).map_err(io_error(&txt_path))
}

/// Copies both files of a document unchanged.
pub fn copy_document(from: &Path, to: &Path, name: &str) -> Result<(), BratError> {
    for extension in ["txt", "ann"] {
        let file = format!("{}.{}", name, extension);
        let source = from.join(&file);
        fs::copy(&source, to.join(&file)).map_err(io_error(&source))?;
    }
    Ok(())
}
