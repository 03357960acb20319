use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use super::model::{CellValue, Column, ColumnKind, Dataset};

/// Tokens read as a missing value, as Pandas does by default.
const NA_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "#N/A", "<NA>",
];

// ---------------------------------------------------------------------------
// Upload payload and errors
// ---------------------------------------------------------------------------

/// One uploaded file, as the upload widget hands it over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Data URI: `<mime-type>;base64,<payload>`.
    pub contents: String,
    pub filename: String,
}

impl Upload {
    /// Wrap raw file bytes in the data-URI form used for every upload.
    pub fn from_bytes(filename: impl Into<String>, mime: &str, bytes: &[u8]) -> Self {
        Upload {
            contents: encode_data_uri(mime, bytes),
            filename: filename.into(),
        }
    }
}

/// Why an upload could not become a dataset.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("the upload is not a data URI (missing ',' after the MIME prefix)")]
    NotDataUri,

    #[error("the upload payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("the file is not UTF-8 encoded text: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("the file could not be read as CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: expected {expected} fields, saw {found}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("the file has no header row")]
    NoColumns,

    #[error("the file has a header but no data rows")]
    NoRows,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Decode an upload and parse it into a dataset.
pub fn load_upload(upload: &Upload) -> Result<Dataset, UploadError> {
    let (_mime, bytes) = decode_data_uri(&upload.contents)?;
    let text = String::from_utf8(bytes)?;
    parse_csv(&text, &upload.filename)
}

/// Read a file from disk into an [`Upload`].
pub fn read_upload(path: &Path) -> Result<Upload> {
    let bytes =
        std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    let mime = mime_for_name(&filename);
    Ok(Upload::from_bytes(filename, mime, &bytes))
}

/// Guess a MIME type from the file extension.
pub fn mime_for_name(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => "text/csv",
        "tsv" => "text/tab-separated-values",
        "txt" => "text/plain",
        "json" => "application/json",
        _ => "application/octet-stream",
    }
}

// ---------------------------------------------------------------------------
// Data URI codec
// ---------------------------------------------------------------------------

pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Split `<mime>;base64,<payload>` and decode the payload.
/// Returns the MIME prefix (without `data:` and `;base64`) and the bytes.
pub fn decode_data_uri(contents: &str) -> Result<(String, Vec<u8>), UploadError> {
    let (prefix, payload) = contents.split_once(',').ok_or(UploadError::NotDataUri)?;

    let mime = prefix.strip_prefix("data:").unwrap_or(prefix);
    let mime = mime.strip_suffix(";base64").unwrap_or(mime).to_string();

    let payload: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD.decode(payload)?;
    Ok((mime, bytes))
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Parse CSV text with a header row into a typed [`Dataset`].
pub fn parse_csv(text: &str, source: &str) -> Result<Dataset, UploadError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(UploadError::NoColumns);
    }
    let names = normalise_headers(headers.iter());
    let width = names.len();

    let mut raw: Vec<Vec<String>> = vec![Vec::new(); width];
    for result in reader.records() {
        let record = result?;
        if record.len() > width {
            return Err(UploadError::RaggedRow {
                line: record.position().map_or(0, |p| p.line()),
                expected: width,
                found: record.len(),
            });
        }
        for (col, cells) in raw.iter_mut().enumerate() {
            // Short rows are padded with missing values.
            cells.push(record.get(col).unwrap_or("").to_string());
        }
    }

    if raw[0].is_empty() {
        return Err(UploadError::NoRows);
    }

    let columns = names
        .into_iter()
        .zip(raw)
        .map(|(name, cells)| infer_column(name, cells))
        .collect();

    Ok(Dataset::new(source, columns))
}

/// Name blank headers `Unnamed: {i}` and suffix duplicates with `.1`, `.2`, …
fn normalise_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut names = Vec::new();

    for (i, header) in raw.enumerate() {
        let base = if header.trim().is_empty() {
            format!("Unnamed: {i}")
        } else {
            header.to_string()
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{base}.{suffix}");
            suffix += 1;
        }
        seen.insert(name.clone());
        names.push(name);
    }
    names
}

fn is_na(s: &str) -> bool {
    NA_TOKENS.contains(&s.trim())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim() {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

/// Pick the narrowest type every non-missing cell fits:
/// integer, then float, then boolean, falling back to text.
fn infer_column(name: String, raw: Vec<String>) -> Column {
    let present = || raw.iter().filter(|s| !is_na(s)).map(|s| s.trim());

    let kind;
    let cells: Vec<CellValue>;

    if present().all(|s| s.parse::<i64>().is_ok()) {
        kind = ColumnKind::Numeric;
        cells = raw
            .iter()
            .map(|s| match s.trim().parse::<i64>() {
                Ok(i) if !is_na(s) => CellValue::Integer(i),
                _ => CellValue::Null,
            })
            .collect();
    } else if present().all(|s| s.parse::<f64>().is_ok()) {
        kind = ColumnKind::Numeric;
        cells = raw
            .iter()
            .map(|s| match s.trim().parse::<f64>() {
                Ok(v) if !is_na(s) => CellValue::Float(v),
                _ => CellValue::Null,
            })
            .collect();
    } else if present().all(|s| parse_bool(s).is_some()) {
        kind = ColumnKind::Boolean;
        cells = raw
            .iter()
            .map(|s| parse_bool(s).map_or(CellValue::Null, CellValue::Bool))
            .collect();
    } else {
        kind = ColumnKind::Text;
        cells = raw
            .into_iter()
            .map(|s| {
                if is_na(&s) {
                    CellValue::Null
                } else {
                    CellValue::Text(s)
                }
            })
            .collect();
    }

    Column { name, kind, cells }
}
