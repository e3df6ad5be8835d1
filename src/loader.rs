//! Loading the data and issues files, with structured error display.
//!
//! Load failures carry line numbers and the offending source line so the
//! host can point at the problem instead of dumping a raw error string.

use std::fs;
use std::path::Path as FsPath;

use crate::issue::ValidationError;
use crate::value::Value;

/// Structured load error for better error display
#[derive(Debug, Clone)]
pub struct LoadError {
    pub message: String,
    pub line: Option<usize>,
    pub column: Option<usize>,
    pub context_line: Option<String>, // The actual line from the file
    pub filename: String,
}

impl LoadError {
    /// Create a LoadError from a serde_json error
    pub fn from_serde_error(e: &serde_json::Error, contents: &str, filename: &str) -> Self {
        let line = e.line();
        let column = e.column();

        // Extract the problematic line from the file contents
        let context_line = contents
            .lines()
            .nth(line.saturating_sub(1))
            .map(|s| s.to_string());

        // Classify the error for a friendlier message
        let message = match e.classify() {
            serde_json::error::Category::Io => format!("I/O error: {}", e),
            serde_json::error::Category::Syntax => {
                // Extract just the syntax error description
                let full = e.to_string();
                // serde_json format: "message at line X column Y"
                if let Some(idx) = full.find(" at line ") {
                    full[..idx].to_string()
                } else {
                    full
                }
            }
            serde_json::error::Category::Data => format!("Data error: {}", e),
            serde_json::error::Category::Eof => "Unexpected end of file".to_string(),
        };

        LoadError {
            message,
            line: Some(line),
            column: Some(column),
            context_line,
            filename: filename.to_string(),
        }
    }

    pub fn from_io_error(e: &std::io::Error, filename: &str) -> Self {
        LoadError {
            message: e.to_string(),
            line: None,
            column: None,
            context_line: None,
            filename: filename.to_string(),
        }
    }
}

/// The display name of a file path.
pub fn file_name(path: &FsPath) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Load the data file: arbitrary JSON into a `Value` tree.
pub fn load_data(path: &FsPath) -> Result<Value, LoadError> {
    let filename = file_name(path);
    let contents =
        fs::read_to_string(path).map_err(|e| LoadError::from_io_error(&e, &filename))?;
    let json: serde_json::Value = serde_json::from_str(&contents)
        .map_err(|e| LoadError::from_serde_error(&e, &contents, &filename))?;
    Ok(Value::from(json))
}

/// Load the issues file: a serialized validator error, either the bare
/// issue array or the `{"issues": [...]}` object form.
pub fn load_issues(path: &FsPath) -> Result<ValidationError, LoadError> {
    let filename = file_name(path);
    let contents =
        fs::read_to_string(path).map_err(|e| LoadError::from_io_error(&e, &filename))?;
    serde_json::from_str(&contents)
        .map_err(|e| LoadError::from_serde_error(&e, &contents, &filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_error_context() {
        let contents = "{\n  \"name\": \"Faultline\",\n  \"broken\": tru\n}";
        let err = serde_json::from_str::<serde_json::Value>(contents).unwrap_err();

        let load_error = LoadError::from_serde_error(&err, contents, "data.json");
        assert_eq!(load_error.filename, "data.json");
        assert_eq!(load_error.line, Some(3));
        assert_eq!(
            load_error.context_line.as_deref(),
            Some("  \"broken\": tru")
        );
        // The "at line X column Y" suffix is stripped
        assert!(!load_error.message.contains(" at line "));
    }

    #[test]
    fn test_missing_file() {
        let result = load_data(FsPath::new("/nonexistent/data.json"));
        let err = result.unwrap_err();
        assert_eq!(err.filename, "data.json");
        assert_eq!(err.line, None);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(FsPath::new("/tmp/data.json")), "data.json");
        assert_eq!(file_name(FsPath::new("/")), "unknown");
    }
}
