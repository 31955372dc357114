//! Input Parsing
//!
//! Every format is reduced to a [`SeriesInput`]; labels only come from CSV.

use anyhow::Context;
use clap::ValueEnum;
use hampel::{HampelError, LabeledSeries, RawParam, SeriesInput, Validator};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// One number per line
    #[default]
    Lines,
    /// `label,value` rows, optional header
    Csv,
    /// JSON array of numbers
    Json,
}

/// Parse `text` in the given format
pub fn parse(text: &str, format: InputFormat) -> anyhow::Result<SeriesInput<String, f64>> {
    let input = match format {
        InputFormat::Lines => SeriesInput::Values(parse_lines(text)?),
        InputFormat::Csv => SeriesInput::Labeled(parse_csv(text)?),
        InputFormat::Json => SeriesInput::Values(parse_json(text)?),
    };
    Ok(input)
}

fn data_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

fn parse_lines(text: &str) -> Result<Vec<f64>, HampelError> {
    let raw: Vec<RawParam> = data_lines(text).map(RawParam::parse).collect();
    Validator.values(&raw)
}

fn parse_csv(text: &str) -> anyhow::Result<LabeledSeries<String, f64>> {
    let mut labels = Vec::new();
    let mut raw = Vec::new();

    for (row, line) in data_lines(text).enumerate() {
        let (label, value) = match line.split_once(',') {
            Some((label, value)) => (label.trim(), value.trim()),
            None => (line, ""),
        };
        let value = RawParam::parse(value);
        if row == 0 && !matches!(value, RawParam::Int(_) | RawParam::Float(_)) {
            debug!(header = line, "Skipping CSV header");
            continue;
        }
        labels.push(label.to_string());
        raw.push(value);
    }

    let values = Validator.values(&raw)?;
    Ok(LabeledSeries::new(labels, values)?)
}

fn parse_json(text: &str) -> anyhow::Result<Vec<f64>> {
    let raw: Vec<RawParam> = serde_json::from_str(text).context("Input is not a JSON array")?;
    Ok(Validator.values(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(input: SeriesInput<String, f64>) -> (Vec<f64>, Option<Vec<String>>) {
        input.into_parts()
    }

    #[test]
    fn test_lines_skip_blanks_and_comments() {
        let text = "# sensor dump\n1\n2.5\n\n 3 \n";
        let (v, labels) = values(parse(text, InputFormat::Lines).unwrap());
        assert_eq!(v, vec![1.0, 2.5, 3.0]);
        assert!(labels.is_none());
    }

    #[test]
    fn test_lines_reject_text() {
        let err = parse("1\nabc\n", InputFormat::Lines).unwrap_err();
        assert!(err.to_string().contains("flat numeric sequence"));
    }

    #[test]
    fn test_csv_with_header() {
        let text = "time,value\nt0,1\nt1,100\nt2,3\n";
        let (v, labels) = values(parse(text, InputFormat::Csv).unwrap());
        assert_eq!(v, vec![1.0, 100.0, 3.0]);
        assert_eq!(labels.unwrap(), vec!["t0", "t1", "t2"]);
    }

    #[test]
    fn test_csv_non_numeric_row_rejected() {
        let err = parse("t0,1\nt1,x\n", InputFormat::Csv).unwrap_err();
        assert!(err.to_string().contains("flat numeric sequence"));
    }

    #[test]
    fn test_json_array() {
        let (v, _) = values(parse("[1, 2.5, 3]", InputFormat::Json).unwrap());
        assert_eq!(v, vec![1.0, 2.5, 3.0]);

        assert!(parse("[1, \"a\"]", InputFormat::Json).is_err());
        assert!(parse("[[1, 2], [3]]", InputFormat::Json).is_err());
        assert!(parse("{\"a\": 1}", InputFormat::Json).is_err());
    }

    #[test]
    fn test_empty_input_is_valid() {
        let (v, _) = values(parse("", InputFormat::Lines).unwrap());
        assert!(v.is_empty());
    }
}
