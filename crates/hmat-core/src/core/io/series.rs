use crate::core::analysis::series::ScoreSeries;
use crate::core::io::score_file::{ScoreFileError, parse_score_field};
use crate::core::io::traits::TextFormat;
use std::io::{BufRead, Write};

/// One value per line, printed with a fixed number of decimals
/// (`%1.4f` by default).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesFile {
    pub precision: usize,
}

impl SeriesFile {
    pub const DEFAULT_PRECISION: usize = 4;

    pub fn with_precision(precision: usize) -> Self {
        Self { precision }
    }
}

impl Default for SeriesFile {
    fn default() -> Self {
        Self::with_precision(Self::DEFAULT_PRECISION)
    }
}

impl TextFormat for SeriesFile {
    type Data = ScoreSeries;
    type Error = ScoreFileError;

    fn read_from(&self, reader: &mut impl BufRead) -> Result<Self::Data, Self::Error> {
        let mut values = Vec::new();
        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            if line.trim().is_empty() {
                continue;
            }
            let value = parse_score_field(&line, 0).map_err(|kind| ScoreFileError::Parse {
                line: line_num + 1,
                kind,
            })?;
            values.push(value);
        }
        Ok(ScoreSeries::new(values))
    }

    fn write_to(&self, data: &Self::Data, writer: &mut impl Write) -> Result<(), Self::Error> {
        for value in data {
            writeln!(writer, "{:.*}", self.precision, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn write_uses_four_decimal_fixed_format() {
        let series = ScoreSeries::from(vec![1.0, -2.5, 3.141_592_65, 1234.56789]);
        let mut buf = Vec::new();
        SeriesFile::default().write_to(&series, &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "1.0000\n-2.5000\n3.1416\n1234.5679\n"
        );
    }

    #[test]
    fn written_series_reads_back_within_rounding_tolerance() {
        let original = ScoreSeries::from(vec![2386.07591, -0.000049, 17.123449, 1e-3]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.txt");

        let format = SeriesFile::default();
        format.write_to_path(&original, &path).unwrap();
        let reread = format.read_from_path(&path).unwrap();

        assert_eq!(reread.len(), original.len());
        for (a, b) in original.iter().zip(reread.iter()) {
            assert!((a - b).abs() <= 1e-4, "{a} vs {b}");
        }
    }

    #[test]
    fn read_rejects_garbage_lines() {
        let result = SeriesFile::default().read_from(&mut Cursor::new("1.0\nfoo\n"));
        assert!(matches!(
            result,
            Err(ScoreFileError::Parse { line: 2, .. })
        ));
    }
}
