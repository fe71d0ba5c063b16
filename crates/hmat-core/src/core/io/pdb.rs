//! Line-level helpers for model PDB files. Nothing here parses coordinates;
//! the files are treated as text carrying score remarks and atom records.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Atom names of the patched termini added by the modeling force field.
/// Lines carrying them confuse the downstream Rosetta scoring.
pub const PATCHED_TERMINUS_ATOMS: [&str; 5] = [" CAY ", " CY ", " OY ", " NT ", " CAT "];

/// Lists `<dir>/<rootname>*.pdb`, sorted by path.
pub fn list_models(dir: &Path, rootname: &str) -> io::Result<Vec<PathBuf>> {
    let mut models = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.starts_with(rootname) && name.ends_with(".pdb") {
            models.push(entry.path());
        }
    }
    models.sort();
    Ok(models)
}

/// A whitespace field taken from a line containing the search pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreLine {
    pub line: usize,
    pub value: String,
}

/// Collects field `column` of every line containing `pattern`.
///
/// A matching line without that field ends the scan of this file; the
/// values gathered up to that point are kept.
pub fn find_score_lines(
    reader: &mut impl BufRead,
    pattern: &str,
    column: usize,
) -> io::Result<Vec<ScoreLine>> {
    let mut found = Vec::new();
    for (line_num, line_res) in reader.lines().enumerate() {
        let line = line_res?;
        if !line.contains(pattern) {
            continue;
        }
        match line.split_whitespace().nth(column) {
            Some(value) => found.push(ScoreLine {
                line: line_num + 1,
                value: value.to_string(),
            }),
            None => {
                warn!(
                    "Score line {} has no field {}; check the column index.",
                    line_num + 1,
                    column
                );
                break;
            }
        }
    }
    Ok(found)
}

/// Copies `reader` to `writer` minus the patched-terminus atom lines.
/// Returns the number of lines dropped.
pub fn strip_patched_termini(reader: &mut impl BufRead, writer: &mut impl Write) -> io::Result<usize> {
    let mut dropped = 0;
    for line_res in reader.lines() {
        let line = line_res?;
        if PATCHED_TERMINUS_ATOMS.iter().any(|atom| line.contains(atom)) {
            dropped += 1;
            continue;
        }
        writeln!(writer, "{}", line)?;
    }
    Ok(dropped)
}

/// Path of the cleaned copy of `model`: the same path with `cl` appended.
pub fn cleaned_path(model: &Path) -> PathBuf {
    let mut name = model.as_os_str().to_os_string();
    name.push("cl");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Cursor;

    const MODEL: &str = "\
EXPDTA    THEORETICAL MODEL, MODELLER 9.21 2019/01/01 12:00:00
REMARK   6 MODELLER OBJECTIVE FUNCTION:      2386.0759
REMARK   6 MODELLER BEST TEMPLATE % SEQ ID:  31.000
ATOM      1  CAY GLY A   1      10.000  10.000  10.000  1.00  0.00           C
ATOM      2  N   GLY A   1      11.000  10.000  10.000  1.00  0.00           N
ATOM      3  CA  GLY A   1      12.000  10.000  10.000  1.00  0.00           C
ATOM      4  NT  ALA A   2      13.000  10.000  10.000  1.00  0.00           N
END
";

    #[test]
    fn find_score_lines_takes_requested_field() {
        let found =
            find_score_lines(&mut Cursor::new(MODEL), "MODELLER OBJECTIVE FUNCTION", 5).unwrap();
        assert_eq!(
            found,
            vec![ScoreLine {
                line: 2,
                value: "2386.0759".into()
            }]
        );
    }

    #[test]
    fn find_score_lines_stops_on_short_match() {
        let text = "X 1 2\nX\nX 3 4\n";
        let found = find_score_lines(&mut Cursor::new(text), "X", 2).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, "2");
    }

    #[test]
    fn strip_patched_termini_drops_only_patch_atoms() {
        let mut out = Vec::new();
        let dropped = strip_patched_termini(&mut Cursor::new(MODEL), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(dropped, 2);
        assert!(!out.contains(" CAY "));
        assert!(!out.contains(" NT "));
        assert!(out.contains(" CA  GLY"));
        assert!(out.contains("MODELLER OBJECTIVE FUNCTION"));
        assert!(out.ends_with("END\n"));
    }

    #[test]
    fn list_models_filters_by_rootname_and_extension() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "glyt1.B99990002.pdb",
            "glyt1.B99990001.pdb",
            "glyt1.B99990001.pdbcl",
            "other.B99990001.pdb",
            "glyt1.ini",
        ] {
            File::create(dir.path().join(name)).unwrap();
        }
        std::fs::create_dir(dir.path().join("glyt1.dir.pdb")).unwrap();

        let models = list_models(dir.path(), "glyt1.B9").unwrap();
        let names: Vec<_> = models
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["glyt1.B99990001.pdb", "glyt1.B99990002.pdb"]);
    }

    #[test]
    fn cleaned_path_appends_suffix() {
        assert_eq!(
            cleaned_path(Path::new("/w/glyt1.B99990001.pdb")),
            PathBuf::from("/w/glyt1.B99990001.pdbcl")
        );
    }
}
