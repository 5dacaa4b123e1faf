use crate::{
    core::{chromosome::ChromosomeRegistry, sv_record::ValidatedSvTable},
    utils::util::Result,
};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

const TABLE_HEADER: &str = "line\tchrA\tstartA\tendA\tchrB\tstartB\tendB\ttype";

pub fn write_table<W: Write>(
    writer: &mut W,
    registry: &ChromosomeRegistry,
    table: &ValidatedSvTable,
) -> Result<()> {
    writeln!(writer, "{TABLE_HEADER}")?;
    for record in table {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            record.line,
            registry.name(record.a.chrom),
            record.a.start,
            record.a.end,
            registry.name(record.b.chrom),
            record.b.start,
            record.b.end,
            record.kind
        )?;
    }
    Ok(())
}

/// Writes the validated table as TSV to `path`.
pub fn write_table_to_path(
    path: &Path,
    registry: &ChromosomeRegistry,
    table: &ValidatedSvTable,
) -> Result<()> {
    let file = File::create(path).map_err(|error| {
        crate::svplot_error!(
            "Failed to create table file at {}: {}",
            path.display(),
            error
        )
    })?;
    let mut writer = BufWriter::new(file);
    write_table(&mut writer, registry, table)?;
    writer
        .flush()
        .map_err(|error| crate::svplot_error!("Failed to flush table rows: {error}"))?;
    log::info!("Wrote {} validated SVs to {}", table.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        chromosome::ChromosomeEntry,
        sv_record::{FilterStats, Span, SvRecord},
        svtype::SvKind,
    };

    #[test]
    fn test_write_table() -> Result<()> {
        let mut registry = ChromosomeRegistry::new();
        let chr1 = registry
            .push(ChromosomeEntry {
                name: "CHR1".to_string(),
                raw_length: 1000,
                length: 1100.0,
            })
            .unwrap();
        let chr2 = registry
            .push(ChromosomeEntry {
                name: "CHR2".to_string(),
                raw_length: 500,
                length: 550.0,
            })
            .unwrap();
        let table = ValidatedSvTable::new(
            vec![SvRecord {
                line: 7,
                a: Span::normalized(chr1, 20, 10),
                b: Span::normalized(chr2, 30, 40),
                kind: SvKind::INVERTED_DUPLICATION,
            }],
            FilterStats::default(),
        );

        let mut out = Vec::new();
        write_table(&mut out, &registry, &table)?;
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], TABLE_HEADER);
        assert_eq!(lines[1], "7\tCHR1\t10\t20\tCHR2\t30\t40\tINVDP");
        assert_eq!(lines.len(), 2);

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("table.tsv");
        write_table_to_path(&path, &registry, &table)?;
        assert_eq!(std::fs::read_to_string(&path)?, text);
        Ok(())
    }
}
