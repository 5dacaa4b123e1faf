use super::readers::{open_text_reader, trim_line_ending};
use crate::{
    constants::*,
    core::{
        chromosome::{ChromId, ChromosomeRegistry},
        sv_record::{FilterStats, RowRejection, Span, SvRecord, ValidatedSvTable},
        svtype::SvKind,
    },
    error::SvplotError,
    utils::util::{parse_genomic_number, Result},
};
use std::{io::BufRead, path::Path};

/// What to do with a row that cannot be parsed at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedRowPolicy {
    /// Stop the load at the first malformed row.
    #[default]
    Abort,
    /// Drop the row, count it and keep going.
    Skip,
}

/// Which chromosome length coordinates are checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundsMode {
    /// The padded display length stored in the registry.
    #[default]
    Padded,
    /// The unpadded length from the length file.
    Raw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SvLoadOptions {
    pub malformed: MalformedRowPolicy,
    pub bounds: BoundsMode,
}

/// The required fields of one SV caller row, before any filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSvRow {
    pub chr_a: String,
    pub start_a: i64,
    pub end_a: i64,
    pub chr_b: String,
    pub start_b: i64,
    pub end_b: i64,
    pub sv_type: String,
}

/// Extracts the required columns from a tab-separated caller row.
pub fn line_to_raw_row(line: &str) -> std::result::Result<RawSvRow, String> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < SV_MIN_FIELDS {
        return Err(format!(
            "Expected at least {} tab-separated fields, found {}",
            SV_MIN_FIELDS,
            fields.len()
        ));
    }

    let number = |column: usize, label: &str| {
        let text = fields[column];
        parse_genomic_number(text).map_err(|e| {
            format!(
                "Invalid {} '{}' in column {}: {}",
                label,
                text,
                column + 1,
                e
            )
        })
    };

    Ok(RawSvRow {
        chr_a: fields[SV_COL_CHR_A].to_uppercase(),
        start_a: number(SV_COL_START_A, "reference start")?,
        end_a: number(SV_COL_END_A, "reference end")?,
        chr_b: fields[SV_COL_CHR_B].to_uppercase(),
        start_b: number(SV_COL_START_B, "query start")?,
        end_b: number(SV_COL_END_B, "query end")?,
        sv_type: fields[SV_COL_TYPE].to_string(),
    })
}

fn bound(registry: &ChromosomeRegistry, chrom: ChromId, mode: BoundsMode) -> f64 {
    let entry = registry.get(chrom);
    match mode {
        BoundsMode::Padded => entry.length,
        BoundsMode::Raw => entry.raw_length as f64,
    }
}

fn span_in_bounds(span: &Span, registry: &ChromosomeRegistry, mode: BoundsMode) -> bool {
    span.start >= 1 && span.end as f64 <= bound(registry, span.chrom, mode)
}

/// Applies the type, chromosome and bounds rules to a parsed row, in that order.
pub fn validate_row(
    row: &RawSvRow,
    line: usize,
    registry: &ChromosomeRegistry,
    mode: BoundsMode,
) -> std::result::Result<SvRecord, RowRejection> {
    let kind: SvKind = row
        .sv_type
        .parse()
        .map_err(|_| RowRejection::UnsupportedSvType)?;

    let (chr_a, chr_b) = match (registry.id_of(&row.chr_a), registry.id_of(&row.chr_b)) {
        (Some(a), Some(b)) => (a, b),
        _ => return Err(RowRejection::UnknownChromosomeReference),
    };

    let a = Span::normalized(chr_a, row.start_a, row.end_a);
    let b = Span::normalized(chr_b, row.start_b, row.end_b);
    if !span_in_bounds(&a, registry, mode) || !span_in_bounds(&b, registry, mode) {
        return Err(RowRejection::OutOfBoundsCoordinate);
    }

    Ok(SvRecord { line, a, b, kind })
}

/// Reads an SV caller table and keeps only rows that are renderable against `registry`.
///
/// Rows with an unsupported type, an unknown chromosome or coordinates outside
/// the chromosome are dropped silently and only show up in the returned
/// [`FilterStats`]. Rows that cannot be parsed follow `options.malformed`.
pub fn load_sv_table(
    path: &Path,
    registry: &ChromosomeRegistry,
    options: SvLoadOptions,
) -> Result<ValidatedSvTable> {
    let reader = open_text_reader(path)?;
    let mut records = Vec::new();
    let mut stats = FilterStats::default();

    for (line_index, result_line) in reader.lines().enumerate() {
        let line_number = line_index + 1;
        let line = result_line
            .map_err(|e| SvplotError::malformed(path, line_number, e.to_string()))?;
        let line = trim_line_ending(&line);
        if line.trim().is_empty() {
            continue;
        }
        stats.rows += 1;

        let row = match line_to_raw_row(line) {
            Ok(row) => row,
            Err(message) => match options.malformed {
                MalformedRowPolicy::Abort => {
                    return Err(SvplotError::malformed(path, line_number, message));
                }
                MalformedRowPolicy::Skip => {
                    log::debug!(
                        "Skipping malformed row at {}:{}: {}",
                        path.display(),
                        line_number,
                        message
                    );
                    stats.malformed += 1;
                    continue;
                }
            },
        };

        match validate_row(&row, line_number, registry, options.bounds) {
            Ok(record) => records.push(record),
            Err(rejection) => {
                log::trace!("Line {} excluded: {:?}", line_number, rejection);
                stats.record(rejection);
            }
        }
    }

    stats.kept = records.len();
    log::info!(
        "Validated {} of {} SV rows from {} (excluded: {} unsupported type, {} unknown chromosome, {} out of bounds, {} malformed)",
        stats.kept,
        stats.rows,
        path.display(),
        stats.unsupported_type,
        stats.unknown_chromosome,
        stats.out_of_bounds,
        stats.malformed
    );
    Ok(ValidatedSvTable::new(records, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{constants::DEFAULT_PADDING_FACTOR, io::length_reader::load_chromosome_registry};
    use proptest::prelude::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", contents).unwrap();
        temp_file.flush().unwrap();
        temp_file
    }

    fn registry() -> ChromosomeRegistry {
        let lengths = write_temp("chr1\t900,000\nchr2\t2000000\n");
        load_chromosome_registry(lengths.path(), DEFAULT_PADDING_FACTOR).unwrap()
    }

    fn sv_line(
        chr_a: &str,
        start_a: &str,
        end_a: &str,
        chr_b: &str,
        start_b: &str,
        end_b: &str,
        sv_type: &str,
    ) -> String {
        [
            chr_a, start_a, end_a, "-", "-", "-", chr_b, start_b, end_b, "id1", "-", "-", sv_type,
        ]
        .join("\t")
    }

    fn load(contents: &str, options: SvLoadOptions) -> Result<ValidatedSvTable> {
        let svs = write_temp(contents);
        load_sv_table(svs.path(), &registry(), options)
    }

    #[test]
    fn test_line_to_raw_row_extracts_columns() {
        let line = sv_line("chr1", "100", "200", "Chr2", "1,000", "\"900\"", "INV");
        let row = line_to_raw_row(&line).unwrap();
        assert_eq!(
            row,
            RawSvRow {
                chr_a: "CHR1".to_string(),
                start_a: 100,
                end_a: 200,
                chr_b: "CHR2".to_string(),
                start_b: 1000,
                end_b: 900,
                sv_type: "INV".to_string(),
            }
        );
    }

    #[test]
    fn test_line_to_raw_row_accepts_extra_columns() {
        let line = format!("{}\textra\tcolumns", sv_line("chr1", "1", "2", "chr1", "3", "4", "DUP"));
        assert!(line_to_raw_row(&line).is_ok());
    }

    #[test]
    fn test_line_to_raw_row_too_few_fields() {
        let err = line_to_raw_row("chr1\t1\t2\t-\t-\t-\tchr2\t3\t4\tid\t-\t-").unwrap_err();
        assert!(err.contains("at least 13"));
    }

    #[test]
    fn test_line_to_raw_row_scientific_coordinates() {
        let line = sv_line("chr1", "1e+05", "2.5e5", "chr2", "100000.0", "3", "DUP");
        let row = line_to_raw_row(&line).unwrap();
        assert_eq!((row.start_a, row.end_a), (100_000, 250_000));
        assert_eq!((row.start_b, row.end_b), (100_000, 3));
    }

    #[test]
    fn test_quoted_chromosome_is_not_unquoted() -> Result<()> {
        let line = sv_line("\"chr1\"", "1", "2", "chr2", "1", "2", "INV");
        assert_eq!(line_to_raw_row(&line).unwrap().chr_a, "\"CHR1\"");

        let table = load(&format!("{}\n", line), SvLoadOptions::default())?;
        assert!(table.is_empty());
        assert_eq!(table.stats().unknown_chromosome, 1);
        Ok(())
    }

    #[test]
    fn test_line_to_raw_row_bad_number() {
        let line = sv_line("chr1", "1", "2", "chr2", "x3", "4", "INV");
        let err = line_to_raw_row(&line).unwrap_err();
        assert!(err.contains("column 8"));
    }

    #[test]
    fn test_unsupported_type_is_dropped() -> Result<()> {
        let contents = format!(
            "{}\n{}\n",
            sv_line("chr1", "100", "200", "chr2", "100", "200", "INV"),
            sv_line("chr1", "100", "200", "chr2", "100", "200", "DEL"),
        );
        let table = load(&contents, SvLoadOptions::default())?;
        assert_eq!(table.len(), 1);
        assert_eq!(table.stats().unsupported_type, 1);
        Ok(())
    }

    #[test]
    fn test_unknown_chromosome_is_dropped() -> Result<()> {
        let contents = format!(
            "{}\n{}\n",
            sv_line("chrX", "100", "200", "chr2", "100", "200", "TRANS"),
            sv_line("chr1", "100", "200", "chrX", "100", "200", "TRANS"),
        );
        let table = load(&contents, SvLoadOptions::default())?;
        assert!(table.is_empty());
        assert_eq!(table.stats().unknown_chromosome, 2);
        Ok(())
    }

    #[test]
    fn test_reversed_coordinates_are_normalized() -> Result<()> {
        let contents = sv_line("chr1", "500000", "100000", "chr2", "30", "10", "INVTR");
        let table = load(&contents, SvLoadOptions::default())?;
        assert_eq!(table.len(), 1);
        let record = &table.records()[0];
        assert_eq!((record.a.start, record.a.end), (100_000, 500_000));
        assert_eq!((record.b.start, record.b.end), (10, 30));
        assert_eq!(record.kind, SvKind::INVERTED_TRANSLOCATION);
        assert_eq!(record.line, 1);
        Ok(())
    }

    #[test]
    fn test_start_below_one_is_dropped() -> Result<()> {
        let contents = format!(
            "{}\n{}\n",
            sv_line("chr1", "0", "100", "chr2", "1", "100", "DUP"),
            sv_line("chr1", "-20", "100", "chr2", "1", "100", "DUP"),
        );
        let table = load(&contents, SvLoadOptions::default())?;
        assert!(table.is_empty());
        assert_eq!(table.stats().out_of_bounds, 2);
        Ok(())
    }

    #[test]
    fn test_padded_bounds_accept_coordinates_past_raw_length() -> Result<()> {
        // chr1 is 900,000 bp raw and 990,000 bp padded.
        let contents = format!(
            "{}\n{}\n{}\n",
            sv_line("chr1", "1", "900000", "chr2", "1", "10", "INV"),
            sv_line("chr1", "1", "950000", "chr2", "1", "10", "INV"),
            sv_line("chr1", "1", "990001", "chr2", "1", "10", "INV"),
        );
        let table = load(&contents, SvLoadOptions::default())?;
        assert_eq!(table.len(), 2);
        assert_eq!(table.stats().out_of_bounds, 1);
        Ok(())
    }

    #[test]
    fn test_raw_bounds_reject_coordinates_past_raw_length() -> Result<()> {
        let contents = format!(
            "{}\n{}\n",
            sv_line("chr1", "1", "900000", "chr2", "1", "10", "INV"),
            sv_line("chr1", "1", "950000", "chr2", "1", "10", "INV"),
        );
        let options = SvLoadOptions {
            bounds: BoundsMode::Raw,
            ..Default::default()
        };
        let table = load(&contents, options)?;
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].a.end, 900_000);
        assert_eq!(table.stats().out_of_bounds, 1);
        Ok(())
    }

    #[test]
    fn test_query_side_bounds_checked() -> Result<()> {
        let contents = sv_line("chr1", "1", "10", "chr2", "1", "2200001", "DUP");
        let table = load(&contents, SvLoadOptions::default())?;
        assert!(table.is_empty());
        assert_eq!(table.stats().out_of_bounds, 1);
        Ok(())
    }

    #[test]
    fn test_malformed_row_aborts_by_default() {
        let contents = format!(
            "{}\n{}\n",
            sv_line("chr1", "1", "10", "chr2", "1", "10", "INV"),
            sv_line("chr1", "abc", "10", "chr2", "1", "10", "INV"),
        );
        let err = load(&contents, SvLoadOptions::default()).unwrap_err();
        assert!(matches!(err, SvplotError::MalformedInput { line: 2, .. }));
    }

    #[test]
    fn test_malformed_numeric_aborts_even_for_unsupported_type() {
        let contents = sv_line("chr1", "abc", "10", "chr2", "1", "10", "DEL");
        let err = load(&contents, SvLoadOptions::default()).unwrap_err();
        assert!(matches!(err, SvplotError::MalformedInput { line: 1, .. }));
    }

    #[test]
    fn test_short_row_aborts_by_default() {
        let err = load("chr1\t1\t10\n", SvLoadOptions::default()).unwrap_err();
        assert!(matches!(err, SvplotError::MalformedInput { line: 1, .. }));
    }

    #[test]
    fn test_malformed_row_skipped_with_skip_policy() -> Result<()> {
        let contents = format!(
            "{}\nchr1\t1\t10\n{}\n",
            sv_line("chr1", "1", "10", "chr2", "1", "10", "INV"),
            sv_line("chr1", "abc", "10", "chr2", "1", "10", "INV"),
        );
        let options = SvLoadOptions {
            malformed: MalformedRowPolicy::Skip,
            ..Default::default()
        };
        let table = load(&contents, options)?;
        assert_eq!(table.len(), 1);
        assert_eq!(table.stats().rows, 3);
        assert_eq!(table.stats().malformed, 2);
        Ok(())
    }

    #[test]
    fn test_preserves_input_order_and_skips_blank_lines() -> Result<()> {
        let contents = format!(
            "{}\n\n{}\r\n{}\n",
            sv_line("chr2", "5", "6", "chr1", "5", "6", "DUP"),
            sv_line("chr1", "1", "2", "chr2", "1", "2", "INVDP"),
            sv_line("chr1", "3", "4", "chr1", "3", "4", "TRANS"),
        );
        let table = load(&contents, SvLoadOptions::default())?;
        let lines: Vec<usize> = table.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![1, 3, 4]);
        let kinds: Vec<SvKind> = table.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SvKind::DUPLICATION,
                SvKind::INVERTED_DUPLICATION,
                SvKind::TRANSLOCATION
            ]
        );
        assert_eq!(table.stats().rows, 3);
        Ok(())
    }

    #[test]
    fn test_empty_sv_file_gives_empty_table() -> Result<()> {
        let table = load("", SvLoadOptions::default())?;
        assert!(table.is_empty());
        assert_eq!(table.stats(), &FilterStats::default());
        Ok(())
    }

    fn arb_row() -> impl Strategy<Value = (String, i64, i64, String, i64, i64, String)> {
        let chrom = prop::sample::select(vec!["chr1", "CHR2", "chrX", "chr3"]);
        let kind = prop::sample::select(vec!["INV", "TRANS", "INVTR", "DUP", "INVDP", "DEL", "SYN"]);
        let coord = -10i64..2_500_000;
        (
            chrom.clone().prop_map(str::to_string),
            coord.clone(),
            coord.clone(),
            chrom.prop_map(str::to_string),
            coord.clone(),
            coord,
            kind.prop_map(str::to_string),
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]
        #[test]
        fn prop_surviving_records_satisfy_invariants(rows in prop::collection::vec(arb_row(), 0..40)) {
            let contents: String = rows
                .iter()
                .map(|(ca, sa, ea, cb, sb, eb, t)| {
                    format!(
                        "{}\n",
                        sv_line(ca, &sa.to_string(), &ea.to_string(), cb, &sb.to_string(), &eb.to_string(), t)
                    )
                })
                .collect();
            let registry = registry();
            let svs = write_temp(&contents);
            let table = load_sv_table(svs.path(), &registry, SvLoadOptions::default()).unwrap();

            prop_assert!(table.len() <= rows.len());
            prop_assert_eq!(table.stats().kept + table.stats().excluded(), rows.len());
            for record in &table {
                for span in [record.a, record.b] {
                    prop_assert!(span.start <= span.end);
                    prop_assert!(span.start >= 1);
                    prop_assert!(span.end as f64 <= registry.get(span.chrom).length);
                    prop_assert!(registry.id_of(registry.name(span.chrom)).is_some());
                }
                prop_assert!(SvKind::ALL.contains(&record.kind));
            }
        }
    }
}
