use super::{chromosome::ChromId, svtype::SvKind};

/// A closed, 1-based interval on one chromosome with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub chrom: ChromId,
    pub start: i64,
    pub end: i64,
}

impl Span {
    /// Builds a span from caller coordinates given in either orientation.
    pub fn normalized(chrom: ChromId, raw_start: i64, raw_end: i64) -> Self {
        Span {
            chrom,
            start: raw_start.min(raw_end),
            end: raw_start.max(raw_end),
        }
    }

    pub fn midpoint(&self) -> f64 {
        (self.start as f64 + self.end as f64) / 2.0
    }
}

/// One validated structural variant. `a` is the reference side, `b` the query side.
#[derive(Debug, Clone, PartialEq)]
pub struct SvRecord {
    pub line: usize,
    pub a: Span,
    pub b: Span,
    pub kind: SvKind,
}

/// Why a parsed row was excluded from the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRejection {
    UnsupportedSvType,
    UnknownChromosomeReference,
    OutOfBoundsCoordinate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub rows: usize,
    pub kept: usize,
    pub unsupported_type: usize,
    pub unknown_chromosome: usize,
    pub out_of_bounds: usize,
    pub malformed: usize,
}

impl FilterStats {
    pub fn record(&mut self, rejection: RowRejection) {
        match rejection {
            RowRejection::UnsupportedSvType => self.unsupported_type += 1,
            RowRejection::UnknownChromosomeReference => self.unknown_chromosome += 1,
            RowRejection::OutOfBoundsCoordinate => self.out_of_bounds += 1,
        }
    }

    pub fn excluded(&self) -> usize {
        self.unsupported_type + self.unknown_chromosome + self.out_of_bounds + self.malformed
    }
}

/// Surviving records in input order.
#[derive(Debug, Clone, Default)]
pub struct ValidatedSvTable {
    records: Vec<SvRecord>,
    stats: FilterStats,
}

impl ValidatedSvTable {
    pub fn new(records: Vec<SvRecord>, stats: FilterStats) -> Self {
        Self { records, stats }
    }

    pub fn records(&self) -> &[SvRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SvRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn stats(&self) -> &FilterStats {
        &self.stats
    }

    pub fn count_by_kind(&self) -> [usize; SvKind::ALL.len()] {
        let mut counts = [0usize; SvKind::ALL.len()];
        for record in &self.records {
            counts[record.kind.index()] += 1;
        }
        counts
    }
}

impl<'a> IntoIterator for &'a ValidatedSvTable {
    type Item = &'a SvRecord;
    type IntoIter = std::slice::Iter<'a, SvRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
