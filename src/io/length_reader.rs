use super::readers::{open_text_reader, trim_line_ending};
use crate::{
    core::chromosome::{ChromosomeEntry, ChromosomeRegistry},
    error::SvplotError,
    utils::util::{format_number_with_commas, normalize_chrom_name, parse_genomic_number, Result},
};
use std::{io::BufRead, path::Path};

/// Parses one `name length` line into a normalized name and raw length.
pub fn line_to_chromosome(line: &str) -> std::result::Result<(String, u64), String> {
    const EXPECTED_FIELD_COUNT: usize = 2;
    let split_line: Vec<&str> = line.split_whitespace().collect();
    if split_line.len() != EXPECTED_FIELD_COUNT {
        return Err(format!(
            "Expected {} fields in the format 'name length', found {}: {}",
            EXPECTED_FIELD_COUNT,
            split_line.len(),
            line
        ));
    }

    let (name, length) = (split_line[0], split_line[1]);
    let name = normalize_chrom_name(name);
    if name.is_empty() {
        return Err(format!("Empty chromosome name: {}", line));
    }

    let length = parse_genomic_number(length)
        .map_err(|e| format!("Invalid chromosome length '{}': {}", length, e))?;
    if length <= 0 {
        return Err(format!(
            "Chromosome length must be positive, found {} for {}",
            length, name
        ));
    }

    Ok((name, length as u64))
}

/// Loads the chromosome registry from a two-column length file.
///
/// Names are uppercased and every length is multiplied by `padding_factor`.
/// Any malformed line or repeated name aborts the whole load.
pub fn load_chromosome_registry(path: &Path, padding_factor: f64) -> Result<ChromosomeRegistry> {
    let reader = open_text_reader(path)?;
    let mut registry = ChromosomeRegistry::new();
    let mut first_seen: Vec<usize> = Vec::new();

    for (line_index, result_line) in reader.lines().enumerate() {
        let line_number = line_index + 1;
        let line = result_line
            .map_err(|e| SvplotError::malformed(path, line_number, e.to_string()))?;
        let line = trim_line_ending(&line);
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let (name, raw_length) = line_to_chromosome(line)
            .map_err(|message| SvplotError::malformed(path, line_number, message))?;
        let entry = ChromosomeEntry {
            name,
            raw_length,
            length: raw_length as f64 * padding_factor,
        };
        log::trace!(
            "Chromosome {} raw length {} padded length {:.1}",
            entry.name,
            entry.raw_length,
            entry.length
        );

        match registry.push(entry) {
            Ok(_) => first_seen.push(line_number),
            Err(existing) => {
                return Err(SvplotError::DuplicateChromosome {
                    path: path.to_path_buf(),
                    line: line_number,
                    name: registry.name(existing).to_string(),
                    first_line: first_seen[existing.index()],
                });
            }
        }
    }

    if registry.is_empty() {
        return Err(SvplotError::EmptyRegistry {
            path: path.to_path_buf(),
        });
    }

    let total_raw: u64 = registry.iter().map(|(_, entry)| entry.raw_length).sum();
    log::info!(
        "Loaded {} chromosomes ({} bp) from {}",
        registry.len(),
        format_number_with_commas(total_raw),
        path.display()
    );
    Ok(registry)
}
