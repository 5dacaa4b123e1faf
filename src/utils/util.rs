use crate::error::SvplotResult;
use log;
use std::{
    fmt::{Binary, Display},
    path::Path,
    sync::Once,
};

pub type Result<T> = SvplotResult<T>;

/// Characters removed from numeric fields before conversion.
const NUMERIC_NOISE: [char; 2] = ['"', ','];

/// Largest magnitude at which every integer is representable as `f64`.
const MAX_EXACT_FLOAT_INTEGER: f64 = 9_007_199_254_740_992.0;

#[allow(unused)]
static INIT_LOG: Once = Once::new();

#[allow(unused)]
pub fn init_logger() {
    INIT_LOG.call_once(|| {
        env_logger::builder()
            .filter_level(log::LevelFilter::Trace)
            .is_test(true)
            .init();
    });
}

pub fn handle_error_and_exit(err: impl Display) -> ! {
    log::error!("{err}");
    std::process::exit(1);
}

pub fn try_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(crate::svplot_error!(
            "Path/File does not exist: {}",
            path.display()
        ));
    }
    Ok(())
}

/// Parses a genomic coordinate or length, e.g. `"150,000,000"` -> `150000000`.
///
/// Quote characters and comma thousands-separators are stripped before conversion,
/// surrounding whitespace is ignored. Decimal and scientific forms such as `1.5e8`
/// or `248956422.0` are accepted when they denote a whole number.
/// Sign checks are left to the caller.
pub fn parse_genomic_number(text: &str) -> std::result::Result<i64, String> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !NUMERIC_NOISE.contains(c))
        .collect();
    let cleaned = cleaned.trim();
    if let Ok(value) = cleaned.parse::<i64>() {
        return Ok(value);
    }

    let value = cleaned
        .parse::<f64>()
        .map_err(|_| format!("'{}' is not a number", cleaned))?;
    if !value.is_finite() {
        return Err(format!("'{}' is not a finite number", cleaned));
    }
    if value.fract() != 0.0 {
        return Err(format!("'{}' is not a whole number", cleaned));
    }
    if value.abs() > MAX_EXACT_FLOAT_INTEGER {
        return Err(format!("'{}' is out of range", cleaned));
    }
    Ok(value as i64)
}

/// Uppercases a chromosome name so it can be used as a case-insensitive join key.
pub fn normalize_chrom_name(name: &str) -> String {
    name.trim().trim_matches('"').to_uppercase()
}

pub fn format_number_with_commas<T>(n: T) -> String
where
    T: Display + Binary,
{
    let s = n.to_string();
    let (sign, digits) = s.strip_prefix('-').map_or(("", s.as_str()), |d| ("-", d));

    if let 0..=3 = digits.len() {
        return s;
    }

    let mut result = String::with_capacity(digits.len() + (digits.len() - 1) / 3 + sign.len());
    for (digit_count, c) in digits.chars().rev().enumerate() {
        if digit_count > 0 && digit_count % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result = result.chars().rev().collect();
    if !sign.is_empty() {
        result.insert_str(0, sign);
    }

    result
}
