use crate::{
    config::InputConfig,
    core::{chromosome::ChromosomeRegistry, sv_record::ValidatedSvTable, svtype::SvKind},
    io::{
        length_reader::load_chromosome_registry, sv_reader::load_sv_table,
        table_writer::write_table_to_path,
    },
    utils::util::{try_exists, Result},
};

/// Loads the chromosome registry and the SV table it validates.
pub fn load_inputs(input: &InputConfig) -> Result<(ChromosomeRegistry, ValidatedSvTable)> {
    try_exists(&input.lengths_path)?;
    try_exists(&input.sv_path)?;
    let registry = load_chromosome_registry(&input.lengths_path, input.padding_factor)?;
    let table = load_sv_table(&input.sv_path, &registry, input.load_options)?;
    Ok((registry, table))
}

pub(crate) fn log_kind_counts(table: &ValidatedSvTable) {
    let counts = table.count_by_kind();
    let summary = SvKind::ALL
        .iter()
        .map(|kind| format!("{}={}", kind, counts[kind.index()]))
        .collect::<Vec<_>>()
        .join(", ");
    log::info!("Validated SVs by type: {}", summary);
}

pub fn validate(input: InputConfig) -> Result<()> {
    let (registry, table) = load_inputs(&input)?;
    log_kind_counts(&table);
    if let Some(ref table_path) = input.table_output {
        write_table_to_path(table_path, &registry, &table)?;
    }
    Ok(())
}
