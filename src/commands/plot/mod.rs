use super::validate::{load_inputs, log_kind_counts};
use crate::{
    config::PlotConfig,
    io::table_writer::write_table,
    render::{
        circos::render_circos,
        linear::render_linear,
        png::{encode_png, write_outputs, PendingOutput},
    },
    utils::util::Result,
};


/// Loads and validates both inputs, renders the linear and circos plots and
/// writes them. Nothing is written unless every stage succeeds.
pub fn plot(config: PlotConfig) -> Result<()> {
    if config.linear_output == config.circos_output {
        return Err(crate::svplot_error!(
            "Linear and circos plots cannot share an output path: {}",
            config.linear_output.display()
        ));
    }

    let (registry, table) = load_inputs(&config.input)?;
    log_kind_counts(&table);
    if table.is_empty() {
        log::warn!("No SVs passed validation, plots will only show chromosomes");
    }

    let (linear_png, circos_png) = rayon::join(
        || {
            let image = render_linear(
                &registry,
                &table,
                &config.linear_colors,
                &config.linear_canvas,
            )?;
            encode_png(&image, config.linear_canvas.dpi)
        },
        || {
            let image = render_circos(
                &registry,
                &table,
                &config.palette,
                &config.circos_canvas,
                &config.circos,
            )?;
            encode_png(&image, config.circos_canvas.dpi)
        },
    );

    let mut outputs = vec![
        PendingOutput {
            path: &config.linear_output,
            bytes: linear_png?,
        },
        PendingOutput {
            path: &config.circos_output,
            bytes: circos_png?,
        },
    ];
    if let Some(ref table_path) = config.input.table_output {
        let mut bytes = Vec::new();
        write_table(&mut bytes, &registry, &table)?;
        outputs.push(PendingOutput {
            path: table_path,
            bytes,
        });
    }
    write_outputs(outputs)?;

    log::info!(
        "Plotted {} SVs: {}, {}",
        table.len(),
        config.linear_output.display(),
        config.circos_output.display()
    );
    if let Some(ref table_path) = config.input.table_output {
        log::info!("Wrote validated SV table to {}", table_path.display());
    }
    Ok(())
}
