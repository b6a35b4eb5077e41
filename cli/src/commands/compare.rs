use anyhow::{Context, Result};
use planchers::{display_name, read_floor_file, write_result_json, Comparison, ComparisonConfig};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::CompareArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => ComparisonConfig::from_json_file(path)?,
        None => ComparisonConfig::default(),
    };
    if let Some(precision) = args.precision {
        config.precision = precision;
    }
    let precision = config.precision;

    if cli.verbose > 0 { eprintln!("[compare] loading floor from {}", args.floor.display()); }
    let floor = read_floor_file(&args.floor)?;

    let mut comparison = Comparison::new(config)?;
    if let Some(label) = &floor.floor {
        comparison = comparison.with_floor(label.as_str());
    }
    let result = comparison
        .run(&floor.existing_polygons(), &floor.project_polygons())
        .with_context(|| format!("[compare] failed on {}", args.floor.display()))?
        .rounded(precision);

    match &args.output {
        Some(path) => {
            write_result_json(path, &result)?;
            eprintln!("[compare] wrote {} destinations to {}", result.destinations.len(), path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    if cli.verbose > 0 {
        for (key, metrics) in &result.destinations {
            eprintln!("[compare] {:<32} E={:>12.prec$} P={:>12.prec$} created={:>10.prec$} removed={:>10.prec$}",
                display_name(key), metrics.existing_area, metrics.project_area, metrics.created, metrics.removed,
                prec = precision as usize);
        }
    }
    eprintln!("[compare] {} warning(s)", result.warnings.len());

    Ok(())
}
