use clap::Args;
use oriento::error::AppError;
use oriento::explore::formations::{load_snapshot_path, merge_stats};
use oriento::explore::{FormationCatalogue, FormationImporter};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ImportArgs {
    /// Parcoursup cartography CSV export
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Destination JSON file
    #[arg(long)]
    pub(crate) out: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct MergeArgs {
    /// Formations JSON produced by `formations import`
    #[arg(long)]
    pub(crate) catalogue: PathBuf,
    /// Parcoursup statistics snapshot (JSON array of records)
    #[arg(long)]
    pub(crate) stats: PathBuf,
    /// Destination JSON file
    #[arg(long)]
    pub(crate) out: PathBuf,
}

pub(crate) fn run_import(args: ImportArgs) -> Result<(), AppError> {
    let ImportArgs { csv, out } = args;

    let catalogue = FormationImporter::from_path(&csv)?;
    catalogue.save_json(&out)?;

    println!(
        "formations.json généré ({} formations) -> {}",
        catalogue.len(),
        out.display()
    );
    Ok(())
}

pub(crate) fn run_merge(args: MergeArgs) -> Result<(), AppError> {
    let MergeArgs {
        catalogue,
        stats,
        out,
    } = args;

    let formations = FormationCatalogue::from_path(&catalogue)?;
    let records = load_snapshot_path(&stats)?;
    let (merged, summary) = merge_stats(formations, &records);
    merged.save_json(&out)?;

    println!("Cartographie total: {}", summary.catalogue);
    println!("API Stats total: {}", summary.stats);
    println!("Formations conservées après filtrage: {}", summary.kept);
    println!("Formations uniques après dédoublonnage: {}", summary.unique);
    println!("JSON final généré -> {}", out.display());
    Ok(())
}
