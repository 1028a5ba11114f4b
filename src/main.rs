mod input;
mod logging;
mod model;
mod plate;
mod qc;
mod report;

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand};

use crate::input::aliquots::{parse_aliquots, parse_plate_created};
use crate::input::dna_rows::parse_dna_rows;
use crate::input::metrics::parse_metrics;
use crate::input::read_payload;
use crate::input::thresholds::{ThresholdSource, resolve_thresholds};
use crate::model::aliquot::{Aliquot, AliquotId, plateable_pool};
use crate::model::thresholds::ThresholdConfig;
use crate::plate::autosave::DraftAutosaver;
use crate::plate::draft::{FileDraftStore, restore_layout};
use crate::plate::layout::PlateLayout;
use crate::plate::samplesheet::{render_sample_sheet, sample_index, today_us_date};
use crate::plate::well::WellPosition;
use crate::qc::batch::{SubmitMode, classify_genotype_batch, plan_dna_submission};
use crate::report::delimited::render_qc_export;
use crate::report::json::render_json;
use crate::report::text::{
    render_dna_text, render_genotype_text, render_plate_text, render_thresholds_text,
};
use crate::report::{GenotypeBatchReport, ToolMeta, build_dna_report, build_plate_report};

#[derive(Debug, Parser)]
#[command(
    name = "genolims-qc",
    version,
    about = "QC classification and plate layout validation for genotyping LIMS workflows"
)]
struct Cli {
    /// QC thresholds JSON (falls back to built-in defaults when unreadable).
    #[arg(long = "thresholds", global = true, env = "GENOLIMS_THRESHOLDS")]
    thresholds_file: Option<PathBuf>,

    /// Emit JSON instead of the text report.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the effective QC thresholds.
    Thresholds,
    /// Classify DNA QC rows and plan their submission.
    DnaQc(DnaQcArgs),
    /// Classify genotyping array metrics.
    GenoQc(GenoQcArgs),
    /// Export aliquot QC results as CSV.
    QcExport(QcExportArgs),
    /// Build and validate a 96-well plate draft.
    Plate(PlateArgs),
}

#[derive(Debug, Args)]
struct QcExportArgs {
    /// JSON array of aliquots with their QC readings.
    #[arg(long)]
    aliquots: PathBuf,
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct DnaQcArgs {
    /// JSON array of {aliquot_id, concentration, a260_280, a260_230}.
    #[arg(long)]
    input: PathBuf,
    /// Submit pass/warn rows and skip hard fails.
    #[arg(long)]
    valid_only: bool,
    /// Write the submission payload here when the batch is accepted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct GenoQcArgs {
    /// JSON array of genotype metrics.
    #[arg(long)]
    input: PathBuf,
    /// Write the per-sample QC results here.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct PlateArgs {
    /// Directory holding the plate draft.
    #[arg(long, global = true, env = "GENOLIMS_DRAFT_DIR", default_value = ".genolims")]
    draft_dir: PathBuf,

    #[command(subcommand)]
    command: PlateCommand,
}

#[derive(Debug, Subcommand)]
enum PlateCommand {
    /// Show the current draft and its validation state.
    Show,
    /// Start a new draft, replacing any existing one.
    New {
        #[arg(long)]
        name: String,
        #[arg(long)]
        barcode: String,
    },
    /// Rename the plate.
    Name { name: String },
    /// Set the plate-wide sentrix barcode.
    Barcode { barcode: String },
    /// Place aliquots in wells; `--well` and `--aliquot` pair up in order.
    Assign {
        #[arg(long = "well", required = true)]
        wells: Vec<WellPosition>,
        #[arg(long = "aliquot", required = true)]
        aliquot_ids: Vec<String>,
        /// Aliquot list; when given, the aliquot must be available.
        #[arg(long)]
        aliquots: Option<PathBuf>,
    },
    /// Empty a well.
    Remove {
        #[arg(long)]
        well: WellPosition,
    },
    /// Override the sentrix position of a well.
    SetPosition {
        #[arg(long)]
        well: WellPosition,
        #[arg(long)]
        position: String,
    },
    /// Reset every well to its default sentrix position.
    Autofill,
    /// List aliquots that can still be placed.
    Available {
        #[arg(long)]
        aliquots: PathBuf,
    },
    /// Check the draft and write the plate creation payload.
    Submit {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Record a successful plate creation response and drop the draft.
    Created {
        #[arg(long)]
        response: PathBuf,
    },
    /// Render the iScan sample sheet for the draft.
    Samplesheet {
        #[arg(long)]
        aliquots: PathBuf,
        /// MM/DD/YYYY; defaults to today (UTC).
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Discard the draft.
    Clear,
}

fn main() {
    logging::init_logging();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let (thresholds, source) = resolve_thresholds(cli.thresholds_file.as_deref());
    match cli.command {
        Command::Thresholds => {
            if cli.json {
                print!("{}", render_json(&thresholds).map_err(|e| e.to_string())?);
            } else {
                print!("{}", render_thresholds_text(&thresholds, &source.to_string()));
            }
            Ok(())
        }
        Command::DnaQc(args) => run_dna_qc(&args, &thresholds, &source, cli.json),
        Command::GenoQc(args) => run_geno_qc(&args, &thresholds, &source, cli.json),
        Command::QcExport(args) => {
            let table = render_qc_export(&load_aliquots(&args.aliquots)?)
                .map_err(|e| format!("failed to render QC export: {e}"))?;
            match &args.out {
                Some(path) => write_output(path, &table),
                None => {
                    print!("{table}");
                    Ok(())
                }
            }
        }
        Command::Plate(args) => run_plate(args, cli.json),
    }
}

fn run_dna_qc(
    args: &DnaQcArgs,
    thresholds: &ThresholdConfig,
    source: &ThresholdSource,
    json: bool,
) -> Result<(), String> {
    let rows = parse_dna_rows(&read_payload(&args.input).map_err(|e| e.to_string())?)
        .map_err(|e| e.to_string())?;
    let mode = if args.valid_only {
        SubmitMode::ValidOnly
    } else {
        SubmitMode::All
    };
    let plan = plan_dna_submission(&rows, thresholds, mode);
    let report = build_dna_report(&rows, thresholds, source.to_string(), mode, &plan);
    if json {
        print!("{}", render_json(&report).map_err(|e| e.to_string())?);
    } else {
        print!("{}", render_dna_text(&report));
    }

    let plan = plan.map_err(|e| format!("cannot submit: {e}"))?;
    tracing::info!(
        rows = plan.rows.len(),
        skipped_failed = plan.skipped_failed,
        "DNA QC batch accepted"
    );
    if let Some(out) = &args.out {
        write_output(out, &render_json(&plan.rows).map_err(|e| e.to_string())?)?;
    }
    Ok(())
}

fn run_geno_qc(
    args: &GenoQcArgs,
    thresholds: &ThresholdConfig,
    source: &ThresholdSource,
    json: bool,
) -> Result<(), String> {
    let metrics = parse_metrics(&read_payload(&args.input).map_err(|e| e.to_string())?)
        .map_err(|e| format!("cannot upload: {e}"))?;
    let (qc_results, counts) = classify_genotype_batch(&metrics, thresholds);
    tracing::info!(
        samples = counts.total(),
        pass = counts.pass,
        warn = counts.warn,
        fail = counts.fail,
        "genotype metrics classified"
    );
    let report = GenotypeBatchReport {
        tool: ToolMeta::current(),
        thresholds: *thresholds,
        threshold_source: source.to_string(),
        counts,
        qc_results,
    };
    if json {
        print!("{}", render_json(&report).map_err(|e| e.to_string())?);
    } else {
        print!("{}", render_genotype_text(&report));
    }
    if let Some(out) = &args.out {
        write_output(out, &render_json(&report.qc_results).map_err(|e| e.to_string())?)?;
    }
    Ok(())
}

fn run_plate(args: PlateArgs, json: bool) -> Result<(), String> {
    let store = FileDraftStore::new(&args.draft_dir);
    let mut layout = restore_layout(&store);
    let mut autosaver = DraftAutosaver::new(store);
    let mut rejected = Vec::new();

    let changed = match args.command {
        PlateCommand::Show => false,
        PlateCommand::New { name, barcode } => {
            layout = PlateLayout::new(name, barcode);
            true
        }
        PlateCommand::Name { name } => {
            layout.name = name;
            true
        }
        PlateCommand::Barcode { barcode } => {
            layout.set_sentrix_barcode(barcode);
            true
        }
        PlateCommand::Assign {
            wells,
            aliquot_ids,
            aliquots,
        } => {
            if wells.len() != aliquot_ids.len() {
                return Err(format!(
                    "{} wells given for {} aliquots",
                    wells.len(),
                    aliquot_ids.len()
                ));
            }
            let pool = aliquots.map(|path| load_aliquots(&path)).transpose()?;
            let mut placed = false;
            for (well, id) in wells.into_iter().zip(aliquot_ids.into_iter().map(AliquotId::new)) {
                let available = pool
                    .as_ref()
                    .is_none_or(|p| layout.available_aliquots(p).iter().any(|a| a.id == id));
                if !available {
                    rejected.push(format!("aliquot {id} is not available for plating"));
                    continue;
                }
                if !layout.assign_aliquot(well, id.clone()) {
                    tracing::warn!("set a sentrix barcode before assigning aliquots");
                    break;
                }
                tracing::info!("aliquot {id} added to well {well}");
                placed = true;
                let now = Instant::now();
                autosaver.record_change(&layout, now).map_err(|e| e.to_string())?;
                autosaver.poll(now).map_err(|e| e.to_string())?;
            }
            placed
        }
        PlateCommand::Remove { well } => layout.remove_aliquot(well).is_some(),
        PlateCommand::SetPosition { well, position } => {
            layout
                .set_sentrix_position(well, &position)
                .map_err(|e| e.to_string())?;
            true
        }
        PlateCommand::Autofill => {
            layout.auto_fill_positions();
            tracing::info!("auto-generated sentrix positions for all wells");
            true
        }
        PlateCommand::Available { aliquots } => {
            let pool = plateable_pool(&load_aliquots(&aliquots)?);
            let available = layout.available_aliquots(&pool);
            if json {
                print!("{}", render_json(&available).map_err(|e| e.to_string())?);
            } else {
                println!("{} of {} QC-passed aliquots available", available.len(), pool.len());
                for a in available {
                    let flag = a.qc_flag.map(|f| f.as_str()).unwrap_or("-");
                    println!("{}\t{}\t{}", a.id, a.sample_id, flag);
                }
            }
            return Ok(());
        }
        PlateCommand::Submit { out } => {
            let submission = match layout.prepare_submission() {
                Ok(s) => s,
                Err(violations) => {
                    print_plate(&layout, json)?;
                    return Err(format!(
                        "plate has {} validation errors",
                        violations.len()
                    ));
                }
            };
            let body = render_json(&submission).map_err(|e| e.to_string())?;
            match out {
                Some(path) => write_output(&path, &body)?,
                None => print!("{body}"),
            }
            return Ok(());
        }
        PlateCommand::Created { response } => {
            let created = parse_plate_created(&read_payload(&response).map_err(|e| e.to_string())?)
                .map_err(|e| e.to_string())?;
            autosaver.discard().map_err(|e| e.to_string())?;
            println!(
                "Plate {} created with {} wells",
                created.id, created.well_count
            );
            return Ok(());
        }
        PlateCommand::Samplesheet {
            aliquots,
            date,
            out,
        } => {
            let submission = layout.prepare_submission().map_err(|v| {
                format!("plate has {} validation errors", v.len())
            })?;
            let index = sample_index(&load_aliquots(&aliquots)?);
            let date = date.unwrap_or_else(today_us_date);
            let sheet = render_sample_sheet(&submission, &index, &date)
                .map_err(|e| format!("failed to render sample sheet: {e}"))?;
            match out {
                Some(path) => write_output(&path, &sheet)?,
                None => print!("{sheet}"),
            }
            return Ok(());
        }
        PlateCommand::Clear => {
            layout.clear();
            autosaver
                .record_change(&layout, Instant::now())
                .map_err(|e| e.to_string())?;
            println!("Plate cleared");
            return Ok(());
        }
    };

    if changed {
        autosaver
            .record_change(&layout, Instant::now())
            .map_err(|e| e.to_string())?;
    }
    // The process ends here, so a draft still in its quiet period is written now.
    autosaver.flush().map_err(|e| e.to_string())?;
    print_plate(&layout, json)?;
    if rejected.is_empty() {
        Ok(())
    } else {
        Err(rejected.join("; "))
    }
}

fn print_plate(layout: &PlateLayout, json: bool) -> Result<(), String> {
    let report = build_plate_report(layout);
    if json {
        print!("{}", render_json(&report).map_err(|e| e.to_string())?);
    } else {
        print!("{}", render_plate_text(&report, layout));
    }
    Ok(())
}

fn load_aliquots(path: &Path) -> Result<Vec<Aliquot>, String> {
    parse_aliquots(&read_payload(path).map_err(|e| e.to_string())?).map_err(|e| e.to_string())
}

fn write_output(path: &Path, contents: &str) -> Result<(), String> {
    std::fs::write(path, contents)
        .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote output");
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
