// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod logging;
pub mod pipeline;
pub mod submit;
pub mod types;

use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::SchedulerSection;
use crate::pipeline::{Pipeline, reference_pipeline};
use crate::submit::{
    AckParser, DryRunBackend, SbatchBackend, SchedulerBackend, SubmissionReport, Submitter,
};
use crate::types::FanInPolicy;

/// A pipeline with its roots chosen, its fan-in policy resolved and its
/// graph validated, ready to be planned or submitted.
#[derive(Debug, Clone)]
pub struct PreparedRun {
    pub pipeline: Pipeline,
    pub scheduler: SchedulerSection,
    pub fan_in: FanInPolicy,
}

/// Load the pipeline named by `args` and apply the CLI overrides.
///
/// Roots come from `--from`, else `[config].roots`, else every job without
/// predecessors. `--fan-in` overrides `[config].fan_in`.
pub fn prepare(args: &CliArgs) -> Result<PreparedRun> {
    let (mut pipeline, scheduler, file_fan_in) = match &args.config {
        Some(path) => {
            let path = PathBuf::from(path);
            let file = load_and_validate(&path)?;
            info!(config = %path.display(), jobs = file.job.len(), "loaded pipeline file");
            (file.to_pipeline()?, file.scheduler.clone(), file.config.fan_in)
        }
        None => {
            info!("no pipeline file given; using the built-in reference pipeline");
            (
                reference_pipeline()?,
                SchedulerSection::default(),
                FanInPolicy::default(),
            )
        }
    };

    let fan_in = args.fan_in.unwrap_or(file_fan_in);

    if !args.from.is_empty() {
        pipeline.set_roots_by_name(args.from.as_slice())?;
    }

    pipeline.graph.validate(&pipeline.roots, fan_in)?;
    info!(roots = ?pipeline.root_names(), ?fan_in, "pipeline validated");

    Ok(PreparedRun {
        pipeline,
        scheduler,
        fan_in,
    })
}

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - pipeline loading and root selection ([`prepare`])
/// - the scheduler backend (real, or dry-run)
/// - the submission engine
pub async fn run(args: CliArgs) -> Result<()> {
    let PreparedRun {
        pipeline,
        scheduler,
        fan_in,
    } = prepare(&args)?;

    if args.plan {
        print_plan(&pipeline, &scheduler, fan_in);
        return Ok(());
    }

    let ack = AckParser::new(&scheduler.ack_pattern)?;

    let report = if args.dry_run {
        let backend = DryRunBackend::new(scheduler.command.clone(), scheduler.args.clone());
        submit_pipeline(&pipeline, backend, ack, fan_in).await?
    } else {
        let backend = SbatchBackend::new(scheduler.command.clone(), scheduler.args.clone());
        submit_pipeline(&pipeline, backend, ack, fan_in).await?
    };

    print_report(&report);
    Ok(())
}

/// Submit every root of `pipeline` through `backend`.
pub async fn submit_pipeline<B: SchedulerBackend>(
    pipeline: &Pipeline,
    backend: B,
    ack: AckParser,
    fan_in: FanInPolicy,
) -> errors::Result<SubmissionReport> {
    let mut submitter = Submitter::new(backend, ack, fan_in);
    submitter
        .submit_roots(&pipeline.graph, &pipeline.roots)
        .await
}

fn print_report(report: &SubmissionReport) {
    for job in report.jobs() {
        if job.after.is_empty() {
            println!("{}\t{}\t{}", job.job_id, job.name, job.path);
        } else {
            let after: Vec<&str> = job.after.iter().map(|id| id.as_str()).collect();
            println!(
                "{}\t{}\t{}\tafterok:{}",
                job.job_id,
                job.name,
                job.path,
                after.join(":")
            );
        }
    }
}

/// `--plan` output: scheduler settings, roots, jobs and their successors.
fn print_plan(pipeline: &Pipeline, scheduler: &SchedulerSection, fan_in: FanInPolicy) {
    println!("slurmchain plan");
    println!("  scheduler.command = {}", scheduler.command);
    if !scheduler.args.is_empty() {
        println!("  scheduler.args = {:?}", scheduler.args);
    }
    println!("  fan_in = {:?}", fan_in);
    println!("  roots = {:?}", pipeline.root_names());
    println!();

    println!("jobs ({}):", pipeline.graph.len());
    for (_, node) in pipeline.graph.nodes() {
        println!("  - {}", node.name());
        println!("      path: {}", node.path());
        if !node.successors().is_empty() {
            let next: Vec<&str> = node
                .successors()
                .iter()
                .map(|&id| pipeline.graph.node(id).name())
                .collect();
            println!("      then: {:?}", next);
        }
    }

    debug!("plan complete (nothing submitted)");
}
