use structopt::StructOpt;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;
use anyhow::{anyhow, Context};
use log::info;
use quadbayes::model::{GridSpec, Job, JobFile, ModelSpec, PriorSpec};

#[derive(Debug, Clone, Copy)]
pub enum Format {
    Json,
    Csv
}

impl FromStr for Format {

    type Err = anyhow::Error;

    fn from_str(s : &str) -> Result<Self, anyhow::Error> {
        match &s.to_lowercase()[..] {
            "json" => Ok(Format::Json),
            "csv" => Ok(Format::Csv),
            other => Err(anyhow!("Unknown output format: {} (expected json or csv)", other))
        }
    }

}

#[derive(StructOpt, Debug)]
pub struct Output {

    /// Output file (standard output if not informed)
    #[structopt(short, long)]
    output : Option<PathBuf>,

    /// Output format (json or csv)
    #[structopt(short, long, default_value = "json")]
    format : Format,

    /// Writes point and interval summaries instead of the posterior curves
    #[structopt(long)]
    summary : bool,

    /// Probability mass of the central credible interval in the summary
    #[structopt(long, default_value = "0.95")]
    level : f64,

    /// Requests TeX rendering of labels from the plotting collaborator
    #[structopt(long)]
    tex : bool

}

/// Posterior densities of a single parameter evaluated over a grid
#[derive(StructOpt, Debug)]
pub enum Quadbayes {

    /// Posterior of a Poisson rate given a count observed over an interval
    Poisson {

        /// Observation interval (exposure)
        #[structopt(long)]
        intvl : f64,

        /// Number of observed events
        #[structopt(long)]
        count : u64,

        /// Upper rate bound (count plus six standard errors over the interval if not informed)
        #[structopt(long)]
        upper : Option<f64>,

        #[structopt(long, default_value = "0")]
        lower : f64,

        #[structopt(long, default_value = "200")]
        points : usize,

        /// flat, flat:LOW:HIGH, gamma:SHAPE:SCALE or exp:SCALE
        #[structopt(long, default_value = "flat")]
        prior : PriorSpec,

        #[structopt(flatten)]
        out : Output
    },

    /// Posterior of a success probability given successes over trials
    Binomial {

        #[structopt(long)]
        successes : u64,

        #[structopt(long)]
        trials : u64,

        #[structopt(long, default_value = "0")]
        low : f64,

        #[structopt(long, default_value = "1")]
        high : f64,

        #[structopt(long, default_value = "200")]
        points : usize,

        /// flat, flat:LOW:HIGH or beta:A:B
        #[structopt(long, default_value = "flat")]
        prior : PriorSpec,

        #[structopt(flatten)]
        out : Output
    },

    /// Evaluates all jobs of a JSON job file
    Run {

        job : PathBuf,

        #[structopt(flatten)]
        out : Output
    },

    /// Evaluates the Poisson rate and binomial probability demonstration jobs
    Demo {

        /// Also writes the demonstration job file, as a template for the run command
        #[structopt(long)]
        save_jobs : Option<PathBuf>,

        #[structopt(flatten)]
        out : Output
    }

}

fn writer(out : &Output) -> anyhow::Result<Box<dyn Write>> {
    match &out.output {
        Some(path) => {
            let f = File::create(path)
                .with_context(|| format!("Could not create output file {}", path.display()) )?;
            Ok(Box::new(f))
        },
        None => Ok(Box::new(io::stdout()))
    }
}

fn write_output(jobs : &JobFile, out : &Output) -> anyhow::Result<()> {
    let mut w = writer(out)?;
    if out.summary {
        let rows = jobs.summaries(out.level)?;
        match out.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut w, &rows)?;
                writeln!(w)?;
            },
            Format::Csv => {
                let mut wtr = csv::Writer::from_writer(w);
                for row in rows.iter() {
                    wtr.serialize(row)?;
                }
                wtr.flush()?;
            }
        }
    } else {
        let mut report = jobs.run()?;
        if out.tex {
            report.config = report.config.tex_on();
        }
        match out.format {
            Format::Json => report.save_json(w)?,
            Format::Csv => report.save_csv(w)?
        }
    }
    if let Some(path) = &out.output {
        info!("Output written to {}", path.display());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cmd = Quadbayes::from_args();
    match &cmd {
        Quadbayes::Poisson { intvl, count, upper, lower, points, prior, out } => {
            let grid = GridSpec { low : Some(*lower), high : *upper, points : Some(*points) };
            let job = Job::new(ModelSpec::Poisson { intvl : *intvl, count : *count }, prior.clone())
                .with_grid(grid);
            write_output(&JobFile::single(job, r"Rate (s$^{-1}$)"), out)
        },
        Quadbayes::Binomial { successes, trials, low, high, points, prior, out } => {
            let grid = GridSpec { low : Some(*low), high : Some(*high), points : Some(*points) };
            let job = Job::new(ModelSpec::Binomial { successes : *successes, trials : *trials }, prior.clone())
                .with_grid(grid);
            write_output(&JobFile::single(job, r"$\alpha$"), out)
        },
        Quadbayes::Run { job, out } => {
            let jobs = JobFile::load_from_path(job)
                .with_context(|| format!("Could not load job file {}", job.display()) )?;
            info!("Loaded {} panel(s) from {}", jobs.panels.len(), job.display());
            write_output(&jobs, out)
        },
        Quadbayes::Demo { save_jobs, out } => {
            let jobs = JobFile::demo();
            if let Some(path) = save_jobs {
                jobs.save_to_path(path)
                    .with_context(|| format!("Could not save job file {}", path.display()) )?;
                info!("Demonstration jobs written to {}", path.display());
            }
            write_output(&jobs, out)
        }
    }
}
