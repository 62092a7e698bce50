use serde::{Serialize, Deserialize};
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::fmt::{self, Display};
use std::path::Path;
use std::str::FromStr;
use log::info;
use crate::error::{ConfigError, InferenceError, JobError};
use crate::posterior::{Posterior, Prior, PoissonRate, BinomialProbability, DEFAULT_RESOLUTION};
use crate::prob::{Uniform, Gamma, Beta};
use crate::plot::{Curve, Figure, LineStyle, PlotConfig, Report};
use crate::approx::{GridDistribution, Summary};

/// Data model whose parameter is inferred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ModelSpec {

    /// Rate of a Poisson process, given count events observed over an interval intvl.
    Poisson { intvl : f64, count : u64 },

    /// Success probability of a Bernoulli outcome, given successes over trials.
    Binomial { successes : u64, trials : u64 }

}

impl Display for ModelSpec {

    fn fmt(&self, f : &mut fmt::Formatter) -> fmt::Result {
        match self {
            ModelSpec::Poisson { intvl, count } => write!(f, "poisson(n={}, T={})", count, intvl),
            ModelSpec::Binomial { successes, trials } => write!(f, "binomial(n={}, trials={})", successes, trials)
        }
    }

}

/// Prior over the model parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PriorSpec {

    /// Unnormalized constant prior.
    Flat,

    /// Proper flat prior 1 / (high - low) within [low, high].
    Uniform { low : f64, high : f64 },

    Gamma { shape : f64, scale : f64 },

    Exponential { scale : f64 },

    Beta { a : f64, b : f64 }

}

impl Default for PriorSpec {

    fn default() -> Self {
        PriorSpec::Flat
    }

}

impl PriorSpec {

    pub fn to_prior(&self) -> Result<Prior, ConfigError> {
        match *self {
            PriorSpec::Flat => Ok(Prior::default()),
            PriorSpec::Uniform { low, high } => Ok(Prior::from_density(Uniform::new(low, high)?)),
            PriorSpec::Gamma { shape, scale } => Ok(Prior::from_density(Gamma::new(shape, scale)?)),
            PriorSpec::Exponential { scale } => Ok(Prior::from_density(Gamma::exponential(scale)?)),
            PriorSpec::Beta { a, b } => Ok(Prior::from_density(Beta::new(a, b)?))
        }
    }

}

fn parse_params(name : &str, params : &[&str], expected : usize) -> Result<Vec<f64>, ConfigError> {
    if params.len() != expected {
        return Err(ConfigError::InvalidPriorSpec(
            format!("{} prior takes {} parameter(s), but {} were informed", name, expected, params.len())
        ));
    }
    params.iter()
        .map(|p| p.trim().parse::<f64>().map_err(|e| ConfigError::InvalidPriorSpec(format!("{}: {}", p, e)) ) )
        .collect()
}

/// Parses the compact form used at the command line: flat, flat:LOW:HIGH (or
/// uniform:LOW:HIGH), gamma:SHAPE:SCALE, exp:SCALE and beta:A:B.
impl FromStr for PriorSpec {

    type Err = ConfigError;

    fn from_str(s : &str) -> Result<Self, ConfigError> {
        let mut parts = s.trim().split(':');
        let name = parts.next().unwrap_or("").to_lowercase();
        let params : Vec<&str> = parts.collect();
        match &name[..] {
            "flat" if params.is_empty() => Ok(PriorSpec::Flat),
            "flat" | "uniform" => {
                let p = parse_params(&name, &params, 2)?;
                Ok(PriorSpec::Uniform { low : p[0], high : p[1] })
            },
            "gamma" => {
                let p = parse_params(&name, &params, 2)?;
                Ok(PriorSpec::Gamma { shape : p[0], scale : p[1] })
            },
            "exp" | "exponential" => {
                let p = parse_params(&name, &params, 1)?;
                Ok(PriorSpec::Exponential { scale : p[0] })
            },
            "beta" => {
                let p = parse_params(&name, &params, 2)?;
                Ok(PriorSpec::Beta { a : p[0], b : p[1] })
            },
            other => Err(ConfigError::InvalidPriorSpec(format!("Unknown prior: {}", other)))
        }
    }

}

impl Display for PriorSpec {

    fn fmt(&self, f : &mut fmt::Formatter) -> fmt::Result {
        match self {
            PriorSpec::Flat => write!(f, "flat"),
            PriorSpec::Uniform { low, high } => write!(f, "uniform:{}:{}", low, high),
            PriorSpec::Gamma { shape, scale } => write!(f, "gamma:{}:{}", shape, scale),
            PriorSpec::Exponential { scale } => write!(f, "exp:{}", scale),
            PriorSpec::Beta { a, b } => write!(f, "beta:{}:{}", a, b)
        }
    }

}

/// Grid bounds and resolution. Missing fields take the model defaults: [0, 1] for
/// binomial probabilities; [0, PoissonRate::default_upper] for Poisson rates;
/// and 200 points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct GridSpec {

    #[serde(default)]
    pub low : Option<f64>,

    #[serde(default)]
    pub high : Option<f64>,

    #[serde(default)]
    pub points : Option<usize>

}

/// A single inference: a model with its observed data, a prior, the grid to
/// evaluate them over and how to display the resulting posterior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {

    #[serde(default)]
    pub name : Option<String>,

    pub model : ModelSpec,

    #[serde(default)]
    pub prior : PriorSpec,

    #[serde(default)]
    pub grid : GridSpec,

    #[serde(default)]
    pub style : LineStyle

}

impl Job {

    pub fn new(model : ModelSpec, prior : PriorSpec) -> Self {
        Self { name : None, model, prior, grid : Default::default(), style : Default::default() }
    }

    pub fn with_grid(mut self, grid : GridSpec) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_style(mut self, style : LineStyle) -> Self {
        self.style = style;
        self
    }

    /// The informed name, or a description of model and prior.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{} {}", self.model, self.prior)
        }
    }

    pub fn posterior(&self) -> Result<Posterior, InferenceError> {
        let prior = self.prior.to_prior()?;
        let points = self.grid.points.unwrap_or(DEFAULT_RESOLUTION);
        match self.model {
            ModelSpec::Poisson { intvl, count } => {
                let high = self.grid.high.unwrap_or_else(|| PoissonRate::default_upper(intvl, count) );
                let post = PoissonRate::builder(intvl, count, high)
                    .prior(prior)
                    .lower(self.grid.low.unwrap_or(0.0))
                    .resolution(points)
                    .build()?;
                Ok(post.into_posterior())
            },
            ModelSpec::Binomial { successes, trials } => {
                let post = BinomialProbability::builder(successes, trials)
                    .prior(prior)
                    .range(self.grid.low.unwrap_or(0.0), self.grid.high.unwrap_or(1.0))
                    .resolution(points)
                    .build()?;
                Ok(post.into_posterior())
            }
        }
    }

    fn run(&self) -> Result<Posterior, JobError> {
        let post = self.posterior()
            .map_err(|source| JobError::Inference { name : self.label(), source } )?;
        info!("{}: {}", self.label(), post);
        Ok(post)
    }

    pub fn curve(&self) -> Result<Curve, JobError> {
        Ok(self.run()?.curve(self.style.clone()).with_label(&self.label()))
    }

}

/// Summary of one job's posterior, flattened for tabular output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub panel : usize,
    pub job : String,
    pub mode : f64,
    pub mean : f64,
    pub sd : f64,
    pub median : f64,
    pub level : f64,
    pub low : f64,
    pub high : f64
}

impl SummaryRow {

    fn new(panel : usize, job : String, s : Summary) -> Self {
        Self {
            panel,
            job,
            mode : s.mode,
            mean : s.mean,
            sd : s.sd,
            median : s.median,
            level : s.level,
            low : s.low,
            high : s.high
        }
    }

}

/// Jobs whose posteriors are displayed over the same axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {

    #[serde(default)]
    pub xlabel : Option<String>,

    #[serde(default)]
    pub ylabel : Option<String>,

    pub jobs : Vec<Job>

}

impl Panel {

    pub fn run(&self) -> Result<Figure, JobError> {
        let mut fig = Figure::new(self.xlabel.clone(), self.ylabel.clone());
        for job in self.jobs.iter() {
            fig.push(job.curve()?);
        }
        Ok(fig)
    }

}

/// A set of panels, with the settings used to render them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobFile {

    #[serde(default)]
    pub config : PlotConfig,

    pub panels : Vec<Panel>

}

impl JobFile {

    pub fn single(job : Job, xlabel : &str) -> Self {
        let panel = Panel { xlabel : Some(xlabel.to_string()), ylabel : Some(String::from("Posterior PDF")), jobs : vec![job] };
        Self { config : Default::default(), panels : vec![panel] }
    }

    pub fn load_from_path<P>(path : P) -> Result<Self, JobError>
    where
        P : AsRef<Path>
    {
        let f = File::open(path)?;
        Self::load(f)
    }

    pub fn load<R>(mut reader : R) -> Result<Self, JobError>
    where
        R : Read
    {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        let jobs : JobFile = serde_json::from_str(&content[..])?;
        Ok(jobs)
    }

    pub fn save_to_path<P>(&self, path : P) -> Result<(), JobError>
    where
        P : AsRef<Path>
    {
        let file = OpenOptions::new().write(true).create(true).truncate(true).open(path)?;
        self.save(file)
    }

    pub fn save<W>(&self, mut writer : W) -> Result<(), JobError>
    where
        W : Write
    {
        let content = serde_json::to_string_pretty(&self)?;
        writer.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Poisson rates for (n, T) = (16, 2) and (80, 10) under a flat prior over
    /// [0, 1E5] and an exponential prior with mean 10; and binomial probabilities
    /// for 8 successes in 12 trials under a flat and a Beta(1/2, 1/2) prior.
    pub fn demo() -> Self {
        let rate_grid = GridSpec { low : Some(0.0), high : Some(20.0), points : Some(DEFAULT_RESOLUTION) };
        let flat_rate = PriorSpec::Uniform { low : 0.0, high : 1E5 };
        let exp_rate = PriorSpec::Exponential { scale : 10.0 };
        let mut rate_jobs = Vec::new();
        for &(count, intvl) in [(16, 2.0), (80, 10.0)].iter() {
            let model = ModelSpec::Poisson { intvl, count };
            rate_jobs.push(
                Job::new(model.clone(), flat_rate.clone())
                    .with_grid(rate_grid)
                    .with_style(LineStyle::default().with_alpha(0.5))
            );
            rate_jobs.push(
                Job::new(model, exp_rate.clone())
                    .with_grid(rate_grid)
                    .with_style(LineStyle::new("g--"))
            );
        }
        let binomial = ModelSpec::Binomial { successes : 8, trials : 12 };
        let alpha_jobs = vec![
            Job::new(binomial.clone(), PriorSpec::Flat)
                .with_style(LineStyle::default().with_alpha(0.5)),
            Job::new(binomial, PriorSpec::Beta { a : 0.5, b : 0.5 })
                .with_grid(GridSpec { low : Some(1E-4), high : Some(1. - 1E-4), points : None })
                .with_style(LineStyle::new("g--"))
        ];
        let panels = vec![
            Panel { xlabel : Some(String::from(r"Rate (s$^{-1}$)")), ylabel : Some(String::from("PDF (s)")), jobs : rate_jobs },
            Panel { xlabel : Some(String::from(r"$\alpha$")), ylabel : Some(String::from("Posterior PDF")), jobs : alpha_jobs }
        ];
        Self { config : Default::default(), panels }
    }

    /// Evaluates every job, yielding one figure per panel.
    pub fn run(&self) -> Result<Report, JobError> {
        let figures = self.panels.iter()
            .map(|panel| panel.run() )
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Report::new(self.config.clone(), figures))
    }

    /// Summaries of every job, with central credible intervals at the informed level.
    pub fn summaries(&self, level : f64) -> Result<Vec<SummaryRow>, JobError> {
        let mut rows = Vec::new();
        for (panel_ix, panel) in self.panels.iter().enumerate() {
            for job in panel.jobs.iter() {
                let post = job.run()?;
                rows.push(SummaryRow::new(panel_ix, job.label(), post.summary(level)));
            }
        }
        Ok(rows)
    }

}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn prior_specs_parse() {
        assert_eq!("flat".parse::<PriorSpec>().unwrap(), PriorSpec::Flat);
        assert_eq!("flat:0:1e5".parse::<PriorSpec>().unwrap(), PriorSpec::Uniform { low : 0.0, high : 1E5 });
        assert_eq!("gamma:1:10".parse::<PriorSpec>().unwrap(), PriorSpec::Gamma { shape : 1.0, scale : 10.0 });
        assert_eq!("exp:10".parse::<PriorSpec>().unwrap(), PriorSpec::Exponential { scale : 10.0 });
        assert_eq!("Beta:0.5:0.5".parse::<PriorSpec>().unwrap(), PriorSpec::Beta { a : 0.5, b : 0.5 });
        assert!("beta:0.5".parse::<PriorSpec>().is_err());
        assert!("gamma:one:10".parse::<PriorSpec>().is_err());
        assert!("normal:0:1".parse::<PriorSpec>().is_err());
    }

    #[test]
    fn prior_spec_display_parses_back() {
        for spec in [PriorSpec::Flat, PriorSpec::Gamma { shape : 2.0, scale : 0.5 }, PriorSpec::Exponential { scale : 10.0 }].iter() {
            assert_eq!(&spec.to_string().parse::<PriorSpec>().unwrap(), spec);
        }
    }

    #[test]
    fn invalid_prior_parameters_fail_the_job() {
        let job = Job::new(ModelSpec::Binomial { successes : 1, trials : 2 }, PriorSpec::Beta { a : -1.0, b : 1.0 });
        assert!(job.posterior().unwrap_err().is_configuration());
        assert!(matches!(job.curve(), Err(JobError::Inference { .. })));
    }

    #[test]
    fn job_file_from_json() {
        let content = r#"{
            "panels" : [{
                "xlabel" : "alpha",
                "jobs" : [
                    { "model" : { "kind" : "binomial", "successes" : 8, "trials" : 12 } },
                    {
                        "name" : "jeffreys",
                        "model" : { "kind" : "binomial", "successes" : 8, "trials" : 12 },
                        "prior" : { "kind" : "beta", "a" : 0.5, "b" : 0.5 },
                        "grid" : { "low" : 0.0001, "high" : 0.9999, "points" : 400 },
                        "style" : { "line" : "g--" }
                    }
                ]
            }]
        }"#;
        let jobs = JobFile::load(content.as_bytes()).unwrap();
        assert_eq!(jobs.config, PlotConfig::default());
        let panel = &jobs.panels[0];
        assert_eq!(panel.jobs[0].prior, PriorSpec::Flat);
        assert_eq!(panel.jobs[1].grid.points, Some(400));
        assert_eq!(panel.jobs[1].style.width, 3.0);
        let report = jobs.run().unwrap();
        assert_eq!(report.figures[0].curves.len(), 2);
        assert_eq!(report.figures[0].curves[1].x.len(), 400);
        assert_eq!(report.figures[0].curves[1].label.as_deref(), Some("jeffreys"));
        assert_eq!(report.figures[0].curves[0].label.as_deref(), Some("binomial(n=8, trials=12) flat"));
    }

    #[test]
    fn job_file_save_and_load() {
        let demo = JobFile::demo();
        let mut buf = Vec::new();
        demo.save(&mut buf).unwrap();
        assert_eq!(JobFile::load(&buf[..]).unwrap(), demo);
    }

    #[test]
    fn demo_runs() {
        let report = JobFile::demo().run().unwrap();
        assert_eq!(report.figures.len(), 2);
        assert_eq!(report.figures[0].curves.len(), 4);
        assert_eq!(report.figures[1].curves.len(), 2);
        let rows = JobFile::demo().summaries(0.95).unwrap();
        assert_eq!(rows.len(), 6);
        assert!(rows.iter().all(|r| r.low < r.mode && r.mode < r.high ));
    }

}
