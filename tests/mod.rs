use quadbayes::*;
use quadbayes::approx::{GridDistribution, Interval};
use quadbayes::prob::{Gamma, Beta};
use quadbayes::model::JobFile;
use ::approx::assert_relative_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;

const EPS : f64 = 1E-2;

fn integral(post : &Posterior) -> f64 {
    post.grid().integrate(post.values())
}

fn flat_rate(n : u64, intvl : f64) -> PoissonRate {
    PoissonRate::new(intvl, n, Prior::flat(0.0, 1E5).unwrap(), 20.0).unwrap()
}

#[test]
fn poisson_flat_prior() {
    let rate = flat_rate(16, 2.0);
    let post = rate.posterior();
    assert_eq!(post.len(), 200);
    assert!((integral(post) - 1.0).abs() < EPS);
    assert!((post.mode() - 8.0).abs() < 0.1);
    assert_relative_eq!(rate.mle(), 8.0);
}

#[test]
fn poisson_exponential_prior_shifts_mode_down() {
    let flat = flat_rate(16, 2.0);
    let exp = PoissonRate::new(2.0, 16, Prior::from_density(Gamma::new(1.0, 10.0).unwrap()), 20.0).unwrap();
    assert!((integral(exp.posterior()) - 1.0).abs() < EPS);
    assert!(exp.posterior().mode() < flat.posterior().mode());

    // Conjugate gamma posterior with shape 17 and rate 2.1.
    assert!((exp.posterior().mode() - 16.0 / 2.1).abs() < 0.1);
    assert!((exp.posterior().mean() - 17.0 / 2.1).abs() < 0.01);
}

#[test]
fn binomial_flat_prior() {
    let alpha = BinomialProbability::new(8, 12).unwrap();
    let post = alpha.posterior();
    assert!((integral(post) - 1.0).abs() < EPS);
    assert!((post.mode() - 2. / 3.).abs() < 0.01);

    // Beta(9, 5) posterior.
    assert!((post.mean() - 9. / 14.).abs() < 1E-3);
}

#[test]
fn binomial_jeffreys_prior() {
    let alpha = BinomialProbability::builder(8, 12)
        .prior(Prior::from_density(Beta::new(0.5, 0.5).unwrap()))
        .range(1E-4, 1. - 1E-4)
        .build()
        .unwrap();
    let post = alpha.posterior();
    assert!((integral(post) - 1.0).abs() < EPS);
    assert!(post.grid().low() > 0.0 && post.grid().high() < 1.0);
    assert!((post.mean() - 8.5 / 13.).abs() < 1E-3);
}

#[test]
fn likelihood_must_be_informed_once() {
    let grid = Grid::linspace(0.0, 1.0, 11).unwrap();
    let both = Posterior::builder(grid.clone())
        .prior(1.0)
        .likelihood(|a : f64| a )
        .log_likelihood(|a : f64| a.ln() )
        .build();
    assert_eq!(both.unwrap_err(), InferenceError::Configuration(ConfigError::ConflictingLikelihood));
    let neither = Posterior::builder(grid).prior(1.0).build();
    assert_eq!(neither.unwrap_err(), InferenceError::Configuration(ConfigError::MissingLikelihood));
}

#[test]
fn grid_size_boundary() {
    let grid = Grid::linspace(0.0, 1.0, 2).unwrap();
    let post = Posterior::builder(grid).prior(1.0).likelihood(|a : f64| 1.0 + a ).build().unwrap();
    assert_relative_eq!(integral(&post), 1.0, epsilon = 1E-12);
    assert_relative_eq!(post.normalizing_constant(), 1.5, epsilon = 1E-12);

    assert!(Grid::linspace(0.0, 1.0, 1).is_err());
    let err = BinomialProbability::builder(8, 12).resolution(1).build().unwrap_err();
    assert!(err.is_configuration());
    assert!(PoissonRate::builder(2.0, 16, 20.0).resolution(0).build().unwrap_err().is_configuration());
}

#[test]
fn construction_is_idempotent() {
    let a = flat_rate(16, 2.0);
    let b = flat_rate(16, 2.0);
    assert_eq!(a.posterior().values(), b.posterior().values());
    assert_eq!(a.posterior().normalizing_constant(), b.posterior().normalizing_constant());
}

#[test]
fn large_counts_stay_finite() {
    let rate = PoissonRate::builder(20.0, 160, 20.0).resolution(400).build().unwrap();
    let post = rate.posterior();
    assert!(post.values().iter().all(|v| v.is_finite() ));
    assert!((integral(post) - 1.0).abs() < EPS);
    assert!((post.mode() - 8.0).abs() < 0.05);
    assert!(post.log_normalizing_constant().is_finite());
}

#[test]
fn summaries_of_rate_posterior() {
    let rate = flat_rate(16, 2.0);
    let post = rate.posterior();
    let cred = post.credible_interval(0.95).unwrap();
    assert!(cred.contains(&post.mode()));
    let hdi = post.hdi(0.95);
    assert_eq!(hdi.len(), 1);
    assert!(hdi[0].contains(&post.mode()));
    assert!(hdi[0].width() <= cred.width() + post.spacing());

    let mut rng = StdRng::seed_from_u64(1);
    let draws = post.sample(&mut rng, 10_000);
    let mean = draws.iter().sum::<f64>() / draws.len() as f64;
    assert!((mean - post.mean()).abs() < 0.1);
}

#[test]
fn demo_job_file() {
    let jobs = JobFile::demo();
    let report = jobs.run().unwrap();
    for fig in report.figures.iter() {
        for curve in fig.curves.iter() {
            let grid = Grid::from_values(curve.x.clone()).unwrap();
            let dens = nalgebra::DVector::from_vec(curve.y.clone());
            assert!((grid.integrate(&dens) - 1.0).abs() < EPS);
        }
    }
    let mut buf = Vec::new();
    report.save_csv(&mut buf).unwrap();
    let n_points : usize = report.figures.iter()
        .flat_map(|fig| fig.curves.iter().map(|c| c.x.len() ) )
        .sum();
    assert_eq!(String::from_utf8(buf).unwrap().lines().count(), n_points + 1);
}
