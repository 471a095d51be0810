use std::env;
use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::{Duration, Instant};
use log::LevelFilter;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp};
use forksort::{sort_parallel_with, sort_sequential, SortConfig};

const DEFAULT_SIZES: [usize; 10] = [
    100, 1_000, 10_000, 100_000, 1_000_000, 2_500_000, 5_000_000, 7_500_000, 10_000_000, 20_000_000,
];
const DEFAULT_OUTPUT: &str = "times.csv";
const DEFAULT_SEED: u64 = 12345;

#[derive(Debug, Clone, Copy)]
enum Input {
    Uniform,
    Exponential,
}

impl Input {
    fn parse(arg: &str) -> Result<Input, String> {
        match arg {
            "uniform" => Ok(Input::Uniform),
            "exponential" => Ok(Input::Exponential),
            other => Err(format!("unknown input distribution '{}' (uniform, exponential)", other)),
        }
    }

    fn generate(self, rng: &mut StdRng, length: usize) -> Result<Vec<u32>, Box<dyn Error>> {
        let data = match self {
            Input::Uniform => (0..length).map(|_| rng.gen::<u32>()).collect(),
            Input::Exponential => {
                let exp = Exp::new(1e-6)?;
                (0..length).map(|_| (exp.sample(rng) as u64).min(u32::MAX as u64) as u32).collect()
            }
        };
        Ok(data)
    }
}

/// Times `sort_sequential` against `sort_parallel_with` on fresh random input
/// for every size and writes `N,seq,par` rows in milliseconds.
///
/// Usage: forksort [sizes] [output.csv] [seed] [uniform|exponential]
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut args = env::args();
    args.next();

    let sizes = match args.next() {
        Some(arg) => parse_sizes(&arg)?,
        None => {
            warn!("No sizes specified. Using {:?}", DEFAULT_SIZES);
            DEFAULT_SIZES.to_vec()
        }
    };
    let output = args.next().unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
    let seed = match args.next() {
        Some(arg) => arg.parse::<u64>()?,
        None => DEFAULT_SEED,
    };
    let input = match args.next() {
        Some(arg) => Input::parse(&arg)?,
        None => Input::Uniform,
    };

    let config = SortConfig::from_env();
    info!("Config: {:?}, input: {:?}, seed: {}", config, input, seed);

    let mut writer = BufWriter::new(File::create(&output)?);
    writeln!(writer, "N,seq,par")?;

    let mut rng = StdRng::seed_from_u64(seed);
    for size in sizes {
        let mut data = input.generate(&mut rng, size)?;
        let seq = time(|| sort_sequential(&mut data))?;
        verify_sorted(&data)?;
        println!("Finished sequential with size {} in {} ms", size, seq.as_millis());

        let mut data = input.generate(&mut rng, size)?;
        let par = time(|| sort_parallel_with(&mut data, &config))?;
        verify_sorted(&data)?;
        println!("Finished parallel with size {} in {} ms", size, par.as_millis());

        writeln!(writer, "{},{},{}", size, seq.as_millis(), par.as_millis())?;
    }
    writer.flush()?;
    info!("Wrote {}", output);
    Ok(())
}

fn time<E>(f: impl FnOnce() -> Result<(), E>) -> Result<Duration, E> {
    let start = Instant::now();
    f()?;
    Ok(start.elapsed())
}

/// Accepts `[100, 1000]` or `100,1000`.
fn parse_sizes(arg: &str) -> Result<Vec<usize>, Box<dyn Error>> {
    let trimmed = arg.trim_matches(|c| c == '[' || c == ']');
    let mut sizes = Vec::new();
    for s in trimmed.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        sizes.push(s.replace('_', "").parse::<usize>()?);
    }
    Ok(sizes)
}

fn verify_sorted(arr: &[u32]) -> Result<(), String> {
    match arr.windows(2).position(|w| w[0] > w[1]) {
        Some(i) => Err(format!("Array not sorted! {} (i={}) > {} (i={})", arr[i], i, arr[i + 1], i + 1)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_with_brackets_and_underscores() {
        assert_eq!(parse_sizes("[100, 1_000,10000]").unwrap(), vec![100, 1000, 10000]);
        assert!(parse_sizes("[abc]").is_err());
    }

    #[test]
    fn unknown_distribution_is_rejected() {
        assert!(Input::parse("zipf").is_err());
        assert!(matches!(Input::parse("exponential"), Ok(Input::Exponential)));
    }

    #[test]
    fn generated_inputs_have_requested_length() {
        let mut rng = StdRng::seed_from_u64(1);
        for input in [Input::Uniform, Input::Exponential] {
            assert_eq!(input.generate(&mut rng, 1000).unwrap().len(), 1000);
        }
    }

    #[test]
    fn verify_sorted_reports_first_inversion() {
        assert!(verify_sorted(&[1, 2, 2, 3]).is_ok());
        assert!(verify_sorted(&[1, 3, 2]).unwrap_err().contains("(i=1)"));
    }
}
