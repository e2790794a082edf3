use crate::AttributeSet;
use anyhow::{Error, Result};
use itertools::Itertools;
use tracing_subscriber::EnvFilter;

pub fn init_tracing_subscriber(default_filter: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(Error::msg)
}

pub fn setup_rayon(num_threads: Option<usize>) -> Result<()> {
    if let Some(num_threads) = num_threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()?;
    }
    Ok(())
}

/// All subsets of `attributes`, ordered by size and lexicographically
/// within a size. The empty set comes first and `attributes` itself last.
pub fn power_set(attributes: &AttributeSet) -> Vec<AttributeSet> {
    let n = attributes.len();
    let mut ans = Vec::with_capacity(1 << n);
    ans.push(AttributeSet::new());
    for k in 1..=n {
        ans.extend(
            attributes
                .iter()
                .combinations(k)
                .map(|subset| subset.into_iter().collect::<AttributeSet>()),
        );
    }
    ans
}

/// Non-empty proper subsets of `attributes`, smallest first.
pub fn proper_subsets(attributes: &AttributeSet) -> impl Iterator<Item = AttributeSet> {
    let n = attributes.len();
    power_set(attributes)
        .into_iter()
        .filter(move |s| !s.is_empty() && s.len() < n)
}
