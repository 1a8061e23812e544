//! Synthetic record generator.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Builder;

use super::record::{Record, RowId, Status};

const FIRST_NAMES: &[&str] = &[
    "Tanner", "Tandy", "Joe", "Kevin", "Maria", "Aisha", "Liam", "Noor", "Priya", "Mateo",
    "Yuki", "Olga", "Kofi", "Elena", "Hiro", "Zara", "Sven", "Amara", "Diego", "Ingrid",
    "Ravi", "Chloe", "Tomas", "Leila",
];

const LAST_NAMES: &[&str] = &[
    "Linsley", "Miller", "Dirte", "Okafor", "Nakamura", "Petrov", "Haddad", "Silva", "Novak",
    "Kowalski", "Fischer", "Andersen", "Mensah", "Castillo", "Tanaka", "Rossi", "Dubois",
    "Ivanova", "Mehta", "Larsen",
];

/// Shape and seed for generated data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GeneratorConfig {
    /// `lens[d]` is the number of records per parent at depth `d`.
    pub lens: Vec<usize>,
    /// Fixed seed for reproducible data. Unseeded runs use the OS RNG.
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    /// A flat collection of `len` records.
    pub fn flat(len: usize) -> Self {
        Self {
            lens: vec![len],
            seed: None,
        }
    }

    /// A nested collection, `lens[d]` records per parent at depth `d`.
    pub fn nested(lens: impl Into<Vec<usize>>) -> Self {
        Self {
            lens: lens.into(),
            seed: None,
        }
    }

    /// Fix the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Generates a record tree shaped by `config.lens`.
pub fn generate(config: &GeneratorConfig) -> Vec<Record> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    debug!("Generating records: lens={:?} seed={:?}", config.lens, config.seed);
    generate_level(&mut rng, &config.lens, 0)
}

fn generate_level<R: Rng>(rng: &mut R, lens: &[usize], depth: usize) -> Vec<Record> {
    let Some(&len) = lens.get(depth) else {
        return Vec::new();
    };
    (0..len)
        .map(|_| {
            let mut record = new_person(rng);
            record.sub_rows = generate_level(rng, lens, depth + 1);
            record
        })
        .collect()
}

fn new_person<R: Rng>(rng: &mut R) -> Record {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);
    let id = RowId::from(Builder::from_random_bytes(bytes).into_uuid());

    Record {
        id,
        first_name: FIRST_NAMES[rng.random_range(0..FIRST_NAMES.len())].to_string(),
        last_name: LAST_NAMES[rng.random_range(0..LAST_NAMES.len())].to_string(),
        age: rng.random_range(0..=40),
        visits: rng.random_range(0..=1000),
        progress: rng.random_range(0..=100),
        status: Status::ALL[rng.random_range(0..Status::ALL.len())],
        sub_rows: Vec::new(),
    }
}
