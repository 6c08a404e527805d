//! Test fixtures and helpers.
//!
//! Common setup code for integration tests and benchmarks.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use ordcoll::{Collection, SamplerConfig, Value};

const NAMES: &[&str] = &[
    "ada", "brook", "cyd", "dana", "eli", "fern", "gus", "hale", "ivo", "jun",
];

/// A test fixture holding a sampler config and the generator built from it.
pub struct TestFixture {
    pub sampler: SamplerConfig,
    rng: StdRng,
}

impl TestFixture {
    /// Create a new test fixture with a random seed.
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create with a fixed seed. Fixtures with the same seed produce the
    /// same data.
    pub fn with_seed(seed: u64) -> Self {
        let sampler = SamplerConfig::seeded(seed);
        let rng = sampler.rng();
        Self { sampler, rng }
    }

    /// The seed this fixture was built from.
    pub fn seed(&self) -> Option<u64> {
        self.sampler.seed
    }

    /// The fixture's generator, for handing to the `_with` sampling methods.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// A list of `n` records, each a collection with `id`, `name` and
    /// `score` fields. Ids are `100, 101, ...`; names repeat every ten rows.
    pub fn records(&mut self, n: usize) -> Collection {
        let mut rows = Collection::with_capacity(n);
        for i in 0..n {
            let mut row = Collection::new();
            row.insert("id", 100 + i);
            row.insert("name", NAMES[i % NAMES.len()]);
            row.insert("score", self.rng.gen_range(0i64..100));
            rows.push(row);
        }
        rows
    }

    /// A list of `n` integers in `0..spread`.
    pub fn ints(&mut self, n: usize, spread: i64) -> Collection {
        let spread = spread.max(1);
        Collection::from_values((0..n).map(|_| self.rng.gen_range(0..spread)))
    }

    /// File names `img0.png` to `img{n-1}.png`, some upper-cased, in a
    /// shuffled order.
    pub fn file_names(&mut self, n: usize) -> Collection {
        let mut names: Vec<String> = (0..n)
            .map(|i| {
                if i % 3 == 0 {
                    format!("IMG{}.png", i)
                } else {
                    format!("img{}.png", i)
                }
            })
            .collect();
        names.shuffle(&mut self.rng);
        Collection::from_values(names)
    }

    /// A map from `k0, k1, ...` to `n` scalar values of mixed types.
    pub fn mixed_map(&mut self, n: usize) -> Collection {
        (0..n)
            .map(|i| {
                let value = match self.rng.gen_range(0u8..5) {
                    0 => Value::Null,
                    1 => Value::Bool(self.rng.gen()),
                    2 => Value::Int(self.rng.gen_range(-50..50)),
                    3 => Value::Float(f64::from(self.rng.gen_range(-500i32..500)) / 10.0),
                    _ => Value::from(self.rng.gen_range(0i64..50).to_string()),
                };
                (format!("k{}", i), value)
            })
            .collect()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create `n` fixtures with consecutive seeds starting at `base_seed`.
pub fn seeded_fixtures(base_seed: u64, n: usize) -> Vec<TestFixture> {
    (0..n as u64)
        .map(|i| TestFixture::with_seed(base_seed.wrapping_add(i)))
        .collect()
}
