//! Seedable test-data generation
//!
//! Every factory default that is not a fixed constant comes from here, so
//! a whole run can be replayed from one seed. Clones share the underlying
//! RNG stream; with one generator per context and sequential creates, a
//! seeded context produces the same entities every time.

use parking_lot::Mutex;
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

const FIRST_NAMES: &[&str] = &[
    "Alex", "Bailey", "Casey", "Devon", "Emery", "Finley", "Harper", "Jordan", "Morgan", "Noa",
    "Quinn", "Riley", "Sage", "Tatum",
];

const LAST_NAMES: &[&str] = &[
    "Adams", "Brooks", "Castillo", "Drake", "Ellis", "Foster", "Grant", "Hayes", "Ibarra",
    "Jensen", "Keller", "Lopez", "Mercer", "Novak",
];

const CATEGORIES: &[&str] = &["beauty", "fashion", "tech", "food", "fitness"];

const NICHE_WORDS: &[&str] = &[
    "skincare", "streetwear", "gadgets", "vegan", "yoga", "makeup", "sneakers", "audio",
    "baking", "running", "travel", "gaming",
];

const TITLE_THEMES: &[&str] = &[
    "Summer", "Holiday", "Spring", "Flash", "Launch", "Seasonal", "Exclusive", "Weekend",
];

const TITLE_FORMATS: &[&str] = &[
    "Collection", "Giveaway", "Collab", "Drop", "Showcase", "Challenge", "Spotlight", "Series",
];

/// Generator for plausible platform test data.
///
/// Cheap to clone; all clones draw from the same stream.
#[derive(Clone)]
pub struct DataGen {
    rng: Arc<Mutex<StdRng>>,
}

impl DataGen {
    /// Generator seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: Arc::new(Mutex::new(StdRng::from_entropy())),
        }
    }

    /// Generator with a fixed seed, for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Arc::new(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }

    fn pick<'a>(&self, items: &'a [&'a str]) -> &'a str {
        let mut rng = self.rng.lock();
        items[rng.gen_range(0..items.len())]
    }

    /// A lowercase, unique-ish email address
    pub fn email(&self) -> String {
        let first = self.pick(FIRST_NAMES).to_lowercase();
        let last = self.pick(LAST_NAMES).to_lowercase();
        let n: u32 = self.rng.lock().gen_range(0..1_000_000);
        format!("{}.{}{}@example.com", first, last, n)
    }

    /// A display name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.pick(FIRST_NAMES), self.pick(LAST_NAMES))
    }

    /// A 12-character alphanumeric password
    pub fn password(&self) -> String {
        let mut rng = self.rng.lock();
        (0..12).map(|_| rng.sample(Alphanumeric) as char).collect()
    }

    /// A campaign title
    pub fn campaign_title(&self) -> String {
        format!(
            "{} {} Campaign",
            self.pick(TITLE_THEMES),
            self.pick(TITLE_FORMATS)
        )
    }

    /// A short campaign description
    pub fn paragraph(&self) -> String {
        format!(
            "Partner with creators in the {} space to promote our new {} line.",
            self.pick(NICHE_WORDS),
            self.pick(CATEGORIES)
        )
    }

    /// One of the platform's campaign categories
    pub fn category(&self) -> String {
        self.pick(CATEGORIES).to_string()
    }

    /// Two distinct niche tags
    pub fn niches(&self) -> Vec<String> {
        let first = self.pick(NICHE_WORDS);
        let mut second = self.pick(NICHE_WORDS);
        while second == first {
            second = self.pick(NICHE_WORDS);
        }
        vec![first.to_string(), second.to_string()]
    }

    /// A whole-currency campaign budget between 1000 and 50000
    pub fn budget(&self) -> f64 {
        self.rng.lock().gen_range(1000..=50_000) as f64
    }
}

impl Default for DataGen {
    fn default() -> Self {
        Self::new()
    }
}
