use std::fmt;
use std::ops::RangeInclusive;
use std::time::Duration;

use rand::Rng;

use crate::pattern::Pattern;
use crate::topology::Topology;
use crate::validate::{bounded_int, clamp_to_set, is_well_formed_pattern, non_negative_int};

/// Accepted grid widths (columns).
pub const ALLOWED_WIDTHS: [u32; 5] = [10, 20, 30, 40, 80];
/// Accepted grid heights (rows).
pub const ALLOWED_HEIGHTS: [u32; 3] = [10, 20, 40];
/// Accepted inter-generation delay in milliseconds.
pub const DELAY_RANGE_MS: RangeInclusive<u64> = 250..=1000;
/// Pattern value requesting a random seed the size of the grid.
pub const RANDOM_PATTERN_KEYWORD: &str = "rnd";

pub const DEFAULT_WIDTH: u32 = 80;
pub const DEFAULT_HEIGHT: u32 = 40;
/// 0 runs until stopped.
pub const DEFAULT_GENERATIONS: u64 = 0;
pub const DEFAULT_DELAY_MS: u64 = 1000;

/// Initial population source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Seed {
    /// Every cell dead.
    #[default]
    Empty,
    /// A decoded pattern, already checked to fit the grid.
    Pattern(Pattern),
    /// Random cells over the whole grid.
    Random,
}

impl Seed {
    /// The pattern to write into a `rows` x `cols` grid.
    pub fn resolve<R: Rng>(&self, rows: usize, cols: usize, rng: &mut R) -> Pattern {
        match self {
            Seed::Empty => Pattern::default(),
            Seed::Pattern(p) => p.clone(),
            Seed::Random => Pattern::random(rows, cols, rng),
        }
    }
}

/// Configurable settings, one per command-line key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    Width,
    Height,
    Generations,
    Delay,
    Topology,
    Pattern,
}

impl Setting {
    pub const ALL: [Setting; 6] = [
        Setting::Width,
        Setting::Height,
        Setting::Generations,
        Setting::Delay,
        Setting::Topology,
        Setting::Pattern,
    ];

    /// Command-line key.
    pub fn key(self) -> &'static str {
        match self {
            Setting::Width => "w",
            Setting::Height => "h",
            Setting::Generations => "g",
            Setting::Delay => "s",
            Setting::Topology => "n",
            Setting::Pattern => "p",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    /// Expected values, shown when a token is rejected.
    fn hint(self) -> String {
        match self {
            Setting::Width => format!("one of {ALLOWED_WIDTHS:?}"),
            Setting::Height => format!("one of {ALLOWED_HEIGHTS:?}"),
            Setting::Generations => "an integer >= 0 (0 runs until stopped)".to_string(),
            Setting::Delay => format!(
                "milliseconds between {} and {}",
                DELAY_RANGE_MS.start(),
                DELAY_RANGE_MS.end()
            ),
            Setting::Topology => "a topology id between 1 and 5".to_string(),
            Setting::Pattern => format!(
                "rows of 0 (dead) and 1 (alive) separated by '#', e.g. 101#010#100, \
                 fitting the grid; or '{RANDOM_PATTERN_KEYWORD}' for a random population"
            ),
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Setting::Width => "width",
            Setting::Height => "height",
            Setting::Generations => "generations",
            Setting::Delay => "speed",
            Setting::Topology => "neighborhood",
            Setting::Pattern => "population",
        };
        f.write_str(name)
    }
}

/// Validated run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// Grid columns.
    pub width: u32,
    /// Grid rows.
    pub height: u32,
    /// Generations to run; 0 runs until stopped.
    pub generations: u64,
    pub delay_ms: u64,
    pub topology: Topology,
    pub seed: Seed,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            generations: DEFAULT_GENERATIONS,
            delay_ms: DEFAULT_DELAY_MS,
            topology: Topology::default(),
            seed: Seed::default(),
        }
    }
}

/// Result of reading the command line: the configuration plus what had to be
/// defaulted or ignored along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArgs {
    pub config: SimConfig,
    /// Settings that were missing or invalid and fell back to defaults.
    pub defaulted: Vec<Setting>,
    /// Human-readable reasons for every rejected or ignored token.
    pub warnings: Vec<String>,
}

impl SimConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Build a configuration from `key=value` tokens.
    ///
    /// Invalid values fall back to defaults; unknown keys and tokens without
    /// `=` are ignored. Each of these produces a warning. The pattern is
    /// checked last, against the final grid size.
    pub fn from_args<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = SimConfig::default();
        let mut warnings = Vec::new();
        let mut provided: Vec<Setting> = Vec::new();
        let mut pattern_value: Option<String> = None;

        for arg in args {
            let arg = arg.as_ref();
            let Some((key, value)) = arg.split_once('=') else {
                warnings.push(format!("ignoring malformed argument '{arg}' (expected key=value)"));
                continue;
            };
            let Some(setting) = Setting::from_key(key) else {
                warnings.push(format!("unknown argument: {key}"));
                continue;
            };

            let accepted = match setting {
                Setting::Width => clamp_to_set(value, &ALLOWED_WIDTHS)
                    .map(|w| config.width = w)
                    .is_some(),
                Setting::Height => clamp_to_set(value, &ALLOWED_HEIGHTS)
                    .map(|h| config.height = h)
                    .is_some(),
                Setting::Generations => non_negative_int(value)
                    .map(|g| config.generations = g)
                    .is_some(),
                Setting::Delay => bounded_int(value, DELAY_RANGE_MS)
                    .map(|s| config.delay_ms = s)
                    .is_some(),
                Setting::Topology => clamp_to_set(value, &topology_ids())
                    .and_then(Topology::from_id)
                    .map(|t| config.topology = t)
                    .is_some(),
                Setting::Pattern => {
                    pattern_value = Some(value.trim_matches('"').to_string());
                    true
                }
            };

            if accepted {
                provided.retain(|s| *s != setting);
                provided.push(setting);
            } else {
                provided.retain(|s| *s != setting);
                config.reset(setting);
                warnings.push(format!("{setting} = invalid '{value}', expected {}", setting.hint()));
            }
        }

        if let Some(value) = pattern_value {
            match parse_seed(&value, config.height as usize, config.width as usize) {
                Some(seed) => config.seed = seed,
                None => {
                    provided.retain(|s| *s != Setting::Pattern);
                    config.reset(Setting::Pattern);
                    warnings.push(format!(
                        "{} = invalid '{value}', expected {}",
                        Setting::Pattern,
                        Setting::Pattern.hint()
                    ));
                }
            }
        }

        let defaulted = Setting::ALL
            .into_iter()
            .filter(|s| !provided.contains(s))
            .collect();

        ParsedArgs {
            config,
            defaulted,
            warnings,
        }
    }

    /// Put `setting` back to its default value.
    fn reset(&mut self, setting: Setting) {
        let defaults = SimConfig::default();
        match setting {
            Setting::Width => self.width = defaults.width,
            Setting::Height => self.height = defaults.height,
            Setting::Generations => self.generations = defaults.generations,
            Setting::Delay => self.delay_ms = defaults.delay_ms,
            Setting::Topology => self.topology = defaults.topology,
            Setting::Pattern => self.seed = defaults.seed,
        }
    }

    /// Current value of `setting`, formatted for the default-values listing.
    pub fn describe(&self, setting: Setting) -> String {
        match setting {
            Setting::Width => self.width.to_string(),
            Setting::Height => self.height.to_string(),
            Setting::Generations if self.generations == 0 => "0 (until stopped)".to_string(),
            Setting::Generations => self.generations.to_string(),
            Setting::Delay => format!("{} ms", self.delay_ms),
            Setting::Topology => self.topology.to_string(),
            Setting::Pattern => match &self.seed {
                Seed::Empty => "all dead".to_string(),
                Seed::Random => RANDOM_PATTERN_KEYWORD.to_string(),
                Seed::Pattern(p) => p.to_string(),
            },
        }
    }
}

fn topology_ids() -> [u32; 5] {
    Topology::ALL.map(Topology::id)
}

/// Interpret a pattern value for a `rows` x `cols` grid.
fn parse_seed(value: &str, rows: usize, cols: usize) -> Option<Seed> {
    if value == RANDOM_PATTERN_KEYWORD {
        return Some(Seed::Random);
    }
    if !is_well_formed_pattern(value, cols) {
        return None;
    }
    let pattern = Pattern::parse(value).ok()?;
    pattern.check_fits(rows, cols).ok()?;
    Some(Seed::Pattern(pattern))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn parse(args: &[&str]) -> ParsedArgs {
        SimConfig::from_args(args.iter().copied())
    }

    #[test]
    fn no_args_uses_defaults() {
        let parsed = parse(&[]);
        assert_eq!(parsed.config, SimConfig::default());
        assert_eq!(parsed.defaulted, Setting::ALL.to_vec());
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn defaults_match_constants() {
        let c = SimConfig::default();
        assert_eq!(c.width, 80);
        assert_eq!(c.height, 40);
        assert_eq!(c.generations, 0);
        assert_eq!(c.delay_ms, 1000);
        assert_eq!(c.topology, Topology::Moore8);
        assert_eq!(c.seed, Seed::Empty);
    }

    #[test]
    fn full_valid_command_line() {
        let parsed = parse(&["w=20", "h=10", "g=50", "s=300", "n=1", "p=010#001#111"]);
        assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);
        assert!(parsed.defaulted.is_empty());
        let c = parsed.config;
        assert_eq!(c.width, 20);
        assert_eq!(c.height, 10);
        assert_eq!(c.generations, 50);
        assert_eq!(c.delay(), Duration::from_millis(300));
        assert_eq!(c.topology, Topology::Orthogonal4);
        assert_eq!(c.seed, Seed::Pattern(Pattern::parse("010#001#111").unwrap()));
    }

    #[test]
    fn invalid_values_fall_back_with_warnings() {
        let parsed = parse(&["w=25", "h=abc", "g=-3", "s=100", "n=6"]);
        assert_eq!(parsed.config, SimConfig::default());
        assert_eq!(parsed.warnings.len(), 5);
        assert!(parsed.warnings[0].starts_with("width = invalid '25'"));
        assert!(parsed.defaulted.contains(&Setting::Width));
        assert!(parsed.defaulted.contains(&Setting::Topology));
    }

    #[test]
    fn zero_generations_is_a_real_value() {
        let parsed = parse(&["g=0"]);
        assert!(!parsed.defaulted.contains(&Setting::Generations));
        assert_eq!(parsed.config.generations, 0);
    }

    #[test]
    fn unknown_and_malformed_tokens_are_reported() {
        let parsed = parse(&["x=1", "w20", "w=10"]);
        assert_eq!(parsed.config.width, 10);
        assert_eq!(
            parsed.warnings,
            vec![
                "unknown argument: x".to_string(),
                "ignoring malformed argument 'w20' (expected key=value)".to_string(),
            ]
        );
    }

    #[test]
    fn value_may_contain_equals_sign() {
        let parsed = parse(&["p=1=1"]);
        assert_eq!(parsed.config.seed, Seed::Empty);
        assert!(parsed.defaulted.contains(&Setting::Pattern));
        assert_eq!(parsed.warnings.len(), 1);
    }

    #[test]
    fn later_token_wins() {
        let parsed = parse(&["w=10", "w=40"]);
        assert_eq!(parsed.config.width, 40);

        // an invalid repeat falls back to the default, not the earlier value
        let parsed = parse(&["w=10", "w=11"]);
        assert_eq!(parsed.config.width, DEFAULT_WIDTH);
        assert!(parsed.defaulted.contains(&Setting::Width));
    }

    #[test]
    fn pattern_checked_against_final_width_regardless_of_order() {
        let wide = "1".repeat(15);
        let parsed = SimConfig::from_args([format!("p={wide}"), "w=10".to_string()]);
        assert_eq!(parsed.config.seed, Seed::Empty);
        assert!(parsed.defaulted.contains(&Setting::Pattern));

        let parsed = SimConfig::from_args([format!("p={wide}"), "w=20".to_string()]);
        assert!(matches!(parsed.config.seed, Seed::Pattern(_)));
    }

    #[test]
    fn pattern_with_too_many_rows_is_rejected() {
        let tall = vec!["1"; 11].join("#");
        let parsed = SimConfig::from_args(["h=10".to_string(), format!("p={tall}")]);
        assert_eq!(parsed.config.seed, Seed::Empty);
        assert_eq!(parsed.warnings.len(), 1);
    }

    #[test]
    fn pattern_quotes_are_stripped() {
        let parsed = parse(&["p=\"11#11\""]);
        assert_eq!(parsed.config.seed, Seed::Pattern(Pattern::parse("11#11").unwrap()));
    }

    #[test]
    fn illegal_pattern_is_absent() {
        let parsed = parse(&["p=0120"]);
        assert_eq!(parsed.config.seed, Seed::Empty);
        assert!(parsed.defaulted.contains(&Setting::Pattern));
    }

    #[test]
    fn random_seed_resolves_to_grid_size() {
        let parsed = parse(&["w=30", "h=20", "p=rnd"]);
        assert_eq!(parsed.config.seed, Seed::Random);
        let mut rng = StdRng::seed_from_u64(1);
        let pattern = parsed.config.seed.resolve(20, 30, &mut rng);
        assert_eq!(pattern.height(), 20);
        assert_eq!(pattern.width(), 30);
    }

    #[test]
    fn describe_for_default_listing() {
        let c = SimConfig::default();
        assert_eq!(c.describe(Setting::Generations), "0 (until stopped)");
        assert_eq!(c.describe(Setting::Delay), "1000 ms");
        assert_eq!(c.describe(Setting::Topology), "3 (Moore-8)");
        assert_eq!(c.describe(Setting::Pattern), "all dead");
    }

    #[test]
    fn setting_keys_roundtrip() {
        for setting in Setting::ALL {
            assert_eq!(Setting::from_key(setting.key()), Some(setting));
        }
        assert_eq!(Setting::from_key("q"), None);
    }
}
