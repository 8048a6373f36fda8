//! Config for the game and the searcher
//!
//! A [`Configuration`] is obtained from a [`ConfigurationBuilder`], either set up programmatically
//! with [`ConfigurationBuilder::new()`] or read from environment variables with
//! [`ConfigurationBuilder::from_env()`]. Building validates the values, so a [`Configuration`]
//! is always usable.
//!
//! # Environment Variables
//!
//! All values are optional. Flags are case-insensitive, set them to `"true"` to enable.
//!
//! - `DODGE_MAGNITUDES`: Move alphabet, e.g. `"1,2,3,4,6,12"` or `"1-4,6,12"` (default: `1,2,3,4,6,12`)
//! - `DODGE_DEPTH`: Search depth in plies (default: `5`)
//! - `DODGE_PRUNING`: Alpha-beta pruning (default: `true`)
//! - `DODGE_ACTION_TIMEOUT_MS`: Thinking time per automated move in milliseconds (default: unlimited)
//! - `DODGE_LOG`: Enable logging to a file (default: `false`)
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use dodge_the_pile::configuration::ConfigurationBuilder;
//! use dodge_the_pile::Player;
//!
//! let config = ConfigurationBuilder::new()
//!     .with_magnitudes(&[1, 2, 3, 5])
//!     .with_depth(4)
//!     .with_first_player(Player::PlayerA)
//!     .with_action_timeout(Duration::from_millis(200))
//!     .build()
//!     .unwrap();
//! assert_eq!(config.depth(), 4);
//! ```

use std::{collections::HashSet, env, time::Duration};

use anyhow::{bail, Context};
use tracing::warn;

use crate::error::Error;
use crate::game_interface::Player;

/// Magnitudes of the reference game.
pub const DEFAULT_MAGNITUDES: [u32; 6] = [1, 2, 3, 4, 6, 12];

/// Search depth of the reference game.
pub const DEFAULT_DEPTH: u32 = 5;

/// Validated configuration of a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub(crate) magnitudes: Vec<u32>,
    pub(crate) depth: u32,
    pub(crate) first_player: Player,
    pub(crate) automated: Player,
    pub(crate) pruning: bool,
    pub(crate) action_timeout: Option<Duration>,
    pub(crate) log: bool,
}

impl Configuration {
    /// Magnitudes available at the start of the game, in the order they were configured.
    pub fn magnitudes(&self) -> &[u32] {
        &self.magnitudes
    }

    /// Search depth in plies.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Player moving first.
    pub fn first_player(&self) -> Player {
        self.first_player
    }

    /// Player driven by the searcher. The other one is driven by the external move source.
    pub fn automated(&self) -> Player {
        self.automated
    }

    /// Whether the searcher uses alpha-beta pruning.
    pub fn pruning(&self) -> bool {
        self.pruning
    }

    /// Thinking time per automated move, if limited.
    pub fn action_timeout(&self) -> Option<Duration> {
        self.action_timeout
    }

    /// Whether a log file is written.
    pub fn log(&self) -> bool {
        self.log
    }
}

/// The reference game: pool `{1,2,3,4,6,12}`, depth 5, PlayerB moves first and PlayerA is
/// automated, pruning enabled, no timeout, no log file.
impl Default for Configuration {
    fn default() -> Self {
        Self {
            magnitudes: DEFAULT_MAGNITUDES.to_vec(),
            depth: DEFAULT_DEPTH,
            first_player: Player::PlayerB,
            automated: Player::PlayerA,
            pruning: true,
            action_timeout: None,
            log: false,
        }
    }
}

/// A builder for [`Configuration`].
///
/// Every value left unset keeps its [default](Configuration::default).
#[derive(Debug, Default)]
pub struct ConfigurationBuilder {
    magnitudes: Option<Vec<u32>>,
    depth: Option<u32>,
    first_player: Option<Player>,
    automated: Option<Player>,
    pruning: Option<bool>,
    action_timeout: Option<Duration>,
    log: Option<bool>,
    env_error: Option<String>,
}

impl ConfigurationBuilder {
    /// Creates a builder holding the defaults of the reference game.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder configured from environment variables (see [module documentation](self)).
    ///
    /// Malformed values are reported by [`build`](Self::build).
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut builder = Self::new();
        let mut errors = vec![];

        if let Some(list) = lookup("DODGE_MAGNITUDES") {
            match magnitude_list_to_vec(&list) {
                Ok(magnitudes) => builder.magnitudes = Some(magnitudes),
                Err(e) => errors.push(format!("DODGE_MAGNITUDES: {e:#}")),
            }
        }
        if let Some(depth) = lookup("DODGE_DEPTH") {
            match depth.trim().parse::<u32>() {
                Ok(depth) => builder.depth = Some(depth),
                Err(e) => errors.push(format!("DODGE_DEPTH: could not parse {depth:?}: {e}")),
            }
        }
        if let Some(timeout) = lookup("DODGE_ACTION_TIMEOUT_MS") {
            match timeout.trim().parse::<u64>() {
                Ok(ms) => builder.action_timeout = Some(Duration::from_millis(ms)),
                Err(e) => errors.push(format!(
                    "DODGE_ACTION_TIMEOUT_MS: could not parse {timeout:?}: {e}"
                )),
            }
        }
        builder.pruning = lookup("DODGE_PRUNING").map(|val| val.eq_ignore_ascii_case("true"));
        builder.log = lookup("DODGE_LOG").map(|val| val.eq_ignore_ascii_case("true"));

        if !errors.is_empty() {
            builder.env_error = Some(errors.join("; "));
        }
        builder
    }

    /// Sets the move alphabet. Each magnitude `k` gives the two moves `+k` and `-k`.
    #[must_use]
    pub fn with_magnitudes(self, magnitudes: &[u32]) -> Self {
        Self {
            magnitudes: Some(magnitudes.to_vec()),
            ..self
        }
    }

    /// Sets the search depth in plies. Must be positive.
    #[must_use]
    pub fn with_depth(self, depth: u32) -> Self {
        Self {
            depth: Some(depth),
            ..self
        }
    }

    /// Sets the player moving first.
    #[must_use]
    pub fn with_first_player(self, player: Player) -> Self {
        Self {
            first_player: Some(player),
            ..self
        }
    }

    /// Sets the player driven by the searcher.
    #[must_use]
    pub fn with_automated(self, player: Player) -> Self {
        Self {
            automated: Some(player),
            ..self
        }
    }

    /// Enable or disable alpha-beta pruning. Does not change the chosen moves.
    #[must_use]
    pub fn with_pruning(self, value: bool) -> Self {
        Self {
            pruning: Some(value),
            ..self
        }
    }

    /// Sets the maximum thinking time for a single automated move.
    ///
    /// When it runs out, the searcher plays the best move it has fully evaluated.
    #[must_use]
    pub fn with_action_timeout(self, duration: Duration) -> Self {
        Self {
            action_timeout: Some(duration),
            ..self
        }
    }

    /// Enable or disable logging to file.
    #[must_use]
    pub fn with_log(self, value: bool) -> Self {
        Self {
            log: Some(value),
            ..self
        }
    }

    /// Consumes the builder and returns the validated [`Configuration`].
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] when the depth is zero, the alphabet is empty, contains zero or
    /// a duplicate, or an environment variable could not be parsed.
    pub fn build(self) -> Result<Configuration, Error> {
        if let Some(msg) = self.env_error {
            return Err(Error::Configuration(msg));
        }

        let defaults = Configuration::default();
        let magnitudes = self.magnitudes.unwrap_or(defaults.magnitudes);
        validate_magnitudes(&magnitudes)?;

        let depth = self.depth.unwrap_or(defaults.depth);
        if depth == 0 {
            return Err(Error::Configuration(
                "search depth must be at least one ply".to_owned(),
            ));
        }

        let first_player = self.first_player.unwrap_or(defaults.first_player);
        let automated = self.automated.unwrap_or(defaults.automated);
        if self.action_timeout == Some(Duration::ZERO) {
            warn!("a zero action timeout makes the searcher play its first legal move");
        }

        Ok(Configuration {
            magnitudes,
            depth,
            first_player,
            automated,
            pruning: self.pruning.unwrap_or(defaults.pruning),
            action_timeout: self.action_timeout,
            log: self.log.unwrap_or(defaults.log),
        })
    }
}

pub(crate) fn validate_magnitudes(magnitudes: &[u32]) -> Result<(), Error> {
    if magnitudes.is_empty() {
        return Err(Error::Configuration("move alphabet is empty".to_owned()));
    }
    if magnitudes.contains(&0) {
        return Err(Error::Configuration(
            "move alphabet contains 0, magnitudes must be positive".to_owned(),
        ));
    }
    let mut seen = HashSet::with_capacity(magnitudes.len());
    for magnitude in magnitudes {
        if !seen.insert(magnitude) {
            return Err(Error::Configuration(format!(
                "magnitude {magnitude} appears twice in the move alphabet"
            )));
        }
    }
    Ok(())
}

// Far more magnitudes than any searchable game; stops huge ranges before they are expanded.
const MAX_LIST_LEN: u64 = 1024;

fn magnitude_list_to_vec(s: &str) -> anyhow::Result<Vec<u32>> {
    if s.trim().is_empty() {
        bail!("Empty string");
    }
    let mut magnitudes = vec![];
    for item in s.split(',').map(str::trim) {
        let bounds = item.split('-').collect::<Vec<_>>();
        match bounds.as_slice() {
            [value] => {
                let value: u32 = value
                    .trim()
                    .parse()
                    .with_context(|| format!("could not parse {value}"))?;
                magnitudes.push(value);
            }
            [start, end] => {
                let start: u32 = start
                    .trim()
                    .parse()
                    .with_context(|| format!("could not parse {start}"))?;
                let end: u32 = end
                    .trim()
                    .parse()
                    .with_context(|| format!("could not parse {end}"))?;
                let range = if start <= end {
                    start..=end
                } else {
                    end..=start
                };
                let len = u64::from(*range.end()) - u64::from(*range.start()) + 1;
                if magnitudes.len() as u64 + len > MAX_LIST_LEN {
                    bail!("{item} makes the move alphabet longer than {MAX_LIST_LEN} magnitudes");
                }
                magnitudes.extend(range);
            }
            _ => bail!("Could not parse {item}"),
        }
    }
    Ok(magnitudes)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_match_reference_game() {
        let config = ConfigurationBuilder::new().build().unwrap();
        assert_eq!(config, Configuration::default());
        assert_eq!(config.magnitudes(), &[1, 2, 3, 4, 6, 12]);
        assert_eq!(config.depth(), 5);
        assert_eq!(config.first_player(), Player::PlayerB);
        assert_eq!(config.automated(), Player::PlayerA);
        assert!(config.pruning());
        assert_eq!(config.action_timeout(), None);
        assert!(!config.log());
    }

    #[test]
    fn zero_depth_is_rejected() {
        let err = ConfigurationBuilder::new().with_depth(0).build().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn bad_alphabets_are_rejected() {
        for magnitudes in [&[][..], &[1, 0, 2][..], &[3, 1, 3][..]] {
            let err = ConfigurationBuilder::new()
                .with_magnitudes(magnitudes)
                .build()
                .unwrap_err();
            assert!(matches!(err, Error::Configuration(_)), "{magnitudes:?}");
        }
    }

    #[test]
    fn env_overrides_defaults() {
        let config = ConfigurationBuilder::from_lookup(lookup(&[
            ("DODGE_MAGNITUDES", "1-3, 7"),
            ("DODGE_DEPTH", "3"),
            ("DODGE_PRUNING", "FALSE"),
            ("DODGE_ACTION_TIMEOUT_MS", "250"),
            ("DODGE_LOG", "True"),
        ]))
        .build()
        .unwrap();
        assert_eq!(config.magnitudes(), &[1, 2, 3, 7]);
        assert_eq!(config.depth(), 3);
        assert!(!config.pruning());
        assert_eq!(config.action_timeout(), Some(Duration::from_millis(250)));
        assert!(config.log());
    }

    #[test]
    fn empty_env_keeps_defaults() {
        let config = ConfigurationBuilder::from_lookup(lookup(&[])).build().unwrap();
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn malformed_env_is_reported_by_build() {
        let err = ConfigurationBuilder::from_lookup(lookup(&[("DODGE_DEPTH", "-1")]))
            .build()
            .unwrap_err();
        let Error::Configuration(msg) = err else {
            panic!("expected a configuration error");
        };
        assert!(msg.contains("DODGE_DEPTH"));

        let err = ConfigurationBuilder::from_lookup(lookup(&[("DODGE_MAGNITUDES", "1,x")]))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("could not parse x"));
    }

    #[test]
    fn builder_values_override_env() {
        let config = ConfigurationBuilder::from_lookup(lookup(&[("DODGE_DEPTH", "2")]))
            .with_depth(6)
            .build()
            .unwrap();
        assert_eq!(config.depth(), 6);
    }

    #[test]
    fn magnitude_list_parsing() {
        assert_eq!(magnitude_list_to_vec("12").unwrap(), vec![12]);
        assert_eq!(magnitude_list_to_vec("4-2,9").unwrap(), vec![2, 3, 4, 9]);
        assert!(magnitude_list_to_vec("").is_err());
        assert!(magnitude_list_to_vec("1-2-3").is_err());
    }

    #[test]
    fn huge_ranges_are_rejected_before_expansion() {
        let err = magnitude_list_to_vec("1-4000000000").unwrap_err();
        assert!(err.to_string().contains("longer than 1024"));
        assert!(magnitude_list_to_vec("1000-1,1-100").is_err());
        assert_eq!(magnitude_list_to_vec("1-1024").unwrap().len(), 1024);

        let huge = lookup(&[("DODGE_MAGNITUDES", "0-4294967295")]);
        let err = ConfigurationBuilder::from_lookup(huge).build().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
