use serde::{Deserialize, Serialize};

/// Sentence lengths for each outcome of a single interrogation.
///
/// Sentences are penalties: the lower the value, the better the outcome for
/// the prisoner receiving it. The matrix is read from the point of view of
/// the prisoner being sentenced:
///
/// | me \ other | cooperate       | betray            |
/// |------------|-----------------|-------------------|
/// | cooperate  | `both_silent`   | `betrayed`        |
/// | betray     | `informant`     | `mutual_betrayal` |
///
/// # Example
///
/// ```
/// use dilemma_engine::PayoffMatrix;
///
/// let payoff = PayoffMatrix::default();
/// assert_eq!(payoff.sentence(true, true), 0.5);
/// assert_eq!(payoff.sentence(true, false), 30.0);
/// assert_eq!(payoff.sentence(false, true), 0.0);
/// assert_eq!(payoff.sentence(false, false), 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoffMatrix {
    /// Both prisoners stay silent.
    pub both_silent: f64,
    /// The prisoner stays silent and is betrayed by the other.
    pub betrayed: f64,
    /// Both prisoners betray each other.
    pub mutual_betrayal: f64,
    /// The prisoner betrays a silent partner.
    pub informant: f64,
}

impl Default for PayoffMatrix {
    fn default() -> Self {
        Self {
            both_silent: 0.5,
            betrayed: 30.0,
            mutual_betrayal: 10.0,
            informant: 0.0,
        }
    }
}

impl PayoffMatrix {
    /// Returns the sentence given to a prisoner deciding `me` against a
    /// partner deciding `other` (`true` = cooperate).
    #[must_use]
    pub fn sentence(&self, me: bool, other: bool) -> f64 {
        match (me, other) {
            (true, true) => self.both_silent,
            (true, false) => self.betrayed,
            (false, true) => self.informant,
            (false, false) => self.mutual_betrayal,
        }
    }

    /// Iterates over the four entries of the matrix.
    pub fn entries(&self) -> impl Iterator<Item = f64> {
        [
            self.both_silent,
            self.betrayed,
            self.mutual_betrayal,
            self.informant,
        ]
        .into_iter()
    }

    /// Returns the smallest sentence of the matrix.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.entries().fold(f64::INFINITY, f64::min)
    }

    /// Returns the largest sentence of the matrix.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.entries().fold(f64::NEG_INFINITY, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_matrix() {
        let payoff = PayoffMatrix {
            both_silent: 1.0,
            betrayed: 2.0,
            mutual_betrayal: 3.0,
            informant: 4.0,
        };
        assert_eq!(payoff.sentence(true, true), 1.0);
        assert_eq!(payoff.sentence(true, false), 2.0);
        assert_eq!(payoff.sentence(false, false), 3.0);
        assert_eq!(payoff.sentence(false, true), 4.0);
    }

    #[test]
    fn test_min_max() {
        let payoff = PayoffMatrix::default();
        assert_eq!(payoff.min(), 0.0);
        assert_eq!(payoff.max(), 30.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let payoff: PayoffMatrix = serde_json::from_str(r#"{"informant": 1.5}"#).unwrap();
        assert_eq!(payoff.informant, 1.5);
        assert_eq!(payoff.betrayed, 30.0);
    }
}
