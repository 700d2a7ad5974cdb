use crate::types::Token;

/// Ordered, immutable token sequence with the two lookups the sync engine
/// needs: "which token covers `t`" and "which token starts closest to `t`".
///
/// Tokens are stored exactly as given. When the sequence is well ordered
/// (every interval valid and no interval reaching past the next start) the
/// active lookup binary-searches; otherwise it falls back to a linear
/// first-match scan. Both paths return the same index for the same input.
#[derive(Debug, Clone, Default)]
pub struct TokenIndex {
    tokens: Vec<Token>,
    well_ordered: bool,
}

impl TokenIndex {
    pub fn build(tokens: Vec<Token>) -> Self {
        let well_ordered = is_well_ordered(&tokens);
        if !well_ordered && !tokens.is_empty() {
            tracing::debug!(len = tokens.len(), "token_index_unordered_fallback");
        }
        Self {
            tokens,
            well_ordered,
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    /// Index of the token whose closed interval contains `t`.
    ///
    /// Overlapping or malformed intervals resolve to the lowest matching
    /// index.
    pub fn active_at(&self, t: f64) -> Option<usize> {
        if self.well_ordered {
            let candidate = self.tokens.partition_point(|tok| tok.end < t);
            self.tokens
                .get(candidate)
                .filter(|tok| tok.contains(t))
                .map(|_| candidate)
        } else {
            self.tokens.iter().position(|tok| tok.contains(t))
        }
    }

    /// Same as [`Self::active_at`], but tries `hint` and its successor first.
    ///
    /// During continuous playback the answer is almost always the previous
    /// active token or the one right after it.
    pub fn active_at_from(&self, t: f64, hint: Option<usize>) -> Option<usize> {
        if self.well_ordered {
            if let Some(hint) = hint {
                for i in [hint, hint.saturating_add(1)] {
                    if self.is_first_match(i, t) {
                        return Some(i);
                    }
                }
            }
        }
        self.active_at(t)
    }

    /// Index of the token whose start is closest to `t`; ties go to the
    /// lowest index. `None` only when the index is empty.
    ///
    /// NaN distances lose to every finite one. If no distance is comparable
    /// at all (e.g. `t` is NaN) the first token is returned.
    pub fn nearest_to(&self, t: f64) -> Option<usize> {
        if self.tokens.is_empty() {
            return None;
        }

        let mut best: Option<(usize, f64)> = None;
        for (i, tok) in self.tokens.iter().enumerate() {
            let distance = (tok.start - t).abs();
            if distance.is_nan() {
                continue;
            }
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((i, distance)),
            }
        }

        Some(best.map_or(0, |(i, _)| i))
    }

    fn is_first_match(&self, i: usize, t: f64) -> bool {
        let Some(tok) = self.tokens.get(i) else {
            return false;
        };
        // Adjacent closed intervals can share an endpoint.
        tok.contains(t) && (i == 0 || !self.tokens[i - 1].contains(t))
    }
}

impl From<Vec<Token>> for TokenIndex {
    fn from(tokens: Vec<Token>) -> Self {
        Self::build(tokens)
    }
}

/// Every interval is valid and ends no later than the next one starts. Under
/// this condition ends are non-decreasing, so the first token with
/// `end >= t` is the only possible match for `t`.
fn is_well_ordered(tokens: &[Token]) -> bool {
    tokens.iter().all(|tok| tok.start <= tok.end)
        && tokens.windows(2).all(|pair| pair[0].end <= pair[1].start)
}
