use crate::error::{CoreError, CoreResult};

/// Default DNA alphabet, matching `reference`'s own base set.
pub const DNA: &[u8] = b"ACGT";

/// Maps a configured alphabet Σ (|Σ| ≤ 32) to 0-based integer codes.
///
/// Any byte outside Σ (case-insensitively) is normalized to the
/// out-of-band sentinel code `|Σ|` — the same trick `reference`'s
/// `kmer_codec::build_codes` uses for `N`, generalized so the tuple
/// hash can detect poison by a single `>= alphabet_len` comparison
/// instead of a branch per symbol.
#[derive(Debug, Clone)]
pub struct Alphabet {
    symbols: Vec<u8>,
    code_of: [u8; 256],
}

impl Alphabet {
    /// Build an alphabet from its distinct uppercase symbols.
    pub fn new(symbols: &[u8]) -> CoreResult<Self> {
        if symbols.is_empty() {
            return Err(CoreError::Parameter("alphabet must be non-empty".into()));
        }
        if symbols.len() > 32 {
            return Err(CoreError::Parameter(format!(
                "alphabet size {} exceeds the maximum of 32",
                symbols.len()
            )));
        }
        let mut seen = std::collections::HashSet::new();
        for &s in symbols {
            if !seen.insert(s.to_ascii_uppercase()) {
                return Err(CoreError::Parameter(format!(
                    "duplicate alphabet symbol '{}'",
                    s as char
                )));
            }
        }

        let sentinel = symbols.len() as u8;
        let mut code_of = [sentinel; 256];
        for (code, &s) in symbols.iter().enumerate() {
            code_of[s.to_ascii_uppercase() as usize] = code as u8;
            code_of[s.to_ascii_lowercase() as usize] = code as u8;
        }

        Ok(Alphabet {
            symbols: symbols.iter().map(|s| s.to_ascii_uppercase()).collect(),
            code_of,
        })
    }

    /// The default DNA alphabet `{A,C,G,T}`.
    pub fn dna() -> Self {
        Alphabet::new(DNA).expect("DNA alphabet is always valid")
    }

    /// |Σ|.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// The out-of-band sentinel code, used for any symbol outside Σ.
    pub fn sentinel(&self) -> u8 {
        self.symbols.len() as u8
    }

    /// `|Σ|^k`, checked against overflow of a `u64` tuple-value space.
    pub fn tuple_count(&self, k: u32) -> CoreResult<u64> {
        (self.len() as u64)
            .checked_pow(k)
            .ok_or_else(|| CoreError::Parameter(format!("|alphabet|^{k} overflows a u64")))
    }

    /// Encode one byte to its 0-based code, or the sentinel if out of Σ.
    #[inline]
    pub fn encode_byte(&self, b: u8) -> u8 {
        self.code_of[b as usize]
    }

    /// Encode a whole sequence.
    pub fn encode(&self, seq: &[u8]) -> EncodedSequence {
        EncodedSequence {
            codes: seq.iter().map(|&b| self.encode_byte(b)).collect(),
        }
    }

    /// Complement of a single code, defined only for the 4-symbol DNA
    /// alphabet in the canonical `A,C,G,T` order; `None` otherwise (the
    /// sentinel has no complement).
    pub fn complement_code(&self, code: u8) -> Option<u8> {
        if self.symbols.len() != 4 || &self.symbols != DNA {
            return None;
        }
        match code {
            0 => Some(3), // A <-> T
            1 => Some(2), // C <-> G
            2 => Some(1),
            3 => Some(0),
            _ => None,
        }
    }

    /// Reverse view of `codes` used for the anti-diagonal comparison:
    /// reverse-complement when this is the canonical DNA alphabet,
    /// literal reversal otherwise (non-DNA alphabets have no defined
    /// complement).
    pub fn reverse_view(&self, codes: &[u8]) -> Vec<u8> {
        let seq = EncodedSequence::from_codes(codes.to_vec());
        seq.reverse_complement(self)
            .map(|rc| rc.codes().to_vec())
            .unwrap_or_else(|_| seq.reverse().codes().to_vec())
    }
}

/// Immutable ordered sequence of encoded symbols.
#[derive(Debug, Clone)]
pub struct EncodedSequence {
    codes: Vec<u8>,
}

impl EncodedSequence {
    pub fn from_codes(codes: Vec<u8>) -> Self {
        EncodedSequence { codes }
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn codes(&self) -> &[u8] {
        &self.codes
    }

    /// Literal reversal (not complemented) — the "reverse Y" view used
    /// by the fast extender kernel.
    pub fn reverse(&self) -> EncodedSequence {
        let mut codes = self.codes.clone();
        codes.reverse();
        EncodedSequence { codes }
    }

    /// Reverse-complement, defined only when `alphabet` knows how to
    /// complement a code (canonical DNA). Sentinel codes pass through
    /// unchanged (they have no complement and never match anything).
    pub fn reverse_complement(&self, alphabet: &Alphabet) -> CoreResult<EncodedSequence> {
        let sentinel = alphabet.sentinel();
        let mut codes = Vec::with_capacity(self.codes.len());
        for &c in self.codes.iter().rev() {
            if c == sentinel {
                codes.push(sentinel);
            } else {
                let comp = alphabet.complement_code(c).ok_or_else(|| {
                    CoreError::Parameter(
                        "reverse_complement requires the canonical 4-symbol DNA alphabet".into(),
                    )
                })?;
                codes.push(comp);
            }
        }
        Ok(EncodedSequence { codes })
    }
}

/// Compute the base-|Σ| tuple code of `window`, returning `None`
/// ("poisoned") if any position carries the sentinel.
#[inline]
pub fn tuple_code(window: &[u8], alphabet_len: u64) -> Option<u64> {
    let mut code: u64 = 0;
    for &c in window {
        if c as u64 >= alphabet_len {
            return None;
        }
        code = code * alphabet_len + c as u64;
    }
    Some(code)
}
