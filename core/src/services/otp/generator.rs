//! Code generation for issued OTPs

use rand::Rng;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::domain::entities::otp_record::CODE_LENGTH;

/// Longest code that still fits the numeric range of a u64
const MAX_CODE_LENGTH: usize = 18;

/// Source of fresh codes
pub trait CodeGenerator: Send + Sync {
    /// Produce a decimal code of fixed width
    fn generate(&self) -> String;
}

/// Uniformly random codes without a leading zero
///
/// For the default length of 6 the range is `100000..=999999`. Not
/// cryptographically secure.
#[derive(Debug, Clone, Copy)]
pub struct RandomCodeGenerator {
    length: usize,
}

impl RandomCodeGenerator {
    /// Generator for codes of `length` digits (clamped to 1..=18)
    pub fn new(length: usize) -> Self {
        Self {
            length: length.clamp(1, MAX_CODE_LENGTH),
        }
    }

    /// Number of digits produced
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new(CODE_LENGTH)
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        let low = 10u64.pow(self.length as u32 - 1);
        let high = 10u64.pow(self.length as u32) - 1;
        let code = rand::thread_rng().gen_range(low..=high);
        format!("{:0width$}", code, width = self.length)
    }
}

/// Hands out a fixed queue of codes, then falls back to random ones
///
/// Used to make issuance deterministic in tests and demos.
#[derive(Debug)]
pub struct SequenceCodeGenerator {
    codes: Mutex<VecDeque<String>>,
    fallback: RandomCodeGenerator,
}

impl SequenceCodeGenerator {
    pub fn new<I, T>(codes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            codes: Mutex::new(codes.into_iter().map(Into::into).collect()),
            fallback: RandomCodeGenerator::default(),
        }
    }

    /// Queue another code
    pub fn push(&self, code: impl Into<String>) {
        self.codes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(code.into());
    }
}

impl CodeGenerator for SequenceCodeGenerator {
    fn generate(&self) -> String {
        self.codes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
            .unwrap_or_else(|| self.fallback.generate())
    }
}
