//! Default session id and code generators

use rand::{rngs::OsRng, Rng};
use uuid::Uuid;

use super::traits::{CodeGenerator, SessionIdGenerator};
use crate::domain::entities::{CODE_MAX, CODE_MIN};

/// Time-ordered UUIDs rendered as 32 lowercase hex characters
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidSessionIdGenerator;

impl SessionIdGenerator for UuidSessionIdGenerator {
    fn generate(&self) -> String {
        Uuid::now_v7().simple().to_string()
    }
}

/// Uniform codes in `100000..=999999` drawn from the OS CSPRNG
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        OsRng.gen_range(CODE_MIN..=CODE_MAX).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_six_digits_in_range() {
        let generator = RandomCodeGenerator;
        for _ in 0..500 {
            let code = generator.generate();
            assert_eq!(code.len(), 6);
            let value: u32 = code.parse().expect("code should be numeric");
            assert!((CODE_MIN..=CODE_MAX).contains(&value));
        }
    }

    #[test]
    fn test_session_ids_are_unique_hex() {
        let generator = UuidSessionIdGenerator;
        let ids: HashSet<String> = (0..100).map(|_| generator.generate()).collect();

        assert_eq!(ids.len(), 100);
        for id in ids {
            assert_eq!(id.len(), 32);
            assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }
}
