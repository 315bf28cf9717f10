mod pending_identity_tests;
mod verification_code_tests;
