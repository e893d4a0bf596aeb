//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn title() -> String {
        "Gallery".into()
    }

    pub fn language() -> String {
        "zh-Hans".into()
    }
}

// ============================================================================
// [data] Section Defaults
// ============================================================================

pub mod data {
    use std::path::PathBuf;

    pub fn works() -> PathBuf {
        "data/works.json".into()
    }
}

// ============================================================================
// [export] Section Defaults
// ============================================================================

pub mod export {
    use std::path::PathBuf;

    pub fn output() -> PathBuf {
        "public".into()
    }

    pub fn dir() -> PathBuf {
        "_data".into()
    }
}
