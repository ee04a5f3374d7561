use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MixdeckError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(MixdeckError::graph("x").to_string().contains("graph error:"));
    assert!(
        MixdeckError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MixdeckError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
