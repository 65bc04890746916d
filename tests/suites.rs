use zasm::{assets, cli::suite};

#[test]
fn run_suite_test() -> anyhow::Result<()> {
    assert!(suite::run_suite(
        &assets::default_suite_dir().join("test"),
        None
    )?);
    Ok(())
}

#[test]
fn run_single_unit() -> anyhow::Result<()> {
    assert!(suite::run_suite(
        &assets::default_suite_dir().join("test"),
        Some(std::ffi::OsStr::new("control"))
    )?);
    Ok(())
}

#[test]
fn unknown_unit_is_an_error() {
    assert!(suite::run_suite(
        &assets::default_suite_dir().join("test"),
        Some(std::ffi::OsStr::new("no-such-unit"))
    )
    .is_err());
}
