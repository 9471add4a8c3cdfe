use super::*;

#[test]
fn defaults_and_repeat_init() {
    let opts = LoggingOpts::default();
    assert_eq!(opts.level, "info");
    assert!(!opts.json);

    init_logging(&opts);
    init_logging(&LoggingOpts {
        json: true,
        ..opts
    });
    tracing::info!("still fine");
}
