use prometheus::{Error, IntGaugeVec, Opts};

/// `<exporter>_build_info{version}` with a constant value of 1.
pub fn build_info(exporter: &str, version: &str) -> Result<IntGaugeVec, Error> {
    let gauge = IntGaugeVec::new(
        Opts::new(
            "build_info",
            format!("A metric with a constant '1' value labeled by the version from which {exporter} was built."),
        )
        .namespace(exporter),
        &["version"],
    )?;
    gauge.get_metric_with_label_values(&[version])?.set(1);
    Ok(gauge)
}
