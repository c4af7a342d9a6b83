use std::path::Path;

fn demo(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos/jobs")
        .join(name)
}

#[test]
fn demos_load_and_validate() {
    for name in ["01_office_supply_ip.yaml", "02_lab_exhaust_si.json"] {
        let job = dw_project::load(&demo(name))
            .unwrap_or_else(|e| panic!("Failed to load {}: {}", name, e));
        dw_project::validate_job(&job)
            .unwrap_or_else(|e| panic!("Failed to validate {}: {}", name, e));
    }
}

#[test]
fn office_demo_sizes_and_prices() {
    let job = dw_project::load_yaml(&demo("01_office_supply_ip.yaml")).unwrap();
    let report = dw_project::run_job(&job).unwrap();

    let sizes: Vec<String> = report
        .rows
        .iter()
        .map(|row| row.outcome.dimensions.to_string())
        .collect();
    assert_eq!(sizes, ["20x10", "12x8", "12x6", "24x14"]);

    // return-main inherits the settings friction rate
    assert_eq!(report.rows[3].friction_rate, 0.08);
    assert_eq!(report.unconverged().count(), 0);

    let header_line = report
        .takeoff
        .line(dw_sizing::Gauge(22))
        .expect("header gauge line");
    assert!(header_line.base_area > 0.0);
    assert!(report.takeoff.grand_total > 0.0);
}

#[test]
fn lab_demo_uses_si_units() {
    let job = dw_project::load_json(&demo("02_lab_exhaust_si.json")).unwrap();
    assert_eq!(job.settings.unit_system, dw_core::UnitSystem::Si);

    let report = dw_project::run_job(&job).unwrap();
    assert_eq!(report.rows[0].outcome.dimensions.to_string(), "454x228");
    assert_eq!(report.rows[2].outcome.dimensions.height(), 200);
    assert!((report.rows[0].outcome.velocity - 4.83).abs() < 0.01);
}
