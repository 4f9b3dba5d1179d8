pub mod app;
pub mod config;
pub mod totals;

pub use app::*;
pub use config::*;
pub use totals::*;

#[cfg(test)]
mod fixture_tests {
    use super::*;
    use rig_core::Severity;
    use std::path::Path;
    use tempfile::tempdir;

    fn fixture(rel: &str) -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../fixtures").join(rel)
    }

    #[test]
    fn loads_and_checks_the_mismatched_build_fixture() {
        let dir = tempdir().unwrap();
        App::init_dir(dir.path()).unwrap();
        let app = App::open(dir.path().to_path_buf()).unwrap();

        let issues = app.check_file(&fixture("selections/mismatched_build.yaml")).unwrap();
        let errors: Vec<_> = issues.iter().filter(|i| i.severity == Severity::Error).collect();
        let warnings: Vec<_> = issues.iter().filter(|i| i.severity == Severity::Warning).collect();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "CPU socket AM5 does not match motherboard socket AM4");
        assert!(warnings.iter().any(|i| i.rule_id.as_str() == "rule-psu-wattage"));
    }

    #[test]
    fn compatible_build_fixture_is_clean() {
        let dir = tempdir().unwrap();
        App::init_dir(dir.path()).unwrap();
        let app = App::open(dir.path().to_path_buf()).unwrap();

        let issues = app.check_file(&fixture("selections/compatible_build.yaml")).unwrap();
        assert!(issues.is_empty(), "unexpected issues: {:?}", issues);
    }

    #[test]
    fn extra_pack_fixture_seeds_on_top_of_defaults() {
        let dir = tempdir().unwrap();
        App::init_dir(dir.path()).unwrap();
        let app = App::open(dir.path().to_path_buf()).unwrap();

        let report = app.seed_pack_file(&fixture("packs/storage_rules.yaml")).unwrap();
        assert_eq!(report.inserted, 1);

        let issues = app.check_file(&fixture("selections/compatible_build.yaml")).unwrap();
        assert!(issues.iter().any(|i| i.rule_id.as_str() == "rule-needs-storage"));
    }
}
